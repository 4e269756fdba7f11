// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use miru_core::SortKey;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Close the app regardless of state (alias, kept for muscle memory)
    Exit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Set the sort order directly; None = catalog order
    Sort(Option<SortKey>),
    // Set the model facet; None = all models
    Model(Option<String>),
    // Replace the search query
    Search(String),
    // Clear the search query
    Clear,
    // Switch to a tab by name or number
    Tab(usize),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without
    /// acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "q!" | "quit!" => Ok(Command::Exit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "sort" => match rest {
                "" => Err("usage: sort <newest|oldest|title|none>".to_string()),
                "none" => Ok(Command::Sort(None)),
                other => match SortKey::parse(other) {
                    Some(key) => Ok(Command::Sort(Some(key))),
                    None => Err(format!("unknown sort key: {other}")),
                },
            },
            "model" => {
                if rest.is_empty() {
                    Ok(Command::Model(None))
                } else {
                    Ok(Command::Model(Some(rest.to_string())))
                }
            }
            "search" => Ok(Command::Search(rest.to_string())),
            "tab" => match rest {
                "gallery" | "1" => Ok(Command::Tab(0)),
                "models" | "2" => Ok(Command::Tab(1)),
                "about" | "3" => Ok(Command::Tab(2)),
                other => Err(format!("unknown tab: {other}")),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("quit!"), Ok(Command::Exit));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("clear"), Ok(Command::Clear));
    }

    #[test]
    fn empty_input_is_the_close_sentinel() {
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[test]
    fn sort_accepts_all_keys_and_none() {
        assert_eq!(
            Command::parse("sort newest"),
            Ok(Command::Sort(Some(SortKey::Newest)))
        );
        assert_eq!(
            Command::parse("sort title"),
            Ok(Command::Sort(Some(SortKey::Title)))
        );
        assert_eq!(Command::parse("sort none"), Ok(Command::Sort(None)));
        assert!(Command::parse("sort relevance").is_err());
        assert!(Command::parse("sort").is_err());
    }

    #[test]
    fn model_without_argument_clears_the_facet() {
        assert_eq!(Command::parse("model"), Ok(Command::Model(None)));
        assert_eq!(
            Command::parse("model Animagine XL"),
            Ok(Command::Model(Some("Animagine XL".to_string())))
        );
    }

    #[test]
    fn search_takes_the_rest_verbatim() {
        assert_eq!(
            Command::parse("search 猫 beach"),
            Ok(Command::Search("猫 beach".to_string()))
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn tab_by_name_or_number() {
        assert_eq!(Command::parse("tab gallery"), Ok(Command::Tab(0)));
        assert_eq!(Command::parse("tab 2"), Ok(Command::Tab(1)));
        assert!(Command::parse("tab settings").is_err());
    }

    #[test]
    fn unknown_command_reports_itself() {
        assert_eq!(
            Command::parse("frobnicate"),
            Err("unknown command: frobnicate".to_string())
        );
    }
}
