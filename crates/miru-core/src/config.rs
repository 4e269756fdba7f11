//! Configuration types for miru.
//!
//! [`Config::load`] reads `~/.config/miru/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
debounce_ms  = 300
toast_secs   = 5
show_prompts = true
date_format  = "%Y-%m-%d"

[data]
dir           = "data"
images_subdir = "images"

[keybindings]
search_focus = "/"
sort_cycle   = "s"
model_cycle  = "m"
clear_search = "c"
open_detail  = "Enter"
scroll_to_top = "G"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/miru/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Query keystrokes are coalesced so the engine runs at most once per
    /// window.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Toast notifications auto-dismiss after this many seconds.
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
    #[serde(default = "default_show_prompts")]
    pub show_prompts: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_debounce_ms() -> u64 { 300 }
fn default_toast_secs() -> u64 { 5 }
fn default_show_prompts() -> bool { true }
fn default_date_format() -> String { "%Y-%m-%d".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            toast_secs: default_toast_secs(),
            show_prompts: default_show_prompts(),
            date_format: default_date_format(),
        }
    }
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding `images.json` and `keywords.json`; overridable
    /// with `--data-dir`.
    #[serde(default = "default_data_dir")]
    pub dir: String,
    /// Subdirectory of `dir` holding the image assets.
    #[serde(default = "default_images_subdir")]
    pub images_subdir: String,
}

fn default_data_dir() -> String { "data".to_string() }
fn default_images_subdir() -> String { "images".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            images_subdir: default_images_subdir(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_search_focus")]
    pub search_focus: String,
    #[serde(default = "default_sort_cycle")]
    pub sort_cycle: String,
    #[serde(default = "default_model_cycle")]
    pub model_cycle: String,
    #[serde(default = "default_clear_search")]
    pub clear_search: String,
    #[serde(default = "default_open_detail")]
    pub open_detail: String,
    #[serde(default = "default_scroll_to_top")]
    pub scroll_to_top: String,
}

fn default_search_focus() -> String { "/".to_string() }
fn default_sort_cycle() -> String { "s".to_string() }
fn default_model_cycle() -> String { "m".to_string() }
fn default_clear_search() -> String { "c".to_string() }
fn default_open_detail() -> String { "Enter".to_string() }
fn default_scroll_to_top() -> String { "G".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            search_focus: default_search_focus(),
            sort_cycle: default_sort_cycle(),
            model_cycle: default_model_cycle(),
            clear_search: default_clear_search(),
            open_detail: default_open_detail(),
            scroll_to_top: default_scroll_to_top(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/miru/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("miru")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
