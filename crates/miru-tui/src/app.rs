//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Every filter-state
//! change re-invokes the engine against the full catalog: facet and sort
//! changes immediately, query edits through the debouncer so fast typing
//! coalesces into one engine call per quiet window.

use crate::{
    commands::Command,
    debounce::Debouncer,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        detail::DetailView,
        gallery::{Gallery, GalleryState},
        help::HelpPopup,
        models_view::ModelsView,
        search_bar::{SearchBar, SearchBarState},
        tab_bar::TabBar,
        toast::Toast,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miru_core::{config::Config, filter, resolve_asset, Catalog, FilterState, KeywordMap, SortKey};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

const TAB_LABELS: &[&str] = &["1:gallery", "2:models", "3:about"];

// ---------------------------------------------------------------------------
// Focus + notification types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Gallery,
    Search,
    /// Vim-style `:` command line is active.
    Command,
}

/// A transient toast notification; dropped once `expires_at` passes.
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub catalog: Catalog,
    pub keywords: KeywordMap,
    pub filter: FilterState,
    pub gallery: GalleryState,
    pub search: SearchBarState,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub images_dir: PathBuf,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Record id currently shown in the detail overlay.
    pub detail: Option<String>,
    pub toast: Option<Notice>,
    pub debouncer: Debouncer,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(
        catalog: Catalog,
        keywords: KeywordMap,
        config: Config,
        images_dir: PathBuf,
        theme: Theme,
        startup_notice: Option<String>,
    ) -> Self {
        let debouncer = Debouncer::new(Duration::from_millis(config.ui.debounce_ms));
        let skipped = catalog.skipped();

        let mut state = AppState {
            catalog,
            keywords,
            filter: FilterState::default(),
            gallery: GalleryState::default(),
            search: SearchBarState::default(),
            active_tab: 0,
            focus: Focus::Gallery,
            prev_focus: Focus::Gallery,
            theme,
            config,
            images_dir,
            show_help: false,
            command_bar: CommandBarState::default(),
            detail: None,
            toast: None,
            debouncer,
            quit: false,
        };

        refresh_results(&mut state);

        if let Some(message) = startup_notice {
            show_toast(&mut state, message);
        } else if skipped > 0 {
            show_toast(&mut state, format!("{skipped}件の画像を読み込めませんでした"));
        }

        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            let now = Instant::now();

            // Expire the toast
            if self
                .state
                .toast
                .as_ref()
                .is_some_and(|toast| now >= toast.expires_at)
            {
                self.state.toast = None;
            }

            // A quiet window has elapsed since the last query edit; the
            // engine runs once against the latest filter state.
            if self.state.debouncer.poll(now) {
                refresh_results(&mut self.state);
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        // Detail overlay intercepts all events: close keys, or a digit to
        // replace the query with the corresponding tag.
        if s.detail.is_some() {
            match event {
                AppEvent::Escape | AppEvent::Quit | AppEvent::Enter => {
                    tracing::debug!("detail view closed");
                    s.detail = None;
                }
                // Digits reach us as ShowTab (1-3) or Char (4-9) depending
                // on the normal-mode key map.
                AppEvent::ShowTab(n) => select_tag(s, n),
                AppEvent::Char(c @ '1'..='9') => select_tag(s, c as usize - '1' as usize),
                _ => {}
            }
            return;
        }

        match event {
            // Toggle help (only when not typing in the search bar)
            AppEvent::Char('?') if s.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            // Enter command mode with `:` (not from the search bar)
            AppEvent::Char(':') if s.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Return focus from the search bar
            AppEvent::Escape => {
                if s.focus == Focus::Search {
                    tracing::debug!("focus: Search -> Gallery");
                    s.focus = Focus::Gallery;
                }
            }

            // Toggle focus: gallery ↔ search
            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::Gallery => Focus::Search,
                    Focus::Search | Focus::Command => Focus::Gallery,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::SearchFocus => {
                tracing::debug!("focus -> Search");
                s.focus = Focus::Search;
            }

            // Facet / sort controls re-apply immediately; any pending
            // debounced run would be redundant.
            AppEvent::SortCycle => {
                cycle_sort(s);
                refresh_now(s);
            }
            AppEvent::ModelCycle => {
                cycle_model(s);
                refresh_now(s);
            }
            AppEvent::ClearSearch => {
                s.search.set_query("");
                s.filter.query.clear();
                refresh_now(s);
            }

            AppEvent::ShowTab(n) if n < TAB_LABELS.len() => {
                tracing::debug!(tab = n, "switch tab");
                s.active_tab = n;
            }

            AppEvent::Enter => match s.focus {
                Focus::Gallery if s.active_tab == 0 => {
                    if let Some(idx) = s.gallery.selected() {
                        let id = s.catalog.records()[idx].id.clone();
                        open_detail(s, &id);
                    }
                }
                Focus::Search => {
                    // Apply the query immediately and return to the gallery
                    refresh_now(s);
                    s.focus = Focus::Gallery;
                }
                _ => {}
            },

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// State transitions
// ---------------------------------------------------------------------------

/// Re-run the engine against the current filter state and hand the result
/// sequence to the gallery.
fn refresh_results(s: &mut AppState) {
    let results = filter::apply_indices(&s.catalog, &s.keywords, &s.filter);
    tracing::debug!(
        hits = results.len(),
        query = %s.filter.query,
        model = ?s.filter.model,
        sort = ?s.filter.sort,
        "results refreshed"
    );
    s.gallery.set_results(results);
}

/// Refresh immediately, superseding any pending debounced run.
fn refresh_now(s: &mut AppState) {
    s.debouncer.cancel();
    refresh_results(s);
}

fn show_toast(s: &mut AppState, message: String) {
    tracing::info!(%message, "toast");
    s.toast = Some(Notice {
        message,
        expires_at: Instant::now() + Duration::from_secs(s.config.ui.toast_secs),
    });
}

/// Open the detail overlay for a record id. An unknown id is silently
/// ignored — no view change, no error surfaced.
fn open_detail(s: &mut AppState, id: &str) {
    if s.catalog.get(id).is_none() {
        tracing::debug!(id, "detail open ignored: unknown id");
        return;
    }
    tracing::debug!(id, "detail view opened");
    s.detail = Some(id.to_string());
}

/// Replace the query with the n-th (0-based) tag of the record shown in
/// the detail overlay, close the overlay, and return to the gallery.
fn select_tag(s: &mut AppState, n: usize) {
    let Some(id) = s.detail.clone() else { return };
    let tag = s
        .catalog
        .get(&id)
        .and_then(|record| record.tags.get(n).cloned());
    let Some(tag) = tag else { return };

    tracing::debug!(%tag, "tag selected from detail view");
    s.search.set_query(tag.clone());
    s.filter.query = tag;
    s.detail = None;
    s.active_tab = 0;
    s.focus = Focus::Gallery;
    refresh_now(s);
}

fn cycle_sort(s: &mut AppState) {
    s.filter.sort = match s.filter.sort {
        Some(SortKey::Newest) => Some(SortKey::Oldest),
        Some(SortKey::Oldest) => Some(SortKey::Title),
        Some(SortKey::Title) => Some(SortKey::Newest),
        None => Some(SortKey::Newest),
    };
}

/// Advance the model facet: all models → each model in first-seen order →
/// all models.
fn cycle_model(s: &mut AppState) {
    let names: Vec<String> = s.catalog.model_names().iter().map(|n| n.to_string()).collect();
    s.filter.model = match &s.filter.model {
        None => names.first().cloned(),
        Some(current) => match names.iter().position(|n| n == current) {
            Some(i) => names.get(i + 1).cloned(),
            None => None,
        },
    };
}

/// Execute a parsed [`Command`] against the application state.
fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit | Command::Exit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = match name.to_ascii_lowercase().as_str() {
                "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                _ => Theme::load_default(),
            };
        }
        Command::Sort(key) => {
            s.filter.sort = key;
            refresh_now(s);
        }
        Command::Model(model) => {
            s.filter.model = model;
            refresh_now(s);
        }
        Command::Search(text) => {
            s.search.set_query(text.clone());
            s.filter.query = text;
            refresh_now(s);
        }
        Command::Clear => {
            s.search.set_query("");
            s.filter.query.clear();
            refresh_now(s);
        }
        Command::Tab(n) => {
            if n < TAB_LABELS.len() {
                s.active_tab = n;
            }
        }
    }
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Gallery => {
            if s.active_tab == 0 {
                s.gallery.handle(&event);
            }
        }
        Focus::Search => match event {
            AppEvent::Char(_) | AppEvent::Backspace => {
                s.search.handle(&event);
                s.filter.query = s.search.query.clone();
                s.debouncer.schedule(Instant::now());
            }
            AppEvent::Nav(_) => s.search.handle(&event),
            _ => {}
        },
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(TabBar::new(TAB_LABELS, state.active_tab, &state.theme), vert[0]);

    match state.active_tab {
        1 => frame.render_widget(ModelsView::new(&state.catalog, &state.theme), vert[1]),
        2 => draw_about(frame, vert[1], state),
        _ => {
            let needle = state.filter.query.trim().to_lowercase();
            frame.render_widget(
                Gallery::new(
                    &state.gallery,
                    &state.catalog,
                    &needle,
                    state.focus == Focus::Gallery,
                    state.config.ui.show_prompts,
                    &state.config.ui.date_format,
                    &state.theme,
                ),
                vert[1],
            );
        }
    }

    let search_bar = SearchBar::new(
        &state.search,
        &state.filter,
        state.gallery.results.len(),
        state.focus == Focus::Search,
        &state.theme,
    );
    let search_cursor = search_bar.cursor_position(vert[2]);
    frame.render_widget(search_bar, vert[2]);

    if let Some(id) = &state.detail {
        if let Some(record) = state.catalog.get(id) {
            let asset = resolve_asset(&state.images_dir, record);
            frame.render_widget(
                DetailView::new(record, &asset, &state.config.ui.date_format, &state.theme),
                area,
            );
        }
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    if let Some(toast) = &state.toast {
        frame.render_widget(Toast::new(&toast.message, &state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom() - 1,
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip search-bar cursor below
    }

    // Position the terminal cursor when the search bar is focused
    if state.focus == Focus::Search {
        frame.set_cursor_position(search_cursor);
    }
}

fn draw_about(frame: &mut Frame, area: Rect, state: &AppState) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "miru — AI生成画像ギャラリー",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("A terminal gallery browser for a static catalog of generated images."),
        Line::from(
            "Search in Japanese or English — Japanese queries are expanded to English \
             prompt terms through the bundled keyword table.",
        ),
        Line::default(),
        Line::from(vec![
            Span::raw("Catalog: "),
            Span::styled(format!("{}件", state.catalog.len()), dim),
            Span::raw("   Keywords: "),
            Span::styled(format!("{}語", state.keywords.len()), dim),
        ]),
        Line::default(),
        Line::from(Span::styled("press ? for keybindings", dim)),
    ];

    let block = Block::bordered()
        .title(" About ")
        .border_style(state.theme.border_unfocused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
