//! miru TUI — ratatui application shell.

use std::path::PathBuf;

pub mod app;
pub mod commands;
pub mod debounce;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Start the TUI against an already-loaded catalog and keyword map.
///
/// `startup_notice` carries a load-failure message to surface as a toast
/// once the UI is up — the load itself has already settled by the time
/// this runs.
pub fn run(
    catalog: miru_core::Catalog,
    keywords: miru_core::KeywordMap,
    config: miru_core::config::Config,
    data_dir: PathBuf,
    startup_notice: Option<String>,
) -> anyhow::Result<()> {
    let images_dir = data_dir.join(&config.data.images_subdir);
    let theme = theme::Theme::load_default();
    App::new(catalog, keywords, config, images_dir, theme, startup_notice).run()
}
