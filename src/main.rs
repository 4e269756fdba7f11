use clap::Parser;
use miru_core::config::Config;
use miru_core::{Catalog, KeywordMap};
use miru_data::DirSource;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "miru", about = "miru — terminal gallery for AI-generated images")]
struct Cli {
    /// Directory containing images.json and keywords.json.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write debug logs to /tmp/miru-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/miru-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("miru debug log started — tail -f /tmp/miru-debug.log");
    }

    let config = Config::load().unwrap_or_else(|_| Config::defaults());
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| PathBuf::from(&config.data.dir));

    // The one asynchronous operation in the system: load both documents,
    // settle before the UI starts, then drop the runtime.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let source = DirSource::new(&data_dir);
    let (catalog, keywords, notice) = match runtime.block_on(miru_data::load(&source)) {
        Ok((catalog, keywords)) => (catalog, keywords, None),
        Err(err) => {
            // Not fatal: start with an empty catalog and surface a toast.
            tracing::warn!(%err, "data load failed");
            (
                Catalog::default(),
                KeywordMap::default(),
                Some("データの読み込みに失敗しました".to_string()),
            )
        }
    };
    drop(runtime);

    miru_tui::run(catalog, keywords, config, data_dir, notice)
}
