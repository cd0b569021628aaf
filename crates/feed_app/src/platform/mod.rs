mod app;
mod config;
mod logging;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use feed_logging::feed_info;

/// Loads configuration, sets up logging and runs the poll/render loop on a
/// current-thread runtime until Ctrl-C.
pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILENAME));
    let config = config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    logging::initialize(config.log_destination);
    feed_info!("Using config from {:?}: {:?}", config_path, config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(app::run(config))
}
