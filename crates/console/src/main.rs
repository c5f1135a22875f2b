mod app;
mod palette;
mod render;

use std::{
    fs::{self, OpenOptions},
    io,
    sync::Mutex,
};

use anyhow::{Context, Result};
use skyport_core::{AppConfig, TransactionStore};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{app::SkyportApp, palette::Palette};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config)?;
    info!(log_dir = %config.log_dir().display(), "starting SkyPort TPS");

    let store = TransactionStore::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = SkyportApp::new(
        stdin.lock(),
        stdout.lock(),
        store,
        Palette::detect(config.color),
    );
    app.run()
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let env_filter = EnvFilter::from_default_env();
    let log_dir = config.log_dir();

    if let Err(err) = fs::create_dir_all(&log_dir) {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(io::stderr);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        warn!(
            "failed to create log directory {} ({err}), logging to stderr",
            log_dir.display()
        );
        return Ok(());
    }

    let log_path = log_dir.join("skyport.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
