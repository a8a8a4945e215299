mod config;
mod error;
mod glados;
mod pushplus;
mod report;

pub use config::*;
pub use error::*;
pub use glados::*;
pub use pushplus::*;
pub use report::*;

use anyhow::Context;
use std::env;
use std::fs::File;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_VAR: &str = "CHECKIN_LOG_FILE";

pub fn init_log_env() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // .env is optional

    let file_layer = match env::var(LOG_FILE_VAR) {
        Ok(path) if !path.is_empty() => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {}", path))?;
            Some(
                fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false)
                    .with_writer(file),
            )
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();
    Ok(())
}

/// One full run: check in, then hand the report to the notifier.
///
/// Push failures are logged and dropped; they never change what the run returns.
pub async fn run(config: &Config) -> anyhow::Result<Option<CheckinReport>> {
    let glados = Glados::new(config)?;
    let notifier = PushPlus::new(config)?;

    let report = glados.checkin().await;
    if let Err(e) = notifier.notify(report.as_ref()).await {
        warn!("{}", e);
    }
    Ok(report)
}
