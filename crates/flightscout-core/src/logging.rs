//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// The terminal is owned by the UI, so logs are written to
/// `~/.local/share/flightscout/logs/`.
/// Log level is controlled by `FLIGHTSCOUT_LOG` environment variable.
///
/// # Examples
/// ```bash
/// FLIGHTSCOUT_LOG=debug flightscout
/// FLIGHTSCOUT_LOG=flightscout_app=trace flightscout
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "flightscout.log");

    let env_filter = EnvFilter::try_from_env("FLIGHTSCOUT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(
            "flightscout=info,flightscout_app=info,flightscout_gateway=info,flightscout_tui=info,warn",
        ));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("flightscout starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// `<data_local_dir>/flightscout/logs`, or `./flightscout/logs` when the
/// platform has no data directory
fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flightscout")
        .join("logs")
}
