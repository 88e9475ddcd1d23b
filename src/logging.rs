//! Diagnostic logging setup.
//!
//! The storage and flow layers log every failure at the point of
//! detection; this module wires those logs to a daily-rolling file in
//! the platform local data directory. The embedding application calls
//! [`init`] once at startup and holds the returned guard for the life
//! of the process.

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Logs go to `muezzin.log` under the platform local data directory,
/// filtered by `RUST_LOG`. The returned guard must be kept alive; the
/// non-blocking writer stops flushing once it drops.
pub fn init() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("muezzin").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "muezzin.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    Ok(guard)
}
