use std::{fs::File, path::Path, sync::OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Overrides the default `info` filter, e.g. `DASH_PRINTER_LOG=dash_printer=debug`.
pub const LOG_FILTER_ENV: &str = "DASH_PRINTER_LOG";

/// Sends tracing output to `<log_dir>/dash-printer.log`. Only the first call
/// installs the subscriber; later calls are no-ops.
pub fn setup_logger(log_dir: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let file = File::create(Path::new(log_dir).join("dash-printer.log"))?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(non_blocking_writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;
    LOG_GUARD.set(guard).ok();

    Ok(())
}
