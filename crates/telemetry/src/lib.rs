//! Logging bootstrap: installs the global tracing subscriber.

use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing pipeline according to settings.
///
/// Respects `RUST_LOG`; falls back to `info` when unset. Calling this more
/// than once is harmless; later calls leave the installed subscriber in
/// place, which matters under `cargo test`.
pub fn init(settings: &TelemetrySettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match settings.log_format {
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .try_init()
                .ok();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .try_init()
                .ok();
        }
    }

    tracing::debug!(format = ?settings.log_format, "telemetry initialized");
}
