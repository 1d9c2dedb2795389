use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};

static LOG_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

/// Initializes process-wide logging. `base_level` is used when
/// `RUST_LOG` is not set. Safe to call more than once; only the
/// first call takes effect.
pub fn setup_logging(base_level: &str) {
    if LOG_HANDLE.get().is_some() {
        return;
    }

    let handle = Logger::try_with_env_or_str(base_level)
        .unwrap_or_else(|e| panic!("Invalid log filter: {}", e))
        .format(flexi_logger::detailed_format)
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed: {}", e));

    // A racing second call loses; its handle is dropped and the
    // original logger stays installed.
    let _ = LOG_HANDLE.set(handle);
}
