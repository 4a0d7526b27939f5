use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter used when RUST_LOG is not set
pub const DEFAULT_FILTER: &str = "keybinder=debug,keybinder_lib=debug,warn";

/// Initialize logging with tracing
///
/// This function sets up the tracing subscriber with the following configuration:
/// - Reads filter from RUST_LOG environment variable if available
/// - Falls back to [`DEFAULT_FILTER`] if RUST_LOG is not set
/// - Uses a formatted output layer
///
/// Calling it again after a subscriber is installed is a no-op and returns `false`.
///
/// # Example
///
/// ```no_run
/// use keybinder_lib::utils::logging::init_logging;
///
/// init_logging();
/// ```
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Keybinder logging initialized");
    }
    installed
}
