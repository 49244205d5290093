use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,strand_core=debug";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize a simple stdout tracing subscriber for development
pub fn init_stdout_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .init();
}

/// Initialize newline-delimited JSON logs on stdout.
///
/// Does nothing if a subscriber is already installed.
pub fn init_json_tracing() {
    let _ = try_init_json_tracing();
}

/// Like [`init_json_tracing`], but reports an already installed subscriber.
pub fn try_init_json_tracing() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .try_init()
        .map_err(|e| anyhow!("tracing subscriber already set: {e}"))
}

/// Install a test-writer subscriber at `trace` level for the engine crates.
///
/// Safe to call from every test; only the first call installs anything.
pub fn try_init_test_tracing() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn,strand_core=trace,strand_std=trace"))
        .with_test_writer()
        .try_init()
        .map_err(|e| anyhow!("tracing subscriber already set: {e}"))
}
