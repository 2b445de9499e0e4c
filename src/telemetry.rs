//! Tracing setup for the `grue` binary.
//!
//! Logs go to stderr; stdout carries notices and reports. The filter comes
//! from `GRUE_LOG`, then `RUST_LOG`, defaulting to `warn`. Set
//! `GRUE_LOG_FORMAT=json` for one JSON object per event.

use tracing_subscriber::EnvFilter;

const FILTER_VARS: [&str; 2] = ["GRUE_LOG", "RUST_LOG"];

/// Keeps the subscriber installed for the life of `main`.
pub struct TelemetryGuard {
    _private: (),
}

pub fn init() -> TelemetryGuard {
    let filter = FILTER_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let json = std::env::var("GRUE_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("warning: tracing already initialized: {e}");
    }

    TelemetryGuard { _private: () }
}
