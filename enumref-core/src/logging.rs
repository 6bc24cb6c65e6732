//! Structured logging using **tracing**.
//!
//! The library itself only emits events: a `debug` event per table build,
//! a `warn` per alias, an `error` per rejected manifest entry. Installing a
//! subscriber is left to binaries.
//!
//! The JSON subscriber provides machine-readable output on stderr, keeping
//! stdout free for listings.

use tracing::{error, info, warn};

/// Initializes the global tracing subscriber.
///
/// Call once at program start. Output is JSON on stderr, filtered by
/// `RUST_LOG` (e.g. `RUST_LOG=enumref_core=debug` to see every table build).
pub fn init_structured_logging() {
    if try_init_structured_logging().is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Like [`init_structured_logging`], but reports an already-installed subscriber.
pub fn try_init_structured_logging() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}

pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

pub fn log_info(message: &str) {
    info!(detail = %message);
}

pub fn log_error(message: &str) {
    error!(detail = %message);
}

/// Logs an event for one enum, picking the level from the event name.
pub fn log_event(event: &str, enum_name: &str, detail: &str) {
    match event.to_uppercase().as_str() {
        "ERROR" => error!(event = %event, enum_name = %enum_name, detail = %detail),
        "WARN" | "WARNING" => warn!(event = %event, enum_name = %enum_name, detail = %detail),
        _ => info!(event = %event, enum_name = %enum_name, detail = %detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_reported() {
        // Whichever call installs first wins; the other must not panic.
        let first = try_init_structured_logging();
        let second = try_init_structured_logging();
        assert!(first.is_err() || second.is_err());
        init_structured_logging();
    }

    #[test]
    fn test_helpers_without_subscriber() {
        log_info("info");
        log_warn("warn");
        log_error("error");
        log_event("WARNING", "Ports", "alias");
    }
}
