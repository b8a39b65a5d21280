//! Tracing setup for hosts embedding `timeline-rs`.
//!
//! The engine only emits `tracing` events (window builds, normalization
//! counts, resize commits). Installing a subscriber is left to the host;
//! the helpers here cover demos, benches and tests.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_FILTER: &str = "warn,timeline_rs=info";

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is off or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_TRACING_FILTER.to_owned());
    init_tracing_with_filter(&filter)
}

/// Installs a compact subscriber with an explicit filter directive,
/// e.g. `"timeline_rs::interaction=trace"` while debugging a drag.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let Ok(filter) = tracing_subscriber::EnvFilter::try_new(directives) else {
            return false;
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}
