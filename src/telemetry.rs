//! Telemetry helpers for hosts embedding `chart-sync`.
//!
//! The engine only emits `tracing` events (shape mismatches, rebuilds,
//! registry updates). Hosts either call one of the init helpers below or
//! wire their own subscriber and filters.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_sync=info";

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is unset.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already set by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-supplied fallback filter
/// (for example `"chart_sync=trace"` while debugging reconciliation).
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
