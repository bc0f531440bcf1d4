//! Opt-in tracing setup for hosts embedding the timeline engine.
//!
//! Hosts with their own subscriber can skip this and filter on the
//! `print_gantt` target directly.

#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "warn,print_gantt=info";

/// Installs a compact `tracing` subscriber when the `telemetry` feature is on.
///
/// `RUST_LOG` overrides the default filter, which keeps this crate at `info`
/// and everything else at `warn`. Returns `false` when the feature is off or a
/// global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
