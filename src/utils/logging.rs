use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing with a compact stderr layer.
///
/// The filter comes from `RUST_LOG` (e.g. `RUST_LOG=tabular_view=debug`),
/// falling back to warnings only. Calling this twice is harmless.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!(target: "system", "Tracing initialized");
}

#[macro_export]
macro_rules! trace_view_operation {
    ($op:expr) => {
        tracing::debug!(target: "operation", "{}", $op);
    };
}
