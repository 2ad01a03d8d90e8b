use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FORMAT_VAR: &str = "STUDENTHUB_LOG_FORMAT";

/// Install the global subscriber.
///
/// JSON lines by default; `STUDENTHUB_LOG_FORMAT=pretty` switches to
/// human-readable output for local runs. Filtering follows `RUST_LOG`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info"));

    let pretty = std::env::var(LOG_FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if pretty {
        registry.with(fmt::layer().with_target(false)).init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_ansi(false).json())
            .init();
    }
}
