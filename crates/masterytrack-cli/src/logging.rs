use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives are read from `MASTERYTRACK_LOG`, e.g. `masterytrack_core=debug`.
const LOG_ENV: &str = "MASTERYTRACK_LOG";

/// Log to stderr so stdout stays machine-readable JSON.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
