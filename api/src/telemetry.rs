use tracing_subscriber::{fmt, EnvFilter};

use pw_shared::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over `LOG_LEVEL`.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    fmt()
        .with_env_filter(env_filter)
        .with_target(config.is_debug())
        .init();
}
