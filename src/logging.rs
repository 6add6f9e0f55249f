//! Tracing setup shared by the binaries

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

use crate::config::LoggingConfig;

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level. `default_directive` is appended
/// to the configured level when `RUST_LOG` is unset, e.g. `tower_http=debug`.
pub fn init_tracing(config: &LoggingConfig, default_directive: Option<&str>) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = match default_directive {
            Some(extra) => format!("{},{}", config.level, extra),
            None => config.level.clone(),
        };
        EnvFilter::new(directives)
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}
