use crate::config::{LogFormat, LoggingConfig};
use crate::error::GatewayError;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing/logging infrastructure for the application.
///
/// `RUST_LOG` wins over `logging.level` when it is set:
/// - `RUST_LOG=info` - info, warn and error
/// - `RUST_LOG=debug` - every message and payload the actors log
/// - `RUST_LOG=actor_framework=debug,info` - debug only for the actor runtime
///
/// `logging.format` picks compact lines for terminals or JSON lines for collectors.
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), GatewayError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| GatewayError::Tracing(format!("logging.level {:?}: {e}", config.level)))?,
    };

    let installed = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
    };
    installed.map_err(|e| GatewayError::Tracing(e.to_string()))
}
