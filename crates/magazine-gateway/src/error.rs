//! Gateway-level errors: everything that can stop the process from starting or
//! shutting down cleanly.

use crate::category_store::CategoryError;
use actor_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Actor system error: {0}")]
    Actor(#[from] FrameworkError),

    #[error("Category error: {0}")]
    Category(#[from] CategoryError),

    #[error("Tracing setup failed: {0}")]
    Tracing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
