//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.
//! Resource actors, routers and the actor system all report through
//! [`FrameworkError`], so clients only ever map one type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Message can not be routed by {router}: {reason}")]
    Unroutable { router: String, reason: String },
    #[error("Actor name already in use: {0}")]
    DuplicateActorName(String),
    #[error("No deployment configured for router {0}")]
    MissingDeployment(String),
    #[error("Invalid deployment for router {name}: {reason}")]
    InvalidDeployment { name: String, reason: String },
    #[error("Actor system {0} is terminated")]
    SystemTerminated(String),
    #[error("Actor system did not terminate within {0:?}")]
    TerminationTimeout(std::time::Duration),
}
