//! Error types for the Category domain.

use crate::model::CategoryId;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during category operations.
///
/// The store, both actor groups and every client report through this one type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    /// The requested category was not found.
    #[error("Category not found: {0}")]
    NotFound(String),

    /// The category data provided is invalid.
    #[error("Category validation error: {0}")]
    ValidationError(String),

    /// The referenced parent category does not exist.
    #[error("Parent category not found: {0}")]
    ParentNotFound(CategoryId),

    /// The category still has child categories.
    #[error("Category {id} has {children} child categories")]
    HasChildren { id: CategoryId, children: usize },

    /// Moving the category would make it its own ancestor.
    #[error("Category {id} can not be moved under {parent}")]
    CyclicParent { id: CategoryId, parent: CategoryId },

    /// The actor behind the request has stopped.
    #[error("Category service unavailable: {0}")]
    Unavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CategoryError {
    fn from(msg: String) -> Self {
        CategoryError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for CategoryError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CategoryError::NotFound(id),
            // Hooks box a CategoryError; hand it back unchanged.
            FrameworkError::EntityError(source) => match source.downcast::<CategoryError>() {
                Ok(domain) => *domain,
                Err(other) => CategoryError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::ActorClosed
            | FrameworkError::ActorDropped
            | FrameworkError::SystemTerminated(_) => CategoryError::Unavailable(e.to_string()),
            other => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_is_unwrapped() {
        let boxed = FrameworkError::EntityError(Box::new(CategoryError::ValidationError(
            "name must not be empty".into(),
        )));
        assert_eq!(
            CategoryError::from(boxed),
            CategoryError::ValidationError("name must not be empty".into())
        );
    }

    #[test]
    fn test_framework_errors_map_to_domain() {
        assert_eq!(
            CategoryError::from(FrameworkError::NotFound("category_4".into())),
            CategoryError::NotFound("category_4".into())
        );
        assert!(matches!(
            CategoryError::from(FrameworkError::ActorClosed),
            CategoryError::Unavailable(_)
        ));
        assert!(matches!(
            CategoryError::from(FrameworkError::EntityError(Box::new(std::io::Error::other(
                "disk"
            )))),
            CategoryError::ActorCommunicationError(msg) if msg == "disk"
        ));
    }
}
