use crate::category_store::CategoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub type HttpResult<T> = Result<T, HttpError>;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub struct HttpError {
    message: String,
    status: StatusCode,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<CategoryError> for HttpError {
    fn from(e: CategoryError) -> Self {
        let status = match &e {
            CategoryError::ValidationError(_) | CategoryError::ParentNotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            CategoryError::NotFound(_) => StatusCode::NOT_FOUND,
            CategoryError::HasChildren { .. } | CategoryError::CyclicParent { .. } => {
                StatusCode::CONFLICT
            }
            CategoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CategoryError::ActorCommunicationError(_) => {
                tracing::error!(error = %e, "Category request failed");
                return Self::internal();
            }
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;

    #[test]
    fn test_category_errors_map_to_status_codes() {
        let cases = [
            (CategoryError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (CategoryError::ParentNotFound(CategoryId(2)), StatusCode::BAD_REQUEST),
            (CategoryError::NotFound("category_1".into()), StatusCode::NOT_FOUND),
            (
                CategoryError::HasChildren {
                    id: CategoryId(1),
                    children: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                CategoryError::CyclicParent {
                    id: CategoryId(1),
                    parent: CategoryId(3),
                },
                StatusCode::CONFLICT,
            ),
            (CategoryError::Unavailable("closed".into()), StatusCode::SERVICE_UNAVAILABLE),
            (
                CategoryError::ActorCommunicationError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(HttpError::from(error).status(), status);
        }
    }
}
