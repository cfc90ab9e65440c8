//! OpenAPI document and Swagger UI.

use super::categories::{self, EnabledChange};
use super::error::ErrorBody;
use super::status::{self, ServiceStatus};
use super::AppState;
use crate::config::SwaggerConfig;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

pub const SWAGGER_JSON_PATH: &str = "/swagger/v1/swagger.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const SWAGGER_UI_NAME: &str = "Magazine Website API V1";

#[derive(OpenApi)]
#[openapi(
    info(title = "Magazine Website API", version = "v1"),
    paths(
        status::service_status,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        categories::list_children,
        categories::enable_category,
        categories::disable_category,
    ),
    components(schemas(
        Category,
        CategoryId,
        CategoryCreate,
        CategoryUpdate,
        EnabledChange,
        ErrorBody,
        ServiceStatus,
    )),
    tags(
        (name = "Categories", description = "Category tree of the magazine"),
        (name = "Status", description = "Service status probe"),
    )
)]
pub struct ApiDoc;

/// The generated document with title and version taken from configuration.
pub fn document(config: &SwaggerConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.title.clone();
    doc.info.version = config.version.clone();
    doc
}

pub fn routes(config: &SwaggerConfig) -> Router<AppState> {
    Router::new().merge(
        SwaggerUi::new(SWAGGER_UI_PATH)
            .url(Url::new(SWAGGER_UI_NAME, SWAGGER_JSON_PATH), document(config)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_uses_configured_info() {
        let doc = document(&SwaggerConfig {
            title: "Staging API".to_string(),
            version: "v2".to_string(),
        });
        assert_eq!(doc.info.title, "Staging API");
        assert_eq!(doc.info.version, "v2");
    }

    #[test]
    fn test_document_lists_category_paths() {
        let doc = document(&SwaggerConfig::default());
        assert!(doc.paths.paths.contains_key("/api/categories"));
        assert!(doc.paths.paths.contains_key("/api/categories/{id}/children"));
        assert!(doc.paths.paths.contains_key("/status"));
    }
}
