//! # HTTP surface
//!
//! Builds the axum router of the gateway:
//!
//! - `/status`: service status probe
//! - `/api/categories`: category REST resource
//! - `/graphql`: GraphQL endpoint with the `MagazineQuery` root
//! - `/swagger/v1/swagger.json` and the Swagger UI under `/swagger-ui`
//! - everything else: the default route `{controller=Home}/{action=Index}/{id?}`

pub mod categories;
pub mod error;
pub mod extract;
pub mod graphql;
pub mod home;
pub mod json;
pub mod openapi;
pub mod status;

use crate::clients::{CategoryCommanderClient, CategoryQueryClient};
use crate::config::GatewayConfig;
use crate::lifecycle::{GatewayLifecycle, MagazineSystem};
use axum::Router;
use graphql::MagazineSchema;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Service identity reported by `/status` and the home page.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub title: String,
    pub version: String,
    pub environment: String,
}

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub query: CategoryQueryClient,
    pub commander: CategoryCommanderClient,
    pub lifecycle: GatewayLifecycle,
    pub schema: MagazineSchema,
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(system: &MagazineSystem, config: &GatewayConfig) -> Self {
        Self {
            query: system.query().clone(),
            commander: system.commander().clone(),
            lifecycle: system.lifecycle().clone(),
            schema: graphql::schema(system.query().clone()),
            info: Arc::new(ServiceInfo {
                title: config.swagger.title.clone(),
                version: config.swagger.version.clone(),
                environment: config.environment.clone(),
            }),
        }
    }
}

pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let mut router = Router::new()
        .merge(status::routes())
        .merge(categories::routes())
        .merge(graphql::routes())
        .merge(openapi::routes(&config.swagger))
        .fallback(home::conventional_route);

    if config.json.indented {
        router = router.layer(axum::middleware::from_fn(json::indent_json));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
