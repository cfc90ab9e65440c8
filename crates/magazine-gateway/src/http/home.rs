//! The conventional default route `{controller=Home}/{action=Index}/{id?}`.
//!
//! It is mounted as the router's fallback, so it only sees paths no other route
//! claimed. Segments match case-insensitively; missing segments take the defaults.

use super::error::HttpError;
use super::graphql::GRAPHQL_PATH;
use super::openapi::SWAGGER_JSON_PATH;
use super::AppState;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

const DEFAULT_CONTROLLER: &str = "Home";
const DEFAULT_ACTION: &str = "Index";

/// A path resolved against the default route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub controller: String,
    pub action: String,
    pub id: Option<String>,
}

/// Resolves `path` against `{controller=Home}/{action=Index}/{id?}`.
///
/// Returns `None` for paths with more than three segments.
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 3 {
        return None;
    }
    Some(RouteMatch {
        controller: segments
            .first()
            .map_or(DEFAULT_CONTROLLER, |s| *s)
            .to_string(),
        action: segments.get(1).map_or(DEFAULT_ACTION, |s| *s).to_string(),
        id: segments.get(2).map(|s| s.to_string()),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeIndex {
    pub controller: &'static str,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub version: String,
    pub environment: String,
    pub swagger: &'static str,
    pub graphql: &'static str,
}

pub(crate) async fn conventional_route(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(route) = resolve(uri.path()) else {
        return HttpError::not_found(format!("No route matches {}", uri.path())).into_response();
    };
    if route.controller.eq_ignore_ascii_case("home") && route.action.eq_ignore_ascii_case("index")
    {
        return index(&state, route.id).into_response();
    }
    HttpError::not_found(format!(
        "No action {}/{} for {}",
        route.controller,
        route.action,
        uri.path()
    ))
    .into_response()
}

fn index(state: &AppState, id: Option<String>) -> Json<HomeIndex> {
    Json(HomeIndex {
        controller: DEFAULT_CONTROLLER,
        action: DEFAULT_ACTION,
        id,
        title: state.info.title.clone(),
        version: state.info.version.clone(),
        environment: state.info.environment.clone(),
        swagger: SWAGGER_JSON_PATH,
        graphql: GRAPHQL_PATH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_segments() {
        let root = resolve("/").unwrap();
        assert_eq!(root.controller, "Home");
        assert_eq!(root.action, "Index");
        assert_eq!(root.id, None);

        let controller_only = resolve("/home").unwrap();
        assert_eq!(controller_only.action, "Index");

        let full = resolve("/Home/Index/42").unwrap();
        assert_eq!(full.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_too_many_segments() {
        assert_eq!(resolve("/home/index/1/extra"), None);
    }
}
