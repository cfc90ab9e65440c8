//! Category REST resource. Reads go to the query group, writes to the commander group.

use super::error::{ErrorBody, HttpError, HttpResult};
use super::extract::{CategoryPath, JsonBody, QueryParams};
use super::AppState;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use crate::query::CategoryFilter;
use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/api/categories/:id/children", get(list_children))
        .route("/api/categories/:id/enable", post(enable_category))
        .route("/api/categories/:id/disable", post(disable_category))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Only direct children of this category.
    pub parent_id: Option<u32>,
    /// Skip disabled categories.
    pub enabled_only: Option<bool>,
}

/// Result of enabling or disabling a category.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnabledChange {
    pub id: CategoryId,
    pub enabled: bool,
    /// `false` if the category already was in the requested state.
    pub changed: bool,
}

#[utoipa::path(
    tag = "Categories",
    get,
    path = "/api/categories",
    params(ListParams),
    responses(
        (status = 200, body = [Category])
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> HttpResult<Json<Vec<Category>>> {
    let filter = CategoryFilter {
        parent_id: params.parent_id.map(CategoryId),
        enabled_only: params.enabled_only.unwrap_or(false),
    };
    Ok(Json(state.query.list(filter).await?))
}

#[utoipa::path(
    tag = "Categories",
    post,
    path = "/api/categories",
    request_body = CategoryCreate,
    responses(
        (status = 201, body = Category),
        (status = 400, body = ErrorBody)
    )
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CategoryCreate>,
) -> HttpResult<impl IntoResponse> {
    let category = state.commander.create(params).await?;
    let location = format!("/api/categories/{}", category.id.0);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(category)))
}

#[utoipa::path(
    tag = "Categories",
    get,
    path = "/api/categories/{id}",
    params(("id" = u32, Path, description = "Category id")),
    responses(
        (status = 200, body = Category),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    CategoryPath(id): CategoryPath,
) -> HttpResult<Json<Category>> {
    state
        .query
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::not_found(format!("Category not found: {id}")))
}

#[utoipa::path(
    tag = "Categories",
    put,
    path = "/api/categories/{id}",
    params(("id" = u32, Path, description = "Category id")),
    request_body = CategoryUpdate,
    responses(
        (status = 200, body = Category),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    )
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    CategoryPath(id): CategoryPath,
    JsonBody(update): JsonBody<CategoryUpdate>,
) -> HttpResult<Json<Category>> {
    Ok(Json(state.commander.update(id, update).await?))
}

#[utoipa::path(
    tag = "Categories",
    delete,
    path = "/api/categories/{id}",
    params(("id" = u32, Path, description = "Category id")),
    responses(
        (status = 204),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    CategoryPath(id): CategoryPath,
) -> HttpResult<StatusCode> {
    state.commander.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    tag = "Categories",
    get,
    path = "/api/categories/{id}/children",
    params(("id" = u32, Path, description = "Category id")),
    responses(
        (status = 200, body = [Category]),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn list_children(
    State(state): State<AppState>,
    CategoryPath(id): CategoryPath,
) -> HttpResult<Json<Vec<Category>>> {
    Ok(Json(state.query.children(id).await?))
}

#[utoipa::path(
    tag = "Categories",
    post,
    path = "/api/categories/{id}/enable",
    params(("id" = u32, Path, description = "Category id")),
    responses(
        (status = 200, body = EnabledChange),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn enable_category(
    State(state): State<AppState>,
    CategoryPath(id): CategoryPath,
) -> HttpResult<Json<EnabledChange>> {
    set_enabled(&state, id, true).await
}

#[utoipa::path(
    tag = "Categories",
    post,
    path = "/api/categories/{id}/disable",
    params(("id" = u32, Path, description = "Category id")),
    responses(
        (status = 200, body = EnabledChange),
        (status = 404, body = ErrorBody)
    )
)]
pub(crate) async fn disable_category(
    State(state): State<AppState>,
    CategoryPath(id): CategoryPath,
) -> HttpResult<Json<EnabledChange>> {
    set_enabled(&state, id, false).await
}

async fn set_enabled(
    state: &AppState,
    id: CategoryId,
    enabled: bool,
) -> HttpResult<Json<EnabledChange>> {
    let changed = state.commander.set_enabled(id, enabled).await?;
    Ok(Json(EnabledChange {
        id,
        enabled,
        changed,
    }))
}
