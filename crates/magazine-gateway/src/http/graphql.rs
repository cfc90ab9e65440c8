//! GraphQL endpoint. `MagazineQuery` is the query root; categories are read through
//! the query group, never straight from the store.

use super::AppState;
use crate::clients::CategoryQueryClient;
use crate::model::{Category, CategoryId};
use crate::query::CategoryFilter;
use async_graphql::http::GraphiQLSource;
use async_graphql::{
    ComplexObject, Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject,
};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};

pub const GRAPHQL_PATH: &str = "/graphql";

pub type MagazineSchema = Schema<MagazineQuery, EmptyMutation, EmptySubscription>;

pub fn schema(query: CategoryQueryClient) -> MagazineSchema {
    Schema::build(MagazineQuery, EmptyMutation, EmptySubscription)
        .data(query)
        .finish()
}

pub fn routes() -> Router<AppState> {
    Router::new().route(GRAPHQL_PATH, get(graphiql).post(execute))
}

async fn execute(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request).await)
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Category", complex)]
pub struct CategoryType {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<u32>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryType {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.0,
            name: category.name,
            description: category.description,
            parent_id: category.parent_id.map(|id| id.0),
            enabled: category.enabled,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[ComplexObject]
impl CategoryType {
    async fn children(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<CategoryType>> {
        let query = ctx.data::<CategoryQueryClient>()?;
        let children = query.children(CategoryId(self.id)).await?;
        Ok(children.into_iter().map(CategoryType::from).collect())
    }
}

pub struct MagazineQuery;

#[Object]
impl MagazineQuery {
    /// Categories ordered by id; `parentId` restricts to direct children.
    async fn categories(
        &self,
        ctx: &Context<'_>,
        parent_id: Option<u32>,
        #[graphql(default)] enabled_only: bool,
    ) -> async_graphql::Result<Vec<CategoryType>> {
        let query = ctx.data::<CategoryQueryClient>()?;
        let filter = CategoryFilter {
            parent_id: parent_id.map(CategoryId),
            enabled_only,
        };
        let categories = query.list(filter).await?;
        Ok(categories.into_iter().map(CategoryType::from).collect())
    }

    async fn category(
        &self,
        ctx: &Context<'_>,
        id: u32,
    ) -> async_graphql::Result<Option<CategoryType>> {
        let query = ctx.data::<CategoryQueryClient>()?;
        Ok(query.get(CategoryId(id)).await?.map(CategoryType::from))
    }
}
