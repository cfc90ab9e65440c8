//! # Category Query Client
//!
//! Typed API over the routed `category-query-group`.
use crate::category_store::CategoryError;
use crate::commander::Reply;
use crate::model::{Category, CategoryId};
use crate::query::{CategoryFilter, CategoryQuery};
use actor_framework::Router;
use tokio::sync::oneshot;
use tracing::instrument;

/// Client for the query group. Cloning shares the router.
#[derive(Clone)]
pub struct CategoryQueryClient {
    router: Router<CategoryQuery>,
}

impl CategoryQueryClient {
    pub fn new(router: Router<CategoryQuery>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router<CategoryQuery> {
        &self.router
    }

    async fn ask<R>(&self, build: impl FnOnce(Reply<R>) -> CategoryQuery) -> Result<R, CategoryError> {
        let (respond_to, response) = oneshot::channel();
        self.router.tell(build(respond_to)).await?;
        response.await.map_err(|_| {
            CategoryError::Unavailable(format!("{} dropped the reply", self.router.name()))
        })?
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        self.ask(|respond_to| CategoryQuery::Get { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: CategoryFilter) -> Result<Vec<Category>, CategoryError> {
        self.ask(|respond_to| CategoryQuery::List { filter, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn children(&self, id: CategoryId) -> Result<Vec<Category>, CategoryError> {
        self.ask(|respond_to| CategoryQuery::Children { id, respond_to })
            .await
    }
}
