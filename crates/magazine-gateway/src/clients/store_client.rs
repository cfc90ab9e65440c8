//! # Category Store Client
//!
//! Provides a high‑level API for interacting with the `category-store` actor.
//! It wraps a `ResourceClient<Category>` and exposes domain‑specific methods.
use crate::category_store::{CategoryAction, CategoryError};
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Category store actor.
#[derive(Clone)]
pub struct CategoryStoreClient {
    inner: ResourceClient<Category>,
}

impl CategoryStoreClient {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Category> for CategoryStoreClient {
    type Error = CategoryError;

    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CategoryError::from(e)
    }
}

impl CategoryStoreClient {
    #[instrument(skip(self))]
    pub async fn create_category(&self, params: CategoryCreate) -> Result<CategoryId, CategoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Enables or disables a category.
    ///
    /// Returns `true` if the state changed.
    #[instrument(skip(self))]
    pub async fn set_enabled(&self, id: CategoryId, enabled: bool) -> Result<bool, CategoryError> {
        debug!("Setting enabled={} for category {}", enabled, id);
        self.inner
            .perform_action(id, CategoryAction::SetEnabled(enabled))
            .await
            .map_err(Self::map_error)
    }

    /// Like [`get`](ActorClient::get), but an unknown id is an error.
    pub async fn require(&self, id: CategoryId) -> Result<Category, CategoryError> {
        self.get(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_set_enabled_sends_action() {
        let (client, mut receiver) = create_mock_client::<Category>(10);
        let store = CategoryStoreClient::new(client);

        let task = tokio::spawn(async move { store.set_enabled(CategoryId(3), false).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CategoryId(3));
        assert_eq!(action, CategoryAction::SetEnabled(false));
        responder.send(Ok(true)).unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_require_maps_missing_to_not_found() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_get(CategoryId(9)).return_ok(None);
        let store = CategoryStoreClient::new(mock.client());

        let result = store.require(CategoryId(9)).await;
        assert_eq!(result, Err(CategoryError::NotFound("category_9".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_errors_come_back_typed() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                CategoryError::ValidationError("name must not be empty".into()),
            )));
        let store = CategoryStoreClient::new(mock.client());

        let result = store.create_category(CategoryCreate::new("")).await;
        assert!(matches!(result, Err(CategoryError::ValidationError(_))));
    }
}
