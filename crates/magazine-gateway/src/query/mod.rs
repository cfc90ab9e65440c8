//! # Category Query Group
//!
//! Routees of `category-query-group` answer read-only [`CategoryQuery`]s from the
//! category store. Every list result is ordered by id.

use crate::category_store::CategoryError;
use crate::clients::CategoryStoreClient;
use crate::commander::Reply;
use crate::model::{Category, CategoryId};
use actor_framework::{ActorClient, ConsistentHashable, MessageHandler};
use async_trait::async_trait;
use tracing::debug;

/// Name of the routed query group.
pub const QUERY_GROUP: &str = "category-query-group";

/// Filter for [`CategoryQuery::List`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Only direct children of this category.
    pub parent_id: Option<CategoryId>,
    pub enabled_only: bool,
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        if self.enabled_only && !category.enabled {
            return false;
        }
        match self.parent_id {
            Some(parent_id) => category.parent_id == Some(parent_id),
            None => true,
        }
    }
}

/// Read-side protocol of the category domain.
#[derive(Debug)]
pub enum CategoryQuery {
    Get {
        id: CategoryId,
        respond_to: Reply<Option<Category>>,
    },
    List {
        filter: CategoryFilter,
        respond_to: Reply<Vec<Category>>,
    },
    Children {
        id: CategoryId,
        respond_to: Reply<Vec<Category>>,
    },
}

impl ConsistentHashable for CategoryQuery {
    fn consistent_hash_key(&self) -> Option<String> {
        match self {
            CategoryQuery::Get { id, .. } | CategoryQuery::Children { id, .. } => {
                Some(id.to_string())
            }
            CategoryQuery::List { filter, .. } => Some(
                filter
                    .parent_id
                    .map_or_else(|| "categories".to_string(), |id| id.to_string()),
            ),
        }
    }
}

/// One routee of the query group.
pub struct CategoryQueryWorker {
    index: usize,
}

impl CategoryQueryWorker {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub async fn list(
        store: &CategoryStoreClient,
        filter: CategoryFilter,
    ) -> Result<Vec<Category>, CategoryError> {
        let mut categories: Vec<Category> = store
            .list()
            .await?
            .into_iter()
            .filter(|category| filter.matches(category))
            .collect();
        categories.sort_by_key(|category| category.id);
        Ok(categories)
    }

    /// Direct children of `id`. Unknown ids are an error, not an empty list.
    pub async fn children(
        store: &CategoryStoreClient,
        id: CategoryId,
    ) -> Result<Vec<Category>, CategoryError> {
        store.require(id).await?;
        Self::list(
            store,
            CategoryFilter {
                parent_id: Some(id),
                enabled_only: false,
            },
        )
        .await
    }
}

#[async_trait]
impl MessageHandler for CategoryQueryWorker {
    type Message = CategoryQuery;
    type Context = CategoryStoreClient;

    async fn handle(&mut self, query: CategoryQuery, store: &CategoryStoreClient) {
        // A dropped reply only means the caller gave up.
        match query {
            CategoryQuery::Get { id, respond_to } => {
                let _ = respond_to.send(store.get(id).await);
            }
            CategoryQuery::List { filter, respond_to } => {
                let _ = respond_to.send(Self::list(store, filter).await);
            }
            CategoryQuery::Children { id, respond_to } => {
                let _ = respond_to.send(Self::children(store, id).await);
            }
        }
        debug!(routee = self.index, "Query answered");
    }

    async fn post_stop(&mut self, _store: &CategoryStoreClient) {
        debug!(routee = self.index, "Query worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    fn sample() -> Vec<Category> {
        let mut disabled = Category::new(CategoryId(2), "Archive");
        disabled.enabled = false;
        vec![
            Category::new(CategoryId(3), "Football").with_parent(Some(CategoryId(1))),
            Category::new(CategoryId(1), "Sports"),
            disabled,
        ]
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_by_id() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_list().return_ok(sample());
        mock.expect_list().return_ok(sample());
        let store = CategoryStoreClient::new(mock.client());

        let all = CategoryQueryWorker::list(&store, CategoryFilter::default())
            .await
            .unwrap();
        let ids: Vec<u32> = all.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let enabled = CategoryQueryWorker::list(
            &store,
            CategoryFilter {
                parent_id: None,
                enabled_only: true,
            },
        )
        .await
        .unwrap();
        let ids: Vec<u32> = enabled.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_children_of_unknown_category() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_get(CategoryId(42)).return_ok(None);
        let store = CategoryStoreClient::new(mock.client());

        let result = CategoryQueryWorker::children(&store, CategoryId(42)).await;
        assert_eq!(result, Err(CategoryError::NotFound("category_42".into())));
    }
}
