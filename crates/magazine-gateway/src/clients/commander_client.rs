//! # Category Commander Client
//!
//! Typed API over the routed `category-commander-group`.
use crate::category_store::CategoryError;
use crate::commander::{CategoryCommand, Reply};
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use actor_framework::Router;
use tokio::sync::oneshot;
use tracing::{debug, instrument};

/// Client for the commander group. Cloning shares the router.
#[derive(Clone)]
pub struct CategoryCommanderClient {
    router: Router<CategoryCommand>,
}

impl CategoryCommanderClient {
    pub fn new(router: Router<CategoryCommand>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router<CategoryCommand> {
        &self.router
    }

    async fn ask<R>(
        &self,
        build: impl FnOnce(Reply<R>) -> CategoryCommand,
    ) -> Result<R, CategoryError> {
        let (respond_to, response) = oneshot::channel();
        self.router.tell(build(respond_to)).await?;
        response.await.map_err(|_| {
            CategoryError::Unavailable(format!("{} dropped the reply", self.router.name()))
        })?
    }

    #[instrument(skip(self))]
    pub async fn create(&self, params: CategoryCreate) -> Result<Category, CategoryError> {
        debug!("Sending command");
        self.ask(|respond_to| CategoryCommand::Create { params, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryError> {
        debug!("Sending command");
        self.ask(|respond_to| CategoryCommand::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), CategoryError> {
        debug!("Sending command");
        self.ask(|respond_to| CategoryCommand::Delete { id, respond_to })
            .await
    }

    /// Returns `true` if the enabled state changed.
    #[instrument(skip(self))]
    pub async fn set_enabled(&self, id: CategoryId, enabled: bool) -> Result<bool, CategoryError> {
        debug!("Sending command");
        self.ask(|respond_to| CategoryCommand::SetEnabled {
            id,
            enabled,
            respond_to,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_ref, expect_message};
    use actor_framework::{ActorRef, DeploymentConfig, RouterKind};

    fn client_over(routee: ActorRef<CategoryCommand>, kind: RouterKind) -> CategoryCommanderClient {
        let logic = kind.logic("commander", &DeploymentConfig::new(kind));
        CategoryCommanderClient::new(Router::new("commander", vec![routee], logic).unwrap())
    }

    #[tokio::test]
    async fn test_create_routes_command_and_returns_reply() {
        let (routee, mut mailbox) = create_mock_ref::<CategoryCommand>("commander/0", 4);
        let client = client_over(routee, RouterKind::RoundRobinPool);

        let task = tokio::spawn(async move { client.create(CategoryCreate::new("Science")).await });

        match expect_message(&mut mailbox).await {
            Some(CategoryCommand::Create { params, respond_to }) => {
                assert_eq!(params.name, "Science");
                respond_to
                    .send(Ok(Category::new(CategoryId(1), "Science")))
                    .unwrap();
            }
            other => panic!("Expected Create command, got {other:?}"),
        }

        let category = task.await.unwrap().unwrap();
        assert_eq!(category.id, CategoryId(1));
    }

    #[tokio::test]
    async fn test_stopped_router_is_unavailable() {
        let (routee, _mailbox) = create_mock_ref::<CategoryCommand>("commander/0", 4);
        let client = client_over(routee, RouterKind::RandomPool);
        client.router().tell_poison_pill().await.unwrap();

        let result = client.delete(CategoryId(1)).await;
        assert!(matches!(result, Err(CategoryError::Unavailable(_))));
    }
}
