use super::state::{GatewayLifecycle, GatewayState};
use crate::category_store::STORE_NAME;
use crate::clients::{CategoryCommanderClient, CategoryQueryClient, CategoryStoreClient};
use crate::commander::{CategoryCommander, CommanderContext, COMMANDER_GROUP};
use crate::config::ActorSystemConfig;
use crate::error::GatewayError;
use crate::model::Category;
use crate::query::{CategoryQueryWorker, QUERY_GROUP};
use actor_framework::ActorSystem;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// The actor side of the gateway: one actor system, the category store and the two
/// routed category groups.
///
/// # Architecture
///
/// - **`category-store`**: a resource actor owning every category
/// - **`category-query-group`**: routed pool answering reads
/// - **`category-commander-group`**: routed pool validating and applying writes
///
/// The query pool receives a [`CategoryStoreClient`] as its context, the commander
/// pool a [`CommanderContext`] wrapping the same client. Pool kind and size
/// come from the `actor_system.deployment` configuration.
///
/// # Example
///
/// ```ignore
/// let system = MagazineSystem::start(&config.actor_system)?;
/// let created = system.commander().create(CategoryCreate::new("News")).await?;
/// let report = system.shutdown(Duration::from_secs(5)).await?;
/// ```
pub struct MagazineSystem {
    actor_system: ActorSystem,
    store: CategoryStoreClient,
    query: CategoryQueryClient,
    commander: CategoryCommanderClient,
    lifecycle: GatewayLifecycle,
}

/// One step of the shutdown sequence, in the order it was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownStep {
    PoisonPill(String),
    Terminate,
}

#[derive(Debug, Clone)]
pub struct ShutdownReport {
    pub steps: Vec<ShutdownStep>,
    pub elapsed: Duration,
}

impl MagazineSystem {
    /// Creates the actor system and starts every actor.
    ///
    /// This method:
    /// 1. Creates the actor system with the configured deployments
    /// 2. Spawns the category store
    /// 3. Deploys the query group, then the commander group, each wired to the store
    pub fn start(config: &ActorSystemConfig) -> Result<Self, GatewayError> {
        Self::start_with(config, GatewayLifecycle::new())
    }

    /// Like [`start`](Self::start), reporting state through an existing lifecycle.
    pub fn start_with(
        config: &ActorSystemConfig,
        lifecycle: GatewayLifecycle,
    ) -> Result<Self, GatewayError> {
        let actor_system = ActorSystem::new(config.name.clone(), config.settings());

        let store = CategoryStoreClient::new(actor_system.spawn_resource::<Category>(
            STORE_NAME,
            (),
            config.store_mailbox_capacity,
        )?);

        let query = CategoryQueryClient::new(actor_system.router_of(
            QUERY_GROUP,
            store.clone(),
            CategoryQueryWorker::new,
        )?);
        let commander = CategoryCommanderClient::new(actor_system.router_of(
            COMMANDER_GROUP,
            CommanderContext::new(store.clone()),
            CategoryCommander::new,
        )?);

        info!(system = %config.name, actors = actor_system.actor_names().len(), "Magazine system started");
        Ok(Self {
            actor_system,
            store,
            query,
            commander,
            lifecycle,
        })
    }

    pub fn actor_system(&self) -> &ActorSystem {
        &self.actor_system
    }

    pub fn store(&self) -> &CategoryStoreClient {
        &self.store
    }

    pub fn query(&self) -> &CategoryQueryClient {
        &self.query
    }

    pub fn commander(&self) -> &CategoryCommanderClient {
        &self.commander
    }

    pub fn lifecycle(&self) -> &GatewayLifecycle {
        &self.lifecycle
    }

    pub fn state(&self) -> GatewayState {
        self.lifecycle.current()
    }

    /// Tears the actor system down.
    ///
    /// Sends one poison pill to the query group, then one to the commander group,
    /// then requests termination of the actor system and waits for it, bounded by
    /// `timeout`. The state is `Terminated` afterwards even if waiting timed out: the
    /// actors are already cancelled and process nothing further.
    pub async fn shutdown(self, timeout: Duration) -> Result<ShutdownReport, GatewayError> {
        let started = Instant::now();
        self.lifecycle.begin_stopping();
        let mut steps = Vec::with_capacity(3);

        self.query.router().tell_poison_pill().await?;
        steps.push(ShutdownStep::PoisonPill(QUERY_GROUP.to_string()));

        self.commander.router().tell_poison_pill().await?;
        steps.push(ShutdownStep::PoisonPill(COMMANDER_GROUP.to_string()));

        self.actor_system.terminate();
        steps.push(ShutdownStep::Terminate);

        let waited = tokio::time::timeout(timeout, self.actor_system.when_terminated()).await;
        self.lifecycle.mark_terminated();

        let report = ShutdownReport {
            steps,
            elapsed: started.elapsed(),
        };
        match waited {
            Ok(()) => {
                info!(elapsed = ?report.elapsed, "Magazine system terminated");
                Ok(report)
            }
            Err(_) => {
                warn!(?timeout, "Actor system did not terminate in time");
                Err(actor_framework::FrameworkError::TerminationTimeout(timeout).into())
            }
        }
    }
}
