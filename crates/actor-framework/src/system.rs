//! # Actor System
//!
//! The [`ActorSystem`] is the process-lifetime owner of every actor task. It hands out
//! addresses ([`ActorRef`], [`Router`], [`ResourceClient`]) and keeps the join handles.
//!
//! ## Lifecycle
//!
//! 1. **Running**: actors can be spawned by unique name.
//! 2. **Terminated**: [`ActorSystem::terminate`] cancels every actor task. Queued
//!    messages are dropped, their reply channels close, and spawning fails with
//!    [`FrameworkError::SystemTerminated`]. [`ActorSystem::when_terminated`] waits
//!    until the tasks have actually finished.
//!
//! Routers are deployed from configuration: [`ActorSystem::router_of`] looks up the
//! router's name in [`ActorSystemSettings::deployment`] for its kind and pool size.

use crate::actor::ResourceActor;
use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::mailbox::{self, ActorRef, MessageHandler};
use crate::router::{ConsistentHashable, DeploymentConfig, Router};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Settings an actor system is created with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSystemSettings {
    /// Router name to deployment.
    #[serde(default)]
    pub deployment: HashMap<String, DeploymentConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    Running,
    Terminated,
}

struct Registry {
    names: HashSet<String>,
    handles: Vec<(String, JoinHandle<()>)>,
}

struct SystemInner {
    name: String,
    settings: ActorSystemSettings,
    token: CancellationToken,
    registry: Mutex<Registry>,
}

/// Cloneable handle on a running actor system.
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<SystemInner>,
}

impl std::fmt::Debug for ActorSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorSystem")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

impl ActorSystem {
    pub fn new(name: impl Into<String>, settings: ActorSystemSettings) -> Self {
        let name = name.into();
        info!(system = %name, routers = settings.deployment.len(), "Actor system created");
        Self {
            inner: Arc::new(SystemInner {
                name,
                settings,
                token: CancellationToken::new(),
                registry: Mutex::new(Registry {
                    names: HashSet::new(),
                    handles: Vec::new(),
                }),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn settings(&self) -> &ActorSystemSettings {
        &self.inner.settings
    }

    pub fn state(&self) -> SystemState {
        if self.inner.token.is_cancelled() {
            SystemState::Terminated
        } else {
            SystemState::Running
        }
    }

    /// Names of every actor spawned so far, routees included.
    pub fn actor_names(&self) -> Vec<String> {
        let registry = self.registry();
        let mut names: Vec<String> = registry.names.iter().cloned().collect();
        names.sort();
        names
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // A poisoned lock only means a panic elsewhere; the registry itself stays consistent.
        self.inner
            .registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reserve_name(&self, name: &str) -> Result<(), FrameworkError> {
        if self.inner.token.is_cancelled() {
            return Err(FrameworkError::SystemTerminated(self.inner.name.clone()));
        }
        let mut registry = self.registry();
        if !registry.names.insert(name.to_string()) {
            return Err(FrameworkError::DuplicateActorName(name.to_string()));
        }
        Ok(())
    }

    fn spawn_task(&self, name: String, task: impl Future<Output = ()> + Send + 'static) {
        let token = self.inner.token.clone();
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => debug!(actor = %task_name, "Cancelled by system termination"),
                _ = task => {}
            }
        });
        self.registry().handles.push((name, handle));
    }

    /// Spawns a single message-handler actor.
    pub fn actor_of<H: MessageHandler>(
        &self,
        name: &str,
        handler: H,
        ctx: H::Context,
        capacity: usize,
    ) -> Result<ActorRef<H::Message>, FrameworkError> {
        if capacity == 0 {
            return Err(FrameworkError::InvalidDeployment {
                name: name.to_string(),
                reason: "mailbox capacity must be at least 1".to_string(),
            });
        }
        self.reserve_name(name)?;
        let (actor_ref, task) = mailbox::spawn_parts(Arc::from(name), handler, ctx, capacity);
        self.spawn_task(name.to_string(), task);
        Ok(actor_ref)
    }

    /// Spawns a router whose kind and pool size come from the deployment named `name`.
    ///
    /// `factory` is called once per routee with the routee's index; every routee gets a
    /// clone of `ctx`. Routees are named `{name}/{index}`.
    pub fn router_of<H, F>(
        &self,
        name: &str,
        ctx: H::Context,
        mut factory: F,
    ) -> Result<Router<H::Message>, FrameworkError>
    where
        H: MessageHandler,
        H::Context: Clone,
        H::Message: ConsistentHashable,
        F: FnMut(usize) -> H,
    {
        let deployment = self
            .inner
            .settings
            .deployment
            .get(name)
            .ok_or_else(|| FrameworkError::MissingDeployment(name.to_string()))?;
        deployment.validate(name)?;
        self.reserve_name(name)?;

        let mut routees = Vec::with_capacity(deployment.nr_of_instances);
        for index in 0..deployment.nr_of_instances {
            let routee_name = format!("{name}/{index}");
            self.reserve_name(&routee_name)?;
            let (actor_ref, task) = mailbox::spawn_parts(
                Arc::from(routee_name.as_str()),
                factory(index),
                ctx.clone(),
                deployment.mailbox_capacity,
            );
            self.spawn_task(routee_name, task);
            routees.push(actor_ref);
        }

        let logic = deployment.router.logic(name, deployment);
        info!(
            system = %self.inner.name,
            router = name,
            kind = ?deployment.router,
            routees = routees.len(),
            "Router deployed"
        );
        Router::new(name, routees, logic)
    }

    /// Spawns a [`ResourceActor`] and returns its client.
    pub fn spawn_resource<T: ActorEntity>(
        &self,
        name: &str,
        ctx: T::Context,
        capacity: usize,
    ) -> Result<ResourceClient<T>, FrameworkError> {
        if capacity == 0 {
            return Err(FrameworkError::InvalidDeployment {
                name: name.to_string(),
                reason: "mailbox capacity must be at least 1".to_string(),
            });
        }
        self.reserve_name(name)?;
        let (actor, client) = ResourceActor::<T>::new(capacity);
        self.spawn_task(name.to_string(), actor.run(ctx));
        Ok(client)
    }

    /// Requests termination of every actor. Calling it again has no effect.
    pub fn terminate(&self) {
        if self.inner.token.is_cancelled() {
            return;
        }
        info!(system = %self.inner.name, "Terminating actor system");
        self.inner.token.cancel();
    }

    /// Resolves once termination was requested and every actor task finished.
    pub async fn when_terminated(&self) {
        self.inner.token.cancelled().await;
        let handles = std::mem::take(&mut self.registry().handles);
        for (name, handle) in handles {
            if let Err(e) = handle.await {
                error!(actor = %name, error = %e, "Actor task failed");
            }
        }
        info!(system = %self.inner.name, "Actor system terminated");
    }

    /// [`terminate`](Self::terminate) followed by [`when_terminated`](Self::when_terminated),
    /// bounded by `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), FrameworkError> {
        self.terminate();
        tokio::time::timeout(timeout, self.when_terminated())
            .await
            .map_err(|_| FrameworkError::TerminationTimeout(timeout))
    }
}
