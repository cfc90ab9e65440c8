//! # Routers
//!
//! A [`Router`] is a single logical address in front of a pool of identical routees.
//! Which routee receives a message is decided by a [`RoutingLogic`], chosen from
//! configuration through [`RouterKind`] rather than fixed in code.
//!
//! | Kind | Selection |
//! |------|-----------|
//! | `round-robin-pool` | next routee in turn |
//! | `random-pool` | uniformly random routee |
//! | `smallest-mailbox-pool` | routee with the fewest queued envelopes |
//! | `consistent-hashing-pool` | routee owning the message key on a hash ring |
//!
//! ```rust
//! use actor_framework::{ActorSystem, ActorSystemSettings, DeploymentConfig, MessageHandler, RouterKind};
//! use async_trait::async_trait;
//! use tokio::sync::oneshot;
//!
//! #[derive(Debug)]
//! struct Ping(oneshot::Sender<usize>);
//! impl actor_framework::ConsistentHashable for Ping {}
//!
//! struct Worker(usize);
//!
//! #[async_trait]
//! impl MessageHandler for Worker {
//!     type Message = Ping;
//!     type Context = ();
//!     async fn handle(&mut self, Ping(reply): Ping, _: &()) {
//!         let _ = reply.send(self.0);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut settings = ActorSystemSettings::default();
//!     settings.deployment.insert(
//!         "workers".into(),
//!         DeploymentConfig { nr_of_instances: 3, ..DeploymentConfig::new(RouterKind::RoundRobinPool) },
//!     );
//!     let system = ActorSystem::new("docs", settings);
//!     let router = system.router_of("workers", (), Worker).unwrap();
//!
//!     let mut seen = Vec::new();
//!     for _ in 0..3 {
//!         let (tx, rx) = oneshot::channel();
//!         router.tell(Ping(tx)).await.unwrap();
//!         seen.push(rx.await.unwrap());
//!     }
//!     assert_eq!(seen, vec![0, 1, 2]);
//!     system.terminate();
//! }
//! ```

use crate::error::FrameworkError;
use crate::mailbox::ActorRef;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routing strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouterKind {
    RoundRobinPool,
    RandomPool,
    SmallestMailboxPool,
    ConsistentHashingPool,
}

/// Deployment of one named router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub router: RouterKind,
    #[serde(default = "default_nr_of_instances")]
    pub nr_of_instances: usize,
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
    /// Points per routee on the consistent-hashing ring.
    #[serde(default = "default_virtual_nodes_factor")]
    pub virtual_nodes_factor: usize,
}

fn default_nr_of_instances() -> usize {
    5
}

fn default_mailbox_capacity() -> usize {
    32
}

fn default_virtual_nodes_factor() -> usize {
    10
}

impl DeploymentConfig {
    pub fn new(router: RouterKind) -> Self {
        Self {
            router,
            nr_of_instances: default_nr_of_instances(),
            mailbox_capacity: default_mailbox_capacity(),
            virtual_nodes_factor: default_virtual_nodes_factor(),
        }
    }

    pub fn validate(&self, name: &str) -> Result<(), FrameworkError> {
        let invalid = |reason: &str| FrameworkError::InvalidDeployment {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if self.nr_of_instances == 0 {
            return Err(invalid("nr_of_instances must be at least 1"));
        }
        if self.mailbox_capacity == 0 {
            return Err(invalid("mailbox_capacity must be at least 1"));
        }
        if self.virtual_nodes_factor == 0 {
            return Err(invalid("virtual_nodes_factor must be at least 1"));
        }
        Ok(())
    }
}

/// Supplies the key consistent-hashing routers place a message by.
///
/// The default returns `None`, which is fine for every other router kind.
pub trait ConsistentHashable {
    fn consistent_hash_key(&self) -> Option<String> {
        None
    }
}

/// Picks the routee for a message.
pub trait RoutingLogic<M>: Send + Sync {
    /// Returns an index into `routees`. `routees` is never empty.
    fn select(&self, message: &M, routees: &[ActorRef<M>]) -> Result<usize, String>;
}

#[derive(Debug, Default)]
pub struct RoundRobin {
    next: AtomicUsize,
}

impl<M> RoutingLogic<M> for RoundRobin {
    fn select(&self, _message: &M, routees: &[ActorRef<M>]) -> Result<usize, String> {
        Ok(self.next.fetch_add(1, Ordering::Relaxed) % routees.len())
    }
}

#[derive(Debug, Default)]
pub struct Random;

impl<M> RoutingLogic<M> for Random {
    fn select(&self, _message: &M, routees: &[ActorRef<M>]) -> Result<usize, String> {
        Ok(rand::thread_rng().gen_range(0..routees.len()))
    }
}

#[derive(Debug, Default)]
pub struct SmallestMailbox;

impl<M> RoutingLogic<M> for SmallestMailbox {
    fn select(&self, _message: &M, routees: &[ActorRef<M>]) -> Result<usize, String> {
        routees
            .iter()
            .enumerate()
            .filter(|(_, routee)| !routee.is_closed())
            .min_by_key(|(_, routee)| routee.mailbox_len())
            .map(|(index, _)| index)
            .ok_or_else(|| "every routee is closed".to_string())
    }
}

/// Hash ring with `virtual_nodes_factor` points per routee.
#[derive(Debug)]
pub struct ConsistentHashing {
    ring: BTreeMap<u64, usize>,
}

impl ConsistentHashing {
    pub fn new(router_name: &str, routee_count: usize, virtual_nodes_factor: usize) -> Self {
        let mut ring = BTreeMap::new();
        for routee in 0..routee_count {
            for vnode in 0..virtual_nodes_factor {
                ring.insert(hash_of(&(router_name, routee, vnode)), routee);
            }
        }
        Self { ring }
    }

    fn owner(&self, key: &str) -> Option<usize> {
        let point = hash_of(&key);
        self.ring
            .range(point..)
            .next()
            .or_else(|| self.ring.iter().next())
            .map(|(_, routee)| *routee)
    }
}

impl<M: ConsistentHashable> RoutingLogic<M> for ConsistentHashing {
    fn select(&self, message: &M, _routees: &[ActorRef<M>]) -> Result<usize, String> {
        let key = message
            .consistent_hash_key()
            .ok_or_else(|| "message has no consistent hash key".to_string())?;
        self.owner(&key)
            .ok_or_else(|| "hash ring is empty".to_string())
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl RouterKind {
    /// Builds the routing logic this kind stands for.
    pub fn logic<M>(
        self,
        router_name: &str,
        deployment: &DeploymentConfig,
    ) -> Arc<dyn RoutingLogic<M>>
    where
        M: ConsistentHashable + 'static,
    {
        match self {
            RouterKind::RoundRobinPool => Arc::new(RoundRobin::default()),
            RouterKind::RandomPool => Arc::new(Random),
            RouterKind::SmallestMailboxPool => Arc::new(SmallestMailbox),
            RouterKind::ConsistentHashingPool => Arc::new(ConsistentHashing::new(
                router_name,
                deployment.nr_of_instances,
                deployment.virtual_nodes_factor,
            )),
        }
    }
}

/// Logical address of a routee pool.
///
/// Clones share the routees and the stopped flag, so a poison pill told through one
/// clone stops the router for every holder.
pub struct Router<M> {
    name: Arc<str>,
    routees: Arc<[ActorRef<M>]>,
    logic: Arc<dyn RoutingLogic<M>>,
    stopped: Arc<AtomicBool>,
}

impl<M> Clone for Router<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            routees: self.routees.clone(),
            logic: self.logic.clone(),
            stopped: self.stopped.clone(),
        }
    }
}

impl<M: Send + 'static> Router<M> {
    pub fn new(
        name: impl Into<Arc<str>>,
        routees: Vec<ActorRef<M>>,
        logic: Arc<dyn RoutingLogic<M>>,
    ) -> Result<Self, FrameworkError> {
        let name = name.into();
        if routees.is_empty() {
            return Err(FrameworkError::InvalidDeployment {
                name: name.to_string(),
                reason: "router has no routees".to_string(),
            });
        }
        Ok(Self {
            name,
            routees: routees.into(),
            logic,
            stopped: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routees(&self) -> &[ActorRef<M>] {
        &self.routees
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Routes one message to the routee chosen by the routing logic.
    pub async fn tell(&self, message: M) -> Result<(), FrameworkError> {
        if self.is_stopped() {
            return Err(FrameworkError::ActorClosed);
        }
        let index = self
            .logic
            .select(&message, &self.routees)
            .map_err(|reason| {
                warn!(router = %self.name, %reason, "Unroutable message");
                FrameworkError::Unroutable {
                    router: self.name.to_string(),
                    reason,
                }
            })?;
        let routee = &self.routees[index];
        debug!(router = %self.name, routee = routee.name(), "Routed");
        routee.tell(message).await
    }

    /// Stops the router: one poison pill goes to each routee, behind their queued
    /// messages. Only the first call sends pills; later calls return `Ok(())`.
    pub async fn tell_poison_pill(&self) -> Result<(), FrameworkError> {
        if self.stopped.swap(true, Ordering::AcqRel) {
            debug!(router = %self.name, "Router already stopped");
            return Ok(());
        }
        info!(router = %self.name, routees = self.routees.len(), "Stopping router");
        for routee in self.routees.iter() {
            // A routee that already exited needs no pill.
            if let Err(e) = routee.tell_poison_pill().await {
                debug!(router = %self.name, routee = routee.name(), error = %e, "Routee already closed");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::Envelope;
    use tokio::sync::mpsc;

    #[derive(Debug)]
    struct Keyed(Option<String>);

    impl ConsistentHashable for Keyed {
        fn consistent_hash_key(&self) -> Option<String> {
            self.0.clone()
        }
    }

    fn refs(count: usize, capacity: usize) -> (Vec<ActorRef<Keyed>>, Vec<mpsc::Receiver<Envelope<Keyed>>>) {
        (0..count)
            .map(|i| {
                let (tx, rx) = mpsc::channel(capacity);
                (ActorRef::new(format!("routee-{i}"), tx), rx)
            })
            .unzip()
    }

    #[test]
    fn test_round_robin_cycles_through_routees() {
        let (routees, _rx) = refs(3, 4);
        let logic = RoundRobin::default();
        let picked: Vec<usize> = (0..6)
            .map(|_| logic.select(&Keyed(None), &routees).unwrap())
            .collect();
        assert_eq!(picked, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_random_stays_in_bounds() {
        let (routees, _rx) = refs(4, 4);
        for _ in 0..100 {
            let index = RoutingLogic::<Keyed>::select(&Random, &Keyed(None), &routees).unwrap();
            assert!(index < 4);
        }
    }

    #[tokio::test]
    async fn test_smallest_mailbox_prefers_idle_routee() {
        let (routees, _rx) = refs(3, 8);
        routees[0].tell(Keyed(None)).await.unwrap();
        routees[0].tell(Keyed(None)).await.unwrap();
        routees[1].tell(Keyed(None)).await.unwrap();

        let index = SmallestMailbox.select(&Keyed(None), &routees).unwrap();
        assert_eq!(index, 2);
    }

    #[tokio::test]
    async fn test_smallest_mailbox_skips_closed_routees() {
        let (routees, mut receivers) = refs(2, 8);
        routees[1].tell(Keyed(None)).await.unwrap();
        receivers[0].close();

        let index = SmallestMailbox.select(&Keyed(None), &routees).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_consistent_hashing_is_stable_per_key() {
        let (routees, _rx) = refs(5, 4);
        let logic = ConsistentHashing::new("ring", 5, 10);
        for key in ["alpha", "beta", "gamma", "delta"] {
            let first = logic.select(&Keyed(Some(key.into())), &routees).unwrap();
            for _ in 0..10 {
                assert_eq!(logic.select(&Keyed(Some(key.into())), &routees).unwrap(), first);
            }
        }
    }

    #[test]
    fn test_consistent_hashing_spreads_keys() {
        let (routees, _rx) = refs(4, 4);
        let logic = ConsistentHashing::new("ring", 4, 20);
        let mut used = std::collections::HashSet::new();
        for i in 0..200 {
            used.insert(logic.select(&Keyed(Some(format!("key-{i}"))), &routees).unwrap());
        }
        assert!(used.len() > 1);
    }

    #[test]
    fn test_consistent_hashing_requires_key() {
        let (routees, _rx) = refs(2, 4);
        let logic = ConsistentHashing::new("ring", 2, 10);
        assert!(logic.select(&Keyed(None), &routees).is_err());
    }

    #[test]
    fn test_deployment_validation() {
        let mut deployment = DeploymentConfig::new(RouterKind::RandomPool);
        assert!(deployment.validate("pool").is_ok());

        deployment.mailbox_capacity = 0;
        assert!(matches!(
            deployment.validate("pool"),
            Err(FrameworkError::InvalidDeployment { .. })
        ));
    }

    #[test]
    fn test_router_kind_names() {
        let kind: RouterKind = serde_json::from_str("\"smallest-mailbox-pool\"").unwrap();
        assert_eq!(kind, RouterKind::SmallestMailboxPool);

        let deployment: DeploymentConfig =
            serde_json::from_str(r#"{"router": "consistent-hashing-pool"}"#).unwrap();
        assert_eq!(deployment.nr_of_instances, 5);
        assert_eq!(deployment.mailbox_capacity, 32);
    }

    #[tokio::test]
    async fn test_router_rejects_messages_after_poison_pill() {
        let (routees, mut receivers) = refs(2, 4);
        let router = Router::new("pool", routees, Arc::new(RoundRobin::default())).unwrap();

        router.tell_poison_pill().await.unwrap();
        router.tell_poison_pill().await.unwrap();

        for receiver in receivers.iter_mut() {
            assert!(matches!(receiver.recv().await, Some(Envelope::PoisonPill)));
            assert!(receiver.try_recv().is_err(), "exactly one pill per routee");
        }
        assert!(matches!(
            router.tell(Keyed(None)).await,
            Err(FrameworkError::ActorClosed)
        ));
    }

    #[test]
    fn test_router_requires_routees() {
        let result = Router::<Keyed>::new("empty", Vec::new(), Arc::new(RoundRobin::default()));
        assert!(result.is_err());
    }
}
