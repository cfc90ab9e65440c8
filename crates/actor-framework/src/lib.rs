//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent actor systems on Tokio. Two kinds of actor
//! share one runtime:
//!
//! - **Resource actors** ([`ResourceActor`]) own a store of entities and answer a uniform
//!   CRUD + Action protocol. You write the entity once ([`ActorEntity`]) and the
//!   framework handles message passing, error mapping and state.
//! - **Message-handler actors** ([`MessageHandler`]) speak a protocol of their own and
//!   usually sit behind a [`Router`], a single logical address over a pool of routees
//!   whose routing strategy comes from configuration.
//!
//! ## Architecture Overview
//!
//! 1. **Entity / Behaviour Layer** ([`ActorEntity`], [`MessageHandler`]) - business logic
//! 2. **Runtime Layer** ([`ResourceActor`], [`Router`], [`ActorSystem`]) - message
//!    processing, routing and lifetime
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorRef`]) - type-safe communication
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when an actor starts, not when it is constructed. A command
//! handler pool receives the store's client as its context:
//!
//! ```rust,ignore
//! let store = system.spawn_resource::<Category>("category-store", (), 64)?;
//! let query = system.router_of("category-query-group", store.clone(), CategoryQueryWorker::new)?;
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task, owned by the [`ActorSystem`]
//! - Messages are processed **sequentially** within an actor (no locks needed)
//! - Routees of a pool run in **parallel**
//! - A poison pill stops an actor after the messages queued ahead of it
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, which serves the `ResourceClient<T>` API
//! from scripted expectations, and `create_mock_ref` for inspecting a handler's mailbox.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod mailbox;
pub mod message;
pub mod mock;
pub mod router;
pub mod system;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use mailbox::{ActorRef, Envelope, MessageHandler};
pub use message::{ResourceRequest, Response};
pub use router::{ConsistentHashable, DeploymentConfig, Router, RouterKind, RoutingLogic};
pub use system::{ActorSystem, ActorSystemSettings, SystemState};
