//! # Category Store
//!
//! The `category-store` resource actor owns every [`Category`]. Both routed groups
//! read and write through it, so the store is the single, sequential owner of state.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Category`]
//! - [`error`] - [`CategoryError`], shared by the whole category domain
//! - [`actions`] - [`CategoryAction`] for enabling and disabling
//!
//! ## Usage
//!
//! ```rust
//! use actor_framework::ActorClient;
//! use magazine_gateway::category_store;
//! use magazine_gateway::clients::CategoryStoreClient;
//! use magazine_gateway::model::CategoryCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = category_store::new();
//!     let store = CategoryStoreClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = store.create_category(CategoryCreate::new("Science")).await?;
//!     assert!(store.set_enabled(id, false).await?);
//!     assert_eq!(store.list().await?.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Category;
use actor_framework::{ResourceActor, ResourceClient};

/// Name the store is registered under in the actor system.
pub const STORE_NAME: &str = "category-store";

/// Creates a new Category store actor and its client.
pub fn new() -> (ResourceActor<Category>, ResourceClient<Category>) {
    ResourceActor::new(64)
}
