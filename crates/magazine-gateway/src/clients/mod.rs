//! Type-safe wrappers that hide the message passing behind async methods.
//!
//! - [`CategoryStoreClient`] talks to the `category-store` resource actor.
//! - [`CategoryCommanderClient`] and [`CategoryQueryClient`] talk to the routed groups.

pub mod commander_client;
pub mod query_client;
pub mod store_client;

pub use commander_client::CategoryCommanderClient;
pub use query_client::CategoryQueryClient;
pub use store_client::CategoryStoreClient;
