//! # Magazine Gateway Library
//!
//! API gateway of the magazine website: an HTTP host on top of an actor system.
//! Exposed as a library so integration tests can drive the actors and the router
//! without binding a port.

pub mod category_store;
pub mod clients;
pub mod commander;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod query;
