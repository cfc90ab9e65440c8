//! # System Lifecycle & Orchestration
//!
//! This module owns the runtime lifecycle of the gateway: building the actor system,
//! wiring the category actors together, serving HTTP and tearing everything down.
//!
//! ## The MagazineSystem Pattern
//!
//! [`MagazineSystem`] is the composition root of the actor side. It is an explicit
//! value passed to whoever needs it, never ambient state:
//!
//! ```rust,ignore
//! let system = MagazineSystem::start(&config.actor_system)?;
//! let state = AppState::new(&system, &config);   // clients are cheap clones
//! // ... serve ...
//! let report = system.shutdown(timeout).await?;  // consumes the system
//! ```
//!
//! ## Dependency Injection via Context
//!
//! The store is spawned first. Both routed groups then receive a clone of its client
//! as their context, so every routee shares one sequential owner of the data. The
//! commander context also carries the lock that serializes tree changes:
//!
//! ```rust,ignore
//! impl MessageHandler for CategoryCommander {
//!     type Context = CommanderContext;
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! The host's cancellation token drives the state machine
//! (`Running → Stopping → Terminated`, see [`GatewayState`]):
//!
//! 1. **Token cancelled** - state becomes `Stopping`, the status endpoint reports `Down`
//! 2. **HTTP drains** - axum finishes in-flight requests
//! 3. **Poison pills** - one to `category-query-group`, then one to `category-commander-group`
//! 4. **Terminate** - the actor system cancels every actor; state becomes `Terminated`
//!
//! [`ShutdownReport`] records the steps in the order they were taken.
//!
//! ## Observability & Tracing
//!
//! [`init_tracing`] installs the subscriber from the `logging` configuration section.
//!
//! **Usage:**
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! MAGAZINE__LOGGING__FORMAT=json cargo run
//! ```

pub mod host;
pub mod magazine_system;
pub mod state;
pub mod tracing;

pub use host::serve;
pub use magazine_system::*;
pub use state::*;
pub use self::tracing::init_tracing;
