//! # ActorClient Trait
//!
//! Domain clients wrap a [`ResourceClient`] and implement [`ActorClient`] to inherit the
//! read and delete half of the protocol with their own error type. Create, update and
//! actions stay on the domain client, where their parameters have names.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Standard reads and deletes for a client over one resource actor.
///
/// A client is usually handed to message handlers as their context, so every routee of
/// a pool talks to the same store.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, MessageHandler, ResourceClient};
/// use async_trait::async_trait;
/// use tokio::sync::oneshot;
///
/// #[derive(Clone, Debug)]
/// struct Section { id: u32, title: String }
/// #[derive(Debug)] struct SectionCreate { title: String }
/// #[derive(Debug)] struct SectionUpdate;
/// #[derive(Debug)] enum SectionAction {}
///
/// #[derive(Debug, thiserror::Error)]
/// enum SectionError {
///     #[error("section store: {0}")]
///     Store(String),
/// }
/// impl From<String> for SectionError {
///     fn from(s: String) -> Self { SectionError::Store(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Section {
///     type Id = u32;
///     type Create = SectionCreate;
///     type Update = SectionUpdate;
///     type Action = SectionAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = SectionError;
///
///     fn from_create_params(id: u32, params: SectionCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, title: params.title })
///     }
///     async fn on_update(&mut self, _: SectionUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: SectionAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[derive(Clone)]
/// struct SectionClient(ResourceClient<Section>);
///
/// #[async_trait]
/// impl ActorClient<Section> for SectionClient {
///     type Error = SectionError;
///
///     fn inner(&self) -> &ResourceClient<Section> {
///         &self.0
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         SectionError::Store(e.to_string())
///     }
/// }
///
/// /// Routee answering "how many sections are there" from the shared store.
/// struct SectionCounter;
///
/// #[derive(Debug)]
/// struct CountSections(oneshot::Sender<usize>);
///
/// #[async_trait]
/// impl MessageHandler for SectionCounter {
///     type Message = CountSections;
///     type Context = SectionClient;
///
///     async fn handle(&mut self, CountSections(reply): CountSections, sections: &SectionClient) {
///         // list(), get(), exists() and delete() come with the trait.
///         let count = sections.list().await.map(|all| all.len()).unwrap_or(0);
///         let _ = reply.send(count);
///     }
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Converts runtime failures into the client's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// `true` if an entity with `id` is stored.
    async fn exists(&self, id: T::Id) -> Result<bool, Self::Error> {
        Ok(self.get(id).await?.is_some())
    }

    /// Every entity, in creation order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
