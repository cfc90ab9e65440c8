//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` serves the same `ResourceClient<T>` API as a real actor but answers
//! from a queue of expectations. It lets you test logic *around* a client (a command
//! handler validating against a store, for instance) without spawning the store.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! 1. **Client logic**: mock everything, drive the client directly.
//! 2. **Single actor**: spawn one real actor, no dependencies.
//! 3. **Actor with mocked dependencies**: a real handler whose context holds mock clients.
//! 4. **Full system**: every actor real, driven through the public clients.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Author { id: u32 }
//! #[derive(Debug)] struct AuthorCreate;
//! #[derive(Debug)] struct AuthorUpdate;
//! #[derive(Debug)] enum AuthorAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct AuthorError;
//!
//! #[async_trait]
//! impl ActorEntity for Author {
//!     type Id = u32; type Create = AuthorCreate; type Update = AuthorUpdate;
//!     type Action = AuthorAction; type ActionResult = (); type Context = (); type Error = AuthorError;
//!     fn from_create_params(id: u32, _: AuthorCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: AuthorUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: AuthorAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Author>::new();
//!     let client = mock.client();
//!
//!     mock.expect_list().return_ok(vec![Author { id: 7 }]);
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//!     assert!(matches!(client.get(1).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For message-handler actors, [`create_mock_ref`] returns an [`ActorRef`] and the raw
//! mailbox so a test can assert on what was sent and answer by hand.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::mailbox::{ActorRef, Envelope};
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation (kind or id) panics the mock task, which surfaces in the test as
/// `FrameworkError::ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn respond<R>(
    respond_to: tokio::sync::oneshot::Sender<Result<R, FrameworkError>>,
    response: Result<R, FrameworkError>,
) {
    let _ = respond_to.send(response);
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) if id == expected => respond(respond_to, response),
                    (
                        ResourceRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => respond(respond_to, response),
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => respond(respond_to, response),
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) if id == expected => respond(respond_to, response),
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) if id == expected => respond(respond_to, response),
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) if id == expected => respond(respond_to, response),
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &self,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            build: Box::new(build),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder that records one expectation once its response is chosen.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// The test plays the actor: it receives each request from `receiver` and answers on
/// the request's `respond_to` channel. Consider [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Creates an [`ActorRef`] whose mailbox the test reads directly.
pub fn create_mock_ref<M>(
    name: &str,
    capacity: usize,
) -> (ActorRef<M>, mpsc::Receiver<Envelope<M>>) {
    let (sender, receiver) = mpsc::channel(capacity);
    (ActorRef::new(name, sender), receiver)
}

/// Helper to verify that the next envelope is a message (not a poison pill).
pub async fn expect_message<M>(receiver: &mut mpsc::Receiver<Envelope<M>>) -> Option<M> {
    match receiver.recv().await {
        Some(Envelope::Message(message)) => Some(message),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Issue {
        id: u32,
        title: String,
    }

    #[derive(Debug)]
    struct IssueCreate {
        title: String,
    }

    #[derive(Debug)]
    struct IssueUpdate;

    #[derive(Debug)]
    enum IssueAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Issue error")]
    struct IssueError;

    #[async_trait]
    impl ActorEntity for Issue {
        type Id = u32;
        type Create = IssueCreate;
        type Update = IssueUpdate;
        type Action = IssueAction;
        type ActionResult = ();
        type Context = ();
        type Error = IssueError;

        fn from_create_params(id: u32, params: IssueCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                title: params.title,
            })
        }

        async fn on_update(
            &mut self,
            _update: IssueUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            _action: IssueAction,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_mock_client_channel_helpers() {
        let (client, mut receiver) = create_mock_client::<Issue>(10);

        let get_task = tokio::spawn(async move { client.get(3).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 3);
        responder
            .send(Ok(Some(Issue {
                id: 3,
                title: "Spring".to_string(),
            })))
            .unwrap();

        let issue = get_task.await.unwrap().unwrap().unwrap();
        assert_eq!(issue.title, "Spring");
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Issue>::new();

        mock.expect_create().return_ok(1);
        mock.expect_update(1).return_ok(Issue {
            id: 1,
            title: "Summer".to_string(),
        });
        mock.expect_delete(1).return_ok(());

        let client = mock.client();

        let id = client
            .create(IssueCreate {
                title: "Spring".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.update(1, IssueUpdate).await.unwrap().title, "Summer");
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_mismatched_id_drops_reply() {
        let mut mock = MockClient::<Issue>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    async fn test_mock_ref_records_messages() {
        let (actor_ref, mut mailbox) = create_mock_ref::<String>("probe", 4);
        actor_ref.tell("hello".to_string()).await.unwrap();
        actor_ref.tell_poison_pill().await.unwrap();

        assert_eq!(expect_message(&mut mailbox).await.as_deref(), Some("hello"));
        assert!(expect_message(&mut mailbox).await.is_none());
    }
}
