//! # Message-Handler Actors
//!
//! Resource actors answer a fixed CRUD protocol. Some actors instead speak a protocol of
//! their own (commands, queries) and usually live behind a [`Router`](crate::Router).
//! This module provides the pieces for those:
//!
//! - [`Envelope`]: what travels through a mailbox, a message or a poison pill.
//! - [`MessageHandler`]: the behaviour of the actor.
//! - [`ActorRef`]: the cloneable address of a running handler.
//!
//! ## Poison Pill
//!
//! Mailboxes are FIFO. A poison pill is just another envelope, so every message queued
//! before it is handled first. When the pill is dequeued the actor runs
//! [`MessageHandler::post_stop`] once and exits; later sends fail with
//! [`FrameworkError::ActorClosed`].

use crate::error::FrameworkError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A unit of work in an actor's mailbox.
#[derive(Debug)]
pub enum Envelope<M> {
    Message(M),
    PoisonPill,
}

/// Behaviour of an actor that processes its own message type.
///
/// Replies, when the protocol needs them, travel inside the message as a
/// `oneshot::Sender`, the same way [`ResourceRequest`](crate::ResourceRequest) does it.
#[async_trait]
pub trait MessageHandler: Send + 'static {
    type Message: Send + Debug + 'static;

    /// Dependencies shared by every instance of a pool.
    type Context: Send + Sync + 'static;

    async fn handle(&mut self, message: Self::Message, ctx: &Self::Context);

    /// Called once, after the poison pill is dequeued.
    async fn post_stop(&mut self, _ctx: &Self::Context) {}
}

/// Address of a running [`MessageHandler`].
pub struct ActorRef<M> {
    name: Arc<str>,
    sender: mpsc::Sender<Envelope<M>>,
}

impl<M> Clone for ActorRef<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<M> Debug for ActorRef<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorRef")
            .field("name", &self.name)
            .field("mailbox_len", &self.mailbox_len())
            .finish()
    }
}

impl<M> ActorRef<M> {
    pub fn new(name: impl Into<Arc<str>>, sender: mpsc::Sender<Envelope<M>>) -> Self {
        Self {
            name: name.into(),
            sender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueues a message, waiting for mailbox space if the mailbox is full.
    pub async fn tell(&self, message: M) -> Result<(), FrameworkError> {
        self.sender
            .send(Envelope::Message(message))
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Enqueues a poison pill behind everything already in the mailbox.
    pub async fn tell_poison_pill(&self) -> Result<(), FrameworkError> {
        debug!(actor = %self.name, "Poison pill sent");
        self.sender
            .send(Envelope::PoisonPill)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Number of envelopes waiting in the mailbox.
    pub fn mailbox_len(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Creates a mailbox and the handler loop that drains it.
///
/// The returned future must be driven (spawned) for the actor to process anything.
/// [`ActorSystem::actor_of`](crate::ActorSystem::actor_of) does that and ties the
/// task to the system's lifetime.
pub fn spawn_parts<H: MessageHandler>(
    name: Arc<str>,
    handler: H,
    ctx: H::Context,
    capacity: usize,
) -> (ActorRef<H::Message>, impl std::future::Future<Output = ()> + Send) {
    let (sender, receiver) = mpsc::channel(capacity);
    let actor_ref = ActorRef::new(name.clone(), sender);
    (actor_ref, run_handler(name, handler, ctx, receiver))
}

async fn run_handler<H: MessageHandler>(
    name: Arc<str>,
    mut handler: H,
    ctx: H::Context,
    mut receiver: mpsc::Receiver<Envelope<H::Message>>,
) {
    info!(actor = %name, "Actor started");
    let mut handled: u64 = 0;

    while let Some(envelope) = receiver.recv().await {
        match envelope {
            Envelope::Message(message) => {
                debug!(actor = %name, ?message, "Handle");
                handler.handle(message, &ctx).await;
                handled += 1;
            }
            Envelope::PoisonPill => {
                info!(actor = %name, handled, "Poison pill received");
                break;
            }
        }
    }

    // Closing the receiver rejects everything still queued or sent from now on.
    receiver.close();
    handler.post_stop(&ctx).await;
    info!(actor = %name, handled, "Shutdown");
}
