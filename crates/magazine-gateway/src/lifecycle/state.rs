//! Gateway state machine: `Running → Stopping → Terminated`.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GatewayState {
    Running,
    Stopping,
    Terminated,
}

/// Cloneable handle on the gateway state.
///
/// Transitions only move forward; a request to go back is ignored.
#[derive(Debug, Clone)]
pub struct GatewayLifecycle {
    sender: Arc<watch::Sender<GatewayState>>,
}

impl Default for GatewayLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayLifecycle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(GatewayState::Running);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> GatewayState {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GatewayState> {
        self.sender.subscribe()
    }

    /// Running → Stopping. Returns `true` if this call made the transition.
    pub fn begin_stopping(&self) -> bool {
        self.advance(GatewayState::Stopping)
    }

    /// Any state → Terminated. Returns `true` if this call made the transition.
    pub fn mark_terminated(&self) -> bool {
        self.advance(GatewayState::Terminated)
    }

    fn advance(&self, next: GatewayState) -> bool {
        let changed = self.sender.send_if_modified(|state| {
            if *state < next {
                *state = next;
                true
            } else {
                false
            }
        });
        if changed {
            info!(state = ?next, "Gateway state changed");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_only_move_forward() {
        let lifecycle = GatewayLifecycle::new();
        assert_eq!(lifecycle.current(), GatewayState::Running);

        assert!(lifecycle.begin_stopping());
        assert!(!lifecycle.begin_stopping());
        assert_eq!(lifecycle.current(), GatewayState::Stopping);

        assert!(lifecycle.mark_terminated());
        assert!(!lifecycle.begin_stopping());
        assert_eq!(lifecycle.current(), GatewayState::Terminated);
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let lifecycle = GatewayLifecycle::new();
        let mut receiver = lifecycle.subscribe();

        lifecycle.begin_stopping();
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), GatewayState::Stopping);
    }
}
