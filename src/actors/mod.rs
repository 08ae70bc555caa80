//! Actor system for background timers.
//!
//! Each actor is an independent tokio task that communicates with the logic
//! thread via message passing:
//! - Random value ticks (ValueSource)
//! - One-shot settle window per animation cycle (SettleTimer)
//!
//! NOTE: Keyboard input is handled synchronously in the logic thread,
//! not via an actor, for minimum latency.

pub mod settle;
pub mod value_source;

use tokio_util::sync::CancellationToken;

pub use settle::SettleTimer;
pub use value_source::ValueSource;

/// Handle to a running actor. Dropping the handle cancels the actor, so a
/// timer can never outlive whoever armed it.
#[derive(Debug)]
pub struct ActorHandle {
    cancel: CancellationToken,
}

impl ActorHandle {
    /// Create a new actor handle with a cancellation token.
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Signal the actor to shut down gracefully.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Check if shutdown has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ActorHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_cancels_token() {
        let token = CancellationToken::new();
        let handle = ActorHandle::new(token.clone());
        assert!(!handle.is_cancelled());
        handle.shutdown();
        assert!(handle.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_drop_cancels_token() {
        let token = CancellationToken::new();
        drop(ActorHandle::new(token.clone()));
        assert!(token.is_cancelled());
    }
}
