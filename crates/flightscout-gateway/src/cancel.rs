//! Cooperative cancellation handle
//!
//! A [`CancelToken`] is a clonable flag backed by a `tokio::sync::watch`
//! channel. The owner cancels it; any number of tasks can poll
//! [`CancelToken::is_cancelled`] or await [`CancelToken::cancelled`].

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Mark the token cancelled. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // The sender lives in `self`, so the channel cannot close while we
        // are borrowed.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}
