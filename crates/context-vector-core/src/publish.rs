//! Snapshot publication
//!
//! Snapshots are shared by replacement, never by mutation: the publisher
//! swaps in a new `Arc<ContextVector>` and subscribers only ever see whole
//! snapshots. Publishing a snapshot equal to the current one is a no-op and
//! does not wake subscribers.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::vector::ContextVector;

/// The publisher was dropped; no further snapshots will arrive
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("context vector publisher closed")]
pub struct PublisherClosed;

/// Producer side: owns the current snapshot
#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: watch::Sender<Option<Arc<ContextVector>>>,
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotPublisher {
    /// Create a publisher with no snapshot yet
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the current snapshot
    ///
    /// Returns `false` when `vector` is structurally equal to the current
    /// snapshot; nothing is replaced and subscribers are not notified.
    pub fn publish(&self, vector: ContextVector) -> bool {
        let replaced = self.tx.send_if_modified(|current| {
            if current.as_deref() == Some(&vector) {
                return false;
            }
            *current = Some(Arc::new(vector));
            true
        });

        if replaced {
            debug!(subscribers = self.tx.receiver_count(), "Published context vector");
        } else {
            trace!("Skipped unchanged context vector");
        }
        replaced
    }

    /// Current snapshot, if any has been published
    pub fn current(&self) -> Option<Arc<ContextVector>> {
        self.tx.borrow().clone()
    }

    /// Create a subscriber positioned at the current snapshot
    pub fn subscribe(&self) -> SnapshotSubscriber {
        SnapshotSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

/// Consumer side: reads whole snapshots
#[derive(Debug, Clone)]
pub struct SnapshotSubscriber {
    rx: watch::Receiver<Option<Arc<ContextVector>>>,
}

impl SnapshotSubscriber {
    /// Latest snapshot without waiting
    pub fn latest(&self) -> Option<Arc<ContextVector>> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published snapshot
    pub async fn changed(&mut self) -> Result<Option<Arc<ContextVector>>, PublisherClosed> {
        self.rx.changed().await.map_err(|_| PublisherClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
