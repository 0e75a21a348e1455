//! Live update fan-out to connected map observers
//!
//! Each observer owns a bounded queue. `broadcast` serializes the event once,
//! snapshots the registry and offers the message to every open queue with
//! `try_send`, so a slow observer loses messages instead of stalling the rest.
//! Delivery is at-most-once with no ordering guarantee across observers.

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};
use uuid::Uuid;

/// Messages buffered per observer before new ones are dropped
pub const OBSERVER_QUEUE_CAPACITY: usize = 256;

pub type ObserverId = Uuid;

/// Concurrency-safe set of observer channels keyed by observer id
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Arc<RwLock<HashMap<ObserverId, mpsc::Sender<Arc<str>>>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer; called when a live connection opens
    pub fn register(&self) -> (ObserverId, mpsc::Receiver<Arc<str>>) {
        let (tx, rx) = mpsc::channel(OBSERVER_QUEUE_CAPACITY);
        let id = Uuid::new_v4();
        self.observers.write().insert(id, tx);
        debug!(observer = %id, "Observer registered");
        (id, rx)
    }

    /// Remove an observer; called when a live connection closes
    pub fn unregister(&self, id: &ObserverId) {
        if self.observers.write().remove(id).is_some() {
            debug!(observer = %id, "Observer unregistered");
        }
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    /// Serialize `event` and offer it to every open observer.
    ///
    /// Never fails. Returns how many observers accepted the message.
    pub fn broadcast<E: Serialize>(&self, event: &E) -> usize {
        let payload: Arc<str> = match serde_json::to_string(event) {
            Ok(json) => json.into(),
            Err(e) => {
                error!(error = %e, "Failed to serialize live event");
                return 0;
            }
        };

        // Snapshot so connects/disconnects never contend with delivery
        let targets: Vec<(ObserverId, mpsc::Sender<Arc<str>>)> = self
            .observers
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut delivered = 0;
        for (id, tx) in targets {
            if tx.is_closed() {
                continue;
            }
            match tx.try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(observer = %id, "Observer queue full, dropping live event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {}
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_broadcast_reaches_every_observer() {
        let registry = ObserverRegistry::new();
        let (_a, mut rx_a) = registry.register();
        let (_b, mut rx_b) = registry.register();

        let delivered = registry.broadcast(&json!({"name_id": "P-001"}));
        assert_eq!(delivered, 2);

        assert_eq!(&*rx_a.recv().await.unwrap(), r#"{"name_id":"P-001"}"#);
        assert_eq!(&*rx_b.recv().await.unwrap(), r#"{"name_id":"P-001"}"#);
    }

    #[tokio::test]
    async fn test_closed_observer_is_skipped_but_kept() {
        let registry = ObserverRegistry::new();
        let (_open, mut rx_open) = registry.register();
        let (_closed, rx_closed) = registry.register();
        drop(rx_closed);

        assert_eq!(registry.broadcast(&json!(1)), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(&*rx_open.recv().await.unwrap(), "1");
    }

    #[test]
    fn test_full_observer_does_not_block_others() {
        let registry = ObserverRegistry::new();
        let (_slow, _rx_slow) = registry.register();
        let (_fast, mut rx_fast) = registry.register();

        for i in 0..OBSERVER_QUEUE_CAPACITY {
            registry.broadcast(&i);
            // Keep the fast observer drained
            assert!(rx_fast.try_recv().is_ok());
        }

        // Slow observer's queue is now full; fast one still receives
        assert_eq!(registry.broadcast(&"overflow"), 1);
        assert_eq!(&*rx_fast.try_recv().unwrap(), r#""overflow""#);
    }

    #[test]
    fn test_unregister() {
        let registry = ObserverRegistry::new();
        let (id, _rx) = registry.register();
        assert_eq!(registry.len(), 1);

        registry.unregister(&id);
        assert!(registry.is_empty());
        assert_eq!(registry.broadcast(&json!({})), 0);
    }
}
