//! Registry of connected real-time listeners and fan-out of events.
//!
//! [`NotificationHub`] owns a map from [`ListenerId`] to the sending half of
//! a bounded per-listener queue. WebSocket connections register on open and
//! deregister on close; [`NotificationHub::broadcast`] pushes one serialized
//! event into every queue without waiting on any socket.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, mpsc};

use super::ListenerId;

/// Plaintext greeting sent to every listener right after it connects.
pub const WELCOME_MESSAGE: &str = "Bienvenue sur le WebSocket !";

/// Explicit listener registry shared by the WebSocket layer and the
/// student service.
///
/// Delivery is best-effort and at-most-once: a listener whose queue is full
/// misses the event, and a listener whose receiver has been dropped is
/// pruned on the next broadcast.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    listeners: Arc<RwLock<HashMap<ListenerId, mpsc::Sender<String>>>>,
    queue_capacity: usize,
}

impl NotificationHub {
    /// Creates an empty hub whose listeners each get a queue of
    /// `queue_capacity` pending messages.
    #[must_use]
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            listeners: Arc::new(RwLock::new(HashMap::new())),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Registers a new listener and returns its id together with the
    /// receiving half of its queue.
    ///
    /// The welcome message is already queued when this returns, so it is
    /// always the first thing the listener sees.
    pub async fn register(&self) -> (ListenerId, mpsc::Receiver<String>) {
        let id = ListenerId::new();
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        // Fresh channel with capacity >= 1: cannot be full or closed.
        let _ = tx.try_send(WELCOME_MESSAGE.to_string());

        self.listeners.write().await.insert(id, tx);
        tracing::info!(listener_id = %id, "listener connected");
        (id, rx)
    }

    /// Removes a listener. Unknown ids are ignored.
    pub async fn deregister(&self, id: ListenerId) {
        if self.listeners.write().await.remove(&id).is_some() {
            tracing::info!(listener_id = %id, "listener disconnected");
        }
    }

    /// Serializes `event` once and queues it for every registered listener.
    ///
    /// Returns the number of listeners the event was queued for. Listeners
    /// whose connection task has gone away are removed from the registry.
    pub async fn broadcast<E: Serialize>(&self, event: &E) -> usize {
        let text = match serde_json::to_string(event) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize broadcast event");
                return 0;
            }
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        {
            let listeners = self.listeners.read().await;
            for (id, tx) in listeners.iter() {
                match tx.try_send(text.clone()) {
                    Ok(()) => delivered += 1,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::warn!(listener_id = %id, "listener queue full, event dropped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*id),
                }
            }
        }

        if !closed.is_empty() {
            let mut listeners = self.listeners.write().await;
            for id in closed {
                listeners.remove(&id);
                tracing::debug!(listener_id = %id, "pruned closed listener");
            }
        }

        tracing::debug!(delivered, "event broadcast");
        delivered
    }

    /// Returns the number of currently registered listeners.
    pub async fn listener_count(&self) -> usize {
        self.listeners.read().await.len()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Student, StudentEvent, StudentId};

    fn make_event(id: &str) -> StudentEvent {
        StudentEvent::student_added(&Student {
            student_id: StudentId::from(id),
            name: "Ana".to_string(),
            profile_image: "img.png".to_string(),
            qr_code: format!("QR-{id}"),
        })
    }

    async fn expect_message(rx: &mut mpsc::Receiver<String>) -> String {
        let Some(msg) = rx.recv().await else {
            panic!("expected a queued message");
        };
        msg
    }

    #[tokio::test]
    async fn register_queues_welcome_first() {
        let hub = NotificationHub::new(8);
        let (_id, mut rx) = hub.register().await;
        assert_eq!(expect_message(&mut rx).await, WELCOME_MESSAGE);
        assert_eq!(hub.listener_count().await, 1);
    }

    #[tokio::test]
    async fn broadcast_without_listeners_returns_zero() {
        let hub = NotificationHub::new(8);
        assert_eq!(hub.broadcast(&make_event("S1")).await, 0);
    }

    #[tokio::test]
    async fn every_listener_receives_event_once() {
        let hub = NotificationHub::new(8);
        let (_a, mut rx_a) = hub.register().await;
        let (_b, mut rx_b) = hub.register().await;

        assert_eq!(hub.broadcast(&make_event("S1")).await, 2);

        for rx in [&mut rx_a, &mut rx_b] {
            assert_eq!(expect_message(rx).await, WELCOME_MESSAGE);
            let Ok(event) = serde_json::from_str::<StudentEvent>(&expect_message(rx).await) else {
                panic!("event is not valid json");
            };
            assert_eq!(event.student_id.as_str(), "S1");
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn late_listener_only_sees_welcome() {
        let hub = NotificationHub::new(8);
        hub.broadcast(&make_event("S1")).await;

        let (_id, mut rx) = hub.register().await;
        assert_eq!(expect_message(&mut rx).await, WELCOME_MESSAGE);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropped_receiver_is_pruned() {
        let hub = NotificationHub::new(8);
        let (_gone, rx_gone) = hub.register().await;
        let (_kept, _rx_kept) = hub.register().await;
        drop(rx_gone);

        assert_eq!(hub.broadcast(&make_event("S1")).await, 1);
        assert_eq!(hub.listener_count().await, 1);
    }

    #[tokio::test]
    async fn full_queue_drops_event_but_keeps_listener() {
        let hub = NotificationHub::new(1);
        // Queue already holds the welcome message.
        let (_id, mut rx) = hub.register().await;

        assert_eq!(hub.broadcast(&make_event("S1")).await, 0);
        assert_eq!(hub.listener_count().await, 1);

        assert_eq!(expect_message(&mut rx).await, WELCOME_MESSAGE);
        assert_eq!(hub.broadcast(&make_event("S2")).await, 1);
    }

    #[tokio::test]
    async fn deregister_removes_listener() {
        let hub = NotificationHub::new(8);
        let (id, _rx) = hub.register().await;
        hub.deregister(id).await;
        assert_eq!(hub.listener_count().await, 0);
        hub.deregister(id).await;
    }
}
