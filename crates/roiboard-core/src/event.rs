//! Dataset change notifications over tokio::broadcast
//!
//! The store publishes one event per import attempt or clear. Subscribers
//! (a dashboard view, a log sink) only need the latest state, so a receiver
//! that falls behind skips ahead instead of stalling imports.

use tokio::sync::broadcast;

/// Buffered events per receiver before it starts lagging
///
/// Imports are user-driven (a paste or an upload), so a burst larger than
/// this means the subscriber is gone or stuck. A lagging receiver gets
/// `RecvError::Lagged` and resumes at the oldest retained event.
pub const EVENT_BUFFER: usize = 64;

/// Events emitted by the data layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEvent {
    /// A successful import replaced the working dataset
    DatasetReplaced {
        source: String,
        channels: usize,
        campaigns: usize,
    },
    /// An import was rejected; the working dataset is unchanged
    ImportRejected { source: String, code: &'static str },
    /// The working dataset was cleared
    DatasetCleared,
}

/// Broadcast handle shared by the store and its subscribers
///
/// Clones publish into the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DataEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event, returning how many subscribers received it
    ///
    /// Publishing with no subscribers is not an error; the event is dropped.
    pub fn publish(&self, event: DataEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_BUFFER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::RecvError;

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(DataEvent::DatasetCleared), 1);
        assert_eq!(rx.recv().await.unwrap(), DataEvent::DatasetCleared);
    }

    #[tokio::test]
    async fn test_clone_shares_channel() {
        let bus = EventBus::default();
        let clone = bus.clone();
        let mut rx = bus.subscribe();

        clone.publish(DataEvent::ImportRejected {
            source: "paste".to_string(),
            code: "missing-required-section",
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            DataEvent::ImportRejected { .. }
        ));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(DataEvent::DatasetCleared), 0);
    }

    #[tokio::test]
    async fn test_lagging_receiver_skips_ahead() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();

        for n in 0..4 {
            bus.publish(DataEvent::DatasetReplaced {
                source: format!("import-{n}"),
                channels: 1,
                campaigns: 1,
            });
        }

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(2))));
        match rx.recv().await.unwrap() {
            DataEvent::DatasetReplaced { source, .. } => assert_eq!(source, "import-2"),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
