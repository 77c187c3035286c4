//! In-process publish/subscribe for data-change notifications.
//!
//! Mutating handlers publish a `DataEvent` after their write commits; the
//! `/api/events` stream forwards every event to connected clients so their
//! views refetch instead of reloading the page.

use common::events::DataEvent;
use log::debug;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct DataEvents {
    tx: broadcast::Sender<DataEvent>,
}

impl Default for DataEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl DataEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        DataEvents { tx }
    }

    /// Publishing with no subscriber is not an error; the event is dropped.
    pub fn publish(&self, event: DataEvent) {
        debug!("Publishing data event {:?}", event);
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_events_in_order() {
        let events = DataEvents::new();
        let mut rx = events.subscribe();
        events.publish(DataEvent::SitesChanged);
        events.publish(DataEvent::DataCleared);
        assert_eq!(rx.try_recv().expect("first"), DataEvent::SitesChanged);
        assert_eq!(rx.try_recv().expect("second"), DataEvent::DataCleared);
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        DataEvents::new().publish(DataEvent::PoliciesChanged);
    }
}
