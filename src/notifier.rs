//! Per-player-session publish/subscribe for game events.
//!
//! Delivery is at-most-once: events published while nobody is subscribed, or
//! while a subscriber's queue is full, are dropped. Publishing never waits on
//! a subscriber, so it is safe to call while a game's lock is held.

use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::models::GameEvent;

/// Sending half handed to the notifier by a subscriber
pub type EventSender = mpsc::Sender<GameEvent>;
/// Receiving half held by a subscriber
pub type EventReceiver = mpsc::Receiver<GameEvent>;

/// Default per-subscriber queue length
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

pub struct EventNotifier {
    subscribers: DashMap<String, EventSender>,
    capacity: usize,
}

impl EventNotifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Register interest in `player_session_id`, replacing any prior subscriber
    pub fn subscribe(&self, player_session_id: &str) -> EventReceiver {
        let (tx, rx) = mpsc::channel(self.capacity);
        self.attach(player_session_id, tx);
        rx
    }

    /// Register an existing sender for `player_session_id`, replacing any prior one
    pub fn attach(&self, player_session_id: &str, sender: EventSender) {
        if self
            .subscribers
            .insert(player_session_id.to_string(), sender)
            .is_some()
        {
            tracing::debug!(
                "Replaced subscriber for player session {}",
                player_session_id
            );
        }
    }

    /// Forget the subscriber for `player_session_id` once its receiver is gone.
    /// A live replacement subscriber is kept.
    pub fn unsubscribe(&self, player_session_id: &str) {
        self.subscribers
            .remove_if(player_session_id, |_, sender| sender.is_closed());
    }

    pub fn is_subscribed(&self, player_session_id: &str) -> bool {
        self.subscribers.contains_key(player_session_id)
    }

    /// Hand `event` to the current subscriber without waiting.
    /// Returns whether the event was queued for delivery.
    pub fn publish(&self, player_session_id: &str, event: &GameEvent) -> bool {
        let result = match self.subscribers.get(player_session_id) {
            Some(sender) => sender.try_send(event.clone()),
            None => {
                tracing::debug!(
                    "No subscriber for player session {}, dropping {:?}",
                    player_session_id,
                    event
                );
                return false;
            }
        };

        match result {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(
                    "Subscriber queue full for player session {}, dropping {:?}",
                    player_session_id,
                    event
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(
                    "Subscriber for player session {} went away",
                    player_session_id
                );
                self.subscribers
                    .remove_if(player_session_id, |_, sender| sender.is_closed());
                false
            }
        }
    }
}

impl Default for EventNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symbol;

    fn move_event(x: usize) -> GameEvent {
        GameEvent::MoveMade {
            symbol: Symbol::X,
            x,
            y: 0,
        }
    }

    #[test]
    fn test_publish_without_subscriber_drops() {
        let notifier = EventNotifier::default();
        assert!(!notifier.publish("ps-1", &GameEvent::GameDraw));
    }

    #[test]
    fn test_events_arrive_in_publish_order() {
        let notifier = EventNotifier::default();
        let mut rx = notifier.subscribe("ps-1");
        for x in 0..3 {
            assert!(notifier.publish("ps-1", &move_event(x)));
        }
        for x in 0..3 {
            assert_eq!(rx.try_recv().unwrap(), move_event(x));
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_resubscribe_replaces_prior_subscriber() {
        let notifier = EventNotifier::default();
        let mut first = notifier.subscribe("ps-1");
        let mut second = notifier.subscribe("ps-1");

        notifier.publish("ps-1", &GameEvent::GameDraw);
        assert_eq!(second.try_recv().unwrap(), GameEvent::GameDraw);
        // The replaced channel is closed and receives nothing
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let notifier = EventNotifier::new(1);
        let mut rx = notifier.subscribe("ps-1");
        assert!(notifier.publish("ps-1", &move_event(0)));
        assert!(!notifier.publish("ps-1", &move_event(1)));
        assert_eq!(rx.try_recv().unwrap(), move_event(0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unsubscribe_removes_closed_subscriber() {
        let notifier = EventNotifier::default();
        let rx = notifier.subscribe("ps-1");
        notifier.unsubscribe("ps-1");
        assert!(notifier.is_subscribed("ps-1"), "open subscriber must stay");

        drop(rx);
        notifier.unsubscribe("ps-1");
        assert!(!notifier.is_subscribed("ps-1"));
    }

    #[test]
    fn test_unsubscribe_keeps_replacement() {
        let notifier = EventNotifier::default();
        let first = notifier.subscribe("ps-1");
        let mut second = notifier.subscribe("ps-1");
        drop(first);

        notifier.unsubscribe("ps-1");
        assert!(notifier.is_subscribed("ps-1"));
        assert!(notifier.publish("ps-1", &GameEvent::GameDraw));
        assert_eq!(second.try_recv().unwrap(), GameEvent::GameDraw);
    }

    #[test]
    fn test_closed_subscriber_is_removed() {
        let notifier = EventNotifier::default();
        let rx = notifier.subscribe("ps-1");
        drop(rx);
        assert!(!notifier.publish("ps-1", &GameEvent::GameDraw));
        assert!(!notifier.is_subscribed("ps-1"));
    }
}
