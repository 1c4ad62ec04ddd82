use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use serde::{Deserialize, Serialize};

use crate::*;

/// State change published by a [`GameSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Full layout, sent on reset (all zero) and again once mines are placed.
    BoardChanged(BoardSnapshot),
    StatusChanged(GameStatus),
    RemainingSafeCellsChanged(CellCount),
    RemainingMinesChanged(i32),
}

/// Fan-out of game events to any number of channel subscribers.
///
/// Every event reaches every live subscriber once, in publish order. Receivers that were
/// dropped are forgotten on the next publish.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<UnboundedSender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber, sending `initial` to it alone before any later event.
    pub fn subscribe(
        &mut self,
        initial: impl IntoIterator<Item = GameEvent>,
    ) -> UnboundedReceiver<GameEvent> {
        let (sender, receiver) = unbounded();
        for event in initial {
            let _ = sender.unbounded_send(event);
        }
        self.subscribers.push(sender);
        log::debug!("New subscriber, {} total", self.subscribers.len());
        receiver
    }

    pub fn publish(&mut self, event: GameEvent) {
        log::trace!("Publishing {:?}", event);
        self.subscribers
            .retain(|sender| sender.unbounded_send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{FutureExt, StreamExt};

    fn drain(receiver: &mut UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(Some(event)) = receiver.next().now_or_never() {
            events.push(event);
        }
        events
    }

    #[test]
    fn delivers_events_in_order_to_every_subscriber() {
        let mut bus = EventBus::new();
        let mut first = bus.subscribe([]);
        let mut second = bus.subscribe([]);

        bus.publish(GameEvent::StatusChanged(GameStatus::Running));
        bus.publish(GameEvent::RemainingSafeCellsChanged(3));

        let expected = vec![
            GameEvent::StatusChanged(GameStatus::Running),
            GameEvent::RemainingSafeCellsChanged(3),
        ];
        assert_eq!(drain(&mut first), expected);
        assert_eq!(drain(&mut second), expected);
    }

    #[test]
    fn initial_events_go_only_to_new_subscriber() {
        let mut bus = EventBus::new();
        let mut old = bus.subscribe([]);
        let mut new = bus.subscribe([GameEvent::RemainingMinesChanged(10)]);

        assert!(drain(&mut old).is_empty());
        assert_eq!(drain(&mut new), vec![GameEvent::RemainingMinesChanged(10)]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe([]);
        drop(bus.subscribe([]));

        bus.publish(GameEvent::StatusChanged(GameStatus::Won));

        assert_eq!(bus.subscriber_count(), 1);
        drop(kept);
    }
}
