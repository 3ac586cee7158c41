//! # Event Module - Game Notifications
//!
//! Games notify subscribed listeners about lifecycle changes: start, each
//! accepted move, resignations, and the end of the game. Delivery is
//! synchronous on the mutating thread and ordered exactly as the accepting
//! operations returned; listeners must not call back into the game.
//!
//! The listener registry is deliberately not part of game state: cloning a
//! bus yields an empty one, so search copies and snapshots never fire
//! events during rollouts.

use crate::board::Color;
use crate::moves::Move;
use std::fmt;

/// A notification delivered to subscribed listeners.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Emitted once when the owning front-end announces the game.
    GameStarted { black: String, white: String },
    /// Emitted after every accepted move, pass, or resign.
    MoveMade { mv: Move },
    /// Emitted when a player concedes, before the matching `GameEnded`.
    PlayerResigned { player: Color, winner: Color },
    /// Emitted when the game reaches a terminal state. `None` is a draw.
    GameEnded { winner: Option<Color> },
}

/// Boxed listener invoked synchronously for each event.
pub type Listener = Box<dyn FnMut(&GameEvent) + Send>;

/// Ordered registry of listeners attached to one live game.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            listeners: Vec::new(),
        }
    }

    /// Registers a listener. Listeners are called in subscription order.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Delivers an event to every listener, in order.
    pub fn emit(&mut self, event: &GameEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Clone for EventBus {
    /// Clones start empty: copies and snapshots never inherit listeners.
    fn clone(&self) -> Self {
        EventBus::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventBus({} listeners)", self.listeners.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;
    use std::sync::mpsc;

    #[test]
    fn test_delivery_order() {
        let (tx, rx) = mpsc::channel();
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(move |event| {
            if let GameEvent::MoveMade { mv } = event {
                tx.send(mv.number).unwrap();
            }
        }));

        for number in 1..=3 {
            let mut mv = Move::place(Color::Black, Point::new(0, number));
            mv.number = number;
            bus.emit(&GameEvent::MoveMade { mv });
        }

        let seen: Vec<usize> = rx.try_iter().collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_clone_drops_listeners() {
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(|_| {}));
        assert_eq!(bus.listener_count(), 1);
        let copy = bus.clone();
        assert_eq!(copy.listener_count(), 0);
    }
}
