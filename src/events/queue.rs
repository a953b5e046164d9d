//! FIFO buffer of pending notifications.

use std::collections::VecDeque;

use super::event::CombatEvent;

/// Events emitted by components but not yet delivered.
///
/// Components never call observers directly. They push here, and the owner
/// of the queue (normally the session) drains it in order.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<CombatEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: CombatEvent) {
        self.events.push_back(event);
    }

    /// Take the oldest event.
    pub fn pop(&mut self) -> Option<CombatEvent> {
        self.events.pop_front()
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        self.events.drain(..).collect()
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }
}
