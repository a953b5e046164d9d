//! The shared mana pool.
//!
//! `current` never exceeds `max` and never goes below zero. Every call that
//! changes either value emits `ManaChanged { current, max }`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{CombatEvent, EventQueue};

/// Current and maximum mana for the party.
///
/// ```
/// use roguedeck::combat::ManaLedger;
/// use roguedeck::events::EventQueue;
///
/// let mut mana = ManaLedger::new(3, Some(10));
/// let mut events = EventQueue::new();
///
/// mana.set_capacity(1, &mut events);
/// mana.refill(&mut events);
/// assert!(mana.try_spend(3, &mut events));
/// assert!(!mana.try_spend(2, &mut events));
/// assert_eq!((mana.current(), mana.max()), (1, 4));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaLedger {
    current: u32,
    max: u32,
    base: u32,
    ceiling: Option<u32>,
}

impl ManaLedger {
    /// Create an empty ledger. `base` is the pool before party members are
    /// counted; `ceiling` caps [`increase_capacity`](Self::increase_capacity).
    #[must_use]
    pub fn new(base: u32, ceiling: Option<u32>) -> Self {
        Self {
            current: 0,
            max: 0,
            base,
            ceiling,
        }
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn can_afford(&self, amount: u32) -> bool {
        amount <= self.current
    }

    fn changed(&self, events: &mut EventQueue) {
        debug!(current = self.current, max = self.max, "mana changed");
        events.push(CombatEvent::ManaChanged {
            current: self.current,
            max: self.max,
        });
    }

    /// Size the pool for a party: `max = base + party_size`.
    ///
    /// `current` is clamped to the new maximum but not refilled.
    pub fn set_capacity(&mut self, party_size: usize, events: &mut EventQueue) {
        let party = u32::try_from(party_size).unwrap_or(u32::MAX);
        self.max = self.base.saturating_add(party);
        self.current = self.current.min(self.max);
        self.changed(events);
    }

    /// Fill the pool to its maximum.
    pub fn refill(&mut self, events: &mut EventQueue) {
        self.current = self.max;
        self.changed(events);
    }

    /// Spend mana if enough is available.
    ///
    /// Returns false and changes nothing when `amount > current`.
    pub fn try_spend(&mut self, amount: u32, events: &mut EventQueue) -> bool {
        if !self.can_afford(amount) {
            debug!(amount, current = self.current, "not enough mana");
            return false;
        }
        self.current -= amount;
        self.changed(events);
        true
    }

    /// Add mana without exceeding the maximum.
    pub fn grant(&mut self, amount: u32, events: &mut EventQueue) {
        self.current = self.current.saturating_add(amount).min(self.max);
        self.changed(events);
    }

    /// Permanently raise the maximum, up to the ceiling.
    ///
    /// Does not refill. Returns how much the maximum actually grew.
    pub fn increase_capacity(&mut self, amount: u32, events: &mut EventQueue) -> u32 {
        let target = self.max.saturating_add(amount);
        let new_max = match self.ceiling {
            Some(ceiling) => target.min(ceiling.max(self.max)),
            None => target,
        };
        let grown = new_max - self.max;
        self.max = new_max;
        self.changed(events);
        grown
    }
}
