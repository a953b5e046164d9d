//! Enemy instances - per-battle enemy state.
//!
//! ## Damage Model
//!
//! Incoming damage is netted against current defense, and what remains comes
//! off HP (clamped at 0). Defense is not consumed by the hit. It stays until
//! the enemy's own action cycle clears it (see [`BlockExpiry`]).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::definition::{EnemyAction, EnemyDefinition};
use crate::core::EntityId;
use crate::events::{CombatEvent, EventQueue};

/// When defense gained from a Defend action is cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockExpiry {
    /// Cleared at the end of every action the enemy executes, including the
    /// Defend action that granted it.
    #[default]
    EndOfOwnAction,

    /// Cleared when the enemy starts its next action, so Defend protects it
    /// through the following player turn.
    StartOfOwnAction,
}

/// An enemy in a battle.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyInstance {
    pub entity_id: EntityId,
    pub definition: Arc<EnemyDefinition>,
    current_hp: i32,
    current_defense: i32,
    intent: Option<EnemyAction>,
}

impl EnemyInstance {
    /// Create an enemy at full HP with no defense and no intent yet.
    #[must_use]
    pub fn new(entity_id: EntityId, definition: Arc<EnemyDefinition>) -> Self {
        let current_hp = definition.max_hp.max(0);
        Self {
            entity_id,
            definition,
            current_hp,
            current_defense: 0,
            intent: None,
        }
    }

    #[must_use]
    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.definition.max_hp
    }

    #[must_use]
    pub fn current_defense(&self) -> i32 {
        self.current_defense
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// The action this enemy will take next, if decided.
    #[must_use]
    pub fn intent(&self) -> Option<&EnemyAction> {
        self.intent.as_ref()
    }

    pub(crate) fn set_intent(&mut self, action: EnemyAction) {
        self.intent = Some(action);
    }

    pub(crate) fn take_intent(&mut self) -> Option<EnemyAction> {
        self.intent.take()
    }

    /// Apply incoming damage. Returns the HP lost.
    ///
    /// No-op for non-positive amounts and for enemies already defeated.
    pub fn take_damage(&mut self, amount: i32, events: &mut EventQueue) -> i32 {
        if amount <= 0 || !self.is_alive() {
            return 0;
        }

        let effective = (amount - self.current_defense).max(0);
        let lost = effective.min(self.current_hp);
        self.current_hp -= lost;

        debug!(
            enemy = %self.entity_id,
            amount,
            defense = self.current_defense,
            lost,
            hp = self.current_hp,
            "enemy took damage"
        );

        events.push(CombatEvent::HpChanged {
            entity: self.entity_id,
            current: self.current_hp,
            max: self.max_hp(),
        });

        if self.current_hp == 0 {
            debug!(enemy = %self.entity_id, name = %self.definition.name, "enemy defeated");
            events.push(CombatEvent::Defeated {
                entity: self.entity_id,
            });
        }

        lost
    }

    /// Gain defense. Non-positive amounts are ignored.
    pub fn add_defense(&mut self, amount: i32, events: &mut EventQueue) {
        if amount <= 0 {
            return;
        }
        self.current_defense = self.current_defense.saturating_add(amount);
        events.push(CombatEvent::DefenseChanged {
            entity: self.entity_id,
            defense: self.current_defense,
        });
    }

    /// Drop all defense.
    pub fn reset_defense(&mut self, events: &mut EventQueue) {
        if self.current_defense == 0 {
            return;
        }
        self.current_defense = 0;
        events.push(CombatEvent::DefenseChanged {
            entity: self.entity_id,
            defense: 0,
        });
    }
}
