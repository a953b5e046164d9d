//! Combat notifications.
//!
//! Every state change the presentation layer cares about is described by a
//! `CombatEvent`. Components push events into an [`EventQueue`] as they
//! mutate state; the session delivers them to observers in emission order.
//!
//! [`EventQueue`]: super::EventQueue

use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::enemies::EnemyAction;

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// A notification emitted by the combat core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    // === Turn lifecycle ===
    /// A battle began. Always followed by `PlayerTurnStarted { turn: 1 }`.
    CombatStarted,
    PlayerTurnStarted { turn: u32 },
    PlayerTurnEnded { turn: u32 },
    EnemyTurnStarted { turn: u32 },
    EnemyTurnEnded { turn: u32 },
    CombatEnded { outcome: Outcome },

    // === Resources ===
    /// The mana pool changed (every mutating ledger call emits this).
    ManaChanged { current: u32, max: u32 },
    /// The party's shared block pool changed.
    PartyBlockChanged { block: i32 },

    // === Combatants ===
    /// A combatant's HP changed. Party members and enemies alike.
    HpChanged { entity: EntityId, current: i32, max: i32 },
    /// An enemy's defense changed.
    DefenseChanged { entity: EntityId, defense: i32 },
    /// A combatant reached 0 HP.
    Defeated { entity: EntityId },

    // === Cards ===
    CardDrawn { card: EntityId },
    CardPlayed { card: EntityId, target: Option<EntityId> },
    CardDiscarded { card: EntityId },

    // === Enemy intents ===
    /// An enemy picked its next action (shown to the player as its intent).
    IntentDecided { enemy: EntityId, action: EnemyAction },
    /// An enemy carried out its intent.
    EnemyActed { enemy: EntityId, action: EnemyAction },
}

/// Discriminant of a [`CombatEvent`], used to filter subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    CombatStarted,
    PlayerTurnStarted,
    PlayerTurnEnded,
    EnemyTurnStarted,
    EnemyTurnEnded,
    CombatEnded,
    ManaChanged,
    PartyBlockChanged,
    HpChanged,
    DefenseChanged,
    Defeated,
    CardDrawn,
    CardPlayed,
    CardDiscarded,
    IntentDecided,
    EnemyActed,
}

impl CombatEvent {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            CombatEvent::CombatStarted => EventKind::CombatStarted,
            CombatEvent::PlayerTurnStarted { .. } => EventKind::PlayerTurnStarted,
            CombatEvent::PlayerTurnEnded { .. } => EventKind::PlayerTurnEnded,
            CombatEvent::EnemyTurnStarted { .. } => EventKind::EnemyTurnStarted,
            CombatEvent::EnemyTurnEnded { .. } => EventKind::EnemyTurnEnded,
            CombatEvent::CombatEnded { .. } => EventKind::CombatEnded,
            CombatEvent::ManaChanged { .. } => EventKind::ManaChanged,
            CombatEvent::PartyBlockChanged { .. } => EventKind::PartyBlockChanged,
            CombatEvent::HpChanged { .. } => EventKind::HpChanged,
            CombatEvent::DefenseChanged { .. } => EventKind::DefenseChanged,
            CombatEvent::Defeated { .. } => EventKind::Defeated,
            CombatEvent::CardDrawn { .. } => EventKind::CardDrawn,
            CombatEvent::CardPlayed { .. } => EventKind::CardPlayed,
            CombatEvent::CardDiscarded { .. } => EventKind::CardDiscarded,
            CombatEvent::IntentDecided { .. } => EventKind::IntentDecided,
            CombatEvent::EnemyActed { .. } => EventKind::EnemyActed,
        }
    }

    /// Check if this is a turn-lifecycle event.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::CombatStarted
                | EventKind::PlayerTurnStarted
                | EventKind::PlayerTurnEnded
                | EventKind::EnemyTurnStarted
                | EventKind::EnemyTurnEnded
                | EventKind::CombatEnded
        )
    }
}
