//! Error types for combat operations.
//!
//! Two families of failure exist:
//!
//! - [`IllegalAction`]: the caller asked for something the rules forbid right
//!   now (wrong phase, not enough mana, dead target). Rejected with no state
//!   change; the UI shows a rejection and the battle goes on.
//! - [`DataError`]: a catalog or roster is missing something the operation
//!   needs. Logged and the operation aborts; existing state is untouched and
//!   no default numbers are substituted.
//!
//! Redundant calls (upgrading twice, ending a turn twice) are not errors at
//! all. Those operations return `false` instead.

use thiserror::Error;

use crate::cards::CardId;
use crate::combat::TurnPhase;
use crate::core::{CharacterClass, EntityId};
use crate::enemies::EnemyId;

/// An action rejected by the combat rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    /// The action is not allowed in the current phase.
    #[error("not allowed during {phase:?}")]
    WrongPhase { phase: TurnPhase },

    /// The card costs more than the available mana.
    #[error("insufficient mana: cost {cost}, available {available}")]
    InsufficientMana { cost: u32, available: u32 },

    /// The card is not in the hand.
    #[error("{0} is not in hand")]
    CardNotInHand(EntityId),

    /// The card needs an enemy target and none was given.
    #[error("card requires a target")]
    TargetRequired,

    /// The target does not name an enemy in this battle.
    #[error("{0} is not a valid target")]
    UnknownTarget(EntityId),

    /// The target has already been defeated.
    #[error("{0} is already defeated")]
    TargetDefeated(EntityId),
}

/// Missing or malformed definition data.
#[derive(Debug, Error)]
pub enum DataError {
    /// No card definition with this identifier.
    #[error("unknown card: {0}")]
    UnknownCard(CardId),

    /// No enemy definition with this identifier.
    #[error("unknown enemy: {0}")]
    UnknownEnemy(EnemyId),

    /// The enemy has no actions to choose from.
    #[error("enemy {0} has an empty action pattern")]
    EmptyActionPattern(EnemyId),

    /// The enemy was asked to act with no intent decided.
    #[error("{0} has no pending intent")]
    NoPendingIntent(EntityId),

    /// No starting stats are known for this class.
    #[error("no starting stats for class {0:?}")]
    UnknownClass(CharacterClass),

    /// The party roster is already at capacity.
    #[error("party is full ({0} members)")]
    PartyFull(usize),

    /// Two card definitions share an identifier.
    #[error("card {0} already registered")]
    DuplicateCard(CardId),

    /// Two enemy definitions share an identifier.
    #[error("enemy {0} already registered")]
    DuplicateEnemy(EnemyId),

    /// An action weight is negative or not a number.
    #[error("enemy {enemy} has invalid action weight {weight}")]
    InvalidWeight { enemy: EnemyId, weight: f32 },

    /// An enemy definition with no HP to lose.
    #[error("enemy {enemy} has non-positive max HP {hp}")]
    InvalidHp { enemy: EnemyId, hp: i32 },

    /// A battle was set up with no enemies to fight.
    #[error("encounter has no enemies")]
    EmptyEncounter,

    /// JSON definition data failed to parse.
    #[error("malformed JSON definitions: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary definition data failed to decode.
    #[error("malformed binary definitions: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Any failure surfaced by the combat core.
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

impl CombatError {
    /// Check if this is a rules rejection rather than a data fault.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        matches!(self, CombatError::Illegal(_))
    }

    /// The rules rejection, if this is one.
    #[must_use]
    pub fn as_illegal(&self) -> Option<&IllegalAction> {
        match self {
            CombatError::Illegal(illegal) => Some(illegal),
            CombatError::Data(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_conversion() {
        let err: CombatError = IllegalAction::TargetRequired.into();
        assert!(err.is_illegal());
        assert_eq!(err.as_illegal(), Some(&IllegalAction::TargetRequired));
    }

    #[test]
    fn test_data_conversion() {
        let err: CombatError = DataError::UnknownCard(CardId::new("missing")).into();
        assert!(!err.is_illegal());
        assert_eq!(err.to_string(), "data error: unknown card: missing");
    }

    #[test]
    fn test_insufficient_mana_message() {
        let err = IllegalAction::InsufficientMana { cost: 3, available: 1 };
        assert_eq!(err.to_string(), "insufficient mana: cost 3, available 1");
    }
}
