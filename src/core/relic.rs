//! Relics carried into battle.

use serde::{Deserialize, Serialize};

/// A passive item held by the party.
///
/// Only `MaxManaPlus1` and `ExtraDrawOnTurnStart` change combat rules.
/// The rest are carried through so callers can display them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relic {
    StartingManaPlus1,
    ExtraDrawOnTurnStart,
    ThornsDamage,
    GoldBonus,
    MaxManaPlus1,
}

impl Relic {
    /// Permanent mana capacity granted at combat start.
    #[must_use]
    pub const fn bonus_capacity(self) -> u32 {
        match self {
            Relic::MaxManaPlus1 => 1,
            _ => 0,
        }
    }

    /// Extra cards drawn at the start of each player turn.
    #[must_use]
    pub const fn bonus_draws(self) -> usize {
        match self {
            Relic::ExtraDrawOnTurnStart => 1,
            _ => 0,
        }
    }

    /// Check if the combat core applies this relic.
    #[must_use]
    pub const fn has_combat_effect(self) -> bool {
        self.bonus_capacity() > 0 || self.bonus_draws() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relic_bonuses() {
        assert_eq!(Relic::MaxManaPlus1.bonus_capacity(), 1);
        assert_eq!(Relic::ExtraDrawOnTurnStart.bonus_draws(), 1);
        assert_eq!(Relic::GoldBonus.bonus_capacity(), 0);
        assert!(!Relic::ThornsDamage.has_combat_effect());
        assert!(Relic::MaxManaPlus1.has_combat_effect());
    }
}
