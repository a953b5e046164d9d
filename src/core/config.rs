//! Combat configuration.
//!
//! Every tunable number of the combat loop lives in `CombatConfig`. The
//! defaults reproduce the standard rules (3 base mana plus one per party
//! member, 5-card opening hand, 3 draws per turn). Sessions copy the config
//! at construction, so changing it never affects a running battle.

use serde::{Deserialize, Serialize};

use crate::enemies::{BlockExpiry, IntentPolicy};

/// Fixed part of the shared mana pool, before party members are counted.
pub const BASE_MANA: u32 = 3;

/// Hard ceiling for permanent mana capacity increases.
pub const MANA_CEILING: u32 = 10;

/// Cards drawn on the first player turn.
pub const OPENING_HAND: usize = 5;

/// Cards drawn on every later player turn.
pub const DRAW_PER_TURN: usize = 3;

/// Largest hand a player may hold.
pub const MAX_HAND_SIZE: usize = 10;

/// Largest party that can enter a battle.
pub const MAX_PARTY_SIZE: usize = 3;

/// Tunables for one combat session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Mana pool before party members are counted (`max = base_mana + party`).
    pub base_mana: u32,

    /// Upper bound for `increase_capacity`. `None` for uncapped.
    pub mana_ceiling: Option<u32>,

    /// Cards drawn at the start of turn 1.
    pub opening_hand: usize,

    /// Cards drawn at the start of every later player turn.
    pub draw_per_turn: usize,

    /// Draws stop once the hand holds this many cards.
    pub max_hand_size: usize,

    /// Roster capacity.
    pub max_party_size: usize,

    /// How enemies pick their next action.
    pub intent_policy: IntentPolicy,

    /// When enemy defense from a Defend action is cleared.
    pub enemy_block_expiry: BlockExpiry,

    /// Resolve the enemy turn inside `end_player_turn`.
    ///
    /// When false, the phase rests at `EnemyTurn` until the caller asks the
    /// session to resolve it (useful for animating enemy actions).
    pub auto_resolve_enemy_turn: bool,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_mana: BASE_MANA,
            mana_ceiling: Some(MANA_CEILING),
            opening_hand: OPENING_HAND,
            draw_per_turn: DRAW_PER_TURN,
            max_hand_size: MAX_HAND_SIZE,
            max_party_size: MAX_PARTY_SIZE,
            intent_policy: IntentPolicy::default(),
            enemy_block_expiry: BlockExpiry::default(),
            auto_resolve_enemy_turn: true,
        }
    }
}

impl CombatConfig {
    /// Create a config with the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::error::DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the base mana pool.
    #[must_use]
    pub fn with_base_mana(mut self, base: u32) -> Self {
        self.base_mana = base;
        self
    }

    /// Set (or remove) the mana capacity ceiling.
    #[must_use]
    pub fn with_mana_ceiling(mut self, ceiling: Option<u32>) -> Self {
        self.mana_ceiling = ceiling;
        self
    }

    /// Set opening hand and per-turn draw counts.
    #[must_use]
    pub fn with_draws(mut self, opening_hand: usize, per_turn: usize) -> Self {
        self.opening_hand = opening_hand;
        self.draw_per_turn = per_turn;
        self
    }

    /// Set the hand size limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, max: usize) -> Self {
        self.max_hand_size = max;
        self
    }

    /// Set the roster capacity.
    #[must_use]
    pub fn with_max_party_size(mut self, max: usize) -> Self {
        self.max_party_size = max;
        self
    }

    /// Set the enemy intent policy.
    #[must_use]
    pub fn with_intent_policy(mut self, policy: IntentPolicy) -> Self {
        self.intent_policy = policy;
        self
    }

    /// Set when enemy defense expires.
    #[must_use]
    pub fn with_enemy_block_expiry(mut self, expiry: BlockExpiry) -> Self {
        self.enemy_block_expiry = expiry;
        self
    }

    /// Leave the enemy turn for the caller to resolve.
    #[must_use]
    pub fn manual_enemy_turn(mut self) -> Self {
        self.auto_resolve_enemy_turn = false;
        self
    }
}
