//! Enemy definitions - static enemy data.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier of an enemy definition (e.g. `"slime"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(pub String);

impl EnemyId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnemyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyActionType {
    /// Damage the party.
    Attack,
    /// Gain defense.
    Defend,
    Buff,
    Special,
}

fn default_weight() -> f32 {
    1.0
}

/// One entry of an enemy's action pattern.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyAction {
    pub action_type: EnemyActionType,

    /// Magnitude (damage dealt, defense gained, ...).
    pub value: i32,

    /// Relative selection weight, used only by `IntentPolicy::Weighted`.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl EnemyAction {
    /// Create an action with weight 1.
    #[must_use]
    pub fn new(action_type: EnemyActionType, value: i32) -> Self {
        Self {
            action_type,
            value,
            weight: 1.0,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// Static enemy definition.
///
/// ```
/// use roguedeck::enemies::{EnemyAction, EnemyActionType, EnemyDefinition};
///
/// let slime = EnemyDefinition::new("slime", "Slime", 12)
///     .with_action(EnemyAction::new(EnemyActionType::Attack, 5))
///     .with_action(EnemyAction::new(EnemyActionType::Defend, 3))
///     .with_gold(8);
///
/// assert_eq!(slime.pattern.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub max_hp: i32,

    /// Base attack stat. Attack actions use their own value.
    #[serde(default)]
    pub attack: i32,

    /// Base defense stat. Instances always enter combat with 0 defense.
    #[serde(default)]
    pub defense: i32,

    /// Actions the enemy picks its intents from.
    pub pattern: SmallVec<[EnemyAction; 4]>,

    /// Gold awarded when this enemy is defeated.
    #[serde(default)]
    pub gold: u32,
}

impl EnemyDefinition {
    #[must_use]
    pub fn new(id: impl Into<EnemyId>, name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_hp,
            attack: 0,
            defense: 0,
            pattern: SmallVec::new(),
            gold: 0,
        }
    }

    /// Append an action to the pattern.
    #[must_use]
    pub fn with_action(mut self, action: EnemyAction) -> Self {
        self.pattern.push(action);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, attack: i32, defense: i32) -> Self {
        self.attack = attack;
        self.defense = defense;
        self
    }

    #[must_use]
    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    /// Selection weights of the pattern, in order.
    #[must_use]
    pub fn weights(&self) -> SmallVec<[f32; 4]> {
        self.pattern.iter().map(|a| a.weight).collect()
    }
}

impl From<String> for EnemyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
