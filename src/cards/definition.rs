//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: cost, type,
//! and the effect value at base and upgraded tier. For example "Strike"
//! costs 1 and deals 6 damage (9 upgraded).
//!
//! Per-battle state (upgraded flag, owner) lives in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CharacterClass;

/// Placeholder in description templates replaced by the tier value.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Identifier of a card definition (e.g. `"warrior_strike"`).
///
/// This identifies the kind of card, not a specific copy in a battle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Defend,
    Skill,
    Support,
}

impl CardType {
    /// Check if playing this card needs an enemy target.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(self, CardType::Attack)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

/// Kind of a secondary card effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    Damage,
    Block,
    Draw,
    Strength,
    Vulnerable,
    Weak,
    Poison,
}

/// Who a secondary effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    Enemy,
    AllEnemies,
    #[serde(rename = "Self")]
    Self_,
    Ally,
    AllAllies,
}

/// A secondary effect attached to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffect {
    pub effect_type: EffectType,
    pub value: i32,
    #[serde(default)]
    pub target: Option<TargetType>,
}

impl CardEffect {
    #[must_use]
    pub const fn new(effect_type: EffectType, value: i32) -> Self {
        Self {
            effect_type,
            value,
            target: None,
        }
    }

    #[must_use]
    pub fn targeting(mut self, target: TargetType) -> Self {
        self.target = Some(target);
        self
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use roguedeck::cards::{CardDefinition, CardType};
/// use roguedeck::core::CharacterClass;
///
/// let strike = CardDefinition::new("warrior_strike", "Strike", CharacterClass::Warrior, CardType::Attack)
///     .with_cost(1)
///     .with_values(6, 9)
///     .with_description("Deal {value} damage.");
///
/// assert_eq!(strike.value(false), 6);
/// assert_eq!(strike.description(true), "Deal 9 damage.");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Template text; `{value}` is replaced by the tier value.
    #[serde(default)]
    pub description: String,

    /// Class that owns this card.
    pub class: CharacterClass,

    pub card_type: CardType,

    /// Mana cost.
    pub cost: u32,

    #[serde(default)]
    pub rarity: CardRarity,

    /// Effect magnitude before upgrade.
    pub base_value: i32,

    /// Effect magnitude after upgrade.
    pub upgraded_value: i32,

    /// Secondary effects, in resolution order.
    #[serde(default)]
    pub effects: SmallVec<[CardEffect; 2]>,
}

impl CardDefinition {
    /// Create a zero-cost, zero-value definition.
    #[must_use]
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        class: CharacterClass,
        card_type: CardType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            class,
            card_type,
            cost: 0,
            rarity: CardRarity::Common,
            base_value: 0,
            upgraded_value: 0,
            effects: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set base and upgraded values.
    #[must_use]
    pub fn with_values(mut self, base: i32, upgraded: i32) -> Self {
        self.base_value = base;
        self.upgraded_value = upgraded;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: CardRarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a secondary effect.
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Effect value at the given tier.
    #[must_use]
    pub fn value(&self, upgraded: bool) -> i32 {
        if upgraded {
            self.upgraded_value
        } else {
            self.base_value
        }
    }

    /// Description text with `{value}` filled in.
    #[must_use]
    pub fn description(&self, upgraded: bool) -> String {
        self.description
            .replace(VALUE_PLACEHOLDER, &self.value(upgraded).to_string())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
