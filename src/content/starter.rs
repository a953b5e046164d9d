//! Starter content: the warrior's and mage's basic cards and two early
//! enemies.

use crate::cards::{CardCatalog, CardDefinition, CardEffect, CardRarity, CardType, EffectType, TargetType};
use crate::core::CharacterClass;
use crate::enemies::{EnemyAction, EnemyActionType, EnemyCatalog, EnemyDefinition};

/// Every starter card definition.
#[must_use]
pub fn starter_card_definitions() -> Vec<CardDefinition> {
    vec![
        CardDefinition::new("warrior_strike", "Strike", CharacterClass::Warrior, CardType::Attack)
            .with_cost(1)
            .with_values(6, 9)
            .with_description("Deal {value} damage."),
        CardDefinition::new("warrior_defend", "Defend", CharacterClass::Warrior, CardType::Defend)
            .with_cost(1)
            .with_values(5, 8)
            .with_description("Gain {value} block."),
        CardDefinition::new("warrior_bash", "Bash", CharacterClass::Warrior, CardType::Attack)
            .with_cost(2)
            .with_values(8, 10)
            .with_rarity(CardRarity::Uncommon)
            .with_description("Deal {value} damage. Apply 2 Vulnerable.")
            .with_effect(CardEffect::new(EffectType::Vulnerable, 2).targeting(TargetType::Enemy)),
        CardDefinition::new("mage_spark", "Spark", CharacterClass::Mage, CardType::Attack)
            .with_cost(0)
            .with_values(3, 5)
            .with_description("Deal {value} damage."),
        CardDefinition::new("mage_focus", "Focus", CharacterClass::Mage, CardType::Skill)
            .with_cost(1)
            .with_description("Draw 2 cards.")
            .with_effect(CardEffect::new(EffectType::Draw, 2).targeting(TargetType::Self_)),
    ]
}

/// Catalog holding [`starter_card_definitions`].
#[must_use]
pub fn starter_cards() -> CardCatalog {
    let mut catalog = CardCatalog::new();
    for card in starter_card_definitions() {
        // Starter ids are distinct, so registration cannot collide.
        let _ = catalog.register(card);
    }
    catalog
}

/// Every starter enemy definition.
#[must_use]
pub fn starter_enemy_definitions() -> Vec<EnemyDefinition> {
    vec![
        EnemyDefinition::new("slime", "Slime", 12)
            .with_stats(5, 0)
            .with_action(EnemyAction::new(EnemyActionType::Attack, 5))
            .with_action(EnemyAction::new(EnemyActionType::Defend, 3))
            .with_gold(8),
        EnemyDefinition::new("goblin", "Goblin", 20)
            .with_stats(7, 1)
            .with_action(EnemyAction::new(EnemyActionType::Attack, 7).with_weight(2.0))
            .with_action(EnemyAction::new(EnemyActionType::Defend, 4))
            .with_action(EnemyAction::new(EnemyActionType::Buff, 2).with_weight(0.5))
            .with_gold(12),
    ]
}

/// Catalog holding [`starter_enemy_definitions`].
#[must_use]
pub fn starter_enemies() -> EnemyCatalog {
    let mut catalog = EnemyCatalog::new();
    for enemy in starter_enemy_definitions() {
        let _ = catalog.register(enemy);
    }
    catalog
}

/// The warrior's opening deck: five Strikes, four Defends and a Bash.
#[must_use]
pub fn warrior_starter_deck() -> Vec<&'static str> {
    let mut deck = vec!["warrior_strike"; 5];
    deck.extend(["warrior_defend"; 4]);
    deck.push("warrior_bash");
    deck
}
