//! Card instances - runtime card state.
//!
//! A `CardInstance` is one copy of a card in a battle. It shares its
//! definition with every other copy through an `Arc` and adds the only
//! mutable bit a card has: whether it has been upgraded.

use std::sync::Arc;

use tracing::debug;

use super::definition::{CardDefinition, CardId, CardType};
use crate::core::{CharacterClass, EntityId};

/// A card in a battle.
#[derive(Clone, Debug, PartialEq)]
pub struct CardInstance {
    /// Unique entity ID for this copy.
    pub entity_id: EntityId,

    /// Shared, read-only definition.
    pub definition: Arc<CardDefinition>,

    upgraded: bool,

    /// Class that brought this card into the deck.
    pub owner: CharacterClass,
}

impl CardInstance {
    /// Create an un-upgraded copy owned by the definition's class.
    #[must_use]
    pub fn new(entity_id: EntityId, definition: Arc<CardDefinition>) -> Self {
        let owner = definition.class;
        Self {
            entity_id,
            definition,
            upgraded: false,
            owner,
        }
    }

    /// Set a different owner class.
    #[must_use]
    pub fn with_owner(mut self, owner: CharacterClass) -> Self {
        self.owner = owner;
        self
    }

    /// Upgrade this copy.
    ///
    /// Returns false if it was already upgraded; the value never changes
    /// after the first call.
    pub fn upgrade(&mut self) -> bool {
        if self.upgraded {
            debug!(card = %self.entity_id, "card already upgraded");
            return false;
        }
        self.upgraded = true;
        true
    }

    #[must_use]
    pub fn is_upgraded(&self) -> bool {
        self.upgraded
    }

    /// Effect value at this copy's tier.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.definition.value(self.upgraded)
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.definition.cost
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.definition.card_type
    }

    #[must_use]
    pub fn card_id(&self) -> &CardId {
        &self.definition.id
    }

    /// Description text at this copy's tier.
    #[must_use]
    pub fn description(&self) -> String {
        self.definition.description(self.upgraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bash() -> Arc<CardDefinition> {
        Arc::new(
            CardDefinition::new("warrior_bash", "Bash", CharacterClass::Warrior, CardType::Attack)
                .with_cost(2)
                .with_values(8, 10),
        )
    }

    #[test]
    fn test_card_instance_new() {
        let card = CardInstance::new(EntityId(10), bash());

        assert_eq!(card.entity_id, EntityId(10));
        assert_eq!(card.owner, CharacterClass::Warrior);
        assert_eq!(card.cost(), 2);
        assert_eq!(card.value(), 8);
        assert!(!card.is_upgraded());
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let mut card = CardInstance::new(EntityId(10), bash());

        assert!(card.upgrade());
        assert_eq!(card.value(), 10);

        assert!(!card.upgrade());
        assert!(!card.upgrade());
        assert_eq!(card.value(), 10);
    }

    #[test]
    fn test_copies_share_definition() {
        let def = bash();
        let a = CardInstance::new(EntityId(1), Arc::clone(&def));
        let b = CardInstance::new(EntityId(2), def).with_owner(CharacterClass::Mage);

        assert!(Arc::ptr_eq(&a.definition, &b.definition));
        assert_eq!(b.owner, CharacterClass::Mage);
    }
}
