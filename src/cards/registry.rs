//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition loaded at startup and
//! hands out shared references to them. It is never mutated once a battle
//! starts.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use super::definition::{CardDefinition, CardId};
use super::instance::CardInstance;
use crate::core::EntityId;
use crate::error::DataError;

/// Catalog of card definitions keyed by identifier.
///
/// ## Example
///
/// ```
/// use roguedeck::cards::{CardCatalog, CardDefinition, CardId, CardType};
/// use roguedeck::core::{CharacterClass, EntityId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(
///     CardDefinition::new("warrior_strike", "Strike", CharacterClass::Warrior, CardType::Attack)
///         .with_cost(1)
///         .with_values(6, 9),
/// ).unwrap();
///
/// let card = catalog.instantiate(&CardId::new("warrior_strike"), EntityId(7)).unwrap();
/// assert_eq!(card.value(), 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, DataError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.register(definition)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let definitions: Vec<CardDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Load a catalog from a bincode blob written by [`to_bincode`].
    ///
    /// [`to_bincode`]: CardCatalog::to_bincode
    pub fn from_bincode(bytes: &[u8]) -> Result<Self, DataError> {
        let definitions: Vec<CardDefinition> = bincode::deserialize(bytes)?;
        Self::from_definitions(definitions)
    }

    /// Encode every definition, sorted by identifier.
    pub fn to_bincode(&self) -> Result<Vec<u8>, DataError> {
        let mut definitions: Vec<&CardDefinition> =
            self.cards.values().map(Arc::as_ref).collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(bincode::serialize(&definitions)?)
    }

    /// Register a card definition.
    ///
    /// Fails if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), DataError> {
        if self.cards.contains_key(&card.id) {
            warn!(card = %card.id, "duplicate card definition");
            return Err(DataError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id.clone(), Arc::new(card));
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(id)
    }

    /// Get a card definition by ID, or a data error naming it.
    pub fn require(&self, id: &CardId) -> Result<&Arc<CardDefinition>, DataError> {
        self.get(id).ok_or_else(|| {
            warn!(card = %id, "card missing from catalog");
            DataError::UnknownCard(id.clone())
        })
    }

    /// Create a fresh copy of a card.
    pub fn instantiate(&self, id: &CardId, entity_id: EntityId) -> Result<CardInstance, DataError> {
        let definition = self.require(id)?;
        Ok(CardInstance::new(entity_id, Arc::clone(definition)))
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().map(Arc::as_ref)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }
}
