//! Card system: definitions, instances, and catalog.
//!
//! ## Key Types
//!
//! - `CardId`: String identifier of a card definition
//! - `CardDefinition`: Static card data (cost, type, base/upgraded value)
//! - `CardInstance`: One copy in a battle, with its upgrade flag
//! - `CardCatalog`: Load-once definition lookup
//!
//! Definitions are shared behind `Arc`, so a deck of thirty copies of the
//! same card holds one definition.

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{
    CardDefinition, CardEffect, CardId, CardRarity, CardType, EffectType, TargetType,
};
pub use instance::CardInstance;
pub use registry::CardCatalog;
