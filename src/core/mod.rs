//! Core types shared by every subsystem: entity ids, RNG, configuration,
//! the party roster, and relics.

pub mod config;
pub mod entity;
pub mod party;
pub mod relic;
pub mod rng;

pub use config::CombatConfig;
pub use entity::EntityId;
pub use party::{CharacterClass, Party, PartyMember};
pub use relic::Relic;
pub use rng::GameRng;
