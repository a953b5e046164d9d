//! Enemies: definitions, per-battle instances, the catalog, and intents.
//!
//! ## Key Types
//!
//! - `EnemyDefinition`: Static stats and a weighted action pattern
//! - `EnemyInstance`: HP, defense, and the pending intent in one battle
//! - `EnemyCatalog`: Load-once definition lookup
//! - `IntentSelector`: Picks and executes intents

pub mod definition;
pub mod instance;
pub mod intent;
pub mod registry;

pub use definition::{EnemyAction, EnemyActionType, EnemyDefinition, EnemyId};
pub use instance::{BlockExpiry, EnemyInstance};
pub use intent::{IntentPolicy, IntentSelector};
pub use registry::EnemyCatalog;
