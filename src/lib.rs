//! # roguedeck
//!
//! The combat turn engine of a turn-based deckbuilding roguelike: card play,
//! a shared mana pool, enemy intents, and strict alternation of player and
//! enemy turns.
//!
//! ## Design Principles
//!
//! 1. **One authoritative phase**: A battle is always in exactly one
//!    `TurnPhase`. Cards are played only in `PlayerTurn`, enemies act only in
//!    `EnemyTurn`, and `Victory`/`Defeat` are final.
//!
//! 2. **Atomic accept/reject**: An illegal action (wrong phase, not enough
//!    mana, dead target) is rejected before anything changes.
//!
//! 3. **Explicit session, no globals**: All battle state lives in a
//!    `CombatSession` built from catalogs and a party. There are no
//!    singletons; two sessions never share mutable state.
//!
//! 4. **One-way notifications**: Components emit `CombatEvent`s. Observers
//!    (usually the UI) receive them synchronously, in order, and cannot
//!    reach back into the battle.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, party, relics
//! - `cards`: Card definitions, instances, and catalog
//! - `enemies`: Enemy definitions, instances, catalog, and intent selection
//! - `events`: Combat events, the event queue, and observers
//! - `zones`: Draw pile, hand, and discard pile
//! - `effects`: Card effect resolution
//! - `combat`: Turn controller, mana ledger, and the combat session
//! - `content`: A small starter set of cards and enemies
//! - `error`: Error taxonomy
//!
//! ## Quick Start
//!
//! ```
//! use roguedeck::{content, CharacterClass, CombatSession, PartyMember, TurnPhase};
//!
//! let cards = content::starter_cards();
//! let enemies = content::starter_enemies();
//!
//! let mut session = CombatSession::builder(&cards, &enemies)
//!     .member(PartyMember::recruit(CharacterClass::Warrior).unwrap())
//!     .deck(content::warrior_starter_deck())
//!     .enemy("slime")
//!     .build()
//!     .unwrap();
//!
//! session.start_combat();
//! session.end_player_turn().unwrap();
//!
//! assert_eq!(session.phase(), TurnPhase::PlayerTurn);
//! assert_eq!(session.turn(), 2);
//! ```

pub mod cards;
pub mod combat;
pub mod content;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod error;
pub mod events;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CharacterClass, CombatConfig, EntityId, GameRng, Party, PartyMember, Relic,
};

pub use crate::cards::{
    CardCatalog, CardDefinition, CardEffect, CardId, CardInstance, CardRarity, CardType,
    EffectType, TargetType,
};

pub use crate::enemies::{
    BlockExpiry, EnemyAction, EnemyActionType, EnemyCatalog, EnemyDefinition, EnemyId,
    EnemyInstance, IntentPolicy, IntentSelector,
};

pub use crate::events::{CombatEvent, CombatObserver, EventBus, EventKind, EventQueue, ObserverId, Outcome};

pub use crate::zones::CardZones;

pub use crate::effects::{CardResolution, EffectContext, EffectHandler, EffectResolver, UnimplementedEffects};

pub use crate::combat::{
    CombatSession, CombatSessionBuilder, CombatSummary, ManaLedger, TurnController, TurnPhase,
};

pub use crate::error::{CombatError, DataError, IllegalAction};
