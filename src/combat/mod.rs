//! The combat turn engine.
//!
//! - `TurnController`: phase state machine and turn counter
//! - `ManaLedger`: the party's shared mana pool
//! - `CombatSession`: one battle, wiring the controller, ledger, zones,
//!   enemies and observers together
//!
//! ## Turn Cycle
//!
//! ```text
//! start_combat()      CombatStarted, PlayerTurnStarted { turn: 1 }
//! play_card(..)*      CardPlayed, HpChanged, ...
//! end_player_turn()   PlayerTurnEnded, EnemyTurnStarted
//!   (enemy actions)   EnemyActed, IntentDecided, ...
//!                     EnemyTurnEnded, PlayerTurnStarted { turn: 2 }
//! ```
//!
//! The battle ends with `Victory` once every enemy is defeated (checked after
//! each card play) or `Defeat` once the party falls (checked after each
//! enemy action).

mod mana;
mod phase;
mod session;

pub use mana::ManaLedger;
pub use phase::{TurnController, TurnPhase};
pub use session::{CombatSession, CombatSessionBuilder, CombatSummary};
