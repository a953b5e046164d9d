//! Card locations during a battle.
//!
//! ## Key Types
//!
//! - `CardZones`: Draw pile, hand and discard pile with drawing and
//!   reshuffling

pub mod manager;

pub use manager::CardZones;
