//! Ready-made content for demos, tests and benchmarks.
//!
//! Real games load their catalogs from data files
//! ([`CardCatalog::from_json`](crate::cards::CardCatalog::from_json)); this
//! module builds a small set in code so a battle can be set up in one line.

mod starter;

pub use starter::{
    starter_card_definitions, starter_cards, starter_enemies, starter_enemy_definitions,
    warrior_starter_deck,
};
