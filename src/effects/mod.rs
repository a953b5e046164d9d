//! Effect system for played cards.
//!
//! - `EffectResolver`: applies a card's primary effect by card type
//! - `EffectHandler`: hook for the card's secondary effects
//! - `UnimplementedEffects`: the default hook, which only logs
//!
//! ## Design Philosophy
//!
//! The core gives numbers only to what the combat rules define: Attack
//! deals its value as damage and Defend grants its value as party block.
//! Draw, Strength, Vulnerable, Weak and Poison are content decisions, so
//! they are dispatched to a handler the game supplies.

mod resolver;

pub use resolver::{
    CardResolution, EffectContext, EffectHandler, EffectResolver, UnimplementedEffects,
};
