//! Notification system.
//!
//! The combat core talks to the outside world only through events:
//!
//! - [`CombatEvent`]: what happened (phase changes, mana, HP, cards, intents)
//! - [`EventQueue`]: where components put events as they mutate state
//! - [`EventBus`]: registered [`CombatObserver`]s that receive them
//!
//! ## Design Philosophy
//!
//! Components never hold references to each other or to observers. A
//! component that changes state pushes an event into the queue it was given;
//! the session drains that queue, runs its own reactions (refill mana on
//! `PlayerTurnStarted`, draw cards, ...) and then publishes to observers.
//! Delivery is synchronous, in emission order, and one-way.

mod bus;
mod event;
mod queue;

pub use bus::{CombatObserver, EventBus, ObserverId};
pub use event::{CombatEvent, EventKind, Outcome};
pub use queue::EventQueue;
