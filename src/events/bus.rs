//! Observer registry.
//!
//! The bus stores observers and delivers each published event to the ones
//! whose filter matches. Delivery is synchronous and one-way: observers
//! receive `&CombatEvent` and cannot reach back into combat state.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::event::{CombatEvent, EventKind};

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0)
    }
}

/// Something that wants to hear about combat events (usually UI).
pub trait CombatObserver {
    /// Called once per delivered event, in emission order.
    fn notify(&mut self, event: &CombatEvent);
}

impl<F> CombatObserver for F
where
    F: FnMut(&CombatEvent),
{
    fn notify(&mut self, event: &CombatEvent) {
        self(event)
    }
}

struct Subscription {
    /// `None` receives everything.
    kinds: Option<SmallVec<[EventKind; 4]>>,
    observer: Box<dyn CombatObserver>,
}

impl Subscription {
    fn wants(&self, kind: EventKind) -> bool {
        self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// Registry of observers.
///
/// ## Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use roguedeck::events::{CombatEvent, EventBus, EventKind};
///
/// let mut bus = EventBus::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// bus.subscribe_to(&[EventKind::ManaChanged], move |event: &CombatEvent| {
///     sink.borrow_mut().push(event.clone());
/// });
///
/// bus.publish(&CombatEvent::CombatStarted);
/// bus.publish(&CombatEvent::ManaChanged { current: 4, max: 4 });
///
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    subscriptions: FxHashMap<ObserverId, Subscription>,

    /// Subscription order; delivery follows it.
    order: Vec<ObserverId>,

    next_id: u32,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event.
    pub fn subscribe(&mut self, observer: impl CombatObserver + 'static) -> ObserverId {
        self.insert(None, Box::new(observer))
    }

    /// Subscribe to the listed event kinds only.
    pub fn subscribe_to(
        &mut self,
        kinds: &[EventKind],
        observer: impl CombatObserver + 'static,
    ) -> ObserverId {
        self.insert(Some(SmallVec::from_slice(kinds)), Box::new(observer))
    }

    fn insert(
        &mut self,
        kinds: Option<SmallVec<[EventKind; 4]>>,
        observer: Box<dyn CombatObserver>,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;

        self.subscriptions.insert(id, Subscription { kinds, observer });
        self.order.push(id);
        id
    }

    /// Remove an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        if self.subscriptions.remove(&id).is_some() {
            self.order.retain(|&o| o != id);
            true
        } else {
            false
        }
    }

    /// Deliver an event to every matching observer.
    pub fn publish(&mut self, event: &CombatEvent) {
        let kind = event.kind();
        for id in &self.order {
            if let Some(sub) = self.subscriptions.get_mut(id) {
                if sub.wants(kind) {
                    sub.observer.notify(event);
                }
            }
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.order)
            .finish()
    }
}
