//! Card zones for a battle.
//!
//! `CardZones` tracks the three places a card can be during combat:
//! - the draw pile (top of pile is the end of the `Vec`)
//! - the hand, kept in draw order
//! - the discard pile
//!
//! Drawing from an empty draw pile first shuffles the discard pile back in.
//! Draws stop once the hand reaches its size limit.

use tracing::debug;

use crate::cards::CardInstance;
use crate::core::{EntityId, GameRng};
use crate::events::{CombatEvent, EventQueue};

/// Draw pile, hand and discard pile of the party's shared deck.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
/// use roguedeck::cards::{CardDefinition, CardInstance, CardType};
/// use roguedeck::core::{CharacterClass, EntityId, GameRng};
/// use roguedeck::events::EventQueue;
/// use roguedeck::zones::CardZones;
///
/// let strike = Arc::new(CardDefinition::new("strike", "Strike", CharacterClass::Warrior, CardType::Attack));
/// let mut zones = CardZones::new(GameRng::new(1), 10);
/// for i in 0..6 {
///     zones.add_to_draw_pile(CardInstance::new(EntityId(i), Arc::clone(&strike)));
/// }
///
/// let mut events = EventQueue::new();
/// assert_eq!(zones.draw(5, &mut events), 5);
/// assert_eq!(zones.hand().len(), 5);
/// assert_eq!(zones.draw_pile_len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct CardZones {
    draw_pile: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    discard_pile: Vec<CardInstance>,
    rng: GameRng,
    max_hand_size: usize,
}

impl CardZones {
    /// Create empty zones. `rng` drives every shuffle.
    #[must_use]
    pub fn new(rng: GameRng, max_hand_size: usize) -> Self {
        Self {
            draw_pile: Vec::new(),
            hand: Vec::new(),
            discard_pile: Vec::new(),
            rng,
            max_hand_size,
        }
    }

    /// Put a card on top of the draw pile.
    pub fn add_to_draw_pile(&mut self, card: CardInstance) {
        self.draw_pile.push(card);
    }

    /// Gather every card into the draw pile and shuffle it.
    pub fn reset_and_shuffle(&mut self) {
        self.draw_pile.append(&mut self.hand);
        self.draw_pile.append(&mut self.discard_pile);
        self.rng.shuffle(&mut self.draw_pile);
        debug!(cards = self.draw_pile.len(), "deck shuffled");
    }

    /// Move the discard pile under the draw pile and shuffle.
    fn reshuffle_discard(&mut self) {
        self.rng.shuffle(&mut self.discard_pile);
        // Drawn cards come off the end, so the reshuffled cards go first.
        self.discard_pile.append(&mut self.draw_pile);
        std::mem::swap(&mut self.draw_pile, &mut self.discard_pile);
        debug!(cards = self.draw_pile.len(), "discard pile reshuffled");
    }

    /// Draw up to `count` cards. Returns how many were drawn.
    pub fn draw(&mut self, count: usize, events: &mut EventQueue) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.hand.len() >= self.max_hand_size {
                debug!(hand = self.hand.len(), "hand full, draw stopped");
                break;
            }
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    debug!("no cards left to draw");
                    break;
                }
                self.reshuffle_discard();
            }
            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            events.push(CombatEvent::CardDrawn {
                card: card.entity_id,
            });
            self.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    /// Put a new card straight into the hand.
    ///
    /// A full hand sends the card to the discard pile instead; returns
    /// whether it landed in the hand.
    pub fn add_to_hand(&mut self, card: CardInstance, events: &mut EventQueue) -> bool {
        if self.hand.len() >= self.max_hand_size {
            debug!(card = %card.entity_id, "hand full, card discarded");
            self.discard(card, events);
            return false;
        }
        events.push(CombatEvent::CardDrawn {
            card: card.entity_id,
        });
        self.hand.push(card);
        true
    }

    /// Take a card out of the hand.
    pub fn remove_from_hand(&mut self, entity: EntityId) -> Option<CardInstance> {
        let index = self.hand.iter().position(|c| c.entity_id == entity)?;
        Some(self.hand.remove(index))
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: CardInstance, events: &mut EventQueue) {
        events.push(CombatEvent::CardDiscarded {
            card: card.entity_id,
        });
        self.discard_pile.push(card);
    }

    /// Discard the whole hand.
    pub fn clear_hand(&mut self, events: &mut EventQueue) {
        for card in std::mem::take(&mut self.hand) {
            self.discard(card, events);
        }
    }

    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    #[must_use]
    pub fn hand_card(&self, entity: EntityId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.entity_id == entity)
    }

    /// Find a card in any zone.
    #[must_use]
    pub fn find(&self, entity: EntityId) -> Option<&CardInstance> {
        self.hand
            .iter()
            .chain(&self.draw_pile)
            .chain(&self.discard_pile)
            .find(|c| c.entity_id == entity)
    }

    /// Find a card in any zone, mutably (for upgrades).
    pub fn find_mut(&mut self, entity: EntityId) -> Option<&mut CardInstance> {
        self.hand
            .iter_mut()
            .chain(&mut self.draw_pile)
            .chain(&mut self.discard_pile)
            .find(|c| c.entity_id == entity)
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard_pile
    }

    #[must_use]
    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardType};
    use crate::core::CharacterClass;
    use std::sync::Arc;

    fn zones_with(cards: u32, max_hand: usize) -> CardZones {
        let def = Arc::new(CardDefinition::new(
            "strike",
            "Strike",
            CharacterClass::Warrior,
            CardType::Attack,
        ));
        let mut zones = CardZones::new(GameRng::new(3), max_hand);
        for i in 0..cards {
            zones.add_to_draw_pile(CardInstance::new(EntityId(i), Arc::clone(&def)));
        }
        zones
    }

    #[test]
    fn test_draw_emits_events() {
        let mut zones = zones_with(3, 10);
        let mut events = EventQueue::new();

        assert_eq!(zones.draw(2, &mut events), 2);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| matches!(e, CombatEvent::CardDrawn { .. })));
    }

    #[test]
    fn test_draw_respects_hand_limit() {
        let mut zones = zones_with(10, 4);
        let mut events = EventQueue::new();

        assert_eq!(zones.draw(6, &mut events), 4);
        assert_eq!(zones.hand().len(), 4);
        assert_eq!(zones.draw(1, &mut events), 0);
    }

    #[test]
    fn test_empty_draw_pile_reshuffles_discard() {
        let mut zones = zones_with(3, 10);
        let mut events = EventQueue::new();

        zones.draw(3, &mut events);
        zones.clear_hand(&mut events);
        assert_eq!(zones.draw_pile_len(), 0);
        assert_eq!(zones.discard_pile().len(), 3);

        assert_eq!(zones.draw(2, &mut events), 2);
        assert_eq!(zones.draw_pile_len(), 1);
        assert!(zones.discard_pile().is_empty());
    }

    #[test]
    fn test_draw_stops_when_exhausted() {
        let mut zones = zones_with(2, 10);
        let mut events = EventQueue::new();

        assert_eq!(zones.draw(5, &mut events), 2);
        assert_eq!(zones.total(), 2);
    }

    #[test]
    fn test_remove_and_discard() {
        let mut zones = zones_with(3, 10);
        let mut events = EventQueue::new();
        zones.draw(3, &mut events);

        let id = zones.hand()[1].entity_id;
        let card = zones.remove_from_hand(id).unwrap();
        assert!(zones.hand_card(id).is_none());
        assert!(zones.remove_from_hand(id).is_none());

        zones.discard(card, &mut events);
        assert_eq!(zones.discard_pile().len(), 1);
        assert!(zones.find(id).is_some());
    }

    #[test]
    fn test_add_to_full_hand_discards() {
        let mut zones = zones_with(2, 2);
        let mut events = EventQueue::new();
        zones.draw(2, &mut events);

        let extra = zones.find(EntityId(0)).cloned().unwrap();
        assert!(!zones.add_to_hand(extra, &mut events));
        assert_eq!(zones.discard_pile().len(), 1);
    }

    #[test]
    fn test_reset_gathers_everything() {
        let mut zones = zones_with(5, 10);
        let mut events = EventQueue::new();
        zones.draw(3, &mut events);
        zones.clear_hand(&mut events);
        zones.draw(1, &mut events);

        zones.reset_and_shuffle();
        assert_eq!(zones.draw_pile_len(), 5);
        assert!(zones.hand().is_empty());
        assert!(zones.discard_pile().is_empty());
    }
}
