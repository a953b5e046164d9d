//! A single battle.
//!
//! `CombatSession` owns every piece of battle state and is the only thing
//! callers talk to. Each public operation:
//!
//! 1. checks legality and rejects with no state change if the rules forbid it
//! 2. lets components mutate state, collecting their events in a queue
//! 3. drains the queue: the session's own reactions to an event run first
//!    (refill mana on `PlayerTurnStarted`, draw, clear block), then the event
//!    is recorded in history and delivered to observers, then the events the
//!    reactions produced follow it
//!
//! ## Example
//!
//! ```
//! use roguedeck::combat::{CombatSession, TurnPhase};
//! use roguedeck::content;
//! use roguedeck::core::{CharacterClass, PartyMember};
//!
//! let cards = content::starter_cards();
//! let enemies = content::starter_enemies();
//!
//! let mut session = CombatSession::builder(&cards, &enemies)
//!     .member(PartyMember::recruit(CharacterClass::Warrior).unwrap())
//!     .deck(content::warrior_starter_deck())
//!     .enemy("slime")
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! session.start_combat();
//! assert_eq!(session.phase(), TurnPhase::PlayerTurn);
//! assert_eq!(session.mana().max(), 4);
//! assert_eq!(session.hand().len(), 5);
//! ```

use std::collections::VecDeque;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::mana::ManaLedger;
use super::phase::{TurnController, TurnPhase};
use crate::cards::{CardCatalog, CardId, CardInstance};
use crate::core::{CombatConfig, EntityId, GameRng, Party, PartyMember, Relic};
use crate::effects::{
    CardResolution, EffectContext, EffectHandler, EffectResolver, UnimplementedEffects,
};
use crate::enemies::{EnemyCatalog, EnemyId, EnemyInstance, IntentSelector};
use crate::error::{CombatError, DataError, IllegalAction};
use crate::events::{
    CombatEvent, CombatObserver, EventBus, EventKind, EventQueue, ObserverId, Outcome,
};
use crate::zones::CardZones;

/// Result of a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSummary {
    pub outcome: Outcome,
    /// Turn number the battle ended on.
    pub turns: u32,
    /// Gold from defeated enemies.
    pub gold: u32,
}

/// Everything needed to set up a battle.
pub struct CombatSessionBuilder<'a> {
    cards: &'a CardCatalog,
    enemies: &'a EnemyCatalog,
    config: CombatConfig,
    members: Vec<PartyMember>,
    deck: Vec<CardId>,
    encounter: Vec<EnemyId>,
    relics: SmallVec<[Relic; 4]>,
    seed: u64,
    effects: Option<Box<dyn EffectHandler>>,
}

impl<'a> CombatSessionBuilder<'a> {
    fn new(cards: &'a CardCatalog, enemies: &'a EnemyCatalog) -> Self {
        Self {
            cards,
            enemies,
            config: CombatConfig::default(),
            members: Vec::new(),
            deck: Vec::new(),
            encounter: Vec::new(),
            relics: SmallVec::new(),
            seed: 0,
            effects: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for intents and shuffles.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add a party member (roster order).
    #[must_use]
    pub fn member(mut self, member: PartyMember) -> Self {
        self.members.push(member);
        self
    }

    /// Add copies of cards to the deck.
    #[must_use]
    pub fn deck<I, C>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CardId>,
    {
        self.deck.extend(cards.into_iter().map(Into::into));
        self
    }

    /// Add one enemy to the encounter.
    #[must_use]
    pub fn enemy(mut self, id: impl Into<EnemyId>) -> Self {
        self.encounter.push(id.into());
        self
    }

    #[must_use]
    pub fn relic(mut self, relic: Relic) -> Self {
        self.relics.push(relic);
        self
    }

    /// Handler for secondary card effects.
    #[must_use]
    pub fn effect_handler(mut self, handler: impl EffectHandler + 'static) -> Self {
        self.effects = Some(Box::new(handler));
        self
    }

    /// Create the session.
    ///
    /// Entity ids go to party members first, then enemies, then cards.
    /// Every enemy decides its first intent here. An encounter with no
    /// enemies could never be won, so it is rejected.
    pub fn build(self) -> Result<CombatSession, CombatError> {
        if self.encounter.is_empty() {
            warn!("combat session requested with an empty encounter");
            return Err(DataError::EmptyEncounter.into());
        }

        let mut party = Party::with_capacity(self.config.max_party_size);
        for member in self.members {
            party.add_member(member)?;
        }

        let root = GameRng::new(self.seed);
        let mut intents = IntentSelector::new(
            root.for_context("intents"),
            self.config.intent_policy,
            self.config.enemy_block_expiry,
        );
        let mut zones = CardZones::new(root.for_context("draws"), self.config.max_hand_size);
        let mut queue = EventQueue::new();

        let mut next_entity = EntityId::first_non_party(party.size());

        let mut enemies = Vec::with_capacity(self.encounter.len());
        for id in &self.encounter {
            let mut enemy = self.enemies.spawn(id, EntityId(next_entity))?;
            next_entity += 1;
            intents.decide_next_action(&mut enemy, &mut queue)?;
            enemies.push(enemy);
        }

        for id in &self.deck {
            let card = self.cards.instantiate(id, EntityId(next_entity))?;
            next_entity += 1;
            zones.add_to_draw_pile(card);
        }

        for relic in &self.relics {
            if !relic.has_combat_effect() {
                debug!(?relic, "relic has no combat effect");
            }
        }

        info!(
            party = party.size(),
            enemies = enemies.len(),
            deck = zones.total(),
            seed = self.seed,
            "combat session created"
        );

        let mut session = CombatSession {
            mana: ManaLedger::new(self.config.base_mana, self.config.mana_ceiling),
            config: self.config,
            turns: TurnController::new(),
            party,
            relics: self.relics,
            enemies,
            zones,
            intents,
            effects: self
                .effects
                .unwrap_or_else(|| Box::new(UnimplementedEffects)),
            cards: self.cards.clone(),
            queue,
            history: Vector::new(),
            bus: EventBus::new(),
            next_entity,
            gold: 0,
        };
        session.flush();
        Ok(session)
    }
}

/// One battle between a party and an encounter.
pub struct CombatSession {
    config: CombatConfig,
    turns: TurnController,
    mana: ManaLedger,
    party: Party,
    relics: SmallVec<[Relic; 4]>,
    enemies: Vec<EnemyInstance>,
    zones: CardZones,
    intents: IntentSelector,
    effects: Box<dyn EffectHandler>,
    cards: CardCatalog,
    queue: EventQueue,
    history: Vector<CombatEvent>,
    bus: EventBus,
    next_entity: u32,
    gold: u32,
}

impl CombatSession {
    /// Start configuring a battle drawing definitions from these catalogs.
    #[must_use]
    pub fn builder<'a>(cards: &'a CardCatalog, enemies: &'a EnemyCatalog) -> CombatSessionBuilder<'a> {
        CombatSessionBuilder::new(cards, enemies)
    }

    // === State ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.turns.phase()
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turns.turn()
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn mana(&self) -> &ManaLedger {
        &self.mana
    }

    #[must_use]
    pub fn party(&self) -> &Party {
        &self.party
    }

    #[must_use]
    pub fn relics(&self) -> &[Relic] {
        &self.relics
    }

    #[must_use]
    pub fn enemies(&self) -> &[EnemyInstance] {
        &self.enemies
    }

    #[must_use]
    pub fn enemy(&self, id: EntityId) -> Option<&EnemyInstance> {
        self.enemies.iter().find(|e| e.entity_id == id)
    }

    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        self.zones.hand()
    }

    #[must_use]
    pub fn zones(&self) -> &CardZones {
        &self.zones
    }

    /// Every event delivered so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<CombatEvent> {
        &self.history
    }

    /// Gold earned from enemies defeated so far.
    #[must_use]
    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Summary of the battle once it has ended.
    #[must_use]
    pub fn summary(&self) -> Option<CombatSummary> {
        self.phase().outcome().map(|outcome| CombatSummary {
            outcome,
            turns: self.turn(),
            gold: self.gold,
        })
    }

    // === Observers ===

    /// Receive every event.
    pub fn subscribe(&mut self, observer: impl CombatObserver + 'static) -> ObserverId {
        self.bus.subscribe(observer)
    }

    /// Receive only the listed kinds of event.
    pub fn subscribe_to(
        &mut self,
        kinds: &[EventKind],
        observer: impl CombatObserver + 'static,
    ) -> ObserverId {
        self.bus.subscribe_to(kinds, observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Replace the secondary effect handler.
    pub fn set_effect_handler(&mut self, handler: impl EffectHandler + 'static) {
        self.effects = Box::new(handler);
    }

    // === Turn flow ===

    /// Begin the battle at player turn 1.
    pub fn start_combat(&mut self) {
        self.turns.start_combat(&mut self.queue);
        self.flush();
    }

    /// End the player's turn.
    ///
    /// Returns `Ok(false)` outside the player turn. With automatic enemy
    /// turns the whole enemy turn runs before this returns.
    pub fn end_player_turn(&mut self) -> Result<bool, CombatError> {
        if !self.turns.end_player_turn(&mut self.queue) {
            return Ok(false);
        }
        self.flush();

        if self.config.auto_resolve_enemy_turn {
            self.resolve_enemy_turn()?;
        }
        Ok(true)
    }

    /// Run every living enemy's intent, in encounter order, then hand the
    /// turn back to the player.
    ///
    /// Returns `Ok(false)` outside the enemy turn. Stops early with
    /// `Defeat` if the party falls.
    pub fn resolve_enemy_turn(&mut self) -> Result<bool, CombatError> {
        if !self.turns.is_enemy_turn() {
            debug!(phase = ?self.phase(), "no enemy turn to resolve");
            return Ok(false);
        }

        for index in 0..self.enemies.len() {
            if !self.enemies[index].is_alive() {
                continue;
            }
            let acted = self.intents.execute_action(
                &mut self.enemies[index],
                &mut self.party,
                &mut self.queue,
            );
            self.flush();
            acted?;

            if !self.party.is_alive() {
                self.end_combat(Outcome::Defeat);
                return Ok(true);
            }
        }

        self.turns.end_enemy_turn(&mut self.queue);
        self.flush();
        Ok(true)
    }

    /// Force the battle to end. Returns false if it already has.
    pub fn end_combat(&mut self, outcome: Outcome) -> bool {
        let ended = self.turns.end_combat(outcome, &mut self.queue);
        self.flush();
        ended
    }

    // === Cards ===

    /// Play a card from the hand.
    ///
    /// Rejected with no state change if it is not the player turn, the card
    /// is not in hand, the target is missing or invalid, or mana is short.
    pub fn play_card(
        &mut self,
        card: EntityId,
        target: Option<EntityId>,
    ) -> Result<CardResolution, CombatError> {
        if let Err(illegal) = self.check_play(card, target) {
            debug!(%card, ?target, reason = %illegal, "card play rejected");
            return Err(illegal.into());
        }

        let Some(instance) = self.zones.remove_from_hand(card) else {
            return Err(IllegalAction::CardNotInHand(card).into());
        };
        let spent = self.mana.try_spend(instance.cost(), &mut self.queue);
        debug_assert!(spent, "check_play admitted an unaffordable card");
        self.queue.push(CombatEvent::CardPlayed { card, target });
        info!(card = %instance.card_id(), ?target, "card played");

        let mut ctx = EffectContext {
            party: &mut self.party,
            enemies: &mut self.enemies,
            zones: &mut self.zones,
            events: &mut self.queue,
        };
        let resolution =
            EffectResolver::resolve_card(&instance, target, &mut ctx, &mut *self.effects);
        self.zones.discard(instance, &mut self.queue);
        self.flush();

        if self.all_enemies_defeated() {
            self.end_combat(Outcome::Victory);
        }
        Ok(resolution)
    }

    fn check_play(&self, card: EntityId, target: Option<EntityId>) -> Result<(), IllegalAction> {
        if !self.turns.is_player_turn() {
            return Err(IllegalAction::WrongPhase {
                phase: self.phase(),
            });
        }

        let instance = self
            .zones
            .hand_card(card)
            .ok_or(IllegalAction::CardNotInHand(card))?;

        match target {
            None if instance.card_type().needs_target() => {
                return Err(IllegalAction::TargetRequired);
            }
            None => {}
            Some(id) => match self.enemy(id) {
                Some(enemy) if !enemy.is_alive() => {
                    return Err(IllegalAction::TargetDefeated(id));
                }
                Some(_) => {}
                None if !instance.card_type().needs_target()
                    && id.is_party_member(self.party.size()) => {}
                None => return Err(IllegalAction::UnknownTarget(id)),
            },
        }

        if !self.mana.can_afford(instance.cost()) {
            return Err(IllegalAction::InsufficientMana {
                cost: instance.cost(),
                available: self.mana.current(),
            });
        }
        Ok(())
    }

    fn all_enemies_defeated(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.is_alive())
    }

    /// Create a new copy of a card directly in the hand.
    pub fn add_card_to_hand(&mut self, id: &CardId) -> Result<EntityId, CombatError> {
        let entity = EntityId(self.next_entity);
        let card = self.cards.instantiate(id, entity)?;
        self.next_entity += 1;
        self.zones.add_to_hand(card, &mut self.queue);
        self.flush();
        Ok(entity)
    }

    /// Discard the whole hand.
    pub fn clear_hand(&mut self) {
        self.zones.clear_hand(&mut self.queue);
        self.flush();
    }

    /// Draw cards outside the normal turn-start draw.
    pub fn draw_cards(&mut self, count: usize) -> usize {
        let drawn = self.zones.draw(count, &mut self.queue);
        self.flush();
        drawn
    }

    /// Upgrade a card anywhere in the deck. Returns false if the card is
    /// unknown or already upgraded.
    pub fn upgrade_card(&mut self, card: EntityId) -> bool {
        match self.zones.find_mut(card) {
            Some(instance) => instance.upgrade(),
            None => {
                debug!(%card, "no such card to upgrade");
                false
            }
        }
    }

    // === Mana ===

    /// Add mana this turn, up to the maximum.
    pub fn grant_mana(&mut self, amount: u32) {
        self.mana.grant(amount, &mut self.queue);
        self.flush();
    }

    /// Permanently raise the mana maximum. Returns the actual increase.
    pub fn increase_max_mana(&mut self, amount: u32) -> u32 {
        let grown = self.mana.increase_capacity(amount, &mut self.queue);
        self.flush();
        grown
    }

    // === Event delivery ===

    fn flush(&mut self) {
        let mut pending: VecDeque<CombatEvent> = self.queue.drain().into();

        while let Some(event) = pending.pop_front() {
            let mut reactions = EventQueue::new();
            self.react(&event, &mut reactions);

            self.history.push_back(event.clone());
            self.bus.publish(&event);

            for reaction in reactions.drain().into_iter().rev() {
                pending.push_front(reaction);
            }
        }
    }

    fn react(&mut self, event: &CombatEvent, out: &mut EventQueue) {
        match event {
            CombatEvent::CombatStarted => {
                self.gold = 0;
                self.mana.set_capacity(self.party.size(), out);
                let bonus: u32 = self.relics.iter().map(|r| r.bonus_capacity()).sum();
                if bonus > 0 {
                    self.mana.increase_capacity(bonus, out);
                }
                self.zones.reset_and_shuffle();
            }
            CombatEvent::PlayerTurnStarted { turn } => {
                self.party.clear_block(out);
                self.mana.refill(out);

                let base = if *turn == 1 {
                    self.config.opening_hand
                } else {
                    self.config.draw_per_turn
                };
                let bonus: usize = self.relics.iter().map(|r| r.bonus_draws()).sum();
                self.zones.draw(base + bonus, out);
            }
            CombatEvent::Defeated { entity } => {
                if let Some(enemy) = self.enemies.iter().find(|e| e.entity_id == *entity) {
                    self.gold += enemy.definition.gold;
                }
            }
            CombatEvent::CombatEnded { outcome } => {
                if *outcome == Outcome::Defeat && self.party.is_alive() {
                    warn!("combat ended in defeat with the party standing");
                }
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSession")
            .field("phase", &self.phase())
            .field("turn", &self.turn())
            .field("mana", &self.mana)
            .field("party", &self.party)
            .field("enemies", &self.enemies.len())
            .field("hand", &self.zones.hand().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardType};
    use crate::core::CharacterClass;
    use crate::enemies::{EnemyAction, EnemyActionType, EnemyDefinition};

    fn catalogs() -> (CardCatalog, EnemyCatalog) {
        let cards = CardCatalog::from_definitions([
            CardDefinition::new("strike", "Strike", CharacterClass::Warrior, CardType::Attack)
                .with_cost(1)
                .with_values(6, 9),
            CardDefinition::new("defend", "Defend", CharacterClass::Warrior, CardType::Defend)
                .with_cost(1)
                .with_values(5, 8),
        ])
        .unwrap();
        let enemies = EnemyCatalog::from_definitions([
            EnemyDefinition::new("dummy", "Dummy", 10)
                .with_action(EnemyAction::new(EnemyActionType::Attack, 5))
                .with_gold(7),
        ])
        .unwrap();
        (cards, enemies)
    }

    fn session(cards: &CardCatalog, enemies: &EnemyCatalog) -> CombatSession {
        CombatSession::builder(cards, enemies)
            .member(PartyMember::new(CharacterClass::Warrior, 80))
            .deck(["strike"; 5])
            .enemy("dummy")
            .build()
            .unwrap()
    }

    #[test]
    fn test_entity_layout() {
        let (cards, enemies) = catalogs();
        let s = session(&cards, &enemies);

        assert_eq!(s.enemies()[0].entity_id, EntityId(1));
        assert_eq!(s.zones().total(), 5);
        assert!(s.zones().find(EntityId(2)).is_some());
        assert!(s.zones().find(EntityId(6)).is_some());
    }

    #[test]
    fn test_intent_decided_at_creation() {
        let (cards, enemies) = catalogs();
        let s = session(&cards, &enemies);

        assert!(s.enemies()[0].intent().is_some());
        assert!(matches!(s.history()[0], CombatEvent::IntentDecided { .. }));
    }

    #[test]
    fn test_start_combat_event_order() {
        let (cards, enemies) = catalogs();
        let mut s = session(&cards, &enemies);
        s.start_combat();

        let kinds: Vec<_> = s.history().iter().skip(1).map(CombatEvent::kind).take(4).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::CombatStarted,
                EventKind::ManaChanged,
                EventKind::PlayerTurnStarted,
                EventKind::ManaChanged,
            ]
        );
    }

    #[test]
    fn test_play_wrong_phase() {
        let (cards, enemies) = catalogs();
        let mut s = session(&cards, &enemies);

        let err = s.play_card(EntityId(2), Some(EntityId(1))).unwrap_err();
        assert_eq!(
            err.as_illegal(),
            Some(&IllegalAction::WrongPhase { phase: TurnPhase::NotStarted })
        );
    }

    #[test]
    fn test_attack_requires_target() {
        let (cards, enemies) = catalogs();
        let mut s = session(&cards, &enemies);
        s.start_combat();
        let card = s.hand()[0].entity_id;

        let err = s.play_card(card, None).unwrap_err();
        assert_eq!(err.as_illegal(), Some(&IllegalAction::TargetRequired));

        let err = s.play_card(card, Some(EntityId(99))).unwrap_err();
        assert_eq!(err.as_illegal(), Some(&IllegalAction::UnknownTarget(EntityId(99))));
        assert_eq!(s.mana().current(), 4);
        assert_eq!(s.hand().len(), 5);
    }

    #[test]
    fn test_victory_and_gold() {
        let (cards, enemies) = catalogs();
        let mut s = session(&cards, &enemies);
        s.start_combat();

        let hand: Vec<_> = s.hand().iter().map(|c| c.entity_id).collect();
        s.play_card(hand[0], Some(EntityId(1))).unwrap();
        s.play_card(hand[1], Some(EntityId(1))).unwrap();

        assert_eq!(s.phase(), TurnPhase::Victory);
        assert_eq!(
            s.summary(),
            Some(CombatSummary { outcome: Outcome::Victory, turns: 1, gold: 7 })
        );

        let err = s.play_card(hand[2], Some(EntityId(1))).unwrap_err();
        assert!(matches!(err.as_illegal(), Some(IllegalAction::WrongPhase { .. })));
    }

    #[test]
    fn test_empty_encounter_rejected() {
        let (cards, enemies) = catalogs();
        let result = CombatSession::builder(&cards, &enemies)
            .member(PartyMember::new(CharacterClass::Warrior, 80))
            .deck(["strike"; 5])
            .build();

        assert!(matches!(result, Err(CombatError::Data(DataError::EmptyEncounter))));
    }

    #[test]
    fn test_defeated_target_rejected() {
        let (cards, _) = catalogs();
        let enemies = EnemyCatalog::from_definitions([
            EnemyDefinition::new("weak", "Weak", 3)
                .with_action(EnemyAction::new(EnemyActionType::Defend, 1)),
            EnemyDefinition::new("tough", "Tough", 50)
                .with_action(EnemyAction::new(EnemyActionType::Defend, 1)),
        ])
        .unwrap();
        let mut s = CombatSession::builder(&cards, &enemies)
            .member(PartyMember::new(CharacterClass::Warrior, 80))
            .deck(["strike"; 5])
            .enemy("weak")
            .enemy("tough")
            .build()
            .unwrap();
        s.start_combat();

        let hand: Vec<_> = s.hand().iter().map(|c| c.entity_id).collect();
        s.play_card(hand[0], Some(EntityId(1))).unwrap();
        assert_eq!(s.phase(), TurnPhase::PlayerTurn);

        let err = s.play_card(hand[1], Some(EntityId(1))).unwrap_err();
        assert_eq!(err.as_illegal(), Some(&IllegalAction::TargetDefeated(EntityId(1))));
    }
}
