//! Turn flow tests.
//!
//! These tests exercise the phase state machine through a whole session:
//! - Lifecycle event order
//! - Player and enemy turn alternation
//! - Redundant transitions being no-ops
//! - Victory and defeat
//! - Observer subscription and filtering

use std::cell::RefCell;
use std::rc::Rc;

use roguedeck::cards::{CardCatalog, CardDefinition, CardType};
use roguedeck::combat::{CombatSession, CombatSummary, TurnPhase};
use roguedeck::content;
use roguedeck::core::{CharacterClass, CombatConfig, PartyMember};
use roguedeck::enemies::{EnemyAction, EnemyActionType, EnemyCatalog, EnemyDefinition};
use roguedeck::error::{CombatError, DataError};
use roguedeck::events::{CombatEvent, EventKind, Outcome};

fn cards() -> CardCatalog {
    CardCatalog::from_definitions([
        CardDefinition::new("strike", "Strike", CharacterClass::Warrior, CardType::Attack)
            .with_cost(1)
            .with_values(6, 9),
    ])
    .unwrap()
}

fn enemies() -> EnemyCatalog {
    EnemyCatalog::from_definitions([
        EnemyDefinition::new("idler", "Idler", 30)
            .with_action(EnemyAction::new(EnemyActionType::Buff, 1)),
        EnemyDefinition::new("ogre", "Ogre", 60)
            .with_action(EnemyAction::new(EnemyActionType::Attack, 50))
            .with_gold(20),
    ])
    .unwrap()
}

fn session_with(
    cards: &CardCatalog,
    enemies: &EnemyCatalog,
    config: CombatConfig,
    enemy: &str,
) -> CombatSession {
    CombatSession::builder(cards, enemies)
        .config(config)
        .member(PartyMember::recruit(CharacterClass::Warrior).unwrap())
        .deck(["strike"; 20])
        .enemy(enemy)
        .seed(11)
        .build()
        .unwrap()
}

fn lifecycle(session: &CombatSession) -> Vec<CombatEvent> {
    session
        .history()
        .iter()
        .filter(|e| e.is_lifecycle())
        .cloned()
        .collect()
}

/// Test that a new session waits for `start_combat`.
#[test]
fn test_session_starts_not_started() {
    let (cards, enemies) = (cards(), enemies());
    let session = session_with(&cards, &enemies, CombatConfig::new(), "idler");

    assert_eq!(session.phase(), TurnPhase::NotStarted);
    assert_eq!(session.turn(), 0);
    assert!(session.hand().is_empty());
    assert!(session.summary().is_none());
}

/// Test the lifecycle sequence of one full round.
#[test]
fn test_full_round_lifecycle() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");

    session.start_combat();
    assert!(session.end_player_turn().unwrap());

    assert_eq!(
        lifecycle(&session),
        vec![
            CombatEvent::CombatStarted,
            CombatEvent::PlayerTurnStarted { turn: 1 },
            CombatEvent::PlayerTurnEnded { turn: 1 },
            CombatEvent::EnemyTurnStarted { turn: 1 },
            CombatEvent::EnemyTurnEnded { turn: 1 },
            CombatEvent::PlayerTurnStarted { turn: 2 },
        ]
    );
    assert_eq!(session.phase(), TurnPhase::PlayerTurn);
    assert_eq!(session.turn(), 2);
}

/// Test that the enemy acts between EnemyTurnStarted and EnemyTurnEnded.
#[test]
fn test_enemy_acts_inside_enemy_turn() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");
    session.start_combat();
    session.end_player_turn().unwrap();

    let kinds: Vec<_> = session.history().iter().map(CombatEvent::kind).collect();
    let started = kinds.iter().position(|k| *k == EventKind::EnemyTurnStarted).unwrap();
    let acted = kinds.iter().position(|k| *k == EventKind::EnemyActed).unwrap();
    let ended = kinds.iter().position(|k| *k == EventKind::EnemyTurnEnded).unwrap();

    assert!(started < acted && acted < ended);
    // The next intent is announced right after acting.
    assert_eq!(kinds[acted + 1], EventKind::IntentDecided);
}

/// Test that a second `end_player_turn` during the enemy turn is a no-op.
#[test]
fn test_end_player_turn_during_enemy_turn_is_noop() {
    let (cards, enemies) = (cards(), enemies());
    let mut session =
        session_with(&cards, &enemies, CombatConfig::new().manual_enemy_turn(), "idler");
    session.start_combat();

    assert!(session.end_player_turn().unwrap());
    assert_eq!(session.phase(), TurnPhase::EnemyTurn);
    let events = session.history().len();

    assert!(!session.end_player_turn().unwrap());
    assert_eq!(session.phase(), TurnPhase::EnemyTurn);
    assert_eq!(session.turn(), 1);
    assert_eq!(session.history().len(), events);

    assert!(session.resolve_enemy_turn().unwrap());
    assert_eq!(session.phase(), TurnPhase::PlayerTurn);
    assert_eq!(session.turn(), 2);
}

/// Test that resolving the enemy turn outside it changes nothing.
#[test]
fn test_resolve_enemy_turn_outside_enemy_turn() {
    let (cards, enemies) = (cards(), enemies());
    let mut session =
        session_with(&cards, &enemies, CombatConfig::new().manual_enemy_turn(), "idler");

    assert!(!session.resolve_enemy_turn().unwrap());
    session.start_combat();
    assert!(!session.resolve_enemy_turn().unwrap());
    assert_eq!(session.phase(), TurnPhase::PlayerTurn);
}

/// Test that each player turn refills mana and draws, keeping the hand.
#[test]
fn test_turn_start_refill_and_draw() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");
    session.start_combat();
    assert_eq!(session.hand().len(), 5);

    let target = session.enemies()[0].entity_id;
    let card = session.hand()[0].entity_id;
    session.play_card(card, Some(target)).unwrap();
    assert_eq!(session.mana().current(), 3);

    session.end_player_turn().unwrap();

    assert_eq!(session.mana().current(), session.mana().max());
    assert_eq!(session.hand().len(), 4 + 3);
}

/// Test that draws stop at the hand limit.
#[test]
fn test_hand_limit_across_turns() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");
    session.start_combat();

    for _ in 0..4 {
        session.end_player_turn().unwrap();
    }

    assert_eq!(session.turn(), 5);
    assert_eq!(session.hand().len(), 10);
    assert_eq!(session.zones().total(), 20);
}

/// Test that a lethal enemy attack ends the battle in defeat.
#[test]
fn test_defeat() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = CombatSession::builder(&cards, &enemies)
        .member(PartyMember::new(CharacterClass::Mage, 40))
        .deck(["strike"; 5])
        .enemy("ogre")
        .build()
        .unwrap();
    session.start_combat();

    session.end_player_turn().unwrap();

    assert_eq!(session.phase(), TurnPhase::Defeat);
    assert!(!session.party().is_alive());
    assert_eq!(
        session.summary(),
        Some(CombatSummary { outcome: Outcome::Defeat, turns: 1, gold: 0 })
    );
    assert!(!lifecycle(&session).contains(&CombatEvent::EnemyTurnEnded { turn: 1 }));
    assert_eq!(
        session.history().last(),
        Some(&CombatEvent::CombatEnded { outcome: Outcome::Defeat })
    );
}

/// Test that a battle only ends once.
#[test]
fn test_end_combat_only_once() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");
    session.start_combat();

    assert!(session.end_combat(Outcome::Victory));
    assert!(!session.end_combat(Outcome::Defeat));
    assert_eq!(session.phase(), TurnPhase::Victory);
    assert!(!session.end_player_turn().unwrap());
}

/// Test that observers see exactly what history records.
#[test]
fn test_observer_matches_history() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");
    let already = session.history().len();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe(move |event: &CombatEvent| sink.borrow_mut().push(event.clone()));

    session.start_combat();
    session.end_player_turn().unwrap();

    let recorded: Vec<_> = session.history().iter().skip(already).cloned().collect();
    assert_eq!(*seen.borrow(), recorded);
}

/// Test filtered subscriptions and unsubscribing.
#[test]
fn test_filtered_observer() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");

    let turns = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&turns);
    let id = session.subscribe_to(&[EventKind::PlayerTurnStarted], move |event: &CombatEvent| {
        if let CombatEvent::PlayerTurnStarted { turn } = event {
            sink.borrow_mut().push(*turn);
        }
    });

    session.start_combat();
    session.end_player_turn().unwrap();
    assert!(session.unsubscribe(id));
    assert!(!session.unsubscribe(id));
    session.end_player_turn().unwrap();

    assert_eq!(*turns.borrow(), vec![1, 2]);
    assert_eq!(session.turn(), 3);
}

/// Test that restarting a battle begins again at turn 1.
#[test]
fn test_restart_combat() {
    let (cards, enemies) = (cards(), enemies());
    let mut session = session_with(&cards, &enemies, CombatConfig::new(), "idler");
    session.start_combat();
    session.end_player_turn().unwrap();
    session.end_player_turn().unwrap();
    assert_eq!(session.turn(), 3);

    session.start_combat();

    assert_eq!(session.turn(), 1);
    assert_eq!(session.phase(), TurnPhase::PlayerTurn);
    assert_eq!(session.hand().len(), 5);
    assert_eq!(session.zones().total(), 20);
}

/// Test that the same seed plays out the same battle.
#[test]
fn test_same_seed_same_battle() {
    let cards = content::starter_cards();
    let enemies = content::starter_enemies();

    let run = || {
        let mut session = CombatSession::builder(&cards, &enemies)
            .member(PartyMember::recruit(CharacterClass::Warrior).unwrap())
            .deck(content::warrior_starter_deck())
            .enemy("slime")
            .enemy("goblin")
            .seed(99)
            .build()
            .unwrap();
        session.start_combat();
        for _ in 0..3 {
            session.end_player_turn().unwrap();
        }
        session.history().clone()
    };

    assert_eq!(run(), run());
}

/// Test that a battle with no enemies is refused instead of running forever.
#[test]
fn test_empty_encounter_refused() {
    let (cards, enemies) = (cards(), enemies());
    let result = CombatSession::builder(&cards, &enemies)
        .member(PartyMember::recruit(CharacterClass::Warrior).unwrap())
        .deck(["strike"; 5])
        .build();

    assert!(matches!(result, Err(CombatError::Data(DataError::EmptyEncounter))));
}
