//! Turn phase state machine.
//!
//! ```text
//! NotStarted -> PlayerTurn -> EnemyTurn -> PlayerTurn -> ... -> Victory | Defeat
//! ```
//!
//! The controller only moves the phase and emits lifecycle events. Mana,
//! hands and intents react to those events elsewhere.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::{CombatEvent, EventQueue, Outcome};

/// The active stage of a battle. Exactly one is current at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    NotStarted,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

impl TurnPhase {
    /// Check if the battle is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnPhase::Victory | TurnPhase::Defeat)
    }

    /// Terminal phase for an outcome.
    #[must_use]
    pub const fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Victory => TurnPhase::Victory,
            Outcome::Defeat => TurnPhase::Defeat,
        }
    }

    /// Outcome of a terminal phase.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            TurnPhase::Victory => Some(Outcome::Victory),
            TurnPhase::Defeat => Some(Outcome::Defeat),
            _ => None,
        }
    }
}

/// Owns the phase and the turn counter.
///
/// ```
/// use roguedeck::combat::{TurnController, TurnPhase};
/// use roguedeck::events::EventQueue;
///
/// let mut turns = TurnController::new();
/// let mut events = EventQueue::new();
///
/// turns.start_combat(&mut events);
/// assert!(turns.end_player_turn(&mut events));
/// assert!(!turns.end_player_turn(&mut events));
/// assert_eq!(turns.phase(), TurnPhase::EnemyTurn);
///
/// turns.end_enemy_turn(&mut events);
/// assert_eq!(turns.turn(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnController {
    phase: TurnPhase,
    turn: u32,
}

impl TurnController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Current turn number (1-based once combat has started).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.phase == TurnPhase::PlayerTurn
    }

    #[must_use]
    pub fn is_enemy_turn(&self) -> bool {
        self.phase == TurnPhase::EnemyTurn
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Begin (or restart) a battle at player turn 1. Valid from any phase.
    pub fn start_combat(&mut self, events: &mut EventQueue) {
        info!(previous = ?self.phase, "combat started");
        self.turn = 1;
        events.push(CombatEvent::CombatStarted);
        self.start_player_turn(events);
    }

    fn start_player_turn(&mut self, events: &mut EventQueue) {
        info!(turn = self.turn, "player turn started");
        self.phase = TurnPhase::PlayerTurn;
        events.push(CombatEvent::PlayerTurnStarted { turn: self.turn });
    }

    /// Hand the turn to the enemies.
    ///
    /// Returns false and changes nothing unless it is the player's turn.
    pub fn end_player_turn(&mut self, events: &mut EventQueue) -> bool {
        if self.phase != TurnPhase::PlayerTurn {
            debug!(phase = ?self.phase, "end_player_turn ignored outside the player turn");
            return false;
        }
        events.push(CombatEvent::PlayerTurnEnded { turn: self.turn });

        info!(turn = self.turn, "enemy turn started");
        self.phase = TurnPhase::EnemyTurn;
        events.push(CombatEvent::EnemyTurnStarted { turn: self.turn });
        true
    }

    /// Finish the enemy turn and start the next player turn.
    ///
    /// Returns false and changes nothing unless it is the enemies' turn.
    pub fn end_enemy_turn(&mut self, events: &mut EventQueue) -> bool {
        if self.phase != TurnPhase::EnemyTurn {
            debug!(phase = ?self.phase, "end_enemy_turn ignored outside the enemy turn");
            return false;
        }
        events.push(CombatEvent::EnemyTurnEnded { turn: self.turn });
        self.turn += 1;
        self.start_player_turn(events);
        true
    }

    /// Move to a terminal phase.
    ///
    /// Valid from any non-terminal phase; returns false once the battle is
    /// already decided.
    pub fn end_combat(&mut self, outcome: Outcome, events: &mut EventQueue) -> bool {
        if self.phase.is_terminal() {
            debug!(phase = ?self.phase, "combat already ended");
            return false;
        }
        info!(?outcome, turn = self.turn, "combat ended");
        self.phase = TurnPhase::from_outcome(outcome);
        events.push(CombatEvent::CombatEnded { outcome });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let turns = TurnController::new();
        assert_eq!(turns.phase(), TurnPhase::NotStarted);
        assert_eq!(turns.turn(), 0);
        assert!(!turns.is_over());
    }

    #[test]
    fn test_start_combat_events() {
        let mut turns = TurnController::new();
        let mut events = EventQueue::new();

        turns.start_combat(&mut events);

        assert_eq!(turns.phase(), TurnPhase::PlayerTurn);
        assert_eq!(turns.turn(), 1);
        assert_eq!(
            events.drain(),
            vec![CombatEvent::CombatStarted, CombatEvent::PlayerTurnStarted { turn: 1 }]
        );
    }

    #[test]
    fn test_full_cycle() {
        let mut turns = TurnController::new();
        let mut events = EventQueue::new();
        turns.start_combat(&mut events);
        events.drain();

        assert!(turns.end_player_turn(&mut events));
        assert!(turns.end_enemy_turn(&mut events));

        assert_eq!(turns.turn(), 2);
        assert_eq!(
            events.drain(),
            vec![
                CombatEvent::PlayerTurnEnded { turn: 1 },
                CombatEvent::EnemyTurnStarted { turn: 1 },
                CombatEvent::EnemyTurnEnded { turn: 1 },
                CombatEvent::PlayerTurnStarted { turn: 2 },
            ]
        );
    }

    #[test]
    fn test_end_player_turn_during_enemy_turn_is_noop() {
        let mut turns = TurnController::new();
        let mut events = EventQueue::new();
        turns.start_combat(&mut events);
        turns.end_player_turn(&mut events);
        events.drain();

        assert!(!turns.end_player_turn(&mut events));
        assert_eq!(turns.phase(), TurnPhase::EnemyTurn);
        assert!(events.is_empty());
    }

    #[test]
    fn test_end_enemy_turn_outside_enemy_turn_is_noop() {
        let mut turns = TurnController::new();
        let mut events = EventQueue::new();

        assert!(!turns.end_enemy_turn(&mut events));
        turns.start_combat(&mut events);
        events.drain();
        assert!(!turns.end_enemy_turn(&mut events));
        assert_eq!(turns.turn(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_end_combat_is_terminal() {
        let mut turns = TurnController::new();
        let mut events = EventQueue::new();

        assert!(turns.end_combat(Outcome::Defeat, &mut events));
        assert_eq!(turns.phase(), TurnPhase::Defeat);
        assert!(!turns.end_combat(Outcome::Victory, &mut events));
        assert!(!turns.end_player_turn(&mut events));
        assert_eq!(turns.phase().outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn test_restart_after_end() {
        let mut turns = TurnController::new();
        let mut events = EventQueue::new();
        turns.start_combat(&mut events);
        turns.end_player_turn(&mut events);
        turns.end_enemy_turn(&mut events);
        turns.end_combat(Outcome::Victory, &mut events);

        turns.start_combat(&mut events);
        assert_eq!(turns.phase(), TurnPhase::PlayerTurn);
        assert_eq!(turns.turn(), 1);
    }
}
