//! Enemy intent selection and execution.
//!
//! Every living enemy always has an intent: one is decided when the enemy
//! enters combat and a new one right after it executes the previous one,
//! so the player sees what each enemy will do before acting.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::definition::{EnemyAction, EnemyActionType};
use super::instance::{BlockExpiry, EnemyInstance};
use crate::core::{GameRng, Party};
use crate::error::DataError;
use crate::events::{CombatEvent, EventQueue};

/// How an enemy picks from its action pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentPolicy {
    /// Every action equally likely; weights are ignored.
    #[default]
    Uniform,

    /// Probability proportional to each action's weight. A pattern whose
    /// weights are all zero falls back to uniform.
    Weighted,
}

/// Decides and carries out enemy intents.
#[derive(Clone, Debug)]
pub struct IntentSelector {
    rng: GameRng,
    policy: IntentPolicy,
    block_expiry: BlockExpiry,
}

impl IntentSelector {
    /// Create a selector drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng, policy: IntentPolicy, block_expiry: BlockExpiry) -> Self {
        Self {
            rng,
            policy,
            block_expiry,
        }
    }

    #[must_use]
    pub fn policy(&self) -> IntentPolicy {
        self.policy
    }

    #[must_use]
    pub fn block_expiry(&self) -> BlockExpiry {
        self.block_expiry
    }

    /// Pick the enemy's next action and store it as its intent.
    ///
    /// Fails with `EmptyActionPattern` if there is nothing to pick; the
    /// enemy is left without an intent.
    pub fn decide_next_action(
        &mut self,
        enemy: &mut EnemyInstance,
        events: &mut EventQueue,
    ) -> Result<EnemyAction, DataError> {
        let pattern = &enemy.definition.pattern;
        if pattern.is_empty() {
            warn!(enemy = %enemy.definition.id, "enemy has no actions to choose from");
            return Err(DataError::EmptyActionPattern(enemy.definition.id.clone()));
        }

        let index = match self.policy {
            IntentPolicy::Uniform => self.rng.gen_range_usize(0..pattern.len()),
            IntentPolicy::Weighted => self
                .rng
                .choose_weighted(&enemy.definition.weights())
                .unwrap_or_else(|| self.rng.gen_range_usize(0..pattern.len())),
        };
        let action = pattern[index];

        debug!(
            enemy = %enemy.entity_id,
            action = ?action.action_type,
            value = action.value,
            "intent decided"
        );
        enemy.set_intent(action);
        events.push(CombatEvent::IntentDecided {
            enemy: enemy.entity_id,
            action,
        });

        Ok(action)
    }

    /// Carry out the enemy's pending intent, then decide the next one.
    ///
    /// Attack damages `party`, Defend adds to the enemy's own defense, and
    /// Buff/Special have no effect yet. Defense is cleared at the point
    /// given by the selector's [`BlockExpiry`].
    pub fn execute_action(
        &mut self,
        enemy: &mut EnemyInstance,
        party: &mut Party,
        events: &mut EventQueue,
    ) -> Result<EnemyAction, DataError> {
        let Some(action) = enemy.take_intent() else {
            warn!(enemy = %enemy.entity_id, "enemy asked to act without an intent");
            return Err(DataError::NoPendingIntent(enemy.entity_id));
        };

        if self.block_expiry == BlockExpiry::StartOfOwnAction {
            enemy.reset_defense(events);
        }

        match action.action_type {
            EnemyActionType::Attack => {
                let lost = party.take_damage(action.value, events);
                debug!(enemy = %enemy.entity_id, damage = action.value, lost, "enemy attacked");
            }
            EnemyActionType::Defend => {
                enemy.add_defense(action.value, events);
            }
            EnemyActionType::Buff | EnemyActionType::Special => {
                debug!(
                    enemy = %enemy.entity_id,
                    action = ?action.action_type,
                    "enemy action has no combat effect"
                );
            }
        }

        events.push(CombatEvent::EnemyActed {
            enemy: enemy.entity_id,
            action,
        });

        if self.block_expiry == BlockExpiry::EndOfOwnAction {
            enemy.reset_defense(events);
        }

        self.decide_next_action(enemy, events)?;
        Ok(action)
    }
}
