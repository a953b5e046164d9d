//! Card effect resolution.
//!
//! The resolver applies a played card's primary effect by card type:
//! Attack damages the target enemy, Defend adds to the party's shared block.
//! Secondary effects (the card's `effects` list) go to an [`EffectHandler`]
//! supplied by the caller, since their numbers are defined by content, not
//! by the combat core.
//!
//! Legality (phase, mana, target) is checked before resolution. By the time
//! the resolver runs, the play is accepted.

use tracing::debug;

use crate::cards::{CardEffect, CardInstance, CardType};
use crate::core::{EntityId, Party};
use crate::enemies::EnemyInstance;
use crate::events::EventQueue;
use crate::zones::CardZones;

/// Mutable battle state an effect may touch.
pub struct EffectContext<'a> {
    pub party: &'a mut Party,
    pub enemies: &'a mut [EnemyInstance],
    pub zones: &'a mut CardZones,
    pub events: &'a mut EventQueue,
}

impl EffectContext<'_> {
    /// The living enemy with this entity id.
    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut EnemyInstance> {
        self.enemies
            .iter_mut()
            .find(|e| e.entity_id == id && e.is_alive())
    }
}

/// Hook for secondary card effects.
pub trait EffectHandler {
    /// Apply one secondary effect of `card`.
    fn apply(
        &mut self,
        card: &CardInstance,
        effect: &CardEffect,
        target: Option<EntityId>,
        ctx: &mut EffectContext<'_>,
    );
}

/// Default handler: records the effect in the log and does nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnimplementedEffects;

impl EffectHandler for UnimplementedEffects {
    fn apply(
        &mut self,
        card: &CardInstance,
        effect: &CardEffect,
        target: Option<EntityId>,
        _ctx: &mut EffectContext<'_>,
    ) {
        debug!(
            card = %card.card_id(),
            effect = ?effect.effect_type,
            value = effect.value,
            target = ?target,
            "secondary effect has no handler"
        );
    }
}

/// What resolving a card did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardResolution {
    /// HP removed from the target enemy.
    pub damage_dealt: i32,
    /// Block added to the party pool.
    pub block_gained: i32,
    /// Secondary effects passed to the handler.
    pub secondary_effects: usize,
}

/// Resolves played cards.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `card` to the battle.
    pub fn resolve_card(
        card: &CardInstance,
        target: Option<EntityId>,
        ctx: &mut EffectContext<'_>,
        handler: &mut dyn EffectHandler,
    ) -> CardResolution {
        let mut resolution = CardResolution::default();
        let value = card.value();

        match card.card_type() {
            CardType::Attack => {
                let enemy = match target {
                    Some(id) => ctx
                        .enemies
                        .iter_mut()
                        .find(|e| e.entity_id == id && e.is_alive()),
                    None => None,
                };
                match enemy {
                    Some(enemy) => {
                        resolution.damage_dealt = enemy.take_damage(value, ctx.events);
                    }
                    None => debug!(card = %card.entity_id, ?target, "attack has no living target"),
                }
            }
            CardType::Defend => {
                ctx.party.gain_block(value, ctx.events);
                resolution.block_gained = value.max(0);
            }
            CardType::Skill | CardType::Support => {}
        }

        for effect in &card.definition.effects {
            handler.apply(card, effect, target, ctx);
            resolution.secondary_effects += 1;
        }

        resolution
    }
}
