//! The owner side of a battle.
//!
//! A party is an ordered roster of up to `max_party_size` characters that
//! share one mana pool and one block pool. Roster index `i` is also the
//! member's entity id in a session (see [`EntityId::party_member`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::entity::EntityId;
use crate::error::DataError;
use crate::events::{CombatEvent, EventQueue};

/// Starting HP of a new Warrior.
pub const WARRIOR_START_HP: i32 = 80;

/// Starting HP of a new Mage.
pub const MAGE_START_HP: i32 = 60;

/// Character class. Cards are owned by a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Priest,
}

impl CharacterClass {
    /// HP a fresh recruit of this class starts with, if known.
    #[must_use]
    pub const fn starting_hp(self) -> Option<i32> {
        match self {
            CharacterClass::Warrior => Some(WARRIOR_START_HP),
            CharacterClass::Mage => Some(MAGE_START_HP),
            CharacterClass::Rogue | CharacterClass::Priest => None,
        }
    }
}

/// One character in the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    pub class: CharacterClass,
    pub current_hp: i32,
    pub max_hp: i32,
}

impl PartyMember {
    /// Create a member at full HP.
    #[must_use]
    pub fn new(class: CharacterClass, max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            class,
            current_hp: max_hp,
            max_hp,
        }
    }

    /// Create a member with the class's starting HP.
    pub fn recruit(class: CharacterClass) -> Result<Self, DataError> {
        class
            .starting_hp()
            .map(|hp| Self::new(class, hp))
            .ok_or(DataError::UnknownClass(class))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }
}

/// Roster plus the shared block pool.
///
/// ```
/// use roguedeck::core::{CharacterClass, Party, PartyMember};
/// use roguedeck::events::EventQueue;
///
/// let mut party = Party::with_capacity(3);
/// party.add_member(PartyMember::recruit(CharacterClass::Warrior).unwrap()).unwrap();
///
/// let mut events = EventQueue::new();
/// party.gain_block(5, &mut events);
/// party.take_damage(8, &mut events);
///
/// assert_eq!(party.block(), 0);
/// assert_eq!(party.members()[0].current_hp, 77);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    members: Vec<PartyMember>,
    capacity: usize,
    block: i32,
}

impl Party {
    /// Create an empty party that holds at most `capacity` members.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
            block: 0,
        }
    }

    /// Add a member to the end of the roster.
    pub fn add_member(&mut self, member: PartyMember) -> Result<(), DataError> {
        if self.members.len() >= self.capacity {
            debug!(capacity = self.capacity, "party is full");
            return Err(DataError::PartyFull(self.capacity));
        }
        debug!(class = ?member.class, "member joined party");
        self.members.push(member);
        Ok(())
    }

    /// Remove the member at `index`.
    pub fn remove_member(&mut self, index: usize) -> Option<PartyMember> {
        if index < self.members.len() {
            let member = self.members.remove(index);
            debug!(class = ?member.class, "member left party");
            Some(member)
        } else {
            None
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    #[must_use]
    pub fn member(&self, index: usize) -> Option<&PartyMember> {
        self.members.get(index)
    }

    /// Check if any member still stands.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.members.iter().any(PartyMember::is_alive)
    }

    /// Current shared block.
    #[must_use]
    pub fn block(&self) -> i32 {
        self.block
    }

    /// Add to the shared block pool. Non-positive amounts are ignored.
    pub fn gain_block(&mut self, amount: i32, events: &mut EventQueue) {
        if amount <= 0 {
            return;
        }
        self.block = self.block.saturating_add(amount);
        debug!(amount, block = self.block, "party gained block");
        events.push(CombatEvent::PartyBlockChanged { block: self.block });
    }

    /// Drop all block (start of every player turn).
    pub fn clear_block(&mut self, events: &mut EventQueue) {
        if self.block == 0 {
            return;
        }
        self.block = 0;
        events.push(CombatEvent::PartyBlockChanged { block: 0 });
    }

    /// Apply incoming damage to the party.
    ///
    /// Block absorbs first and is consumed by what it absorbs. The rest hits
    /// the first living member, clamped at 0 HP. Returns the HP lost.
    pub fn take_damage(&mut self, amount: i32, events: &mut EventQueue) -> i32 {
        if amount <= 0 {
            return 0;
        }

        let absorbed = amount.min(self.block);
        if absorbed > 0 {
            self.block -= absorbed;
            events.push(CombatEvent::PartyBlockChanged { block: self.block });
        }

        let remaining = amount - absorbed;
        if remaining == 0 {
            return 0;
        }

        let Some(index) = self.members.iter().position(PartyMember::is_alive) else {
            return 0;
        };

        let entity = EntityId::party_member(index);
        let member = &mut self.members[index];
        let lost = remaining.min(member.current_hp);
        member.current_hp -= lost;

        debug!(%entity, lost, hp = member.current_hp, "party member hit");
        events.push(CombatEvent::HpChanged {
            entity,
            current: member.current_hp,
            max: member.max_hp,
        });

        if member.current_hp == 0 {
            events.push(CombatEvent::Defeated { entity });
        }

        lost
    }
}
