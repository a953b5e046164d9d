//! Battle-scoped identifiers.
//!
//! A session numbers everything it creates, in a fixed order: the party
//! roster takes `0..party_size`, the encounter's enemies come next, and the
//! deck's card instances follow. Ids are only meaningful inside the session
//! that issued them.
//!
//! ```
//! use roguedeck::core::EntityId;
//!
//! let party_size = 2;
//! assert!(EntityId::party_member(1).is_party_member(party_size));
//!
//! let first_enemy = EntityId(EntityId::first_non_party(party_size));
//! assert!(!first_enemy.is_party_member(party_size));
//! ```

use serde::{Deserialize, Serialize};

/// Party member, enemy or card instance within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Id of the roster slot `index`. Indices past `u32::MAX` saturate.
    #[must_use]
    pub fn party_member(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Raw value of the first id after the roster.
    #[must_use]
    pub fn first_non_party(party_size: usize) -> u32 {
        u32::try_from(party_size).unwrap_or(u32::MAX)
    }

    /// Check if this id falls inside a roster of `party_size`.
    #[must_use]
    pub fn is_party_member(self, party_size: usize) -> bool {
        (self.0 as usize) < party_size
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
