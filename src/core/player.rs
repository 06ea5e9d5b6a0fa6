//! Player identification and the decision-maker marker.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## Mover
//!
//! Who decides at a state: a player, or the game's own randomness
//! ("nature"). Chance states are resolved by sampling the game's
//! distribution, never by search.

use serde::{Deserialize, Serialize};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// The decision-maker at a game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mover {
    /// A player chooses the next action.
    Player(PlayerId),
    /// The game's own randomness determines the next action.
    Chance,
}

impl Mover {
    /// Check whether this is a chance ("nature") decision point.
    #[inline]
    #[must_use]
    pub const fn is_chance(self) -> bool {
        matches!(self, Mover::Chance)
    }

    /// The deciding player, if any.
    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Mover::Player(p) => Some(p),
            Mover::Chance => None,
        }
    }
}
