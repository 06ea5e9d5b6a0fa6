//! Bundled reference games.
//!
//! Small, complete [`Game`](crate::core::Game) implementations used by the
//! integration tests and benchmarks: a two-player counting duel, a
//! single-player dice prediction game with chance turns, and the
//! winning-line sequence game. Histories are `im::Vector`s so cloning a
//! state — which search does once per node — shares structure in O(1).

pub mod count;
pub mod dice;
pub mod sequence;

use crate::core::Mover;

pub use count::CountGame;
pub use dice::DiceGame;
pub use sequence::SequenceGame;

/// One recorded move: who decided, and what they did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRecord<A> {
    /// The decision-maker at the time of the action.
    pub mover: Mover,

    /// The action taken.
    pub action: A,
}

impl<A> ActionRecord<A> {
    pub fn new(mover: Mover, action: A) -> Self {
        Self { mover, action }
    }
}
