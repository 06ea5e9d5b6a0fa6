//! Core types: players, the game contract, evaluation helpers, RNG.
//!
//! Everything here is game-agnostic. Concrete games implement [`Game`];
//! the search engines consume it and nothing else.

pub mod game;
pub mod player;
pub mod rng;

pub use game::{
    heuristic_vector, relative_score, utility_vector, weighted_heuristic, weighted_utility, Game,
    IllegalActionError,
};
pub use player::{Mover, PlayerId};
pub use rng::GameRng;
