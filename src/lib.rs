//! # gametree
//!
//! Time-bounded game-tree search agents for finite, turn-based, possibly
//! stochastic games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: the engines consume games only through the
//!    [`Game`](core::Game) trait — mover, legal actions, pure transitions,
//!    per-player utility/heuristic, and chance resolution.
//!
//! 2. **Anytime**: every search is interruptible. Engines poll a wall-clock
//!    budget cooperatively and always return a legal action, falling back
//!    to a one-ply greedy choice when nothing better was learned in time.
//!
//! 3. **Persistent Trees**: each agent keeps its search tree across turns
//!    and re-roots it onto the game's actual next state, reusing the work
//!    already spent on the line the game followed.
//!
//! ## Architecture
//!
//! - **Arena Trees**: nodes in a flat vector, index-based parent/child
//!   links, O(1) re-rooting with bulk free of the orphaned slots.
//!
//! - **Chance as Sampling**: chance ("nature") decision points are never
//!   chosen by the search; both engines resolve them through the game's
//!   own distribution, and alpha-beta approximates their value from a
//!   sampled outcome-frequency table.
//!
//! - **Deterministic Randomness**: all stochastic choices flow through a
//!   seeded RNG, so searches are reproducible up to wall-clock effects.
//!
//! ## Modules
//!
//! - `core`: players, the game contract, evaluation helpers, RNG
//! - `tree`: the shared arena search tree
//! - `budget`: wall-clock budget tracking and cooperative polling
//! - `agents`: the alpha-beta and MCTS engines
//! - `games`: bundled reference games for tests and benchmarks

pub mod agents;
pub mod budget;
pub mod core;
pub mod games;
pub mod tree;

// Re-export commonly used types
pub use crate::core::{
    relative_score, weighted_heuristic, weighted_utility, Game, GameRng, IllegalActionError,
    Mover, PlayerId,
};

pub use crate::tree::{NodeId, SearchTree};

pub use crate::budget::{PollTicker, TimeBudget};

pub use crate::agents::{
    Agent, AlphaBetaAgent, AlphaBetaConfig, AlphaBetaStats, MctsAgent, MctsConfig, MctsStats,
    SearchError,
};

pub use crate::games::{CountGame, DiceGame, SequenceGame};
