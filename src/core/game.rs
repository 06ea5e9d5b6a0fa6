//! The game contract consumed by the search engines.
//!
//! The engines never know the rules of any particular game. Everything they
//! need — whose turn it is, which actions are legal, how a position scores —
//! flows through the [`Game`] trait. States are immutable per turn: `apply`
//! produces a successor and never mutates the receiver.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use super::player::{Mover, PlayerId};
use super::rng::GameRng;

/// Error returned by a game when asked to apply an action it rejects.
#[derive(Debug, Clone, Error)]
pub enum IllegalActionError {
    #[error("action is not legal in this state")]
    NotLegal,

    #[error("cannot apply an action to a terminal state")]
    Terminal,
}

/// A turn-based, possibly stochastic game position.
///
/// Implementations must be cheap to clone: the search tree stores one state
/// per node, and playouts clone states every ply. Equality is positional
/// (used by re-rooting to recognize a state the tree already explored);
/// [`Game::position_cmp`] is a separate total order used only as a
/// deterministic tie-break and need not agree with `==`.
pub trait Game: Clone + PartialEq {
    /// The action type of this game.
    type Action: Clone + Eq + Hash + Debug;

    /// Number of players in the game.
    fn player_count(&self) -> usize;

    /// Who decides at this state.
    fn mover(&self) -> Mover;

    /// All legal actions. Empty exactly when the state is terminal.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply an action, producing the successor state.
    ///
    /// Pure: the receiver is unchanged. Rejects illegal actions and any
    /// action on a terminal state.
    fn apply(&self, action: &Self::Action) -> Result<Self, IllegalActionError>;

    /// Whether the game has ended at this state.
    fn is_over(&self) -> bool;

    /// Scalar outcome value for a player. Exact at terminal states, a
    /// partial estimate elsewhere.
    fn utility(&self, player: PlayerId) -> f64;

    /// Auxiliary evaluation used when utility is uninformative mid-game.
    fn heuristic(&self, player: PlayerId) -> f64 {
        self.utility(player)
    }

    /// Sample the outcome of a chance state from the game's own
    /// distribution. `None` unless `mover()` is [`Mover::Chance`].
    ///
    /// Randomness is drawn from the caller's RNG so that searches are
    /// deterministic under a fixed seed.
    fn resolve_chance(&self, rng: &mut GameRng) -> Option<Self::Action>;

    /// The action that produced this state from its predecessor.
    /// `None` at the initial state.
    fn previous_action(&self) -> Option<&Self::Action>;

    /// A total order over positions, used as a deterministic tie-break.
    /// Must be consistent for the duration of a search run.
    fn position_cmp(&self, other: &Self) -> Ordering;
}

/// Evaluation weighted for one searching player: +1 for the player's own
/// value, -1 for every opponent's, summed. This is the scalar both engines
/// maximize.
pub fn weighted_utility<G: Game>(game: &G, player: PlayerId) -> f64 {
    PlayerId::all(game.player_count())
        .map(|p| {
            let w = if p == player { 1.0 } else { -1.0 };
            w * game.utility(p)
        })
        .sum()
}

/// Heuristic counterpart of [`weighted_utility`].
pub fn weighted_heuristic<G: Game>(game: &G, player: PlayerId) -> f64 {
    PlayerId::all(game.player_count())
        .map(|p| {
            let w = if p == player { 1.0 } else { -1.0 };
            w * game.heuristic(p)
        })
        .sum()
}

/// Reduce a per-player utility vector to a single score for one player:
/// 1.0 when the player holds a (possibly shared) strict best outcome,
/// strictly between 0 and 1 when all players are exactly tied, and 0.0
/// when some other player did strictly better.
///
/// Single-player games have no opponents to compare against; the raw
/// utility is clamped into [0, 1] instead.
pub fn relative_score(utilities: &[f64], player: PlayerId) -> f64 {
    debug_assert!(player.index() < utilities.len());
    if utilities.len() == 1 {
        return utilities[0].clamp(0.0, 1.0);
    }
    let max = utilities.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let min = utilities.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    if max - min < f64::EPSILON {
        1.0 / utilities.len() as f64
    } else {
        (utilities[player.index()] - min) / (max - min)
    }
}

/// Collect every player's utility at a state.
pub fn utility_vector<G: Game>(game: &G) -> Vec<f64> {
    PlayerId::all(game.player_count())
        .map(|p| game.utility(p))
        .collect()
}

/// Collect every player's heuristic value at a state.
pub fn heuristic_vector<G: Game>(game: &G) -> Vec<f64> {
    PlayerId::all(game.player_count())
        .map(|p| game.heuristic(p))
        .collect()
}
