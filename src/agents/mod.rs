//! Decision-making agents built on the shared search tree.
//!
//! Both engines follow the same per-turn shape: re-root the persistent
//! tree onto the caller's state (or start fresh on a miss), search until
//! the deadline, and always hand back a legal action — falling back to a
//! one-ply greedy choice when the tree never grew beyond its root.

pub mod alphabeta;
pub mod mcts;

use std::cmp::Ordering;
use std::time::Duration;

use thiserror::Error;

use crate::core::{weighted_heuristic, weighted_utility, Game, IllegalActionError, PlayerId};

pub use alphabeta::{AlphaBetaAgent, AlphaBetaConfig, AlphaBetaStats};
pub use mcts::{MctsAgent, MctsConfig, MctsStats};

/// Errors surfaced by `compute_next_action`.
///
/// Running out of time is never an error — the engines fall back to the
/// greedy choice. Only a state with nothing legal to do, or a collaborator
/// rejecting an action it itself listed as legal, surfaces here.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no legal actions available at the searched state")]
    NoLegalActions,

    #[error("game rejected an action during search: {0}")]
    IllegalAction(#[from] IllegalActionError),
}

/// A decision-making agent for one player seat.
///
/// An instance serves exactly one seat for a game's lifetime and must not
/// be shared across threads mid-call: the search tree is exclusively owned
/// and mutated by the calling thread for the duration of one
/// `compute_next_action`.
pub trait Agent<G: Game> {
    /// (Re)initialize for a fresh game. Must be called before first use and
    /// whenever the game restarts; discards any persistent search tree.
    fn setup(&mut self, number_of_players: usize, player_id: PlayerId);

    /// Choose an action for the current state within a wall-clock budget.
    ///
    /// The budget is advisory: the engines poll cooperatively, so a single
    /// expensive evaluation can overrun it by a bounded amount.
    fn compute_next_action(&mut self, game: &G, budget: Duration)
        -> Result<G::Action, SearchError>;
}

/// The shared state ordering: weighted utility, then weighted heuristic,
/// then the game's own deterministic position tie-break.
pub(crate) fn state_order<G: Game>(a: &G, b: &G, player: PlayerId) -> Ordering {
    weighted_utility(a, player)
        .total_cmp(&weighted_utility(b, player))
        .then_with(|| weighted_heuristic(a, player).total_cmp(&weighted_heuristic(b, player)))
        .then_with(|| a.position_cmp(b))
}

/// One-ply greedy fallback: apply every legal action and keep the one whose
/// successor ranks highest under the shared state ordering. Used whenever a
/// search ends with a tree that never grew beyond its root.
pub(crate) fn greedy_action<G: Game>(game: &G, player: PlayerId) -> Result<G::Action, SearchError> {
    let mut best: Option<(G, G::Action)> = None;
    for action in game.legal_actions() {
        let successor = game.apply(&action)?;
        let better = match &best {
            None => true,
            Some((incumbent, _)) => state_order(&successor, incumbent, player) == Ordering::Greater,
        };
        if better {
            best = Some((successor, action));
        }
    }
    best.map(|(_, action)| action)
        .ok_or(SearchError::NoLegalActions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::count::CountGame;

    #[test]
    fn test_greedy_picks_highest_immediate_utility() {
        // Adding +1 maximizes player 0's score differential.
        let game = CountGame::new(-5, 5);
        let action = greedy_action(&game, PlayerId::new(0)).unwrap();
        assert_eq!(action, 1);
    }

    #[test]
    fn test_greedy_respects_player_perspective() {
        // Player 1 profits from a falling score.
        let game = CountGame::with_start(PlayerId::new(1), 0, -5, 5);
        let action = greedy_action(&game, PlayerId::new(1)).unwrap();
        assert_eq!(action, -1);
    }

    #[test]
    fn test_greedy_on_terminal_state_errors() {
        let game = CountGame::with_start(PlayerId::new(0), 9, -5, 5);
        assert!(game.is_over());
        assert!(matches!(
            greedy_action(&game, PlayerId::new(0)),
            Err(SearchError::NoLegalActions)
        ));
    }
}
