//! Monte-Carlo Tree Search with UCT selection and deadline-aware playout
//! budgeting.
//!
//! The classic four-phase loop over the persistent tree: select a leaf by
//! upper confidence bound, expand one child per legal action, play the
//! position out with uniformly random moves, and propagate the result up
//! the ancestor chain. Chance states are never chosen by the search — both
//! selection and playouts resolve them by sampling the game's own
//! distribution. The returned move is the robust child: most played, then
//! most won.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::budget::{PollTicker, TimeBudget};
use crate::core::{heuristic_vector, relative_score, utility_vector, Game, GameRng, Mover, PlayerId};
use crate::tree::{NodeId, SearchTree};

use super::{greedy_action, state_order, Agent, SearchError};

/// Configuration for [`MctsAgent`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MctsConfig {
    /// UCT exploration constant (default: sqrt(2)).
    pub exploitation_constant: f64,

    /// Minimum playouts a freshly expanded node should accumulate before
    /// selection moves on, clock permitting.
    pub min_playouts: u32,

    /// Once 1/proportion of the budget is spent, minimum-playout batches
    /// are rationed against the remaining clock instead of run in full.
    pub playout_proportion: u32,

    /// Deadline poll stride: the clock is consulted every N-th step.
    pub poll_stride: u32,

    /// Depth cap for the re-root scan over the previous turn's tree.
    pub reroot_scan_depth: u32,

    /// Seed for the playout RNG.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploitation_constant: std::f64::consts::SQRT_2,
            min_playouts: 128,
            playout_proportion: 2,
            poll_stride: 31,
            reroot_scan_depth: 32,
            seed: 42,
        }
    }
}

impl MctsConfig {
    pub fn with_exploitation(mut self, c: f64) -> Self {
        self.exploitation_constant = c;
        self
    }

    pub fn with_min_playouts(mut self, n: u32) -> Self {
        self.min_playouts = n;
        self
    }

    pub fn with_poll_stride(mut self, stride: u32) -> Self {
        self.poll_stride = stride;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Diagnostics from the most recent `compute_next_action` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MctsStats {
    /// Playouts completed this call.
    pub playouts: u32,

    /// Play count at the root after the search.
    pub root_plays: u32,

    /// Win count at the root after the search.
    pub root_wins: u32,

    /// Live nodes in the tree after the search.
    pub tree_nodes: usize,

    /// Whether the previous turn's tree was re-rooted (vs. reset).
    pub rerooted: bool,

    /// Wall-clock time spent, microseconds.
    pub time_us: u64,
}

/// Per-node play/win bookkeeping. Counts only ever grow until the node's
/// subtree is discarded by a re-root.
pub struct McNode<G: Game> {
    game: G,
    wins: u32,
    plays: u32,
}

impl<G: Game> McNode<G> {
    fn new(game: G) -> Self {
        Self {
            game,
            wins: 0,
            plays: 0,
        }
    }

    /// The game state this node wraps.
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn plays(&self) -> u32 {
        self.plays
    }
}

/// Time-bounded UCT agent.
pub struct MctsAgent<G: Game> {
    config: MctsConfig,
    player: PlayerId,
    player_count: usize,
    tree: Option<SearchTree<McNode<G>>>,
    rng: GameRng,
    stats: MctsStats,
}

impl<G: Game> MctsAgent<G> {
    pub fn new(config: MctsConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            player: PlayerId::new(0),
            player_count: 0,
            tree: None,
            rng,
            stats: MctsStats::default(),
        }
    }

    /// Diagnostics from the last call.
    pub fn stats(&self) -> &MctsStats {
        &self.stats
    }

    // Robust-child ordering: plays, then wins, then the shared state
    // ordering.
    fn move_cmp(player: PlayerId, a: &McNode<G>, b: &McNode<G>) -> Ordering {
        a.plays
            .cmp(&b.plays)
            .then_with(|| a.wins.cmp(&b.wins))
            .then_with(|| state_order(&a.game, &b.game, player))
    }

    fn find_or_reset_root(&mut self, game: &G) -> SearchTree<McNode<G>> {
        if let Some(mut tree) = self.tree.take() {
            if let Some(id) = tree.find(|n| n.game == *game, self.config.reroot_scan_depth) {
                tree.reroot(id);
                self.stats.rerooted = true;
                return tree;
            }
        }
        SearchTree::new(McNode::new(game.clone()))
    }

    /// Walk the most-played chain while every level is chance-free, sorting
    /// the preferred child to the front. True when the chain is chance-free
    /// throughout and ends in a terminal state — the game is decided and
    /// the first move can be played without further playouts.
    fn sort_promising_candidates(&self, tree: &mut SearchTree<McNode<G>>) -> bool {
        let mut id = tree.root();
        let mut determined = true;
        while !tree.is_leaf(id) && determined {
            determined = tree
                .children(id)
                .iter()
                .all(|&c| !tree.get(c).game.mover().is_chance());
            let player = self.player;
            let agent_turn = tree.get(id).game.mover() == Mover::Player(player);
            tree.sort_children_by(id, move |a, b| {
                let ord = Self::move_cmp(player, a, b);
                if agent_turn {
                    ord.reverse()
                } else {
                    ord
                }
            });
            id = tree.children(id)[0];
        }
        determined && tree.get(id).game.is_over()
    }

    /// UCT score of a node: win rate plus the exploration bonus, using the
    /// parent's play count for the log term (the node's own at the root).
    fn uct(&self, tree: &SearchTree<McNode<G>>, id: NodeId) -> f64 {
        let node = tree.get(id);
        let n = f64::from(node.plays.max(1));
        let big_n = match tree.parent(id) {
            Some(parent) => f64::from(tree.get(parent).plays),
            None => n,
        };
        f64::from(node.wins) / n + self.config.exploitation_constant * (big_n.ln() / n).sqrt()
    }

    /// Descend from the root to a leaf. Player decisions follow the best
    /// UCT score; chance decisions follow the outcome the game itself
    /// samples.
    fn select(&mut self, tree: &SearchTree<McNode<G>>, budget: &TimeBudget) -> NodeId {
        let mut id = tree.root();
        let mut ticker = PollTicker::new(self.config.poll_stride);
        while !tree.is_leaf(id) {
            if ticker.should_stop(budget) {
                break;
            }
            if tree.get(id).game.mover().is_chance() {
                let Some(action) = tree.get(id).game.resolve_chance(&mut self.rng) else {
                    debug_assert!(false, "chance state failed to resolve an outcome");
                    break;
                };
                let matched = tree
                    .children(id)
                    .iter()
                    .copied()
                    .find(|&c| tree.get(c).game.previous_action() == Some(&action));
                match matched {
                    Some(child) => id = child,
                    None => break,
                }
            } else {
                let best = tree
                    .children(id)
                    .iter()
                    .copied()
                    .max_by(|&a, &b| {
                        self.uct(tree, a).total_cmp(&self.uct(tree, b)).then_with(|| {
                            state_order(&tree.get(a).game, &tree.get(b).game, self.player)
                        })
                    })
                    .expect("non-leaf node must have children");
                id = best;
            }
        }
        id
    }

    /// Materialize one child per legal action under a leaf. Terminal
    /// states stay leaves.
    fn expand(&mut self, tree: &mut SearchTree<McNode<G>>, id: NodeId) -> Result<(), SearchError> {
        if tree.is_leaf(id) {
            let game = tree.get(id).game.clone();
            for action in game.legal_actions() {
                let child = McNode::new(game.apply(&action)?);
                tree.add_child(id, child);
            }
        }
        Ok(())
    }

    /// Run one playout from a node under the budgeting policy: a node short
    /// of its minimum playouts gets a slice of the remaining clock once the
    /// proportional deadline has passed; a node's first playout may use at
    /// most half the total budget; otherwise the playout runs to a terminal
    /// state (deadline polled).
    fn simulate(
        &mut self,
        tree: &SearchTree<McNode<G>>,
        id: NodeId,
        budget: &TimeBudget,
    ) -> Result<bool, SearchError> {
        let done = tree.get(id).plays;
        let game = tree.get(id).game.clone();
        if done < self.config.min_playouts
            && budget.should_stop_proportion(self.config.playout_proportion)
        {
            let remaining = u64::from(self.config.min_playouts - done);
            let slice = budget.nanos_left() / remaining.max(1);
            return self.playout(game, budget, Some(slice));
        }
        if done == 0 {
            let cap = (budget.timeout_nanos() / 2).saturating_sub(budget.nanos_elapsed());
            return self.playout(game, budget, Some(cap));
        }
        self.playout(game, budget, None)
    }

    /// Play uniformly random legal actions (chance resolved by the game)
    /// until a terminal state, the per-playout timeout, or the deadline.
    fn playout(
        &mut self,
        mut game: G,
        budget: &TimeBudget,
        timeout: Option<u64>,
    ) -> Result<bool, SearchError> {
        let start = Instant::now();
        let mut ticker = PollTicker::new(self.config.poll_stride);
        while !game.is_over() {
            if let Some(limit) = timeout {
                if start.elapsed().as_nanos() as u64 > limit {
                    break;
                }
            }
            if ticker.should_stop(budget) {
                break;
            }
            let action = if game.mover().is_chance() {
                game.resolve_chance(&mut self.rng)
                    .expect("chance state must resolve an outcome")
            } else {
                let actions = game.legal_actions();
                debug_assert!(!actions.is_empty(), "non-terminal state has no legal actions");
                self.rng
                    .choose(&actions)
                    .expect("non-terminal state has no legal actions")
                    .clone()
            };
            game = game.apply(&action)?;
        }
        Ok(self.has_won(&game))
    }

    /// Score a (possibly unfinished) playout: a sole best outcome is a win,
    /// an exact tie is a coin flip, anything else a loss. Unfinished
    /// playouts that are not already lost fall back to the heuristic.
    fn has_won(&mut self, game: &G) -> bool {
        let mut score = relative_score(&utility_vector(game), self.player);
        if !game.is_over() && score > 0.0 {
            score = relative_score(&heuristic_vector(game), self.player);
        }
        if score == 1.0 {
            true
        } else if score > 0.0 {
            self.rng.coin_flip()
        } else {
            false
        }
    }

    /// Credit the playout to every ancestor of the simulated node, root
    /// included.
    fn backpropagate(
        &mut self,
        tree: &mut SearchTree<McNode<G>>,
        id: NodeId,
        won: bool,
        budget: &TimeBudget,
    ) {
        let mut ticker = PollTicker::new(self.config.poll_stride);
        let mut current = id;
        while let Some(parent) = tree.parent(current) {
            if ticker.should_stop(budget) {
                break;
            }
            let node = tree.get_mut(parent);
            node.plays += 1;
            if won {
                node.wins += 1;
            }
            current = parent;
        }
    }

    /// Best root child by (plays, wins, position).
    fn best_child_action(&self, tree: &SearchTree<McNode<G>>) -> Result<G::Action, SearchError> {
        let mut best: Option<NodeId> = None;
        for &child in tree.children(tree.root()) {
            let better = match best {
                None => true,
                Some(b) => {
                    Self::move_cmp(self.player, tree.get(child), tree.get(b))
                        == Ordering::Greater
                }
            };
            if better {
                best = Some(child);
            }
        }
        let best = best.ok_or(SearchError::NoLegalActions)?;
        Ok(tree
            .get(best)
            .game
            .previous_action()
            .cloned()
            .expect("expanded child must record its previous action"))
    }
}

impl<G: Game> Agent<G> for MctsAgent<G> {
    fn setup(&mut self, number_of_players: usize, player_id: PlayerId) {
        self.player_count = number_of_players;
        self.player = player_id;
        self.tree = None;
        self.rng = GameRng::new(self.config.seed);
        self.stats = MctsStats::default();
    }

    fn compute_next_action(
        &mut self,
        game: &G,
        budget: Duration,
    ) -> Result<G::Action, SearchError> {
        debug_assert_eq!(
            game.player_count(),
            self.player_count,
            "setup does not match the game"
        );
        let budget = TimeBudget::new(budget);
        self.stats = MctsStats::default();
        let mut tree = self.find_or_reset_root(game);
        trace!(rerooted = self.stats.rerooted, "searched for root of tree");

        if self.sort_promising_candidates(&mut tree) {
            debug!("best line is proven to end the game, playing it");
            let action = self.best_child_action(&tree);
            self.finish_stats(&tree, &budget);
            self.tree = Some(tree);
            return action;
        }

        while !budget.should_stop() {
            let leaf = self.select(&tree, &budget);
            self.expand(&mut tree, leaf)?;
            let won = self.simulate(&tree, leaf, &budget)?;
            self.backpropagate(&mut tree, leaf, won, &budget);
            self.stats.playouts += 1;
        }
        debug!(
            playouts = self.stats.playouts,
            root_plays = tree.get(tree.root()).plays,
            nodes = tree.len(),
            "finished simulating"
        );

        if tree.is_leaf(tree.root()) {
            debug!("could not grow a tree, choosing the next best greedy option");
            self.finish_stats(&tree, &budget);
            self.tree = Some(tree);
            return greedy_action(game, self.player);
        }
        let action = self.best_child_action(&tree);
        self.finish_stats(&tree, &budget);
        self.tree = Some(tree);
        action
    }
}

impl<G: Game> MctsAgent<G> {
    fn finish_stats(&mut self, tree: &SearchTree<McNode<G>>, budget: &TimeBudget) {
        let root = tree.get(tree.root());
        self.stats.root_plays = root.plays;
        self.stats.root_wins = root.wins;
        self.stats.tree_nodes = tree.len();
        self.stats.time_us = budget.nanos_elapsed() / 1_000;
    }
}
