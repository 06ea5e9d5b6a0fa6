//! Iterative-deepening alpha-beta search with dual (utility, heuristic)
//! bounds, quiescence extension, and sampled chance-node backup.
//!
//! The search keeps one persistent tree across turns. Each invocation
//! re-roots the tree onto the caller's state, runs depth-limited labeling
//! passes until the deadline, and reads the best action off the root's
//! children. Depth targets come from empirically fitted schedules; the
//! constants are tuned values and must not be "simplified".
//!
//! Pruning is deliberately conservative: a subtree is cut only when *both*
//! the utility and the heuristic windows are closed. Chance nodes are never
//! pruned; their value is approximated by repeatedly sampling the game's
//! own outcome distribution and adopting the value behind the plurality
//! outcome.

use std::cmp::Ordering;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::budget::{PollTicker, TimeBudget};
use crate::core::{weighted_heuristic, weighted_utility, Game, GameRng, Mover, PlayerId};
use crate::tree::{NodeId, SearchTree};

use super::{greedy_action, state_order, Agent, SearchError};

/// Configuration for [`AlphaBetaAgent`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlphaBetaConfig {
    /// Hard cap on the target search depth.
    pub max_depth: u32,

    /// Deadline poll stride: the clock is consulted every N-th node visit.
    pub poll_stride: u32,

    /// Depth cap for the re-root scan over the previous turn's tree.
    pub reroot_scan_depth: u32,

    /// Whether alpha-beta cutoffs are applied. Disabling falls back to
    /// full-width min-max labeling of the same tree; both must choose the
    /// same action on a fixed-depth search.
    pub pruning: bool,

    /// Seed for the chance-node sampling RNG.
    pub seed: u64,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            poll_stride: 31,
            reroot_scan_depth: 32,
            pruning: true,
            seed: 42,
        }
    }
}

impl AlphaBetaConfig {
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_poll_stride(mut self, stride: u32) -> Self {
        self.poll_stride = stride;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Diagnostics from the most recent `compute_next_action` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AlphaBetaStats {
    /// Alpha cutoffs in the last labeling pass.
    pub alpha_cutoffs: u32,

    /// Beta cutoffs in the last labeling pass.
    pub beta_cutoffs: u32,

    /// Live nodes in the tree after the search.
    pub tree_nodes: usize,

    /// Target depth of the last labeling pass.
    pub target_depth: u32,

    /// Labeling passes completed.
    pub passes: u32,

    /// Running mean of observed legal-action-set sizes.
    pub average_branching: f64,

    /// Whether the previous turn's tree was re-rooted (vs. reset).
    pub rerooted: bool,

    /// Wall-clock time spent, microseconds.
    pub time_us: u64,
}

/// Per-node search metadata.
///
/// The wrapped game state is never replaced after construction; updates
/// touch only the scalar fields. Chance nodes additionally carry a table of
/// observed outcome counts approximating the game's hidden distribution.
pub struct AbNode<G: Game> {
    game: G,
    utility: f64,
    heuristic: f64,
    absolute_depth: u32,
    evaluated: bool,
    outcome_counts: Option<FxHashMap<G::Action, u32>>,
}

impl<G: Game> AbNode<G> {
    fn new(game: G, agent: PlayerId, absolute_depth: u32) -> Self {
        // Unevaluated nodes start at the minimax identity for their mover:
        // -inf where the agent maximizes, +inf where an opponent (or
        // chance) minimizes.
        let sign = if game.mover() == Mover::Player(agent) {
            1.0
        } else {
            -1.0
        };
        let unevaluated = f64::NEG_INFINITY * sign;
        let outcome_counts = game.mover().is_chance().then(FxHashMap::default);
        Self {
            game,
            utility: unevaluated,
            heuristic: unevaluated,
            absolute_depth,
            evaluated: false,
            outcome_counts,
        }
    }

    /// The game state this node wraps.
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn utility(&self) -> f64 {
        self.utility
    }

    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Sample the chance distribution `times` times into the outcome table.
    /// No-op at player decision nodes.
    fn sample_outcomes(&mut self, rng: &mut GameRng, times: u64) {
        for _ in 0..times {
            if let Some(action) = self.game.resolve_chance(rng) {
                if let Some(counts) = self.outcome_counts.as_mut() {
                    *counts.entry(action).or_insert(0) += 1;
                }
            }
        }
    }

    /// Whether any outcome samples have been recorded yet.
    fn has_samples(&self) -> bool {
        self.outcome_counts.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Whether `action` is (one of) the most-sampled outcome(s).
    /// Always false at player decision nodes.
    fn is_plurality_outcome(&self, action: &G::Action) -> bool {
        match &self.outcome_counts {
            None => false,
            Some(counts) => {
                let observed = counts.get(action).copied().unwrap_or(0);
                counts.values().all(|&c| c <= observed)
            }
        }
    }
}

/// Time-bounded iterative-deepening alpha-beta agent.
pub struct AlphaBetaAgent<G: Game> {
    config: AlphaBetaConfig,
    player: PlayerId,
    player_count: usize,
    tree: Option<SearchTree<AbNode<G>>>,
    rng: GameRng,
    last_depth: u32,
    excess_time: u64,
    average_branching: f64,
    average_branching_count: u64,
    stats: AlphaBetaStats,
}

impl<G: Game> AlphaBetaAgent<G> {
    pub fn new(config: AlphaBetaConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            player: PlayerId::new(0),
            player_count: 0,
            tree: None,
            rng,
            last_depth: 1,
            excess_time: 2,
            average_branching: 10.0,
            average_branching_count: 0,
            stats: AlphaBetaStats::default(),
        }
    }

    /// Diagnostics from the last call.
    pub fn stats(&self) -> &AlphaBetaStats {
        &self.stats
    }

    // Ordering on (utility, heuristic) only — used for quiescence sorting.
    fn value_cmp(a: &AbNode<G>, b: &AbNode<G>) -> Ordering {
        a.utility
            .total_cmp(&b.utility)
            .then_with(|| a.heuristic.total_cmp(&b.heuristic))
    }

    // Move ordering: backed-up values, then the shared state ordering.
    fn move_cmp(player: PlayerId, a: &AbNode<G>, b: &AbNode<G>) -> Ordering {
        Self::value_cmp(a, b).then_with(|| state_order(&a.game, &b.game, player))
    }

    // Result ordering: evaluated nodes outrank unevaluated ones.
    fn result_cmp(player: PlayerId, a: &AbNode<G>, b: &AbNode<G>) -> Ordering {
        a.evaluated
            .cmp(&b.evaluated)
            .then_with(|| Self::move_cmp(player, a, b))
    }

    /// Locate the caller's state in the previous tree and re-root onto it,
    /// or start a fresh tree on a miss.
    fn find_or_reset_root(&mut self, game: &G) -> SearchTree<AbNode<G>> {
        if let Some(mut tree) = self.tree.take() {
            if let Some(id) = tree.find(|n| n.game == *game, self.config.reroot_scan_depth) {
                tree.reroot(id);
                self.stats.rerooted = true;
                return tree;
            }
        }
        SearchTree::new(AbNode::new(game.clone(), self.player, 0))
    }

    /// Walk the best-move chain while it is fully evaluated and chance-free,
    /// sorting the proven best child to the front at every level. True when
    /// the chain ends in a proven terminal state — the game is decided and
    /// the first move of the chain can be played without searching.
    fn sort_promising_candidates(&self, tree: &mut SearchTree<AbNode<G>>) -> bool {
        let mut id = tree.root();
        let mut determined = true;
        while !tree.is_leaf(id) && tree.get(id).evaluated && determined {
            determined = tree
                .children(id)
                .iter()
                .all(|&c| !tree.get(c).game.mover().is_chance());
            let agent_turn = tree.get(id).game.mover() == Mover::Player(self.player);
            tree.sort_children_by(id, move |a, b| {
                b.evaluated.cmp(&a.evaluated).then_with(|| {
                    let value = Self::value_cmp(a, b);
                    if agent_turn {
                        value.reverse()
                    } else {
                        value
                    }
                })
            });
            id = tree.children(id)[0];
        }
        let node = tree.get(id);
        node.evaluated && node.game.is_over()
    }

    /// Materialize one child per legal action the first time a leaf is
    /// visited. Terminal states stay leaves. Returns whether the node has
    /// children afterwards.
    fn expand_node(
        &mut self,
        tree: &mut SearchTree<AbNode<G>>,
        id: NodeId,
    ) -> Result<bool, SearchError> {
        if tree.is_leaf(id) {
            let node = tree.get(id);
            if !node.game.is_over() {
                let game = node.game.clone();
                let child_depth = node.absolute_depth + 1;
                let actions = game.legal_actions();
                self.average_branching = (self.average_branching
                    * self.average_branching_count as f64
                    + actions.len() as f64)
                    / (self.average_branching_count + 1) as f64;
                self.average_branching_count += 1;
                for action in &actions {
                    let child = AbNode::new(game.apply(action)?, self.player, child_depth);
                    tree.add_child(id, child);
                }
            }
        }
        Ok(!tree.is_leaf(id))
    }

    /// A position is quiet when it is the root, has at most two siblings,
    /// or its own evaluation lies strictly between the extremes of its
    /// sibling values — i.e. it is not an outlier worth extending.
    fn appears_quiet(&self, tree: &SearchTree<AbNode<G>>, id: NodeId) -> bool {
        let Some(parent) = tree.parent(id) else {
            return true;
        };
        let siblings = tree.children(parent);
        if siblings.len() <= 2 {
            return true;
        }
        let min = siblings
            .iter()
            .map(|&c| tree.get(c))
            .min_by(|a, b| Self::result_cmp(self.player, a, b))
            .map(|n| n.utility)
            .unwrap_or(f64::NEG_INFINITY);
        let max = siblings
            .iter()
            .map(|&c| tree.get(c))
            .max_by(|a, b| Self::result_cmp(self.player, a, b))
            .map(|n| n.utility)
            .unwrap_or(f64::INFINITY);
        let own = weighted_utility(&tree.get(id).game, self.player);
        min < own && own < max
    }

    /// Quiescence extension: keep descending into the median child of noisy
    /// positions until a terminal or quiet state supplies the evaluation,
    /// then copy it back onto the original leaf.
    fn quiescence(
        &mut self,
        tree: &mut SearchTree<AbNode<G>>,
        id: NodeId,
    ) -> Result<(), SearchError> {
        let original = id;
        let mut current = id;
        let mut is_quiet = false;
        while !tree.get(current).evaluated {
            let node = tree.get(current);
            let player_turn = !node.game.mover().is_chance();
            if node.game.is_over() || (player_turn && (is_quiet || self.appears_quiet(tree, current)))
            {
                let utility = weighted_utility(&node.game, self.player);
                let heuristic = weighted_heuristic(&node.game, self.player);
                let node = tree.get_mut(current);
                node.utility = utility;
                node.heuristic = heuristic;
                node.evaluated = true;
            } else {
                self.expand_node(tree, current)?;
                debug_assert!(
                    !tree.is_leaf(current),
                    "non-terminal state produced no children"
                );
                tree.sort_children_by(current, Self::value_cmp);
                let kids = tree.children(current);
                current = kids[kids.len() / 2];
                is_quiet = true;
            }
        }
        if !tree.get(original).evaluated {
            let (utility, heuristic) = {
                let node = tree.get(current);
                (node.utility, node.heuristic)
            };
            let node = tree.get_mut(original);
            node.utility = utility;
            node.heuristic = heuristic;
            node.evaluated = true;
        }
        Ok(())
    }

    /// Evaluate a resolved node and back its values up into its parent.
    ///
    /// An unevaluated parent copies the child outright. A chance parent
    /// adopts the child only when the child's action is a plurality outcome
    /// of the sampled distribution. A player parent takes the max (agent to
    /// move) or min (opponent to move), independently per channel.
    fn evaluate_node(
        &mut self,
        tree: &mut SearchTree<AbNode<G>>,
        id: NodeId,
        budget: &TimeBudget,
    ) -> Result<(), SearchError> {
        if tree.is_leaf(id) {
            self.quiescence(tree, id)?;
        }
        let Some(parent_id) = tree.parent(id) else {
            return Ok(());
        };
        let (child_utility, child_heuristic) = {
            let node = tree.get(id);
            (node.utility, node.heuristic)
        };
        let parent_mover = tree.get(parent_id).game.mover();
        if !tree.get(parent_id).evaluated {
            let parent = tree.get_mut(parent_id);
            parent.utility = child_utility;
            parent.heuristic = child_heuristic;
        } else if parent_mover.is_chance() {
            let sibling_count = tree.children(parent_id).len() as u64;
            let parent = tree.get_mut(parent_id);
            if !parent.has_samples() {
                let batch = (sibling_count as f64 * simulation_time_factor(budget)).round();
                let times = (batch as i64).max(sibling_count as i64) as u64;
                parent.sample_outcomes(&mut self.rng, times);
            }
            parent.sample_outcomes(&mut self.rng, sibling_count);
            let child_action = tree
                .get(id)
                .game
                .previous_action()
                .cloned()
                .expect("expanded child must record its previous action");
            if tree.get(parent_id).is_plurality_outcome(&child_action) {
                let parent = tree.get_mut(parent_id);
                parent.utility = child_utility;
                parent.heuristic = child_heuristic;
            }
        } else if parent_mover == Mover::Player(self.player) {
            let parent = tree.get_mut(parent_id);
            parent.utility = parent.utility.max(child_utility);
            parent.heuristic = parent.heuristic.max(child_heuristic);
        } else {
            let parent = tree.get_mut(parent_id);
            parent.utility = parent.utility.min(child_utility);
            parent.heuristic = parent.heuristic.min(child_heuristic);
        }
        tree.get_mut(parent_id).evaluated = true;
        Ok(())
    }

    /// Sort a node's children into exploration order and push them onto the
    /// traversal stack. The stack reverses the order, so the side to move
    /// explores its best candidates first.
    fn push_children(
        &self,
        tree: &mut SearchTree<AbNode<G>>,
        id: NodeId,
        stack: &mut Vec<NodeId>,
    ) {
        let player = self.player;
        let agent_turn = tree.get(id).game.mover() == Mover::Player(player);
        tree.sort_children_by(id, move |a, b| {
            let ord = Self::move_cmp(player, a, b);
            if agent_turn {
                ord
            } else {
                ord.reverse()
            }
        });
        stack.extend_from_slice(tree.children(id));
    }

    /// One full-width depth-limited labeling pass without pruning.
    fn label_min_max_tree(
        &mut self,
        tree: &mut SearchTree<AbNode<G>>,
        depth: u32,
        budget: &TimeBudget,
    ) -> Result<(), SearchError> {
        let root = tree.root();
        let limit = (tree.get(root).absolute_depth + depth).max(depth);
        let mut stack: Vec<NodeId> = vec![root];
        let mut last_parent: Option<NodeId> = None;
        let mut ticker = PollTicker::new(self.config.poll_stride);
        while let Some(&id) = stack.last() {
            if ticker.should_stop(budget) {
                break;
            }
            let resolved = last_parent == Some(id)
                || tree.get(id).absolute_depth >= limit
                || !self.expand_node(tree, id)?;
            if resolved {
                self.evaluate_node(tree, id, budget)?;
                stack.pop();
                last_parent = tree.parent(id);
            } else {
                self.push_children(tree, id, &mut stack);
            }
        }
        Ok(())
    }

    /// One depth-limited alpha-beta labeling pass.
    ///
    /// Two (alpha, beta) windows travel with the explicit stack, one per
    /// value channel. A node is cut off only when *both* windows are closed
    /// — the conservative dual-channel condition, preserved exactly.
    /// Children of chance nodes bypass pruning entirely: their backed-up
    /// values are sampled approximations, not sound bounds.
    fn label_alpha_beta_tree(
        &mut self,
        tree: &mut SearchTree<AbNode<G>>,
        depth: u32,
        budget: &TimeBudget,
    ) -> Result<(), SearchError> {
        let root = tree.root();
        let limit = (tree.get(root).absolute_depth + depth).max(depth);
        let mut stack: Vec<NodeId> = vec![root];
        let mut ua_stack = vec![f64::NEG_INFINITY];
        let mut ub_stack = vec![f64::INFINITY];
        let mut ha_stack = vec![f64::NEG_INFINITY];
        let mut hb_stack = vec![f64::INFINITY];
        let mut utility_alpha = f64::NEG_INFINITY;
        let mut utility_beta = f64::INFINITY;
        let mut heuristic_alpha = f64::NEG_INFINITY;
        let mut heuristic_beta = f64::INFINITY;
        let mut last_parent: Option<NodeId> = None;
        let mut ticker = PollTicker::new(self.config.poll_stride);

        while let Some(&id) = stack.last() {
            if ticker.should_stop(budget) {
                break;
            }
            let resolved = last_parent == Some(id)
                || tree.get(id).absolute_depth >= limit
                || !self.expand_node(tree, id)?;
            if resolved {
                self.evaluate_node(tree, id, budget)?;
                let (node_utility, node_heuristic) = {
                    let node = tree.get(id);
                    (node.utility, node.heuristic)
                };
                let parent_maximizes = match tree.parent(id) {
                    None => true,
                    Some(p) => tree.get(p).game.mover() == Mover::Player(self.player),
                };
                if parent_maximizes {
                    utility_alpha = ua_stack.last().copied().unwrap().max(node_utility);
                    heuristic_alpha = ha_stack.last().copied().unwrap().max(node_heuristic);
                    utility_beta = ub_stack.last().copied().unwrap();
                    heuristic_beta = hb_stack.last().copied().unwrap();
                } else {
                    utility_alpha = ua_stack.last().copied().unwrap();
                    heuristic_alpha = ha_stack.last().copied().unwrap();
                    utility_beta = ub_stack.last().copied().unwrap().min(node_utility);
                    heuristic_beta = hb_stack.last().copied().unwrap().min(node_heuristic);
                }
                stack.pop();
                if last_parent == Some(id) {
                    ua_stack.pop();
                    ub_stack.pop();
                    ha_stack.pop();
                    hb_stack.pop();
                }
                last_parent = tree.parent(id);
            } else {
                let parent = tree.parent(id);
                let parent_is_chance =
                    parent.is_some_and(|p| tree.get(p).game.mover().is_chance());
                let window_open = utility_alpha < utility_beta && heuristic_alpha < heuristic_beta;
                if window_open || parent_is_chance {
                    self.push_children(tree, id, &mut stack);
                    ua_stack.push(utility_alpha);
                    ha_stack.push(heuristic_alpha);
                    ub_stack.push(utility_beta);
                    hb_stack.push(heuristic_beta);
                } else {
                    // Cut off: this subtree cannot improve the resolved
                    // window. Its partial evaluation is an approximation
                    // now, so it is discarded, not trusted.
                    let parent = parent.expect("bounds cannot close at the root");
                    if tree.get(parent).game.mover() == Mover::Player(self.player) {
                        self.stats.beta_cutoffs += 1;
                    } else {
                        self.stats.alpha_cutoffs += 1;
                    }
                    tree.get_mut(id).evaluated = false;
                    tree.drop_children(id);
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    fn branching_factor(&self) -> f64 {
        11.9581 * (-0.0447066 * self.average_branching).exp()
    }

    fn time_factor(&self, budget: &TimeBudget) -> f64 {
        0.360674 * (0.4 * budget.seconds_left() as f64).ln()
    }

    fn excess_time_bonus(&self) -> f64 {
        1.11622 * (1.22474 * self.excess_time as f64).ln()
    }

    /// Pick the next pass's target depth from the fitted schedule: deeper
    /// for narrow trees and generous clocks, never below 2, never above the
    /// configured cap, and never regressing past the previous pass by more
    /// than the excess-time bonus allows.
    fn determine_depth(&mut self, budget: &TimeBudget) -> u32 {
        let candidate = (self.branching_factor() * self.time_factor(budget)).round();
        let candidate = if candidate.is_nan() {
            2
        } else {
            (candidate as i64).max(2)
        };
        let bonus = self.excess_time_bonus().round() as i64;
        let depth = (self.last_depth as i64 + bonus).max(candidate);
        let depth = depth.min(self.config.max_depth as i64).max(1);
        self.last_depth = depth as u32;
        self.last_depth
    }

    /// Best root child by (evaluated, utility, heuristic, position).
    fn best_child_action(&self, tree: &SearchTree<AbNode<G>>) -> Result<G::Action, SearchError> {
        let mut best: Option<NodeId> = None;
        for &child in tree.children(tree.root()) {
            let better = match best {
                None => true,
                Some(b) => {
                    Self::result_cmp(self.player, tree.get(child), tree.get(b))
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

impl<G: Game> Agent<G> for AlphaBetaAgent<G> {
    fn setup(&mut self, number_of_players: usize, player_id: PlayerId) {
        self.player_count = number_of_players;
        self.player = player_id;
        self.tree = None;
        self.rng = GameRng::new(self.config.seed);
        self.last_depth = 1;
        self.excess_time = 2;
        self.average_branching = 10.0;
        self.average_branching_count = 0;
        self.stats = AlphaBetaStats::default();
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
        self.stats = AlphaBetaStats::default();
        let mut tree = self.find_or_reset_root(game);
        trace!(rerooted = self.stats.rerooted, "searched for root of tree");

        if self.sort_promising_candidates(&mut tree) {
            debug!("best line is proven to end the game, playing it");
            let action = self.best_child_action(&tree);
            self.stats.tree_nodes = tree.len();
            self.stats.time_us = budget.nanos_elapsed() / 1_000;
            self.tree = Some(tree);
            return action;
        }

        self.last_depth = 1;
        self.excess_time = 2;
        let mut labeled: u64 = 1;
        while !budget.should_stop() && self.excess_time > 1 && labeled <= u64::from(self.last_depth)
        {
            let depth = self.determine_depth(&budget);
            self.stats.target_depth = depth;
            self.stats.alpha_cutoffs = 0;
            self.stats.beta_cutoffs = 0;
            trace!(pass = labeled, depth, "labeling tree");
            if self.config.pruning {
                self.label_alpha_beta_tree(&mut tree, depth, &budget)?;
            } else {
                self.label_min_max_tree(&mut tree, depth, &budget)?;
            }
            let elapsed = budget.nanos_elapsed().clamp(1, budget.timeout_nanos().max(1));
            self.excess_time = budget.timeout_nanos() / elapsed;
            self.stats.passes += 1;
            labeled += 1;
        }
        debug!(
            alpha_cutoffs = self.stats.alpha_cutoffs,
            beta_cutoffs = self.stats.beta_cutoffs,
            nodes = tree.len(),
            average_branching = self.average_branching,
            "finished labeling"
        );
        self.stats.average_branching = self.average_branching;
        self.stats.tree_nodes = tree.len();

        if tree.is_leaf(tree.root()) {
            debug!("could not grow a tree, choosing the next best greedy option");
            self.stats.time_us = budget.nanos_elapsed() / 1_000;
            self.tree = Some(tree);
            return greedy_action(game, self.player);
        }
        if !tree.get(tree.root()).evaluated {
            self.label_min_max_tree(&mut tree, 1, &budget)?;
        }
        let action = self.best_child_action(&tree);
        self.stats.time_us = budget.nanos_elapsed() / 1_000;
        self.tree = Some(tree);
        action
    }
}

/// Chance-node sampling budget: simulations per sibling as a function of
/// the remaining clock. Fitted constants.
fn simulation_time_factor(budget: &TimeBudget) -> f64 {
    21.9815 * (1.57606 * budget.seconds_left() as f64).ln()
}
