//! Two-player counting duel.
//!
//! Players alternately add -1, 0, or +1 to a shared score. The game ends as
//! soon as the score leaves the configured `[min, max]` band. Player 0
//! profits from a high score, player 1 from a low one, so optimal play is a
//! tug of war: with symmetric bounds the first player to move can always
//! force the score out on their own side.

use std::cmp::Ordering;

use im::Vector;

use crate::core::{Game, GameRng, IllegalActionError, Mover, PlayerId};

use super::ActionRecord;

const STEPS: [i8; 3] = [-1, 0, 1];

/// The counting duel state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountGame {
    current: PlayerId,
    score: i32,
    min: i32,
    max: i32,
    history: Vector<ActionRecord<i8>>,
}

impl CountGame {
    /// Start at score zero with player 0 to move.
    #[must_use]
    pub fn new(min: i32, max: i32) -> Self {
        Self::with_start(PlayerId::new(0), 0, min, max)
    }

    /// Start from an arbitrary score and mover.
    #[must_use]
    pub fn with_start(current: PlayerId, score: i32, min: i32, max: i32) -> Self {
        Self {
            current,
            score,
            min,
            max,
            history: Vector::new(),
        }
    }

    /// The shared score.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }
}

impl Game for CountGame {
    type Action = i8;

    fn player_count(&self) -> usize {
        2
    }

    fn mover(&self) -> Mover {
        Mover::Player(self.current)
    }

    fn legal_actions(&self) -> Vec<i8> {
        if self.is_over() {
            Vec::new()
        } else {
            STEPS.to_vec()
        }
    }

    fn apply(&self, action: &i8) -> Result<Self, IllegalActionError> {
        if self.is_over() {
            return Err(IllegalActionError::Terminal);
        }
        if !STEPS.contains(action) {
            return Err(IllegalActionError::NotLegal);
        }
        let mut next = self.clone();
        next.score += i32::from(*action);
        next.current = PlayerId::new(1 - self.current.0);
        next.history
            .push_back(ActionRecord::new(self.mover(), *action));
        Ok(next)
    }

    fn is_over(&self) -> bool {
        !(self.min <= self.score && self.score <= self.max)
    }

    fn utility(&self, player: PlayerId) -> f64 {
        f64::from(self.score) * (1.0 - 2.0 * player.index() as f64)
    }

    fn resolve_chance(&self, _rng: &mut GameRng) -> Option<i8> {
        None
    }

    fn previous_action(&self) -> Option<&i8> {
        self.history.last().map(|record| &record.action)
    }

    fn position_cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.current.0.cmp(&other.current.0))
            .then_with(|| self.history.len().cmp(&other.history.len()))
    }
}
