//! Winning-line sequence game.
//!
//! Players alternately append symbols from a fixed alphabet to a shared
//! sequence. Reaching one of the listed winning lines ends the game with
//! utility 1 for the player who completed the line and 0 for everyone
//! else; making the sequence unreachable (no listed line extends it) ends
//! the game in a 0.5-each draw. The line lengths therefore decide who can
//! win: a player only profits from lines they would be the one to finish.

use std::cmp::Ordering;

use im::Vector;

use crate::core::{Game, GameRng, IllegalActionError, Mover, PlayerId};

use super::ActionRecord;

/// The sequence game state.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceGame {
    lines: Vector<String>,
    alphabet: Vector<char>,
    player_count: usize,
    sequence: String,
    history: Vector<ActionRecord<char>>,
}

impl SequenceGame {
    /// Create a game over the given winning lines and alphabet.
    #[must_use]
    pub fn new(lines: &[&str], alphabet: &[char], player_count: usize) -> Self {
        assert!(player_count >= 1, "need at least one player");
        assert!(
            lines.iter().all(|line| !line.is_empty()),
            "winning lines must be non-empty"
        );
        Self {
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            alphabet: alphabet.iter().copied().collect(),
            player_count,
            sequence: String::new(),
            history: Vector::new(),
        }
    }

    /// The sequence built so far.
    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    fn completed(&self) -> bool {
        self.lines.iter().any(|line| *line == self.sequence)
    }

    fn derailed(&self) -> bool {
        !self.completed() && !self.lines.iter().any(|line| line.starts_with(&self.sequence))
    }

    /// The player who would finish a line of `length` symbols.
    fn finisher(&self, length: usize) -> PlayerId {
        PlayerId::new(((length - 1) % self.player_count) as u8)
    }
}

impl Game for SequenceGame {
    type Action = char;

    fn player_count(&self) -> usize {
        self.player_count
    }

    fn mover(&self) -> Mover {
        Mover::Player(PlayerId::new(
            (self.history.len() % self.player_count) as u8,
        ))
    }

    fn legal_actions(&self) -> Vec<char> {
        if self.is_over() {
            Vec::new()
        } else {
            self.alphabet.iter().copied().collect()
        }
    }

    fn apply(&self, action: &char) -> Result<Self, IllegalActionError> {
        if self.is_over() {
            return Err(IllegalActionError::Terminal);
        }
        if !self.alphabet.contains(action) {
            return Err(IllegalActionError::NotLegal);
        }
        let mut next = self.clone();
        next.sequence.push(*action);
        next.history
            .push_back(ActionRecord::new(self.mover(), *action));
        Ok(next)
    }

    fn is_over(&self) -> bool {
        self.completed() || self.derailed()
    }

    fn utility(&self, player: PlayerId) -> f64 {
        if self.completed() {
            if self.finisher(self.history.len()) == player {
                1.0
            } else {
                0.0
            }
        } else {
            // Derailed games draw; ongoing games are undecided.
            0.5
        }
    }

    fn heuristic(&self, player: PlayerId) -> f64 {
        if self.is_over() {
            return self.utility(player);
        }
        // Share of still-reachable lines this player would finish.
        let reachable: Vec<&String> = self
            .lines
            .iter()
            .filter(|line| line.starts_with(&self.sequence))
            .collect();
        let own = reachable
            .iter()
            .filter(|line| self.finisher(line.chars().count()) == player)
            .count();
        own as f64 / reachable.len() as f64
    }

    fn resolve_chance(&self, _rng: &mut GameRng) -> Option<char> {
        None
    }

    fn previous_action(&self) -> Option<&char> {
        self.history.last().map(|record| &record.action)
    }

    fn position_cmp(&self, other: &Self) -> Ordering {
        self.sequence.cmp(&other.sequence)
    }
}
