//! Single-player dice prediction game.
//!
//! The player predicts the sum of two dice (2-12), then two chance turns
//! roll the dice one at a time. A correct prediction scores 1, anything
//! else -1. The two chance turns make this the smallest game exercising
//! [`Mover::Chance`] and `resolve_chance`.

use std::cmp::Ordering;

use im::Vector;

use crate::core::{Game, GameRng, IllegalActionError, Mover, PlayerId};

use super::ActionRecord;

/// The dice prediction state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceGame {
    prediction: Option<u8>,
    die1: Option<u8>,
    die2: Option<u8>,
    history: Vector<ActionRecord<u8>>,
}

impl DiceGame {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prediction: None,
            die1: None,
            die2: None,
            history: Vector::new(),
        }
    }

    /// The predicted sum, once chosen.
    #[must_use]
    pub fn prediction(&self) -> Option<u8> {
        self.prediction
    }

    /// The rolled dice, once both have landed.
    #[must_use]
    pub fn roll(&self) -> Option<(u8, u8)> {
        Some((self.die1?, self.die2?))
    }
}

impl Default for DiceGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for DiceGame {
    type Action = u8;

    fn player_count(&self) -> usize {
        1
    }

    fn mover(&self) -> Mover {
        if self.prediction.is_none() || self.is_over() {
            Mover::Player(PlayerId::new(0))
        } else {
            Mover::Chance
        }
    }

    fn legal_actions(&self) -> Vec<u8> {
        if self.prediction.is_none() {
            (2..=12).collect()
        } else if self.is_over() {
            Vec::new()
        } else {
            (1..=6).collect()
        }
    }

    fn apply(&self, action: &u8) -> Result<Self, IllegalActionError> {
        if self.is_over() {
            return Err(IllegalActionError::Terminal);
        }
        let mut next = self.clone();
        if self.prediction.is_none() {
            if !(2..=12).contains(action) {
                return Err(IllegalActionError::NotLegal);
            }
            next.prediction = Some(*action);
        } else {
            if !(1..=6).contains(action) {
                return Err(IllegalActionError::NotLegal);
            }
            if self.die1.is_none() {
                next.die1 = Some(*action);
            } else {
                next.die2 = Some(*action);
            }
        }
        next.history
            .push_back(ActionRecord::new(self.mover(), *action));
        Ok(next)
    }

    fn is_over(&self) -> bool {
        self.prediction.is_some() && self.die1.is_some() && self.die2.is_some()
    }

    fn utility(&self, _player: PlayerId) -> f64 {
        match (self.prediction, self.die1, self.die2) {
            (Some(prediction), Some(die1), Some(die2)) => {
                if prediction == die1 + die2 {
                    1.0
                } else {
                    -1.0
                }
            }
            _ => 0.0,
        }
    }

    fn resolve_chance(&self, rng: &mut GameRng) -> Option<u8> {
        if self.mover().is_chance() {
            Some(1 + rng.gen_range_usize(0..6) as u8)
        } else {
            None
        }
    }

    fn previous_action(&self) -> Option<&u8> {
        self.history.last().map(|record| &record.action)
    }

    fn position_cmp(&self, other: &Self) -> Ordering {
        self.prediction
            .cmp(&other.prediction)
            .then_with(|| self.die1.cmp(&other.die1))
            .then_with(|| self.die2.cmp(&other.die2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_flow() {
        let game = DiceGame::new();
        assert_eq!(game.mover(), Mover::Player(PlayerId::new(0)));
        assert_eq!(game.legal_actions().len(), 11);

        let predicted = game.apply(&7).unwrap();
        assert!(predicted.mover().is_chance());
        assert_eq!(predicted.legal_actions(), vec![1, 2, 3, 4, 5, 6]);

        let first = predicted.apply(&3).unwrap();
        assert!(first.mover().is_chance());

        let done = first.apply(&4).unwrap();
        assert!(done.is_over());
        assert_eq!(done.roll(), Some((3, 4)));
        assert_eq!(done.utility(PlayerId::new(0)), 1.0);
    }

    #[test]
    fn test_wrong_prediction_loses() {
        let done = DiceGame::new()
            .apply(&12)
            .unwrap()
            .apply(&1)
            .unwrap()
            .apply(&1)
            .unwrap();
        assert_eq!(done.utility(PlayerId::new(0)), -1.0);
    }

    #[test]
    fn test_resolve_chance_rolls_valid_faces() {
        let predicted = DiceGame::new().apply(&7).unwrap();
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            let face = predicted.resolve_chance(&mut rng).unwrap();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_resolve_chance_undefined_at_player_turn() {
        let game = DiceGame::new();
        let mut rng = GameRng::new(42);
        assert_eq!(game.resolve_chance(&mut rng), None);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let game = DiceGame::new();
        assert!(matches!(
            game.apply(&1),
            Err(IllegalActionError::NotLegal)
        ));
        let predicted = game.apply(&7).unwrap();
        assert!(matches!(
            predicted.apply(&7),
            Err(IllegalActionError::NotLegal)
        ));
    }
}
