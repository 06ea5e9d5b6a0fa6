//! Alpha-beta integration tests on the bundled games.
//!
//! The small-game scenarios pin game-theoretic optimality: with ample time
//! the agent must find the known best line from either seat, and self-play
//! over winning-line games must reproduce the expected terminal utilities.

use std::time::{Duration, Instant};

use gametree::{
    Agent, AlphaBetaAgent, AlphaBetaConfig, CountGame, DiceGame, Game, GameRng, Mover, PlayerId,
    SequenceGame,
};

fn agent_for(seat: u8) -> AlphaBetaAgent<SequenceGame> {
    let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(2, PlayerId::new(seat));
    agent
}

/// Play a sequence game with an alpha-beta agent on each seat, returning
/// the terminal state.
fn self_play(mut game: SequenceGame, budget: Duration) -> SequenceGame {
    let mut agents = [agent_for(0), agent_for(1)];
    while !game.is_over() {
        let Mover::Player(player) = game.mover() else {
            panic!("sequence game has no chance turns");
        };
        let action = agents[player.index()]
            .compute_next_action(&game, budget)
            .unwrap();
        game = game.apply(&action).unwrap();
    }
    game
}

fn utilities(game: &SequenceGame) -> (f64, f64) {
    (game.utility(PlayerId::new(0)), game.utility(PlayerId::new(1)))
}

// =============================================================================
// Counting duel: optimal step from either seat
// =============================================================================

#[test]
fn count_first_player_pushes_up() {
    let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(2, PlayerId::new(0));
    let action = agent
        .compute_next_action(&CountGame::new(-1, 1), Duration::from_millis(400))
        .unwrap();
    assert_eq!(action, 1);
}

#[test]
fn count_second_player_pushes_down() {
    let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(2, PlayerId::new(1));
    let game = CountGame::with_start(PlayerId::new(1), 0, -1, 1);
    let action = agent
        .compute_next_action(&game, Duration::from_millis(400))
        .unwrap();
    assert_eq!(action, -1);
}

#[test]
fn count_first_player_stays_optimal_to_the_end() {
    let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(2, PlayerId::new(0));
    let mut game = CountGame::with_start(PlayerId::new(0), 0, -2, 2);
    while !game.is_over() {
        let action = agent
            .compute_next_action(&game, Duration::from_millis(400))
            .unwrap();
        assert_eq!(action, 1);
        game = game.apply(&1).unwrap();
        if !game.is_over() {
            // A passive opponent holds the score.
            game = game.apply(&0).unwrap();
        }
    }
    assert!(game.score() > 2);
}

#[test]
fn count_second_player_stays_optimal_to_the_end() {
    let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(2, PlayerId::new(1));
    let mut game = CountGame::with_start(PlayerId::new(1), 0, -2, 2);
    while !game.is_over() {
        let action = agent
            .compute_next_action(&game, Duration::from_millis(400))
            .unwrap();
        assert_eq!(action, -1);
        game = game.apply(&-1).unwrap();
        if !game.is_over() {
            game = game.apply(&0).unwrap();
        }
    }
    assert!(game.score() < -2);
}

// =============================================================================
// Sequence game: known winning and drawn lines
// =============================================================================

#[test]
fn sequence_one_ply_win() {
    let game = SequenceGame::new(&["L"], &['L', 'R'], 2);
    let done = self_play(game, Duration::from_secs(10));
    assert_eq!(utilities(&done), (1.0, 0.0));
    assert_eq!(done.sequence(), "L");
}

#[test]
fn sequence_two_ply_game_is_drawn() {
    // Every listed line is completed by the opponent; bailing out of the
    // prefix set is the best the first player can do.
    let game = SequenceGame::new(&["LL", "LR"], &['L', 'R'], 2);
    let done = self_play(game, Duration::from_secs(10));
    assert_eq!(utilities(&done), (0.5, 0.5));
}

#[test]
fn sequence_three_ply_win() {
    let game = SequenceGame::new(&["LLL", "LLR", "LRL", "RLR"], &['L', 'R'], 2);
    let done = self_play(game, Duration::from_secs(10));
    assert_eq!(utilities(&done), (1.0, 0.0));
}

#[test]
fn sequence_four_ply_loss() {
    // All lines have even length and the first player can never derail.
    let game = SequenceGame::new(
        &[
            "LLLL", "LLLR", "LLRL", "LRLR", "RLLL", "RLLR", "RLRL", "RRLR",
        ],
        &['L', 'R'],
        2,
    );
    let done = self_play(game, Duration::from_secs(10));
    assert_eq!(utilities(&done), (0.0, 1.0));
}

#[test]
fn sequence_three_symbol_alphabet_win() {
    let game = SequenceGame::new(
        &[
            "LL", "LM", "LR", "MLL", "MLM", "MLR", "MMM", "MRL", "MRM", "MRR", "RL", "RM", "RR",
        ],
        &['L', 'M', 'R'],
        2,
    );
    let done = self_play(game, Duration::from_secs(10));
    assert_eq!(utilities(&done), (1.0, 0.0));
}

#[test]
fn sequence_five_ply_win_follows_the_known_line() {
    let game = SequenceGame::new(
        &[
            "LLLLL", "LLLML", "LLLRL", "LMLLL", "LMLML", "LMLRL", "LRLLL", "LRLML", "LRLRL",
        ],
        &['L', 'M', 'R'],
        2,
    );
    let mut agents = [agent_for(0), agent_for(1)];
    let mut game = game;
    while !game.is_over() {
        let Mover::Player(player) = game.mover() else {
            unreachable!()
        };
        let action = agents[player.index()]
            .compute_next_action(&game, Duration::from_secs(10))
            .unwrap();
        if player == PlayerId::new(0) {
            assert_eq!(action, 'L');
        }
        game = game.apply(&action).unwrap();
    }
    assert_eq!(utilities(&game), (1.0, 0.0));
}

#[test]
fn sequence_five_ply_win_against_scripted_opponent() {
    let mut game = SequenceGame::new(
        &[
            "RLRLR", "RLRMR", "RLRRR", "RMRLR", "RMRMR", "RMRRR", "RRRLR", "RRRMR", "RRRRR",
        ],
        &['L', 'M', 'R'],
        2,
    );
    let mut agent = agent_for(0);
    while !game.is_over() {
        let Mover::Player(player) = game.mover() else {
            unreachable!()
        };
        let action = if player == PlayerId::new(0) {
            let action = agent
                .compute_next_action(&game, Duration::from_secs(10))
                .unwrap();
            assert_eq!(action, 'R');
            action
        } else {
            'M'
        };
        game = game.apply(&action).unwrap();
    }
    assert_eq!(utilities(&game), (1.0, 0.0));
}

#[test]
fn sequence_second_seat_takes_the_immediate_win() {
    let mut game = SequenceGame::new(
        &[
            "LLLL", "LLLR", "LLRL", "LLRR", "LRLL", "LRLR", "LRRL", "LRRR", "RR", "RLLL",
            "RLLRLL", "RLLRR",
        ],
        &['L', 'R'],
        2,
    );
    let mut agent = agent_for(1);
    let script = ['R', 'L', 'R'];
    let mut round = 0;
    while !game.is_over() {
        let Mover::Player(player) = game.mover() else {
            unreachable!()
        };
        let action = if player == PlayerId::new(0) {
            let action = script[round];
            round += 1;
            action
        } else {
            agent
                .compute_next_action(&game, Duration::from_secs(10))
                .unwrap()
        };
        game = game.apply(&action).unwrap();
    }
    assert_eq!(utilities(&game), (0.0, 1.0));
}

// =============================================================================
// Dice game: chance turns
// =============================================================================

#[test]
fn dice_prediction_is_legal_and_game_completes() {
    let mut agent: AlphaBetaAgent<DiceGame> = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(1, PlayerId::new(0));
    let mut rng = GameRng::new(99);
    let mut game = DiceGame::new();
    while !game.is_over() {
        let action = if game.mover().is_chance() {
            game.resolve_chance(&mut rng).unwrap()
        } else {
            let action = agent
                .compute_next_action(&game, Duration::from_secs(2))
                .unwrap();
            assert!((2..=12).contains(&action), "prediction: {action}");
            action
        };
        game = game.apply(&action).unwrap();
    }
    let utility = game.utility(PlayerId::new(0));
    assert!(utility == 1.0 || utility == -1.0);
}

#[test]
fn dice_win_rate_is_consistent_with_chance() {
    // A single-number prediction wins at most 1/6 of the time (predicting
    // seven) and at least 1/36 (predicting two or twelve). Over many games
    // the observed win rate must land in that regime, far from both the
    // "never wins" and the "sees the future" failure modes.
    let mut wins = 0u32;
    let mut rng = GameRng::new(2024);
    for trial in 0..80 {
        let mut agent: AlphaBetaAgent<DiceGame> =
            AlphaBetaAgent::new(AlphaBetaConfig::default().with_seed(trial));
        agent.setup(1, PlayerId::new(0));
        let mut game = DiceGame::new();
        while !game.is_over() {
            let action = if game.mover().is_chance() {
                game.resolve_chance(&mut rng).unwrap()
            } else {
                agent
                    .compute_next_action(&game, Duration::from_millis(75))
                    .unwrap()
            };
            game = game.apply(&action).unwrap();
        }
        if game.utility(PlayerId::new(0)) == 1.0 {
            wins += 1;
        }
    }
    assert!(wins >= 1, "agent never won: {wins}/80");
    assert!(wins <= 30, "agent wins too often for a dice game: {wins}/80");
}

// =============================================================================
// Tree reuse and deadlines
// =============================================================================

#[test]
fn reroot_reuses_the_previous_tree() {
    let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(2, PlayerId::new(0));
    let game = CountGame::new(-10, 10);

    let first = agent
        .compute_next_action(&game, Duration::from_millis(300))
        .unwrap();
    assert!(!agent.stats().rerooted);

    let advanced = game.apply(&first).unwrap().apply(&0).unwrap();
    let second = agent
        .compute_next_action(&advanced, Duration::from_millis(300))
        .unwrap();
    assert!(agent.stats().rerooted, "expected the subtree to be reused");

    // The reused tree must agree with a cold start on the same state.
    let mut fresh = AlphaBetaAgent::new(AlphaBetaConfig::default());
    fresh.setup(2, PlayerId::new(0));
    let cold = fresh
        .compute_next_action(&advanced, Duration::from_millis(300))
        .unwrap();
    assert_eq!(second, cold);
}

#[test]
fn deadline_is_respected_across_budgets() {
    for budget_ms in [10u64, 50, 250, 1000] {
        let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
        agent.setup(2, PlayerId::new(0));
        let game = CountGame::new(-20, 20);

        let start = Instant::now();
        agent
            .compute_next_action(&game, Duration::from_millis(budget_ms))
            .unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed <= Duration::from_millis(budget_ms + 250),
            "budget {budget_ms}ms overrun: took {elapsed:?}"
        );
    }
}

#[test]
fn exhausted_budget_still_returns_a_legal_action() {
    let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
    agent.setup(2, PlayerId::new(0));
    let game = CountGame::new(-2, 2);

    // Nothing can be searched in zero time; the greedy fallback answers.
    let action = agent.compute_next_action(&game, Duration::ZERO).unwrap();
    assert_eq!(action, 1);
}
