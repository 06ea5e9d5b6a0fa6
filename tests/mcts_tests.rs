//! MCTS integration tests on the bundled games.

use std::time::{Duration, Instant};

use gametree::{
    Agent, CountGame, DiceGame, Game, GameRng, MctsAgent, MctsConfig, Mover, PlayerId,
    SequenceGame,
};

fn agent_for(seat: u8) -> MctsAgent<SequenceGame> {
    let mut agent = MctsAgent::new(MctsConfig::default());
    agent.setup(2, PlayerId::new(seat));
    agent
}

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
// Optimality on small games
// =============================================================================

#[test]
fn sequence_one_ply_win() {
    let game = SequenceGame::new(&["L"], &['L', 'R'], 2);
    let done = self_play(game, Duration::from_millis(600));
    assert_eq!(utilities(&done), (1.0, 0.0));
    assert_eq!(done.sequence(), "L");
}

#[test]
fn sequence_self_play_reaches_the_game_value() {
    // Opening L hands the opponent an immediate completion, so the first
    // player's playouts push it to R. From there the opponent's only
    // non-losing reply is to bail out of the prefix set, and self-play
    // settles on the game-theoretic draw.
    let game = SequenceGame::new(&["LL", "RLR"], &['L', 'R'], 2);
    let done = self_play(game, Duration::from_millis(800));
    assert_eq!(utilities(&done), (0.5, 0.5));
    assert_eq!(done.sequence(), "RR");
}

#[test]
fn sequence_three_ply_win() {
    let game = SequenceGame::new(&["LLL", "LLR", "LRL", "RLR"], &['L', 'R'], 2);
    let done = self_play(game, Duration::from_millis(800));
    assert_eq!(utilities(&done), (1.0, 0.0));
}

#[test]
fn count_first_player_pushes_up() {
    let mut agent: MctsAgent<CountGame> = MctsAgent::new(MctsConfig::default());
    agent.setup(2, PlayerId::new(0));
    let action = agent
        .compute_next_action(&CountGame::new(-2, 2), Duration::from_millis(600))
        .unwrap();
    assert_eq!(action, 1);
}

// =============================================================================
// Chance turns
// =============================================================================

#[test]
fn dice_prediction_is_legal_and_game_completes() {
    let mut agent: MctsAgent<DiceGame> = MctsAgent::new(MctsConfig::default());
    agent.setup(1, PlayerId::new(0));
    let mut rng = GameRng::new(123);
    let mut game = DiceGame::new();
    while !game.is_over() {
        let action = if game.mover().is_chance() {
            game.resolve_chance(&mut rng).unwrap()
        } else {
            let action = agent
                .compute_next_action(&game, Duration::from_millis(300))
                .unwrap();
            assert!((2..=12).contains(&action), "prediction: {action}");
            action
        };
        game = game.apply(&action).unwrap();
    }
    let utility = game.utility(PlayerId::new(0));
    assert!(utility == 1.0 || utility == -1.0);
}

// =============================================================================
// Tree reuse and deadlines
// =============================================================================

#[test]
fn reroot_reuses_the_previous_tree() {
    let mut agent: MctsAgent<CountGame> = MctsAgent::new(MctsConfig::default());
    agent.setup(2, PlayerId::new(0));
    let game = CountGame::new(-10, 10);

    let first = agent
        .compute_next_action(&game, Duration::from_millis(300))
        .unwrap();
    assert!(!agent.stats().rerooted);

    let advanced = game.apply(&first).unwrap().apply(&0).unwrap();
    agent
        .compute_next_action(&advanced, Duration::from_millis(300))
        .unwrap();
    assert!(agent.stats().rerooted, "expected the subtree to be reused");
}

#[test]
fn deadline_is_respected_across_budgets() {
    for budget_ms in [10u64, 50, 250, 1000] {
        let mut agent: MctsAgent<CountGame> = MctsAgent::new(MctsConfig::default());
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
    let mut agent: MctsAgent<CountGame> = MctsAgent::new(MctsConfig::default());
    agent.setup(2, PlayerId::new(0));
    let game = CountGame::new(-2, 2);

    let action = agent.compute_next_action(&game, Duration::ZERO).unwrap();
    assert_eq!(action, 1);
}

#[test]
fn longer_budgets_accumulate_more_playouts() {
    // Not a win-rate assertion (wall-clock coupled), but the budget must
    // translate into search effort monotonically.
    let game = CountGame::new(-5, 5);

    let mut short: MctsAgent<CountGame> = MctsAgent::new(MctsConfig::default());
    short.setup(2, PlayerId::new(0));
    short
        .compute_next_action(&game, Duration::from_millis(50))
        .unwrap();
    let short_playouts = short.stats().playouts;

    let mut long: MctsAgent<CountGame> = MctsAgent::new(MctsConfig::default());
    long.setup(2, PlayerId::new(0));
    long.compute_next_action(&game, Duration::from_millis(800))
        .unwrap();
    let long_playouts = long.stats().playouts;

    assert!(
        long_playouts > short_playouts,
        "expected more playouts with a larger budget: {short_playouts} vs {long_playouts}"
    );
}
