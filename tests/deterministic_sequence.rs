use grid_snake::apple::Apple;
use grid_snake::config::{GameSettings, GridSize};
use grid_snake::game::{GameState, GameStatus};
use grid_snake::input::Direction;
use grid_snake::snake::{Position, Snake};

const BOARD: GridSize = GridSize {
    width: 20,
    height: 20,
};

#[test]
fn snake_walks_right_into_the_apple() {
    let mut state = GameState::new_with_seed(GameSettings::default(), BOARD, 42)
        .expect("board has room");
    state.apple = Apple::at(Position::new(15, 10));
    assert_eq!(state.snake.head(), Position::new(10, 10));

    let mut ate = false;
    for _ in 0..5 {
        ate = state.step().expect("step succeeds").ate_apple;
        assert_eq!(state.status, GameStatus::Running);
    }

    assert!(ate);
    assert_eq!(state.snake.head(), Position::new(15, 10));
    assert_eq!(state.snake.len(), 2);
    assert!(!state.snake.occupies(state.apple.position));
}

#[test]
fn no_clip_wraps_left_edge_to_far_interior_column() {
    let settings = GameSettings {
        no_clip: true,
        ..GameSettings::default()
    };
    let mut state = GameState::new_with_seed(settings, BOARD, 7).expect("board has room");
    state.snake = Snake::new(Position::new(1, 10));
    state.direction = Direction::Left;
    state.apple = Apple::at(Position::new(5, 5));

    let report = state.step().expect("step succeeds");

    assert_eq!(state.snake.head(), Position::new(18, 10));
    assert_eq!(report.collision, None);
    assert_eq!(state.status, GameStatus::Running);
}

#[test]
fn no_clip_snake_survives_many_laps() {
    let settings = GameSettings {
        no_clip: true,
        ..GameSettings::default()
    };
    let mut state = GameState::new_with_seed(settings, BOARD, 8).expect("board has room");
    state.snake = Snake::new(Position::new(3, 3));
    state.apple = Apple::at(Position::new(10, 10));

    for _ in 0..200 {
        state.step().expect("step succeeds");
        assert_ne!(state.status, GameStatus::Over);
        assert!(!state.snake.head().is_border(BOARD));
    }
}

#[test]
fn opponent_reaches_apple_in_three_ticks() {
    let settings = GameSettings {
        opponent_enabled: true,
        ..GameSettings::default()
    };
    let mut state = GameState::new_with_seed(settings, BOARD, 3).expect("board has room");
    state.snake = Snake::new(Position::new(4, 12));
    state.apple = Apple::at(Position::new(5, 2));
    assert_eq!(
        state.opponent.as_ref().map(Snake::head),
        Some(Position::new(2, 2))
    );

    let mut heads = Vec::new();
    let mut reports = Vec::new();
    for _ in 0..3 {
        reports.push(state.step().expect("step succeeds"));
        heads.push(state.opponent.as_ref().expect("opponent enabled").head());
    }

    assert_eq!(
        heads,
        vec![
            Position::new(3, 2),
            Position::new(4, 2),
            Position::new(5, 2)
        ]
    );
    assert!(!reports[0].opponent_ate_apple);
    assert!(!reports[1].opponent_ate_apple);
    assert!(reports[2].opponent_ate_apple);
    assert_eq!(state.opponent.as_ref().map(Snake::len), Some(2));
    assert_ne!(state.apple.position, Position::new(5, 2));
    assert_eq!(state.status, GameStatus::Running);
}

#[test]
fn same_seed_replays_identically() {
    let settings = GameSettings {
        opponent_enabled: true,
        no_clip: true,
        ..GameSettings::default()
    };
    let mut first = GameState::new_with_seed(settings, BOARD, 99).expect("board has room");
    let mut second = GameState::new_with_seed(settings, BOARD, 99).expect("board has room");

    for _ in 0..50 {
        first.step().expect("step succeeds");
        second.step().expect("step succeeds");
        assert_eq!(first.snake, second.snake);
        assert_eq!(first.apple, second.apple);
        assert_eq!(first.opponent, second.opponent);
        assert_eq!(first.status, second.status);
    }
}
