use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::apple::Apple;
use crate::config::{GameSettings, GridSize};
use crate::error::GameError;
use crate::input::Direction;
use crate::opponent;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    Over,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    OpponentCollision,
    Quit,
}

/// What happened during one simulation step.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StepReport {
    pub ate_apple: bool,
    pub opponent_ate_apple: bool,
    pub collision: Option<EndReason>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub opponent: Option<Snake>,
    pub direction: Direction,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    /// Loop iterations rendered so far, paused ones included.
    pub frame_count: u64,
    /// Simulation steps taken so far.
    pub tick_count: u64,
    settings: GameSettings,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from system entropy.
    pub fn new(settings: GameSettings, bounds: GridSize) -> Result<Self, GameError> {
        Self::with_rng(settings, bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(
        settings: GameSettings,
        bounds: GridSize,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(settings, bounds, StdRng::seed_from_u64(seed))
    }

    /// Board sides are clamped with [`GridSize::normalized`] first.
    fn with_rng(
        settings: GameSettings,
        bounds: GridSize,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        let bounds = bounds.normalized();
        let start = Position {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        };
        let snake = Snake::new(start);
        let opponent = settings.opponent_enabled.then(opponent::spawn);

        let mut occupied = vec![&snake];
        occupied.extend(opponent.as_ref());
        let apple = Apple::spawn(&mut rng, bounds, &occupied)?;

        Ok(Self {
            snake,
            apple,
            opponent,
            direction: Direction::Right,
            status: GameStatus::Running,
            end_reason: None,
            frame_count: 0,
            tick_count: 0,
            settings,
            bounds,
            rng,
        })
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Does nothing unless the game is running. The snake keeps its tail on
    /// the tick it eats, so it is one segment longer afterwards.
    pub fn step(&mut self) -> Result<StepReport, GameError> {
        if self.status != GameStatus::Running {
            return Ok(StepReport::default());
        }

        self.tick_count += 1;

        let mut next = self.snake.head().stepped(self.direction);
        if self.settings.no_clip {
            next = next.wrapped(self.direction, self.bounds);
        }

        let apple = self.apple.position;
        let ate_apple = next == apple;
        self.snake.advance(next, ate_apple);

        let opponent_ate_apple = self
            .opponent
            .as_mut()
            .is_some_and(|opponent| opponent::step(opponent, apple));

        let collision = self.detect_collision();
        let report = StepReport {
            ate_apple,
            opponent_ate_apple,
            collision,
        };

        if ate_apple || opponent_ate_apple {
            debug!(
                "apple at ({}, {}) eaten by {}, snake length {}",
                apple.x,
                apple.y,
                if ate_apple { "player" } else { "opponent" },
                self.snake.len()
            );

            let mut occupied = vec![&self.snake];
            occupied.extend(self.opponent.as_ref());
            self.apple = Apple::spawn(&mut self.rng, self.bounds, &occupied)?;
        }

        if let Some(reason) = collision {
            self.end(reason);
        }

        Ok(report)
    }

    /// Flips between running and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::Over => GameStatus::Over,
        };
        debug!("pause toggled, status now {:?}", self.status);
    }

    /// Ends the run on explicit request, paused or not.
    pub fn quit(&mut self) {
        self.end(EndReason::Quit);
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    #[must_use]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    fn end(&mut self, reason: EndReason) {
        if self.status == GameStatus::Over {
            return;
        }

        info!(
            "game over after {} ticks: {reason:?}, snake length {}",
            self.tick_count,
            self.snake.len()
        );
        self.status = GameStatus::Over;
        self.end_reason = Some(reason);
    }

    fn detect_collision(&self) -> Option<EndReason> {
        let head = self.snake.head();

        if self.snake.head_overlaps_body() {
            return Some(EndReason::SelfCollision);
        }

        if !self.settings.no_clip && head.is_border(self.bounds) {
            return Some(EndReason::WallCollision);
        }

        if let Some(opponent) = &self.opponent {
            if opponent.occupies(head) {
                return Some(EndReason::OpponentCollision);
            }
            if self.settings.opponent_collision_ends_game && self.snake.occupies(opponent.head()) {
                return Some(EndReason::OpponentCollision);
            }
        }

        None
    }
}
