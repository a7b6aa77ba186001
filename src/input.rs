use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in screen coordinates (y grows downwards).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Non-blocking source of game inputs.
pub trait InputSource {
    /// Returns the next pending input, or `None` once the queue is empty.
    ///
    /// Must return immediately whether or not anything is pending.
    fn poll_input(&mut self) -> io::Result<Option<GameInput>>;
}

/// Scripted input for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    pending: VecDeque<GameInput>,
}

impl QueuedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FromIterator<GameInput> for QueuedInput {
    fn from_iter<I: IntoIterator<Item = GameInput>>(inputs: I) -> Self {
        Self {
            pending: inputs.into_iter().collect(),
        }
    }
}

impl InputSource for QueuedInput {
    fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        Ok(self.pending.pop_front())
    }
}

/// Keyboard input read from the crossterm event queue.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(input) = map_key_event(key) {
                return Ok(Some(input));
            }
        }

        Ok(None)
    }
}

/// Maps a terminal key event to a game input; unknown keys map to `None`.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char('p' | 'P' | ' ') => Some(GameInput::Pause),
        _ => None,
    }
}
