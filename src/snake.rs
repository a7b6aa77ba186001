use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when the position lies on (or outside) the wall ring.
    #[must_use]
    pub fn is_border(self, bounds: GridSize) -> bool {
        self.x <= 0
            || self.y <= 0
            || self.x >= i32::from(bounds.width) - 1
            || self.y >= i32::from(bounds.height) - 1
    }

    /// Returns true when the position lies inside the board, ring included.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Remaps a head that just reached the wall ring to the opposite interior
    /// edge.
    ///
    /// Only the axis of `direction` is inspected: moving Left onto `x == 0`
    /// lands on `width - 2`, moving Up onto `y == 0` lands on `height - 2`,
    /// and so on. Positions still inside along that axis are returned as-is.
    #[must_use]
    pub fn wrapped(self, direction: Direction, bounds: GridSize) -> Self {
        let width = i32::from(bounds.width);
        let height = i32::from(bounds.height);

        match direction {
            Direction::Up if self.y <= 0 => Self {
                y: height - 2,
                ..self
            },
            Direction::Down if self.y >= height - 1 => Self { y: 1, ..self },
            Direction::Left if self.x <= 0 => Self {
                x: width - 2,
                ..self
            },
            Direction::Right if self.x >= width - 1 => Self { x: 1, ..self },
            _ => self,
        }
    }
}

/// Ordered body segments, head first. Never empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Moves the head to `new_head`.
    ///
    /// The tail is kept when `grow` is set, which is how a snake lengthens on
    /// the tick it eats.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
