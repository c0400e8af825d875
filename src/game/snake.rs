use std::collections::VecDeque;

use super::action::Direction;
use super::grid::Position;

/// The snake in the game
///
/// Segments are stored tail first, so the back of the deque is the head.
/// Neighbouring segments are always grid-adjacent.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    /// Direction requested for the next step, if any
    pending_direction: Option<Direction>,
    /// Direction actually taken on the last step
    last_direction: Direction,
}

impl Snake {
    /// Create a two-segment snake with its head at the spawn point and the
    /// tail one cell to the left, facing right.
    pub fn new(spawn: Position) -> Self {
        let mut body = VecDeque::with_capacity(2);
        body.push_back(spawn.moved_in_direction(Direction::Left));
        body.push_back(spawn);

        Self {
            body,
            pending_direction: None,
            last_direction: Direction::Right,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    /// Segments from tail to head
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Request a direction for the next step.
    ///
    /// A request to reverse into the neck is ignored and `false` is
    /// returned. The check is against the last direction taken, not the
    /// pending one, so several requests within one tick can still chain.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction == self.last_direction.opposite() {
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Push a new head one cell in the pending direction and return it.
    ///
    /// The tail is left in place; whether it follows depends on whether an
    /// apple was eaten, which the session decides via [`Snake::pop_tail`].
    /// Without a pending direction nothing moves and `None` is returned.
    pub fn step(&mut self) -> Option<Position> {
        let direction = self.pending_direction?;
        let new_head = self.head().moved_in_direction(direction);

        self.last_direction = direction;
        self.body.push_back(new_head);

        Some(new_head)
    }

    /// Drop the tail segment. The snake never shrinks below its head.
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_front()
        } else {
            None
        }
    }

    /// Get the length of the snake. Never zero: the head always remains.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }
}
