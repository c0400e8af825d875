use std::fmt;

use rand::Rng;

use super::action::Direction;

/// Smallest playable grid dimension
pub const MIN_GRID_SIZE: usize = 4;
/// Largest grid dimension, keeps the occupancy map small
pub const MAX_GRID_SIZE: usize = 1024;

/// Clamp a requested grid dimension into `[MIN_GRID_SIZE, MAX_GRID_SIZE]`.
///
/// Zero and negative values land on the minimum, so malformed menu input
/// still yields a playable board.
pub fn clamp_dimension(value: i64) -> usize {
    value.clamp(MIN_GRID_SIZE as i64, MAX_GRID_SIZE as i64) as usize
}

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True when the two cells differ by one unit along exactly one axis
    pub fn is_adjacent(&self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Returned when every cell of the grid is covered by the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFull;

impl fmt::Display for BoardFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no free cell left on the board")
    }
}

impl std::error::Error for BoardFull {}

/// Occupancy map of the board. `true` means some snake segment covers the cell.
///
/// The grid never moves the snake itself; the session keeps it in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    occupied: usize,
}

impl Grid {
    /// Create an empty grid, clamping both dimensions independently
    pub fn new(width: usize, height: usize) -> Self {
        let width = clamp_dimension(i64::try_from(width).unwrap_or(i64::MAX));
        let height = clamp_dimension(i64::try_from(height).unwrap_or(i64::MAX));

        Self {
            width,
            height,
            cells: vec![false; width * height],
            occupied: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Number of cells currently marked occupied
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. Callers check [`Grid::in_bounds`]
    /// first, since leaving the board is a collision rather than a lookup.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells[self.index(pos)]
    }

    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set_occupied(&mut self, pos: Position, occupied: bool) {
        let index = self.index(pos);
        if self.cells[index] != occupied {
            self.cells[index] = occupied;
            if occupied {
                self.occupied += 1;
            } else {
                self.occupied -= 1;
            }
        }
    }

    /// Pick a uniformly random unoccupied cell.
    ///
    /// Rejection sampling handles the common sparse board. Once the snake
    /// covers most of the grid the draws are bounded and the free cells are
    /// enumerated instead, so a full board reports [`BoardFull`] rather than
    /// spinning forever.
    pub fn random_free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Position, BoardFull> {
        if self.occupied >= self.area() {
            return Err(BoardFull);
        }

        let attempts = (self.area() * 4).max(64);
        for _ in 0..attempts {
            let pos = Position::new(
                rng.gen_range(0..self.width) as i32,
                rng.gen_range(0..self.height) as i32,
            );
            if !self.is_occupied(pos) {
                return Ok(pos);
            }
        }

        let free: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| !**occupied)
            .map(|(index, _)| index)
            .collect();

        if free.is_empty() {
            return Err(BoardFull);
        }

        let index = free[rng.gen_range(0..free.len())];
        Ok(self.position_of(index))
    }

    fn index(&self, pos: Position) -> usize {
        assert!(self.in_bounds(pos), "position {pos:?} outside {}x{} grid", self.width, self.height);
        pos.y as usize * self.width + pos.x as usize
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }
}
