use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::{Direction, Input},
    config::GameConfig,
    grid::{Grid, Position},
    snake::Snake,
};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// The snake covers every cell, so no apple can be placed
    BoardFilled,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Collision(CollisionType::Wall) => f.write_str("hit the wall"),
            EndReason::Collision(CollisionType::SelfCollision) => f.write_str("bit itself"),
            EndReason::BoardFilled => f.write_str("filled the board"),
        }
    }
}

/// Lifecycle of a session.
///
/// `AwaitingStart -> Running <-> Paused -> Over`; `Over` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the first direction input
    AwaitingStart,
    Running,
    Paused,
    Over(EndReason),
}

/// What a single call to [`GameSession::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is not running; nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake ate an apple and grew
    Ate { score: u32 },
    /// The session transitioned to `Over` this tick
    Ended(EndReason),
}

/// Everything a renderer needs to redraw the board
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Snake cells from tail to head
    pub snake: Vec<Position>,
    pub apple: Option<Position>,
    pub score: u32,
    pub steps: u32,
    pub state: SessionState,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.last().copied()
    }

    /// Final score, only once the session is over
    pub fn final_score(&self) -> Option<u32> {
        matches!(self.state, SessionState::Over(_)).then_some(self.score)
    }
}

/// One playthrough: owns the board, the snake, the apple and the score, and
/// advances them one tick at a time.
pub struct GameSession {
    grid: Grid,
    snake: Snake,
    apple: Option<Position>,
    score: u32,
    steps: u32,
    state: SessionState,
    rng: StdRng,
}

impl GameSession {
    /// Create a session for the configured board size
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a session with a caller-provided random source
    pub fn with_rng(config: &GameConfig, mut rng: StdRng) -> Self {
        let mut grid = Grid::new(config.grid_width, config.grid_height);

        let spawn = Position::new((grid.width() / 2) as i32, (grid.height() / 2) as i32);
        let snake = Snake::new(spawn);
        for &cell in snake.segments() {
            grid.set_occupied(cell, true);
        }

        let apple = grid.random_free_cell(&mut rng).ok();

        log::info!(
            "Created {}x{} session, snake at {:?}",
            grid.width(),
            grid.height(),
            spawn
        );

        Self {
            grid,
            snake,
            apple,
            score: 0,
            steps: 0,
            state: SessionState::AwaitingStart,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Option<Position> {
        self.apple
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of ticks that moved the snake
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Over(_))
    }

    pub fn final_score(&self) -> Option<u32> {
        self.is_over().then_some(self.score)
    }

    /// Dispatch one input event
    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::Direction(direction) => {
                self.set_direction(direction);
            }
            Input::TogglePause => {
                self.toggle_pause();
            }
        }
    }

    /// Request a direction for the next tick.
    ///
    /// The first accepted direction starts the session. Requests after the
    /// session is over are ignored. Returns whether the request was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        match self.state {
            SessionState::Over(_) => false,
            SessionState::AwaitingStart => {
                let accepted = self.snake.set_direction(direction);
                if accepted {
                    self.state = SessionState::Running;
                    log::info!("Session started heading {:?}", direction);
                }
                accepted
            }
            SessionState::Running | SessionState::Paused => self.snake.set_direction(direction),
        }
    }

    /// Flip between running and paused. Has no effect before the first
    /// direction or after the game is over. Returns whether the state changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            _ => return false,
        };
        log::info!("Session {}", if self.is_paused() { "paused" } else { "resumed" });
        true
    }

    /// Advance the simulation by one step. Only acts while running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != SessionState::Running {
            return TickOutcome::Idle;
        }

        let old_tail = self.snake.tail();
        let Some(new_head) = self.snake.step() else {
            return TickOutcome::Idle;
        };
        self.steps += 1;

        // The tail cell is vacated before the collision check so the head
        // may follow directly behind it.
        self.grid.set_occupied(old_tail, false);

        let collision = if !self.grid.in_bounds(new_head) {
            Some(CollisionType::Wall)
        } else if self.grid.is_occupied(new_head) {
            Some(CollisionType::SelfCollision)
        } else {
            None
        };

        if let Some(collision) = collision {
            self.grid.set_occupied(old_tail, true);
            return self.end(EndReason::Collision(collision));
        }

        self.grid.set_occupied(new_head, true);

        if self.apple != Some(new_head) {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        // Ate: the tail stays, so the snake is one longer
        self.grid.set_occupied(old_tail, true);
        self.score += 1;
        log::debug!("Apple eaten at {:?}, score {}", new_head, self.score);

        match self.grid.random_free_cell(&mut self.rng) {
            Ok(apple) => {
                self.apple = Some(apple);
                TickOutcome::Ate { score: self.score }
            }
            Err(_) => {
                self.apple = None;
                self.end(EndReason::BoardFilled)
            }
        }
    }

    /// Capture the current state for drawing
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            snake: self.snake.segments().copied().collect(),
            apple: self.apple,
            score: self.score,
            steps: self.steps,
            state: self.state,
        }
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.state = SessionState::Over(reason);
        log::info!(
            "Game over after {} steps: {}, final score {}",
            self.steps,
            reason,
            self.score
        );
        TickOutcome::Ended(reason)
    }
}
