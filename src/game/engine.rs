use super::{
    config::{ConfigError, GameConfig},
    difficulty::Difficulty,
    direction::Direction,
    snapshot::Snapshot,
    state::{Position, RunState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Length of the snake at the start of every run
pub const INITIAL_SNAKE_LENGTH: usize = 2;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (stopped or paused), nothing moved
    Idle,
    /// The snake moved without eating
    Moved,
    /// The snake ate and grew; carries the new score
    Ate { score: u32 },
    /// The head ran into the body; the run is over
    Collided { final_score: u32 },
}

/// An explicit board to resume play from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Head first
    pub snake: Vec<Position>,
    pub heading: Direction,
    pub food: Position,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("snake needs at least {min} cells, got {actual}")]
    SnakeTooShort { actual: usize, min: usize },
    #[error("cell ({}, {}) lies outside a {size}x{size} field", .pos.x, .pos.y)]
    OutOfBounds { pos: Position, size: usize },
    #[error("snake visits ({}, {}) twice", .pos.x, .pos.y)]
    DuplicateCell { pos: Position },
    #[error("food at ({}, {}) sits on the snake", .pos.x, .pos.y)]
    FoodOnSnake { pos: Position },
}

/// The simulation: owns the snake, food, heading, score and run state,
/// and advances them one tick at a time.
pub struct GameEngine {
    config: GameConfig,
    size: i32,
    snake: Snake,
    food: Position,
    /// Single-slot buffer, consumed by the next tick
    pending_direction: Option<Direction>,
    score: u32,
    last_score: Option<u32>,
    run_state: RunState,
    difficulty: Difficulty,
    rng: StdRng,
}

impl GameEngine {
    /// Create a stopped engine with an entropy-seeded food generator
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a stopped engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = config.field_size as i32;
        let snake = initial_snake(size);
        let food = random_free_cell(size, &snake, &mut rng);

        Ok(Self {
            size,
            snake,
            food,
            pending_direction: None,
            score: 0,
            last_score: None,
            run_state: RunState::NotRunning,
            difficulty: config.difficulty,
            config,
            rng,
        })
    }

    /// Resume a running game from an explicit board
    pub fn from_layout(config: GameConfig, layout: Layout) -> Result<Self, LayoutError> {
        Self::layout_with_rng(config, layout, StdRng::from_entropy())
    }

    /// Like `from_layout`, with reproducible food placement
    pub fn from_layout_with_seed(
        config: GameConfig,
        layout: Layout,
        seed: u64,
    ) -> Result<Self, LayoutError> {
        Self::layout_with_rng(config, layout, StdRng::seed_from_u64(seed))
    }

    fn layout_with_rng(
        config: GameConfig,
        layout: Layout,
        rng: StdRng,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        let size = config.field_size as i32;

        if layout.snake.len() < INITIAL_SNAKE_LENGTH {
            return Err(LayoutError::SnakeTooShort {
                actual: layout.snake.len(),
                min: INITIAL_SNAKE_LENGTH,
            });
        }

        for &pos in layout.snake.iter().chain(std::iter::once(&layout.food)) {
            if !pos.is_within(size) {
                return Err(LayoutError::OutOfBounds {
                    pos,
                    size: config.field_size,
                });
            }
        }
        let mut seen = HashSet::with_capacity(layout.snake.len());
        for &pos in &layout.snake {
            if !seen.insert(pos) {
                return Err(LayoutError::DuplicateCell { pos });
            }
        }
        if seen.contains(&layout.food) {
            return Err(LayoutError::FoodOnSnake { pos: layout.food });
        }

        Ok(Self {
            size,
            snake: Snake::from_cells(layout.snake, layout.heading),
            food: layout.food,
            pending_direction: None,
            score: 0,
            last_score: None,
            run_state: RunState::Running,
            difficulty: config.difficulty,
            config,
            rng,
        })
    }

    /// Begin a fresh run, whatever state the previous one was in
    pub fn start(&mut self) {
        self.snake = initial_snake(self.size);
        self.food = random_free_cell(self.size, &self.snake, &mut self.rng);
        self.pending_direction = None;
        self.score = 0;
        self.last_score = None;
        self.run_state = RunState::Running;

        info!(
            difficulty = self.difficulty.as_str(),
            field_size = self.config.field_size,
            "run started"
        );
    }

    /// Buffer a heading change for the next tick. Returns whether the
    /// request was taken; reversals and requests outside a running game
    /// are dropped.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        if self.snake.direction.is_opposite(direction) {
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.run_state != RunState::Running {
            return TickOutcome::Idle;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.snake.direction = direction;
        }

        let new_head = self.snake.head().wrapped_step(self.snake.direction, self.size);

        // The tail has not moved yet, so stepping onto it also counts
        if self.snake.occupies(new_head) {
            let final_score = self.score;
            self.score = 0;
            self.last_score = Some(final_score);
            self.run_state = RunState::NotRunning;

            info!(final_score, length = self.snake.len(), "snake collided with itself");
            return TickOutcome::Collided { final_score };
        }

        let ate_food = new_head == self.food;
        self.snake.advance(new_head, ate_food);

        if ate_food {
            self.score += 1;
            self.food = random_free_cell(self.size, &self.snake, &mut self.rng);

            debug!(score = self.score, food = ?self.food, "food eaten");
            return TickOutcome::Ate { score: self.score };
        }

        TickOutcome::Moved
    }

    /// Change speed for the next run. Only allowed while stopped; returns
    /// whether the change applied.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.run_state != RunState::NotRunning {
            return false;
        }
        if self.difficulty != difficulty {
            info!(difficulty = difficulty.as_str(), "difficulty changed");
        }
        self.difficulty = difficulty;
        true
    }

    /// Flip between Running and Paused. Stopped games stay stopped.
    pub fn toggle_pause(&mut self) -> RunState {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::NotRunning => RunState::NotRunning,
        };
        debug!(run_state = ?self.run_state, "pause toggled");
        self.run_state
    }

    /// Period the scheduler should call `tick` at
    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field_size: self.config.field_size,
            snake: self.snake.to_vec(),
            food: self.food,
            heading: self.snake.direction,
            score: self.score,
            run_state: self.run_state,
            difficulty: self.difficulty,
            last_score: self.last_score,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn heading(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// Two cells in the middle of the field, facing right
fn initial_snake(size: i32) -> Snake {
    let center = size / 2;
    Snake::new(
        Position::new(center, center),
        Direction::Right,
        INITIAL_SNAKE_LENGTH,
    )
}

/// Pick uniformly among the cells the snake does not cover, scanning
/// row-major. A full field yields `(0, 0)`.
pub fn random_free_cell<R: Rng + ?Sized>(size: i32, snake: &Snake, rng: &mut R) -> Position {
    let free: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|&pos| !snake.occupies(pos))
        .collect();

    free.choose(rng).copied().unwrap_or(Position::new(0, 0))
}
