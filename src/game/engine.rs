use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    action::Direction,
    config::GameConfig,
    snapshot::{Cell, CellKind, GameOverOverlay, RenderSnapshot},
    state::{CollisionType, GameStatus, Position, Snake},
};

/// Sound notifications the engine asks its driver to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    GrowMinor,
    GrowMajor,
    Loss,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set on the tick that ended the game
    pub collision: Option<CollisionType>,
    /// Cues to play, in order
    pub cues: Vec<Cue>,
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        self.collision.is_some()
    }
}

/// Owns the whole game state and advances it one tick at a time
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    snake: Snake,
    food: Position,
    direction: Option<Direction>,
    status: GameStatus,
    foods_eaten: u32,
}

impl GameEngine {
    /// Create a new game, ready to run
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let snake = Snake::new(config.start, config.initial_snake_length);
        let mut engine = Self {
            food: config.start,
            config,
            rng,
            snake,
            direction: None,
            status: GameStatus::Running,
            foods_eaten: 0,
        };
        engine.food = engine.spawn_food();
        engine
    }

    /// Build a game from an arbitrary snake and food cell, already running
    pub fn from_parts(
        config: GameConfig,
        snake: Snake,
        food: Position,
        direction: Option<Direction>,
    ) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
            snake,
            food,
            direction,
            status: GameStatus::Running,
            foods_eaten: 0,
        }
    }

    /// Put the game back to its starting state. Returns the cue to play.
    pub fn reset(&mut self) -> Cue {
        self.snake = Snake::new(self.config.start, self.config.initial_snake_length);
        self.direction = None;
        self.status = GameStatus::Running;
        self.foods_eaten = 0;
        self.food = self.spawn_food();
        Cue::Start
    }

    /// Start a new game, but only once the current one is over
    pub fn restart(&mut self) -> Option<Cue> {
        if self.status != GameStatus::GameOver {
            return None;
        }
        info!("restarting after a game of length {}", self.snake.len());
        Some(self.reset())
    }

    /// Change the direction of travel. A reversal is ignored and returns false.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if let Some(current) = self.direction {
            if current.is_opposite(direction) {
                debug!("ignoring reversal from {current:?} to {direction:?}");
                return false;
            }
        }
        self.direction = Some(direction);
        true
    }

    /// Advance the game by one step.
    ///
    /// Food and collisions are checked against the head as it was left by the
    /// previous tick, then the snake moves. A move off the grid is therefore
    /// only noticed on the following tick.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.status != GameStatus::Running {
            return outcome;
        }

        if self.snake.head() == self.food {
            // The snake never holds more segments than the grid has cells
            if self.snake.len() < self.config.max_segments() {
                self.snake.grow();
            }
            self.foods_eaten += 1;
            self.food = self.spawn_food();
            outcome.ate_food = true;
            outcome.cues.push(self.grow_cue());
        }

        if let Some(collision) = self.check_collision() {
            info!(
                "game over ({collision:?}) at {:?} with length {}",
                self.snake.head(),
                self.snake.len()
            );
            self.status = GameStatus::GameOver;
            outcome.collision = Some(collision);
            outcome.cues.push(Cue::Loss);
            return outcome;
        }

        if let Some(direction) = self.direction {
            self.snake.advance(direction);
        }

        outcome
    }

    /// Check the current head against the walls and the body
    pub fn check_collision(&self) -> Option<CollisionType> {
        let head = self.snake.head();

        if !head.is_within(self.config.grid_width, self.config.grid_height) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_beyond(head, self.config.collision_offset) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let cells = self
            .snake
            .body
            .iter()
            .enumerate()
            .map(|(i, &position)| Cell {
                position,
                kind: if i == 0 { CellKind::Head } else { CellKind::Body },
            })
            .collect();

        let overlay = match self.status {
            GameStatus::Running => None,
            GameStatus::GameOver => Some(GameOverOverlay::new(self.score())),
        };

        RenderSnapshot {
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            cells,
            food: self.food,
            length: self.snake.len(),
            score: self.score(),
            overlay,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn segments(&self) -> &[Position] {
        &self.snake.body
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn length(&self) -> usize {
        self.snake.len()
    }

    /// Segments gained since the start of the game
    pub fn score(&self) -> usize {
        self.snake
            .len()
            .saturating_sub(self.config.initial_snake_length)
    }

    fn grow_cue(&self) -> Cue {
        if self.foods_eaten.checked_rem(self.config.major_cue_every) == Some(0) {
            Cue::GrowMajor
        } else {
            Cue::GrowMinor
        }
    }

    /// Pick a uniformly random cell. Cells under the snake are not excluded.
    fn spawn_food(&mut self) -> Position {
        let width = i32::try_from(self.config.grid_width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.config.grid_height).unwrap_or(i32::MAX);
        let x = self.rng.gen_range(0..width);
        let y = self.rng.gen_range(0..height);
        Position::new(x, y)
    }

    #[cfg(test)]
    fn place_food(&mut self, food: Position) {
        self.food = food;
    }
}
