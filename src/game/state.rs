use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    pub fn is_within(&self, width: usize, height: usize) -> bool {
        let inside = |v: i32, side: usize| usize::try_from(v).is_ok_and(|v| v < side);
        inside(self.x, width) && inside(self.y, height)
    }
}

/// The snake's body
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Cell the tail left on the most recent move. A grown segment lands here.
    vacated: Position,
}

impl Snake {
    /// Create a snake lying in a horizontal row with the head on the right
    pub fn new(head: Position, length: usize) -> Self {
        let body: Vec<Position> = std::iter::successors(Some(head), |p| Some(p.moved_by(-1, 0)))
            .take(length.max(1))
            .collect();
        Self::from_segments(body)
    }

    /// Build a snake from explicit segments, head first. Panics on an empty list.
    pub fn from_segments(body: Vec<Position>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least a head");
        let vacated = body[body.len() - 1];
        Self { body, vacated }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Shift every segment one place toward the tail and step the head
    pub fn advance(&mut self, direction: Direction) {
        self.vacated = self.tail();
        let new_head = self.head().moved_in_direction(direction);
        self.body.rotate_right(1);
        self.body[0] = new_head;
    }

    /// Add one segment at the tail
    pub fn grow(&mut self) {
        self.body.push(self.vacated);
    }

    /// True if `pos` matches a segment whose index is greater than `offset`
    pub fn collides_beyond(&self, pos: Position, offset: usize) -> bool {
        self.body.iter().skip(offset.saturating_add(1)).any(|&segment| segment == pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_within(20, 20));
        assert!(Position::new(19, 19).is_within(20, 20));
        assert!(!Position::new(-1, 0).is_within(20, 20));
        assert!(!Position::new(20, 0).is_within(20, 20));
        assert!(!Position::new(0, 20).is_within(20, 20));
        assert!(!Position::new(0, -1).is_within(20, 20));
        // Sides beyond i32 must not wrap around
        assert!(Position::new(10, 0).is_within((1 << 32) + 10, 20));
        assert!(!Position::new(-1, 0).is_within(usize::MAX, 20));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), 3);
        snake.advance(Direction::Up);

        assert_eq!(
            snake.body,
            vec![Position::new(5, 4), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_grow_uses_vacated_cell() {
        let mut snake = Snake::new(Position::new(5, 5), 3);

        // Before any move the new segment stacks on the tail
        snake.grow();
        assert_eq!(snake.tail(), Position::new(3, 5));

        snake.advance(Direction::Right);
        snake.grow();
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert_eq!(snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_collides_beyond_offset() {
        let body = (0..6).map(|i| Position::new(i, 0)).collect();
        let snake = Snake::from_segments(body);

        assert!(!snake.collides_beyond(Position::new(3, 0), 3));
        assert!(snake.collides_beyond(Position::new(4, 0), 3));
        assert!(snake.collides_beyond(Position::new(5, 0), 3));
        assert!(!snake.collides_beyond(Position::new(9, 9), 3));
        assert!(!snake.collides_beyond(Position::new(5, 0), usize::MAX));
    }
}
