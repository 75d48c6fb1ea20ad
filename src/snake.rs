use std::collections::VecDeque;
use std::ops::Add;

use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for one tick. Rows grow downwards.
    pub fn delta(self) -> Point {
        match self {
            Up => Point::new(0, -1),
            Down => Point::new(0, 1),
            Left => Point::new(-1, 0),
            Right => Point::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    /// A straight snake of `size` segments whose head sits at `head`, trailing
    /// away from `direction`.
    pub fn new(head: Point, size: usize, direction: Direction) -> Self {
        let back = direction.opposite().delta();
        let body = (0..size.max(1) as i32)
            .map(|i| Point::new(head.x + back.x * i, head.y + back.y * i))
            .collect();
        Snake { body, direction }
    }

    /// Builds a snake from segments listed head first.
    #[cfg(test)]
    pub fn from_body(body: impl IntoIterator<Item = Point>, direction: Direction) -> Self {
        let body: VecDeque<Point> = body.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body, direction }
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[cfg(test)]
    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Where the head lands on the next move.
    pub fn next_head(&self) -> Point {
        self.head() + self.direction.delta()
    }

    /// True if any segment, tail included, sits on `pos`.
    pub fn occupies(&self, pos: Point) -> bool {
        self.body.contains(&pos)
    }

    /// Ignores a request to turn straight back. Returns whether the turn was taken.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Pushes `new_head` and drops the tail unless the snake grows this move.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Point::new(10, 10), 3, Right);
        let body: Vec<Point> = snake.body().iter().copied().collect();
        assert_eq!(body, vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]);
        assert_eq!(snake.next_head(), Point::new(11, 10));
    }

    #[test]
    fn reverse_turn_is_ignored() {
        for dir in [Up, Down, Left, Right] {
            let mut snake = Snake::new(Point::new(5, 5), 3, dir);
            assert!(!snake.set_direction(dir.opposite()));
            assert_eq!(snake.get_direction(), dir);
        }
    }

    #[test]
    fn perpendicular_turn_is_taken() {
        let mut snake = Snake::new(Point::new(5, 5), 3, Right);
        assert!(snake.set_direction(Up));
        assert_eq!(snake.get_direction(), Up);
        assert_eq!(snake.next_head(), Point::new(5, 4));
    }

    #[test]
    fn advance_keeps_or_grows_length() {
        let mut snake = Snake::new(Point::new(5, 5), 3, Right);
        snake.advance(snake.next_head(), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(6, 5));

        snake.advance(snake.next_head(), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body().back(), Some(&Point::new(4, 5)));
    }
}
