use std::time::Duration;

use crate::snake::{Direction, Point};

const BOARD_WIDTH: i32 = 40;
const BOARD_HEIGHT: i32 = 20;
const TICK_INTERVAL_MS: u64 = 140;
const INITIAL_SNAKE_LENGTH: usize = 3;
const START_HEAD: Point = Point { x: 10, y: 10 };

/// Fixed game settings. The binary always runs with `Config::default()`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Board width, border columns included.
    pub width: i32,
    /// Board height, border rows included.
    pub height: i32,
    pub tick: Duration,
    pub start: Point,
    pub initial_length: usize,
    pub initial_direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            tick: Duration::from_millis(TICK_INTERVAL_MS),
            start: START_HEAD,
            initial_length: INITIAL_SNAKE_LENGTH,
            initial_direction: Direction::Right,
        }
    }
}
