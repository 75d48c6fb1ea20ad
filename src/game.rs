use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::input::Command;
use crate::snake::{Direction, Point, Snake};

pub struct Game {
    config: Config,
    snake: Snake,
    food: Point,
    score: u32,
    game_over: bool,
    quit: bool,
    rng: StdRng,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Game::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        let snake = Snake::new(config.start, config.initial_length, config.initial_direction);
        let mut game = Game {
            food: config.start,
            config,
            snake,
            score: 0,
            game_over: false,
            quit: false,
            rng,
        };
        game.init();
        game
    }

    /// Puts the board back to its starting state. Also used to restart.
    pub fn init(&mut self) {
        self.snake = Snake::new(
            self.config.start,
            self.config.initial_length,
            self.config.initial_direction,
        );
        self.score = 0;
        self.game_over = false;
        self.quit = false;
        self.spawn_food();
    }

    /// Samples interior cells until one is free of the snake.
    pub fn spawn_food(&mut self) {
        loop {
            let candidate = Point::new(
                self.rng.gen_range(1..self.config.width - 1),
                self.rng.gen_range(1..self.config.height - 1),
            );
            if !self.snake.occupies(candidate) {
                self.food = candidate;
                debug!(x = candidate.x, y = candidate.y, "food spawned");
                return;
            }
        }
    }

    /// Advances the snake by one tick.
    pub fn update(&mut self) {
        if self.game_over || self.quit {
            return;
        }

        let new_head = self.snake.next_head();

        // The tail still counts as occupied even though it would move away this tick.
        if !self.is_interior(new_head) || self.snake.occupies(new_head) {
            self.game_over = true;
            info!(
                score = self.score,
                length = self.snake.len(),
                x = new_head.x,
                y = new_head.y,
                "game over"
            );
            return;
        }

        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);

        if ate {
            self.score += 1;
            debug!(score = self.score, "food eaten");
            self.spawn_food();
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Turn(dir) => self.change_direction(dir),
            Command::Quit => self.quit = true,
            // The main loop ends the process on Ctrl-C before it gets here. Anything
            // else feeding commands in still gets a stop.
            Command::Interrupt => {
                debug!("interrupt applied as quit");
                self.quit = true;
            }
            Command::Restart if self.game_over => {
                info!(score = self.score, "restarting");
                self.init();
            }
            Command::Restart => trace!("restart ignored while playing"),
        }
    }

    fn change_direction(&mut self, dir: Direction) {
        if self.snake.set_direction(dir) {
            debug!(?dir, "direction changed");
        } else {
            trace!(?dir, "reverse turn rejected");
        }
    }

    fn is_interior(&self, pos: Point) -> bool {
        pos.x > 0 && pos.x < self.config.width - 1 && pos.y > 0 && pos.y < self.config.height - 1
    }

    pub fn width(&self) -> i32 {
        self.config.width
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }
}
