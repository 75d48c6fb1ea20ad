mod config;
mod game;
mod input;
mod render;
mod snake;
mod term;

use std::io::{stdin, Write};
use std::sync::mpsc::{channel, Receiver};
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::game::Game;
use crate::input::Command;
use crate::term::TermManager;

fn main() {
    init_tracing();

    let config = Config::default();
    info!(
        width = config.width,
        height = config.height,
        tick_ms = config.tick.as_millis() as u64,
        "starting"
    );

    // Installed before raw mode so a signal can never strand the terminal.
    if let Err(err) = install_signal_handler() {
        warn!("playing without a signal handler: {err:#}");
    }

    let mut terminal = TermManager::new();
    terminal.setup();

    let (tx, rx) = channel();
    input::spawn(stdin(), tx);

    let mut game = Game::new(config.clone());
    run(&mut game, &rx, terminal.out(), config.tick);

    terminal.restore();
    info!(score = game.score(), "quit");
    println!("\nThx for playing!");
}

/// SIGINT and SIGTERM skip the main loop entirely.
fn install_signal_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        term::terminate();
    })
    .context("installing the SIGINT/SIGTERM handler")
}

/// Ticks until the player quits. Commands queued since the last tick are
/// applied in order before the game moves.
fn run<W: Write>(game: &mut Game, rx: &Receiver<Command>, out: &mut W, tick: Duration) {
    let mut next_tick = Instant::now() + tick;

    while !game.has_quit() {
        sleep(next_tick.saturating_duration_since(Instant::now()));
        next_tick += tick;

        for command in rx.try_iter() {
            if command == Command::Interrupt {
                term::terminate();
            }
            game.apply(command);
        }

        if game.has_quit() {
            break;
        }

        if !game.is_over() {
            game.update();
        }
        if let Err(err) = render::draw(out, game) {
            warn!(%err, "could not draw frame");
        }
    }
}

fn init_tracing() {
    // The board owns stdout, so logs go to stderr and stay off unless RUST_LOG asks for them.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction, Point};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;
    use std::thread;

    const TICK: Duration = Duration::from_millis(1);

    fn game() -> Game {
        let config = Config { tick: TICK, ..Config::default() };
        Game::with_rng(config, StdRng::seed_from_u64(21))
    }

    /// A stdout that is always full.
    struct Full;

    impl Write for Full {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }
    }

    #[test]
    fn quit_ends_the_loop_before_moving_or_drawing() {
        let mut game = game();
        let (tx, rx) = channel();
        tx.send(Command::Turn(Direction::Up)).unwrap();
        tx.send(Command::Quit).unwrap();

        let mut out = Vec::new();
        run(&mut game, &rx, &mut out, TICK);

        assert!(game.has_quit());
        assert_eq!(game.snake().head(), Point::new(10, 10));
        assert_eq!(game.snake().get_direction(), Direction::Up);
        assert!(out.is_empty());
    }

    #[test]
    fn queued_turns_apply_in_order_and_frames_continue_after_game_over() {
        let mut game = game();
        let (tx, rx) = channel();
        // Up then Left: both accepted in this order, so the snake turns back into itself.
        // The other order would reject Left and just move up.
        tx.send(Command::Turn(Direction::Up)).unwrap();
        tx.send(Command::Turn(Direction::Left)).unwrap();
        let quitter = thread::spawn(move || {
            sleep(Duration::from_millis(30));
            let _ = tx.send(Command::Quit);
        });

        let mut out = Vec::new();
        run(&mut game, &rx, &mut out, TICK);
        quitter.join().unwrap();

        assert!(game.is_over());
        let body: Vec<Point> = game.snake().body().iter().copied().collect();
        assert_eq!(body, vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]);

        let text = String::from_utf8(out).unwrap();
        assert!(text.matches("GAME OVER! Final Score: 0").count() >= 2);
    }

    #[test]
    fn draw_failures_do_not_stop_the_game() {
        let mut game = game();
        let (tx, rx) = channel();
        let quitter = thread::spawn(move || {
            sleep(Duration::from_millis(10));
            let _ = tx.send(Command::Quit);
        });

        run(&mut game, &rx, &mut Full, TICK);
        quitter.join().unwrap();

        assert!(game.has_quit());
        assert_ne!(game.snake().head(), Point::new(10, 10));
    }
}
