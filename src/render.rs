use std::io::{self, Write};

use crossterm::{cursor, queue, style, terminal};
use crossterm::terminal::ClearType;

use crate::game::Game;
use crate::snake::Point;

const BORDER_CHAR: char = '█';
const EMPTY_CHAR: char = ' ';
const FOOD_CHAR: char = '♦';
const SNAKE_CHAR: char = '■';

// Raw mode turns off output post-processing, so every line needs its own carriage return.
const LINE_END: &str = "\r\n";

/// Builds the text of one frame: status line, board rows, then the game-over
/// block if the game has ended.
pub fn frame(game: &Game) -> Vec<String> {
    let (width, height) = (game.width(), game.height());

    let mut board: Vec<Vec<char>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if y == 0 || y == height - 1 || x == 0 || x == width - 1 {
                        BORDER_CHAR
                    } else {
                        EMPTY_CHAR
                    }
                })
                .collect()
        })
        .collect();

    put(&mut board, game.food(), FOOD_CHAR);
    for segment in game.snake().body() {
        put(&mut board, *segment, SNAKE_CHAR);
    }

    let mut lines = Vec::with_capacity(board.len() + 4);
    lines.push(format!("Score: {} | Arrow Keys to Move | Q to Quit", game.score()));
    lines.extend(board.into_iter().map(|row| row.into_iter().collect::<String>()));

    if game.is_over() {
        lines.push(String::new());
        lines.push(format!("GAME OVER! Final Score: {}", game.score()));
        lines.push("Press Q to quit or R to restart".to_string());
    }

    lines
}

/// Clears the screen and writes the current frame.
pub fn draw<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for line in frame(game) {
        queue!(out, style::Print(line), style::Print(LINE_END))?;
    }
    out.flush()
}

fn put(board: &mut [Vec<char>], pos: Point, ch: char) {
    let (Ok(x), Ok(y)) = (usize::try_from(pos.x), usize::try_from(pos.y)) else {
        return;
    };
    if let Some(cell) = board.get_mut(y).and_then(|row| row.get_mut(x)) {
        *cell = ch;
    }
}
