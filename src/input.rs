use std::io::Read;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use crate::snake::Direction;

const ESC: u8 = 27;
const CSI: u8 = b'[';
const CTRL_C: u8 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(10);

/// What a keystroke asks the main loop to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
    Restart,
    /// Ctrl-C as a raw byte, since raw mode swallows SIGINT.
    Interrupt,
}

/// Starts the input thread on `reader`.
pub fn spawn<R: Read + Send + 'static>(reader: R, tx: Sender<Command>) -> JoinHandle<()> {
    thread::spawn(move || read_loop(reader, tx))
}

/// Decodes keystrokes one byte at a time and forwards them until the player
/// quits or nobody is listening anymore.
pub fn read_loop<R: Read>(mut reader: R, tx: Sender<Command>) {
    loop {
        let command = next_command(&mut reader);
        let last = matches!(command, Command::Quit | Command::Interrupt);
        if tx.send(command).is_err() {
            debug!("command receiver dropped, stopping input");
            return;
        }
        if last {
            return;
        }
    }
}

/// Blocks until the reader yields a recognised keystroke.
fn next_command<R: Read>(reader: &mut R) -> Command {
    loop {
        let key = match read_byte(reader) {
            Ok(Some(key)) => key,
            Ok(None) => {
                thread::sleep(RETRY_DELAY);
                continue;
            }
            Err(err) => {
                trace!(%err, "stdin read failed, retrying");
                thread::sleep(RETRY_DELAY);
                continue;
            }
        };

        let command = match key {
            ESC => read_arrow(reader).map(Command::Turn),
            b'q' | b'Q' => Some(Command::Quit),
            b'r' | b'R' => Some(Command::Restart),
            CTRL_C => Some(Command::Interrupt),
            _ => None,
        };

        if let Some(command) = command {
            return command;
        }
    }
}

fn read_byte<R: Read>(reader: &mut R) -> std::io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    match reader.read(&mut buf)? {
        0 => Ok(None),
        _ => Ok(Some(buf[0])),
    }
}

/// Reads the two bytes after an escape. Anything but `[` followed by A-D is dropped.
fn read_arrow<R: Read>(reader: &mut R) -> Option<Direction> {
    let mut seq = [0u8; 2];
    if let Err(err) = reader.read_exact(&mut seq) {
        trace!(%err, "incomplete escape sequence");
        return None;
    }

    match seq {
        [CSI, b'A'] => Some(Direction::Up),
        [CSI, b'B'] => Some(Direction::Down),
        [CSI, b'C'] => Some(Direction::Right),
        [CSI, b'D'] => Some(Direction::Left),
        _ => None,
    }
}
