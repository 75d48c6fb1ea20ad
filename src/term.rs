use std::io::{stdout, Stdout};

use crossterm::{cursor, execute, terminal};
use tracing::{debug, warn};

/// Holds the terminal in raw mode for as long as it lives.
///
/// crossterm records the original line settings the first time raw mode is
/// enabled, so restoring from another thread (the signal handler) puts back
/// the same settings this guard would.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    /// Enters raw mode and hides the cursor. Failures are logged and the game
    /// carries on in whatever mode the terminal is in.
    pub fn setup(&mut self) {
        if let Err(err) = terminal::enable_raw_mode() {
            warn!(%err, "could not enable raw mode");
        }
        if let Err(err) = execute!(self.stdout, cursor::Hide) {
            warn!(%err, "could not hide cursor");
        }
        self.active = true;
        debug!("terminal in raw mode");
    }

    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        restore_terminal();
        debug!("terminal restored");
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.stdout
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Leaves raw mode and shows the cursor again. Safe to call more than once.
pub fn restore_terminal() {
    if let Err(err) = terminal::disable_raw_mode() {
        warn!(%err, "could not disable raw mode");
    }
    if let Err(err) = execute!(stdout(), cursor::Show) {
        warn!(%err, "could not show cursor");
    }
}

/// Restores the terminal and ends the process. Shared by the signal handler
/// and the Ctrl-C keystroke.
pub fn terminate() -> ! {
    restore_terminal();
    println!("\nGame terminated!");
    std::process::exit(0);
}
