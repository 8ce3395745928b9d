//! Terminal session owning raw mode, the alternate screen and mouse capture.
//!
//! The card list reacts to clicks, so mouse capture is part of the session.
//! Whatever way the session ends (normal return, `?`, or a panic), the
//! terminal is handed back in cooked mode with the cursor visible.

use std::io::{self, Stdout};
use std::sync::Once;

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        cursor::Show,
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

pub type Backend = CrosstermBackend<Stdout>;

static PANIC_HOOK: Once = Once::new();

/// Live terminal session. Dropping it restores the terminal.
pub struct TerminalSession {
    terminal: Terminal<Backend>,
}

impl TerminalSession {
    /// Enters raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured. Anything
    /// already switched on is switched back off first.
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);

        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = leave();
            return Err(err);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave();
                return Err(err);
            }
        };
        let mut session = Self { terminal };
        session.terminal.hide_cursor()?;
        session.terminal.clear()?;
        tracing::debug!("terminal session entered");
        Ok(session)
    }

    /// The terminal to draw on.
    pub fn terminal(&mut self) -> &mut Terminal<Backend> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = leave() {
            tracing::warn!(%err, "terminal restore failed");
        }
    }
}

fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = leave();
        hook(panic_info);
    }));
}

/// Undoes every mode the session turns on. Safe to call more than once.
fn leave() -> io::Result<()> {
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show)?;
    disable_raw_mode()
}
