use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

use crate::error::AppError;

/// Raw-mode + alternate-screen terminal, restored on drop. Construction
/// failure is the one fatal renderer condition: the caller exits instead of
/// running a half-initialized session.
pub struct TuiTerminal {
    inner: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiTerminal {
    pub fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::Message(format!("no usable terminal (raw mode failed): {e}")))?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Message(format!(
                "failed to enter alternate screen: {e}"
            )));
        }
        let inner = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            restore_terminal();
            AppError::Message(format!("failed to initialize terminal backend: {e}"))
        })?;
        Ok(Self { inner })
    }

    pub fn draw<F: FnOnce(&mut Frame)>(&mut self, render: F) -> Result<(), AppError> {
        self.inner
            .draw(render)
            .map(|_| ())
            .map_err(|e| AppError::Message(format!("terminal draw failed: {e}")))
    }
}

impl Drop for TuiTerminal {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}

/// Restores the terminal before the default panic report so a panic inside
/// the draw loop does not leave the shell in raw mode.
pub struct PanicRestoreHookGuard;

impl PanicRestoreHookGuard {
    pub fn install() -> Self {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            original(info);
        }));
        Self
    }
}
