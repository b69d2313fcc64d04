pub mod app;
pub mod components;
pub mod events;
pub mod ui;

use crate::error::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

pub use app::App;
pub use events::EventHandler;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Switch to the alternate screen with raw mode and mouse capture.
///
/// A panic hook is installed that puts the terminal back before the panic message is printed.
pub fn init() -> Result<Tui> {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous_hook(info);
    }));

    enable_raw_mode()?;
    undo_on_error(
        || {
            execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
            let backend = CrosstermBackend::new(io::stdout());
            Ok(Terminal::new(backend)?)
        },
        restore,
    )
}

pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Run `step`, calling `undo` before returning its error. The original error wins over one from
/// `undo`.
fn undo_on_error<T>(
    step: impl FnOnce() -> Result<T>,
    undo: impl FnOnce() -> Result<()>,
) -> Result<T> {
    step().inspect_err(|_| {
        let _ = undo();
    })
}
