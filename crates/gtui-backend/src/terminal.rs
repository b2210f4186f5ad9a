#![forbid(unsafe_code)]

//! The local terminal as a screen source.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gtui_core::event::Event;
use gtui_core::terminal_session::{SessionOptions, TerminalSession};
use gtui_core::warn;
use gtui_render::Cell;
use gtui_render::presenter::Presenter;

use crate::events::{EventSource, SourceEvent, Waker};
use crate::screen::Screen;

/// Raw-mode terminal writing through a [`Presenter`] on stdout.
pub struct TerminalScreen {
    presenter: Presenter<Stdout>,
    // Dropped after the presenter so pending output lands before the
    // terminal is restored.
    session: TerminalSession,
}

impl TerminalScreen {
    /// Enter raw mode on the controlling terminal.
    pub fn open(mouse: bool) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: true,
            mouse_capture: mouse,
        })?;
        let mut presenter = Presenter::new(io::stdout());
        presenter.hide_cursor()?;
        presenter.clear_screen()?;
        presenter.flush()?;
        Ok(Self { presenter, session })
    }
}

impl std::fmt::Debug for TerminalScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalScreen")
            .field("options", self.session.options())
            .finish()
    }
}

impl Screen for TerminalScreen {
    fn size(&self) -> (u16, u16) {
        match self.session.size() {
            Ok(size) => size,
            Err(e) => {
                warn!(error = %e, "terminal size query failed");
                (0, 0)
            }
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        self.presenter.clear_screen()?;
        self.presenter.flush()
    }

    fn put(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        self.presenter.put_cell(x, y, cell)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.presenter.flush()
    }
}

/// Terminal input through crossterm's event reader.
#[derive(Debug, Default)]
pub struct TerminalEvents {
    woken: Arc<AtomicBool>,
}

impl TerminalEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for TerminalEvents {
    fn read_event(&mut self, cycle: Duration) -> io::Result<SourceEvent> {
        if self.woken.swap(false, Ordering::SeqCst) {
            return Ok(SourceEvent::Wake);
        }
        if !crossterm::event::poll(cycle)? {
            return Ok(SourceEvent::Idle);
        }
        let raw = crossterm::event::read()?;
        Ok(match Event::from_crossterm(raw) {
            Some(event) => SourceEvent::Event(event),
            None => SourceEvent::Idle,
        })
    }

    fn waker(&self) -> Waker {
        Waker::from_flag(Arc::clone(&self.woken))
    }
}
