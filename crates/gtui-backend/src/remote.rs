#![forbid(unsafe_code)]

//! A remote terminal over a byte stream.
//!
//! Output is ANSI written through a [`Presenter`]; input is decoded with the
//! byte-stream [`InputParser`]. Each backend owns its own stream, so
//! independent sessions never share screen state.

use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use gtui_core::event::Event;
use gtui_core::input_parser::InputParser;
use gtui_core::{debug, info, warn};
use gtui_render::Cell;
use gtui_render::ansi;
use gtui_render::presenter::Presenter;

use crate::config::{Duplex, FALLBACK_SIZE};
use crate::events::{EventSource, SourceEvent, Waker};
use crate::screen::Screen;

/// How long to wait for the answer to the size query.
pub const SIZE_QUERY_TIMEOUT: Duration = Duration::from_millis(500);

const READ_CHUNK: usize = 1024;

/// Output half of a remote session.
pub struct RemoteScreen {
    presenter: Presenter<Box<dyn Duplex>>,
    size: (u16, u16),
}

impl std::fmt::Debug for RemoteScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteScreen").field("size", &self.size).finish()
    }
}

impl Screen for RemoteScreen {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn clear(&mut self) -> io::Result<()> {
        self.presenter.clear_screen()?;
        self.presenter.flush()
    }

    fn put(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if x >= self.size.0 || y >= self.size.1 {
            return Ok(());
        }
        self.presenter.put_cell(x, y, cell)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.presenter.flush()
    }
}

impl Drop for RemoteScreen {
    fn drop(&mut self) {
        let mut restore = Vec::new();
        restore.extend_from_slice(ansi::SGR_RESET);
        restore.extend_from_slice(ansi::MOUSE_DISABLE);
        restore.extend_from_slice(ansi::CURSOR_SHOW);
        restore.extend_from_slice(ansi::ALT_SCREEN_LEAVE);
        let _ = self.presenter.write_raw(&restore);
        let _ = self.presenter.flush();
    }
}

/// Input half of a remote session.
pub struct RemoteEvents {
    reader: Box<dyn Duplex>,
    parser: InputParser,
    pending: VecDeque<Event>,
    woken: Arc<AtomicBool>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for RemoteEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEvents")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl RemoteEvents {
    fn new(reader: Box<dyn Duplex>) -> Self {
        Self {
            reader,
            parser: InputParser::new(),
            pending: VecDeque::new(),
            woken: Arc::new(AtomicBool::new(false)),
            timeout: None,
        }
    }

    fn set_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        if self.timeout != Some(timeout) {
            self.reader.set_read_timeout(Some(timeout))?;
            self.timeout = Some(timeout);
        }
        Ok(())
    }

    /// Read one chunk into the parser. `Ok(false)` means the read timed out.
    fn fill(&mut self, timeout: Duration) -> io::Result<bool> {
        self.set_timeout(timeout)?;
        let mut chunk = [0u8; READ_CHUNK];
        match self.reader.read(&mut chunk) {
            Ok(0) => Err(closed()),
            Ok(n) => {
                let events = self.parser.parse(&chunk[..n]);
                self.pending.extend(events);
                Ok(true)
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(false)
            }
            // A peer that hangs up with our output unread resets instead of
            // closing cleanly.
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::ConnectionReset
                        | io::ErrorKind::ConnectionAborted
                        | io::ErrorKind::BrokenPipe
                ) =>
            {
                Err(closed())
            }
            Err(e) => Err(e),
        }
    }

    /// Wait for a cursor position report until `deadline`.
    fn await_cursor_report(&mut self, deadline: Instant) -> io::Result<Option<(u16, u16)>> {
        loop {
            if let Some(report) = self.parser.take_cursor_report() {
                return Ok(Some(report));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            self.fill(deadline - now)?;
        }
    }
}

impl EventSource for RemoteEvents {
    fn read_event(&mut self, cycle: Duration) -> io::Result<SourceEvent> {
        if self.woken.swap(false, Ordering::SeqCst) {
            return Ok(SourceEvent::Wake);
        }
        if let Some(event) = self.pending.pop_front() {
            return Ok(SourceEvent::Event(event));
        }
        if !self.fill(cycle)? {
            if let Some(event) = self.parser.flush_pending() {
                return Ok(SourceEvent::Event(event));
            }
            return Ok(SourceEvent::Idle);
        }
        Ok(match self.pending.pop_front() {
            Some(event) => SourceEvent::Event(event),
            None => SourceEvent::Idle,
        })
    }

    fn waker(&self) -> Waker {
        Waker::from_flag(Arc::clone(&self.woken))
    }
}

/// Set up a remote session on `stream`.
///
/// Switches the remote terminal to the alternate screen with mouse
/// reporting, then takes `size` or asks the terminal for it. A terminal that
/// does not answer within [`SIZE_QUERY_TIMEOUT`] is assumed to be
/// [`FALLBACK_SIZE`]. Input that arrives while waiting is kept for the first
/// poll.
pub fn connect(
    stream: Box<dyn Duplex>,
    size: Option<(u16, u16)>,
) -> io::Result<(RemoteScreen, RemoteEvents)> {
    let writer = stream.try_clone_duplex()?;
    let mut presenter = Presenter::new(writer);
    let mut setup = Vec::new();
    setup.extend_from_slice(ansi::ALT_SCREEN_ENTER);
    setup.extend_from_slice(ansi::MOUSE_ENABLE);
    setup.extend_from_slice(ansi::CURSOR_HIDE);
    presenter.write_raw(&setup)?;
    presenter.clear_screen()?;
    presenter.flush()?;

    let mut events = RemoteEvents::new(stream);
    let size = match size {
        Some(size) => size,
        None => {
            presenter.write_raw(ansi::SIZE_QUERY)?;
            presenter.flush()?;
            match events.await_cursor_report(Instant::now() + SIZE_QUERY_TIMEOUT)? {
                Some(size) => {
                    debug!(width = size.0, height = size.1, "remote size reported");
                    size
                }
                None => {
                    warn!("remote terminal did not report its size, assuming 80x24");
                    FALLBACK_SIZE
                }
            }
        }
    };
    info!(width = size.0, height = size.1, "remote session attached");
    Ok((RemoteScreen { presenter, size }, events))
}

fn closed() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "remote terminal closed the stream",
    )
}
