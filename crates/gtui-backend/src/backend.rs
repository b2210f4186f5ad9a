#![forbid(unsafe_code)]

//! The backend state machine.
//!
//! A [`Backend`] is `Uninitialized` until [`Backend::init`], `Active` until
//! [`Backend::close`], and may be initialized again afterwards. Rendering,
//! clearing and size queries are no-ops while not active. Each backend owns
//! its screen outright; there is no process-wide screen.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gtui_core::{debug, info, warn};
use gtui_render::drawable::lock;
use gtui_render::{Buffer, SharedDrawable};

use crate::capture;
use crate::config::{Config, Source};
use crate::error::BackendError;
use crate::events::{CancelSignal, EventSource, EventStream, SourceSlot};
use crate::pipeline;
use crate::remote;
use crate::screen::Screen;
use crate::simulated::{SimulatedInput, SimulatedScreen, simulated_source};

/// Lifecycle of a [`Backend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Active,
    Closed,
}

struct Active {
    screen: Box<dyn Screen>,
    events: SourceSlot,
    /// Cancels the running poll, if any, on close.
    poll: Mutex<Option<CancelSignal>>,
    input: Option<SimulatedInput>,
    capture: Option<PathBuf>,
    read_cycle: std::time::Duration,
    last_frame: Option<Buffer>,
}

enum Inner {
    Uninitialized,
    Active(Active),
    Closed,
}

/// Owns one logical screen and its input.
pub struct Backend {
    inner: Inner,
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("state", &self.state())
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

impl Backend {
    /// An uninitialized backend.
    pub fn new() -> Self {
        Self {
            inner: Inner::Uninitialized,
        }
    }

    /// Create and initialize in one step.
    pub fn with_config(config: Config) -> Result<Self, BackendError> {
        let mut backend = Self::new();
        backend.init(config)?;
        Ok(backend)
    }

    pub fn state(&self) -> State {
        match self.inner {
            Inner::Uninitialized => State::Uninitialized,
            Inner::Active(_) => State::Active,
            Inner::Closed => State::Closed,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.inner, Inner::Active(_))
    }

    /// Attach to the screen source `config` names.
    ///
    /// # Errors
    ///
    /// [`BackendError::AlreadyActive`] if already initialized, or
    /// [`BackendError::Io`] if the terminal or stream cannot be set up. A
    /// failed init leaves the previous state unchanged.
    pub fn init(&mut self, config: Config) -> Result<(), BackendError> {
        if self.is_active() {
            return Err(BackendError::AlreadyActive);
        }
        let Config {
            source,
            capture,
            read_cycle,
            mouse,
        } = config;

        let (screen, events, input): (Box<dyn Screen>, Box<dyn EventSource>, _) = match source {
            Source::Simulated { width, height } => {
                let (events, input) = simulated_source();
                (
                    Box::new(SimulatedScreen::new(width, height)),
                    Box::new(events),
                    Some(input),
                )
            }
            Source::Remote { stream, size } => {
                let (screen, events) = remote::connect(stream, size)?;
                (Box::new(screen), Box::new(events), None)
            }
            #[cfg(not(target_arch = "wasm32"))]
            Source::Terminal => {
                let screen = crate::terminal::TerminalScreen::open(mouse)?;
                (
                    Box::new(screen),
                    Box::new(crate::terminal::TerminalEvents::new()),
                    None,
                )
            }
            #[cfg(target_arch = "wasm32")]
            Source::Terminal => {
                let _ = mouse;
                return Err(BackendError::Io(std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "no local terminal on this target",
                )));
            }
        };

        let (width, height) = screen.size();
        info!(width, height, capture = capture.is_some(), "backend initialized");
        self.inner = Inner::Active(Active {
            screen,
            events: Arc::new(Mutex::new(Some(events))),
            poll: Mutex::new(None),
            input,
            capture,
            read_cycle,
            last_frame: None,
        });
        Ok(())
    }

    /// Release the screen and restore the terminal. A no-op unless active.
    ///
    /// A poll still running is cancelled; its stream ends within one read
    /// cycle.
    pub fn close(&mut self) {
        match std::mem::replace(&mut self.inner, Inner::Closed) {
            Inner::Active(mut active) => {
                if let Some(signal) = lock(&active.poll).take() {
                    signal.cancel();
                }
                if let Err(e) = active.screen.flush() {
                    warn!(error = %e, "final flush failed");
                }
                info!("backend closed");
            }
            Inner::Uninitialized => self.inner = Inner::Uninitialized,
            Inner::Closed => {}
        }
    }

    /// Current `(width, height)`, or `(0, 0)` when not active.
    pub fn dimensions(&self) -> (u16, u16) {
        match &self.inner {
            Inner::Active(active) => active.screen.size(),
            _ => (0, 0),
        }
    }

    /// Blank the screen. A no-op unless active.
    pub fn clear(&mut self) -> Result<(), BackendError> {
        let Inner::Active(active) = &mut self.inner else {
            return Ok(());
        };
        active.screen.clear()?;
        active.last_frame = None;
        Ok(())
    }

    /// Compose `drawables` and show the frame. A no-op unless active.
    ///
    /// In capture mode the frame is written as a PNG instead and the process
    /// exits with status 0.
    pub fn render(&mut self, drawables: &[SharedDrawable]) -> Result<(), BackendError> {
        let Inner::Active(active) = &mut self.inner else {
            debug!("render skipped, backend not active");
            return Ok(());
        };
        let frame = pipeline::compose(drawables);

        if let Some(path) = &active.capture {
            let (width, height) = active.screen.size();
            let empty = Buffer::with_size(0, 0);
            let image = capture::rasterize(frame.as_ref().unwrap_or(&empty), width, height);
            capture::write_png(path, &image)?;
            std::process::exit(0);
        }

        pipeline::flush_frame(
            active.screen.as_mut(),
            frame.as_ref(),
            active.last_frame.as_ref(),
        )?;
        active.last_frame = frame;
        Ok(())
    }

    /// Render a single drawable.
    pub fn render_one(&mut self, drawable: SharedDrawable) -> Result<(), BackendError> {
        self.render(std::slice::from_ref(&drawable))
    }

    /// Start delivering input events.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotActive`] before init or after close, and
    /// [`BackendError::EventsInUse`] while another stream from this backend
    /// is still running.
    pub fn poll_events(&self) -> Result<EventStream, BackendError> {
        let Inner::Active(active) = &self.inner else {
            return Err(BackendError::NotActive);
        };
        let source = lock(&active.events)
            .take()
            .ok_or(BackendError::EventsInUse)?;
        let stream = EventStream::start(Arc::clone(&active.events), source, active.read_cycle);
        *lock(&active.poll) = Some(stream.cancel_signal());
        Ok(stream)
    }

    /// Handle for pushing events into a simulated backend.
    pub fn simulated_input(&self) -> Option<SimulatedInput> {
        match &self.inner {
            Inner::Active(active) => active.input.clone(),
            _ => None,
        }
    }

    /// The in-memory screen contents of a simulated backend.
    pub fn snapshot(&self) -> Option<Buffer> {
        match &self.inner {
            Inner::Active(active) => active.screen.contents().cloned(),
            _ => None,
        }
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        self.close();
    }
}
