#![forbid(unsafe_code)]

//! Backend configuration.
//!
//! A [`Config`] picks the screen source and a few knobs. Nothing here reads
//! the process environment; [`Config::from_args`] only looks at the
//! arguments it is handed.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Size of the simulated screen used by the screenshot flag.
pub const CAPTURE_WIDTH: u16 = 120;
pub const CAPTURE_HEIGHT: u16 = 40;

/// Image written by the screenshot flag.
pub const CAPTURE_FILE: &str = "screenshot.png";

/// Default bound on one driver read.
pub const DEFAULT_READ_CYCLE: Duration = Duration::from_millis(50);

/// Size assumed when a remote terminal does not answer the size query.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

const SCREENSHOT_FLAGS: [&str; 2] = ["-screenshot", "--screenshot"];

/// A bidirectional byte stream to a remote terminal.
///
/// The backend reads input from one handle and writes output to another, so
/// the stream must be clonable. Reads must honor a timeout so that a poll can
/// be cancelled.
pub trait Duplex: Read + Write + Send + 'static {
    fn try_clone_duplex(&self) -> io::Result<Box<dyn Duplex>>;

    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;
}

impl Duplex for TcpStream {
    fn try_clone_duplex(&self) -> io::Result<Box<dyn Duplex>> {
        Ok(Box::new(self.try_clone()?))
    }

    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }
}

#[cfg(unix)]
impl Duplex for std::os::unix::net::UnixStream {
    fn try_clone_duplex(&self) -> io::Result<Box<dyn Duplex>> {
        Ok(Box::new(self.try_clone()?))
    }

    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        std::os::unix::net::UnixStream::set_read_timeout(self, timeout)
    }
}

/// Where frames go and events come from.
pub enum Source {
    /// The process's own terminal, in raw mode.
    Terminal,
    /// An in-memory screen of fixed size.
    Simulated { width: u16, height: u16 },
    /// A remote terminal over a byte stream.
    Remote {
        stream: Box<dyn Duplex>,
        size: Option<(u16, u16)>,
    },
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal => write!(f, "Terminal"),
            Self::Simulated { width, height } => f
                .debug_struct("Simulated")
                .field("width", width)
                .field("height", height)
                .finish(),
            Self::Remote { size, .. } => f.debug_struct("Remote").field("size", size).finish(),
        }
    }
}

/// Backend initialization settings.
#[derive(Debug)]
pub struct Config {
    pub(crate) source: Source,
    pub(crate) capture: Option<PathBuf>,
    pub(crate) read_cycle: Duration,
    pub(crate) mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::terminal()
    }
}

impl Config {
    fn with_source(source: Source) -> Self {
        Self {
            source,
            capture: None,
            read_cycle: DEFAULT_READ_CYCLE,
            mouse: true,
        }
    }

    /// Drive the local terminal.
    pub fn terminal() -> Self {
        Self::with_source(Source::Terminal)
    }

    /// An in-memory screen. Events come from
    /// [`Backend::simulated_input`](crate::Backend::simulated_input).
    pub fn simulated(width: u16, height: u16) -> Self {
        Self::with_source(Source::Simulated { width, height })
    }

    /// Drive a remote terminal over `stream`.
    ///
    /// Unless [`Config::with_size`] is given, the size is asked for over the
    /// stream at init and defaults to [`FALLBACK_SIZE`] when no answer comes.
    pub fn remote(stream: impl Duplex) -> Self {
        Self::with_source(Source::Remote {
            stream: Box::new(stream),
            size: None,
        })
    }

    /// Fix the size of a remote screen. Ignored for other sources.
    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        if let Source::Remote { size, .. } = &mut self.source {
            *size = Some((width, height));
        }
        self
    }

    /// Write the first rendered frame to `path` as a PNG and exit.
    ///
    /// Capture always renders into a simulated screen; a terminal or remote
    /// source is replaced by one of [`CAPTURE_WIDTH`] x [`CAPTURE_HEIGHT`].
    #[must_use]
    pub fn with_capture(mut self, path: impl AsRef<Path>) -> Self {
        if !matches!(self.source, Source::Simulated { .. }) {
            self.source = Source::Simulated {
                width: CAPTURE_WIDTH,
                height: CAPTURE_HEIGHT,
            };
        }
        self.capture = Some(path.as_ref().to_path_buf());
        self
    }

    /// Upper bound on one blocking driver read, and so on how long a
    /// cancelled poll can take to stop. Zero is raised to one millisecond.
    #[must_use]
    pub fn with_read_cycle(mut self, cycle: Duration) -> Self {
        self.read_cycle = cycle.max(Duration::from_millis(1));
        self
    }

    /// Report mouse input from the local terminal.
    #[must_use]
    pub fn with_mouse(mut self, on: bool) -> Self {
        self.mouse = on;
        self
    }

    /// `Config::terminal()`, or a screenshot configuration if `args` holds
    /// `-screenshot` or `--screenshot`.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if args
            .into_iter()
            .any(|a| SCREENSHOT_FLAGS.contains(&a.as_ref()))
        {
            Self::simulated(CAPTURE_WIDTH, CAPTURE_HEIGHT).with_capture(CAPTURE_FILE)
        } else {
            Self::terminal()
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn capture_path(&self) -> Option<&Path> {
        self.capture.as_deref()
    }

    pub fn read_cycle(&self) -> Duration {
        self.read_cycle
    }

    pub fn mouse(&self) -> bool {
        self.mouse
    }
}
