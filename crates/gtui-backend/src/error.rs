#![forbid(unsafe_code)]

use std::fmt;
use std::io;

/// Errors surfaced by [`Backend`](crate::Backend) operations.
#[derive(Debug)]
pub enum BackendError {
    /// `init` was called on a backend that is already active.
    AlreadyActive,
    /// The operation needs an active backend.
    NotActive,
    /// An event poll is already running on this backend.
    EventsInUse,
    /// Attaching to the screen source or writing to it failed.
    Io(io::Error),
    /// Encoding or writing a capture image failed.
    Capture(image::ImageError),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActive => write!(f, "backend is already initialized"),
            Self::NotActive => write!(f, "backend is not initialized"),
            Self::EventsInUse => write!(f, "an event poll is already running"),
            Self::Io(e) => write!(f, "backend I/O error: {e}"),
            Self::Capture(e) => write!(f, "capture failed: {e}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Capture(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BackendError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for BackendError {
    fn from(e: image::ImageError) -> Self {
        Self::Capture(e)
    }
}
