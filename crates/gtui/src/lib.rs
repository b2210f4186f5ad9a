#![forbid(unsafe_code)]

//! gotui public facade crate.
//!
//! Re-exports the common types from the internal crates, adds a small
//! [`App`] loop on top of [`Backend`], and offers a prelude for day-to-day
//! use.

use std::fmt;

pub mod app;

// --- Core re-exports -------------------------------------------------------

pub use gtui_core::event::{Event, EventKind, MousePayload, Payload};
pub use gtui_core::geometry::Rect;

// --- Render re-exports -----------------------------------------------------

pub use gtui_render::{BorderChars, Borders, Buffer, Cell, Drawable, SharedDrawable};
pub use gtui_render::drawable::{lock, shared};

// --- Style re-exports ------------------------------------------------------

pub use gtui_style::{Color, Rgb, Style, StyleFlags, Theme};

// --- Text, layout, widgets -------------------------------------------------

pub use gtui_layout::{Grid, GridItem};
pub use gtui_text::{apply_gradient_to_text, parse_styles};
pub use gtui_widgets::{
    Alignment, Block, BorderGradient, GradientDirection, Paragraph, VerticalAlignment,
};

// --- Backend re-exports ----------------------------------------------------

pub use gtui_backend::{Backend, BackendError, Config, EventStream, Recv, SimulatedInput, State};

pub use app::{App, Control};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for gotui apps.
#[derive(Debug)]
pub enum Error {
    /// Backend lifecycle, capture, or screen failure.
    Backend(BackendError),
    /// I/O failure outside the backend.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for gotui APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        App, Backend, Block, Buffer, Cell, Color, Config, Control, Drawable, Error, Event, Grid,
        GridItem, Paragraph, Rect, Result, SharedDrawable, Style, Theme,
    };

    pub use crate::{backend, core, layout, render, style, text, widgets};
}

pub use gtui_backend as backend;
pub use gtui_core as core;
pub use gtui_layout as layout;
pub use gtui_render as render;
pub use gtui_style as style;
pub use gtui_text as text;
pub use gtui_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn backend_errors_convert_and_chain() {
        let err: Error = BackendError::NotActive.into();
        assert!(matches!(err, Error::Backend(BackendError::NotActive)));
        assert_eq!(err.to_string(), BackendError::NotActive.to_string());
        assert!(err.source().is_some());
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::other("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
