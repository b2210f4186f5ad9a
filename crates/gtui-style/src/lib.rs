#![forbid(unsafe_code)]

//! Style/color model: colors, per-cell styles, gradients and themes.

pub mod color;
pub mod gradient;
pub mod style;
pub mod theme;

pub use color::{Color, ColorParseError, NamedColor, ParseErrorReason, Rgb};
pub use style::{Style, StyleFlags};
pub use theme::{BlockTheme, ParagraphTheme, Theme};
