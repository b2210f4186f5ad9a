#![forbid(unsafe_code)]

//! A single glyph position.

use gtui_style::Style;
use unicode_width::UnicodeWidthChar;

/// One character position: a glyph and the style it is drawn with.
///
/// Cells are `Copy`; writing a cell into a buffer never shares state with
/// the caller's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Displayable glyph. Zero-width combining marks are not supported.
    pub ch: char,
    pub style: Style,
}

impl Cell {
    /// A space with the clear style.
    pub const CLEAR: Cell = Cell {
        ch: ' ',
        style: Style::CLEAR,
    };

    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// Cell with the given glyph and the clear style.
    #[inline]
    pub const fn from_char(ch: char) -> Self {
        Self::new(ch, Style::CLEAR)
    }

    #[inline]
    pub fn is_clear(&self) -> bool {
        *self == Self::CLEAR
    }

    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Display width in columns: 2 for wide glyphs (CJK, emoji), 0 for
    /// control and combining characters, 1 otherwise.
    #[inline]
    pub fn width(&self) -> usize {
        self.ch.width().unwrap_or(0)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::CLEAR
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}
