//! Per-cell style: foreground, background and attribute flags.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Text attributes for a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const BLINK         = 0b0001_0000;
        const REVERSE       = 0b0010_0000;
        const STRIKETHROUGH = 0b0100_0000;
    }
}

impl StyleFlags {
    /// Look up a modifier by its markup name (`bold`, `underline`,
    /// `reverse`, `dim`, `blink`, `italic`, `strike`).
    #[must_use]
    pub fn from_markup_name(name: &str) -> Option<Self> {
        match name.trim() {
            "bold" => Some(Self::BOLD),
            "underline" => Some(Self::UNDERLINE),
            "reverse" => Some(Self::REVERSE),
            "dim" => Some(Self::DIM),
            "blink" => Some(Self::BLINK),
            "italic" => Some(Self::ITALIC),
            "strike" | "strikethrough" => Some(Self::STRIKETHROUGH),
            _ => None,
        }
    }
}

/// Style of one glyph cell.
///
/// Equality compares all three fields. [`Style::CLEAR`] (also the
/// `Default`) inherits the terminal colors and has no attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub modifiers: StyleFlags,
}

impl Style {
    pub const CLEAR: Style = Style {
        fg: Color::Default,
        bg: Color::Default,
        modifiers: StyleFlags::empty(),
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::CLEAR
    }

    /// Style with only a foreground color.
    #[must_use]
    pub const fn with_fg(fg: Color) -> Self {
        Self {
            fg,
            ..Self::CLEAR
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    #[must_use]
    pub const fn modifiers(mut self, modifiers: StyleFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn add_modifier(mut self, modifier: StyleFlags) -> Self {
        self.modifiers |= modifier;
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.add_modifier(StyleFlags::BOLD)
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        *self == Self::CLEAR
    }
}
