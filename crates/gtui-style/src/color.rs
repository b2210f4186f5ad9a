//! Color types, the named palette, and hex/name parsing.

use std::fmt;
use std::str::FromStr;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    ///
    /// Anything other than exactly six hex digits after the optional `#` is
    /// an error; there is no short form and no best-effort guess.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 {
            return Err(ColorParseError::new(input, ParseErrorReason::InvalidLength));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::new(input, ParseErrorReason::InvalidDigit));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::new(input, ParseErrorReason::InvalidDigit))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The 16 standard terminal palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

const PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // Black
    Rgb::new(205, 0, 0),     // Red
    Rgb::new(0, 205, 0),     // Green
    Rgb::new(205, 205, 0),   // Yellow
    Rgb::new(0, 0, 238),     // Blue
    Rgb::new(205, 0, 205),   // Magenta
    Rgb::new(0, 205, 205),   // Cyan
    Rgb::new(229, 229, 229), // White
    Rgb::new(127, 127, 127), // Bright Black
    Rgb::new(255, 0, 0),     // Bright Red
    Rgb::new(0, 255, 0),     // Bright Green
    Rgb::new(255, 255, 0),   // Bright Yellow
    Rgb::new(92, 92, 255),   // Bright Blue
    Rgb::new(255, 0, 255),   // Bright Magenta
    Rgb::new(0, 255, 255),   // Bright Cyan
    Rgb::new(255, 255, 255), // Bright White
];

impl NamedColor {
    /// Palette index (0–15).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Canonical RGB rendition of this palette entry.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        PALETTE[self as usize]
    }
}

/// A cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Inherit the terminal's default.
    #[default]
    Default,
    /// One of the 16 palette entries.
    Named(NamedColor),
    /// 24-bit color.
    Rgb(Rgb),
}

impl Color {
    pub const BLACK: Color = Color::Named(NamedColor::Black);
    pub const RED: Color = Color::Named(NamedColor::Red);
    pub const GREEN: Color = Color::Named(NamedColor::Green);
    pub const YELLOW: Color = Color::Named(NamedColor::Yellow);
    pub const BLUE: Color = Color::Named(NamedColor::Blue);
    pub const MAGENTA: Color = Color::Named(NamedColor::Magenta);
    pub const CYAN: Color = Color::Named(NamedColor::Cyan);
    pub const WHITE: Color = Color::Named(NamedColor::White);

    /// Create an RGB color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Parse `#RRGGBB` or `RRGGBB` into an RGB color.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        Rgb::from_hex(input).map(Self::Rgb)
    }

    /// Look up a color by name (case-insensitive).
    ///
    /// Covers the basic terminal names and a set of common web colors.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        COLOR_NAMES
            .iter()
            .find(|(n, _)| *n == lower)
            .map(|(_, c)| *c)
    }

    /// Resolve a name the terminal driver knows (`dark_red`, `grey`,
    /// `reset`, ...). Used after [`Color::from_name`] misses.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn from_driver_name(name: &str) -> Option<Self> {
        crossterm::style::Color::try_from(name.trim())
            .ok()
            .map(Self::from)
    }

    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn from_driver_name(_name: &str) -> Option<Self> {
        None
    }

    /// RGB rendition, or `None` for [`Color::Default`].
    #[must_use]
    pub const fn to_rgb(self) -> Option<Rgb> {
        match self {
            Self::Default => None,
            Self::Named(n) => Some(n.to_rgb()),
            Self::Rgb(rgb) => Some(rgb),
        }
    }

    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        Self::Named(named)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<crossterm::style::Color> for Color {
    /// crossterm's bright variants carry the plain names; its `Dark*`
    /// variants are the normal-intensity palette entries.
    fn from(color: crossterm::style::Color) -> Self {
        use crossterm::style::Color as Ct;
        let named = match color {
            Ct::Reset => return Self::Default,
            Ct::Rgb { r, g, b } => return Self::rgb(r, g, b),
            Ct::AnsiValue(index) => return Self::Rgb(ansi256_to_rgb(index)),
            Ct::Black => NamedColor::Black,
            Ct::DarkRed => NamedColor::Red,
            Ct::DarkGreen => NamedColor::Green,
            Ct::DarkYellow => NamedColor::Yellow,
            Ct::DarkBlue => NamedColor::Blue,
            Ct::DarkMagenta => NamedColor::Magenta,
            Ct::DarkCyan => NamedColor::Cyan,
            Ct::Grey => NamedColor::White,
            Ct::DarkGrey => NamedColor::BrightBlack,
            Ct::Red => NamedColor::BrightRed,
            Ct::Green => NamedColor::BrightGreen,
            Ct::Yellow => NamedColor::BrightYellow,
            Ct::Blue => NamedColor::BrightBlue,
            Ct::Magenta => NamedColor::BrightMagenta,
            Ct::Cyan => NamedColor::BrightCyan,
            Ct::White => NamedColor::BrightWhite,
        };
        Self::Named(named)
    }
}

/// Convert an ANSI 256-color index to RGB.
#[must_use]
pub fn ansi256_to_rgb(index: u8) -> Rgb {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    if index < 16 {
        return PALETTE[index as usize];
    }
    if index >= 232 {
        let gray = 8 + 10 * (index - 232);
        return Rgb::new(gray, gray, gray);
    }
    let idx = index - 16;
    Rgb::new(
        LEVELS[(idx / 36) as usize],
        LEVELS[((idx / 6) % 6) as usize],
        LEVELS[(idx % 6) as usize],
    )
}

/// Built-in names first, then the driver's names, then hex.
impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(color) = Self::from_name(s).or_else(|| Self::from_driver_name(s)) {
            return Ok(color);
        }
        let looks_hex = s.starts_with('#') || s.bytes().all(|b| b.is_ascii_hexdigit());
        if looks_hex {
            Self::from_hex(s)
        } else {
            Err(ColorParseError::new(s, ParseErrorReason::UnknownName))
        }
    }
}

const COLOR_NAMES: &[(&str, Color)] = &[
    ("clear", Color::Default),
    ("default", Color::Default),
    ("black", Color::Named(NamedColor::Black)),
    ("red", Color::Named(NamedColor::Red)),
    ("green", Color::Named(NamedColor::Green)),
    ("yellow", Color::Named(NamedColor::Yellow)),
    ("blue", Color::Named(NamedColor::Blue)),
    ("magenta", Color::Named(NamedColor::Magenta)),
    ("cyan", Color::Named(NamedColor::BrightCyan)),
    ("white", Color::Named(NamedColor::White)),
    ("grey", Color::Named(NamedColor::BrightBlack)),
    ("gray", Color::Named(NamedColor::BrightBlack)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("silver", Color::rgb(192, 192, 192)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("pink", Color::rgb(255, 192, 203)),
    ("coral", Color::rgb(255, 127, 80)),
    ("crimson", Color::rgb(220, 20, 60)),
    ("gold", Color::rgb(255, 215, 0)),
    ("teal", Color::rgb(0, 128, 128)),
    ("turquoise", Color::rgb(64, 224, 208)),
    ("indigo", Color::rgb(75, 0, 130)),
    ("violet", Color::rgb(238, 130, 238)),
    ("olive", Color::rgb(128, 128, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("aliceblue", Color::rgb(240, 248, 255)),
    ("beige", Color::rgb(245, 245, 220)),
    ("brown", Color::rgb(165, 42, 42)),
    ("darkblue", Color::rgb(0, 0, 139)),
    ("darkcyan", Color::rgb(0, 139, 139)),
    ("darkgreen", Color::rgb(0, 100, 0)),
    ("darkred", Color::rgb(139, 0, 0)),
    ("hotpink", Color::rgb(255, 105, 180)),
    ("lightblue", Color::rgb(173, 216, 230)),
    ("lightgreen", Color::rgb(144, 238, 144)),
    ("lime", Color::rgb(0, 255, 0)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("mintcream", Color::rgb(245, 255, 250)),
    ("mistyrose", Color::rgb(255, 228, 225)),
    ("orchid", Color::rgb(218, 112, 214)),
    ("plum", Color::rgb(221, 160, 221)),
    ("salmon", Color::rgb(250, 128, 114)),
    ("seagreen", Color::rgb(46, 139, 87)),
    ("skyblue", Color::rgb(135, 206, 235)),
    ("slateblue", Color::rgb(106, 90, 205)),
    ("tan", Color::rgb(210, 180, 140)),
    ("tomato", Color::rgb(255, 99, 71)),
    ("wheat", Color::rgb(245, 222, 179)),
];

/// Why a color string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorReason {
    /// Not exactly six hex digits.
    InvalidLength,
    /// A non-hex character among the digits.
    InvalidDigit,
    /// Neither a known name nor hex.
    UnknownName,
}

/// Error returned by color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    input: String,
    reason: ParseErrorReason,
}

impl ColorParseError {
    fn new(input: &str, reason: ParseErrorReason) -> Self {
        Self {
            input: input.to_owned(),
            reason,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reason(&self) -> ParseErrorReason {
        self.reason
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            ParseErrorReason::InvalidLength => {
                write!(f, "invalid hex color '{}': expected 6 digits", self.input)
            }
            ParseErrorReason::InvalidDigit => {
                write!(f, "invalid hex color '{}': non-hex digit", self.input)
            }
            ParseErrorReason::UnknownName => write!(f, "unknown color name '{}'", self.input),
        }
    }
}

impl std::error::Error for ColorParseError {}
