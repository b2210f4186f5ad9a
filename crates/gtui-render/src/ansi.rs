#![forbid(unsafe_code)]

//! ANSI escape sequence generation helpers.
//!
//! Pure byte generation: no state tracking. The [`Presenter`] decides what
//! to emit; these functions only encode it.
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ n m` | SGR (Select Graphic Rendition) |
//! | CSI | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | CSI | `ESC [ 2 J` | ED (Erase Display) |
//! | CSI | `ESC [ 6 n` | DSR cursor position report request |
//! | DEC | `ESC [ ? 1049 h/l` | Alternate screen |
//!
//! [`Presenter`]: crate::presenter::Presenter

use std::io::{self, Write};

use gtui_style::{Color, StyleFlags};

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// Ordered table of (flag, SGR on code).
pub const FLAG_TABLE: [(StyleFlags, u8); 7] = [
    (StyleFlags::BOLD, 1),
    (StyleFlags::DIM, 2),
    (StyleFlags::ITALIC, 3),
    (StyleFlags::UNDERLINE, 4),
    (StyleFlags::BLINK, 5),
    (StyleFlags::REVERSE, 7),
    (StyleFlags::STRIKETHROUGH, 9),
];

/// Write one SGR sequence enabling every flag in `flags`.
///
/// Does not reset first; the caller owns state management.
pub fn sgr_flags<W: Write>(w: &mut W, flags: StyleFlags) -> io::Result<()> {
    if flags.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut first = true;
    for (flag, code) in FLAG_TABLE {
        if flags.contains(flag) {
            if !first {
                w.write_all(b";")?;
            }
            write!(w, "{code}")?;
            first = false;
        }
    }
    w.write_all(b"m")
}

/// Write SGR sequence for true color foreground: `CSI 38;2;r;g;b m`
pub fn sgr_fg_rgb<W: Write>(w: &mut W, r: u8, g: u8, b: u8) -> io::Result<()> {
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Write SGR sequence for true color background: `CSI 48;2;r;g;b m`
pub fn sgr_bg_rgb<W: Write>(w: &mut W, r: u8, g: u8, b: u8) -> io::Result<()> {
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

/// Write SGR sequence for 16-color foreground.
///
/// Uses codes 30-37 for normal colors, 90-97 for bright colors.
pub fn sgr_fg_16<W: Write>(w: &mut W, index: u8) -> io::Result<()> {
    let code = if index < 8 { 30 + index } else { 90 + index - 8 };
    write!(w, "\x1b[{code}m")
}

/// Write SGR sequence for 16-color background.
///
/// Uses codes 40-47 for normal colors, 100-107 for bright colors.
pub fn sgr_bg_16<W: Write>(w: &mut W, index: u8) -> io::Result<()> {
    let code = if index < 8 { 40 + index } else { 100 + index - 8 };
    write!(w, "\x1b[{code}m")
}

/// Write SGR default foreground: `CSI 39 m`
pub fn sgr_fg_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[39m")
}

/// Write SGR default background: `CSI 49 m`
pub fn sgr_bg_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[49m")
}

/// Foreground for any [`Color`]: named colors use the 16-color codes so the
/// terminal's own palette applies.
pub fn sgr_fg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color {
        Color::Default => sgr_fg_default(w),
        Color::Named(named) => sgr_fg_16(w, named.index()),
        Color::Rgb(rgb) => sgr_fg_rgb(w, rgb.r, rgb.g, rgb.b),
    }
}

/// Background for any [`Color`].
pub fn sgr_bg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color {
        Color::Default => sgr_bg_default(w),
        Color::Named(named) => sgr_bg_16(w, named.index()),
        Color::Rgb(rgb) => sgr_bg_rgb(w, rgb.r, rgb.g, rgb.b),
    }
}

/// CUP (Cursor Position): `CSI row ; col H` (1-indexed)
///
/// Row and col are 0-indexed input, converted to 1-indexed for ANSI.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// Erase the whole display: `CSI 2 J`
pub const ERASE_DISPLAY: &[u8] = b"\x1b[2J";

pub fn erase_display<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ERASE_DISPLAY)
}

/// Hide cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// Show cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_HIDE)
}

pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SHOW)
}

/// Move to the far corner then ask for the cursor position. The reply
/// (`CSI row ; col R`) gives the terminal size.
pub const SIZE_QUERY: &[u8] = b"\x1b[999;999H\x1b[6n";

pub fn size_query<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SIZE_QUERY)
}

/// Alternate screen enter: `CSI ? 1049 h`
pub const ALT_SCREEN_ENTER: &[u8] = b"\x1b[?1049h";

/// Alternate screen leave: `CSI ? 1049 l`
pub const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";

/// Mouse reporting on: button events, drag motion, SGR encoding.
pub const MOUSE_ENABLE: &[u8] = b"\x1b[?1000;1002;1006h";

/// Mouse reporting off.
pub const MOUSE_DISABLE: &[u8] = b"\x1b[?1000;1002;1006l";

pub fn alt_screen_enter<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_ENTER)
}

pub fn alt_screen_leave<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_LEAVE)
}

pub fn mouse_enable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(MOUSE_ENABLE)
}

pub fn mouse_disable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(MOUSE_DISABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtui_style::NamedColor;

    fn bytes(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Vec<u8> {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        out
    }

    #[test]
    fn flags_are_joined() {
        assert_eq!(bytes(|w| sgr_flags(w, StyleFlags::BOLD)), b"\x1b[1m");
        assert_eq!(
            bytes(|w| sgr_flags(w, StyleFlags::BOLD | StyleFlags::REVERSE)),
            b"\x1b[1;7m"
        );
        assert!(bytes(|w| sgr_flags(w, StyleFlags::empty())).is_empty());
    }

    #[test]
    fn named_colors_use_16_color_codes() {
        assert_eq!(bytes(|w| sgr_fg(w, Color::RED)), b"\x1b[31m");
        assert_eq!(
            bytes(|w| sgr_fg(w, Color::Named(NamedColor::BrightRed))),
            b"\x1b[91m"
        );
        assert_eq!(bytes(|w| sgr_bg(w, Color::BLUE)), b"\x1b[44m");
        assert_eq!(
            bytes(|w| sgr_bg(w, Color::Named(NamedColor::BrightWhite))),
            b"\x1b[107m"
        );
    }

    #[test]
    fn rgb_and_default() {
        assert_eq!(
            bytes(|w| sgr_fg(w, Color::rgb(1, 2, 3))),
            b"\x1b[38;2;1;2;3m"
        );
        assert_eq!(bytes(|w| sgr_bg(w, Color::Default)), b"\x1b[49m");
    }

    #[test]
    fn cup_is_one_indexed() {
        assert_eq!(bytes(|w| cup(w, 0, 0)), b"\x1b[1;1H");
        assert_eq!(bytes(|w| cup(w, 4, 9)), b"\x1b[5;10H");
    }
}
