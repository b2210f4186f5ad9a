#![forbid(unsafe_code)]

//! State-tracked ANSI presenter.
//!
//! Turns individual cell writes into terminal output, tracking the current
//! style and cursor position so redundant SGR and CUP sequences are skipped.
//! Used for local terminals and for remote byte streams alike.

use std::io::{self, BufWriter, Write};

use gtui_style::Style;

use crate::ansi;
use crate::cell::Cell;

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

/// Cell-at-a-time ANSI writer.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Current style state (None = unknown).
    current_style: Option<Style>,
    /// Current cursor position (0-indexed). None = unknown.
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            cursor: None,
        }
    }

    /// Write one cell at `(x, y)`.
    ///
    /// Output is buffered until [`Presenter::flush`].
    pub fn put_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        let width = cell.width() as u16;
        if width == 0 {
            return Ok(());
        }
        self.move_cursor_to(x, y)?;
        self.emit_style(cell.style)?;

        let mut buf = [0u8; 4];
        self.writer.write_all(cell.ch.encode_utf8(&mut buf).as_bytes())?;
        self.cursor = Some((x.saturating_add(width), y));
        Ok(())
    }

    fn emit_style(&mut self, style: Style) -> io::Result<()> {
        if self.current_style == Some(style) {
            return Ok(());
        }

        // Reset + apply: simpler than incremental attribute updates.
        ansi::sgr_reset(&mut self.writer)?;
        if !style.fg.is_default() {
            ansi::sgr_fg(&mut self.writer, style.fg)?;
        }
        if !style.bg.is_default() {
            ansi::sgr_bg(&mut self.writer, style.bg)?;
        }
        ansi::sgr_flags(&mut self.writer, style.modifiers)?;

        self.current_style = Some(style);
        Ok(())
    }

    fn move_cursor_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor == Some((x, y)) {
            return Ok(());
        }
        ansi::cup(&mut self.writer, y, x)?;
        self.cursor = Some((x, y));
        Ok(())
    }

    /// Clear the entire screen and home the cursor.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        ansi::sgr_reset(&mut self.writer)?;
        ansi::erase_display(&mut self.writer)?;
        ansi::cup(&mut self.writer, 0, 0)?;
        self.current_style = Some(Style::CLEAR);
        self.cursor = Some((0, 0));
        self.writer.flush()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        ansi::cursor_hide(&mut self.writer)?;
        self.writer.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        ansi::cursor_show(&mut self.writer)?;
        self.writer.flush()
    }

    /// Write raw control bytes. Cursor and style tracking are invalidated.
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.reset();
        self.writer.write_all(bytes)
    }

    /// Forget tracked state.
    ///
    /// Useful after resize or when terminal state is unknown.
    pub fn reset(&mut self) {
        self.current_style = None;
        self.cursor = None;
    }

    /// End the frame: reset the style and flush buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.current_style.is_some_and(|s| !s.is_clear()) {
            ansi::sgr_reset(&mut self.writer)?;
            self.current_style = Some(Style::CLEAR);
        }
        self.writer.flush()
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Get the inner writer (consuming the presenter).
    ///
    /// Flushes any buffered data before returning the writer.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtui_style::{Color, StyleFlags};

    fn output(presenter: Presenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn single_cell() {
        let mut p = Presenter::new(Vec::new());
        p.put_cell(2, 1, &Cell::from_char('x')).unwrap();
        p.flush().unwrap();
        assert_eq!(output(p), "\x1b[2;3H\x1b[0mx");
    }

    #[test]
    fn adjacent_cells_skip_cursor_moves() {
        let mut p = Presenter::new(Vec::new());
        p.put_cell(0, 0, &Cell::from_char('a')).unwrap();
        p.put_cell(1, 0, &Cell::from_char('b')).unwrap();
        p.put_cell(5, 0, &Cell::from_char('c')).unwrap();
        assert_eq!(output(p), "\x1b[1;1H\x1b[0mab\x1b[1;6Hc");
    }

    #[test]
    fn wide_glyph_advances_two() {
        let mut p = Presenter::new(Vec::new());
        p.put_cell(0, 0, &Cell::from_char('中')).unwrap();
        p.put_cell(2, 0, &Cell::from_char('x')).unwrap();
        assert_eq!(output(p), "\x1b[1;1H\x1b[0m中x");
    }

    #[test]
    fn style_tracking_avoids_redundant_sgr() {
        let red = Style::with_fg(Color::RED).add_modifier(StyleFlags::BOLD);
        let mut p = Presenter::new(Vec::new());
        p.put_cell(0, 0, &Cell::new('a', red)).unwrap();
        p.put_cell(1, 0, &Cell::new('b', red)).unwrap();
        p.flush().unwrap();
        assert_eq!(output(p), "\x1b[1;1H\x1b[0m\x1b[31m\x1b[1mab\x1b[0m");
    }

    #[test]
    fn raw_writes_invalidate_tracking() {
        let mut p = Presenter::new(Vec::new());
        p.put_cell(0, 0, &Cell::from_char('a')).unwrap();
        p.write_raw(b"!").unwrap();
        p.put_cell(1, 0, &Cell::from_char('b')).unwrap();
        assert_eq!(output(p), "\x1b[1;1H\x1b[0ma!\x1b[1;2H\x1b[0mb");
    }

    #[test]
    fn clear_screen_homes_cursor() {
        let mut p = Presenter::new(Vec::new());
        p.clear_screen().unwrap();
        p.put_cell(0, 0, &Cell::from_char('z')).unwrap();
        assert_eq!(output(p), "\x1b[0m\x1b[2J\x1b[1;1Hz");
    }
}
