#![forbid(unsafe_code)]

//! Drawing primitives for the buffer.
//!
//! Helpers on top of [`Buffer::set`] so widgets can draw borders, lines and
//! text without duplicating cell loops. Everything clips through `set`, so
//! coordinates that graze the buffer edge are harmless.

use bitflags::bitflags;
use gtui_core::geometry::Rect;
use gtui_style::Style;

use crate::border;
use crate::buffer::Buffer;
use crate::cell::Cell;

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Light box-drawing characters. These are the glyphs the merge resolver
    /// knows about.
    pub const SQUARE: Self = Self {
        top_left: border::TOP_LEFT,
        top_right: border::TOP_RIGHT,
        bottom_left: border::BOTTOM_LEFT,
        bottom_right: border::BOTTOM_RIGHT,
        horizontal: border::HORIZONTAL,
        vertical: border::VERTICAL,
    };

    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: border::ROUNDED_TOP_LEFT,
        top_right: border::ROUNDED_TOP_RIGHT,
        bottom_left: border::ROUNDED_BOTTOM_LEFT,
        bottom_right: border::ROUNDED_BOTTOM_RIGHT,
        horizontal: border::HORIZONTAL,
        vertical: border::VERTICAL,
    };
}

impl Default for BorderChars {
    fn default() -> Self {
        Self::SQUARE
    }
}

bitflags! {
    /// Which sides of a rectangle carry a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Borders: u8 {
        const TOP = 1;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
    }
}

impl Default for Borders {
    fn default() -> Self {
        Self::all()
    }
}

/// Extension trait for drawing on a [`Buffer`].
pub trait Draw {
    /// Draw a horizontal line of cells.
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell);

    /// Draw a vertical line of cells.
    fn draw_vertical_line(&mut self, x: u16, y: u16, height: u16, cell: Cell);

    /// Print text with a right-side clipping boundary (`max_x` exclusive).
    /// Returns the x position after the last character written.
    fn print_text_clipped(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16)
    -> u16;

    /// Write a glyph, merging it with the glyph already at the cell when
    /// `collapse` is set.
    fn put_border_glyph(&mut self, x: u16, y: u16, glyph: char, style: Style, collapse: bool);

    /// Draw the selected sides of a border inside `rect`.
    ///
    /// Lines are drawn first, then a corner wherever both adjoining sides are
    /// on. With `collapse`, each glyph is merged into what is already drawn.
    fn draw_border(
        &mut self,
        rect: Rect,
        sides: Borders,
        chars: BorderChars,
        style: Style,
        collapse: bool,
    ) {
        self.draw_border_with(rect, sides, chars, collapse, |_, _| style);
    }

    /// Like [`Draw::draw_border`] with a per-cell style, used for gradient
    /// borders.
    fn draw_border_with<F>(
        &mut self,
        rect: Rect,
        sides: Borders,
        chars: BorderChars,
        collapse: bool,
        style_at: F,
    ) where
        F: Fn(u16, u16) -> Style;
}

impl Draw for Buffer {
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell) {
        for i in 0..width {
            self.set(x.saturating_add(i), y, cell);
        }
    }

    fn draw_vertical_line(&mut self, x: u16, y: u16, height: u16, cell: Cell) {
        for i in 0..height {
            self.set(x, y.saturating_add(i), cell);
        }
    }

    fn print_text_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        style: Style,
        max_x: u16,
    ) -> u16 {
        let mut cx = x;
        for ch in text.chars() {
            let cell = Cell::new(ch, style);
            let width = cell.width() as u16;
            if width == 0 {
                continue;
            }
            if cx.saturating_add(width) > max_x {
                break;
            }
            self.set(cx, y, cell);
            cx += width;
        }
        cx
    }

    fn put_border_glyph(&mut self, x: u16, y: u16, glyph: char, style: Style, collapse: bool) {
        let glyph = if collapse {
            border::resolve(self.get(x, y).ch, glyph)
        } else {
            glyph
        };
        self.set(x, y, Cell::new(glyph, style));
    }

    fn draw_border_with<F>(
        &mut self,
        rect: Rect,
        sides: Borders,
        chars: BorderChars,
        collapse: bool,
        style_at: F,
    ) where
        F: Fn(u16, u16) -> Style,
    {
        if rect.is_empty() {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        let x_start = if sides.contains(Borders::LEFT) { left.saturating_add(1) } else { left };
        let x_end = if sides.contains(Borders::RIGHT) { right } else { rect.right() };
        let y_start = if sides.contains(Borders::TOP) { top.saturating_add(1) } else { top };
        let y_end = if sides.contains(Borders::BOTTOM) { bottom } else { rect.bottom() };

        let mut put = |x: u16, y: u16, glyph: char| {
            self.put_border_glyph(x, y, glyph, style_at(x, y), collapse);
        };

        if sides.contains(Borders::TOP) {
            for x in x_start..x_end {
                put(x, top, chars.horizontal);
            }
        }
        if sides.contains(Borders::BOTTOM) {
            for x in x_start..x_end {
                put(x, bottom, chars.horizontal);
            }
        }
        if sides.contains(Borders::LEFT) {
            for y in y_start..y_end {
                put(left, y, chars.vertical);
            }
        }
        if sides.contains(Borders::RIGHT) {
            for y in y_start..y_end {
                put(right, y, chars.vertical);
            }
        }

        if sides.contains(Borders::TOP | Borders::LEFT) {
            put(left, top, chars.top_left);
        }
        if sides.contains(Borders::TOP | Borders::RIGHT) {
            put(right, top, chars.top_right);
        }
        if sides.contains(Borders::BOTTOM | Borders::LEFT) {
            put(left, bottom, chars.bottom_left);
        }
        if sides.contains(Borders::BOTTOM | Borders::RIGHT) {
            put(right, bottom, chars.bottom_right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtui_style::Color;

    fn rows(buf: &Buffer) -> Vec<String> {
        (buf.area().y..buf.area().bottom())
            .map(|y| buf.row_text(y))
            .collect()
    }

    #[test]
    fn full_square_border() {
        let mut buf = Buffer::with_size(4, 3);
        buf.draw_border(buf.area(), Borders::all(), BorderChars::SQUARE, Style::CLEAR, false);
        assert_eq!(rows(&buf), vec!["┌──┐", "│  │", "└──┘"]);
    }

    #[test]
    fn rounded_border() {
        let mut buf = Buffer::with_size(3, 3);
        buf.draw_border(buf.area(), Borders::all(), BorderChars::ROUNDED, Style::CLEAR, false);
        assert_eq!(rows(&buf), vec!["╭─╮", "│ │", "╰─╯"]);
    }

    #[test]
    fn partial_sides_skip_corners() {
        let mut buf = Buffer::with_size(4, 3);
        buf.draw_border(
            buf.area(),
            Borders::TOP | Borders::LEFT,
            BorderChars::SQUARE,
            Style::CLEAR,
            false,
        );
        assert_eq!(rows(&buf), vec!["┌───", "│   ", "│   "]);
    }

    #[test]
    fn adjoining_borders_collapse_into_junctions() {
        let mut buf = Buffer::with_size(5, 3);
        let style = Style::CLEAR;
        buf.draw_border(Rect::new(0, 0, 3, 3), Borders::all(), BorderChars::SQUARE, style, true);
        buf.draw_border(Rect::new(2, 0, 3, 3), Borders::all(), BorderChars::SQUARE, style, true);
        assert_eq!(rows(&buf), vec!["┌─┬─┐", "│ │ │", "└─┴─┘"]);
    }

    #[test]
    fn without_collapse_later_border_overwrites() {
        let mut buf = Buffer::with_size(5, 3);
        let style = Style::CLEAR;
        buf.draw_border(Rect::new(0, 0, 3, 3), Borders::all(), BorderChars::SQUARE, style, false);
        buf.draw_border(Rect::new(2, 0, 3, 3), Borders::all(), BorderChars::SQUARE, style, false);
        assert_eq!(rows(&buf), vec!["┌─┌─┐", "│ │ │", "└─└─┘"]);
    }

    #[test]
    fn per_cell_style() {
        let mut buf = Buffer::with_size(3, 2);
        buf.draw_border_with(buf.area(), Borders::all(), BorderChars::SQUARE, false, |x, _| {
            if x == 0 {
                Style::with_fg(Color::RED)
            } else {
                Style::with_fg(Color::BLUE)
            }
        });
        assert_eq!(buf.get(0, 0).style.fg, Color::RED);
        assert_eq!(buf.get(2, 1).style.fg, Color::BLUE);
    }

    #[test]
    fn border_on_empty_rect_is_noop() {
        let mut buf = Buffer::with_size(3, 3);
        buf.draw_border(Rect::new(1, 1, 0, 2), Borders::all(), BorderChars::SQUARE, Style::CLEAR, false);
        assert!(buf.cells().iter().all(Cell::is_clear));
    }

    #[test]
    fn border_at_the_coordinate_limit_does_not_overflow() {
        let max = u16::MAX;
        let mut buf = Buffer::new(Rect::new(max - 2, max - 2, 3, 3));
        buf.draw_border(Rect::new(max, max, 1, 1), Borders::all(), BorderChars::SQUARE, Style::CLEAR, false);
        buf.draw_border(Rect::new(max - 2, max - 2, 5, 5), Borders::all(), BorderChars::SQUARE, Style::CLEAR, true);
        assert_eq!(buf.get(max - 2, max - 2).ch, '┌');
    }

    #[test]
    fn print_text_clipped_stops_before_wide_overflow() {
        let mut buf = Buffer::with_size(6, 1);
        let end = buf.print_text_clipped(0, 0, "ab中", Style::CLEAR, 3);
        assert_eq!(end, 2);
        assert_eq!(buf.row_text(0), "ab    ");
    }

    #[test]
    fn lines() {
        let mut buf = Buffer::with_size(3, 3);
        buf.draw_horizontal_line(0, 1, 5, Cell::from_char('-'));
        buf.draw_vertical_line(1, 0, 3, Cell::from_char('|'));
        assert_eq!(rows(&buf), vec![" | ", "-|-", " | "]);
    }
}
