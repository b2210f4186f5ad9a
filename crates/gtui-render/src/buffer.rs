#![forbid(unsafe_code)]

//! Frame buffer.
//!
//! A [`Buffer`] is the compositing grid for one frame. It covers a rectangle
//! in absolute screen coordinates; drawables write to it with the same
//! coordinates they were laid out at.
//!
//! # Layout
//!
//! Cells are stored in row-major order relative to the buffer's origin:
//! `index = (y - area.y) * area.width + (x - area.x)`.
//!
//! # Invariants
//!
//! 1. `cells.len() == area.width * area.height`
//! 2. The area never changes after creation
//! 3. Reads outside the area return [`Cell::CLEAR`]; writes outside it are
//!    ignored

use gtui_core::geometry::Rect;
use gtui_style::Style;

use crate::cell::Cell;

/// A grid of cells addressed in absolute coordinates.
///
/// # Example
///
/// ```
/// use gtui_core::geometry::Rect;
/// use gtui_render::buffer::Buffer;
/// use gtui_render::cell::Cell;
///
/// let mut buffer = Buffer::new(Rect::new(10, 5, 20, 4));
/// buffer.set(10, 5, Cell::from_char('H'));
/// assert_eq!(buffer.get(10, 5).ch, 'H');
/// assert!(buffer.get(0, 0).is_clear());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    area: Rect,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer covering `area`, every cell clear.
    ///
    /// A zero-sized area is allowed and produces a buffer that ignores all
    /// writes.
    pub fn new(area: Rect) -> Self {
        let len = area.width as usize * area.height as usize;
        Self {
            area,
            cells: vec![Cell::CLEAR; len],
        }
    }

    /// Buffer anchored at the origin.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self::new(Rect::from_size(width, height))
    }

    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.area.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.area.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if self.area.contains(x, y) {
            let col = (x - self.area.x) as usize;
            let row = (y - self.area.y) as usize;
            Some(row * self.area.width as usize + col)
        } else {
            None
        }
    }

    /// Cell at `(x, y)`, or the clear cell outside the area.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Cell {
        self.cell(x, y).copied().unwrap_or(Cell::CLEAR)
    }

    /// Reference to the cell at `(x, y)`, or `None` outside the area.
    #[inline]
    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).and_then(|i| self.cells.get(i))
    }

    /// Mutable reference to the cell at `(x, y)`.
    #[inline]
    pub fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).and_then(|i| self.cells.get_mut(i))
    }

    /// Write one cell. Outside the area this is a no-op.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.cell_mut(x, y) {
            *slot = cell;
        }
    }

    /// Fill the part of `rect` that lies inside the buffer.
    ///
    /// Each clipped row is assigned as one contiguous slice.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let Some(clipped) = self.area.intersection_opt(&rect) else {
            return;
        };
        let stride = self.area.width as usize;
        let col = (clipped.x - self.area.x) as usize;
        let len = clipped.width as usize;
        for y in clipped.y..clipped.bottom() {
            let start = (y - self.area.y) as usize * stride + col;
            self.cells[start..start + len].fill(cell);
        }
    }

    /// Write `text` starting at `(x, y)`, advancing by each glyph's display
    /// width. Zero-width characters are skipped.
    ///
    /// Glyphs that start outside the area are dropped. Returns the column
    /// after the last glyph written or skipped.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in text.chars() {
            let cell = Cell::new(ch, style);
            let width = cell.width() as u16;
            if width == 0 {
                continue;
            }
            self.set(cx, y, cell);
            cx = cx.saturating_add(width);
        }
        cx
    }

    /// Write pre-styled cells starting at `(x, y)`, advancing by display
    /// width. Returns the column after the last cell.
    pub fn set_cells(&mut self, x: u16, y: u16, cells: &[Cell]) -> u16 {
        let mut cx = x;
        for cell in cells {
            let width = cell.width() as u16;
            if width == 0 {
                continue;
            }
            self.set(cx, y, *cell);
            cx = cx.saturating_add(width);
        }
        cx
    }

    /// Reset every cell to clear.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::CLEAR);
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of absolute row `y`, or an empty slice outside the area.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y < self.area.y || y >= self.area.bottom() {
            return &[];
        }
        let stride = self.area.width as usize;
        let start = (y - self.area.y) as usize * stride;
        &self.cells[start..start + stride]
    }

    /// Iterate `(x, y, cell)` in absolute coordinates, row-major.
    ///
    /// Cells of an area reaching past `u16::MAX` have no coordinate and are
    /// skipped.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> + '_ {
        let area = self.area;
        let stride = area.width.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let dx = u16::try_from(i % stride).ok()?;
            let dy = u16::try_from(i / stride).ok()?;
            Some((area.x.checked_add(dx)?, area.y.checked_add(dy)?, cell))
        })
    }

    /// Glyphs of absolute row `y` as a string. Handy in tests.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtui_style::Color;

    #[test]
    fn new_is_clear() {
        let buf = Buffer::new(Rect::new(3, 4, 5, 2));
        assert_eq!(buf.cells().len(), 10);
        assert!(buf.cells().iter().all(Cell::is_clear));
    }

    #[test]
    fn zero_sized_buffer_ignores_writes() {
        let mut buf = Buffer::new(Rect::new(2, 2, 0, 5));
        assert!(buf.is_empty());
        buf.set(2, 2, Cell::from_char('x'));
        buf.fill(Rect::new(0, 0, 10, 10), Cell::from_char('y'));
        assert!(buf.get(2, 2).is_clear());
        assert_eq!(buf.iter().count(), 0);
    }

    #[test]
    fn absolute_addressing() {
        let mut buf = Buffer::new(Rect::new(10, 20, 4, 3));
        buf.set(10, 20, Cell::from_char('a'));
        buf.set(13, 22, Cell::from_char('z'));
        assert_eq!(buf.cells()[0].ch, 'a');
        assert_eq!(buf.cells()[11].ch, 'z');
        assert_eq!(buf.get(13, 22).ch, 'z');
    }

    #[test]
    fn out_of_bounds_reads_clear_and_writes_nothing() {
        let mut buf = Buffer::new(Rect::new(10, 10, 2, 2));
        let before = buf.clone();
        buf.set(9, 10, Cell::from_char('x'));
        buf.set(12, 10, Cell::from_char('x'));
        buf.set(10, 12, Cell::from_char('x'));
        buf.set(u16::MAX, u16::MAX, Cell::from_char('x'));
        assert_eq!(buf, before);
        assert!(buf.get(0, 0).is_clear());
        assert!(buf.get(u16::MAX, 0).is_clear());
    }

    #[test]
    fn fill_is_clipped_to_intersection() {
        let mut buf = Buffer::with_size(4, 4);
        let dot = Cell::from_char('.');
        buf.fill(Rect::new(2, 2, 10, 10), dot);
        assert_eq!(buf.row_text(0), "    ");
        assert_eq!(buf.row_text(1), "    ");
        assert_eq!(buf.row_text(2), "  ..");
        assert_eq!(buf.row_text(3), "  ..");
    }

    #[test]
    fn fill_disjoint_is_noop() {
        let mut buf = Buffer::with_size(4, 4);
        buf.fill(Rect::new(10, 10, 3, 3), Cell::from_char('#'));
        assert!(buf.cells().iter().all(Cell::is_clear));
    }

    #[test]
    fn set_string_advances_by_display_width() {
        let mut buf = Buffer::with_size(10, 1);
        let style = Style::with_fg(Color::GREEN);
        let end = buf.set_string(0, 0, "a中b", style);
        assert_eq!(end, 4);
        assert_eq!(buf.get(0, 0).ch, 'a');
        assert_eq!(buf.get(1, 0).ch, '中');
        assert!(buf.get(2, 0).is_clear());
        assert_eq!(buf.get(3, 0).ch, 'b');
        assert_eq!(buf.get(3, 0).style, style);
    }

    #[test]
    fn set_string_clips_at_edge() {
        let mut buf = Buffer::with_size(3, 1);
        let end = buf.set_string(1, 0, "hello", Style::CLEAR);
        assert_eq!(buf.row_text(0), " he");
        assert_eq!(end, 6);
    }

    #[test]
    fn set_string_skips_zero_width() {
        let mut buf = Buffer::with_size(4, 1);
        let end = buf.set_string(0, 0, "e\u{0301}x", Style::CLEAR);
        assert_eq!(end, 2);
        assert_eq!(buf.row_text(0), "ex  ");
    }

    #[test]
    fn row_outside_is_empty() {
        let buf = Buffer::new(Rect::new(0, 5, 3, 1));
        assert!(buf.row(4).is_empty());
        assert_eq!(buf.row(5).len(), 3);
        assert!(buf.row(6).is_empty());
    }

    #[test]
    fn iter_yields_absolute_coordinates() {
        let buf = Buffer::new(Rect::new(5, 7, 2, 2));
        let coords: Vec<(u16, u16)> = buf.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(5, 7), (6, 7), (5, 8), (6, 8)]);
    }

    #[test]
    fn iter_skips_cells_past_the_coordinate_limit() {
        let buf = Buffer::new(Rect::new(65530, 0, 10, 1));
        let xs: Vec<u16> = buf.iter().map(|(x, _, _)| x).collect();
        assert_eq!(xs, (65530..=u16::MAX).collect::<Vec<_>>());

        let tall = Buffer::new(Rect::new(0, u16::MAX, 2, 3));
        assert_eq!(tall.iter().count(), 2);
    }

    #[test]
    fn clear_resets() {
        let mut buf = Buffer::with_size(2, 2);
        buf.fill(buf.area(), Cell::from_char('x'));
        buf.clear();
        assert!(buf.cells().iter().all(Cell::is_clear));
    }
}
