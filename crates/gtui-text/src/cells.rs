//! Helpers over styled cell sequences.
//!
//! Widths are display widths: wide glyphs count 2.

use gtui_render::Cell;
use gtui_style::Style;

/// Marker appended by [`trim_cells`].
pub const ELLIPSIS: char = '…';

fn width_of(cells: &[Cell]) -> usize {
    cells.iter().map(Cell::width).sum()
}

/// One cell per character of `text`, all in `style`.
#[must_use]
pub fn styled_cells(text: &str, style: Style) -> Vec<Cell> {
    text.chars().map(|ch| Cell::new(ch, style)).collect()
}

#[must_use]
pub fn cells_to_string(cells: &[Cell]) -> String {
    cells.iter().map(|c| c.ch).collect()
}

/// Shorten `cells` to at most `width` columns, ending in [`ELLIPSIS`] when
/// anything was cut. The ellipsis takes the style of the first cell it
/// replaces.
#[must_use]
pub fn trim_cells(cells: &[Cell], width: usize) -> Vec<Cell> {
    if width == 0 {
        return Vec::new();
    }
    if width_of(cells) <= width {
        return cells.to_vec();
    }

    let mut out = Vec::with_capacity(width);
    let mut used = 0;
    for cell in cells {
        let w = cell.width();
        if used + w > width - 1 {
            out.push(Cell::new(ELLIPSIS, cell.style));
            break;
        }
        out.push(*cell);
        used += w;
    }
    out
}

/// Split on every cell whose glyph is `sep`.
///
/// A trailing separator does not produce a trailing empty piece.
#[must_use]
pub fn split_cells(cells: &[Cell], sep: char) -> Vec<Vec<Cell>> {
    let mut pieces = Vec::new();
    let mut current = Vec::new();
    for cell in cells {
        if cell.ch == sep {
            pieces.push(std::mem::take(&mut current));
        } else {
            current.push(*cell);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// A cell with the column it starts at, relative to the sequence start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWithX {
    pub x: usize,
    pub cell: Cell,
}

#[must_use]
pub fn cells_with_x(cells: &[Cell]) -> Vec<CellWithX> {
    let mut x = 0;
    cells
        .iter()
        .map(|cell| {
            let item = CellWithX { x, cell: *cell };
            x += cell.width();
            item
        })
        .collect()
}

/// Word-wrap `cells` to `width` columns.
///
/// Breaks are inserted as `'\n'` cells in the clear style; existing newlines
/// are kept. Spaces at a break are dropped. Words wider than a whole line are
/// split at the character level. A width of 0 disables wrapping.
#[must_use]
pub fn wrap_cells(cells: &[Cell], width: usize) -> Vec<Cell> {
    if width == 0 {
        return cells.to_vec();
    }
    let mut out = Vec::with_capacity(cells.len() + cells.len() / width.max(1));
    for (i, line) in cells.split(|c| c.ch == '\n').enumerate() {
        if i > 0 {
            out.push(Cell::new('\n', Style::CLEAR));
        }
        wrap_line(line, width, &mut out);
    }
    out
}

struct LineWrapper<'a> {
    out: &'a mut Vec<Cell>,
    width: usize,
    col: usize,
    spaces: Vec<Cell>,
    word: Vec<Cell>,
}

impl LineWrapper<'_> {
    fn newline(&mut self) {
        self.out.push(Cell::new('\n', Style::CLEAR));
        self.col = 0;
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let word_width = width_of(&self.word);
        let space_width = width_of(&self.spaces);
        if self.col > 0 && self.col + space_width + word_width > self.width {
            self.newline();
        } else {
            self.out.extend_from_slice(&self.spaces);
            self.col += space_width;
        }
        self.spaces.clear();

        for cell in self.word.drain(..) {
            let w = cell.width();
            if self.col > 0 && self.col + w > self.width {
                self.out.push(Cell::new('\n', Style::CLEAR));
                self.col = 0;
            }
            self.out.push(cell);
            self.col += w;
        }
    }

    fn finish(mut self) {
        self.flush_word();
        if self.col + width_of(&self.spaces) <= self.width {
            self.out.extend_from_slice(&self.spaces);
        }
    }
}

fn wrap_line(line: &[Cell], width: usize, out: &mut Vec<Cell>) {
    let mut wrapper = LineWrapper {
        out,
        width,
        col: 0,
        spaces: Vec::new(),
        word: Vec::new(),
    };
    for cell in line {
        if cell.ch == ' ' {
            wrapper.flush_word();
            wrapper.spaces.push(*cell);
        } else {
            wrapper.word.push(*cell);
        }
    }
    wrapper.finish();
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtui_style::Color;

    fn cells(text: &str) -> Vec<Cell> {
        styled_cells(text, Style::CLEAR)
    }

    fn text(cells: &[Cell]) -> String {
        cells_to_string(cells)
    }

    #[test]
    fn wrap_at_word_boundaries() {
        assert_eq!(text(&wrap_cells(&cells("Hello world foo bar"), 10)), "Hello\nworld foo\nbar");
    }

    #[test]
    fn wrap_keeps_styles_and_existing_newlines() {
        let red = Style::with_fg(Color::RED);
        let mut input = styled_cells("ab cd", red);
        input.extend(cells("\nxy"));
        let wrapped = wrap_cells(&input, 3);
        assert_eq!(text(&wrapped), "ab\ncd\nxy");
        assert_eq!(wrapped[3].style, red);
        assert_eq!(wrapped[2].style, Style::CLEAR);
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(text(&wrap_cells(&cells("abcdefg hi"), 3)), "abc\ndef\ng\nhi");
    }

    #[test]
    fn wrap_counts_wide_glyphs() {
        assert_eq!(text(&wrap_cells(&cells("日本語"), 4)), "日本\n語");
    }

    #[test]
    fn wrap_zero_width_is_identity() {
        assert_eq!(text(&wrap_cells(&cells("a b"), 0)), "a b");
    }

    #[test]
    fn trim_with_ellipsis() {
        let red = Style::with_fg(Color::RED);
        let trimmed = trim_cells(&styled_cells("abcdef", red), 4);
        assert_eq!(text(&trimmed), "abc…");
        assert_eq!(trimmed[3].style, red);
    }

    #[test]
    fn trim_short_input_unchanged() {
        assert_eq!(text(&trim_cells(&cells("abc"), 3)), "abc");
        assert!(trim_cells(&cells("abc"), 0).is_empty());
        assert_eq!(text(&trim_cells(&cells("abc"), 1)), "…");
    }

    #[test]
    fn trim_wide_glyph_boundary() {
        assert_eq!(text(&trim_cells(&cells("日本語"), 4)), "日…");
    }

    #[test]
    fn split_pieces() {
        let pieces = split_cells(&cells("a,,b,"), ',');
        let pieces: Vec<String> = pieces.iter().map(|p| text(p)).collect();
        assert_eq!(pieces, vec!["a", "", "b"]);
    }

    #[test]
    fn x_positions_follow_display_width() {
        let xs: Vec<usize> = cells_with_x(&cells("a日b")).iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0, 1, 3]);
    }
}
