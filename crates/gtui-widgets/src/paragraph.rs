#![forbid(unsafe_code)]

use gtui_core::geometry::Rect;
use gtui_render::{Buffer, Drawable};
use gtui_style::{Style, Theme};
use gtui_text::{cells_with_x, parse_styles, split_cells, trim_cells, wrap_cells};

use crate::block::{Alignment, Block};

/// Vertical placement of text inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Markup text inside a [`Block`].
///
/// The text is parsed as style markup, word-wrapped to the inner width
/// (unless disabled), and clipped to the inner height. Lines wider than the
/// inner area end in an ellipsis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    block: Block,
    text: String,
    text_style: Style,
    wrap: bool,
    alignment: Alignment,
    vertical_alignment: VerticalAlignment,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

impl Paragraph {
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            text: String::new(),
            text_style: theme.paragraph.text,
            wrap: true,
            alignment: Alignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.block = block;
        self
    }

    #[must_use]
    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    #[must_use]
    pub fn wrap(mut self, on: bool) -> Self {
        self.wrap = on;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Replace the text in place, e.g. from an event handler.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }

    pub fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }
}

impl Drawable for Paragraph {
    fn rect(&self) -> Rect {
        self.block.rect()
    }

    fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
        self.block.set_rect(x1, y1, x2, y2);
    }

    fn draw(&self, buf: &mut Buffer) {
        self.block.draw_block(buf);

        let inner = self.block.inner();
        if inner.is_empty() {
            return;
        }
        let width = inner.width as usize;
        let height = inner.height as usize;

        let mut cells = parse_styles(&self.text, self.text_style);
        if self.wrap {
            cells = wrap_cells(&cells, width);
        }
        let rows = split_cells(&cells, '\n');

        let top = match self.vertical_alignment {
            VerticalAlignment::Top => 0,
            VerticalAlignment::Middle => height.saturating_sub(rows.len()) / 2,
            VerticalAlignment::Bottom => height.saturating_sub(rows.len()),
        };

        for (i, row) in rows.iter().enumerate() {
            let y = top + i;
            if y >= height {
                break;
            }
            let positioned = cells_with_x(&trim_cells(row, width));
            let Some(last) = positioned.last() else {
                continue;
            };
            let row_width = last.x + last.cell.width();
            let offset = match self.alignment {
                Alignment::Left => 0,
                Alignment::Center => width.saturating_sub(row_width) / 2,
                Alignment::Right => width.saturating_sub(row_width),
            };
            for item in &positioned {
                let x = inner.x as usize + offset + item.x;
                buf.set(x as u16, inner.y + y as u16, item.cell);
            }
        }
    }
}
