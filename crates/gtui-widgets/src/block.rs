#![forbid(unsafe_code)]

use gtui_core::geometry::{Rect, Sides};
use gtui_render::drawing::{BorderChars, Borders, Draw};
use gtui_render::{Buffer, Cell, Drawable};
use gtui_style::{Color, Style, Theme, gradient};
use unicode_width::UnicodeWidthStr;

/// Horizontal title alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Axis a border gradient runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Border color ramp from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGradient {
    pub start: Color,
    pub end: Color,
    pub direction: GradientDirection,
}

/// A title row: main title with alignment plus explicit left/right titles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct TitleRow {
    text: String,
    alignment: Alignment,
    left: String,
    right: String,
    style: Style,
}

/// A bordered container with titles and padding.
///
/// Most widgets embed a `Block` and draw their content inside
/// [`Block::inner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    rect: Rect,
    border: bool,
    borders: Borders,
    border_style: Style,
    rounded: bool,
    collapse: bool,
    border_gradient: Option<BorderGradient>,
    background: Color,
    padding: Sides,
    top: TitleRow,
    bottom: TitleRow,
}

impl Default for Block {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

impl Block {
    /// A fully bordered block styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            rect: Rect::default(),
            border: true,
            borders: Borders::all(),
            border_style: theme.block.border,
            rounded: false,
            collapse: false,
            border_gradient: None,
            background: Color::Default,
            padding: Sides::default(),
            top: TitleRow {
                style: theme.block.title,
                ..TitleRow::default()
            },
            bottom: TitleRow {
                style: theme.block.title,
                ..TitleRow::default()
            },
        }
    }

    /// Turn the whole border on or off.
    #[must_use]
    pub fn border(mut self, on: bool) -> Self {
        self.border = on;
        self
    }

    /// Select which sides carry a border.
    #[must_use]
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn rounded(mut self, on: bool) -> Self {
        self.rounded = on;
        self
    }

    /// Merge this block's border into borders already drawn beneath it, so
    /// adjoining blocks share junction glyphs.
    #[must_use]
    pub fn collapse(mut self, on: bool) -> Self {
        self.collapse = on;
        self
    }

    #[must_use]
    pub fn border_gradient(mut self, gradient: BorderGradient) -> Self {
        self.border_gradient = Some(gradient);
        self
    }

    /// Fill the block's area with this background before drawing.
    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Padding between the border and the inner area.
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.top.text = title.into();
        self
    }

    #[must_use]
    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.top.alignment = alignment;
        self
    }

    #[must_use]
    pub fn title_left(mut self, title: impl Into<String>) -> Self {
        self.top.left = title.into();
        self
    }

    #[must_use]
    pub fn title_right(mut self, title: impl Into<String>) -> Self {
        self.top.right = title.into();
        self
    }

    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.top.style = style;
        self
    }

    #[must_use]
    pub fn title_bottom(mut self, title: impl Into<String>) -> Self {
        self.bottom.text = title.into();
        self
    }

    #[must_use]
    pub fn title_bottom_alignment(mut self, alignment: Alignment) -> Self {
        self.bottom.alignment = alignment;
        self
    }

    #[must_use]
    pub fn title_bottom_left(mut self, title: impl Into<String>) -> Self {
        self.bottom.left = title.into();
        self
    }

    #[must_use]
    pub fn title_bottom_right(mut self, title: impl Into<String>) -> Self {
        self.bottom.right = title.into();
        self
    }

    #[must_use]
    pub fn title_bottom_style(mut self, style: Style) -> Self {
        self.bottom.style = style;
        self
    }

    /// Replace the top title in place.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.top.text = title.into();
    }

    /// Area inside the border line and padding.
    ///
    /// One cell is reserved on every side for the border line whether or not
    /// it is drawn.
    pub fn inner(&self) -> Rect {
        self.rect.inner(Sides::all(1).add(self.padding))
    }

    fn border_chars(&self) -> BorderChars {
        if self.rounded {
            BorderChars::ROUNDED
        } else {
            BorderChars::SQUARE
        }
    }

    fn draw_border(&self, buf: &mut Buffer) {
        let chars = self.border_chars();
        let Some(g) = self.border_gradient else {
            buf.draw_border(self.rect, self.borders, chars, self.border_style, self.collapse);
            return;
        };

        let r = self.rect;
        let (origin, length) = match g.direction {
            GradientDirection::Horizontal => (r.x, r.width),
            GradientDirection::Vertical => (r.y, r.height),
        };
        let ramp = gradient::linear(g.start, g.end, length as usize);
        let base = self.border_style;
        buf.draw_border_with(r, self.borders, chars, self.collapse, |x, y| {
            let pos = match g.direction {
                GradientDirection::Horizontal => x,
                GradientDirection::Vertical => y,
            };
            let fg = ramp
                .get(pos.saturating_sub(origin) as usize)
                .copied()
                .unwrap_or(base.fg);
            base.fg(fg)
        });
    }

    fn draw_title_row(&self, buf: &mut Buffer, row: &TitleRow, y: u16) {
        let min_x = i32::from(self.rect.x);
        let max_x = i32::from(self.rect.right());
        let span = max_x - min_x;

        if !row.text.is_empty() {
            let width = row.text.width() as i32;
            let x = match row.alignment {
                Alignment::Left => min_x + 2,
                Alignment::Center => min_x + (span - width) / 2,
                Alignment::Right => max_x - width - 2,
            };
            self.put_title(buf, &row.text, row.style, x, y);
        }
        if !row.left.is_empty() {
            self.put_title(buf, &row.left, row.style, min_x + 2, y);
        }
        if !row.right.is_empty() {
            let x = max_x - row.right.width() as i32 - 2;
            self.put_title(buf, &row.right, row.style, x, y);
        }
    }

    /// Write a title starting at `x` (may be left of the block), clipped to
    /// the block's horizontal extent.
    fn put_title(&self, buf: &mut Buffer, text: &str, style: Style, x: i32, y: u16) {
        let min_x = i32::from(self.rect.x);
        let max_x = i32::from(self.rect.right());
        let mut cx = x;
        for ch in text.chars() {
            let cell = Cell::new(ch, style);
            let w = cell.width() as i32;
            if w == 0 {
                continue;
            }
            if cx + w > max_x {
                break;
            }
            if cx >= min_x {
                buf.set(cx as u16, y, cell);
            }
            cx += w;
        }
    }

    /// Draw background, border and titles. Widgets embedding a block call
    /// this before drawing their content.
    pub fn draw_block(&self, buf: &mut Buffer) {
        if self.rect.is_empty() {
            return;
        }
        if !self.background.is_default() {
            buf.fill(self.rect, Cell::new(' ', Style::CLEAR.bg(self.background)));
        }
        if self.border {
            self.draw_border(buf);
        }
        self.draw_title_row(buf, &self.top, self.rect.y);
        self.draw_title_row(buf, &self.bottom, self.rect.bottom() - 1);
    }
}

impl Drawable for Block {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
        self.rect = Rect::from_corners(x1, y1, x2, y2);
    }

    fn draw(&self, buf: &mut Buffer) {
        self.draw_block(buf);
    }
}
