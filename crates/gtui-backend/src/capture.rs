#![forbid(unsafe_code)]

//! Rasterize cells to an RGBA image.
//!
//! Every cell is a 7x13 pixel box on a black background. Box-drawing,
//! block-element and braille glyphs are drawn geometrically so that borders
//! and plots line up pixel-perfectly across cells; printable ASCII uses the
//! built-in bitmap font; anything else is drawn as an outlined box.
//!
//! Default foreground is white and default background is black. `REVERSE`
//! swaps the two after defaults are resolved.

use std::path::Path;

use gtui_core::info;
use gtui_render::border::{self, Connections};
use gtui_render::{Buffer, Cell, SharedDrawable};
use gtui_style::{Color, Rgb, StyleFlags};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::BackendError;
use crate::font;
use crate::pipeline;

pub const CELL_WIDTH: u32 = 7;
pub const CELL_HEIGHT: u32 = 13;

const ELLIPSIS: char = '…';

/// Render `drawables` onto a `width` x `height` cell screen and rasterize it.
pub fn capture(width: u16, height: u16, drawables: &[SharedDrawable]) -> RgbaImage {
    let frame = pipeline::compose(drawables);
    let empty = Buffer::with_size(0, 0);
    rasterize(frame.as_ref().unwrap_or(&empty), width, height)
}

/// [`capture`] and write the result to `path` as a PNG.
pub fn save_image(
    path: impl AsRef<Path>,
    width: u16,
    height: u16,
    drawables: &[SharedDrawable],
) -> Result<(), BackendError> {
    write_png(path.as_ref(), &capture(width, height, drawables))
}

pub(crate) fn write_png(path: &Path, image: &RgbaImage) -> Result<(), BackendError> {
    image.save_with_format(path, ImageFormat::Png)?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "capture written"
    );
    Ok(())
}

/// Rasterize the cells of `buf` that fall inside a `width` x `height` screen.
///
/// `buf` is addressed in absolute screen coordinates; screen cells it does
/// not cover stay black.
pub fn rasterize(buf: &Buffer, width: u16, height: u16) -> RgbaImage {
    let mut canvas = Canvas {
        image: RgbaImage::from_pixel(
            u32::from(width) * CELL_WIDTH,
            u32::from(height) * CELL_HEIGHT,
            rgba(Rgb::BLACK),
        ),
    };
    for y in 0..height {
        for x in 0..width {
            let cell = buf.get(x, y);
            if !cell.is_clear() {
                canvas.draw_cell(
                    u32::from(x) * CELL_WIDTH,
                    u32::from(y) * CELL_HEIGHT,
                    &cell,
                );
            }
        }
    }
    canvas.image
}

fn rgba(c: Rgb) -> Rgba<u8> {
    Rgba([c.r, c.g, c.b, 255])
}

fn resolve(color: Color, default: Rgb) -> Rgb {
    color.to_rgb().unwrap_or(default)
}

/// Foreground and background of a cell, defaults and `REVERSE` applied.
fn cell_colors(cell: &Cell) -> (Rgb, Rgb) {
    let fg = resolve(cell.style.fg, Rgb::WHITE);
    let bg = resolve(cell.style.bg, Rgb::BLACK);
    if cell.style.modifiers.contains(StyleFlags::REVERSE) {
        (bg, fg)
    } else {
        (fg, bg)
    }
}

struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fill a pixel rectangle, clipped to the image.
    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
        let x_end = x.saturating_add(w).min(self.image.width());
        let y_end = y.saturating_add(h).min(self.image.height());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, color);
            }
        }
    }

    fn draw_cell(&mut self, px: u32, py: u32, cell: &Cell) {
        let (fg, bg) = cell_colors(cell);
        let span = CELL_WIDTH * cell.width().max(1) as u32;
        if bg != Rgb::BLACK {
            self.fill(px, py, span, CELL_HEIGHT, rgba(bg));
        }
        let fg = rgba(fg);
        let ch = cell.ch;
        if ch == ' ' || ch == '\0' {
            return;
        }
        let handled = match ch {
            '\u{2500}'..='\u{257F}' => self.draw_box(px, py, ch, fg),
            '\u{2580}'..='\u{259F}' => self.draw_block(px, py, ch, fg),
            '\u{2800}'..='\u{28FF}' => {
                self.draw_braille(px, py, ch, fg);
                true
            }
            ELLIPSIS => {
                for i in 0..3 {
                    self.fill(px + 1 + i * 2, py + 9, 1, 1, fg);
                }
                true
            }
            _ => self.draw_ascii(px, py, ch, fg),
        };
        if !handled {
            self.draw_missing(px, py, span, fg);
        }
    }

    fn draw_ascii(&mut self, px: u32, py: u32, ch: char, fg: Rgba<u8>) -> bool {
        let Some(rows) = font::glyph(ch) else {
            return false;
        };
        let (ox, oy) = (px + 1, py + 3);
        for row in 0..font::GLYPH_HEIGHT {
            for col in 0..font::GLYPH_WIDTH {
                if font::pixel(rows, col, row) {
                    self.fill(ox + col, oy + row, 1, 1, fg);
                }
            }
        }
        true
    }

    /// Light lines from the cell center toward each connected side.
    fn draw_box(&mut self, px: u32, py: u32, ch: char, fg: Rgba<u8>) -> bool {
        let Some(mask) = box_connections(ch) else {
            return false;
        };
        if mask.is_empty() {
            return false;
        }
        let cx = px + CELL_WIDTH / 2;
        let cy = py + CELL_HEIGHT / 2;
        if mask.contains(Connections::LEFT) {
            self.fill(px, cy, cx - px + 1, 1, fg);
        }
        if mask.contains(Connections::RIGHT) {
            self.fill(cx, cy, px + CELL_WIDTH - cx, 1, fg);
        }
        if mask.contains(Connections::UP) {
            self.fill(cx, py, 1, cy - py + 1, fg);
        }
        if mask.contains(Connections::DOWN) {
            self.fill(cx, cy, 1, py + CELL_HEIGHT - cy, fg);
        }
        true
    }

    fn draw_block(&mut self, px: u32, py: u32, ch: char, fg: Rgba<u8>) -> bool {
        let (w, h) = (CELL_WIDTH, CELL_HEIGHT);
        let code = ch as u32;
        match ch {
            '\u{2580}' => self.fill(px, py, w, h / 2, fg),
            '\u{2581}'..='\u{2587}' => {
                let eighths = code - 0x2580;
                let bh = (h * eighths + 4) / 8;
                self.fill(px, py + h - bh, w, bh, fg);
            }
            '\u{2588}' => self.fill(px, py, w, h, fg),
            '\u{2589}'..='\u{258F}' => {
                let eighths = 0x2590 - code;
                self.fill(px, py, (w * eighths + 4) / 8, h, fg);
            }
            '\u{2590}' => {
                let hw = w / 2;
                self.fill(px + w - hw, py, hw, h, fg);
            }
            '\u{2591}'..='\u{2593}' => {
                // Shades as a dot pattern of increasing density.
                let level = code - 0x2590;
                for dy in 0..h {
                    for dx in 0..w {
                        if (dx + dy * 3) % 4 < level {
                            self.fill(px + dx, py + dy, 1, 1, fg);
                        }
                    }
                }
            }
            '\u{2594}' => self.fill(px, py, w, 2, fg),
            '\u{2595}' => self.fill(px + w - 1, py, 1, h, fg),
            '\u{2596}'..='\u{259F}' => self.draw_quadrants(px, py, code, fg),
            _ => return false,
        }
        true
    }

    fn draw_quadrants(&mut self, px: u32, py: u32, code: u32, fg: Rgba<u8>) {
        // Bits: 8 upper left, 4 upper right, 2 lower left, 1 lower right.
        const MASKS: [u8; 10] = [
            0b0010, 0b0001, 0b1000, 0b1011, 0b1001, 0b1110, 0b1101, 0b0100, 0b0110, 0b0111,
        ];
        let Some(mask) = MASKS.get((code - 0x2596) as usize) else {
            return;
        };
        let (hw, hh) = (CELL_WIDTH / 2, CELL_HEIGHT / 2);
        let (rw, rh) = (CELL_WIDTH - hw, CELL_HEIGHT - hh);
        if mask & 0b1000 != 0 {
            self.fill(px, py, hw, hh, fg);
        }
        if mask & 0b0100 != 0 {
            self.fill(px + hw, py, rw, hh, fg);
        }
        if mask & 0b0010 != 0 {
            self.fill(px, py + hh, hw, rh, fg);
        }
        if mask & 0b0001 != 0 {
            self.fill(px + hw, py + hh, rw, rh, fg);
        }
    }

    /// Dots of a 2x4 braille pattern, 2x2 pixels each.
    fn draw_braille(&mut self, px: u32, py: u32, ch: char, fg: Rgba<u8>) {
        const DOTS: [(u32, u32); 8] = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (0, 3),
            (1, 3),
        ];
        let bits = ch as u32 - 0x2800;
        for (bit, (col, row)) in DOTS.iter().enumerate() {
            if bits & (1 << bit) != 0 {
                self.fill(px + 1 + col * 3, py + 1 + row * 3, 2, 2, fg);
            }
        }
    }

    fn draw_missing(&mut self, px: u32, py: u32, span: u32, fg: Rgba<u8>) {
        let (x0, y0) = (px + 1, py + 2);
        let (w, h) = (span.saturating_sub(2), CELL_HEIGHT - 4);
        self.fill(x0, y0, w, 1, fg);
        self.fill(x0, y0 + h - 1, w, 1, fg);
        self.fill(x0, y0, 1, h, fg);
        self.fill(x0 + w.saturating_sub(1), y0, 1, h, fg);
    }
}

/// Connections of a box glyph. Rounded corners are drawn square; the merge
/// table leaves them out.
fn box_connections(ch: char) -> Option<Connections> {
    let corner = match ch {
        border::ROUNDED_TOP_LEFT => Connections::RIGHT | Connections::DOWN,
        border::ROUNDED_TOP_RIGHT => Connections::LEFT | Connections::DOWN,
        border::ROUNDED_BOTTOM_LEFT => Connections::RIGHT | Connections::UP,
        border::ROUNDED_BOTTOM_RIGHT => Connections::LEFT | Connections::UP,
        _ => return border::connections(ch),
    };
    Some(corner)
}
