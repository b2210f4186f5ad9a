#![forbid(unsafe_code)]

//! One frame: compose drawables into a buffer, then flush it.

use std::io;

use gtui_core::geometry::Rect;
use gtui_core::{debug_span, trace};
use gtui_render::drawable::lock;
use gtui_render::{Buffer, Cell, SharedDrawable};

use crate::screen::Screen;

/// Union of the drawables' rectangles. Empty rectangles do not count.
pub fn union_rect(drawables: &[SharedDrawable]) -> Rect {
    drawables
        .iter()
        .fold(Rect::default(), |acc, d| acc.union(&lock(d).rect()))
}

/// Paint every drawable into one buffer covering their union.
///
/// Each drawable is locked only for its own paint call. Returns `None` when
/// the union is empty.
pub fn compose(drawables: &[SharedDrawable]) -> Option<Buffer> {
    let area = union_rect(drawables);
    if area.is_empty() {
        return None;
    }
    let span = debug_span!(
        "compose",
        x = area.x,
        y = area.y,
        width = area.width,
        height = area.height
    );
    let _guard = span.enter();
    let mut buf = Buffer::new(area);
    for drawable in drawables {
        lock(drawable).draw(&mut buf);
    }
    Some(buf)
}

/// Write a frame to `screen` and flush it.
///
/// Only non-clear cells of `frame` are written, clipped to the screen size.
/// Cells that were painted in `previous` but are clear or absent in `frame`
/// are blanked so stale glyphs do not linger. Returns the number of cells
/// written.
pub fn flush_frame(
    screen: &mut dyn Screen,
    frame: Option<&Buffer>,
    previous: Option<&Buffer>,
) -> io::Result<usize> {
    let (width, height) = screen.size();
    let visible = |x: u16, y: u16| x < width && y < height;
    let mut written = 0;

    if let Some(previous) = previous {
        for (x, y, cell) in previous.iter() {
            if cell.is_clear() || !visible(x, y) {
                continue;
            }
            let now = frame.map_or(Cell::CLEAR, |f| f.get(x, y));
            if now.is_clear() {
                screen.put(x, y, &Cell::CLEAR)?;
                written += 1;
            }
        }
    }

    if let Some(frame) = frame {
        for (x, y, cell) in frame.iter() {
            if !cell.is_clear() && visible(x, y) {
                screen.put(x, y, cell)?;
                written += 1;
            }
        }
    }

    screen.flush()?;
    trace!(cells = written, "frame flushed");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::SimulatedScreen;
    use gtui_render::{Drawable, drawable};
    use gtui_style::{Color, Style};

    struct Fill {
        rect: Rect,
        ch: char,
    }

    impl Drawable for Fill {
        fn rect(&self) -> Rect {
            self.rect
        }

        fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
            self.rect = Rect::from_corners(x1, y1, x2, y2);
        }

        fn draw(&self, buf: &mut Buffer) {
            buf.fill(self.rect, Cell::new(self.ch, Style::with_fg(Color::GREEN)));
        }
    }

    fn fill(rect: Rect, ch: char) -> SharedDrawable {
        drawable::shared(Fill { rect, ch })
    }

    #[test]
    fn union_ignores_empty_rects() {
        let items = [
            fill(Rect::new(2, 1, 3, 2), 'a'),
            fill(Rect::new(0, 0, 0, 0), 'b'),
            fill(Rect::new(6, 4, 1, 1), 'c'),
        ];
        assert_eq!(union_rect(&items), Rect::new(2, 1, 5, 4));
    }

    #[test]
    fn compose_paints_in_order() {
        let items = [
            fill(Rect::new(0, 0, 4, 1), 'a'),
            fill(Rect::new(2, 0, 2, 1), 'b'),
        ];
        let buf = compose(&items).unwrap();
        assert_eq!(buf.row_text(0), "aabb");
    }

    #[test]
    fn nothing_to_compose() {
        assert!(compose(&[]).is_none());
        assert!(compose(&[fill(Rect::default(), 'x')]).is_none());
    }

    #[test]
    fn flush_skips_clear_cells_and_clips() {
        let mut screen = SimulatedScreen::new(3, 2);
        screen.put(0, 0, &Cell::from_char('z')).unwrap();
        let buf = compose(&[fill(Rect::new(1, 1, 5, 3), 'a')]).unwrap();
        let written = flush_frame(&mut screen, Some(&buf), None).unwrap();
        assert_eq!(written, 2);
        let contents = screen.contents().unwrap();
        assert_eq!(contents.row_text(0), "z  ");
        assert_eq!(contents.row_text(1), " aa");
    }

    #[test]
    fn flush_blanks_what_the_last_frame_left() {
        let mut screen = SimulatedScreen::new(4, 1);
        let first = compose(&[fill(Rect::new(0, 0, 4, 1), 'a')]).unwrap();
        flush_frame(&mut screen, Some(&first), None).unwrap();
        let second = compose(&[fill(Rect::new(0, 0, 2, 1), 'b')]).unwrap();
        flush_frame(&mut screen, Some(&second), Some(&first)).unwrap();
        assert_eq!(screen.contents().unwrap().row_text(0), "bb  ");
    }

    #[test]
    fn frame_at_the_coordinate_limit_is_clipped_not_fatal() {
        let mut screen = SimulatedScreen::new(3, 1);
        let edge = compose(&[fill(Rect::new(65530, 0, 10, 1), 'e')]).unwrap();
        assert_eq!(flush_frame(&mut screen, Some(&edge), None).unwrap(), 0);
        assert_eq!(flush_frame(&mut screen, None, Some(&edge)).unwrap(), 0);
        assert_eq!(screen.contents().unwrap().row_text(0), "   ");
    }

    #[test]
    fn empty_frame_still_flushes() {
        let mut screen = SimulatedScreen::new(2, 1);
        assert_eq!(flush_frame(&mut screen, None, None).unwrap(), 0);
        assert_eq!(screen.flushes(), 1);
    }
}
