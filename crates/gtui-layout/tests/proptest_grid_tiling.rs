//! Property tests: equal-ratio rows and columns tile the grid exactly.

use std::sync::{Arc, Mutex};

use gtui_core::geometry::Rect;
use gtui_layout::{Grid, GridItem};
use gtui_render::{Buffer, Drawable, drawable};
use proptest::prelude::*;

#[derive(Default)]
struct Slot(Rect);

impl Drawable for Slot {
    fn rect(&self) -> Rect {
        self.0
    }

    fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
        self.0 = Rect::from_corners(x1, y1, x2, y2);
    }

    fn draw(&self, _buf: &mut Buffer) {}
}

fn run(items: impl Fn(f64, Arc<Mutex<Slot>>) -> GridItem, n: usize, rect: Rect) -> Vec<Rect> {
    let slots: Vec<_> = (0..n).map(|_| drawable::shared(Slot::default())).collect();
    let mut grid = Grid::new();
    grid.set(
        slots
            .iter()
            .map(|s| items(1.0 / n as f64, s.clone()))
            .collect(),
    );
    grid.set_rect(rect.x, rect.y, rect.right(), rect.bottom());
    grid.draw(&mut Buffer::new(rect));
    slots.iter().map(|s| s.lock().unwrap().0).collect()
}

proptest! {
    #[test]
    fn rows_tile(n in 1usize..40, x in 0u16..20, y in 0u16..20, w in 1u16..300, h in 1u16..1000) {
        let area = Rect::new(x, y, w, h);
        let rects = run(|r, s| GridItem::row_leaf(r, s), n, area);
        prop_assert_eq!(rects[0].y, area.y);
        for pair in rects.windows(2) {
            prop_assert_eq!(pair[0].bottom(), pair[1].y);
        }
        prop_assert_eq!(rects[n - 1].bottom(), area.bottom());
        for r in &rects {
            prop_assert_eq!(r.x, area.x);
            prop_assert_eq!(r.width, area.width);
        }
    }

    #[test]
    fn cols_tile(n in 1usize..40, w in 1u16..1000, h in 1u16..50) {
        let area = Rect::from_size(w, h);
        let rects = run(|r, s| GridItem::col_leaf(r, s), n, area);
        prop_assert_eq!(rects[0].x, 0);
        for pair in rects.windows(2) {
            prop_assert_eq!(pair[0].right(), pair[1].x);
        }
        prop_assert_eq!(rects[n - 1].right(), w);
    }
}
