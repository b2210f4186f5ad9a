//! Proportional grid layout.
//!
//! A [`Grid`] is built from a tree of [`GridItem`]s. Each item is a row or a
//! column with a ratio, holding either one drawable or further items.
//! [`Grid::set`] flattens the tree into leaves whose position and extent are
//! fractions of the grid's own rectangle; [`Grid::draw`] turns those
//! fractions into cells against the grid's current rectangle, so leaves
//! follow every resize.
//!
//! Ratios are absolute fractions of the parent, not normalized between
//! siblings. Three rows of `1.0 / 3.0` tile the parent; two rows of `1.0`
//! overflow it and are clipped at the grid's edge.
//!
//! When a container mixes rows and columns, the second axis to appear halves
//! the container's extent on the other axis for the remaining children.
//! Existing layouts rely on this, so it is kept.
//!
//! # Example
//!
//! ```
//! use gtui_layout::{Grid, GridItem};
//! # use gtui_core::geometry::Rect;
//! # use gtui_render::{Buffer, Drawable, drawable};
//! # struct Pane(Rect);
//! # impl Drawable for Pane {
//! #     fn rect(&self) -> Rect { self.0 }
//! #     fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
//! #         self.0 = Rect::from_corners(x1, y1, x2, y2);
//! #     }
//! #     fn draw(&self, _: &mut Buffer) {}
//! # }
//! let left = drawable::shared(Pane(Rect::default()));
//! let right = drawable::shared(Pane(Rect::default()));
//!
//! let mut grid = Grid::new();
//! grid.set_rect(0, 0, 80, 24);
//! grid.set(vec![GridItem::row(1.0, vec![
//!     GridItem::col_leaf(0.5, left.clone()),
//!     GridItem::col_leaf(0.5, right.clone()),
//! ])]);
//! grid.draw(&mut Buffer::with_size(80, 24));
//!
//! assert_eq!(left.lock().unwrap().rect(), Rect::new(0, 0, 40, 24));
//! assert_eq!(right.lock().unwrap().rect(), Rect::new(40, 0, 40, 24));
//! ```

use gtui_core::geometry::Rect;
use gtui_core::trace;
use gtui_render::drawable::{self, Drawable, SharedDrawable};
use gtui_render::Buffer;

/// Absorbs floating point noise from accumulated ratios before truncation,
/// so `1/3 + 1/3 + 1/3` still reaches the far edge.
const SNAP: f64 = 1e-6;

/// Direction an item subdivides its parent along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Takes `ratio` of the parent's height, full width.
    Row,
    /// Takes `ratio` of the parent's width, full height.
    Col,
}

enum Entry {
    Leaf(SharedDrawable),
    Children(Vec<GridItem>),
}

/// One node of a grid declaration.
pub struct GridItem {
    axis: Axis,
    ratio: f64,
    entry: Entry,
}

impl GridItem {
    /// A row holding further items.
    pub fn row(ratio: f64, children: Vec<GridItem>) -> Self {
        Self::new(Axis::Row, ratio, Entry::Children(children))
    }

    /// A column holding further items.
    pub fn col(ratio: f64, children: Vec<GridItem>) -> Self {
        Self::new(Axis::Col, ratio, Entry::Children(children))
    }

    /// A row holding one drawable.
    pub fn row_leaf(ratio: f64, drawable: SharedDrawable) -> Self {
        Self::new(Axis::Row, ratio, Entry::Leaf(drawable))
    }

    /// A column holding one drawable.
    pub fn col_leaf(ratio: f64, drawable: SharedDrawable) -> Self {
        Self::new(Axis::Col, ratio, Entry::Leaf(drawable))
    }

    fn new(axis: Axis, ratio: f64, entry: Entry) -> Self {
        // Negative or non-finite ratios take no space.
        let ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            0.0
        };
        Self { axis, ratio, entry }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl std::fmt::Debug for GridItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("GridItem");
        s.field("axis", &self.axis).field("ratio", &self.ratio);
        match &self.entry {
            Entry::Leaf(_) => s.field("entry", &"<drawable>"),
            Entry::Children(children) => s.field("entry", children),
        };
        s.finish()
    }
}

/// A flattened leaf: fractions of the grid rectangle.
struct Placement {
    drawable: SharedDrawable,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Fractions of the grid rectangle accumulated while walking the tree.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// A proportional layout container. Itself a [`Drawable`], so grids nest.
#[derive(Default)]
pub struct Grid {
    rect: Rect,
    items: Vec<Placement>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entries` as children of an implicit full-size row.
    ///
    /// Calling `set` again adds to the existing leaves; use [`Grid::clear`]
    /// to start over.
    pub fn set(&mut self, entries: Vec<GridItem>) {
        let root = GridItem::row(1.0, entries);
        let origin = Frame {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
        self.flatten(root, origin, 1.0, 1.0);
    }

    /// Remove every leaf.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of flattened leaves.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `frame.x`/`frame.y` come from the parent; extents are computed here.
    fn flatten(&mut self, item: GridItem, frame: Frame, parent_width: f64, parent_height: f64) {
        let (width_ratio, height_ratio) = match item.axis {
            Axis::Col => (item.ratio, 1.0),
            Axis::Row => (1.0, item.ratio),
        };
        let mut frame = Frame {
            width: parent_width * width_ratio,
            height: parent_height * height_ratio,
            ..frame
        };

        let children = match item.entry {
            Entry::Leaf(drawable) => {
                self.items.push(Placement {
                    drawable,
                    x: frame.x,
                    y: frame.y,
                    width: frame.width,
                    height: frame.height,
                });
                return;
            }
            Entry::Children(children) => children,
        };

        let mut x_offset = 0.0;
        let mut y_offset = 0.0;
        let mut seen_cols = false;
        let mut seen_rows = false;
        for child in children {
            let child_frame = Frame {
                x: frame.x + frame.width * x_offset,
                y: frame.y + frame.height * y_offset,
                width: 0.0,
                height: 0.0,
            };
            match child.axis {
                Axis::Col => {
                    seen_cols = true;
                    x_offset += child.ratio;
                    if seen_rows {
                        frame.height /= 2.0;
                    }
                }
                Axis::Row => {
                    seen_rows = true;
                    y_offset += child.ratio;
                    if seen_cols {
                        frame.width /= 2.0;
                    }
                }
            }
            self.flatten(child, child_frame, frame.width, frame.height);
        }
    }

    /// Leaf rectangle for `placement` against the current grid rectangle.
    fn place(&self, placement: &Placement) -> Rect {
        let span = |origin: u16, extent: u16, ratio: f64| -> u16 {
            let offset = (f64::from(extent) * ratio + SNAP).floor() as u16;
            origin.saturating_add(offset)
        };
        let r = self.rect;
        let x1 = span(r.x, r.width, placement.x);
        let y1 = span(r.y, r.height, placement.y);
        let x2 = span(r.x, r.width, placement.x + placement.width).min(r.right());
        let y2 = span(r.y, r.height, placement.y + placement.height).min(r.bottom());
        Rect::from_corners(x1, y1, x2, y2)
    }
}

impl Drawable for Grid {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
        self.rect = Rect::from_corners(x1, y1, x2, y2);
    }

    /// Assign every leaf its rectangle, then paint it under its own lock.
    ///
    /// Leaves that end up with no area are resized but not painted.
    fn draw(&self, buf: &mut Buffer) {
        trace!(leaves = self.items.len(), "grid draw");
        for placement in &self.items {
            let rect = self.place(placement);
            let mut leaf = drawable::lock(&placement.drawable);
            leaf.set_rect(rect.x, rect.y, rect.right(), rect.bottom());
            if !rect.is_empty() {
                leaf.draw(buf);
            }
        }
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rect", &self.rect)
            .field("leaves", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtui_render::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Marker {
        rect: Rect,
        glyph: char,
        draws: AtomicUsize,
    }

    impl Drawable for Marker {
        fn rect(&self) -> Rect {
            self.rect
        }

        fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
            self.rect = Rect::from_corners(x1, y1, x2, y2);
        }

        fn draw(&self, buf: &mut Buffer) {
            self.draws.fetch_add(1, Ordering::Relaxed);
            buf.fill(self.rect, Cell::from_char(self.glyph));
        }
    }

    fn marker(glyph: char) -> Arc<Mutex<Marker>> {
        drawable::shared(Marker {
            glyph,
            ..Marker::default()
        })
    }

    fn rect_of(p: &Arc<Mutex<Marker>>) -> Rect {
        p.lock().unwrap().rect
    }

    fn layout(grid: &mut Grid, width: u16, height: u16) -> Buffer {
        grid.set_rect(0, 0, width, height);
        let mut buf = Buffer::with_size(width, height);
        grid.draw(&mut buf);
        buf
    }

    #[test]
    fn thirds_tile_exactly() {
        let rows: Vec<_> = (0..3).map(|_| marker('#')).collect();
        let mut grid = Grid::new();
        grid.set(
            rows.iter()
                .map(|p| GridItem::row_leaf(1.0 / 3.0, p.clone()))
                .collect(),
        );
        layout(&mut grid, 100, 100);

        let heights: Vec<u16> = rows.iter().map(|p| rect_of(p).height).collect();
        assert_eq!(heights, vec![33, 33, 34]);
        assert_eq!(rect_of(&rows[0]).y, 0);
        assert_eq!(rect_of(&rows[1]).y, 33);
        assert_eq!(rect_of(&rows[2]).y, 66);
        assert_eq!(rect_of(&rows[2]).bottom(), 100);
        assert!(rows.iter().all(|p| rect_of(p).width == 100));
    }

    #[test]
    fn nested_rows_inside_column() {
        let (b1, b2, b3) = (marker('1'), marker('2'), marker('3'));
        let mut grid = Grid::new();
        grid.set(vec![GridItem::row(
            1.0,
            vec![
                GridItem::col_leaf(0.5, b1.clone()),
                GridItem::col(
                    0.5,
                    vec![
                        GridItem::row_leaf(0.5, b2.clone()),
                        GridItem::row_leaf(0.5, b3.clone()),
                    ],
                ),
            ],
        )]);
        layout(&mut grid, 100, 100);

        assert_eq!(rect_of(&b1), Rect::from_corners(0, 0, 50, 100));
        assert_eq!(rect_of(&b2), Rect::from_corners(50, 0, 100, 50));
        assert_eq!(rect_of(&b3), Rect::from_corners(50, 50, 100, 100));
    }

    #[test]
    fn mixed_axes_halve_extent() {
        let (a, b) = (marker('a'), marker('b'));
        let mut grid = Grid::new();
        grid.set(vec![GridItem::row(
            1.0,
            vec![
                GridItem::col_leaf(0.5, a.clone()),
                GridItem::row_leaf(0.5, b.clone()),
            ],
        )]);
        layout(&mut grid, 100, 100);

        assert_eq!(rect_of(&a), Rect::from_corners(0, 0, 50, 100));
        // The row after a column sees half the width.
        assert_eq!(rect_of(&b), Rect::from_corners(50, 0, 100, 50));
    }

    #[test]
    fn grid_origin_offsets_leaves() {
        let (l, r) = (marker('l'), marker('r'));
        let mut grid = Grid::new();
        grid.set(vec![GridItem::row(
            1.0,
            vec![
                GridItem::col_leaf(0.5, l.clone()),
                GridItem::col_leaf(0.5, r.clone()),
            ],
        )]);
        grid.set_rect(10, 5, 30, 9);
        let mut buf = Buffer::new(grid.rect());
        grid.draw(&mut buf);

        assert_eq!(rect_of(&l), Rect::new(10, 5, 10, 4));
        assert_eq!(rect_of(&r), Rect::new(20, 5, 10, 4));
        assert_eq!(buf.row_text(5), "llllllllllrrrrrrrrrr");
    }

    #[test]
    fn overflowing_ratios_clamp_to_grid_edge() {
        let (a, b) = (marker('a'), marker('b'));
        let mut grid = Grid::new();
        grid.set(vec![
            GridItem::row_leaf(0.75, a.clone()),
            GridItem::row_leaf(0.75, b.clone()),
        ]);
        layout(&mut grid, 10, 20);
        assert_eq!(rect_of(&a), Rect::new(0, 0, 10, 15));
        assert_eq!(rect_of(&b), Rect::from_corners(0, 15, 10, 20));
    }

    #[test]
    fn relayout_follows_resize() {
        let a = marker('a');
        let mut grid = Grid::new();
        grid.set(vec![GridItem::row_leaf(0.5, a.clone())]);
        layout(&mut grid, 10, 10);
        assert_eq!(rect_of(&a), Rect::new(0, 0, 10, 5));
        layout(&mut grid, 40, 30);
        assert_eq!(rect_of(&a), Rect::new(0, 0, 40, 15));
    }

    #[test]
    fn zero_and_invalid_ratios_draw_nothing() {
        let (zero, nan, neg) = (marker('z'), marker('n'), marker('-'));
        let mut grid = Grid::new();
        grid.set(vec![
            GridItem::row_leaf(0.0, zero.clone()),
            GridItem::row_leaf(f64::NAN, nan.clone()),
            GridItem::row_leaf(-1.0, neg.clone()),
        ]);
        let buf = layout(&mut grid, 10, 10);
        for p in [&zero, &nan, &neg] {
            assert!(rect_of(p).is_empty());
            assert_eq!(p.lock().unwrap().draws.load(Ordering::Relaxed), 0);
        }
        assert!(buf.cells().iter().all(Cell::is_clear));
    }

    #[test]
    fn empty_grid_rect_draws_nothing() {
        let a = marker('a');
        let mut grid = Grid::new();
        grid.set(vec![GridItem::row_leaf(1.0, a.clone())]);
        layout(&mut grid, 0, 0);
        assert_eq!(a.lock().unwrap().draws.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn set_appends_and_clear_resets() {
        let mut grid = Grid::new();
        grid.set(vec![GridItem::row_leaf(0.5, marker('a'))]);
        grid.set(vec![GridItem::row_leaf(0.5, marker('b'))]);
        assert_eq!(grid.len(), 2);
        grid.clear();
        assert!(grid.is_empty());
    }

    #[test]
    fn nested_grid_is_a_drawable() {
        let inner_leaf = marker('i');
        let mut inner = Grid::new();
        inner.set(vec![GridItem::col_leaf(0.5, inner_leaf.clone())]);
        let inner = drawable::shared(inner);

        let mut outer = Grid::new();
        outer.set(vec![GridItem::row_leaf(0.5, inner.clone())]);
        layout(&mut outer, 20, 10);

        assert_eq!(inner.lock().unwrap().rect(), Rect::new(0, 0, 20, 5));
        assert_eq!(rect_of(&inner_leaf), Rect::new(0, 0, 10, 5));
    }
}
