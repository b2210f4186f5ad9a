//! Property tests for buffer addressing and border merging.

use gtui_core::geometry::Rect;
use gtui_render::border::{self, connections};
use gtui_render::{Buffer, Cell};
use proptest::prelude::*;

const KNOWN: [char; 12] = [
    ' ', '─', '│', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼',
];

fn area() -> impl Strategy<Value = Rect> {
    (0u16..50, 0u16..50, 0u16..30, 0u16..30).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn outside_points_read_clear_and_ignore_writes(
        area in area(),
        x in 0u16..120,
        y in 0u16..120,
    ) {
        prop_assume!(!area.contains(x, y));
        let mut buf = Buffer::new(area);
        buf.set(x, y, Cell::from_char('x'));
        prop_assert!(buf.get(x, y).is_clear());
        prop_assert!(buf.cells().iter().all(Cell::is_clear));
    }

    #[test]
    fn inside_points_round_trip(area in area(), dx in 0u16..30, dy in 0u16..30) {
        prop_assume!(dx < area.width && dy < area.height);
        let mut buf = Buffer::new(area);
        buf.set(area.x + dx, area.y + dy, Cell::from_char('x'));
        prop_assert_eq!(buf.get(area.x + dx, area.y + dy).ch, 'x');
    }

    #[test]
    fn fill_touches_exactly_the_intersection(area in area(), fill in area()) {
        let mut buf = Buffer::new(area);
        buf.fill(fill, Cell::from_char('#'));
        for (x, y, cell) in buf.iter() {
            let inside = fill.contains(x, y);
            prop_assert_eq!(cell.ch == '#', inside, "({}, {})", x, y);
        }
    }

    #[test]
    fn merge_is_commutative_for_known_glyphs(a in 0usize..12, b in 0usize..12) {
        let (a, b) = (KNOWN[a], KNOWN[b]);
        prop_assert_eq!(border::resolve(a, b), border::resolve(b, a));
    }

    #[test]
    fn merge_contains_both_connections(a in 0usize..12, b in 0usize..12) {
        let (a, b) = (KNOWN[a], KNOWN[b]);
        let merged = connections(border::resolve(a, b)).unwrap();
        prop_assert!(merged.contains(connections(a).unwrap()));
        prop_assert!(merged.contains(connections(b).unwrap()));
    }

    #[test]
    fn unknown_existing_glyph_yields_new(c in any::<char>(), b in 0usize..12) {
        prop_assume!(!KNOWN.contains(&c));
        prop_assert_eq!(border::resolve(c, KNOWN[b]), KNOWN[b]);
    }
}
