//! Property-based invariant tests for `Rect`.
//!
//! 1. Intersection is commutative and fits within both inputs.
//! 2. Union contains both non-empty inputs and ignores empty ones.
//! 3. `from_corners` round-trips through `right()`/`bottom()`.
//! 4. Inner margin never grows the rectangle.

use gtui_core::geometry::{Rect, Sides};
use proptest::prelude::*;

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=500, 0u16..=500, 0u16..=500, 0u16..=500).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersection_commutative(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_fits_within_both(a in small_rect_strategy(), b in small_rect_strategy()) {
        let i = a.intersection(&b);
        if !i.is_empty() {
            prop_assert!(i.x >= a.x && i.right() <= a.right());
            prop_assert!(i.y >= b.y && i.bottom() <= b.bottom());
        }
    }

    #[test]
    fn union_contains_both(a in small_rect_strategy(), b in small_rect_strategy()) {
        let u = a.union(&b);
        for r in [a, b] {
            if !r.is_empty() {
                prop_assert!(u.x <= r.x && u.y <= r.y);
                prop_assert!(u.right() >= r.right() && u.bottom() >= r.bottom());
            }
        }
        if a.is_empty() {
            prop_assert_eq!(u, b);
        }
    }

    #[test]
    fn from_corners_round_trip(x1 in 0u16..1000, y1 in 0u16..1000, w in 0u16..1000, h in 0u16..1000) {
        let r = Rect::from_corners(x1, y1, x1 + w, y1 + h);
        prop_assert_eq!(r, Rect::new(x1, y1, w, h));
        prop_assert_eq!(r.right(), x1 + w);
        prop_assert_eq!(r.bottom(), y1 + h);
    }

    #[test]
    fn inner_never_grows(r in small_rect_strategy(), m in 0u16..50) {
        let inner = r.inner(Sides::all(m));
        prop_assert!(inner.width <= r.width);
        prop_assert!(inner.height <= r.height);
    }
}
