//! Property-based invariant tests for rectangle collision math.
//!
//! 1. Overlap is symmetric
//! 2. Overlap implies touching
//! 3. The intersection lies inside both operands
//! 4. Translation preserves size and shifts overlap consistently
//! 5. The union contains both operands

use dropkit_core::geometry::{Offset, Point, Rect};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f64> {
    (-500i32..500).prop_map(f64::from)
}

fn extent() -> impl Strategy<Value = f64> {
    (0i32..200).prop_map(f64::from)
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (coord(), coord(), extent(), extent()).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn offset_strategy() -> impl Strategy<Value = Offset> {
    (coord(), coord()).prop_map(|(dx, dy)| Offset::new(dx, dy))
}

fn contains_rect(outer: &Rect, inner: &Rect) -> bool {
    inner.left() >= outer.left()
        && inner.top() >= outer.top()
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(a.touches(&b), b.touches(&a));
    }

    #[test]
    fn overlap_implies_touch(a in rect_strategy(), b in rect_strategy()) {
        if a.overlaps(&b) {
            prop_assert!(a.touches(&b));
        }
    }

    #[test]
    fn intersection_inside_both(a in rect_strategy(), b in rect_strategy()) {
        if let Some(i) = a.intersection_opt(&b) {
            prop_assert!(!i.is_empty());
            prop_assert!(contains_rect(&a, &i));
            prop_assert!(contains_rect(&b, &i));
        }
    }

    #[test]
    fn translation_preserves_size(a in rect_strategy(), o in offset_strategy()) {
        let moved = a.offset_by(o);
        prop_assert_eq!(moved.width, a.width);
        prop_assert_eq!(moved.height, a.height);
        prop_assert_eq!(moved.origin(), Point::new(a.x, a.y) + o);
    }

    #[test]
    fn translating_both_keeps_overlap(
        a in rect_strategy(),
        b in rect_strategy(),
        o in offset_strategy(),
    ) {
        prop_assert_eq!(a.overlaps(&b), a.offset_by(o).overlaps(&b.offset_by(o)));
    }

    #[test]
    fn union_contains_both(a in rect_strategy(), b in rect_strategy()) {
        let u = a.union(&b);
        prop_assert!(contains_rect(&u, &a));
        prop_assert!(contains_rect(&u, &b));
    }
}
