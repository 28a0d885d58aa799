#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use scrollfolio::visibility::{PEAK_OPACITY, ScrollRange, opacity};

fn scroll_range() -> impl Strategy<Value = ScrollRange> {
    (-1.0e6..1.0e6f64, 1.0..1.0e5f64).prop_map(|(min, size)| {
        ScrollRange::new(min, min + size).expect("positive size")
    })
}

proptest! {
    #[test]
    fn stays_within_bounds(range in scroll_range(), y in -2.0e6..2.0e6f64) {
        let o = opacity(y, range);
        prop_assert!((0.0..=PEAK_OPACITY).contains(&o));
    }

    #[test]
    fn invisible_outside_range(range in scroll_range(), gap in 1.0e-3..1.0e5f64) {
        prop_assert_eq!(opacity(range.min() - gap, range), 0.0);
        prop_assert_eq!(opacity(range.max() + gap, range), 0.0);
    }

    #[test]
    fn holds_peak_on_plateau(range in scroll_range(), t in 0.0..=1.0f64) {
        let y = range.fade_in_end() + (range.fade_out_start() - range.fade_in_end()) * t;
        prop_assume!(y > range.fade_in_end() && y < range.fade_out_start());
        prop_assert_eq!(opacity(y, range), PEAK_OPACITY);
    }

    #[test]
    fn fade_in_never_decreases(range in scroll_range(), a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let width = range.fade_in_end() - range.min();
        let y0 = range.min() + width * lo;
        let y1 = range.min() + width * hi;
        prop_assert!(opacity(y0, range) <= opacity(y1, range));
    }

    #[test]
    fn fade_out_never_increases(range in scroll_range(), a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let start = range.fade_out_start();
        let width = range.max() - start;
        let y0 = start + width * lo;
        let y1 = start + width * hi;
        prop_assert!(opacity(y0, range) >= opacity(y1, range));
    }

    #[test]
    fn ramps_meet_the_plateau(range in scroll_range()) {
        prop_assert_eq!(opacity(range.fade_in_end(), range), PEAK_OPACITY);
        prop_assert_eq!(opacity(range.fade_out_start(), range), PEAK_OPACITY);
    }

    #[test]
    fn edges_are_transparent(range in scroll_range()) {
        prop_assert_eq!(opacity(range.min(), range), 0.0);
        prop_assert_eq!(opacity(range.max(), range), 0.0);
    }
}
