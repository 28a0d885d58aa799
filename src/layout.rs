//! Placement of the floating decorative elements.
//!
//! Selection and sizing take an injected [`Rng`] so tests can pin the sequence.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::visibility::ScrollRange;

/// Upper bound on rendered decorative elements.
pub const MAX_ELEMENTS: usize = 6;

/// Size band in layout units; one unit is [`PX_PER_UNIT`] pixels.
const SIZE_BASE_UNITS: f64 = 20.0;
const SIZE_SPREAD_UNITS: f64 = 12.0;
pub const PX_PER_UNIT: f64 = 4.0;

pub const MIN_SIZE_PX: f64 = SIZE_BASE_UNITS * PX_PER_UNIT;
pub const MAX_SIZE_PX: f64 = (SIZE_BASE_UNITS + SIZE_SPREAD_UNITS) * PX_PER_UNIT;

/// Horizontal edge an anchor is measured from, as a viewport percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Side {
    Left(f64),
    Right(f64),
}

impl Side {
    pub fn css_property(&self) -> &'static str {
        match self {
            Side::Left(_) => "left",
            Side::Right(_) => "right",
        }
    }

    pub fn percent(&self) -> f64 {
        match *self {
            Side::Left(pct) | Side::Right(pct) => pct,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub top_pct: f64,
    pub side: Side,
    pub scroll_range: ScrollRange,
}

const fn anchor(top_pct: f64, side: Side, min: f64, max: f64) -> Anchor {
    let scroll_range = match ScrollRange::new(min, max) {
        Some(range) => range,
        None => panic!("anchor scroll range must be increasing"),
    };
    Anchor {
        top_pct,
        side,
        scroll_range,
    }
}

/// Fixed screen anchors, in display order. Ranges advance down the page and
/// overlap their neighbours slightly so one element fades in as another leaves.
pub const ANCHORS: [Anchor; MAX_ELEMENTS] = [
    anchor(15.0, Side::Left(5.0), 0.0, 1000.0),
    anchor(30.0, Side::Right(8.0), 800.0, 2000.0),
    anchor(50.0, Side::Left(3.0), 1600.0, 2800.0),
    anchor(65.0, Side::Right(5.0), 2400.0, 3600.0),
    anchor(80.0, Side::Left(7.0), 3200.0, 4400.0),
    anchor(40.0, Side::Right(10.0), 4000.0, 5200.0),
];

/// One decorative element with its mount-time geometry. Never mutated after
/// [`compose`]; only its opacity changes while scrolling.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<T> {
    pub item: T,
    pub index: usize,
    pub top_pct: f64,
    pub side: Side,
    pub size_px: f64,
    pub scroll_range: ScrollRange,
    pub motion: AmbientMotion,
}

/// Picks up to [`MAX_ELEMENTS`] items without replacement.
///
/// A missing or empty `source` falls back to `placeholders`. The result is
/// never longer than the pool it was drawn from.
pub fn select_elements<T: Clone, R: Rng + ?Sized>(
    source: Option<&[T]>,
    placeholders: &[T],
    rng: &mut R,
) -> Vec<T> {
    let pool = match source {
        Some(items) if !items.is_empty() => items,
        _ => placeholders,
    };

    let mut picked = pool.to_vec();
    picked.shuffle(rng);
    picked.truncate(MAX_ELEMENTS);
    picked
}

/// Size in pixels drawn from the fixed band, rounded to whole layout units.
pub fn random_size_px<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let units = (SIZE_BASE_UNITS + rng.random::<f64>() * SIZE_SPREAD_UNITS).round();
    units * PX_PER_UNIT
}

/// Assigns anchors in table order and a random size to each selected item.
pub fn compose<T, R: Rng + ?Sized>(items: Vec<T>, rng: &mut R) -> Vec<Placement<T>> {
    items
        .into_iter()
        .zip(ANCHORS.iter())
        .enumerate()
        .map(|(index, (item, anchor))| Placement {
            item,
            index,
            top_pct: anchor.top_pct,
            side: anchor.side,
            size_px: random_size_px(rng),
            scroll_range: anchor.scroll_range,
            motion: AmbientMotion::for_index(index),
        })
        .collect()
}

const DRIFT_Y_PX: [f64; 5] = [0.0, -20.0, 0.0, 20.0, 0.0];
const DRIFT_X_PX: [f64; 5] = [0.0, 15.0, -8.0, 12.0, 0.0];
const DRIFT_ROTATE_DEG: [f64; 5] = [0.0, 3.0, -2.0, 5.0, 0.0];

/// Looping cosmetic drift. Periods grow with the element index so neighbours
/// fall out of step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientMotion {
    pub y_period_s: f64,
    pub x_period_s: f64,
    pub rotate_period_s: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Drift {
    pub dx: f64,
    pub dy: f64,
    pub rotate_deg: f64,
}

impl Drift {
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) rotate({:.2}deg)",
            self.dx, self.dy, self.rotate_deg
        )
    }
}

impl AmbientMotion {
    pub fn for_index(index: usize) -> Self {
        let offset = 2.0 * index as f64;
        Self {
            y_period_s: 15.0 + offset,
            x_period_s: 12.0 + offset,
            rotate_period_s: 18.0 + offset,
        }
    }

    pub fn sample(&self, t_secs: f64) -> Drift {
        Drift {
            dx: loop_keyframes(&DRIFT_X_PX, self.x_period_s, t_secs),
            dy: loop_keyframes(&DRIFT_Y_PX, self.y_period_s, t_secs),
            rotate_deg: loop_keyframes(&DRIFT_ROTATE_DEG, self.rotate_period_s, t_secs),
        }
    }
}

fn loop_keyframes(keys: &[f64; 5], period_s: f64, t_secs: f64) -> f64 {
    if !t_secs.is_finite() || period_s <= 0.0 {
        return keys[0];
    }

    let segments = (keys.len() - 1) as f64;
    let phase = (t_secs / period_s).rem_euclid(1.0) * segments;
    let seg = (phase.floor() as usize).min(keys.len() - 2);
    let local = ease_in_out(phase - seg as f64);
    keys[seg] + (keys[seg + 1] - keys[seg]) * local
}

#[inline]
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    0.5 - 0.5 * (std::f64::consts::PI * t).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn anchors_advance_and_overlap() {
        for pair in ANCHORS.windows(2) {
            let (a, b) = (pair[0].scroll_range, pair[1].scroll_range);
            assert!(b.min() > a.min());
            assert!(b.min() < a.max(), "neighbours should overlap");
            assert!((800.0..=1200.0).contains(&a.size()));
        }
    }

    #[test]
    fn short_source_is_not_padded() {
        let source = ["a", "b", "c"];
        let picked = select_elements(Some(&source[..]), &["p"; 6], &mut rng());
        assert_eq!(picked.len(), 3);
        for item in ["a", "b", "c"] {
            assert!(picked.contains(&item));
        }
    }

    #[test]
    fn long_source_is_capped_without_repeats() {
        let source: Vec<u32> = (0..10).collect();
        let mut picked = select_elements(Some(&source[..]), &[], &mut rng());
        assert_eq!(picked.len(), MAX_ELEMENTS);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), MAX_ELEMENTS);
    }

    #[test]
    fn empty_or_missing_source_uses_placeholders() {
        let placeholders = ["p1", "p2", "p3", "p4", "p5", "p6"];
        assert_eq!(select_elements::<&str, _>(None, &placeholders, &mut rng()).len(), 6);
        assert_eq!(select_elements(Some(&[][..]), &placeholders, &mut rng()).len(), 6);
    }

    #[test]
    fn seeded_selection_is_reproducible() {
        let source: Vec<u32> = (0..10).collect();
        let a = select_elements(Some(&source[..]), &[], &mut rng());
        let b = select_elements(Some(&source[..]), &[], &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn compose_follows_anchor_table() {
        let placed = compose(vec!['a', 'b', 'c', 'd', 'e', 'f'], &mut rng());
        assert_eq!(placed.len(), MAX_ELEMENTS);
        for (p, anchor) in placed.iter().zip(ANCHORS.iter()) {
            assert_eq!(p.top_pct, anchor.top_pct);
            assert_eq!(p.side, anchor.side);
            assert_eq!(p.scroll_range, anchor.scroll_range);
            assert!(p.size_px >= MIN_SIZE_PX && p.size_px <= MAX_SIZE_PX);
            assert_eq!(p.size_px % PX_PER_UNIT, 0.0);
        }
    }

    #[test]
    fn sizes_stay_in_band() {
        let mut rng = rng();
        for _ in 0..500 {
            let size = random_size_px(&mut rng);
            assert!((80.0..=128.0).contains(&size), "size {size}");
        }
    }

    #[test]
    fn motion_periods_desynchronise() {
        let first = AmbientMotion::for_index(0);
        let last = AmbientMotion::for_index(5);
        assert_eq!(first.y_period_s, 15.0);
        assert_eq!(last.y_period_s, 25.0);
        assert_eq!(last.x_period_s, 22.0);
        assert_eq!(last.rotate_period_s, 28.0);
    }

    #[test]
    fn drift_hits_keyframes_and_loops() {
        let motion = AmbientMotion::for_index(0);
        let quarter = motion.y_period_s / 4.0;

        assert_eq!(motion.sample(0.0), Drift::default());
        assert!((motion.sample(quarter).dy - -20.0).abs() < 1e-9);
        assert!((motion.sample(3.0 * quarter).dy - 20.0).abs() < 1e-9);

        let a = motion.sample(7.5);
        let b = motion.sample(7.5 + motion.y_period_s * motion.x_period_s * motion.rotate_period_s);
        assert!((a.dy - b.dy).abs() < 1e-6);
    }
}
