//! Scroll-driven opacity envelope for the floating decorative layer.
//!
//! Each element owns a [`ScrollRange`]. Inside the range the element fades in
//! over the first fifth, holds at [`PEAK_OPACITY`], and fades out over the last
//! fifth. Outside the range it is fully transparent.

/// Peak opacity of a decorative element. Kept below 1.0 so the layer stays subtle.
pub const PEAK_OPACITY: f64 = 0.6;

/// Share of the range spent on each ramp.
pub const FADE_FRACTION: f64 = 0.2;

/// Window of vertical scroll offsets over which an element may be visible.
///
/// `min < max` and both bounds are finite; [`ScrollRange::new`] is the only
/// way to build one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    min: f64,
    max: f64,
}

impl ScrollRange {
    pub const fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_finite() && max.is_finite() && min < max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    pub fn fade_in_end(&self) -> f64 {
        self.min + self.size() * FADE_FRACTION
    }

    pub fn fade_out_start(&self) -> f64 {
        self.max - self.size() * FADE_FRACTION
    }

    pub fn contains(&self, scroll_y: f64) -> bool {
        scroll_y >= self.min && scroll_y <= self.max
    }
}

/// Opacity of an element with `range` when the viewport is scrolled to `scroll_y`.
///
/// Always in `[0, PEAK_OPACITY]`. A ramp whose width collapses to zero under
/// floating point becomes a step: straight to the peak on the way in, straight
/// to zero on the way out.
pub fn opacity(scroll_y: f64, range: ScrollRange) -> f64 {
    if !scroll_y.is_finite() || !range.contains(scroll_y) {
        return 0.0;
    }

    let fade_in_end = range.fade_in_end();
    if scroll_y <= fade_in_end {
        let width = fade_in_end - range.min;
        if width <= 0.0 {
            return PEAK_OPACITY;
        }
        return ((scroll_y - range.min) / width * PEAK_OPACITY).clamp(0.0, PEAK_OPACITY);
    }

    let fade_out_start = range.fade_out_start();
    if scroll_y < fade_out_start {
        return PEAK_OPACITY;
    }

    let width = range.max - fade_out_start;
    if width <= 0.0 {
        return 0.0;
    }
    ((range.max - scroll_y) / width * PEAK_OPACITY).clamp(0.0, PEAK_OPACITY)
}

/// Piecewise-linear map through `(input, output)` stops, clamped at both ends.
///
/// Stops must be sorted by input. Returns 0.0 when there are none.
pub fn interpolate(x: f64, stops: &[(f64, f64)]) -> f64 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }

    for pair in stops.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x >= x0 && x <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return y1;
            }
            return y0 + (y1 - y0) * (x - x0) / span;
        }
    }

    last.1
}
