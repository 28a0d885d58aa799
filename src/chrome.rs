//! Scroll-derived page chrome: navigation bar, chapter markers, back-to-top,
//! hero parallax and section reveal.

use crate::visibility::interpolate;

pub const BACK_TO_TOP_AFTER_PX: f64 = 800.0;
pub const NAV_SCROLLED_AFTER_PX: f64 = 50.0;
const NAV_FADE_PX: f64 = 100.0;
const NAV_MAX_ALPHA: f64 = 0.8;
pub const DEFAULT_CHAPTER: &str = "intro";
/// Share of a section that must be on screen before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// End offsets, in percent of their own height, of the auxiliary hero images.
pub const AUX_DRIFT_PCT: [f64; 3] = [30.0, 60.0, 40.0];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    fn nav_rgb(self) -> (u8, u8, u8) {
        match self {
            Theme::Dark => (0, 0, 0),
            Theme::Light => (252, 231, 199),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavStyle {
    pub scrolled: bool,
    pub background: String,
}

pub fn nav_style(scroll_y: f64, theme: Theme) -> NavStyle {
    let progress = (scroll_y / NAV_FADE_PX).clamp(0.0, 1.0);
    let (r, g, b) = theme.nav_rgb();
    NavStyle {
        scrolled: scroll_y > NAV_SCROLLED_AFTER_PX,
        background: format!("rgba({}, {}, {}, {:.3})", r, g, b, progress * NAV_MAX_ALPHA),
    }
}

pub fn show_back_to_top(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_AFTER_PX
}

/// Vertical extent of a section in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBox {
    pub top: f64,
    pub height: f64,
}

impl SectionBox {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Chapter whose section holds the middle of the viewport. When boxes
/// overlap the later chapter wins; when none match it is [`DEFAULT_CHAPTER`].
pub fn active_chapter<'a>(
    sections: &[(&'a str, SectionBox)],
    scroll_y: f64,
    viewport_height: f64,
) -> &'a str {
    let probe = scroll_y + viewport_height / 2.0;
    sections
        .iter()
        .filter(|(_, section)| section.contains(probe))
        .map(|(id, _)| *id)
        .last()
        .unwrap_or(DEFAULT_CHAPTER)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroParallax {
    /// Downward shift of the hero copy as a percentage of its own height.
    pub offset_pct: f64,
    pub opacity: f64,
    pub image_scale: f64,
    /// Downward shift of each auxiliary image, in [`AUX_DRIFT_PCT`] order.
    pub aux_offset_pct: [f64; 3],
}

impl HeroParallax {
    pub fn content_transform(&self) -> String {
        format!("translateY({:.2}%)", self.offset_pct)
    }

    pub fn image_transform(&self) -> String {
        format!("scale({:.4})", self.image_scale)
    }

    /// Transform for the `index`th auxiliary image; identity past the third.
    pub fn aux_transform(&self, index: usize) -> String {
        let offset = self.aux_offset_pct.get(index).copied().unwrap_or(0.0);
        format!("translateY({:.2}%)", offset)
    }
}

/// Progress of the hero scrolling out: 0 when its top meets the viewport
/// top, 1 once its bottom has.
pub fn hero_progress(scroll_y: f64, hero: SectionBox) -> f64 {
    if hero.height <= 0.0 {
        return 0.0;
    }
    ((scroll_y - hero.top) / hero.height).clamp(0.0, 1.0)
}

pub fn hero_parallax(progress: f64) -> HeroParallax {
    HeroParallax {
        offset_pct: interpolate(progress, &[(0.0, 0.0), (1.0, 50.0)]),
        opacity: interpolate(progress, &[(0.0, 1.0), (0.5, 0.8), (1.0, 0.0)]),
        image_scale: interpolate(progress, &[(0.0, 1.0), (1.0, 1.1)]),
        aux_offset_pct: AUX_DRIFT_PCT.map(|end| interpolate(progress, &[(0.0, 0.0), (1.0, end)])),
    }
}

/// Whether at least [`REVEAL_THRESHOLD`] of a section is inside the viewport.
/// `top` is relative to the viewport.
pub fn is_revealed(top: f64, height: f64, viewport_height: f64) -> bool {
    if height <= 0.0 {
        return false;
    }
    let visible = (top + height).min(viewport_height) - top.max(0.0);
    visible / height >= REVEAL_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<(&'static str, SectionBox)> {
        vec![
            ("intro", SectionBox { top: 0.0, height: 900.0 }),
            ("writing", SectionBox { top: 900.0, height: 1200.0 }),
            ("photography", SectionBox { top: 2100.0, height: 1000.0 }),
        ]
    }

    #[test]
    fn chapter_follows_viewport_middle() {
        let s = sections();
        assert_eq!(active_chapter(&s, 0.0, 800.0), "intro");
        assert_eq!(active_chapter(&s, 500.0, 800.0), "writing");
        assert_eq!(active_chapter(&s, 1700.0, 800.0), "photography");
    }

    #[test]
    fn chapter_defaults_past_the_end() {
        assert_eq!(active_chapter(&sections(), 10_000.0, 800.0), DEFAULT_CHAPTER);
        assert_eq!(active_chapter(&[], 0.0, 800.0), DEFAULT_CHAPTER);
    }

    #[test]
    fn back_to_top_threshold() {
        assert!(!show_back_to_top(800.0));
        assert!(show_back_to_top(801.0));
    }

    #[test]
    fn nav_background_saturates() {
        let top = nav_style(0.0, Theme::Dark);
        assert!(!top.scrolled);
        assert_eq!(top.background, "rgba(0, 0, 0, 0.000)");

        let half = nav_style(50.0, Theme::Light);
        assert!(!half.scrolled);
        assert_eq!(half.background, "rgba(252, 231, 199, 0.400)");

        let far = nav_style(5000.0, Theme::Dark);
        assert!(far.scrolled);
        assert_eq!(far.background, "rgba(0, 0, 0, 0.800)");
    }

    #[test]
    fn hero_parallax_stops() {
        let start = hero_parallax(0.0);
        assert_eq!((start.offset_pct, start.opacity, start.image_scale), (0.0, 1.0, 1.0));

        let mid = hero_parallax(0.5);
        assert!((mid.opacity - 0.8).abs() < 1e-9);
        assert!((mid.offset_pct - 25.0).abs() < 1e-9);

        let end = hero_parallax(1.0);
        assert_eq!(end.opacity, 0.0);
        assert!((end.image_scale - 1.1).abs() < 1e-9);
    }

    #[test]
    fn aux_images_drift_at_their_own_rates() {
        assert_eq!(hero_parallax(0.0).aux_offset_pct, [0.0, 0.0, 0.0]);

        let mid = hero_parallax(0.5);
        assert!((mid.aux_offset_pct[0] - 15.0).abs() < 1e-9);
        assert!((mid.aux_offset_pct[1] - 30.0).abs() < 1e-9);
        assert!((mid.aux_offset_pct[2] - 20.0).abs() < 1e-9);

        let end = hero_parallax(1.0);
        assert_eq!(end.aux_offset_pct, AUX_DRIFT_PCT);
        assert_eq!(end.aux_transform(1), "translateY(60.00%)");
        assert_eq!(end.aux_transform(7), "translateY(0.00%)");
    }

    #[test]
    fn hero_progress_clamps() {
        let hero = SectionBox { top: 0.0, height: 1000.0 };
        assert_eq!(hero_progress(-50.0, hero), 0.0);
        assert_eq!(hero_progress(250.0, hero), 0.25);
        assert_eq!(hero_progress(4000.0, hero), 1.0);
    }

    #[test]
    fn reveal_needs_a_tenth_on_screen() {
        assert!(!is_revealed(800.0, 1000.0, 800.0));
        assert!(!is_revealed(750.0, 1000.0, 800.0));
        assert!(is_revealed(700.0, 1000.0, 800.0));
        assert!(is_revealed(-500.0, 1000.0, 800.0));
        assert!(!is_revealed(-950.0, 1000.0, 800.0));
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::default().toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().name(), "dark");
    }
}
