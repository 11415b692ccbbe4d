//! Scroll position and "entered view" detection for the stacked page.

use super::section::SectionId;

/// Fires once, the first time the observed fraction reaches the threshold.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityObserver {
    threshold: f32,
    fired: bool,
}

impl VisibilityObserver {
    pub const fn new(threshold: f32) -> Self {
        Self {
            threshold,
            fired: false,
        }
    }

    /// Report the visible fraction. Returns `true` on the crossing only.
    pub fn observe(&mut self, visible: f32) -> bool {
        if self.fired || visible < self.threshold || visible <= 0.0 {
            return false;
        }
        self.fired = true;
        true
    }
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(0.2)
    }
}

/// Vertical scroll over sections of equal height, one viewport each.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    offset: u16,
    height: u16,
}

impl Viewport {
    const SECTIONS: u16 = SectionId::ALL.len() as u16;

    pub const fn offset(&self) -> u16 {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total page height in rows.
    pub const fn page_height(&self) -> u16 {
        self.height.saturating_mul(Self::SECTIONS)
    }

    /// Adapt to a new terminal height, keeping the same section on top.
    pub fn resize(&mut self, height: u16) {
        if height == self.height {
            return;
        }
        let top = self.top_section();
        let within = self.offset.saturating_sub(self.section_top(top));
        self.height = height;
        self.offset = self.section_top(top).saturating_add(within.min(height));
        self.clamp();
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.offset) + delta;
        self.offset = u16::try_from(target.max(0)).unwrap_or(u16::MAX);
        self.clamp();
    }

    pub fn scroll_to(&mut self, section: SectionId) {
        self.offset = self.section_top(section);
        self.clamp();
    }

    /// First row of `section` on the page.
    pub fn section_top(&self, section: SectionId) -> u16 {
        let index = section.index() as u16;
        self.height.saturating_mul(index)
    }

    /// Section covering page row `row`, if any.
    pub fn section_at(&self, row: u16) -> Option<SectionId> {
        if self.height == 0 {
            return None;
        }
        SectionId::from_index(usize::from(row / self.height))
    }

    /// Fraction of `section` inside the viewport, in `[0, 1]`.
    pub fn visible_fraction(&self, section: SectionId) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        let top = u32::from(self.section_top(section));
        let bottom = top + u32::from(self.height);
        let view_top = u32::from(self.offset);
        let view_bottom = view_top + u32::from(self.height);
        let overlap = bottom.min(view_bottom).saturating_sub(top.max(view_top));
        #[allow(clippy::cast_precision_loss)]
        let fraction = overlap as f32 / f32::from(self.height);
        fraction
    }

    /// The section occupying most of the viewport; ties go to the upper one.
    pub fn most_visible(&self) -> SectionId {
        SectionId::ALL
            .into_iter()
            .fold((SectionId::Hero, -1.0_f32), |(best, best_fraction), s| {
                let fraction = self.visible_fraction(s);
                if fraction > best_fraction {
                    (s, fraction)
                } else {
                    (best, best_fraction)
                }
            })
            .0
    }

    fn top_section(&self) -> SectionId {
        if self.height == 0 {
            return SectionId::Hero;
        }
        SectionId::from_index(usize::from(self.offset / self.height)).unwrap_or(SectionId::Contact)
    }

    fn clamp(&mut self) {
        let max = self.page_height().saturating_sub(self.height);
        self.offset = self.offset.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: u16) -> Viewport {
        let mut v = Viewport::default();
        v.resize(height);
        v
    }

    #[test]
    fn test_observer_fires_once_at_threshold() {
        let mut observer = VisibilityObserver::new(0.2);
        assert!(!observer.observe(0.1));
        assert!(observer.observe(0.25));
        assert!(!observer.observe(1.0));
    }

    #[test]
    fn test_section_at_page_row() {
        let v = viewport(10);
        assert_eq!(v.section_at(0), Some(SectionId::Hero));
        assert_eq!(v.section_at(25), Some(SectionId::Projects));
        assert_eq!(v.section_at(69), Some(SectionId::Contact));
        assert_eq!(v.section_at(70), None);
        assert_eq!(Viewport::default().section_at(0), None);
    }

    #[test]
    fn test_fraction_while_scrolling() {
        let mut v = viewport(20);
        assert!((v.visible_fraction(SectionId::Hero) - 1.0).abs() < f32::EPSILON);
        assert!(v.visible_fraction(SectionId::About).abs() < f32::EPSILON);

        v.scroll_by(5);
        assert!((v.visible_fraction(SectionId::Hero) - 0.75).abs() < f32::EPSILON);
        assert!((v.visible_fraction(SectionId::About) - 0.25).abs() < f32::EPSILON);
        assert_eq!(v.most_visible(), SectionId::Hero);

        v.scroll_by(10);
        assert_eq!(v.most_visible(), SectionId::About);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut v = viewport(10);
        v.scroll_by(-3);
        assert_eq!(v.offset(), 0);
        v.scroll_by(1_000);
        assert_eq!(v.offset(), 60);
        assert_eq!(v.most_visible(), SectionId::Contact);
    }

    #[test]
    fn test_scroll_to_section() {
        let mut v = viewport(12);
        v.scroll_to(SectionId::Skills);
        assert_eq!(v.offset(), 60);
        assert_eq!(v.most_visible(), SectionId::Skills);
    }

    #[test]
    fn test_resize_keeps_top_section() {
        let mut v = viewport(10);
        v.scroll_to(SectionId::Projects);
        v.resize(30);
        assert_eq!(v.offset(), 60);
        assert_eq!(v.most_visible(), SectionId::Projects);
    }
}
