//! Slide progress bar that restarts whenever the carousel cursor moves or a
//! new interval is armed.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Gauge, Widget},
};

use super::theme::Palette;

/// Tracks when the current slide started.
#[derive(Debug, Clone, Copy)]
pub struct ProgressClock<K> {
    key: K,
    started: Instant,
}

impl<K: PartialEq> ProgressClock<K> {
    pub const fn new(key: K, now: Instant) -> Self {
        Self { key, started: now }
    }

    /// Fill ratio in `[0, 1]` for a slide lasting `interval`. A new `key`
    /// restarts the bar from empty.
    pub fn ratio(&mut self, key: K, now: Instant, interval: Duration) -> f64 {
        if key != self.key {
            self.key = key;
            self.started = now;
        }
        if interval.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / interval.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// One-row gauge under the active slide.
pub fn render_progress(ratio: f64, palette: &Palette, area: Rect, buf: &mut Buffer) {
    Gauge::default()
        .gauge_style(palette.title().bg(palette.surface))
        .use_unicode(true)
        .label("")
        .ratio(ratio)
        .render(area, buf);
}
