//! Autoplay carousel state machine shared by every content-list section.

use std::time::Duration;

use tracing::debug;

use super::schedule::Armed;
use crate::content::{category_tabs, filter_items, ContentItem, Filter};

/// Autoplay state of a carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayState {
    /// Section has not been scrolled into view yet.
    #[default]
    Idle,
    AutoPlaying,
    Paused,
}

/// What the carousel cursor walks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// The cursor indexes the filtered items; filter tabs are set directly.
    Items,
    /// The cursor indexes the category tabs; moving it changes the filter.
    CategoryTabs,
}

/// Per-section parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationConfig {
    pub interval: Duration,
    pub mode: FilterMode,
}

impl PresentationConfig {
    pub const PROJECTS: Self = Self::items(Duration::from_secs(3));
    pub const CERTIFICATES: Self = Self::items(Duration::from_secs(2));
    pub const EXPERIENCE: Self = Self::items(Duration::from_secs(4));
    pub const SKILLS: Self = Self {
        interval: Duration::from_secs(4),
        mode: FilterMode::CategoryTabs,
    };

    pub const fn items(interval: Duration) -> Self {
        Self {
            interval,
            mode: FilterMode::Items,
        }
    }
}

/// Slideshow over a filterable list.
///
/// The controller is pure state: it never owns a timer. The host asks
/// [`PresentationController::armed`] which interval should be running and
/// feeds the firings back through [`PresentationController::tick`] with the
/// epoch they were armed for. The epoch moves on every transition into
/// autoplay and on every filter change, so a tick from a superseded interval
/// can never advance the new list.
#[derive(Debug)]
pub struct PresentationController<T> {
    items: Vec<T>,
    tabs: Vec<String>,
    config: PresentationConfig,
    filter: Filter,
    current_index: usize,
    state: PlayState,
    entered_view: bool,
    epoch: u64,
    progress_key: u64,
}

impl<T: ContentItem> PresentationController<T> {
    pub fn new(items: Vec<T>, config: PresentationConfig) -> Self {
        let tabs = category_tabs(&items);
        Self {
            items,
            tabs,
            config,
            filter: Filter::All,
            current_index: 0,
            state: PlayState::Idle,
            entered_view: false,
            epoch: 0,
            progress_key: 0,
        }
    }

    pub const fn state(&self) -> PlayState {
        self.state
    }

    pub const fn config(&self) -> PresentationConfig {
        self.config
    }

    pub const fn interval(&self) -> Duration {
        self.config.interval
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// `all` plus every category present in the source list.
    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub const fn is_auto_playing(&self) -> bool {
        !matches!(self.state, PlayState::Paused)
    }

    /// Set the first time the section is seen; pausing never clears it.
    pub const fn is_presentation_mode(&self) -> bool {
        self.entered_view
    }

    /// Changes whenever the cursor moves; the progress bar restarts on it.
    pub const fn progress_key(&self) -> u64 {
        self.progress_key
    }

    pub fn filtered(&self) -> Vec<&T> {
        filter_items(&self.items, &self.filter)
    }

    /// Number of positions the cursor cycles through.
    pub fn cursor_len(&self) -> usize {
        match self.config.mode {
            FilterMode::Items => self.filtered().len(),
            FilterMode::CategoryTabs => self.tabs.len(),
        }
    }

    /// Item under the cursor (items mode) or the first item of the selected
    /// category (tabs mode).
    pub fn current(&self) -> Option<&T> {
        match self.config.mode {
            FilterMode::Items => self.filtered().get(self.current_index).copied(),
            FilterMode::CategoryTabs => self.filtered().first().copied(),
        }
    }

    /// Interval the host should keep running, if any.
    pub fn armed(&self) -> Option<Armed> {
        (self.state == PlayState::AutoPlaying && self.cursor_len() > 1).then_some(Armed {
            epoch: self.epoch,
            period: self.config.interval,
        })
    }

    /// The section crossed its visibility threshold. Only the first call
    /// has an effect.
    pub fn enter_view(&mut self) {
        if self.entered_view {
            return;
        }
        self.entered_view = true;
        if self.state == PlayState::Idle {
            self.start_autoplay();
        }
    }

    /// One firing of the interval armed for `epoch`.
    pub fn tick(&mut self, epoch: u64) {
        if self.state != PlayState::AutoPlaying || epoch != self.epoch {
            debug!(epoch, current = self.epoch, state = ?self.state, "Ignoring stale tick");
            return;
        }
        self.step(1);
    }

    /// Play/pause control.
    pub fn toggle_autoplay(&mut self) {
        match self.state {
            PlayState::AutoPlaying | PlayState::Idle => self.pause(),
            PlayState::Paused => self.start_autoplay(),
        }
    }

    /// The user clicked the displayed item; manual interaction pauses.
    pub fn activate_current(&mut self) -> Option<&T> {
        self.pause();
        self.current()
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    /// Replace the filter directly. In items mode the cursor goes back to the
    /// first item; in tabs mode it moves to the filter's tab.
    pub fn set_filter(&mut self, filter: Filter) {
        match self.config.mode {
            FilterMode::Items => self.apply_filter(filter, 0),
            FilterMode::CategoryTabs => {
                // Unknown categories fall back to the `all` tab.
                let index = self.tab_index(filter.as_tab());
                let filter = Filter::from_tab(&self.tabs[index]);
                self.apply_filter(filter, index);
            }
        }
    }

    /// Manual click on a category tab. In tabs mode this counts as direct
    /// interaction and pauses autoplay.
    pub fn select_category(&mut self, tab: &str) {
        if self.config.mode == FilterMode::CategoryTabs {
            self.pause();
        }
        self.set_filter(Filter::from_tab(tab));
    }

    /// Move the filter to the next (`1`) or previous (`-1`) tab.
    pub fn cycle_filter(&mut self, delta: isize) {
        let len = self.tabs.len();
        let current = self.tab_index(self.filter.as_tab());
        let tab = self.tabs[wrap(current, delta, len)].clone();
        self.select_category(&tab);
    }

    fn tab_index(&self, tab: &str) -> usize {
        self.tabs.iter().position(|t| t == tab).unwrap_or(0)
    }

    fn apply_filter(&mut self, filter: Filter, index: usize) {
        let changed = filter != self.filter || index != self.current_index;
        self.filter = filter;
        self.current_index = index;
        self.epoch += 1;
        if changed {
            self.progress_key += 1;
        }
        debug!(filter = self.filter.as_tab(), index, "Filter changed");
    }

    fn start_autoplay(&mut self) {
        self.state = PlayState::AutoPlaying;
        self.epoch += 1;
        debug!(epoch = self.epoch, "Autoplay started");
    }

    fn pause(&mut self) {
        if self.state != PlayState::Paused {
            self.state = PlayState::Paused;
            debug!("Autoplay paused");
        }
    }

    fn step(&mut self, delta: isize) {
        let len = self.cursor_len();
        if len == 0 {
            return;
        }
        self.current_index = wrap(self.current_index, delta, len);
        if self.config.mode == FilterMode::CategoryTabs {
            self.filter = Filter::from_tab(&self.tabs[self.current_index]);
        }
        self.progress_key += 1;
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    let wrapped = (index as isize + delta).rem_euclid(len) as usize;
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        id: &'static str,
        category: &'static str,
    }

    impl ContentItem for Card {
        fn id(&self) -> &str {
            self.id
        }
        fn category(&self) -> &str {
            self.category
        }
    }

    fn card(id: &'static str, category: &'static str) -> Card {
        Card { id, category }
    }

    fn abc() -> PresentationController<Card> {
        PresentationController::new(
            vec![card("A", "web"), card("B", "ml"), card("C", "web")],
            PresentationConfig::PROJECTS,
        )
    }

    fn playing() -> PresentationController<Card> {
        let mut c = abc();
        c.enter_view();
        c
    }

    fn epoch(c: &PresentationController<Card>) -> u64 {
        c.armed().expect("interval should be armed").epoch
    }

    #[test]
    fn test_starts_idle_without_timer() {
        let c = abc();
        assert_eq!(c.state(), PlayState::Idle);
        assert!(c.is_auto_playing());
        assert!(!c.is_presentation_mode());
        assert_eq!(c.armed(), None);
    }

    #[test]
    fn test_enter_view_arms_once() {
        let mut c = abc();
        c.enter_view();
        assert_eq!(c.state(), PlayState::AutoPlaying);
        let first = c.armed().unwrap();
        assert_eq!(first.period, Duration::from_secs(3));

        c.enter_view();
        assert_eq!(c.armed(), Some(first), "second visibility report is a no-op");
    }

    #[test]
    fn test_ticks_advance_modulo_length() {
        let mut c = playing();
        let e = epoch(&c);
        for k in 1..=7 {
            c.tick(e);
            assert_eq!(c.current_index(), k % 3);
        }
    }

    #[test]
    fn test_autoplay_scenario_abc() {
        let mut c = playing();
        let e = epoch(&c);
        c.tick(e); // t = 3s
        assert_eq!(c.current().map(|x| x.id), Some("B"));
        c.tick(e); // t = 6s
        c.tick(e); // t = 9s
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_single_item_never_arms() {
        let mut c = PresentationController::new(vec![card("A", "web")], PresentationConfig::PROJECTS);
        c.enter_view();
        assert_eq!(c.state(), PlayState::AutoPlaying);
        assert_eq!(c.armed(), None);
        c.tick(c.epoch);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_pause_stops_ticks_until_resume() {
        let mut c = playing();
        let e = epoch(&c);
        c.toggle_autoplay();
        assert_eq!(c.state(), PlayState::Paused);
        assert_eq!(c.armed(), None);

        c.tick(e);
        assert_eq!(c.current_index(), 0);

        c.toggle_autoplay();
        let resumed = epoch(&c);
        assert_ne!(resumed, e, "resume arms a fresh interval");
        c.tick(e);
        assert_eq!(c.current_index(), 0, "old interval's tick is stale");
        c.tick(resumed);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_clicking_item_pauses() {
        let mut c = playing();
        let clicked = c.activate_current().map(|x| x.id);
        assert_eq!(clicked, Some("A"));
        assert_eq!(c.state(), PlayState::Paused);
        assert!(!c.is_auto_playing());
    }

    #[test]
    fn test_pause_before_view_is_sticky() {
        let mut c = abc();
        c.toggle_autoplay();
        c.enter_view();
        assert_eq!(c.state(), PlayState::Paused);
        assert_eq!(c.armed(), None);
        assert!(c.is_presentation_mode());
    }

    #[test]
    fn test_presentation_mode_survives_pause() {
        let mut c = playing();
        assert!(c.is_presentation_mode());
        c.toggle_autoplay();
        assert_eq!(c.state(), PlayState::Paused);
        assert!(c.is_presentation_mode());
        c.activate_current();
        assert!(c.is_presentation_mode());
    }

    #[test]
    fn test_manual_navigation_keeps_state() {
        let mut c = playing();
        c.toggle_autoplay();
        c.next();
        c.next();
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.state(), PlayState::Paused);
        c.previous();
        c.previous();
        c.previous();
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_progress_key_moves_with_cursor() {
        let mut c = playing();
        let k0 = c.progress_key();
        c.tick(epoch(&c));
        let k1 = c.progress_key();
        c.next();
        let k2 = c.progress_key();
        assert!(k0 < k1 && k1 < k2);
    }

    #[test]
    fn test_filter_change_resets_index_and_rearms() {
        let mut c = playing();
        let e = epoch(&c);
        c.next();
        c.next();
        c.set_filter(Filter::Category("web".into()));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.cursor_len(), 2);
        assert_ne!(epoch(&c), e);

        c.tick(e);
        assert_eq!(c.current_index(), 0, "tick armed for the old list is ignored");
    }

    #[test]
    fn test_filter_to_single_or_empty_stays_in_bounds() {
        let mut c = playing();
        c.next();
        c.next();
        c.set_filter(Filter::Category("ml".into()));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.cursor_len(), 1);
        assert_eq!(c.armed(), None);

        c.set_filter(Filter::Category("mobile".into()));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current(), None);
        c.next();
        c.previous();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_index_always_valid_across_random_walk() {
        let mut c = playing();
        let filters = [
            Filter::All,
            Filter::Category("web".into()),
            Filter::Category("ml".into()),
            Filter::Category("none".into()),
        ];
        for step in 0..200usize {
            match step % 5 {
                0 => c.set_filter(filters[step % filters.len()].clone()),
                1 | 2 => c.next(),
                3 => c.previous(),
                _ => {
                    if let Some(armed) = c.armed() {
                        c.tick(armed.epoch);
                    }
                }
            }
            let len = c.cursor_len();
            assert!(c.current_index() < len || (len == 0 && c.current_index() == 0));
        }
    }

    fn skills() -> PresentationController<Card> {
        PresentationController::new(
            vec![
                card("py", "programming"),
                card("tf", "ai-ml"),
                card("rs", "programming"),
                card("git", "tools"),
            ],
            PresentationConfig::SKILLS,
        )
    }

    #[test]
    fn test_tabs_mode_cycles_categories() {
        let mut c = skills();
        c.enter_view();
        assert_eq!(c.cursor_len(), 4);
        let e = epoch(&c);

        c.tick(e);
        assert_eq!(c.filter(), &Filter::Category("programming".into()));
        assert_eq!(c.filtered().len(), 2);
        c.tick(e);
        c.tick(e);
        assert_eq!(c.filter().as_tab(), "tools");
        c.tick(e);
        assert_eq!(c.filter(), &Filter::All);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_tabs_mode_select_category_pauses_and_positions() {
        let mut c = skills();
        c.enter_view();
        c.select_category("ai-ml");
        assert_eq!(c.state(), PlayState::Paused);
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.filter().as_tab(), "ai-ml");

        c.select_category("cooking");
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.filter(), &Filter::All);
    }

    #[test]
    fn test_cycle_filter_wraps_in_items_mode() {
        let mut c = abc();
        c.cycle_filter(-1);
        assert_eq!(c.filter().as_tab(), "ml");
        c.cycle_filter(1);
        assert_eq!(c.filter(), &Filter::All);
        assert_eq!(c.state(), PlayState::Idle, "filter tabs do not pause items mode");
    }
}
