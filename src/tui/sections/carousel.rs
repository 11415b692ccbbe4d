//! Autoplaying slideshow section over one content list.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Tabs, Widget, Wrap},
};
use tracing::info;

use super::{cards::Card, Section};
use crate::{
    state::{
        FilterMode, IntervalSlot, PlayState, PresentationController, Scheduler, SectionId,
        VisibilityObserver,
    },
    tui::{
        app::AppEvent,
        widgets::{
            progress::{render_progress, ProgressClock},
            theme::Palette,
            FrameContext, InteractiveComponent, KeyMouseEvent,
        },
    },
};

pub const CAROUSEL_KEYBINDINGS: &[(&str, &str)] = &[
    ("h/l", "prev/next"),
    ("space", "play/pause"),
    ("f/F", "filter"),
    ("Enter", "details"),
];

/// Cursor position plus the epoch of the armed interval, if any. The
/// progress bar restarts whenever either changes.
type SlideKey = (u64, Option<u64>);

/// A clickable filter tab, in page coordinates.
#[derive(Debug, Clone)]
struct TabRegion {
    area: Rect,
    tab: String,
}

/// A content list presented one slide at a time.
pub struct Carousel<T> {
    controller: PresentationController<T>,
    observer: VisibilityObserver,
    timer: IntervalSlot,
    progress: Option<ProgressClock<SlideKey>>,
    detail_open: bool,
    tab_regions: Vec<TabRegion>,
    body_area: Rect,
    ctx: Option<FrameContext>,
}

impl<T: Card> Carousel<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            controller: PresentationController::new(items, T::CONFIG),
            observer: VisibilityObserver::default(),
            timer: IntervalSlot::default(),
            progress: None,
            detail_open: false,
            tab_regions: Vec::new(),
            body_area: Rect::default(),
            ctx: None,
        }
    }

    pub const fn controller(&self) -> &PresentationController<T> {
        &self.controller
    }

    pub const fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    /// A firing of this section's autoplay interval.
    pub fn tick(&mut self, epoch: u64) {
        self.controller.tick(epoch);
    }

    /// Keep exactly the interval the controller asks for running.
    pub fn sync_timer(&mut self, scheduler: &Scheduler<AppEvent>) {
        let section = T::SECTION;
        self.timer
            .sync(self.controller.armed(), scheduler, move |epoch| AppEvent::Tick {
                section,
                epoch,
            });
    }

    /// Fill ratio of the progress bar at `now`, or `None` when no interval
    /// is armed.
    pub fn progress(&mut self, now: Instant) -> Option<f64> {
        let armed = self.controller.armed();
        let key = (self.controller.progress_key(), armed.map(|a| a.epoch));
        let interval = self.controller.interval();
        let clock = self
            .progress
            .get_or_insert_with(|| ProgressClock::new(key, now));
        let ratio = clock.ratio(key, now, interval);
        armed.map(|_| ratio)
    }

    fn open_detail(&mut self) {
        self.detail_open = self.controller.activate_current().is_some();
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.detail_open {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                self.detail_open = false;
                return true;
            }
            return false;
        }
        let tabs = self.controller.config().mode == FilterMode::CategoryTabs;
        match code {
            // Picking a category by hand counts as a tab click.
            KeyCode::Char('l') | KeyCode::Right if tabs => self.controller.cycle_filter(1),
            KeyCode::Char('h') | KeyCode::Left if tabs => self.controller.cycle_filter(-1),
            KeyCode::Char('l') | KeyCode::Right => self.controller.next(),
            KeyCode::Char('h') | KeyCode::Left => self.controller.previous(),
            KeyCode::Char(' ') => self.controller.toggle_autoplay(),
            KeyCode::Char('f') => self.controller.cycle_filter(1),
            KeyCode::Char('F') => self.controller.cycle_filter(-1),
            KeyCode::Enter => self.open_detail(),
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, mouse: MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        let at = Position::new(mouse.column, mouse.row);
        if self.detail_open {
            if self.body_area.contains(at) {
                self.detail_open = false;
                return true;
            }
            return false;
        }
        if let Some(region) = self.tab_regions.iter().find(|r| r.area.contains(at)) {
            let tab = region.tab.clone();
            self.controller.select_category(&tab);
            return true;
        }
        if self.body_area.contains(at) {
            self.open_detail();
            return true;
        }
        false
    }

    fn render_tabs(&mut self, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let tabs = self.controller.tabs();
        let selected = tabs
            .iter()
            .position(|t| t == self.controller.filter().as_tab())
            .unwrap_or(0);

        // Mirrors the Tabs layout: one space of padding each side, then a
        // one-column divider.
        self.tab_regions.clear();
        let mut x = area.x;
        for tab in tabs {
            if x >= area.right() {
                break;
            }
            let width = (Span::raw(tab.as_str()).width() as u16 + 2).min(area.right() - x);
            self.tab_regions.push(TabRegion {
                area: Rect::new(x, area.y, width, area.height),
                tab: tab.clone(),
            });
            x = x.saturating_add(width + 1);
        }

        Tabs::new(tabs.iter().map(String::as_str))
            .select(selected)
            .style(palette.muted())
            .highlight_style(palette.highlight())
            .divider(Span::styled("│", palette.muted()))
            .render(area, buf);
    }

    fn render_body(&self, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let filtered = self.controller.filtered();
        if filtered.is_empty() {
            Paragraph::new(Line::styled("Nothing here yet.", palette.muted())).render(area, buf);
            return;
        }

        let (lines, title) = match (self.detail_open, self.controller.config().mode) {
            (true, _) => {
                let lines = self
                    .controller
                    .current()
                    .map(|item| item.detail(palette))
                    .unwrap_or_default();
                (lines, " Details · Esc to close ")
            }
            (false, FilterMode::Items) => {
                let lines = self
                    .controller
                    .current()
                    .map(|item| item.slide(palette))
                    .unwrap_or_default();
                (lines, "")
            }
            (false, FilterMode::CategoryTabs) => {
                let lines = filtered.iter().map(|item| item.row(palette)).collect();
                (lines, "")
            }
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(palette.border(self.detail_open))
            .title(title);
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }

    fn render_footer(&self, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let len = self.controller.cursor_len();
        let current = self.controller.current_index();
        let mut spans: Vec<Span> = (0..len)
            .map(|i| {
                if i == current {
                    Span::styled("● ", palette.title())
                } else {
                    Span::styled("○ ", palette.muted())
                }
            })
            .collect();
        if len > 0 {
            spans.push(Span::styled(format!(" {}/{len}", current + 1), palette.muted()));
        }
        let state = match self.controller.state() {
            PlayState::AutoPlaying => "   ▶ playing",
            PlayState::Paused => "   ❚❚ paused",
            PlayState::Idle => "",
        };
        spans.push(Span::styled(state, palette.muted()));
        Paragraph::new(Line::from(spans)).centered().render(area, buf);
    }
}

impl<T: Card> InteractiveComponent for Carousel<T> {
    type Input = FrameContext;
    type Event = KeyMouseEvent;

    fn update(&mut self, ctx: FrameContext) {
        if self.observer.observe(ctx.visible) {
            info!(section = %T::SECTION, "Section entered view");
            self.controller.enter_view();
        }
        if !ctx.focused {
            self.detail_open = false;
        }
        self.ctx = Some(ctx);
    }

    fn handle_event(&mut self, event: KeyMouseEvent) -> bool {
        match event {
            KeyMouseEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
            KeyMouseEvent::Mouse(mouse) => self.handle_click(mouse),
            KeyMouseEvent::Key(_) => false,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let Some(ctx) = self.ctx else {
            return;
        };
        let palette = ctx.palette;

        let block = Block::bordered()
            .title(Line::styled(format!(" {} ", T::TITLE), palette.title()))
            .border_style(palette.border(ctx.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let [tabs, body, footer, progress] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_tabs(&palette, tabs, buf);
        self.body_area = body;
        self.render_body(&palette, body, buf);
        self.render_footer(&palette, footer, buf);

        if let Some(ratio) = self.progress(ctx.now) {
            render_progress(ratio, &palette, progress, buf);
        }
    }
}

impl<T: Card> Section for Carousel<T> {
    const ID: SectionId = T::SECTION;
    const KEYBINDINGS: &'static [(&'static str, &'static str)] = T::KEYBINDINGS;
}
