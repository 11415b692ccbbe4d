//! Application state for the TUI.

use std::{sync::Arc, time::Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    Frame,
};
use tracing::{debug, info};

use super::{
    sections::{keybindings, AboutSection, Carousel, ContactSection, HeroSection},
    widgets::{
        help_menu::{HelpMenu, HelpMenuWidget},
        intro::{IntroView, IntroWidget},
        navigation::{NavBar, NavBarWidget},
        page::{blit, page_buffer, section_area},
        status_bar::{StatusBar, StatusBarWidget, StatusInfo},
        theme::Palette,
        FrameContext, InteractiveComponent, InteractiveStatefulWidget, KeyMouseEvent,
    },
};
use crate::{
    content::{Certificate, Experience, Portfolio, Project, Skill},
    state::{
        Delivery, DeliveryReport, IntroPhase, IntroSequencer, IntroSignal, PlayState, Scheduler,
        SectionId, ThemeCoordinator, ThemeMode, Viewport,
    },
};

/// Rows scrolled per mouse wheel notch.
const WHEEL_STEP: i32 = 3;

/// Everything that reaches the UI loop from timers and background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A carousel's autoplay interval fired.
    Tick { section: SectionId, epoch: u64 },
    Intro(IntroSignal),
    Delivery(DeliveryReport),
}

impl From<IntroSignal> for AppEvent {
    fn from(signal: IntroSignal) -> Self {
        Self::Intro(signal)
    }
}

impl From<DeliveryReport> for AppEvent {
    fn from(report: DeliveryReport) -> Self {
        Self::Delivery(report)
    }
}

/// Startup options resolved from the command line and settings file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub theme: ThemeMode,
    pub skip_intro: bool,
}

struct Intro {
    sequencer: IntroSequencer,
    view: IntroView,
}

type SectionComponent = dyn InteractiveComponent<Input = FrameContext, Event = KeyMouseEvent>;

/// Application state.
pub struct App {
    /// Whether app should exit.
    pub should_exit: bool,
    theme: ThemeCoordinator,
    viewport: Viewport,
    /// Screen area the page was last drawn into.
    page_area: Rect,
    scheduler: Scheduler<AppEvent>,
    /// Present until the intro sequence reports completion.
    intro: Option<Intro>,
    hero: HeroSection,
    about: AboutSection,
    projects: Carousel<Project>,
    certificates: Carousel<Certificate>,
    experience: Carousel<Experience>,
    skills: Carousel<Skill>,
    contact: ContactSection,
    nav: NavBar,
    help: HelpMenu,
    status: StatusBar,
}

impl App {
    /// Build the page. Starts the intro timers unless skipped, so this must
    /// run inside a tokio runtime.
    pub fn new(
        portfolio: Portfolio,
        options: AppOptions,
        delivery: Arc<dyn Delivery>,
        scheduler: Scheduler<AppEvent>,
    ) -> Self {
        let now = Instant::now();
        let theme = ThemeCoordinator::with_mode(options.theme);
        let profile = portfolio.profile;

        let intro = (!options.skip_intro).then(|| Intro {
            sequencer: IntroSequencer::start(&scheduler),
            view: IntroView::new(&profile.name, &profile.tagline, profile.photo.as_deref(), now),
        });
        let initials: String = profile
            .name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .collect();

        Self {
            should_exit: false,
            hero: HeroSection::new(&profile, &theme, now),
            nav: NavBar::new(&initials),
            theme,
            viewport: Viewport::default(),
            page_area: Rect::default(),
            intro,
            about: AboutSection::new(profile.clone()),
            projects: Carousel::new(portfolio.projects),
            certificates: Carousel::new(portfolio.certificates),
            experience: Carousel::new(portfolio.experience),
            skills: Carousel::new(portfolio.skills),
            contact: ContactSection::new(profile, delivery, scheduler.clone()),
            scheduler,
            help: HelpMenu::default(),
            status: StatusBar::default(),
        }
    }

    pub const fn theme(&self) -> &ThemeCoordinator {
        &self.theme
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn projects(&self) -> &Carousel<Project> {
        &self.projects
    }

    pub const fn skills(&self) -> &Carousel<Skill> {
        &self.skills
    }

    pub const fn contact(&self) -> &ContactSection {
        &self.contact
    }

    /// Phase of the intro, or `None` once the page is showing.
    pub fn intro_phase(&self) -> Option<IntroPhase> {
        self.intro.as_ref().map(|intro| intro.sequencer.phase())
    }

    /// Section receiving keyboard input.
    pub fn focused(&self) -> SectionId {
        self.viewport.most_visible()
    }

    /// Handle an event from a timer or background task.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick { section, epoch } => match section {
                SectionId::Projects => self.projects.tick(epoch),
                SectionId::Certificates => self.certificates.tick(epoch),
                SectionId::Experience => self.experience.tick(epoch),
                SectionId::Skills => self.skills.tick(epoch),
                SectionId::Hero | SectionId::About | SectionId::Contact => {
                    debug!(%section, "Tick for a section without a carousel");
                }
            },
            AppEvent::Intro(signal) => {
                let Some(intro) = self.intro.as_mut() else {
                    return;
                };
                if intro.sequencer.handle(signal, &self.scheduler) {
                    info!("Intro finished");
                    self.intro = None;
                }
            }
            AppEvent::Delivery(report) => self.contact.apply_report(report),
        }
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => {}
        }
    }

    /// Per-frame animation step.
    pub fn on_frame(&mut self) {
        if self.intro.is_none() {
            self.hero.animate();
        }
    }

    /// Bring every carousel's interval in line with its controller.
    pub fn sync_timers(&mut self) {
        self.projects.sync_timer(&self.scheduler);
        self.certificates.sync_timer(&self.scheduler);
        self.experience.sync_timer(&self.scheduler);
        self.skills.sync_timer(&self.scheduler);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }
        if HelpMenuWidget::handle_event(&mut self.help, key) {
            return;
        }
        if self.intro.is_some() {
            if key.code == KeyCode::Char('q') {
                self.should_exit = true;
            }
            return;
        }
        if self
            .section_mut(self.focused())
            .handle_event(KeyMouseEvent::Key(key))
        {
            return;
        }

        let page = i32::from(self.viewport.height());
        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char('?') => self.help.toggle(),
            KeyCode::Char('t') => self.theme.toggle_theme(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let target = c
                    .to_digit(10)
                    .and_then(|d| (d as usize).checked_sub(1))
                    .and_then(SectionId::from_index);
                if let Some(section) = target {
                    self.jump_to(section);
                }
            }
            KeyCode::Tab => self.jump_to(self.focused().next()),
            KeyCode::BackTab => self.jump_to(self.focused().prev()),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.jump_to(SectionId::Hero),
            KeyCode::Char('G') | KeyCode::End => self.jump_to(SectionId::Contact),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.intro.is_some() {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            _ => {
                if NavBarWidget::handle_event(&mut self.nav, mouse) {
                    if let Some(section) = self.nav.take_clicked() {
                        self.jump_to(section);
                    }
                } else {
                    self.click_page(mouse);
                }
            }
        }
    }

    /// Hand a click inside the page to the section under it, in page
    /// coordinates.
    fn click_page(&mut self, mouse: MouseEvent) {
        let area = self.page_area;
        if !area.contains(Position::new(mouse.column, mouse.row)) {
            return;
        }
        let row = mouse.row - area.y + self.viewport.offset();
        let Some(section) = self.viewport.section_at(row) else {
            return;
        };
        let translated = MouseEvent {
            column: mouse.column - area.x,
            row,
            ..mouse
        };
        self.section_mut(section)
            .handle_event(KeyMouseEvent::Mouse(translated));
    }

    fn jump_to(&mut self, section: SectionId) {
        self.viewport.scroll_to(section);
        self.theme.set_current_section(section.as_str());
    }

    fn scroll_by(&mut self, rows: i32) {
        self.viewport.scroll_by(rows);
        self.theme
            .set_current_section(self.viewport.most_visible().as_str());
    }

    fn section_mut(&mut self, id: SectionId) -> &mut SectionComponent {
        match id {
            SectionId::Hero => &mut self.hero,
            SectionId::About => &mut self.about,
            SectionId::Projects => &mut self.projects,
            SectionId::Certificates => &mut self.certificates,
            SectionId::Experience => &mut self.experience,
            SectionId::Skills => &mut self.skills,
            SectionId::Contact => &mut self.contact,
        }
    }

    fn play_state(&self, id: SectionId) -> Option<PlayState> {
        match id {
            SectionId::Projects => Some(self.projects.controller().state()),
            SectionId::Certificates => Some(self.certificates.controller().state()),
            SectionId::Experience => Some(self.experience.controller().state()),
            SectionId::Skills => Some(self.skills.controller().state()),
            SectionId::Hero | SectionId::About | SectionId::Contact => None,
        }
    }

    /// Render the UI.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let now = Instant::now();
        let palette = Palette::from_theme(&self.theme.theme());

        if let Some(intro) = self.intro.as_mut() {
            let phase = intro.sequencer.phase();
            IntroWidget::update_state(&mut intro.view, (palette, phase, now));
            frame.render_stateful_widget(IntroWidget, area, &mut intro.view);
            return;
        }

        let [nav_area, page_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.viewport.resize(page_area.height);
        self.page_area = page_area;
        let focused = self.focused();
        self.theme.set_current_section(focused.as_str());

        let mut page = page_buffer(&self.viewport, page_area.width);
        for id in SectionId::ALL {
            let ctx = FrameContext {
                palette,
                visible: self.viewport.visible_fraction(id),
                focused: id == focused,
                now,
            };
            let target = section_area(&self.viewport, id, page_area.width);
            let section = self.section_mut(id);
            section.update(ctx);
            if ctx.visible > 0.0 {
                section.render(target, &mut page);
            }
        }
        blit(&page, self.viewport.offset(), page_area, frame.buffer_mut());

        let current = self.theme.current_section().to_string();
        NavBarWidget::update_state(&mut self.nav, (palette, current));
        frame.render_stateful_widget(NavBarWidget, nav_area, &mut self.nav);

        let info = StatusInfo {
            palette,
            section: focused,
            keybindings: keybindings(focused),
            play: self.play_state(focused),
        };
        StatusBarWidget::update_state(&mut self.status, info);
        frame.render_stateful_widget(StatusBarWidget, status_area, &mut self.status);

        HelpMenuWidget::update_state(&mut self.help, (palette, keybindings(focused)));
        frame.render_stateful_widget(HelpMenuWidget, page_area, &mut self.help);
    }
}
