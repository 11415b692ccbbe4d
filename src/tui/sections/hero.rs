//! Landing section: name, rotating role line and the particle field.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::Section;
use crate::{
    content::Profile,
    state::{SectionId, ThemeCoordinator},
    tui::widgets::{particles::ParticleField, FrameContext, InteractiveComponent, KeyMouseEvent},
};

/// How long each role stays up, typing included.
const ROLE_CYCLE: Duration = Duration::from_secs(3);
const TYPE_STEP: Duration = Duration::from_millis(80);

/// Role shown `elapsed` after mount, typed out one character per step.
pub fn typed_role(roles: &[String], elapsed: Duration) -> String {
    if roles.is_empty() {
        return String::new();
    }
    let cycle = ROLE_CYCLE.as_millis();
    let elapsed = elapsed.as_millis();
    let role = &roles[(elapsed / cycle) as usize % roles.len()];
    let typed = ((elapsed % cycle) / TYPE_STEP.as_millis()) as usize + 1;
    role.chars().take(typed).collect()
}

/// File name of a backdrop URL, without the query string.
fn backdrop_label(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

pub struct HeroSection {
    name: String,
    tagline: String,
    roles: Vec<String>,
    started: Instant,
    particles: ParticleField,
    ctx: Option<FrameContext>,
}

impl HeroSection {
    pub fn new(profile: &Profile, theme: &ThemeCoordinator, now: Instant) -> Self {
        Self {
            name: profile.name.clone(),
            tagline: profile.tagline.clone(),
            roles: profile.roles.clone(),
            started: now,
            particles: ParticleField::new(theme.subscribe(), theme.style_variables()),
            ctx: None,
        }
    }

    /// Advance the background animation by one frame.
    pub fn animate(&mut self) {
        self.particles.advance();
    }
}

impl InteractiveComponent for HeroSection {
    type Input = FrameContext;
    type Event = KeyMouseEvent;

    fn update(&mut self, ctx: FrameContext) {
        self.ctx = Some(ctx);
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let Some(ctx) = self.ctx else {
            return;
        };
        let palette = ctx.palette;
        buf.set_style(area, palette.body().bg(palette.surface));
        (&self.particles).render(area, buf);

        let role = typed_role(&self.roles, ctx.now.saturating_duration_since(self.started));
        let lines = vec![
            Line::styled(self.name.clone(), palette.title()),
            Line::default(),
            Line::styled(format!("{role}▌"), palette.body().fg(palette.accent)),
            Line::default(),
            Line::styled(self.tagline.clone(), palette.muted()),
            Line::default(),
            Line::styled("j / PgDn to explore", palette.muted()),
        ];
        let [text] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        Paragraph::new(lines).centered().render(text, buf);

        let [_, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        Line::styled(
            format!("backdrop: {} ", backdrop_label(palette.mode.background_video())),
            palette.muted(),
        )
        .right_aligned()
        .render(footer, buf);
    }
}

impl Section for HeroSection {
    const ID: SectionId = SectionId::Hero;
    const KEYBINDINGS: &'static [(&'static str, &'static str)] = &[];
}
