use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap},
};

use super::Section;
use crate::{
    content::{Profile, Stat},
    state::{assets::AssetChain, SectionId},
    tui::widgets::{theme::Palette, FrameContext, InteractiveComponent, KeyMouseEvent},
};

pub struct AboutSection {
    profile: Profile,
    ctx: Option<FrameContext>,
}

impl AboutSection {
    pub const fn new(profile: Profile) -> Self {
        Self { profile, ctx: None }
    }
}

fn render_stats(stats: &[Stat], palette: &Palette, area: Rect, buf: &mut Buffer) {
    if stats.is_empty() {
        return;
    }
    let cells = Layout::horizontal(stats.iter().map(|_| Constraint::Fill(1))).split(area);
    for (stat, cell) in stats.iter().zip(cells.iter()) {
        Paragraph::new(vec![
            Line::styled(stat.value.clone(), palette.title()),
            Line::styled(stat.label.clone(), palette.muted()),
        ])
        .centered()
        .block(Block::bordered().border_style(palette.border(false)))
        .render(*cell, buf);
    }
}

impl InteractiveComponent for AboutSection {
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

        let block = Block::bordered()
            .title(Line::styled(" About Me ", palette.title()))
            .border_style(palette.border(ctx.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let [top, stats] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).areas(inner);
        let [photo, text] =
            Layout::horizontal([Constraint::Length(20), Constraint::Fill(1)]).areas(top);

        let portrait =
            AssetChain::new(self.profile.photo.as_deref(), &self.profile.name).resolve();
        let label = if portrait.is_placeholder() {
            portrait.display().to_string()
        } else {
            "[ portrait ]".to_string()
        };
        Paragraph::new(vec![
            Line::default(),
            Line::styled(label, palette.title()),
            Line::default(),
            Line::styled(self.profile.location.clone(), palette.muted()),
        ])
        .centered()
        .block(
            Block::bordered()
                .border_type(BorderType::Double)
                .border_style(palette.border(false)),
        )
        .render(photo, buf);

        let paragraphs: Vec<Line> = self
            .profile
            .about
            .iter()
            .flat_map(|p| [Line::styled(p.clone(), palette.body()), Line::default()])
            .collect();
        Paragraph::new(paragraphs)
            .wrap(Wrap { trim: true })
            .block(Block::new().padding(Padding::horizontal(2)))
            .render(text, buf);

        render_stats(&self.profile.stats, &palette, stats, buf);
    }
}

impl Section for AboutSection {
    const ID: SectionId = SectionId::About;
    const KEYBINDINGS: &'static [(&'static str, &'static str)] = &[];
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::{content::load_embedded, state::Theme, tui::widgets::buffer_text};

    #[test]
    fn test_renders_about_and_stats() {
        let profile = load_embedded().unwrap().profile;
        let mut about = AboutSection::new(profile.clone());
        about.update(FrameContext {
            palette: Palette::from_theme(&Theme::default()),
            visible: 1.0,
            focused: false,
            now: Instant::now(),
        });

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        about.render(area, &mut buf);
        let text = buffer_text(&buf);

        assert!(text.contains("About Me"));
        for stat in &profile.stats {
            assert!(text.contains(&stat.value), "missing {}", stat.label);
        }
    }
}
