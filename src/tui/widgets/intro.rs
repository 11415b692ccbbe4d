//! Full-screen intro overlay: the name spelled out, then the portrait card.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, StatefulWidget, Widget},
};

use super::{theme::Palette, InteractiveStatefulWidget};
use crate::state::{assets::AssetChain, IntroPhase};

/// Delay between revealed letters of the name.
const LETTER_STEP: Duration = Duration::from_millis(120);

/// Render state of the overlay.
#[derive(Debug)]
pub struct IntroView {
    name: String,
    tagline: String,
    photo: Option<String>,
    phase: IntroPhase,
    phase_started: Instant,
    now: Instant,
    palette: Option<Palette>,
}

impl IntroView {
    pub fn new(name: &str, tagline: &str, photo: Option<&str>, now: Instant) -> Self {
        Self {
            name: name.to_string(),
            tagline: tagline.to_string(),
            photo: photo.map(str::to_string),
            phase: IntroPhase::Name,
            phase_started: now,
            now,
            palette: None,
        }
    }

    pub const fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Letters of the name shown so far, spaced out.
    fn revealed_name(&self) -> String {
        let elapsed = self.now.saturating_duration_since(self.phase_started);
        let shown = (elapsed.as_millis() / LETTER_STEP.as_millis()) as usize + 1;
        spaced(&self.name, shown)
    }
}

/// `"ALEX"` with `shown = 2` becomes `"A L"`.
fn spaced(text: &str, shown: usize) -> String {
    let letters: Vec<String> = text.chars().take(shown).map(String::from).collect();
    letters.join(" ")
}

pub struct IntroWidget;

impl StatefulWidget for IntroWidget {
    type State = IntroView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(palette) = state.palette else {
            return;
        };
        Clear.render(area, buf);
        buf.set_style(area, palette.body().bg(palette.surface));

        match state.phase {
            IntroPhase::Name => {
                let [row] = Layout::vertical([Constraint::Length(3)])
                    .flex(Flex::Center)
                    .areas(area);
                let lines = vec![
                    Line::styled(state.revealed_name(), palette.title()),
                    Line::default(),
                    Line::styled("presents", palette.muted()),
                ];
                Paragraph::new(lines).centered().render(row, buf);
            }
            IntroPhase::Photo | IntroPhase::Complete => {
                let [card] = Layout::vertical([Constraint::Length(9)])
                    .flex(Flex::Center)
                    .areas(area);
                let [card] = Layout::horizontal([Constraint::Length(40)])
                    .flex(Flex::Center)
                    .areas(card);

                let portrait = AssetChain::new(state.photo.as_deref(), &state.name).resolve();
                let style = if state.phase == IntroPhase::Complete {
                    palette.muted().add_modifier(Modifier::DIM)
                } else {
                    palette.body()
                };
                let lines = vec![
                    Line::default(),
                    Line::styled(portrait.display().to_string(), palette.title()),
                    Line::default(),
                    Line::styled(state.name.clone(), palette.title()),
                    Line::styled(state.tagline.clone(), style),
                ];
                Paragraph::new(lines)
                    .centered()
                    .block(
                        Block::bordered()
                            .border_type(BorderType::Double)
                            .border_style(palette.border(true)),
                    )
                    .render(card, buf);
            }
        }
    }
}

impl InteractiveStatefulWidget for IntroWidget {
    type Input = (Palette, IntroPhase, Instant);
    type Event = ();

    fn update_state(state: &mut Self::State, (palette, phase, now): Self::Input) {
        if phase != state.phase {
            state.phase = phase;
            state.phase_started = now;
        }
        state.now = now;
        state.palette = Some(palette);
    }
}
