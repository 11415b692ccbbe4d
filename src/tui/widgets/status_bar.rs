//! Status bar with keybindings and playback status.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use super::{theme::Palette, InteractiveStatefulWidget};
use crate::state::{PlayState, SectionId};

/// What the bar shows this frame.
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo {
    pub palette: Palette,
    pub section: SectionId,
    pub keybindings: &'static [(&'static str, &'static str)],
    pub play: Option<PlayState>,
}

#[derive(Debug, Default)]
pub struct StatusBar {
    info: Option<StatusInfo>,
}

pub struct StatusBarWidget;

impl StatefulWidget for StatusBarWidget {
    type State = StatusBar;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        const GLOBAL: &[(&str, &str)] = &[("?", "help"), ("t", "theme"), ("q", "quit")];

        let Some(info) = state.info else {
            return;
        };
        let palette = info.palette;

        let separator = Span::styled(" │ ", palette.muted());
        let keybind_spans = info
            .keybindings
            .iter()
            .chain(GLOBAL)
            .enumerate()
            .flat_map(|(i, (key, desc))| {
                let prefix = (i > 0).then(|| separator.clone());
                prefix.into_iter().chain([
                    Span::styled(*key, palette.title()),
                    Span::styled(format!(": {desc}"), palette.body()),
                ])
            });

        let status = match info.play {
            Some(PlayState::AutoPlaying) => "▶ auto",
            Some(PlayState::Paused) => "❚❚ paused",
            Some(PlayState::Idle) | None => "",
        };
        let right = Span::styled(
            format!("{status} [{}] {} ", info.section.label(), palette.mode),
            palette.muted(),
        );

        let [left_area, right_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(right.width() as u16),
        ])
        .areas(area);

        Paragraph::new(Line::from(keybind_spans.collect::<Vec<_>>())).render(left_area, buf);
        Paragraph::new(right).render(right_area, buf);
    }
}

impl InteractiveStatefulWidget for StatusBarWidget {
    type Input = StatusInfo;
    type Event = ();

    fn update_state(state: &mut Self::State, input: Self::Input) {
        state.info = Some(input);
    }
}
