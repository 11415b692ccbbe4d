//! Top navigation bar with one entry per section.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::Span,
    widgets::{StatefulWidget, Widget},
};

use super::{theme::Palette, InteractiveStatefulWidget};
use crate::state::SectionId;

/// A clickable nav entry.
#[derive(Debug, Clone, Copy)]
pub struct NavRegion {
    pub area: Rect,
    pub section: SectionId,
}

#[derive(Debug, Default)]
pub struct NavBar {
    palette: Option<Palette>,
    /// Raw id from the theme coordinator; may match no entry.
    current: String,
    brand: String,
    regions: Vec<NavRegion>,
    /// Section picked by the last click, taken by the app.
    clicked: Option<SectionId>,
}

impl NavBar {
    pub fn new(brand: &str) -> Self {
        Self {
            brand: brand.to_string(),
            ..Self::default()
        }
    }

    pub fn take_clicked(&mut self) -> Option<SectionId> {
        self.clicked.take()
    }
}

pub struct NavBarWidget;

impl StatefulWidget for NavBarWidget {
    type State = NavBar;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.regions.clear();
        let Some(palette) = state.palette else {
            return;
        };

        buf.set_style(area, palette.body().bg(palette.surface));
        let brand = Span::styled(format!(" {} ", state.brand), palette.title());
        let mut x = area.x + brand.width() as u16;
        brand.render(area, buf);

        for (i, section) in SectionId::ALL.into_iter().enumerate() {
            let label = format!(" {} {} ", i + 1, section.label());
            let width = label.chars().count() as u16;
            if x + width > area.right() {
                break;
            }
            let style = if state.current == section.as_str() {
                palette.highlight()
            } else {
                palette.muted()
            };
            let entry = Rect::new(x, area.y, width, 1);
            Span::styled(label, style).render(entry, buf);
            state.regions.push(NavRegion {
                area: entry,
                section,
            });
            x += width;
        }
    }
}

impl InteractiveStatefulWidget for NavBarWidget {
    type Input = (Palette, String);
    type Event = MouseEvent;

    fn update_state(state: &mut Self::State, (palette, current): Self::Input) {
        state.palette = Some(palette);
        state.current = current;
    }

    fn handle_event(state: &mut Self::State, event: Self::Event) -> bool {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        let at = Position::new(event.column, event.row);
        let hit = state.regions.iter().find(|r| r.area.contains(at));
        state.clicked = hit.map(|r| r.section);
        state.clicked.is_some()
    }
}
