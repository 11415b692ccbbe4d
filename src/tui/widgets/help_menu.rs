//! Help menu overlay.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};

use super::{theme::Palette, InteractiveStatefulWidget, KeyEvent};

pub const GLOBAL_KEYBINDINGS: &[(&str, &str)] = &[
    ("1-7", "jump to section"),
    ("Tab", "next section"),
    ("j/k", "scroll"),
    ("PgUp/Dn", "scroll a page"),
    ("t", "toggle theme"),
    ("?", "close help"),
    ("q", "quit"),
];

/// State for the help menu widget.
#[derive(Debug)]
pub struct HelpMenu {
    visible: bool,
    palette: Option<Palette>,
    section: &'static [(&'static str, &'static str)],
}

impl Default for HelpMenu {
    fn default() -> Self {
        Self {
            visible: false,
            palette: None,
            section: &[],
        }
    }
}

impl HelpMenu {
    pub const fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// Widget for rendering the help menu overlay.
pub struct HelpMenuWidget;

impl StatefulWidget for HelpMenuWidget {
    type State = HelpMenu;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let (true, Some(palette)) = (state.visible, state.palette) else {
            return;
        };

        let rows = GLOBAL_KEYBINDINGS.len()
            + state.section.len()
            + usize::from(!state.section.is_empty());
        let width = 34u16.min(area.width);
        let height = (rows as u16 + 2).min(area.height);
        let x = area.x + area.width.saturating_sub(width + 1);
        let y = area.y + area.height.saturating_sub(height + 1);
        let popup_area = Rect::new(x, y, width, height);

        Clear.render(popup_area, buf);

        let block = Block::bordered()
            .title(" Help ")
            .border_style(palette.border(true));

        let key_style = palette.title();
        let line = |(key, desc): &(&str, &str)| {
            Line::from(vec![
                Span::styled(format!("{key:>8}"), key_style),
                Span::styled(format!("  {desc}"), palette.body()),
            ])
        };
        let mut help_lines: Vec<Line> = state.section.iter().map(line).collect();
        if !help_lines.is_empty() {
            help_lines.push(Line::styled("  ──", palette.muted()));
        }
        help_lines.extend(GLOBAL_KEYBINDINGS.iter().map(line));

        Paragraph::new(help_lines)
            .block(block)
            .render(popup_area, buf);
    }
}

impl InteractiveStatefulWidget for HelpMenuWidget {
    /// Palette plus the focused section's own bindings.
    type Input = (Palette, &'static [(&'static str, &'static str)]);
    type Event = KeyEvent;

    fn update_state(state: &mut Self::State, (palette, section): Self::Input) {
        state.palette = Some(palette);
        state.section = section;
    }

    fn handle_event(state: &mut Self::State, event: Self::Event) -> bool {
        if !state.visible {
            return false;
        }

        match event.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                state.visible = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::{state::Theme, tui::widgets::buffer_text};

    #[test]
    fn test_hidden_menu_ignores_keys() {
        let mut menu = HelpMenu::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!HelpMenuWidget::handle_event(&mut menu, esc));

        menu.toggle();
        assert!(HelpMenuWidget::handle_event(&mut menu, esc));
        assert!(!HelpMenuWidget::handle_event(&mut menu, esc), "closed by the first Esc");
    }

    #[test]
    fn test_renders_section_and_global_bindings() {
        let mut menu = HelpMenu::default();
        menu.toggle();
        let palette = Palette::from_theme(&Theme::default());
        HelpMenuWidget::update_state(&mut menu, (palette, &[("space", "play/pause")]));

        let area = Rect::new(0, 0, 50, 20);
        let mut buf = Buffer::empty(area);
        HelpMenuWidget.render(area, &mut buf, &mut menu);

        let text = buffer_text(&buf);
        assert!(text.contains("play/pause"));
        assert!(text.contains("toggle theme"));
    }
}
