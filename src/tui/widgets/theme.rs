//! Colors and styles derived from the active theme.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use crate::state::{Theme, ThemeMode};

/// Parse `#RRGGBB`, falling back to `fallback` on anything else.
pub fn hex_color(hex: &str, fallback: Color) -> Color {
    Color::from_str(hex).unwrap_or(fallback)
}

/// Resolved colors for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeMode,
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub surface: Color,
}

impl Palette {
    pub const ERROR: Color = Color::Rgb(255, 99, 99);
    pub const SUCCESS: Color = Color::Rgb(80, 220, 120);

    pub fn from_theme(theme: &Theme) -> Self {
        let primary = hex_color(&theme.primary_color, Color::Yellow);
        match theme.mode {
            ThemeMode::Theatrical => Self {
                mode: theme.mode,
                primary,
                accent: Color::Rgb(178, 34, 52),
                text: Color::Rgb(245, 235, 220),
                dim: Color::Rgb(130, 110, 95),
                surface: Color::Rgb(28, 12, 14),
            },
            ThemeMode::Tech => Self {
                mode: theme.mode,
                primary,
                accent: Color::Rgb(0, 255, 65),
                text: Color::Rgb(220, 240, 245),
                dim: Color::Rgb(90, 120, 130),
                surface: Color::Rgb(8, 18, 26),
            },
        }
    }

    pub const fn title(&self) -> Style {
        Style::new().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub const fn body(&self) -> Style {
        Style::new().fg(self.text)
    }

    pub const fn muted(&self) -> Style {
        Style::new().fg(self.dim)
    }

    pub const fn highlight(&self) -> Style {
        Style::new()
            .fg(self.surface)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub const fn border(&self, focused: bool) -> Style {
        if focused {
            Style::new().fg(self.primary)
        } else {
            Style::new().fg(self.dim)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ThemeCoordinator;

    #[test]
    fn test_palette_follows_toggle() {
        let mut coordinator = ThemeCoordinator::new();
        let gold = Palette::from_theme(&coordinator.theme());
        assert_eq!(gold.primary, Color::Rgb(255, 215, 0));

        coordinator.toggle_theme();
        let cyan = Palette::from_theme(&coordinator.theme());
        assert_eq!(cyan.primary, Color::Rgb(0, 245, 255));
        assert_eq!(cyan.mode, ThemeMode::Tech);
    }

    #[test]
    fn test_bad_hex_uses_fallback() {
        assert_eq!(hex_color("gold-ish", Color::Red), Color::Red);
    }
}
