//! Visual theme and active-section coordination.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use super::section::SectionId;
use crate::error::ConfigError;

const GOLD: &str = "#FFD700";
const CYAN: &str = "#00F5FF";
const SPOTLIGHT_VIDEO: &str = "https://cdn.pixabay.com/vimeo/356372759/spotlight-38840.mp4?width=1280";
const MATRIX_VIDEO: &str = "https://cdn.pixabay.com/vimeo/409711865/matrix-42195.mp4?width=1280";

/// One of the two visual identities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Theatrical,
    Tech,
}

impl ThemeMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Theatrical => Self::Tech,
            Self::Tech => Self::Theatrical,
        }
    }

    /// Primary (and particle) color for this mode.
    pub const fn primary_color(self) -> &'static str {
        match self {
            Self::Theatrical => GOLD,
            Self::Tech => CYAN,
        }
    }

    pub const fn background_video(self) -> &'static str {
        match self {
            Self::Theatrical => SPOTLIGHT_VIDEO,
            Self::Tech => MATRIX_VIDEO,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Theatrical => "theatrical",
            Self::Tech => "tech",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theatrical" => Ok(Self::Theatrical),
            "tech" => Ok(Self::Tech),
            _ => Err(ConfigError::InvalidTheme(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: u32,
    pub speed: f32,
    pub color: String,
    pub connections: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub primary_color: String,
    pub background_video: String,
    pub particle_config: ParticleConfig,
}

impl Default for Theme {
    fn default() -> Self {
        let mode = ThemeMode::default();
        Self {
            mode,
            primary_color: mode.primary_color().to_string(),
            background_video: mode.background_video().to_string(),
            particle_config: ParticleConfig {
                count: 50,
                speed: 1.0,
                color: mode.primary_color().to_string(),
                connections: true,
            },
        }
    }
}

impl Theme {
    /// The theme after a toggle. Only the mode-dependent fields change.
    fn toggled(&self) -> Self {
        let mode = self.mode.toggled();
        Self {
            mode,
            primary_color: mode.primary_color().to_string(),
            background_video: mode.background_video().to_string(),
            particle_config: ParticleConfig {
                color: mode.primary_color().to_string(),
                ..self.particle_config.clone()
            },
        }
    }
}

/// Style values published for the imperative drawing surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleVariables {
    pub primary_color: String,
    pub particle_color: String,
}

impl StyleVariables {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            primary_color: theme.primary_color.clone(),
            particle_color: theme.particle_config.color.clone(),
        }
    }
}

/// Owner of the session-wide theme and the active navigation section.
///
/// Renderers receive it by reference and treat it as read-only. The theme is
/// broadcast over a `watch` channel so long-lived drawing state (the particle
/// canvas) can follow toggles without holding a reference to the coordinator.
pub struct ThemeCoordinator {
    theme: watch::Sender<Theme>,
    style: watch::Sender<StyleVariables>,
    current_section: String,
}

impl Default for ThemeCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeCoordinator {
    pub fn new() -> Self {
        let theme = Theme::default();
        let style = StyleVariables::from_theme(&theme);
        Self {
            theme: watch::Sender::new(theme),
            style: watch::Sender::new(style),
            current_section: SectionId::Hero.as_str().to_string(),
        }
    }

    /// Coordinator whose theme starts in `mode`.
    pub fn with_mode(mode: ThemeMode) -> Self {
        let mut coordinator = Self::new();
        if mode != coordinator.mode() {
            coordinator.toggle_theme();
        }
        coordinator
    }

    pub fn theme(&self) -> Theme {
        self.theme.borrow().clone()
    }

    pub fn mode(&self) -> ThemeMode {
        self.theme.borrow().mode
    }

    pub fn toggle_theme(&mut self) {
        let next = self.theme.borrow().toggled();
        debug!(mode = %next.mode, color = %next.primary_color, "Theme toggled");
        self.style.send_replace(StyleVariables::from_theme(&next));
        self.theme.send_replace(next);
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    pub fn style_variables(&self) -> watch::Receiver<StyleVariables> {
        self.style.subscribe()
    }

    pub fn current_section(&self) -> &str {
        &self.current_section
    }

    /// Any identifier is accepted; unknown ones simply match no nav entry.
    pub fn set_current_section(&mut self, id: &str) {
        if id.parse::<SectionId>().is_err() {
            debug!(id, "Current section set to an unknown id");
        }
        if self.current_section != id {
            self.current_section = id.to_string();
        }
    }
}
