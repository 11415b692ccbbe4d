//! Reusable widgets shared by the page sections.

pub mod help_menu;
pub mod interactive_widget;
pub mod intro;
pub mod navigation;
pub mod page;
pub mod particles;
pub mod progress;
pub mod status_bar;
pub mod theme;

use std::time::Instant;

pub use crossterm::event::KeyEvent;
use crossterm::event::MouseEvent;
pub use interactive_widget::{InteractiveComponent, InteractiveStatefulWidget};
use ratatui::buffer::{Buffer, Cell};
use theme::Palette;

#[derive(Debug, Clone, Copy)]
pub enum KeyMouseEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// Per-frame input handed to every section before it renders.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub palette: Palette,
    /// Fraction of the section inside the viewport.
    pub visible: f32,
    /// The section is the one taking keyboard input.
    pub focused: bool,
    pub now: Instant,
}

/// Buffer contents as text, one line per row.
pub fn buffer_text(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width.max(1));
    buf.content()
        .chunks(width)
        .map(|row| row.iter().map(Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
