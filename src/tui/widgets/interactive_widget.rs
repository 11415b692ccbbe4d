//! Interactive widget traits extending ratatui's `StatefulWidget`.

use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};

/// Extension trait for `StatefulWidget` that adds state updates and event
/// handling.
///
/// ```ignore
/// struct MenuState { open: bool }
/// struct Menu;
///
/// impl StatefulWidget for Menu {
///     type State = MenuState;
///     fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) { /* ... */ }
/// }
///
/// impl InteractiveStatefulWidget for Menu {
///     type Input = bool;
///     type Event = KeyEvent;
///
///     fn update_state(state: &mut Self::State, open: bool) {
///         state.open = open;
///     }
/// }
/// ```
pub trait InteractiveStatefulWidget: StatefulWidget {
    /// Input data type for updating state.
    type Input;
    /// Event type for handling (use `()` for non-interactive widgets).
    type Event;

    fn update_state(state: &mut Self::State, input: Self::Input);

    /// Handle an event. Returns true if the event was consumed.
    fn handle_event(_state: &mut Self::State, _event: Self::Event) -> bool {
        false
    }
}

/// Self-contained component that owns its state and draws into a buffer.
///
/// Page sections implement this: they are drawn into an offscreen page
/// buffer that is larger than the terminal, so they take a [`Buffer`]
/// rather than a `Frame`.
pub trait InteractiveComponent {
    /// Per-frame input, delivered before every render.
    type Input;
    /// Event type for handling (use `()` for non-interactive components).
    type Event;

    fn update(&mut self, input: Self::Input);

    /// Handle an event. Returns true if the event was consumed.
    fn handle_event(&mut self, _event: Self::Event) -> bool {
        false
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer);
}
