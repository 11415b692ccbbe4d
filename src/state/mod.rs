//! Presentation state: theme, carousels, intro, viewport and contact form.
//!
//! Nothing in here draws. The TUI owns one instance of each piece and routes
//! terminal events and timer events into them on a single task.

pub mod assets;
pub mod contact;
pub mod delivery;
pub mod intro;
pub mod presentation;
pub mod schedule;
pub mod section;
pub mod theme;
pub mod visibility;

pub use contact::{ContactForm, ContactMessage, DeliveryReport, Field, FormErrors, SubmitStatus};
pub use delivery::{Delivery, Outbox};
pub use intro::{IntroPhase, IntroSequencer, IntroSignal};
pub use presentation::{FilterMode, PlayState, PresentationConfig, PresentationController};
pub use schedule::{Armed, IntervalSlot, Scheduler, TaskHandle};
pub use section::SectionId;
pub use theme::{ParticleConfig, StyleVariables, Theme, ThemeCoordinator, ThemeMode};
pub use visibility::{Viewport, VisibilityObserver};
