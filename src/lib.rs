//! Terminal portfolio: a stacked page of sections with theme-driven autoplay
//! carousels, an intro sequence and a contact form.

pub mod config;
pub mod content;
pub mod error;
pub mod state;
pub mod tui;
