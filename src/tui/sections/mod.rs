//! The stacked page sections.

mod about;
pub mod cards;
mod carousel;
mod contact;
mod hero;

pub use about::AboutSection;
pub use carousel::Carousel;
pub use contact::ContactSection;
pub use hero::HeroSection;

use crate::{
    content::{Certificate, Experience, Project, Skill},
    state::SectionId,
    tui::widgets::{FrameContext, InteractiveComponent, KeyMouseEvent},
};

/// A page section: one viewport tall, fed a [`FrameContext`] every frame.
pub trait Section: InteractiveComponent<Input = FrameContext, Event = KeyMouseEvent> {
    const ID: SectionId;

    /// Section-specific keybindings as (key, description) pairs.
    const KEYBINDINGS: &'static [(&'static str, &'static str)];
}

/// Keybindings of the section with `id`.
pub const fn keybindings(id: SectionId) -> &'static [(&'static str, &'static str)] {
    match id {
        SectionId::Hero => HeroSection::KEYBINDINGS,
        SectionId::About => AboutSection::KEYBINDINGS,
        SectionId::Projects => Carousel::<Project>::KEYBINDINGS,
        SectionId::Certificates => Carousel::<Certificate>::KEYBINDINGS,
        SectionId::Experience => Carousel::<Experience>::KEYBINDINGS,
        SectionId::Skills => Carousel::<Skill>::KEYBINDINGS,
        SectionId::Contact => ContactSection::KEYBINDINGS,
    }
}
