//! How each kind of content record is drawn on a carousel slide.

use ratatui::{
    style::Modifier,
    text::{Line, Span},
};

use super::carousel::CAROUSEL_KEYBINDINGS;
use crate::{
    content::{Certificate, ContentItem, Experience, Project, Skill},
    state::{assets::AssetChain, PresentationConfig, SectionId},
    tui::widgets::theme::{hex_color, Palette},
};

/// A content record that can be shown by a [`super::Carousel`].
pub trait Card: ContentItem {
    const SECTION: SectionId;
    /// Section heading.
    const TITLE: &'static str;
    const CONFIG: PresentationConfig;
    const KEYBINDINGS: &'static [(&'static str, &'static str)] = CAROUSEL_KEYBINDINGS;

    fn heading(&self) -> &str;

    /// Compact slide body.
    fn slide(&self, palette: &Palette) -> Vec<Line<'static>>;

    /// Full record, shown in the detail view.
    fn detail(&self, palette: &Palette) -> Vec<Line<'static>> {
        self.slide(palette)
    }

    /// One-line entry when the carousel lists a whole category.
    fn row(&self, palette: &Palette) -> Line<'static> {
        Line::styled(self.heading().to_string(), palette.body())
    }
}

fn field(label: &'static str, value: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), palette.muted()),
        Span::styled(value.to_string(), palette.body()),
    ])
}

fn tags<'a>(items: impl IntoIterator<Item = &'a String>, palette: &Palette) -> Line<'static> {
    let spans: Vec<Span<'static>> = items
        .into_iter()
        .flat_map(|t| {
            [
                Span::styled(format!("[{t}]"), palette.title().remove_modifier(Modifier::BOLD)),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

fn featured(is_featured: bool, palette: &Palette) -> Option<Line<'static>> {
    is_featured.then(|| Line::styled("★ Featured", palette.title()))
}

fn image(chain: AssetChain<'_>, palette: &Palette) -> Line<'static> {
    Line::styled(format!("◩ {}", chain.resolve().display()), palette.muted())
}

impl Card for Project {
    const SECTION: SectionId = SectionId::Projects;
    const TITLE: &'static str = "Featured Projects";
    const CONFIG: PresentationConfig = PresentationConfig::PROJECTS;

    fn heading(&self) -> &str {
        &self.title
    }

    fn slide(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = featured(self.featured, palette).into_iter().collect();
        lines.extend([
            Line::styled(self.title.clone(), palette.title()),
            Line::styled(self.category.clone(), palette.muted()),
            Line::default(),
            Line::styled(self.description.clone(), palette.body()),
            Line::default(),
            tags(&self.technologies, palette),
        ]);
        lines
    }

    fn detail(&self, palette: &Palette) -> Vec<Line<'static>> {
        let body = if self.long_description.is_empty() {
            &self.description
        } else {
            &self.long_description
        };
        let mut lines = vec![
            Line::styled(self.title.clone(), palette.title()),
            Line::default(),
            Line::styled(body.clone(), palette.body()),
            Line::default(),
            tags(&self.technologies, palette),
            Line::default(),
        ];
        let links = [
            ("GitHub", &self.links.github),
            ("Live", &self.links.live),
            ("Demo", &self.links.demo),
        ];
        lines.extend(
            links
                .into_iter()
                .filter_map(|(label, url)| url.as_deref().map(|url| field(label, url, palette))),
        );
        let primary = self.images.first().map(String::as_str);
        let fallback = self.images.get(1).map(String::as_str);
        lines.push(image(
            AssetChain::new(primary, &self.title).with_fallback(fallback),
            palette,
        ));
        lines
    }
}

impl Card for Certificate {
    const SECTION: SectionId = SectionId::Certificates;
    const TITLE: &'static str = "Certificates";
    const CONFIG: PresentationConfig = PresentationConfig::CERTIFICATES;

    fn heading(&self) -> &str {
        &self.title
    }

    fn slide(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = featured(self.featured, palette).into_iter().collect();
        lines.extend([
            Line::styled(self.title.clone(), palette.title()),
            Line::styled(format!("{} · {}", self.issuer, self.date), palette.muted()),
            Line::default(),
            Line::styled(self.description.clone(), palette.body()),
        ]);
        lines
    }

    fn detail(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = self.slide(palette);
        lines.push(Line::default());
        if !self.credential_id.is_empty() {
            lines.push(field("Credential", &self.credential_id, palette));
        }
        if !self.verification_url.is_empty() {
            lines.push(field("Verify", &self.verification_url, palette));
        }
        let source = (!self.image.is_empty()).then_some(self.image.as_str());
        lines.push(image(AssetChain::new(source, &self.title), palette));
        lines
    }
}

impl Card for Experience {
    const SECTION: SectionId = SectionId::Experience;
    const TITLE: &'static str = "Experience";
    const CONFIG: PresentationConfig = PresentationConfig::EXPERIENCE;

    fn heading(&self) -> &str {
        &self.role
    }

    fn slide(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{}  ", self.year), palette.title()),
                Span::styled(self.role.clone(), palette.title()),
            ]),
            Line::styled(self.organization.clone(), palette.muted()),
        ];
        if !self.supervisor.is_empty() {
            lines.push(field("Supervisor", &self.supervisor, palette));
        }
        lines.extend([
            Line::default(),
            Line::styled(self.description.clone(), palette.body()),
        ]);
        lines
    }

    fn detail(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = self.slide(palette);
        lines.push(Line::default());
        let primary = self.images.first().map(String::as_str);
        let fallback = self.images.get(1).map(String::as_str);
        lines.push(image(
            AssetChain::new(primary, &self.organization).with_fallback(fallback),
            palette,
        ));
        lines
    }
}

/// Width of the proficiency bar in cells.
const BAR_WIDTH: usize = 20;

fn proficiency_bar(level: u8) -> (String, String) {
    let filled = usize::from(level.min(100)) * BAR_WIDTH / 100;
    ("█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

impl Card for Skill {
    const SECTION: SectionId = SectionId::Skills;
    const TITLE: &'static str = "Skills";
    const CONFIG: PresentationConfig = PresentationConfig::SKILLS;
    const KEYBINDINGS: &'static [(&'static str, &'static str)] = &[
        ("h/l", "category"),
        ("space", "play/pause"),
        ("Enter", "details"),
    ];

    fn heading(&self) -> &str {
        &self.name
    }

    fn slide(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled(format!("{} {}", self.icon, self.name), palette.title()),
            Line::styled(self.category.clone(), palette.muted()),
        ];
        if let Some(level) = self.proficiency {
            lines.push(field("Proficiency", &format!("{level}%"), palette));
        }
        lines
    }

    fn row(&self, palette: &Palette) -> Line<'static> {
        let color = hex_color(&self.color, palette.primary);
        let mut spans = vec![Span::styled(
            format!("{:<2} {:<18}", self.icon, self.name),
            palette.body(),
        )];
        if let Some(level) = self.proficiency {
            let (filled, empty) = proficiency_bar(level);
            spans.extend([
                Span::styled(filled, palette.body().fg(color)),
                Span::styled(empty, palette.muted()),
                Span::styled(format!(" {level:>3}%"), palette.muted()),
            ]);
        }
        Line::from(spans)
    }
}
