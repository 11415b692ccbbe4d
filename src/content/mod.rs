//! Static portfolio content: the records shown by each section.

mod load;

pub use load::{load, load_embedded};
use serde::{Deserialize, Serialize};

/// A displayable record with a stable identity and a filter category.
pub trait ContentItem {
    fn id(&self) -> &str;
    fn category(&self) -> &str;
    fn featured(&self) -> bool {
        false
    }
}

/// Category predicate narrowing a content list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Build a filter from a tab label, where `all` means no filtering.
    pub fn from_tab(tab: &str) -> Self {
        if tab == ALL {
            Self::All
        } else {
            Self::Category(tab.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }

    pub fn as_tab(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Category(c) => c,
        }
    }
}

/// Tab label for the unfiltered view.
pub const ALL: &str = "all";

/// Stable-order subsequence of `items` accepted by `filter`.
pub fn filter_items<'a, T: ContentItem>(items: &'a [T], filter: &Filter) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| filter.matches(item.category()))
        .collect()
}

/// `all` followed by every distinct category in first-seen order.
pub fn category_tabs<T: ContentItem>(items: &[T]) -> Vec<String> {
    let mut tabs = vec![ALL.to_string()];
    for item in items {
        if !tabs.iter().any(|t| t == item.category()) {
            tabs.push(item.category().to_string());
        }
    }
    tabs
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub live: Option<String>,
    pub demo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub credential_id: String,
    #[serde(default)]
    pub verification_url: String,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub organization: String,
    #[serde(default)]
    pub supervisor: String,
    pub year: u16,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub icon: String,
    /// Brand color as `#RRGGBB`.
    #[serde(default)]
    pub color: String,
    /// Self-assessed proficiency, 0-100.
    #[serde(default)]
    pub proficiency: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Biographical text for the hero, about and contact sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub socials: Vec<Link>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// The whole content document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Item counts of one section, overall and per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub section: &'static str,
    pub total: usize,
    pub categories: Vec<(String, usize)>,
}

impl SectionSummary {
    fn of<T: ContentItem>(section: &'static str, items: &[T]) -> Self {
        let categories = category_tabs(items)
            .into_iter()
            .skip(1)
            .map(|tab| {
                let count = filter_items(items, &Filter::from_tab(&tab)).len();
                (tab, count)
            })
            .collect();
        Self {
            section,
            total: items.len(),
            categories,
        }
    }
}

impl Portfolio {
    pub fn summary(&self) -> Vec<SectionSummary> {
        vec![
            SectionSummary::of("projects", &self.projects),
            SectionSummary::of("certificates", &self.certificates),
            SectionSummary::of("experience", &self.experience),
            SectionSummary::of("skills", &self.skills),
        ]
    }
}

impl ContentItem for Project {
    fn id(&self) -> &str {
        &self.id
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn featured(&self) -> bool {
        self.featured
    }
}

impl ContentItem for Certificate {
    fn id(&self) -> &str {
        &self.id
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn featured(&self) -> bool {
        self.featured
    }
}

impl ContentItem for Experience {
    fn id(&self) -> &str {
        &self.id
    }
    fn category(&self) -> &str {
        &self.category
    }
}

impl ContentItem for Skill {
    fn id(&self) -> &str {
        &self.id
    }
    fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, &'static str);

    impl ContentItem for Item {
        fn id(&self) -> &str {
            self.0
        }
        fn category(&self) -> &str {
            self.1
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item("a", "web"),
            Item("b", "ml"),
            Item("c", "web"),
            Item("d", "research"),
        ]
    }

    #[test]
    fn test_filter_all_keeps_everything_in_order() {
        let items = items();
        let ids: Vec<_> = filter_items(&items, &Filter::All)
            .iter()
            .map(|i| i.id())
            .collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_filter_category_is_stable_subsequence() {
        let items = items();
        let ids: Vec<_> = filter_items(&items, &Filter::Category("web".into()))
            .iter()
            .map(|i| i.id())
            .collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(items.len(), 4, "source list must not change");
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let items = items();
        assert!(filter_items(&items, &Filter::Category("mobile".into())).is_empty());
    }

    #[test]
    fn test_category_tabs_first_seen_order() {
        assert_eq!(category_tabs(&items()), ["all", "web", "ml", "research"]);
    }

    #[test]
    fn test_filter_tab_round_trip() {
        assert_eq!(Filter::from_tab("all"), Filter::All);
        assert_eq!(Filter::from_tab("ml").as_tab(), "ml");
    }

    #[test]
    fn test_summary_counts_categories() {
        let portfolio = Portfolio {
            skills: vec![
                Skill {
                    id: "rust".into(),
                    category: "programming".into(),
                    ..Skill::default()
                },
                Skill {
                    id: "git".into(),
                    category: "tools".into(),
                    ..Skill::default()
                },
                Skill {
                    id: "python".into(),
                    category: "programming".into(),
                    ..Skill::default()
                },
            ],
            ..Portfolio::default()
        };
        let summary = portfolio.summary();
        assert_eq!(summary[0].total, 0);
        let skills = &summary[3];
        assert_eq!(skills.section, "skills");
        assert_eq!(skills.total, 3);
        assert_eq!(
            skills.categories,
            [("programming".to_string(), 2), ("tools".to_string(), 1)]
        );
    }
}
