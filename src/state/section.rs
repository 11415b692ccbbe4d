//! Page sections and navigation entries.

use std::{fmt, str::FromStr};

/// Known page sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Projects,
    Certificates,
    Experience,
    Skills,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl SectionId {
    pub const ALL: [Self; 7] = [
        Self::Hero,
        Self::About,
        Self::Projects,
        Self::Certificates,
        Self::Experience,
        Self::Skills,
        Self::Contact,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Certificates => "certificates",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    /// Navigation label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Certificates => "Certificates",
            Self::Experience => "Experience",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Cycle to the next section.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous section.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        for section in SectionId::ALL {
            assert_eq!(section.as_str().parse::<SectionId>(), Ok(section));
        }
        assert!("footer".parse::<SectionId>().is_err());
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(SectionId::Contact.next(), SectionId::Hero);
        assert_eq!(SectionId::Hero.prev(), SectionId::Contact);
        assert_eq!(SectionId::from_index(2), Some(SectionId::Projects));
        assert_eq!(SectionId::from_index(7), None);
    }
}
