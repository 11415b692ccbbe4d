//! Image/video source resolution with fallbacks.

use std::path::Path;

/// Where a displayed asset ended up coming from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAsset {
    Remote(String),
    Local(String),
    /// Nothing usable; render a generated label instead.
    Placeholder(String),
}

impl ResolvedAsset {
    pub fn display(&self) -> &str {
        match self {
            Self::Remote(s) | Self::Local(s) | Self::Placeholder(s) => s,
        }
    }

    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Primary source, then fallback, then a placeholder built from `title`.
#[derive(Debug, Clone, Copy)]
pub struct AssetChain<'a> {
    pub primary: Option<&'a str>,
    pub fallback: Option<&'a str>,
    pub title: &'a str,
}

impl<'a> AssetChain<'a> {
    pub const fn new(primary: Option<&'a str>, title: &'a str) -> Self {
        Self {
            primary,
            fallback: None,
            title,
        }
    }

    #[must_use]
    pub const fn with_fallback(mut self, fallback: Option<&'a str>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn resolve(&self) -> ResolvedAsset {
        [self.primary, self.fallback]
            .into_iter()
            .flatten()
            .find_map(try_source)
            .unwrap_or_else(|| ResolvedAsset::Placeholder(placeholder(self.title)))
    }
}

fn try_source(source: &str) -> Option<ResolvedAsset> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }
    if source.starts_with("https://") || source.starts_with("http://") {
        return Some(ResolvedAsset::Remote(source.to_string()));
    }
    Path::new(source)
        .exists()
        .then(|| ResolvedAsset::Local(source.to_string()))
}

/// Initials of up to the first two words, e.g. `[ AR ]`.
fn placeholder(title: &str) -> String {
    let initials: String = title
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "[ ? ]".to_string()
    } else {
        format!("[ {initials} ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_primary_wins() {
        let chain = AssetChain::new(Some("https://cdn.example.com/a.jpg"), "Alpha")
            .with_fallback(Some("https://cdn.example.com/b.jpg"));
        assert_eq!(
            chain.resolve(),
            ResolvedAsset::Remote("https://cdn.example.com/a.jpg".into())
        );
    }

    #[test]
    fn test_missing_local_falls_back() {
        let chain = AssetChain::new(Some("assets/definitely-missing.png"), "Alpha")
            .with_fallback(Some("http://mirror.example.com/a.png"));
        assert_eq!(
            chain.resolve(),
            ResolvedAsset::Remote("http://mirror.example.com/a.png".into())
        );
    }

    #[test]
    fn test_existing_local_file_resolves() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        let chain = AssetChain::new(Some(&path), "Alpha");
        assert_eq!(chain.resolve(), ResolvedAsset::Local(path.clone()));
    }

    #[test]
    fn test_placeholder_from_title() {
        let resolved = AssetChain::new(Some("  "), "theatrical portfolio site").resolve();
        assert!(resolved.is_placeholder());
        assert_eq!(resolved.display(), "[ TP ]");
        assert_eq!(AssetChain::new(None, "").resolve().display(), "[ ? ]");
    }
}
