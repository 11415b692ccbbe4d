//! Loading and checking the content document.

use std::{collections::HashSet, fs, path::Path};

use tracing::info;

use super::{ContentItem, Portfolio};
use crate::error::{ConfigError, Result};

const EMBEDDED: &str = include_str!("../../data/portfolio.json");

/// Parse the content document compiled into the binary.
pub fn load_embedded() -> Result<Portfolio> {
    let portfolio: Portfolio = serde_json::from_str(EMBEDDED)?;
    check(portfolio)
}

/// Load content from `path`, or the embedded document when `None`.
pub fn load(path: Option<&Path>) -> Result<Portfolio> {
    let Some(path) = path else {
        return load_embedded();
    };
    if !path.exists() {
        return Err(ConfigError::ContentNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let text = fs::read_to_string(path)?;
    let portfolio: Portfolio = serde_json::from_str(&text)?;
    info!(path = %path.display(), "Loaded content");
    check(portfolio)
}

fn check(portfolio: Portfolio) -> Result<Portfolio> {
    check_section("projects", &portfolio.projects)?;
    check_section("certificates", &portfolio.certificates)?;
    check_section("experience", &portfolio.experience)?;
    check_section("skills", &portfolio.skills)?;
    Ok(portfolio)
}

fn check_section<T: ContentItem>(section: &'static str, items: &[T]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if item.id().trim().is_empty() {
            return Err(ConfigError::EmptyField {
                section,
                field: "id",
            }
            .into());
        }
        if item.category().trim().is_empty() {
            return Err(ConfigError::EmptyField {
                section,
                field: "category",
            }
            .into());
        }
        if !seen.insert(item.id()) {
            return Err(ConfigError::DuplicateId {
                section,
                id: item.id().to_string(),
            }
            .into());
        }
    }
    Ok(())
}
