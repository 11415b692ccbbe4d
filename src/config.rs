//! Settings file and default locations.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    state::ThemeMode,
};

const APP_DIR: &str = "folio";

/// Default settings file: `<config dir>/folio/config.json`.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.json")
}

/// Spool file the contact form appends to.
pub fn default_outbox_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("outbox.jsonl")
}

pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("folio.log")
}

/// Values read from the settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Content document; the embedded one when unset.
    pub content: Option<PathBuf>,
    pub outbox: Option<PathBuf>,
    pub theme: Option<ThemeMode>,
    pub skip_intro: bool,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Read settings from `path`, or from [`settings_path`] when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (settings_path(), false),
        };
        if !path.exists() {
            if explicit {
                return Err(ConfigError::SettingsNotFound { path }.into());
            }
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply command-line overrides on top of file values.
    #[must_use]
    pub fn merge(mut self, overrides: Overrides) -> Self {
        if overrides.content.is_some() {
            self.content = overrides.content;
        }
        if overrides.theme.is_some() {
            self.theme = overrides.theme;
        }
        self.skip_intro |= overrides.skip_intro;
        self
    }

    pub fn outbox_path(&self) -> PathBuf {
        self.outbox.clone().unwrap_or_else(default_outbox_path)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub content: Option<PathBuf>,
    pub theme: Option<ThemeMode>,
    pub skip_intro: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::SettingsNotFound { .. })
        ));
    }

    #[test]
    fn test_file_values_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"theme": "tech", "outbox": "/tmp/out.jsonl", "content": "a.json"}"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.theme, Some(ThemeMode::Tech));
        assert_eq!(settings.outbox_path(), PathBuf::from("/tmp/out.jsonl"));
        assert!(!settings.skip_intro);

        let merged = settings.merge(Overrides {
            content: Some("b.json".into()),
            theme: None,
            skip_intro: true,
        });
        assert_eq!(merged.content, Some(PathBuf::from("b.json")));
        assert_eq!(merged.theme, Some(ThemeMode::Tech));
        assert!(merged.skip_intro);
        assert!(merged.log_path().ends_with("folio/folio.log"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"colour": "red"}"#).unwrap();
        assert!(matches!(Settings::load(Some(&path)), Err(Error::Json(_))));
    }
}
