use std::{error::Error as StdError, fmt, io, path::PathBuf, result::Result as StdResult};

#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidTheme(String),
    ContentNotFound { path: PathBuf },
    SettingsNotFound { path: PathBuf },
    DuplicateId { section: &'static str, id: String },
    EmptyField { section: &'static str, field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTheme(value) => {
                write!(f, "Unknown theme `{value}` (expected `theatrical` or `tech`)")
            }
            Self::ContentNotFound { path } => {
                writeln!(f, "Content file not found: {}", path.display())?;
                writeln!(f)?;
                writeln!(f, "Pass --content with a JSON document containing")?;
                write!(
                    f,
                    "`profile`, `projects`, `certificates`, `experience` and `skills`."
                )
            }
            Self::SettingsNotFound { path } => {
                write!(f, "Settings file not found: {}", path.display())
            }
            Self::DuplicateId { section, id } => {
                write!(f, "Duplicate id `{id}` in `{section}`")
            }
            Self::EmptyField { section, field } => {
                write!(f, "Entry in `{section}` has an empty `{field}`")
            }
        }
    }
}

impl StdError for ConfigError {}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
    Delivery(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Config(e) => write!(f, "Config error: {e}"),
            Self::Delivery(msg) => write!(f, "Delivery failed: {msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Delivery(_) => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = StdResult<T, Error>;
