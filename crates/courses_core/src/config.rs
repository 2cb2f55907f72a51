//! Catalog configuration threaded into services at construction.
//!
//! # Invariants
//! - `page_size > 0`.
//! - `default_semester` parses as a term id, with no surrounding whitespace.
//! - `default_language` is a non-blank locale tag, with no surrounding
//!   whitespace.

use crate::calendar::Semester;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_SEMESTER: &str = "20153";
pub const DEFAULT_LANGUAGE: &str = "is";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Process-wide catalog defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Term used when a query omits the semester.
    pub default_semester: String,
    /// Locale tag of `CourseTemplate::name`; any other language gets the
    /// English name.
    pub default_language: String,
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_semester: DEFAULT_SEMESTER.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if Semester::parse(&self.default_semester).is_none() {
            return Err(ConfigError::InvalidSemester(self.default_semester.clone()));
        }
        if self.default_language.trim().is_empty() {
            return Err(ConfigError::BlankLanguage);
        }
        if self.default_language.trim() != self.default_language {
            return Err(ConfigError::PaddedLanguage(self.default_language.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroPageSize,
    InvalidSemester(String),
    BlankLanguage,
    PaddedLanguage(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPageSize => write!(f, "page_size must be greater than zero"),
            Self::InvalidSemester(value) => {
                write!(f, "default_semester `{value}` is not a valid term id")
            }
            Self::BlankLanguage => write!(f, "default_language must not be blank"),
            Self::PaddedLanguage(value) => {
                write!(f, "default_language `{value}` has surrounding whitespace")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, ConfigError};

    #[test]
    fn defaults_are_valid() {
        let config = CatalogConfig::default();
        assert_eq!(config.default_semester, "20153");
        assert_eq!(config.default_language, "is");
        assert_eq!(config.page_size, 10);
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn rejects_zero_page_size() {
        let config = CatalogConfig {
            page_size: 0,
            ..CatalogConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageSize));
    }

    #[test]
    fn rejects_bad_semester_and_blank_language() {
        let config = CatalogConfig {
            default_semester: "fall".to_string(),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSemester(_))
        ));

        let config = CatalogConfig {
            default_language: "  ".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BlankLanguage));
    }

    #[test]
    fn rejects_padded_semester_and_language() {
        let config = CatalogConfig {
            default_semester: " 20153 ".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSemester(" 20153 ".to_string()))
        );

        let config = CatalogConfig {
            default_language: "is ".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PaddedLanguage("is ".to_string()))
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: CatalogConfig = serde_json::from_str(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.default_semester, "20153");
    }
}
