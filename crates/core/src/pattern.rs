use crate::metadata::CaptureDate;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::{self, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PATTERN: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("date pattern is empty")]
    Empty,
    #[error("invalid date pattern: {0}")]
    Invalid(String),
    #[error("date pattern would produce a path separator: {0}")]
    PathSeparator(String),
}

/// A strftime-style pattern that is known to render for any capture date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern(String);

impl DatePattern {
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        if input.is_empty() {
            return Err(PatternError::Empty);
        }
        if StrftimeItems::new(input).any(|item| matches!(item, Item::Error)) {
            return Err(PatternError::Invalid(input.to_string()));
        }

        // Specifiers such as %z need data a naive date lacks and only fail at render time.
        let mut rendered = String::new();
        write!(rendered, "{}", sample_date().format(input))
            .map_err(|_| PatternError::Invalid(input.to_string()))?;
        if rendered.contains(['/', '\\']) {
            return Err(PatternError::PathSeparator(input.to_string()));
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn render(&self, date: &CaptureDate) -> String {
        date.format(&self.0).to_string()
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self(DEFAULT_PATTERN.to_string())
    }
}

impl FromStr for DatePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn format_name(date: &CaptureDate, extension_with_dot: &str, pattern: &DatePattern) -> String {
    format!("{}{}", pattern.render(date), extension_with_dot)
}

/// The extension exactly as written, with its leading dot, or empty.
/// `None` when the extension is not valid UTF-8 and so cannot be carried over unchanged.
pub fn extension_with_dot(path: &Path) -> Option<String> {
    match path.extension() {
        None => Some(String::new()),
        Some(ext) => ext.to_str().map(|ext| format!(".{}", ext)),
    }
}

fn sample_date() -> CaptureDate {
    NaiveDate::from_ymd_opt(2000, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap_or_default()
}
