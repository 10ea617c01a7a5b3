use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Trailing `(details)` group, e.g. `"Station (Pad 3)"`
static DETAILS_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\(([^)]+)\)\s*$").expect("valid location regex"));

/// A location split into its display name and optional detail suffix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub details: Option<String>,
}

impl Location {
    /// Parse a raw location string. Never fails; an empty input yields an
    /// empty name.
    pub fn parse(raw: &str) -> Self {
        match DETAILS_SUFFIX.captures(raw) {
            Some(caps) => Self {
                name: caps[1].trim().to_string(),
                details: Some(caps[2].trim().to_string()),
            },
            None => Self {
                name: raw.trim().to_string(),
                details: None,
            },
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.name, details),
            None => f.write_str(&self.name),
        }
    }
}

/// Normalised display label for a raw location string
pub fn location_label(raw: &str) -> String {
    Location::parse(raw).to_string()
}
