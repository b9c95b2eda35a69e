//! Configured content source.

use serde::{Deserialize, Serialize};

const UNNAMED_SOURCE: &str = "unnamed source";

/// A content category matched by keyword, with an ordered endpoint list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Trigger keywords.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Endpoint URLs, tried in order.
    #[serde(default)]
    pub apis: Vec<String>,
}

impl Source {
    /// Creates a named source.
    #[must_use]
    pub fn new(name: impl Into<String>, keywords: Vec<String>, apis: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            keywords,
            apis,
        }
    }

    /// Returns the display name, falling back to a placeholder.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_SOURCE)
    }

    /// Returns true if the endpoint list is non-empty.
    ///
    /// Blank entries still count here; they are skipped when the list is walked.
    #[must_use]
    pub fn has_endpoints(&self) -> bool {
        !self.apis.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let source = Source::default();
        assert_eq!(source.display_name(), "unnamed source");

        let blank = Source {
            name: Some("  ".to_string()),
            ..Source::default()
        };
        assert_eq!(blank.display_name(), "unnamed source");

        let named = Source::new("cats", vec![], vec![]);
        assert_eq!(named.display_name(), "cats");
    }

    #[test]
    fn test_blank_apis_still_count_as_configured() {
        let source = Source::new("cats", vec![], vec![String::new(), "   ".to_string()]);
        assert!(source.has_endpoints());
        assert!(!Source::new("cats", vec![], vec![]).has_endpoints());
    }
}
