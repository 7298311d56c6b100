//! Catalog load errors
//!
//! A load fails in exactly one of three ways: the catalog could not be
//! fetched, it was not valid JSON, or it did not have the expected shape.

use thiserror::Error;

/// Structural problem found by the validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid catalog at '{path}': {reason}")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `sites[2].tags[0]`
    pub path: String,
    /// What was expected
    pub reason: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// The three kinds of load failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    Network,
    Parse,
    Validation,
}

impl LoadErrorKind {
    /// Stable identifier used in JSON output and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadErrorKind::Network => "NETWORK_ERROR",
            LoadErrorKind::Parse => "PARSE_ERROR",
            LoadErrorKind::Validation => "VALIDATION_ERROR",
        }
    }
}

impl std::fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while loading a catalog or a content resource
#[derive(Error, Debug)]
pub enum LoadError {
    /// Transport failure, unreadable file, or non-success HTTP status
    #[error("Failed to fetch '{location}'{}: {message}", status_suffix(.status))]
    Network {
        location: String,
        status: Option<u16>,
        message: String,
    },

    /// Body is not valid JSON
    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON parsed but has the wrong shape
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    pub(crate) fn network(location: impl Into<String>, message: impl std::fmt::Display) -> Self {
        LoadError::Network {
            location: location.into(),
            status: None,
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Network { .. } => LoadErrorKind::Network,
            LoadError::Parse(_) => LoadErrorKind::Parse,
            LoadError::Validation(_) => LoadErrorKind::Validation,
        }
    }

    /// HTTP status, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Message suitable for end users
    ///
    /// Only the kind of failure is exposed; details belong in the log.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            LoadErrorKind::Network => {
                "Could not reach the site catalog. Check your connection and try again."
            }
            LoadErrorKind::Parse => "The site catalog is corrupted and could not be read.",
            LoadErrorKind::Validation => "The site catalog has an unexpected format.",
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = LoadError::network("data/sites.json", "No such file");
        assert_eq!(err.kind(), LoadErrorKind::Network);
        assert_eq!(err.status(), None);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LoadError::from(json_err);
        assert_eq!(err.kind(), LoadErrorKind::Parse);

        let err = LoadError::from(ValidationError::new("config", "expected object"));
        assert_eq!(err.kind(), LoadErrorKind::Validation);
    }

    #[test]
    fn test_network_display_includes_status() {
        let err = LoadError::Network {
            location: "https://example.com/sites.json".to_string(),
            status: Some(404),
            message: "Not Found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("HTTP 404"));
        assert!(msg.contains("https://example.com/sites.json"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_validation_display_names_path() {
        let err = LoadError::from(ValidationError::new(
            "config.siteTitle",
            "expected string",
        ));
        let msg = err.to_string();
        assert!(msg.contains("config.siteTitle"));
        assert!(msg.contains("expected string"));
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = LoadError::from(ValidationError::new("sites[3].id", "expected integer"));
        assert!(!err.user_message().contains("sites[3]"));
        assert_eq!(err.kind().to_string(), "VALIDATION_ERROR");
    }
}
