//! Error taxonomy for pipeline and service assembly.
//!
//! Everything except [`Error::Loader`] is a configuration error: the caller
//! is expected to abort bootstrap and fix the configuration. Loader errors
//! belong to the caller-supplied loader and are passed through untouched.

use thiserror::Error;

/// Error type returned by user-supplied service loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown class name `{class_name}` for entry `{entry}`")]
    UnknownKind { entry: String, class_name: String },

    #[error("options for entry `{entry}` must be a mapping, found {found}")]
    MalformedOptions { entry: String, found: &'static str },

    #[error("configuration key `{key}` must be a mapping or a list, found {found}")]
    MalformedTable { key: String, found: &'static str },

    #[error("conflicting declaration for entry `{entry}`")]
    ConflictingDeclaration { entry: String },

    #[error("configuration key `{key}` must be a boolean, found {found}")]
    InvalidFlag { key: String, found: &'static str },

    #[error(transparent)]
    Loader(BoxError),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for the errors caused by the configuration itself.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownKind { .. }
                | Self::MalformedOptions { .. }
                | Self::MalformedTable { .. }
                | Self::ConflictingDeclaration { .. }
                | Self::InvalidFlag { .. }
        )
    }

    /// Name of the configuration entry the error refers to, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::UnknownKind { entry, .. }
            | Self::MalformedOptions { entry, .. }
            | Self::ConflictingDeclaration { entry } => Some(entry),
            Self::MalformedTable { key, .. } | Self::InvalidFlag { key, .. } => Some(key),
            Self::Loader(_) | Self::Io(_) | Self::Json(_) => None,
        }
    }
}

/// Short name of a JSON value's type, used in error messages.
pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_kind_names_the_entry() {
        let err = Error::UnknownKind {
            entry: "Legacy".to_string(),
            class_name: "Nonexistent.Thing".to_string(),
        };
        assert!(err.is_configuration());
        assert_eq!(err.entry(), Some("Legacy"));
        assert!(err.to_string().contains("`Legacy`"));
        assert!(err.to_string().contains("Nonexistent.Thing"));
    }

    #[test]
    fn loader_error_is_transparent() {
        let source: BoxError = "database unavailable".into();
        let err = Error::Loader(source);
        assert!(!err.is_configuration());
        assert_eq!(err.entry(), None);
        assert_eq!(err.to_string(), "database unavailable");
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type(&json!(null)), "null");
        assert_eq!(json_type(&json!(true)), "boolean");
        assert_eq!(json_type(&json!(1)), "number");
        assert_eq!(json_type(&json!("x")), "string");
        assert_eq!(json_type(&json!([])), "list");
        assert_eq!(json_type(&json!({})), "mapping");
    }
}
