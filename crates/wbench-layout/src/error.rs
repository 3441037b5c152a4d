//! Error types.
//!
//! Layout and placement operations never fail; only snapshot encoding and
//! configuration loading report errors.

use std::fmt;

/// Errors from encoding or decoding a perspective snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// The perspective has no focused part to record as the root active part.
    NoActivePart { perspective: String },
    /// The snapshot document is not valid JSON for the snapshot schema.
    Json(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActivePart { perspective } => {
                write!(f, "perspective {perspective:?} has no active part to snapshot")
            }
            Self::Json(e) => write!(f, "snapshot JSON error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoActivePart { .. } => None,
            Self::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Errors that can occur when loading a perspective configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "toml-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "toml-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "toml-config")]
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn no_active_part_names_the_perspective() {
        let err = SnapshotError::NoActivePart {
            perspective: "general".into(),
        };
        assert_eq!(
            err.to_string(),
            "perspective \"general\" has no active part to snapshot"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn json_errors_keep_their_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SnapshotError::from(json_err);
        assert!(err.to_string().starts_with("snapshot JSON error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }
}
