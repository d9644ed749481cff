//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Why a settings load was rejected.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("cannot read settings file {}: {source}", path.display())]
    Read {
        /// File that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not JSON.
    #[error("settings file {} is not valid JSON: {source}", path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Parser error with line and column.
        #[source]
        source: serde_json::Error,
    },
    /// The merged document does not deserialize into [`PrecisSettings`](crate::PrecisSettings),
    /// e.g. a string where a number belongs.
    #[error("settings have the wrong shape: {0}")]
    Shape(#[from] serde_json::Error),
    /// A setting is out of range. `key` is its camelCase path.
    #[error("invalid setting {key}: {message}")]
    InvalidValue {
        /// Setting path, e.g. `summarizer.targetLength`.
        key: &'static str,
        /// Constraint that was violated.
        message: &'static str,
    },
}

impl SettingsError {
    /// camelCase path of the offending setting, when one is known.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::InvalidValue { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn invalid_value_names_the_key() {
        let err = SettingsError::InvalidValue {
            key: "summarizer.targetLength",
            message: "must be >= 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid setting summarizer.targetLength: must be >= 1"
        );
        assert_eq!(err.key(), Some("summarizer.targetLength"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let source = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err = SettingsError::Parse {
            path: PathBuf::from("/etc/precis/settings.json"),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("settings file /etc/precis/settings.json is not valid JSON"));
        assert!(err.source().is_some());
        assert_eq!(err.key(), None);
    }

    #[test]
    fn read_error_keeps_io_source() {
        let err = SettingsError::Read {
            path: PathBuf::from("settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("cannot read settings file settings.json"));
        let io = err.source().and_then(|e| e.downcast_ref::<std::io::Error>());
        assert_eq!(io.map(std::io::Error::kind), Some(std::io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn shape_error_from_conversion() {
        let json_err = serde_json::from_str::<u32>("\"ten\"").unwrap_err();
        let err: SettingsError = json_err.into();
        assert!(matches!(err, SettingsError::Shape(_)));
    }
}
