//! Settings loading with deep merge, environment overrides, and validation.
//!
//! Loading flow:
//! 1. Start with compiled [`PrecisSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply `PRECIS_*` environment variable overrides (highest priority)
//! 4. Validate ranges; reject the whole load on the first bad value
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{ChunkingSettings, LogFormat, PrecisSettings};

/// Resolve the settings file path.
///
/// `$PRECIS_HOME/settings.json` when `PRECIS_HOME` is set, otherwise
/// `~/.precis/settings.json`.
pub fn settings_path() -> PathBuf {
    if let Some(dir) = read_env_string("PRECIS_HOME") {
        return PathBuf::from(dir).join("settings.json");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".precis").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<PrecisSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, starts from defaults. If the file contains
/// invalid JSON or the result fails validation, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<PrecisSettings> {
    let mut settings = read_settings_file(path)?;
    apply_env_overrides(&mut settings);
    validate(&settings)?;
    Ok(settings)
}

/// Read and merge the file over defaults, without env overrides or validation.
pub fn read_settings_file(path: &Path) -> Result<PrecisSettings> {
    let defaults = serde_json::to_value(PrecisSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let user: Value =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Check value ranges that serde cannot express.
pub fn validate(settings: &PrecisSettings) -> Result<()> {
    let s = &settings.summarizer;
    require(s.target_length >= 1, "summarizer.targetLength", AT_LEAST_ONE)?;
    require(s.max_tokens >= 1, "summarizer.maxTokens", AT_LEAST_ONE)?;
    require(s.concurrency >= 1, "summarizer.concurrency", AT_LEAST_ONE)?;
    require(s.min_input_words >= 1, "summarizer.minInputWords", AT_LEAST_ONE)?;
    match &s.chunking {
        ChunkingSettings::SentencePacking { delimiter } => {
            require(!delimiter.is_empty(), "summarizer.chunking.delimiter", NOT_EMPTY)?;
        }
        ChunkingSettings::FixedWindow { token_factor } => {
            require(
                token_factor.is_finite() && *token_factor > 0.0,
                "summarizer.chunking.tokenFactor",
                "must be a positive number",
            )?;
        }
    }

    let e = &settings.entities;
    require(!e.labels.is_empty(), "entities.labels", NOT_EMPTY)?;
    require(!e.sentence_delimiter.is_empty(), "entities.sentenceDelimiter", NOT_EMPTY)?;

    let m = &settings.models;
    require(m.summarization.timeout_ms > 0, "models.summarization.timeoutMs", "must be > 0")?;
    require(m.entities.timeout_ms > 0, "models.entities.timeoutMs", "must be > 0")?;
    Ok(())
}

const AT_LEAST_ONE: &str = "must be >= 1";
const NOT_EMPTY: &str = "must not be empty";

fn require(condition: bool, key: &'static str, message: &'static str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue { key, message })
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Invalid values are ignored with a warning (falling back to file/default).
pub fn apply_env_overrides(settings: &mut PrecisSettings) {
    // ── Summarizer ──────────────────────────────────────────────────
    if let Some(v) = read_env_usize("PRECIS_TARGET_LENGTH", 1, 100_000) {
        settings.summarizer.target_length = v;
    }
    if let Some(v) = read_env_usize("PRECIS_MAX_ITERATIONS", 0, 1_000) {
        settings.summarizer.max_iterations = v;
    }
    if let Some(v) = read_env_usize("PRECIS_MAX_TOKENS", 1, 1_000_000) {
        settings.summarizer.max_tokens = v;
    }
    if let Some(v) = read_env_usize("PRECIS_CONCURRENCY", 1, 256) {
        settings.summarizer.concurrency = v;
    }

    // ── Models ──────────────────────────────────────────────────────
    if let Some(v) = read_env_string("PRECIS_SUMMARIZER_URL") {
        settings.models.summarization.base_url = v;
    }
    if let Some(v) = read_env_string("PRECIS_SUMMARIZER_MODEL") {
        settings.models.summarization.model = v;
    }
    if let Some(v) = read_env_string("PRECIS_ENTITY_URL") {
        settings.models.entities.base_url = v;
    }
    if let Some(v) = read_env_string("PRECIS_ENTITY_MODEL") {
        settings.models.entities.model = v;
    }
    if let Some(v) = read_env_string("PRECIS_MODEL_API_KEY") {
        settings.models.summarization.api_key = Some(v.clone());
        settings.models.entities.api_key = Some(v);
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read_env_string("PRECIS_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read_env_string("PRECIS_LOG_FORMAT") {
        match parse_log_format(&v) {
            Some(format) => settings.logging.format = format,
            None => {
                tracing::warn!(key = "PRECIS_LOG_FORMAT", value = %v, "invalid log format, ignoring");
            }
        }
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a log format name (case-insensitive).
pub fn parse_log_format(val: &str) -> Option<LogFormat> {
    match val.to_lowercase().as_str() {
        "pretty" | "text" => Some(LogFormat::Pretty),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    let val = std::env::var(name).ok()?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn write_settings(json: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, json).unwrap();
        (dir, path)
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"summarizer": {"targetLength": 150, "maxIterations": 5}});
        let source = serde_json::json!({"summarizer": {"targetLength": 80}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["summarizer"]["targetLength"], 80);
        assert_eq!(merged["summarizer"]["maxIterations"], 5);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"labels": ["company"]});
        let source = serde_json::json!({"labels": ["person", "place"]});
        let merged = deep_merge(target, source);
        assert_eq!(merged["labels"], serde_json::json!(["person", "place"]));
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        assert_eq!(deep_merge(target, source)["a"], 42);
    }

    // ── read_settings_file ──────────────────────────────────────────

    #[test]
    fn missing_file_returns_defaults() {
        let settings = read_settings_file(Path::new("/nonexistent/settings.json")).unwrap();
        assert_eq!(settings, PrecisSettings::default());
    }

    #[test]
    fn partial_file_overrides() {
        let (_dir, path) = write_settings(
            r#"{"summarizer": {"targetLength": 60}, "entities": {"labels": ["person"]}}"#,
        );
        let settings = read_settings_file(&path).unwrap();
        assert_eq!(settings.summarizer.target_length, 60);
        assert_eq!(settings.summarizer.max_iterations, 5);
        assert_eq!(settings.entities.labels, vec!["person".to_string()]);
        assert_eq!(settings.entities.sentence_delimiter, ".");
    }

    #[test]
    fn switching_chunking_strategy() {
        let (_dir, path) = write_settings(
            r#"{"summarizer": {"chunking": {"strategy": "fixedWindow", "tokenFactor": 3.5}}}"#,
        );
        let settings = read_settings_file(&path).unwrap();
        assert_eq!(
            settings.summarizer.chunking,
            ChunkingSettings::FixedWindow { token_factor: 3.5 }
        );
    }

    #[test]
    fn api_key_is_picked_up() {
        let (_dir, path) =
            write_settings(r#"{"models": {"summarization": {"apiKey": "secret"}}}"#);
        let settings = read_settings_file(&path).unwrap();
        assert_eq!(settings.models.summarization.api_key.as_deref(), Some("secret"));
        assert_eq!(settings.models.summarization.model, "google/pegasus-xsum");
        assert!(settings.models.entities.api_key.is_none());
    }

    #[test]
    fn invalid_json_returns_error() {
        let (_dir, path) = write_settings("not valid json");
        let err = read_settings_file(&path).unwrap_err();
        assert!(matches!(&err, SettingsError::Parse { path: p, .. } if *p == path));
    }

    #[test]
    fn wrong_value_type_is_a_shape_error() {
        let (_dir, path) = write_settings(r#"{"summarizer": {"targetLength": "many"}}"#);
        let err = read_settings_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Shape(_)));
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        // A directory exists but cannot be read as a file.
        let dir = tempfile::tempdir().unwrap();
        let err = read_settings_file(dir.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    // ── validate ────────────────────────────────────────────────────

    #[test]
    fn defaults_are_valid() {
        validate(&PrecisSettings::default()).unwrap();
    }

    #[test]
    fn zero_target_length_is_rejected() {
        let mut settings = PrecisSettings::default();
        settings.summarizer.target_length = 0;
        let err = validate(&settings).unwrap_err();
        assert_eq!(err.key(), Some("summarizer.targetLength"));
        assert_eq!(err.to_string(), "invalid setting summarizer.targetLength: must be >= 1");
    }

    #[test]
    fn each_model_timeout_is_checked_separately() {
        let mut settings = PrecisSettings::default();
        settings.models.entities.timeout_ms = 0;
        let err = validate(&settings).unwrap_err();
        assert_eq!(err.key(), Some("models.entities.timeoutMs"));
    }

    #[test]
    fn zero_max_iterations_is_allowed() {
        let mut settings = PrecisSettings::default();
        settings.summarizer.max_iterations = 0;
        validate(&settings).unwrap();
    }

    #[test]
    fn non_positive_token_factor_is_rejected() {
        let mut settings = PrecisSettings::default();
        settings.summarizer.chunking = ChunkingSettings::FixedWindow { token_factor: 0.0 };
        assert!(validate(&settings).is_err());
        settings.summarizer.chunking = ChunkingSettings::FixedWindow {
            token_factor: f64::NAN,
        };
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn empty_labels_are_rejected() {
        let mut settings = PrecisSettings::default();
        settings.entities.labels.clear();
        assert_eq!(validate(&settings).unwrap_err().key(), Some("entities.labels"));
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let mut settings = PrecisSettings::default();
        settings.summarizer.chunking = ChunkingSettings::SentencePacking {
            delimiter: String::new(),
        };
        assert!(validate(&settings).is_err());
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_log_format_variants() {
        assert_eq!(parse_log_format("JSON"), Some(LogFormat::Json));
        assert_eq!(parse_log_format("pretty"), Some(LogFormat::Pretty));
        assert_eq!(parse_log_format("text"), Some(LogFormat::Pretty));
        assert_eq!(parse_log_format("xml"), None);
    }

    #[test]
    fn parse_usize_bounds() {
        assert_eq!(parse_usize_range("150", 1, 1000), Some(150));
        assert_eq!(parse_usize_range(" 7 ", 1, 1000), Some(7));
        assert_eq!(parse_usize_range("0", 1, 1000), None);
        assert_eq!(parse_usize_range("5000", 1, 1000), None);
        assert_eq!(parse_usize_range("abc", 1, 1000), None);
    }
}
