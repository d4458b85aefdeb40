//! Verification run configuration.
//!
//! Callers can build a [`VerifierConfig`] directly, or load one from an
//! optional TOML file. A missing file yields `VerifierConfig::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields`
//! off), though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value that would make the run degenerate (zero workers,
    /// zero timeout, zero titles). Rejected before any task is dispatched.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Tuning knobs for a verification run.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifierConfig {
    /// Fixed worker pool size; bounds in-flight probes regardless of input
    /// size.
    pub worker_count: usize,

    /// Per-probe timeout in seconds. Covers the whole fetch-and-parse
    /// sequence for one URL.
    pub probe_timeout_secs: u64,

    /// Maximum titles extracted per feed. Entries with no usable title do
    /// not count toward this limit.
    pub max_titles: usize,

    /// Titles shorter than this many chars are flagged by the auditor.
    pub short_title_threshold: usize,

    /// Feeds yielding fewer titles than this are flagged by the auditor.
    pub sparse_feed_threshold: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            worker_count: 10,
            probe_timeout_secs: 5,
            max_titles: 5,
            short_title_threshold: 10,
            sparse_feed_threshold: 3,
        }
    }
}

impl VerifierConfig {
    /// Load configuration from a TOML file.
    ///
    /// - Missing file -> `Ok(VerifierConfig::default())`
    /// - Empty file -> `Ok(VerifierConfig::default())`
    /// - Invalid TOML -> `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys -> silently accepted (serde default behavior), logged
    ///   as warning
    ///
    /// The loaded configuration is validated before being returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "worker_count",
                "probe_timeout_secs",
                "max_titles",
                "short_title_threshold",
                "sparse_feed_threshold",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: VerifierConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            workers = config.worker_count,
            timeout_secs = config.probe_timeout_secs,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Rejects degenerate settings. This is the crate's only fatal error
    /// path: it runs before scheduling, so a bad value can never abort a
    /// run midway.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::Invalid(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "probe_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.max_titles == 0 {
            return Err(ConfigError::Invalid(
                "max_titles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The per-probe timeout as a [`Duration`].
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert_eq!(config.worker_count, 10);
        assert_eq!(config.probe_timeout_secs, 5);
        assert_eq!(config.max_titles, 5);
        assert_eq!(config.short_title_threshold, 10);
        assert_eq!(config.sparse_feed_threshold, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/feedcheck_test_nonexistent_config.toml");
        let config = VerifierConfig::load(path).unwrap();
        assert_eq!(config, VerifierConfig::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("feedcheck_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = VerifierConfig::load(&path).unwrap();
        assert_eq!(config, VerifierConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = std::env::temp_dir().join("feedcheck_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "worker_count = 4\n").unwrap();

        let config = VerifierConfig::load(&path).unwrap();
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.probe_timeout_secs, 5); // default
        assert_eq!(config.max_titles, 5); // default

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("feedcheck_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
worker_count = 20
probe_timeout_secs = 15
max_titles = 8
short_title_threshold = 12
sparse_feed_threshold = 2
"#;
        std::fs::write(&path, content).unwrap();

        let config = VerifierConfig::load(&path).unwrap();
        assert_eq!(config.worker_count, 20);
        assert_eq!(config.probe_timeout_secs, 15);
        assert_eq!(config.max_titles, 8);
        assert_eq!(config.short_title_threshold, 12);
        assert_eq!(config.sparse_feed_threshold, 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("feedcheck_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let result = VerifierConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = std::env::temp_dir().join("feedcheck_config_test_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
worker_count = 3
totally_fake_key = "should not fail"
"#;
        std::fs::write(&path, content).unwrap();

        let config = VerifierConfig::load(&path).unwrap();
        assert_eq!(config.worker_count, 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let dir = std::env::temp_dir().join("feedcheck_config_test_wrongtype");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        // worker_count should be an integer, not a string
        std::fs::write(&path, "worker_count = \"many\"\n").unwrap();

        let result = VerifierConfig::load(&path);
        assert!(result.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_zero_worker_count_rejected() {
        let config = VerifierConfig {
            worker_count: 0,
            ..VerifierConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("worker_count"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = VerifierConfig {
            probe_timeout_secs: 0,
            ..VerifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_zero_max_titles_rejected() {
        let config = VerifierConfig {
            max_titles: 0,
            ..VerifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = std::env::temp_dir().join("feedcheck_config_test_zero_workers");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "worker_count = 0\n").unwrap();

        let result = VerifierConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_probe_timeout_duration() {
        let config = VerifierConfig {
            probe_timeout_secs: 7,
            ..VerifierConfig::default()
        };
        assert_eq!(config.probe_timeout(), Duration::from_secs(7));
    }
}
