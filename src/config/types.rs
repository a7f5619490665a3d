//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::dispatch::DispatchConfig;
use super::logging::LoggingConfig;
use super::messages::MessagesConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<super::validation::ValidationError>),
}

/// Command bus configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Parser and invoker policy.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Message templates shown to callers.
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load and validate in one step.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        super::validation::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JoinTail, LogFormat};
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.dispatch.default_permission, "admin-bypass");
        assert_eq!(config.dispatch.join_tail, JoinTail::Inclusive);
        assert!(!config.dispatch.strict_caller_binding);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[dispatch]
default_permission = "op"
join_tail = "drop-last"
strict_caller_binding = true

[messages]
no_permission = "Denied: {{permission}}"

[messages.permissions]
"region.create" = "Builders only."

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dispatch.default_permission, "op");
        assert_eq!(config.dispatch.join_tail, JoinTail::DropLast);
        assert!(config.dispatch.strict_caller_binding);
        assert_eq!(config.messages.no_permission, "Denied: {permission}");
        assert_eq!(
            config.messages.permissions.get("region.create").map(String::as_str),
            Some("Builders only.")
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/cmdbus.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dispatch\njoin_tail = 3").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_validated_rejects_empty_permission() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dispatch]\ndefault_permission = \"\"").unwrap();
        assert!(matches!(
            Config::load_validated(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
