//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("dispatch.default_permission must not be empty")]
    EmptyDefaultPermission,
    #[error("messages.{0} has unbalanced braces")]
    UnbalancedTemplate(String),
    #[error("logging.level '{0}' is not a valid filter")]
    InvalidLogLevel(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.dispatch.default_permission.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultPermission);
    }

    let messages = &config.messages;
    let templates = [
        ("no_permission".to_string(), &messages.no_permission),
        ("missing_subcommand".to_string(), &messages.missing_subcommand),
        ("internal_error".to_string(), &messages.internal_error),
    ];
    let overrides = messages
        .permissions
        .iter()
        .map(|(perm, text)| (format!("permissions.{perm}"), text));
    for (name, text) in templates.into_iter().chain(overrides) {
        if !braces_balanced(text) {
            errors.push(ValidationError::UnbalancedTemplate(name));
        }
    }

    if tracing_subscriber::EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn braces_balanced(text: &str) -> bool {
    let mut open = false;
    for c in text.chars() {
        match c {
            '{' if open => return false,
            '{' => open = true,
            '}' if !open => return false,
            '}' => open = false,
            _ => {}
        }
    }
    !open
}
