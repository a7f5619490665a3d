//! Message-resource lookup for dispatch failures.
//!
//! Renders the text a caller sees for each [`DispatchError`]. Permission
//! denials are looked up per permission id first, then fall back to the
//! generic template.

use crate::config::MessagesConfig;
use crate::error::DispatchError;

/// Rendered-message source built from [`MessagesConfig`].
#[derive(Debug, Clone, Default)]
pub struct Messages {
    config: MessagesConfig,
}

impl Messages {
    pub fn new(config: MessagesConfig) -> Self {
        Self { config }
    }

    /// "No permission" text for a failing permission id.
    pub fn no_permission(&self, permission: &str) -> String {
        let template = self
            .config
            .permissions
            .get(permission)
            .unwrap_or(&self.config.no_permission);
        template.replace("{permission}", permission)
    }

    /// Hint listing the subcommands a group offers.
    pub fn missing_subcommand(&self, subcommands: &[&str]) -> String {
        self.config
            .missing_subcommand
            .replace("{subcommands}", &subcommands.join(", "))
    }

    /// Generic notice after an invocation failure.
    pub fn internal_error(&self) -> &str {
        &self.config.internal_error
    }

    /// Text for errors that carry no subcommand list.
    pub fn render(&self, error: &DispatchError) -> String {
        match error {
            DispatchError::EmptyInput => "Command length is zero".to_string(),
            DispatchError::UnknownAlias(alias) => format!("Unknown command '{alias}'"),
            DispatchError::MissingSubcommand(_) => self.missing_subcommand(&[]),
            DispatchError::PermissionDenied(permission) => self.no_permission(permission),
            DispatchError::UnknownFlag(key) => format!("Unknown flag '{key}'"),
            DispatchError::MissingFlagValue(key) => format!("Flag '-{key}' requires a value"),
            DispatchError::TooManyArguments => "Too many arguments".to_string(),
            DispatchError::TooFewArguments => "Too few arguments".to_string(),
            DispatchError::Invocation(_) => self.internal_error().to_string(),
        }
    }
}
