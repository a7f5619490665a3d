//! User-facing message templates.

use serde::Deserialize;
use std::collections::HashMap;

/// Message templates.
///
/// `{permission}` and `{subcommands}` placeholders are substituted at render
/// time. Per-permission overrides replace the generic no-permission text.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_no_permission")]
    pub no_permission: String,
    #[serde(default = "default_missing_subcommand")]
    pub missing_subcommand: String,
    #[serde(default = "default_internal_error")]
    pub internal_error: String,
    /// No-permission text keyed by permission id.
    #[serde(default)]
    pub permissions: HashMap<String, String>,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            no_permission: default_no_permission(),
            missing_subcommand: default_missing_subcommand(),
            internal_error: default_internal_error(),
            permissions: HashMap::new(),
        }
    }
}

fn default_no_permission() -> String {
    "You do not have permission to use this command ({permission}).".to_string()
}

fn default_missing_subcommand() -> String {
    "Missing subcommand. Available: {subcommands}".to_string()
}

fn default_internal_error() -> String {
    "Something went wrong while running that command.".to_string()
}
