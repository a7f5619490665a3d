//! Parser and invoker policy.

use crate::handlers::core::ADMIN_BYPASS;
use serde::Deserialize;

/// Where a joined argument stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinTail {
    /// The joined argument runs through the last token.
    #[default]
    Inclusive,
    /// The joined argument stops one token short of the end.
    DropLast,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Permission required by commands that declare none (default: "admin-bypass").
    #[serde(default = "default_permission")]
    pub default_permission: String,
    /// Slice boundary for join-mode arguments (default: inclusive).
    #[serde(default)]
    pub join_tail: JoinTail,
    /// Fail the invocation instead of binding an absent caller when the
    /// caller kind does not fit the handler (default: false).
    #[serde(default)]
    pub strict_caller_binding: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_permission: default_permission(),
            join_tail: JoinTail::default(),
            strict_caller_binding: false,
        }
    }
}

fn default_permission() -> String {
    ADMIN_BYPASS.to_string()
}
