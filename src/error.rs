//! Unified error handling for cmdbus.
//!
//! This module provides the error hierarchy for the command bus, with metric
//! labels for every dispatch failure.

use thiserror::Error;

// ============================================================================
// Dispatch Errors (parse + invoke)
// ============================================================================

/// Errors that terminate a single dispatch call.
///
/// Everything except [`DispatchError::UnknownAlias`] is reported back to the
/// caller. `UnknownAlias` means "not our command" and is ignored silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("command length is zero")]
    EmptyInput,

    #[error("unknown alias: {0}")]
    UnknownAlias(String),

    #[error("missing subcommand for '{0}'")]
    MissingSubcommand(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("flag '{0}' requires a value")]
    MissingFlagValue(String),

    #[error("too many arguments")]
    TooManyArguments,

    #[error("too few arguments")]
    TooFewArguments,

    #[error("invocation failed: {0}")]
    Invocation(#[from] InvocationError),
}

impl DispatchError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::UnknownAlias(_) => "unknown_alias",
            Self::MissingSubcommand(_) => "missing_subcommand",
            Self::PermissionDenied(_) => "permission_denied",
            Self::UnknownFlag(_) => "unknown_flag",
            Self::MissingFlagValue(_) => "missing_flag_value",
            Self::TooManyArguments => "too_many_arguments",
            Self::TooFewArguments => "too_few_arguments",
            Self::Invocation(_) => "invocation_failure",
        }
    }

    /// Whether the caller should hear about this failure.
    #[inline]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::UnknownAlias(_))
    }
}

// ============================================================================
// Invocation Errors (handler execution)
// ============================================================================

/// Failures raised while constructing or running a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    #[error("failed to construct handler for '{command}': {reason}")]
    Construction { command: String, reason: String },

    #[error("handler for '{command}' failed: {reason}")]
    Handler { command: String, reason: String },

    #[error("handler for '{command}' panicked: {reason}")]
    Panicked { command: String, reason: String },

    /// Only raised when strict caller binding is enabled.
    #[error("handler for '{command}' requires a {expected} caller")]
    CallerRequired {
        command: String,
        expected: &'static str,
    },
}

// ============================================================================
// Registration Errors (startup scanning)
// ============================================================================

/// Reasons a handler unit is rejected at registration time.
///
/// Rejection is never fatal: the unit is logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("command declares no aliases")]
    NoAliases,

    #[error("command declares a blank alias")]
    BlankAlias,

    #[error("alias '{0}' contains whitespace")]
    AliasContainsSpace(String),

    #[error("'{alias}' has min {min} greater than max {max}")]
    ArityInverted { alias: String, min: usize, max: usize },

    #[error("'{alias}' declares '{flag}' as both a flag and a value flag")]
    FlagConflict { alias: String, flag: String },

    #[error("'{alias}' declares {names} argument names but max is {max}")]
    TooManyArgNames {
        alias: String,
        names: usize,
        max: usize,
    },
}
