//! Command declarations.
//!
//! A [`CommandDef`] is the static description a handler carries: its aliases,
//! required permissions, argument grammar and usage text. Definitions are
//! immutable once registered.

use crate::error::RegistrationError;
use std::collections::BTreeSet;

/// Sentinel permission applied when a command declares none.
pub const ADMIN_BYPASS: &str = "admin-bypass";

/// Declarative description of one command surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDef {
    aliases: Vec<String>,
    permissions: Vec<String>,
    args: Vec<String>,
    min: usize,
    /// `None` means unbounded.
    max: Option<usize>,
    join: bool,
    flags: BTreeSet<String>,
    value_flags: BTreeSet<String>,
    any_flags: bool,
    description: String,
    usage: String,
}

impl CommandDef {
    /// Start a definition. The first alias is canonical.
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Declared argument names, in order.
    pub fn args<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Remove the upper bound.
    pub fn unbounded(mut self) -> Self {
        self.max = None;
        self
    }

    /// Let the last argument slot absorb every remaining token.
    pub fn join(mut self) -> Self {
        self.join = true;
        self
    }

    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn value_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Accept unknown flags as value-less flags.
    pub fn any_flags(mut self) -> Self {
        self.any_flags = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Canonical alias (first declared).
    pub fn primary_alias(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or_default()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn required_permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn arg_names(&self) -> &[String] {
        &self.args
    }

    pub fn min_args(&self) -> usize {
        self.min
    }

    pub fn max_args(&self) -> Option<usize> {
        self.max
    }

    pub fn joins(&self) -> bool {
        self.join
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    pub fn has_value_flag(&self, key: &str) -> bool {
        self.value_flags.contains(key)
    }

    pub fn accepts_any_flags(&self) -> bool {
        self.any_flags
    }

    pub fn describe(&self) -> &str {
        &self.description
    }

    /// Usage line, or the canonical alias when none was declared.
    pub fn usage_line(&self) -> String {
        if self.usage.is_empty() {
            self.primary_alias().to_string()
        } else {
            format!("{} {}", self.primary_alias(), self.usage)
        }
    }

    /// Fill in permissions when none were declared.
    pub(crate) fn with_fallback_permissions(mut self, fallback: &[String]) -> Self {
        if self.permissions.is_empty() {
            self.permissions = fallback.to_vec();
        }
        self
    }

    /// Reject definitions the parser cannot honor.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.aliases.is_empty() {
            return Err(RegistrationError::NoAliases);
        }
        for alias in &self.aliases {
            if alias.is_empty() {
                return Err(RegistrationError::BlankAlias);
            }
            if alias.chars().any(char::is_whitespace) {
                return Err(RegistrationError::AliasContainsSpace(alias.clone()));
            }
        }

        let alias = self.primary_alias().to_string();
        if let Some(max) = self.max {
            if self.min > max {
                return Err(RegistrationError::ArityInverted {
                    alias,
                    min: self.min,
                    max,
                });
            }
            if self.args.len() > max {
                return Err(RegistrationError::TooManyArgNames {
                    alias,
                    names: self.args.len(),
                    max,
                });
            }
        }
        if let Some(flag) = self.flags.intersection(&self.value_flags).next() {
            return Err(RegistrationError::FlagConflict {
                alias,
                flag: flag.clone(),
            });
        }
        Ok(())
    }
}
