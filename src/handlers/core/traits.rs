//! Collaborator traits consumed by the command bus.
//!
//! The bus never formats chat or evaluates permission nodes itself. It asks
//! the [`Caller`] to do both, and sequences the answers.

use super::definition::CommandDef;
use std::fmt;

/// Concrete kind of a caller, used to decide caller-slot compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallerKind {
    /// An in-world participant with a location.
    Player,
    /// The server console or another non-located source.
    Console,
}

impl CallerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Console => "console",
        }
    }
}

impl fmt::Display for CallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named world.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct World {
    pub name: String,
}

impl World {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A position inside a world.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: World,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: World, x: f64, y: f64, z: f64) -> Self {
        Self { world, x, y, z }
    }

    /// The world this location lives in.
    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }
}

/// Whoever issued a command.
///
/// Implemented by the chat/console front-end. All methods must be callable
/// from any thread: dispatches for different callers run concurrently.
pub trait Caller: Send + Sync {
    /// Display name used in logs.
    fn name(&self) -> &str;

    /// Concrete kind of this caller.
    fn kind(&self) -> CallerKind;

    /// Evaluate one permission identifier.
    fn has_permission(&self, permission: &str) -> bool;

    /// Report a failed command, optionally with the offending definition so
    /// the front-end can render usage.
    fn explain_command(&self, message: &str, command: Option<&CommandDef>);

    /// Plain output from a handler.
    fn send_message(&self, message: &str);

    /// Generic "something went wrong" notice after an invocation failure.
    fn report_failure(&self, message: &str) {
        self.explain_command(message, None);
    }
}

/// Evaluates a single required permission for a caller.
pub trait PermissionGate: Send + Sync {
    fn check(&self, caller: &dyn Caller, permission: &str) -> bool;
}

/// Gate that asks the caller directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallerPermissions;

impl PermissionGate for CallerPermissions {
    #[inline]
    fn check(&self, caller: &dyn Caller, permission: &str) -> bool {
        caller.has_permission(permission)
    }
}
