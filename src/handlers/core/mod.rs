//! Core handler infrastructure.
//!
//! This module contains the fundamental types of the command bus:
//!
//! - [`definition`]: `CommandDef`, the declarative grammar of one command
//! - [`context`]: parsed `Argument`s and `Flag`s, the `Context`, and the
//!   `Binding`/`Invocation` pair that replaces runtime parameter inspection
//! - [`registry`]: leaf and group registrations, handler units and the
//!   alias table
//! - [`traits`]: collaborator traits (`Caller`, `PermissionGate`)

pub mod context;
pub mod definition;
pub mod registry;
pub mod traits;

pub use context::{AmbientSlot, Argument, Binding, CallerSlot, Context, Flag, Invocation};
pub use definition::{ADMIN_BYPASS, CommandDef};
pub use registry::{
    CommandUnit, Entry, GroupRegistration, HandlerUnit, LeafRegistration, Registration, Registry,
};
pub use traits::{Caller, CallerKind, CallerPermissions, Location, PermissionGate, World};
