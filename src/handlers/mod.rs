//! Command handlers.
//!
//! [`core`] holds the registration table, declarations and the types handed
//! to handlers; [`builtin`] holds the command units shipped with the console.

pub mod builtin;
pub mod core;

pub use self::core::{
    ADMIN_BYPASS, AmbientSlot, Argument, Binding, Caller, CallerKind, CallerPermissions,
    CallerSlot, CommandDef, CommandUnit, Context, Flag, GroupRegistration, HandlerUnit,
    Invocation, LeafRegistration, Location, PermissionGate, Registration, Registry, World,
};
