//! cmdbus - command registration, parsing, permission gating and dispatch.
//!
//! Front-ends hand raw command strings to a [`Dispatcher`] together with the
//! [`Caller`] that issued them. The dispatcher tokenizes the input, resolves
//! the alias (and subcommand) in the shared [`Registry`], checks permissions,
//! classifies flags and positional arguments, validates arity, and finally
//! invokes the handler with arguments bound to its declared [`Binding`].

pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod metrics;
pub mod telemetry;

pub use config::Config;
pub use dispatch::{Dispatcher, ParseFailure, ParseOutcome, Parsed};
pub use error::{DispatchError, InvocationError, RegistrationError};
pub use handlers::{
    Argument, Binding, Caller, CallerKind, CommandDef, CommandUnit, Context, Flag, HandlerUnit,
    Invocation, Location, Registration, Registry, World,
};
pub use messages::Messages;
