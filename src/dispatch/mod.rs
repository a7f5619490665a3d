//! Command dispatch.
//!
//! The [`Dispatcher`] is the single entry point for front-ends: it parses a
//! raw command, reports failures back to the caller and invokes the resolved
//! handler. Dispatch is synchronous and runs to completion on the calling
//! thread; the shared [`Registry`] is safe to read from many threads at once.

pub mod invoker;
pub mod parser;
pub mod permission;
pub mod tokenizer;

pub use invoker::Invoker;
pub use parser::{ParseFailure, ParseOutcome, Parsed, Parser};

use crate::config::{Config, JoinTail};
use crate::error::DispatchError;
use crate::handlers::core::{Caller, CallerPermissions, Location, PermissionGate, Registry};
use crate::messages::Messages;
use crate::telemetry::CommandTimer;
use std::sync::Arc;
use tracing::{Level, debug, error, span};

/// Parses, gates and invokes commands against a shared registry.
pub struct Dispatcher {
    registry: Arc<Registry>,
    gate: Arc<dyn PermissionGate>,
    messages: Messages,
    join_tail: JoinTail,
    invoker: Invoker,
}

impl Dispatcher {
    /// Dispatcher with default messages and policy.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            gate: Arc::new(CallerPermissions),
            messages: Messages::default(),
            join_tail: JoinTail::default(),
            invoker: Invoker::default(),
        }
    }

    /// Dispatcher configured from the `[dispatch]` and `[messages]` sections.
    pub fn from_config(registry: Arc<Registry>, config: &Config) -> Self {
        Self {
            registry,
            gate: Arc::new(CallerPermissions),
            messages: Messages::new(config.messages.clone()),
            join_tail: config.dispatch.join_tail,
            invoker: Invoker::new(config.dispatch.strict_caller_binding),
        }
    }

    /// Replace the permission gate.
    pub fn with_gate(mut self, gate: Arc<dyn PermissionGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn gate(&self) -> &dyn PermissionGate {
        self.gate.as_ref()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn parser(&self) -> Parser<'_> {
        Parser::new(
            &self.registry,
            self.gate.as_ref(),
            &self.messages,
            self.join_tail,
        )
    }

    /// Parse without invoking.
    pub fn parse<'a>(
        &self,
        raw: &str,
        caller: &'a dyn Caller,
        location: Option<&Location>,
    ) -> ParseOutcome<'a> {
        self.parser().parse(raw, caller, location)
    }

    /// Process one raw command.
    ///
    /// Returns `false` only when there is no caller. Unknown aliases are
    /// ignored silently; every other failure is explained to the caller, and
    /// invocation failures are logged with a generic notice to the caller.
    pub fn process(
        &self,
        raw: &str,
        caller: Option<&dyn Caller>,
        location: Option<&Location>,
    ) -> bool {
        let Some(caller) = caller else {
            return false;
        };

        let alias = raw.split(' ').next().unwrap_or_default();
        let command_span = span!(
            Level::DEBUG,
            "command",
            alias = %alias,
            caller = %caller.name(),
            caller_kind = %caller.kind(),
        );
        let _guard = command_span.enter();

        let parsed = match self.parse(raw, caller, location) {
            Ok(parsed) => parsed,
            Err(failure) if failure.error.is_silent() => {
                debug!(alias = %alias, "Ignoring unknown command");
                return true;
            }
            Err(failure) => {
                let label = failure
                    .command
                    .as_deref()
                    .map(|def| def.primary_alias())
                    .unwrap_or("-");
                crate::metrics::record_command_error(label, failure.error.error_code());
                debug!(command = %label, error = %failure.error, "Command rejected");
                caller.explain_command(&failure.message, failure.command.as_deref());
                return true;
            }
        };

        let command = parsed.leaf.definition().primary_alias();
        let mut timer = CommandTimer::new(command);
        if let Err(e) = self.invoker.invoke(&parsed.leaf, &parsed.context) {
            timer.fail();
            let error = DispatchError::from(e);
            crate::metrics::record_command_error(command, error.error_code());
            error!(
                command = %command,
                unit = %parsed.leaf.unit(),
                caller = %caller.name(),
                error = %error,
                "Command invocation failed"
            );
            caller.report_failure(&self.messages.render(&error));
        }
        true
    }
}
