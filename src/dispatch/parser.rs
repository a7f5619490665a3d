//! Command parser.
//!
//! Turns a raw command string into a [`Context`] bound to the leaf that will
//! handle it:
//!
//! 1. split into tokens; the first token is the alias
//! 2. look the alias up (a miss is silent)
//! 3. route groups to the first subcommand whose `alias sub` prefixes the input
//! 4. check required permissions, stopping at the first denial
//! 5. classify the remaining tokens into flags and positional arguments
//! 6. validate arity
//!
//! Every step can end the parse with a [`ParseFailure`].

use super::{permission, tokenizer};
use crate::config::JoinTail;
use crate::error::DispatchError;
use crate::handlers::core::{
    Argument, Caller, CommandDef, Context, Flag, LeafRegistration, Location, PermissionGate,
    Registration, Registry,
};
use crate::messages::Messages;
use std::sync::Arc;

/// A successful parse: the context and the leaf it belongs to.
pub struct Parsed<'a> {
    pub context: Context<'a>,
    pub leaf: Arc<LeafRegistration>,
}

impl std::fmt::Debug for Parsed<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parsed")
            .field("command", &self.leaf.definition().primary_alias())
            .field("context", &self.context)
            .finish()
    }
}

/// A failed parse.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub error: DispatchError,
    /// Text for the caller.
    pub message: String,
    /// Definition the input was aimed at, once the alias resolved.
    pub command: Option<Arc<CommandDef>>,
}

pub type ParseOutcome<'a> = Result<Parsed<'a>, ParseFailure>;

/// Stateless parser over a registry.
pub struct Parser<'r> {
    registry: &'r Registry,
    gate: &'r dyn PermissionGate,
    messages: &'r Messages,
    join_tail: JoinTail,
}

impl<'r> Parser<'r> {
    pub fn new(
        registry: &'r Registry,
        gate: &'r dyn PermissionGate,
        messages: &'r Messages,
        join_tail: JoinTail,
    ) -> Self {
        Self {
            registry,
            gate,
            messages,
            join_tail,
        }
    }

    pub fn parse<'a>(
        &self,
        raw: &str,
        caller: &'a dyn Caller,
        location: Option<&Location>,
    ) -> ParseOutcome<'a> {
        let tokens = tokenizer::split(raw);
        let Some((&alias, rest)) = tokens.split_first() else {
            return Err(self.fail(DispatchError::EmptyInput, None));
        };

        let registration = self
            .registry
            .lookup(alias)
            .ok_or_else(|| self.fail(DispatchError::UnknownAlias(alias.to_string()), None))?;

        let Some(leaf) = registration.resolve(raw, alias) else {
            return Err(self.missing_subcommand(&registration, alias));
        };
        let (group, stream) = match &registration {
            Registration::Leaf(_) => (None, rest),
            // The subcommand token is routing, not an argument.
            Registration::Group(group) => (
                Some(Arc::clone(group.definition())),
                rest.get(1..).unwrap_or_default(),
            ),
        };

        let def = Arc::clone(leaf.definition());
        let required = self
            .registry
            .effective_permissions(group.as_deref(), &def)
            .to_vec();
        if let Some(denied) = permission::first_denied(self.gate, caller, &required) {
            return Err(self.fail(
                DispatchError::PermissionDenied(denied.to_string()),
                Some(def),
            ));
        }

        let (args, flags) = match self.scan(&def, stream) {
            Ok(scanned) => scanned,
            Err(error) => return Err(self.fail(error, Some(def))),
        };

        let context = Context::new(args, flags, caller, location.cloned(), required);
        Ok(Parsed { context, leaf })
    }

    /// Classify tokens left to right, then validate arity.
    fn scan(
        &self,
        def: &CommandDef,
        stream: &[&str],
    ) -> Result<(Vec<Argument>, Vec<Flag>), DispatchError> {
        let mut args = Vec::new();
        let mut flags = Vec::new();
        let mut i = 0;

        while i < stream.len() {
            let token = stream[i];

            if let Some(key) = token.strip_prefix('-') {
                if def.accepts_any_flags() || def.has_flag(key) {
                    flags.push(Flag::switch(key));
                    i += 1;
                } else if def.has_value_flag(key) {
                    let value = stream
                        .get(i + 1)
                        .ok_or_else(|| DispatchError::MissingFlagValue(key.to_string()))?;
                    flags.push(Flag::valued(key, *value));
                    i += 2;
                } else {
                    return Err(DispatchError::UnknownFlag(key.to_string()));
                }
                continue;
            }

            let name = candidate_name(def, args.len());
            if def.joins() && def.max_args().is_some_and(|max| max > 0 && args.len() == max - 1) {
                let end = match self.join_tail {
                    JoinTail::Inclusive => stream.len(),
                    JoinTail::DropLast => stream.len() - 1,
                };
                args.push(Argument::joined(stream[i..end].join(" "), name));
                break;
            }

            args.push(Argument::new(token, name));
            i += 1;
        }

        if let Some(max) = def.max_args() {
            if args.len() > max && !def.joins() {
                return Err(DispatchError::TooManyArguments);
            }
        }
        if args.len() < def.min_args() {
            return Err(DispatchError::TooFewArguments);
        }
        Ok((args, flags))
    }

    fn missing_subcommand(&self, registration: &Registration, alias: &str) -> ParseFailure {
        let subcommands: Vec<&str> = match registration {
            Registration::Group(group) => group
                .subcommands()
                .iter()
                .map(|l| l.definition().primary_alias())
                .collect(),
            Registration::Leaf(_) => Vec::new(),
        };
        ParseFailure {
            error: DispatchError::MissingSubcommand(alias.to_string()),
            message: self.messages.missing_subcommand(&subcommands),
            command: Some(Arc::clone(registration.definition())),
        }
    }

    fn fail(&self, error: DispatchError, command: Option<Arc<CommandDef>>) -> ParseFailure {
        ParseFailure {
            message: self.messages.render(&error),
            error,
            command,
        }
    }
}

/// Declared name for the argument at `index`, bound only when the names
/// cover `max` exactly.
fn candidate_name(def: &CommandDef, index: usize) -> Option<String> {
    let names = def.arg_names();
    let covers = names.first().is_some_and(|first| !first.is_empty())
        && index < names.len()
        && def.max_args() == Some(names.len());
    covers.then(|| names[index].clone())
}
