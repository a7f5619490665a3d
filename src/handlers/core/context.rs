//! Parsed invocation state passed to handlers.

use super::traits::{Caller, CallerKind, Location, World};

/// A resolved positional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub value: String,
    /// Declared name, bound only when the names cover `max` exactly.
    pub name: Option<String>,
    /// True when this argument absorbed the remaining tokens.
    pub joined: bool,
}

impl Argument {
    pub fn new(value: impl Into<String>, name: Option<String>) -> Self {
        Self {
            value: value.into(),
            name,
            joined: false,
        }
    }

    pub fn joined(value: impl Into<String>, name: Option<String>) -> Self {
        Self {
            value: value.into(),
            name,
            joined: true,
        }
    }
}

/// A resolved modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    /// Present only for value flags.
    pub value: Option<String>,
}

impl Flag {
    pub fn switch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn valued(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// Everything a successful parse produced. Scoped to one dispatch call.
pub struct Context<'a> {
    args: Vec<Argument>,
    flags: Vec<Flag>,
    caller: &'a dyn Caller,
    world: Option<World>,
    location: Option<Location>,
    permissions: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(
        args: Vec<Argument>,
        flags: Vec<Flag>,
        caller: &'a dyn Caller,
        location: Option<Location>,
        permissions: Vec<String>,
    ) -> Self {
        let world = location.as_ref().map(|l| l.world().clone());
        Self {
            args,
            flags,
            caller,
            world,
            location,
            permissions,
        }
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Raw value of the positional argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|a| a.value.as_str())
    }

    /// Value of the argument bound to a declared name.
    pub fn named(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
            .map(|a| a.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f.name == name)
    }

    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.flags
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_deref())
    }

    pub fn caller(&self) -> &'a dyn Caller {
        self.caller
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Permissions that were checked before this context was built.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("args", &self.args)
            .field("flags", &self.flags)
            .field("caller", &self.caller.name())
            .field("world", &self.world)
            .field("location", &self.location)
            .field("permissions", &self.permissions)
            .finish()
    }
}

// ============================================================================
// Parameter binding
// ============================================================================

/// Which caller a handler wants bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallerSlot {
    /// No caller parameter.
    #[default]
    None,
    /// Any caller kind.
    Any,
    /// Only a caller of this kind; other kinds bind absent.
    Kind(CallerKind),
}

impl CallerSlot {
    /// `None` if the slot is absent, otherwise whether `kind` fits.
    pub fn accepts(self, kind: CallerKind) -> Option<bool> {
        match self {
            Self::None => None,
            Self::Any => Some(true),
            Self::Kind(expected) => Some(expected == kind),
        }
    }
}

/// Which ambient location data a handler wants bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbientSlot {
    #[default]
    None,
    Location,
    World,
}

/// Declared parameter shape of a handler entry point.
///
/// The context is always available; caller and ambient slots are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binding {
    pub caller: CallerSlot,
    pub ambient: AmbientSlot,
}

impl Binding {
    /// Context only.
    pub fn context() -> Self {
        Self::default()
    }

    pub fn any_caller() -> Self {
        Self {
            caller: CallerSlot::Any,
            ..Self::default()
        }
    }

    pub fn player() -> Self {
        Self {
            caller: CallerSlot::Kind(CallerKind::Player),
            ..Self::default()
        }
    }

    pub fn console() -> Self {
        Self {
            caller: CallerSlot::Kind(CallerKind::Console),
            ..Self::default()
        }
    }

    pub fn with_location(mut self) -> Self {
        self.ambient = AmbientSlot::Location;
        self
    }

    pub fn with_world(mut self) -> Self {
        self.ambient = AmbientSlot::World;
        self
    }
}

/// Arguments bound to a handler call according to its [`Binding`].
pub struct Invocation<'i, 'a> {
    pub caller: Option<&'a dyn Caller>,
    pub context: &'i Context<'a>,
    pub location: Option<&'i Location>,
    pub world: Option<&'i World>,
    caller_mismatch: bool,
}

impl<'i, 'a> Invocation<'i, 'a> {
    /// Bind the context to a declared parameter shape.
    pub fn bind(binding: Binding, context: &'i Context<'a>) -> Self {
        let caller = context.caller();
        let (bound, caller_mismatch) = match binding.caller.accepts(caller.kind()) {
            None => (None, false),
            Some(true) => (Some(caller), false),
            Some(false) => (None, true),
        };
        let (location, world) = match binding.ambient {
            AmbientSlot::None => (None, None),
            AmbientSlot::Location => (context.location(), None),
            AmbientSlot::World => (None, context.world()),
        };
        Self {
            caller: bound,
            context,
            location,
            world,
            caller_mismatch,
        }
    }

    /// True when the handler wanted a caller of another kind and got none.
    pub fn caller_mismatch(&self) -> bool {
        self.caller_mismatch
    }

    /// Send plain output to whoever issued the command.
    pub fn reply(&self, message: &str) {
        self.context.caller().send_message(message);
    }
}
