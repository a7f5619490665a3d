//! Registration table and handler units.
//!
//! The `Registry` maps every alias to a [`Registration`]. It is filled once at
//! startup by scanning [`CommandUnit`]s and read concurrently afterwards, so
//! the table is a `DashMap` and registrations are immutable behind `Arc`s.
//! Each leaf keeps a usage counter for [`Registry::command_stats`].

use super::context::{Binding, Invocation};
use super::definition::{ADMIN_BYPASS, CommandDef};
use super::traits::{Caller, PermissionGate};
use crate::error::{InvocationError, RegistrationError};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Type-erased handler entry point.
pub type Entry = Arc<dyn Fn(&Invocation<'_, '_>) -> Result<(), InvocationError> + Send + Sync>;

type Method<T> = Arc<dyn Fn(&T, &Invocation<'_, '_>) -> anyhow::Result<()> + Send + Sync>;

// ============================================================================
// Registrations
// ============================================================================

/// A registration bound to exactly one handler entry point.
pub struct LeafRegistration {
    def: Arc<CommandDef>,
    binding: Binding,
    unit: String,
    entry: Entry,
    invocations: AtomicU64,
}

impl LeafRegistration {
    /// Build a leaf from a plain closure.
    pub fn new<F>(def: CommandDef, binding: Binding, handler: F) -> Self
    where
        F: Fn(&Invocation<'_, '_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let command = def.primary_alias().to_string();
        let entry: Entry = Arc::new(move |inv| {
            handler(inv).map_err(|e| InvocationError::Handler {
                command: command.clone(),
                reason: format!("{e:#}"),
            })
        });
        Self::from_entry(def, binding, String::new(), entry)
    }

    fn from_entry(def: CommandDef, binding: Binding, unit: String, entry: Entry) -> Self {
        Self {
            def: Arc::new(def),
            binding,
            unit,
            entry,
            invocations: AtomicU64::new(0),
        }
    }

    pub fn definition(&self) -> &Arc<CommandDef> {
        &self.def
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    /// Name of the unit that declared this command.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Number of successful invocations.
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    pub(crate) fn call(&self, inv: &Invocation<'_, '_>) -> Result<(), InvocationError> {
        (self.entry)(inv)?;
        self.invocations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl std::fmt::Debug for LeafRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeafRegistration")
            .field("alias", &self.def.primary_alias())
            .field("unit", &self.unit)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

/// A registration that only routes to subcommands.
#[derive(Debug)]
pub struct GroupRegistration {
    def: Arc<CommandDef>,
    subcommands: Vec<Arc<LeafRegistration>>,
}

impl GroupRegistration {
    pub fn new(def: CommandDef, subcommands: Vec<Arc<LeafRegistration>>) -> Self {
        Self {
            def: Arc::new(def),
            subcommands,
        }
    }

    pub fn definition(&self) -> &Arc<CommandDef> {
        &self.def
    }

    pub fn subcommands(&self) -> &[Arc<LeafRegistration>] {
        &self.subcommands
    }

    /// First subcommand, in declaration order, whose `alias + " " + sub`
    /// prefixes the raw command. Case-sensitive, no longest-match.
    pub fn resolve(&self, raw: &str, alias: &str) -> Option<Arc<LeafRegistration>> {
        self.subcommands
            .iter()
            .find(|leaf| {
                leaf.definition().aliases().iter().any(|sub| {
                    raw.strip_prefix(alias)
                        .and_then(|rest| rest.strip_prefix(' '))
                        .is_some_and(|rest| rest.starts_with(sub.as_str()))
                })
            })
            .cloned()
    }
}

/// One entry in the registration table.
#[derive(Debug, Clone)]
pub enum Registration {
    Leaf(Arc<LeafRegistration>),
    Group(Arc<GroupRegistration>),
}

impl Registration {
    pub fn definition(&self) -> &Arc<CommandDef> {
        match self {
            Self::Leaf(leaf) => leaf.definition(),
            Self::Group(group) => group.definition(),
        }
    }

    /// Resolve to the leaf that handles `raw`, typed with `alias`.
    pub fn resolve(&self, raw: &str, alias: &str) -> Option<Arc<LeafRegistration>> {
        match self {
            Self::Leaf(leaf) => Some(Arc::clone(leaf)),
            Self::Group(group) => group.resolve(raw, alias),
        }
    }

    /// Check the definition and, for groups, every subcommand definition.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        self.definition().validate()?;
        if let Self::Group(group) = self {
            for leaf in group.subcommands() {
                leaf.definition().validate()?;
            }
        }
        Ok(())
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Registration) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Arc::ptr_eq(a, b),
            (Self::Group(a), Self::Group(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn leaves(&self) -> Vec<(String, &Arc<LeafRegistration>)> {
        match self {
            Self::Leaf(leaf) => vec![(leaf.definition().primary_alias().to_string(), leaf)],
            Self::Group(group) => group
                .subcommands()
                .iter()
                .map(|leaf| {
                    let name = format!(
                        "{} {}",
                        group.definition().primary_alias(),
                        leaf.definition().primary_alias()
                    );
                    (name, leaf)
                })
                .collect(),
        }
    }
}

// ============================================================================
// Handler units
// ============================================================================

/// A logical unit of handlers that can be scanned into registrations.
pub trait CommandUnit: Send {
    /// Unit name used in logs.
    fn name(&self) -> &str;

    /// Produce registrations. `fallback` is applied to definitions that
    /// declare no permissions.
    fn scan(self: Box<Self>, fallback: &[String]) -> Result<Vec<Registration>, RegistrationError>;
}

enum InstanceSource<T> {
    /// One instance shared by every call.
    Shared(Arc<T>),
    /// A fresh instance per call.
    Factory(Arc<dyn Fn() -> anyhow::Result<T> + Send + Sync>),
}

impl<T> InstanceSource<T> {
    fn instance(&self) -> anyhow::Result<Arc<T>> {
        match self {
            Self::Shared(instance) => Ok(Arc::clone(instance)),
            Self::Factory(factory) => factory().map(Arc::new),
        }
    }
}

/// Handlers that share one instance provider.
///
/// With [`HandlerUnit::group`] the commands become subcommands of the group;
/// otherwise each command is registered top-level.
pub struct HandlerUnit<T> {
    name: String,
    source: InstanceSource<T>,
    group: Option<CommandDef>,
    commands: Vec<(CommandDef, Binding, Method<T>)>,
}

impl<T: Send + Sync + 'static> HandlerUnit<T> {
    /// Every call runs against the same instance.
    pub fn shared(name: impl Into<String>, instance: Arc<T>) -> Self {
        Self {
            name: name.into(),
            source: InstanceSource::Shared(instance),
            group: None,
            commands: Vec::new(),
        }
    }

    /// Every call constructs a fresh instance.
    pub fn with_factory<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source: InstanceSource::Factory(Arc::new(factory)),
            group: None,
            commands: Vec::new(),
        }
    }

    /// Turn this unit into a group routing to its commands.
    pub fn group(mut self, def: CommandDef) -> Self {
        self.group = Some(def);
        self
    }

    pub fn command<F>(mut self, def: CommandDef, binding: Binding, method: F) -> Self
    where
        F: Fn(&T, &Invocation<'_, '_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.commands.push((def, binding, Arc::new(method)));
        self
    }
}

impl<T: Send + Sync + 'static> CommandUnit for HandlerUnit<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan(self: Box<Self>, fallback: &[String]) -> Result<Vec<Registration>, RegistrationError> {
        let HandlerUnit {
            name,
            source,
            group,
            commands,
        } = *self;

        let group = match group {
            Some(def) => {
                def.validate()?;
                Some(def.with_fallback_permissions(fallback))
            }
            None => None,
        };
        // Subcommands inherit the group's permissions.
        let inherited = group
            .as_ref()
            .map(|g| g.required_permissions().to_vec())
            .unwrap_or_else(|| fallback.to_vec());

        let source = Arc::new(source);
        let mut leaves = Vec::with_capacity(commands.len());
        for (def, binding, method) in commands {
            if let Err(e) = def.validate() {
                warn!(unit = %name, alias = %def.primary_alias(), error = %e, "Rejected command");
                continue;
            }
            let def = def.with_fallback_permissions(&inherited);
            let command = def.primary_alias().to_string();
            let source = Arc::clone(&source);
            let entry: Entry = Arc::new(move |inv| {
                let instance = source
                    .instance()
                    .map_err(|e| InvocationError::Construction {
                        command: command.clone(),
                        reason: format!("{e:#}"),
                    })?;
                method(&instance, inv).map_err(|e| InvocationError::Handler {
                    command: command.clone(),
                    reason: format!("{e:#}"),
                })
            });
            leaves.push(Arc::new(LeafRegistration::from_entry(
                def,
                binding,
                name.clone(),
                entry,
            )));
        }

        Ok(match group {
            Some(def) => {
                if leaves.is_empty() {
                    warn!(unit = %name, alias = %def.primary_alias(), "Group has no subcommands");
                }
                vec![Registration::Group(Arc::new(GroupRegistration::new(
                    def, leaves,
                )))]
            }
            None => leaves.into_iter().map(Registration::Leaf).collect(),
        })
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Registration table keyed by alias.
pub struct Registry {
    table: DashMap<String, Registration>,
    default_permissions: Vec<String>,
}

impl Registry {
    /// Create an empty registry using the admin-bypass sentinel as default.
    pub fn new() -> Self {
        Self::with_default_permission(ADMIN_BYPASS)
    }

    pub fn with_default_permission(permission: impl Into<String>) -> Self {
        Self {
            table: DashMap::new(),
            default_permissions: vec![permission.into()],
        }
    }

    pub fn default_permissions(&self) -> &[String] {
        &self.default_permissions
    }

    /// Insert `registration` under every alias. Last registration wins.
    ///
    /// An invalid registration or alias is logged and nothing is inserted.
    /// Returns whether the registration was accepted.
    pub fn insert<S: AsRef<str>>(&self, aliases: &[S], registration: Registration) -> bool {
        let checked = registration.validate().and_then(|()| {
            aliases.iter().try_for_each(|alias| check_alias(alias.as_ref()))
        });
        if let Err(e) = checked {
            warn!(
                alias = %registration.definition().primary_alias(),
                error = %e,
                "Rejected registration"
            );
            return false;
        }

        for alias in aliases {
            let alias = alias.as_ref();
            if let Some(previous) = self.table.insert(alias.to_string(), registration.clone()) {
                if !previous.ptr_eq(&registration) {
                    warn!(alias = %alias, "Alias re-registered; previous handler replaced");
                }
            }
            info!(alias = %alias, "Registered command");
        }
        true
    }

    /// Register under the aliases declared by the registration itself.
    pub fn insert_registration(&self, registration: Registration) -> bool {
        let aliases = registration.definition().aliases().to_vec();
        self.insert(&aliases, registration)
    }

    /// Permissions a leaf requires: its own, else its group's, else the
    /// registry default.
    pub fn effective_permissions<'s>(
        &'s self,
        group: Option<&'s CommandDef>,
        leaf: &'s CommandDef,
    ) -> &'s [String] {
        [Some(leaf), group]
            .into_iter()
            .flatten()
            .map(CommandDef::required_permissions)
            .find(|perms| !perms.is_empty())
            .unwrap_or(self.default_permissions.as_slice())
    }

    pub fn lookup(&self, alias: &str) -> Option<Registration> {
        self.table.get(alias).map(|r| r.value().clone())
    }

    /// Scan a unit and populate the table. Returns the number of
    /// registrations added; a rejected unit is logged and yields zero.
    pub fn register<U: CommandUnit + 'static>(&self, unit: U) -> usize {
        self.register_boxed(Box::new(unit))
    }

    /// Scan several units. A failing unit never stops the rest.
    pub fn register_all<I>(&self, units: I) -> usize
    where
        I: IntoIterator<Item = Box<dyn CommandUnit>>,
    {
        units.into_iter().map(|u| self.register_boxed(u)).sum()
    }

    fn register_boxed(&self, unit: Box<dyn CommandUnit>) -> usize {
        let name = unit.name().to_string();
        match unit.scan(&self.default_permissions) {
            Ok(registrations) => {
                let count = registrations
                    .into_iter()
                    .map(|r| self.insert_registration(r))
                    .filter(|accepted| *accepted)
                    .count();
                debug!(unit = %name, count, "Scanned command unit");
                count
            }
            Err(e) => {
                warn!(unit = %name, error = %e, "Skipping command unit");
                0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// All registered aliases, sorted.
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<_> = self.table.iter().map(|e| e.key().clone()).collect();
        aliases.sort();
        aliases
    }

    fn distinct_registrations(&self) -> Vec<Registration> {
        let mut seen = HashSet::new();
        let mut out: Vec<Registration> = self
            .table
            .iter()
            .filter(|e| seen.insert(Arc::as_ptr(e.value().definition())))
            .map(|e| e.value().clone())
            .collect();
        out.sort_by(|a, b| {
            a.definition()
                .primary_alias()
                .cmp(b.definition().primary_alias())
        });
        out
    }

    /// Usage counts for commands that have been run, busiest first.
    pub fn command_stats(&self) -> Vec<(String, u64)> {
        let mut stats: Vec<_> = self
            .distinct_registrations()
            .iter()
            .flat_map(|r| {
                r.leaves()
                    .into_iter()
                    .map(|(name, leaf)| (name, leaf.invocations()))
                    .collect::<Vec<_>>()
            })
            .filter(|(_, count)| *count > 0)
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats
    }

    /// Definitions whose every permission the caller passes.
    pub fn visible_commands(
        &self,
        caller: &dyn Caller,
        gate: &dyn PermissionGate,
    ) -> Vec<Arc<CommandDef>> {
        self.distinct_registrations()
            .into_iter()
            .map(|r| Arc::clone(r.definition()))
            .filter(|def| {
                self.effective_permissions(None, def)
                    .iter()
                    .all(|p| gate.check(caller, p))
            })
            .collect()
    }
}

fn check_alias(alias: &str) -> Result<(), RegistrationError> {
    if alias.is_empty() {
        return Err(RegistrationError::BlankAlias);
    }
    if alias.chars().any(char::is_whitespace) {
        return Err(RegistrationError::AliasContainsSpace(alias.to_string()));
    }
    Ok(())
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::core::traits::{CallerKind, CallerPermissions};

    fn noop_leaf(def: CommandDef) -> Registration {
        Registration::Leaf(Arc::new(LeafRegistration::new(
            def,
            Binding::context(),
            |_| Ok(()),
        )))
    }

    struct Perms(Vec<&'static str>);

    impl Caller for Perms {
        fn name(&self) -> &str {
            "perms"
        }
        fn kind(&self) -> CallerKind {
            CallerKind::Console
        }
        fn has_permission(&self, permission: &str) -> bool {
            self.0.contains(&permission)
        }
        fn explain_command(&self, _message: &str, _command: Option<&CommandDef>) {}
        fn send_message(&self, _message: &str) {}
    }

    struct Zone;

    // ========================================================================
    // Table
    // ========================================================================

    #[test]
    fn lookup_returns_latest_registration() {
        let registry = Registry::new();
        let first = noop_leaf(CommandDef::new(["greet"]));
        let second = noop_leaf(CommandDef::new(["greet"]));

        registry.insert(&["greet"], first.clone());
        registry.insert(&["greet"], second.clone());

        let found = registry.lookup("greet").expect("registered");
        assert!(found.ptr_eq(&second));
        assert!(!found.ptr_eq(&first));
    }

    #[test]
    fn registering_twice_is_idempotent() {
        let registry = Registry::new();
        let reg = noop_leaf(CommandDef::new(["greet"]));
        registry.insert(&["greet"], reg.clone());
        registry.insert(&["greet"], reg.clone());
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("greet").is_some_and(|r| r.ptr_eq(&reg)));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = Registry::new();
        registry.insert_registration(noop_leaf(CommandDef::new(["greet"])));
        assert!(registry.lookup("GREET").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn every_alias_points_at_same_registration() {
        let registry = Registry::new();
        let reg = noop_leaf(CommandDef::new(["teleport", "tp"]));
        registry.insert_registration(reg.clone());
        assert_eq!(registry.aliases(), vec!["teleport", "tp"]);
        assert!(registry.lookup("tp").is_some_and(|r| r.ptr_eq(&reg)));
    }

    #[test]
    fn insert_rejects_invalid_definitions() {
        let registry = Registry::new();
        assert!(!registry.insert_registration(noop_leaf(CommandDef::new(["bad"]).min(3).max(1))));
        assert!(!registry.insert(&["two words"], noop_leaf(CommandDef::new(["ok"]))));
        assert!(!registry.insert(&[""], noop_leaf(CommandDef::new(["ok"]))));
        assert!(registry.is_empty());

        let group = GroupRegistration::new(
            CommandDef::new(["zone"]),
            vec![Arc::new(LeafRegistration::new(
                CommandDef::new(["x"]).flags(["f"]).value_flags(["f"]),
                Binding::context(),
                |_| Ok(()),
            ))],
        );
        assert!(!registry.insert_registration(Registration::Group(Arc::new(group))));
        assert!(registry.lookup("zone").is_none());
    }

    #[test]
    fn effective_permissions_fall_back_in_order() {
        let registry = Registry::with_default_permission("op");
        let bare = CommandDef::new(["bare"]);
        let own = CommandDef::new(["own"]).permission("own.use");
        let group = CommandDef::new(["zone"]).permission("zone.use");

        assert_eq!(registry.effective_permissions(None, &bare), ["op".to_string()]);
        assert_eq!(
            registry.effective_permissions(Some(&group), &bare),
            ["zone.use".to_string()]
        );
        assert_eq!(
            registry.effective_permissions(Some(&group), &own),
            ["own.use".to_string()]
        );
    }

    // ========================================================================
    // Units
    // ========================================================================

    #[test]
    fn plain_unit_registers_each_command() {
        let registry = Registry::new();
        let unit = HandlerUnit::shared("misc", Arc::new(Zone))
            .command(CommandDef::new(["a"]), Binding::context(), |_, _| Ok(()))
            .command(CommandDef::new(["b", "bee"]), Binding::context(), |_, _| {
                Ok(())
            });
        assert_eq!(registry.register(unit), 2);
        assert_eq!(registry.len(), 3);
        let b = registry.lookup("bee").expect("registered");
        assert_eq!(
            b.definition().required_permissions(),
            [ADMIN_BYPASS.to_string()]
        );
    }

    #[test]
    fn invalid_command_is_skipped_not_fatal() {
        let registry = Registry::new();
        let unit = HandlerUnit::shared("misc", Arc::new(Zone))
            .command(CommandDef::new(["bad"]).min(2).max(1), Binding::context(), |_, _| Ok(()))
            .command(CommandDef::new(["good"]), Binding::context(), |_, _| Ok(()));
        assert_eq!(registry.register(unit), 1);
        assert!(registry.lookup("bad").is_none());
        assert!(registry.lookup("good").is_some());
    }

    #[test]
    fn invalid_group_skips_unit() {
        let registry = Registry::new();
        let unit = HandlerUnit::shared("broken", Arc::new(Zone))
            .group(CommandDef::new(["has space"]))
            .command(CommandDef::new(["x"]), Binding::context(), |_, _| Ok(()));
        assert_eq!(registry.register(unit), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn group_subcommands_inherit_permissions() {
        let registry = Registry::new();
        let unit = HandlerUnit::shared("region", Arc::new(Zone))
            .group(CommandDef::new(["region"]).permission("region.use"))
            .command(CommandDef::new(["create"]), Binding::context(), |_, _| Ok(()))
            .command(
                CommandDef::new(["delete"]).permission("region.delete"),
                Binding::context(),
                |_, _| Ok(()),
            );
        registry.register(unit);

        let Some(Registration::Group(group)) = registry.lookup("region") else {
            panic!("expected group");
        };
        let perms: Vec<_> = group
            .subcommands()
            .iter()
            .map(|l| l.definition().required_permissions().to_vec())
            .collect();
        assert_eq!(perms[0], vec!["region.use".to_string()]);
        assert_eq!(perms[1], vec!["region.delete".to_string()]);
    }

    #[test]
    fn register_all_continues_past_failures() {
        let registry = Registry::new();
        let units: Vec<Box<dyn CommandUnit>> = vec![
            Box::new(HandlerUnit::shared("bad", Arc::new(Zone)).group(CommandDef::new([""]))),
            Box::new(
                HandlerUnit::shared("good", Arc::new(Zone))
                    .command(CommandDef::new(["ok"]), Binding::context(), |_, _| Ok(())),
            ),
        ];
        assert_eq!(registry.register_all(units), 1);
        assert!(registry.lookup("ok").is_some());
    }

    // ========================================================================
    // Group resolution
    // ========================================================================

    #[test]
    fn group_resolves_first_matching_prefix() {
        let group = GroupRegistration::new(
            CommandDef::new(["region"]),
            vec![
                Arc::new(LeafRegistration::new(
                    CommandDef::new(["create", "new"]),
                    Binding::context(),
                    |_| Ok(()),
                )),
                Arc::new(LeafRegistration::new(
                    CommandDef::new(["createall"]),
                    Binding::context(),
                    |_| Ok(()),
                )),
            ],
        );

        let hit = group.resolve("region create spawn", "region").expect("match");
        assert_eq!(hit.definition().primary_alias(), "create");
        let hit = group.resolve("region new", "region").expect("match");
        assert_eq!(hit.definition().primary_alias(), "create");
        // Literal prefix: the earlier declaration shadows the longer alias.
        let hit = group.resolve("region createall", "region").expect("match");
        assert_eq!(hit.definition().primary_alias(), "create");
        assert!(group.resolve("region", "region").is_none());
        assert!(group.resolve("region CREATE", "region").is_none());
    }

    // ========================================================================
    // Stats and help
    // ========================================================================

    #[test]
    fn command_stats_counts_successful_calls() {
        let registry = Registry::new();
        let leaf = Arc::new(LeafRegistration::new(
            CommandDef::new(["ping", "p"]),
            Binding::context(),
            |_| Ok(()),
        ));
        registry.insert_registration(Registration::Leaf(Arc::clone(&leaf)));
        registry.insert_registration(noop_leaf(CommandDef::new(["idle"])));

        assert!(registry.command_stats().is_empty());

        let caller = Perms(vec![]);
        let ctx = crate::handlers::core::context::Context::new(vec![], vec![], &caller, None, vec![]);
        let inv = Invocation::bind(Binding::context(), &ctx);
        leaf.call(&inv).expect("call");
        leaf.call(&inv).expect("call");

        assert_eq!(registry.command_stats(), vec![("ping".to_string(), 2)]);
    }

    #[test]
    fn visible_commands_filters_by_permission() {
        let registry = Registry::new();
        registry.insert_registration(noop_leaf(CommandDef::new(["open"]).permission("open.use")));
        registry.insert_registration(noop_leaf(CommandDef::new(["secret"])));

        let caller = Perms(vec!["open.use"]);
        let visible = registry.visible_commands(&caller, &CallerPermissions);
        let names: Vec<_> = visible.iter().map(|d| d.primary_alias().to_string()).collect();
        assert_eq!(names, vec!["open"]);
    }
}
