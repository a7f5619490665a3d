//! Handler invocation.
//!
//! Binds the parsed context to the leaf's declared [`Binding`], runs the
//! handler and turns every failure (construction error, handler error,
//! panic) into an [`InvocationError`].

use crate::error::InvocationError;
use crate::handlers::core::{CallerSlot, Context, Invocation, LeafRegistration};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// Runs resolved leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invoker {
    strict_caller_binding: bool,
}

impl Invoker {
    pub fn new(strict_caller_binding: bool) -> Self {
        Self {
            strict_caller_binding,
        }
    }

    pub fn invoke(
        &self,
        leaf: &LeafRegistration,
        context: &Context<'_>,
    ) -> Result<(), InvocationError> {
        let command = leaf.definition().primary_alias();
        let binding = leaf.binding();
        let invocation = Invocation::bind(binding, context);

        if invocation.caller_mismatch() {
            crate::metrics::record_binding_mismatch(command);
            let expected = match binding.caller {
                CallerSlot::Kind(kind) => kind.as_str(),
                _ => "matching",
            };
            if self.strict_caller_binding {
                return Err(InvocationError::CallerRequired {
                    command: command.to_string(),
                    expected,
                });
            }
            warn!(
                command = %command,
                caller = %context.caller().name(),
                caller_kind = %context.caller().kind(),
                expected = %expected,
                "caller does not match handler caller slot; binding absent"
            );
        }

        match panic::catch_unwind(AssertUnwindSafe(|| leaf.call(&invocation))) {
            Ok(result) => result,
            Err(payload) => Err(InvocationError::Panicked {
                command: command.to_string(),
                reason: panic_reason(payload.as_ref()),
            }),
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::core::{
        Binding, Caller, CallerKind, CommandDef, HandlerUnit, Registration, Registry,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Console;

    impl Caller for Console {
        fn name(&self) -> &str {
            "console"
        }
        fn kind(&self) -> CallerKind {
            CallerKind::Console
        }
        fn has_permission(&self, _permission: &str) -> bool {
            true
        }
        fn explain_command(&self, _message: &str, _command: Option<&CommandDef>) {}
        fn send_message(&self, _message: &str) {}
    }

    fn ctx(caller: &Console) -> Context<'_> {
        Context::new(vec![], vec![], caller, None, vec![])
    }

    #[test]
    fn success_yields_ok() {
        let leaf = LeafRegistration::new(CommandDef::new(["ok"]), Binding::any_caller(), |inv| {
            assert!(inv.caller.is_some());
            Ok(())
        });
        let caller = Console;
        assert_eq!(Invoker::default().invoke(&leaf, &ctx(&caller)), Ok(()));
        assert_eq!(leaf.invocations(), 1);
    }

    #[test]
    fn handler_error_is_converted() {
        let leaf = LeafRegistration::new(CommandDef::new(["fail"]), Binding::context(), |_| {
            anyhow::bail!("disk full")
        });
        let caller = Console;
        let err = Invoker::default().invoke(&leaf, &ctx(&caller)).unwrap_err();
        assert_eq!(
            err,
            InvocationError::Handler {
                command: "fail".into(),
                reason: "disk full".into()
            }
        );
        assert_eq!(leaf.invocations(), 0);
    }

    #[test]
    fn panic_is_caught() {
        let leaf = LeafRegistration::new(CommandDef::new(["boom"]), Binding::context(), |_| {
            panic!("kaboom")
        });
        let caller = Console;
        let err = Invoker::default().invoke(&leaf, &ctx(&caller)).unwrap_err();
        assert!(matches!(err, InvocationError::Panicked { ref reason, .. } if reason == "kaboom"));
    }

    #[test]
    fn mismatched_caller_binds_absent_by_default() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in = Arc::clone(&seen);
        let leaf = LeafRegistration::new(CommandDef::new(["home"]), Binding::player(), move |inv| {
            assert!(inv.caller.is_none());
            assert!(inv.caller_mismatch());
            seen_in.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let caller = Console;
        assert_eq!(Invoker::new(false).invoke(&leaf, &ctx(&caller)), Ok(()));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn mismatched_caller_fails_when_strict() {
        let leaf = LeafRegistration::new(CommandDef::new(["home"]), Binding::player(), |_| {
            panic!("must not run")
        });
        let caller = Console;
        let err = Invoker::new(true).invoke(&leaf, &ctx(&caller)).unwrap_err();
        assert_eq!(
            err,
            InvocationError::CallerRequired {
                command: "home".into(),
                expected: "player"
            }
        );
    }

    // ========================================================================
    // Instance providers
    // ========================================================================

    struct Counter {
        hits: AtomicUsize,
    }

    fn single_leaf(registry: &Registry, alias: &str) -> Arc<LeafRegistration> {
        match registry.lookup(alias) {
            Some(Registration::Leaf(leaf)) => leaf,
            Some(Registration::Group(group)) => Arc::clone(&group.subcommands()[0]),
            None => panic!("{alias} not registered"),
        }
    }

    #[test]
    fn shared_instance_is_reused() {
        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        let registry = Registry::new();
        registry.register(HandlerUnit::shared("count", Arc::clone(&counter)).command(
            CommandDef::new(["hit"]),
            Binding::context(),
            |c: &Counter, _| {
                c.hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        ));
        let leaf = single_leaf(&registry, "hit");
        let caller = Console;
        Invoker::default().invoke(&leaf, &ctx(&caller)).unwrap();
        Invoker::default().invoke(&leaf, &ctx(&caller)).unwrap();
        assert_eq!(counter.hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn factory_constructs_per_call() {
        let built = Arc::new(AtomicUsize::new(0));
        let built_in = Arc::clone(&built);
        let registry = Registry::new();
        registry.register(
            HandlerUnit::with_factory("fresh", move || {
                built_in.fetch_add(1, Ordering::SeqCst);
                Ok(Counter {
                    hits: AtomicUsize::new(0),
                })
            })
            .command(CommandDef::new(["hit"]), Binding::context(), |c: &Counter, _| {
                assert_eq!(c.hits.fetch_add(1, Ordering::SeqCst), 0);
                Ok(())
            }),
        );
        let leaf = single_leaf(&registry, "hit");
        let caller = Console;
        Invoker::default().invoke(&leaf, &ctx(&caller)).unwrap();
        Invoker::default().invoke(&leaf, &ctx(&caller)).unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn factory_failure_is_construction_error() {
        let registry = Registry::new();
        registry.register(
            HandlerUnit::<Counter>::with_factory("broken", || anyhow::bail!("no database"))
                .group(CommandDef::new(["db"]))
                .command(CommandDef::new(["stat"]), Binding::context(), |_, _| Ok(())),
        );
        let Some(Registration::Group(group)) = registry.lookup("db") else {
            panic!("expected group");
        };
        let caller = Console;
        let err = Invoker::default()
            .invoke(&group.subcommands()[0], &ctx(&caller))
            .unwrap_err();
        assert!(matches!(err, InvocationError::Construction { ref command, .. } if command == "stat"));
    }
}
