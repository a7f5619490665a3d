//! `help` and `stats`.

use crate::handlers::core::{
    Binding, CallerPermissions, CommandDef, HandlerUnit, Invocation, Registry,
};
use std::sync::{Arc, Weak};

/// Reads the registry it is registered into.
pub struct Info {
    registry: Weak<Registry>,
}

impl Info {
    fn registry(&self) -> anyhow::Result<Arc<Registry>> {
        self.registry
            .upgrade()
            .ok_or_else(|| anyhow::anyhow!("registry dropped"))
    }

    fn help(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let registry = self.registry()?;
        let caller = inv.context.caller();
        let visible = registry.visible_commands(caller, &CallerPermissions);
        if visible.is_empty() {
            inv.reply("No commands available.");
            return Ok(());
        }
        inv.reply("Commands:");
        for def in visible {
            if def.describe().is_empty() {
                inv.reply(&format!("  {}", def.usage_line()));
            } else {
                inv.reply(&format!("  {} - {}", def.usage_line(), def.describe()));
            }
        }
        Ok(())
    }

    fn stats(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let registry = self.registry()?;
        let stats = registry.command_stats();
        if stats.is_empty() {
            inv.reply("No commands have been used yet.");
            return Ok(());
        }
        for (command, count) in stats {
            inv.reply(&format!("  {command}: {count}"));
        }
        Ok(())
    }
}

pub fn unit(registry: &Arc<Registry>) -> HandlerUnit<Info> {
    let info = Arc::new(Info {
        registry: Arc::downgrade(registry),
    });
    HandlerUnit::shared("info", info)
        .command(
            CommandDef::new(["help", "?"])
                .permission("info.help")
                .max(0)
                .description("List the commands you can use"),
            Binding::context(),
            Info::help,
        )
        .command(
            CommandDef::new(["stats"])
                .permission("info.stats")
                .max(0)
                .description("Show command usage counts"),
            Binding::context(),
            Info::stats,
        )
}
