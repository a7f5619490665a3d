//! Ban list commands.

use crate::handlers::core::{Binding, CommandDef, HandlerUnit, Invocation};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// One ban entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ban {
    pub target: String,
    pub reason: Option<String>,
    pub issuer: String,
}

/// In-memory ban list shared by every call.
#[derive(Debug, Default)]
pub struct BanList {
    entries: RwLock<Vec<Ban>>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_banned(&self, target: &str) -> bool {
        self.entries.read().iter().any(|b| b.target == target)
    }

    pub fn get(&self, target: &str) -> Option<Ban> {
        self.entries.read().iter().find(|b| b.target == target).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn ban(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let ctx = inv.context;
        let target = ctx
            .arg(0)
            .ok_or_else(|| anyhow::anyhow!("ban target missing after parse"))?;
        if self.is_banned(target) {
            inv.reply(&format!("{target} is already banned."));
            return Ok(());
        }

        let ban = Ban {
            target: target.to_string(),
            reason: ctx.flag_value("reason").map(str::to_string),
            issuer: ctx.caller().name().to_string(),
        };
        info!(target = %ban.target, issuer = %ban.issuer, reason = ?ban.reason, "Ban added");
        self.entries.write().push(ban);

        if !ctx.has_flag("silent") {
            match ctx.flag_value("reason") {
                Some(reason) => inv.reply(&format!("Banned {target}: {reason}")),
                None => inv.reply(&format!("Banned {target}.")),
            }
        }
        Ok(())
    }

    fn unban(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let target = inv
            .context
            .arg(0)
            .ok_or_else(|| anyhow::anyhow!("unban target missing after parse"))?;
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|b| b.target != target);
            before != entries.len()
        };
        if removed {
            info!(target = %target, "Ban removed");
            inv.reply(&format!("Unbanned {target}."));
        } else {
            inv.reply(&format!("{target} is not banned."));
        }
        Ok(())
    }
}

pub fn unit(bans: Arc<BanList>) -> HandlerUnit<BanList> {
    HandlerUnit::shared("moderation", bans)
        .command(
            CommandDef::new(["ban"])
                .permission("mod.ban")
                .args(["target"])
                .flags(["silent"])
                .value_flags(["reason"])
                .min(1)
                .max(1)
                .description("Ban a player")
                .usage("[-silent] [-reason <reason>] <target>"),
            Binding::context(),
            BanList::ban,
        )
        .command(
            CommandDef::new(["unban", "pardon"])
                .permission("mod.ban")
                .args(["target"])
                .min(1)
                .max(1)
                .description("Lift a ban")
                .usage("<target>"),
            Binding::context(),
            BanList::unban,
        )
}
