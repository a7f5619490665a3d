//! Greeting and chat commands.

use crate::handlers::core::{Binding, CommandDef, HandlerUnit, Invocation};

/// Stateless; a fresh instance is built per call.
#[derive(Debug, Default)]
pub struct Social;

impl Social {
    fn greet(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let name = inv.context.named("name").unwrap_or("stranger");
        inv.reply(&format!("Hello, {name}!"));
        Ok(())
    }

    fn say(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let from = inv.caller.map(|c| c.name()).unwrap_or("someone");
        let message = inv.context.named("message").unwrap_or_default();
        if inv.context.has_flag("shout") {
            inv.reply(&format!("<{from}> {}", message.to_uppercase()));
        } else {
            inv.reply(&format!("<{from}> {message}"));
        }
        Ok(())
    }
}

pub fn unit() -> HandlerUnit<Social> {
    HandlerUnit::with_factory("social", || Ok(Social))
        .command(
            CommandDef::new(["greet", "hello"])
                .permission("social.greet")
                .args(["name"])
                .min(1)
                .max(1)
                .description("Greet someone")
                .usage("<name>"),
            Binding::context(),
            Social::greet,
        )
        .command(
            CommandDef::new(["say"])
                .permission("social.say")
                .args(["message"])
                .flags(["shout"])
                .min(1)
                .max(1)
                .join()
                .description("Broadcast a message")
                .usage("[-shout] <message...>"),
            Binding::any_caller(),
            Social::say,
        )
}
