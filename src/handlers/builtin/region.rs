//! Region management group.

use crate::handlers::core::{Binding, CommandDef, HandlerUnit, Invocation, Location};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named region anchored at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub owner: String,
    pub origin: Location,
}

/// Regions keyed by world, then name.
#[derive(Debug, Default)]
pub struct RegionStore {
    worlds: RwLock<BTreeMap<String, BTreeMap<String, Region>>>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, world: &str, name: &str) -> Option<Region> {
        self.worlds.read().get(world)?.get(name).cloned()
    }

    pub fn names(&self, world: &str) -> Vec<String> {
        self.worlds
            .read()
            .get(world)
            .map(|regions| regions.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn create(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let Some(player) = inv.caller else {
            inv.reply("Only players can create regions.");
            return Ok(());
        };
        let Some(origin) = inv.location else {
            inv.reply("You need to be in a world to create a region.");
            return Ok(());
        };
        let name = inv
            .context
            .named("name")
            .ok_or_else(|| anyhow::anyhow!("region name missing after parse"))?;

        let mut worlds = self.worlds.write();
        let regions = worlds.entry(origin.world.name.clone()).or_default();
        if regions.contains_key(name) {
            inv.reply(&format!("Region '{name}' already exists."));
            return Ok(());
        }
        regions.insert(
            name.to_string(),
            Region {
                name: name.to_string(),
                owner: player.name().to_string(),
                origin: origin.clone(),
            },
        );
        inv.reply(&format!("Created region '{name}' in {}.", origin.world.name));
        Ok(())
    }

    fn delete(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let Some(world) = inv.world else {
            inv.reply("You need to be in a world to delete a region.");
            return Ok(());
        };
        let name = inv
            .context
            .named("name")
            .ok_or_else(|| anyhow::anyhow!("region name missing after parse"))?;
        let removed = self
            .worlds
            .write()
            .get_mut(&world.name)
            .and_then(|regions| regions.remove(name));
        match removed {
            Some(_) => inv.reply(&format!("Deleted region '{name}'.")),
            None => inv.reply(&format!("No region named '{name}' in {}.", world.name)),
        }
        Ok(())
    }

    fn list(&self, inv: &Invocation<'_, '_>) -> anyhow::Result<()> {
        let world = match (inv.context.named("world"), inv.world) {
            (Some(named), _) => named.to_string(),
            (None, Some(here)) => here.name.clone(),
            (None, None) => {
                inv.reply("Specify a world.");
                return Ok(());
            }
        };
        let names = self.names(&world);
        if names.is_empty() {
            inv.reply(&format!("No regions in {world}."));
        } else {
            inv.reply(&format!("Regions in {world}: {}", names.join(", ")));
        }
        Ok(())
    }
}

pub fn unit(store: Arc<RegionStore>) -> HandlerUnit<RegionStore> {
    HandlerUnit::shared("region", store)
        .group(
            CommandDef::new(["region", "rg"])
                .permission("region.use")
                .description("Manage regions"),
        )
        .command(
            CommandDef::new(["create"])
                .permissions(["region.use", "region.create"])
                .args(["name"])
                .min(1)
                .max(1)
                .usage("<name>"),
            Binding::player().with_location(),
            RegionStore::create,
        )
        .command(
            CommandDef::new(["delete", "remove"])
                .permissions(["region.use", "region.delete"])
                .args(["name"])
                .min(1)
                .max(1)
                .usage("<name>"),
            Binding::context().with_world(),
            RegionStore::delete,
        )
        .command(
            CommandDef::new(["list"])
                .args(["world"])
                .max(1)
                .usage("[world]"),
            Binding::context().with_world(),
            RegionStore::list,
        )
}
