//! Built-in command units wired into the console front-end.
//!
//! - [`social`]: `greet`, `say`
//! - [`moderation`]: `ban`, `unban`
//! - [`region`]: the `region` group (`create`, `delete`, `list`)
//! - [`info`]: `help`, `stats`

pub mod info;
pub mod moderation;
pub mod region;
pub mod social;

pub use moderation::BanList;
pub use region::RegionStore;

use crate::handlers::core::{CommandUnit, Registry};
use std::sync::Arc;

/// Every built-in unit. `registry` backs `help` and `stats`.
pub fn units(
    registry: &Arc<Registry>,
    bans: Arc<BanList>,
    regions: Arc<RegionStore>,
) -> Vec<Box<dyn CommandUnit>> {
    vec![
        Box::new(social::unit()),
        Box::new(moderation::unit(bans)),
        Box::new(region::unit(regions)),
        Box::new(info::unit(registry)),
    ]
}
