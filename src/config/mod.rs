//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: top-level `Config` and loading
//! - [`dispatch`]: parser/invoker policy (`DispatchConfig`, `JoinTail`)
//! - [`messages`]: user-facing message templates (`MessagesConfig`)
//! - [`logging`]: tracing subscriber settings (`LoggingConfig`)
//! - [`validation`]: startup checks

mod dispatch;
mod logging;
mod messages;
mod types;
pub mod validation;

pub use dispatch::{DispatchConfig, JoinTail};
pub use logging::{LogFormat, LoggingConfig};
pub use messages::MessagesConfig;
pub use types::{Config, ConfigError};
