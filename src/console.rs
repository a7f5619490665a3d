//! Console front-end: reads command lines and dispatches them.

use crate::dispatch::Dispatcher;
use crate::handlers::core::{Caller, CallerKind, CommandDef};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// The server console. Holds every permission and has no location.
#[derive(Debug, Clone)]
pub struct ConsoleCaller {
    name: String,
}

impl ConsoleCaller {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ConsoleCaller {
    fn default() -> Self {
        Self::new("Console")
    }
}

impl Caller for ConsoleCaller {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CallerKind {
        CallerKind::Console
    }

    fn has_permission(&self, _permission: &str) -> bool {
        true
    }

    fn explain_command(&self, message: &str, command: Option<&CommandDef>) {
        println!("{message}");
        if let Some(def) = command {
            println!("Usage: {}", def.usage_line());
        }
    }

    fn send_message(&self, message: &str) {
        println!("{message}");
    }
}

/// Dispatch every line from `reader` until EOF or a `quit` line.
///
/// Returns the number of lines dispatched.
pub async fn run_lines<R>(
    reader: R,
    dispatcher: &Dispatcher,
    caller: &dyn Caller,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut dispatched = 0;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end_matches('\r');
        if line == "quit" {
            debug!("Console quit requested");
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        dispatcher.process(line, Some(caller), None);
        dispatched += 1;
    }
    Ok(dispatched)
}
