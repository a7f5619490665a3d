//! Per-invocation latency recording.

use std::time::Instant;

/// Times one handler invocation.
///
/// The latency is recorded under the command's canonical alias when the
/// guard drops, labelled `ok` unless [`CommandTimer::fail`] was called.
pub struct CommandTimer {
    command: String,
    outcome: &'static str,
    start: Instant,
}

impl CommandTimer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            outcome: "ok",
            start: Instant::now(),
        }
    }

    /// Record this invocation as failed.
    pub fn fail(&mut self) {
        self.outcome = "error";
    }

    pub fn outcome(&self) -> &'static str {
        self.outcome
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, self.outcome, elapsed);
    }
}
