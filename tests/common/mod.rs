//! Integration test common infrastructure.
//!
//! Provides a recording caller and helpers for building dispatchers.

#![allow(dead_code)]

use cmdbus::handlers::{Caller, CallerKind, CommandDef, Location, World};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One `explain_command` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explained {
    pub message: String,
    pub command: Option<String>,
}

/// Caller that records everything it is told.
pub struct RecordingCaller {
    name: String,
    kind: CallerKind,
    granted: Vec<String>,
    pub location: Option<Location>,
    explained: Mutex<Vec<Explained>>,
    output: Mutex<Vec<String>>,
    permission_checks: AtomicUsize,
}

impl RecordingCaller {
    /// A console caller holding every permission.
    pub fn console() -> Self {
        Self::new("Console", CallerKind::Console, &["*"])
    }

    /// A player standing at the origin of `world`.
    pub fn player(name: &str, world: &str, granted: &[&str]) -> Self {
        let mut caller = Self::new(name, CallerKind::Player, granted);
        caller.location = Some(Location::new(World::new(world), 0.0, 64.0, 0.0));
        caller
    }

    pub fn new(name: &str, kind: CallerKind, granted: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            granted: granted.iter().map(|p| p.to_string()).collect(),
            location: None,
            explained: Mutex::new(Vec::new()),
            output: Mutex::new(Vec::new()),
            permission_checks: AtomicUsize::new(0),
        }
    }

    pub fn explained(&self) -> Vec<Explained> {
        self.explained.lock().clone()
    }

    pub fn output(&self) -> Vec<String> {
        self.output.lock().clone()
    }

    pub fn permission_checks(&self) -> usize {
        self.permission_checks.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.explained.lock().clear();
        self.output.lock().clear();
    }
}

impl Caller for RecordingCaller {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CallerKind {
        self.kind
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permission_checks.fetch_add(1, Ordering::SeqCst);
        self.granted.iter().any(|p| p == "*" || p == permission)
    }

    fn explain_command(&self, message: &str, command: Option<&CommandDef>) {
        self.explained.lock().push(Explained {
            message: message.to_string(),
            command: command.map(|c| c.primary_alias().to_string()),
        });
    }

    fn send_message(&self, message: &str) {
        self.output.lock().push(message.to_string());
    }
}
