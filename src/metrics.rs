//! Prometheus metrics collection for cmdbus.
//!
//! - `cmdbus_command_total{command}` - commands invoked by canonical alias
//! - `cmdbus_command_duration_seconds{command,outcome}` - invocation latency histogram, `ok` or `error`
//! - `cmdbus_command_errors_total{command,kind}` - failures by error code
//! - `cmdbus_binding_mismatch_total{command}` - caller-slot mismatches that bound absent
//!
//! Recording is a no-op until [`init`] has run.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Commands invoked by canonical alias.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Invocation latency by canonical alias and outcome.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Dispatch failures by command and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Caller-slot mismatches bound as absent.
pub static BINDING_MISMATCHES: OnceLock<IntCounterVec> = OnceLock::new();

/// Register all metrics. Safe to call more than once.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("cmdbus_command_total", "Commands invoked by alias"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("cmdbus_command_duration_seconds", "Command latency by alias and outcome")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["command", "outcome"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("cmdbus_command_errors_total", "Command failures by kind"), &["command", "kind"]));
    register!(BINDING_MISMATCHES, IntCounterVec::new(Opts::new("cmdbus_binding_mismatch_total", "Caller-slot mismatches bound as absent"), &["command"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a command execution with latency. `outcome` is `ok` or `error`.
#[inline]
pub fn record_command(command: &str, outcome: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command, outcome]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, kind: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, kind]).inc();
    }
}

/// Record a caller-slot mismatch.
#[inline]
pub fn record_binding_mismatch(command: &str) {
    if let Some(c) = BINDING_MISMATCHES.get() {
        c.with_label_values(&[command]).inc();
    }
}
