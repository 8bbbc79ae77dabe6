use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ALERTS_PROCESSED_TOTAL: IntCounter = IntCounter::with_opts(Opts::new(
        "vibedebugger_alerts_processed_total",
        "Total number of alert entries processed."
    ))
    .unwrap();
    pub static ref INVESTIGATIONS_FAILED_TOTAL: IntCounter = IntCounter::with_opts(Opts::new(
        "vibedebugger_investigations_failed_total",
        "Total number of investigations that degraded on an internal error."
    ))
    .unwrap();
    pub static ref TOOL_CALLS_TOTAL: IntCounter = IntCounter::with_opts(Opts::new(
        "vibedebugger_tool_calls_total",
        "Total number of diagnostic tool invocations."
    ))
    .unwrap();
    pub static ref SINK_FAILURES_TOTAL: IntCounter = IntCounter::with_opts(Opts::new(
        "vibedebugger_sink_failures_total",
        "Total number of failed notification deliveries."
    ))
    .unwrap();
}

/// Register all counters. Call once at startup.
pub fn register_metrics() {
    for counter in [
        &*ALERTS_PROCESSED_TOTAL,
        &*INVESTIGATIONS_FAILED_TOTAL,
        &*TOOL_CALLS_TOTAL,
        &*SINK_FAILURES_TOTAL,
    ] {
        // A duplicate registration only happens when called twice; ignore it.
        let _ = REGISTRY.register(Box::new(counter.clone()));
    }
}

/// Gather metrics in the prometheus text exposition format.
pub fn gather_metrics() -> String {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}
