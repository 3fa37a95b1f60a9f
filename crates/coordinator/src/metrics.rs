//! Metrics collection for the dispatch coordinator
//!
//! This module provides dispatch-level metrics using the metrics crate
//! facade; exporters are wired by the embedding process.

use anyhow::Result;
use metrics::{counter, gauge, histogram, Counter, Gauge, Histogram};
use tracing::warn;

/// Metrics recorded around dispatch calls and host selection
pub struct DispatchMetrics {
    // Dispatch outcome metrics
    dispatches_total: Counter,
    dispatch_failures_total: Counter,
    no_suitable_worker_total: Counter,

    // Latency metrics
    dispatch_duration: Histogram,
    host_selection_duration: Histogram,

    // Registry metrics
    registered_executors: Gauge,
}

impl DispatchMetrics {
    /// Initialize the dispatch metrics handles
    pub fn new() -> Result<Self> {
        let dispatches_total = counter!("dispatch_requests_total");
        let dispatch_failures_total = counter!("dispatch_failures_total");
        let no_suitable_worker_total = counter!("dispatch_no_suitable_worker_total");

        let dispatch_duration = histogram!("dispatch_duration_seconds");
        let host_selection_duration = histogram!("dispatch_host_selection_duration_seconds");

        let registered_executors = gauge!("dispatch_registered_executors");

        Ok(Self {
            dispatches_total,
            dispatch_failures_total,
            no_suitable_worker_total,
            dispatch_duration,
            host_selection_duration,
            registered_executors,
        })
    }

    /// Record a completed dispatch call, whatever its outcome
    pub fn record_dispatch(&self, duration_seconds: f64) {
        self.dispatches_total.increment(1);
        self.dispatch_duration.record(duration_seconds);
    }

    /// Record a failed dispatch call
    pub fn record_dispatch_failure(&self, category: &str, error_kind: &str) {
        self.dispatch_failures_total.increment(1);

        warn!(
            category = category,
            error_kind = error_kind,
            "Dispatch call failed"
        );
    }

    /// Record a dispatch that found no live host for its worker group
    pub fn record_no_suitable_worker(&self) {
        self.no_suitable_worker_total.increment(1);
    }

    /// Record host selection duration
    pub fn record_selection_duration(&self, duration_seconds: f64) {
        self.host_selection_duration.record(duration_seconds);
    }

    /// Update the number of registered executors
    pub fn update_registered_executors(&self, count: f64) {
        self.registered_executors.set(count);
    }
}
