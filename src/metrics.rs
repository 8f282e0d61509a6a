//! Prometheus metrics for request outcomes and calculation latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::{AverageError, Result};

// === Metric Name Constants ===

/// Calculation requests counter metric name, labelled by outcome.
pub const METRIC_REQUESTS: &str = "average_requests_total";
/// Calculation latency metric name.
pub const METRIC_CALCULATION_LATENCY: &str = "average_calculation_latency_ms";
/// Number of values per accepted request.
pub const METRIC_INPUT_SIZE: &str = "average_input_size";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_REQUESTS,
        "Total number of average requests, labelled by outcome"
    );
    describe_histogram!(
        METRIC_CALCULATION_LATENCY,
        "Average calculation latency in milliseconds"
    );
    describe_histogram!(
        METRIC_INPUT_SIZE,
        "Number of values submitted per accepted request"
    );

    debug!("Metrics initialized");
}

/// Install the process-wide Prometheus recorder and register descriptions.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment the success counter.
pub fn inc_calculated() {
    counter!(METRIC_REQUESTS, "outcome" => "ok").increment(1);
}

/// Increment the counter for a rejected request.
pub fn inc_rejected(err: &AverageError) {
    counter!(METRIC_REQUESTS, "outcome" => err.kind()).increment(1);
}

/// Increment the counter for a recovered panic.
pub fn inc_internal_fault() {
    counter!(METRIC_REQUESTS, "outcome" => "internal_fault").increment(1);
}

/// Record how many values an accepted request carried.
pub fn record_input_size(len: usize) {
    histogram!(METRIC_INPUT_SIZE).record(len as f64);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for the average calculation.
pub fn timer_calculation() -> LatencyTimer {
    LatencyTimer::new(METRIC_CALCULATION_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Constraint;

    #[test]
    fn rejections_are_labelled_by_error_kind() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            inc_rejected(&AverageError::ConstraintViolation(Constraint::Empty));
            inc_rejected(&AverageError::ConstraintViolation(Constraint::Empty));
            inc_calculated();
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"average_requests_total{outcome="constraint_violation"} 2"#));
        assert!(rendered.contains(r#"average_requests_total{outcome="ok"} 1"#));
    }

    #[test]
    fn calculation_timer_records_on_drop() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            let timer = timer_calculation();
            assert!(timer.elapsed_ms() >= 0.0);
        });

        assert!(handle.render().contains(METRIC_CALCULATION_LATENCY));
    }
}
