//! Metrics module
//!
//! Prometheus counters for selections and uploads. Recorded unconditionally;
//! rendering is left to the caller.

use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_histogram_vec, Counter, CounterVec,
    Encoder, HistogramVec, TextEncoder,
};

lazy_static! {
    // Selection metrics
    pub static ref SELECTIONS_TOTAL: CounterVec = register_counter_vec!(
        "presign_uploadr_selections_total",
        "File selections by result",
        &["result"]  // "accepted" or "rejected"
    ).unwrap();

    // Upload metrics
    pub static ref UPLOADS_TOTAL: CounterVec = register_counter_vec!(
        "presign_uploadr_uploads_total",
        "Total number of uploads",
        &["status"]
    ).unwrap();

    pub static ref UPLOAD_BYTES_TOTAL: Counter = register_counter!(
        "presign_uploadr_upload_bytes_total",
        "Total bytes uploaded"
    ).unwrap();

    pub static ref UPLOAD_DURATION: HistogramVec = register_histogram_vec!(
        "presign_uploadr_upload_duration_seconds",
        "Duration of each upload stage in seconds",
        &["stage"],  // "presign" or "storage"
        vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0]
    ).unwrap();

    // Error metrics
    pub static ref ERRORS_TOTAL: CounterVec = register_counter_vec!(
        "presign_uploadr_errors_total",
        "Total errors",
        &["type"]
    ).unwrap();
}

/// Record a selection attempt
pub fn record_selection(result: &str) {
    SELECTIONS_TOTAL.with_label_values(&[result]).inc();
}

/// Record a successful upload
pub fn record_upload_success(bytes: u64) {
    UPLOADS_TOTAL.with_label_values(&["success"]).inc();
    UPLOAD_BYTES_TOTAL.inc_by(bytes as f64);
}

/// Record a failed upload
pub fn record_upload_failure() {
    UPLOADS_TOTAL.with_label_values(&["failure"]).inc();
}

/// Record how long one stage of the upload took
pub fn record_stage_duration(stage: &str, duration_secs: f64) {
    UPLOAD_DURATION
        .with_label_values(&[stage])
        .observe(duration_secs);
}

/// Record an error
pub fn record_error(error_type: &str) {
    ERRORS_TOTAL.with_label_values(&[error_type]).inc();
}

/// Render all registered metrics in the Prometheus text format
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }

    String::from_utf8_lossy(&buffer).into_owned()
}
