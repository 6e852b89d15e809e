//! Prometheus request metrics, behind the `metrics` feature.

use std::collections::HashMap;

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Request counters and latency histograms under the `frontdesk` namespace,
/// served at `/metrics`.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    let mut labels = HashMap::new();
    labels.insert("service".to_owned(), "frontdesk".to_owned());
    PrometheusMetricsBuilder::new("frontdesk")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}
