// Envsense Server - Prometheus metrics definitions
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Prometheus metrics for the sensor fleet.
//!
//! Gauges mirror the latest snapshot; counters track API activity.

use envsense::{HistoryStore, SensorSnapshot};
use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_gauge_vec, Counter,
    CounterVec, Encoder, Gauge, GaugeVec, TextEncoder,
};

lazy_static! {
    // ============================================================
    // Sensor Metrics (from the latest snapshot)
    // ============================================================

    /// Latest reading per sensor.
    pub static ref SENSOR_VALUE: GaugeVec = register_gauge_vec!(
        "envsense_sensor_value",
        "Latest simulated reading per sensor",
        &["sensor", "kind"]
    ).unwrap();

    /// Latest status per sensor (0=active, 1=warning, 2=error).
    pub static ref SENSOR_STATUS: GaugeVec = register_gauge_vec!(
        "envsense_sensor_status",
        "Latest sensor status (0=active, 1=warning, 2=error)",
        &["sensor"]
    ).unwrap();

    /// Sensors in warning or error in the latest snapshot.
    pub static ref SENSORS_ALERTING: Gauge = register_gauge!(
        "envsense_sensors_alerting",
        "Sensors in warning or error in the latest snapshot"
    ).unwrap();

    // ============================================================
    // History Metrics
    // ============================================================

    /// Sensor ids with retained history.
    pub static ref HISTORY_SERIES: Gauge = register_gauge!(
        "envsense_history_series",
        "Sensor ids with retained history"
    ).unwrap();

    /// Readings retained across all series.
    pub static ref HISTORY_POINTS: Gauge = register_gauge!(
        "envsense_history_points",
        "Readings retained across all series"
    ).unwrap();

    // ============================================================
    // API Counters
    // ============================================================

    /// Snapshots taken.
    pub static ref SNAPSHOTS_TOTAL: Counter = register_counter!(
        "envsense_snapshots_total",
        "Snapshots taken"
    ).unwrap();

    /// Answered queries, labeled by the rule that answered.
    pub static ref QUERIES_TOTAL: CounterVec = register_counter_vec!(
        "envsense_queries_total",
        "Answered free-text queries",
        &["rule"]
    ).unwrap();

    /// Analysis requests, labeled by mode.
    pub static ref ANALYSES_TOTAL: CounterVec = register_counter_vec!(
        "envsense_analyses_total",
        "Analysis requests",
        &["mode"]
    ).unwrap();
}

/// Update sensor and history gauges after a snapshot.
pub fn record_snapshot(snapshots: &[SensorSnapshot], history: &HistoryStore) {
    SNAPSHOTS_TOTAL.inc();

    for s in snapshots {
        let kind = s.kind.map_or("unknown", |k| k.as_str());
        SENSOR_VALUE
            .with_label_values(&[s.id.as_str(), kind])
            .set(s.value);
        SENSOR_STATUS
            .with_label_values(&[s.id.as_str()])
            .set(s.status.level() as f64);
    }
    SENSORS_ALERTING.set(snapshots.iter().filter(|s| s.status.is_alert()).count() as f64);

    HISTORY_SERIES.set(history.tracked_count() as f64);
    HISTORY_POINTS.set(history.total_points() as f64);
}

/// Count an answered query.
pub fn record_query(rule: &str) {
    QUERIES_TOTAL.with_label_values(&[rule]).inc();
}

/// Count an analysis request.
pub fn record_analysis(mode: &str) {
    ANALYSES_TOTAL.with_label_values(&[mode]).inc();
}

/// Encode all metrics to Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envsense::{Fleet, FleetConfig};

    #[test]
    fn test_encode_metrics() {
        let mut fleet = Fleet::with_config(FleetConfig::new().with_seed(3));
        let snapshots = fleet.snapshot();
        record_snapshot(&snapshots, fleet.history_store());
        record_query("help");
        record_analysis("trend");

        let output = encode_metrics().unwrap();
        assert!(output.contains("envsense_sensor_value"));
        assert!(output.contains("sensor=\"sensor-1\""));
        assert!(output.contains("envsense_queries_total"));
        assert!(output.contains("envsense_history_points"));
    }

    #[test]
    fn test_alerting_gauge() {
        let mut fleet = Fleet::with_config(FleetConfig::new().with_seed(4));
        let snapshots = fleet.snapshot();
        record_snapshot(&snapshots, fleet.history_store());
        // the three pressure sensors always warn
        assert!(SENSORS_ALERTING.get() >= 3.0);
    }
}
