// Envsense - History retention
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Capacity-bounded per-sensor reading history.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default number of readings retained per sensor.
pub const MAX_HISTORY: usize = 1000;

/// A single timestamped reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub sensor_id: String,
    pub value: f64,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl Reading {
    pub fn new(sensor_id: impl Into<String>, value: f64, timestamp: f64) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            value,
            timestamp,
        }
    }

    /// Reading stamped with the current wall clock.
    pub fn now(sensor_id: impl Into<String>, value: f64) -> Self {
        Self::new(sensor_id, value, unix_now())
    }
}

/// Current time as float seconds since the Unix epoch.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Per-sensor series, oldest first, each bounded at `capacity`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    series: HashMap<String, VecDeque<Reading>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    /// Store retaining at most `capacity` readings per sensor (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            series: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a reading, evicting the oldest entries beyond capacity.
    pub fn append(&mut self, sensor_id: &str, reading: Reading) {
        let samples = self.series.entry(sensor_id.to_string()).or_default();
        samples.push_back(reading);

        let mut evicted = 0;
        while samples.len() > self.capacity {
            samples.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            log::trace!("evicted {} reading(s) from {}", evicted, sensor_id);
        }
    }

    /// Readings no older than `since_secs` relative to the wall clock.
    pub fn query(&self, sensor_id: &str, since_secs: f64) -> Vec<Reading> {
        self.query_at(sensor_id, since_secs, unix_now())
    }

    /// Readings with `timestamp >= now - since_secs`, in insertion order.
    ///
    /// A non-positive window returns the whole retained series. Unknown ids
    /// yield an empty vector.
    pub fn query_at(&self, sensor_id: &str, since_secs: f64, now: f64) -> Vec<Reading> {
        let Some(samples) = self.series.get(sensor_id) else {
            return Vec::new();
        };

        if since_secs <= 0.0 {
            return samples.iter().cloned().collect();
        }

        let cutoff = now - since_secs;
        samples
            .iter()
            .filter(|r| r.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    /// Retained values for a sensor, oldest first.
    pub fn values(&self, sensor_id: &str) -> Vec<f64> {
        self.series
            .get(sensor_id)
            .map(|s| s.iter().map(|r| r.value).collect())
            .unwrap_or_default()
    }

    pub fn series_len(&self, sensor_id: &str) -> usize {
        self.series.get(sensor_id).map_or(0, |s| s.len())
    }

    /// Number of sensor ids with any retained history.
    pub fn tracked_count(&self) -> usize {
        self.series.values().filter(|s| !s.is_empty()).count()
    }

    /// Total readings across all series.
    pub fn total_points(&self) -> usize {
        self.series.values().map(|s| s.len()).sum()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
