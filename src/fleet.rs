// Envsense - Sensor fleet
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! The fixed simulated fleet.
//!
//! A [`Fleet`] owns the value generator and the history store. Taking a
//! snapshot draws one reading per sensor, classifies it, records it and
//! returns the derived views. Analysis and history lookups only read.

use crate::analysis::{self, AnalysisMode, AnalysisResult};
use crate::config::FleetConfig;
use crate::generator::ValueGenerator;
use crate::health::HealthReport;
use crate::history::{HistoryStore, Reading};
use crate::kind::SensorKind;
use crate::status::{classify, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Location names, in fleet order.
pub const LOCATIONS: [&str; 5] = ["Living Room", "Bedroom", "Kitchen", "Garage", "Outdoor"];

/// Number of passes over the kind cycle.
pub const KIND_CYCLES: usize = 3;

/// Total number of simulated sensors.
pub const FLEET_SIZE: usize = SensorKind::ALL.len() * KIND_CYCLES;

/// Stable identity of one simulated sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorIdentity {
    /// Zero-based position in the fleet.
    pub index: usize,
    pub location: &'static str,
    pub kind: SensorKind,
}

impl SensorIdentity {
    /// Identity at a fleet position; the same index always maps to the same
    /// location and kind.
    pub fn at(index: usize) -> Self {
        let kinds = SensorKind::ALL.len();
        Self {
            index,
            location: LOCATIONS[(index / kinds) % LOCATIONS.len()],
            kind: SensorKind::ALL[index % kinds],
        }
    }

    /// Wire id, `sensor-1` for index 0.
    pub fn id(&self) -> String {
        format!("sensor-{}", self.index + 1)
    }

    /// Display name, e.g. `Kitchen Motion`.
    pub fn name(&self) -> String {
        format!("{} {}", self.location, self.kind.label())
    }
}

/// All sensor identities in fleet order.
pub fn fleet_layout() -> Vec<SensorIdentity> {
    (0..FLEET_SIZE).map(SensorIdentity::at).collect()
}

/// Point-in-time view of one sensor.
///
/// Caller-supplied snapshots (free-text queries) only need `name`, `type`,
/// `value` and `status`. An unrecognised `type` reads as `None` and an
/// unrecognised `status` as active, so such entries still count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<SensorKind>,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

impl SensorSnapshot {
    /// Derive the view of `identity` reading `value` at `at`.
    pub fn derive(identity: &SensorIdentity, value: f64, at: DateTime<Utc>) -> Self {
        let range = identity.kind.range();
        Self {
            id: identity.id(),
            name: identity.name(),
            kind: Some(identity.kind),
            value,
            unit: identity.kind.unit().to_string(),
            min: range.min,
            max: range.max,
            status: classify(value, identity.kind),
            last_update: Some(at),
        }
    }
}

fn lenient_kind<'de, D: Deserializer<'de>>(d: D) -> Result<Option<SensorKind>, D::Error> {
    let name = Option::<String>::deserialize(d)?;
    Ok(name.and_then(|n| n.parse().ok()))
}

fn lenient_status<'de, D: Deserializer<'de>>(d: D) -> Result<Status, D::Error> {
    let name = Option::<String>::deserialize(d)?;
    Ok(name.and_then(|n| n.parse().ok()).unwrap_or_default())
}

/// Simulated fleet with its retained history.
#[derive(Debug)]
pub struct Fleet {
    sensors: Vec<SensorIdentity>,
    generator: ValueGenerator,
    history: HistoryStore,
    config: FleetConfig,
}

impl Fleet {
    /// Create a fleet with default configuration.
    pub fn new() -> Self {
        Self::with_config(FleetConfig::default())
    }

    /// Create a fleet with custom configuration.
    pub fn with_config(config: FleetConfig) -> Self {
        Self {
            sensors: fleet_layout(),
            generator: ValueGenerator::new(config.seed),
            history: HistoryStore::with_capacity(config.max_history),
            config,
        }
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn sensors(&self) -> &[SensorIdentity] {
        &self.sensors
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    /// Draw, classify and record one reading per sensor.
    pub fn snapshot(&mut self) -> Vec<SensorSnapshot> {
        let at = Utc::now();
        let timestamp = at.timestamp_micros() as f64 / 1e6;

        let snapshots: Vec<SensorSnapshot> = self
            .sensors
            .iter()
            .map(|identity| {
                let value = self.generator.generate(identity.kind);
                let snapshot = SensorSnapshot::derive(identity, value, at);
                self.history.append(
                    &snapshot.id,
                    Reading::new(snapshot.id.clone(), value, timestamp),
                );
                snapshot
            })
            .collect();

        log::trace!(
            "snapshot of {} sensors, {} alert(s)",
            snapshots.len(),
            snapshots.iter().filter(|s| s.status.is_alert()).count()
        );
        snapshots
    }

    /// Readings of a sensor from the last `hours` hours; `hours <= 0` returns
    /// everything retained.
    pub fn history(&self, sensor_id: &str, hours: i64) -> Vec<Reading> {
        self.history.query(sensor_id, hours as f64 * 3600.0)
    }

    /// History using the configured default window.
    pub fn recent_history(&self, sensor_id: &str) -> Vec<Reading> {
        self.history(sensor_id, self.config.default_history_hours)
    }

    /// Batch analysis over retained history.
    pub fn analyze<S: AsRef<str>>(
        &self,
        sensor_ids: &[S],
        mode: AnalysisMode,
    ) -> BTreeMap<String, AnalysisResult> {
        analysis::analyze(&self.history, sensor_ids, mode)
    }

    pub fn health(&self) -> HealthReport {
        HealthReport::healthy(self.history.tracked_count())
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}
