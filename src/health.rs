//! Health report for the fleet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Process health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Healthy,
}

/// Health probe result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    /// Sensor ids with any retained history.
    pub sensors_tracked: usize,
}

impl HealthReport {
    /// Healthy report stamped now.
    pub fn healthy(sensors_tracked: usize) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: Utc::now(),
            sensors_tracked,
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self.status, HealthStatus::Healthy)
    }
}
