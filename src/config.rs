// Envsense - Configuration
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Fleet configuration.

use crate::history::MAX_HISTORY;
use serde::{Deserialize, Serialize};

/// Default history window for history requests, in hours.
pub const DEFAULT_HISTORY_HOURS: i64 = 24;

/// Runtime configuration of a [`Fleet`](crate::fleet::Fleet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Readings retained per sensor.
    pub max_history: usize,
    /// Random seed for reproducible readings (entropy when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Window applied to history requests that do not specify one.
    pub default_history_hours: i64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
            seed: None,
            default_history_hours: DEFAULT_HISTORY_HOURS,
        }
    }
}

impl FleetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-sensor history capacity.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default history window.
    pub fn with_default_history_hours(mut self, hours: i64) -> Self {
        self.default_history_hours = hours;
        self
    }

    /// Parse a configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
