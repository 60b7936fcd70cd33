// Envsense - Sensor kinds
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Sensor kinds and their declared ranges.
//!
//! Ranges and units are process-wide constants; nothing mutates them.

use crate::error::EnvsenseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared valid range of a sensor kind (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRange {
    pub min: f64,
    pub max: f64,
}

impl SensorRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Measurement category of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Temperature,
    Humidity,
    Pressure,
    Motion,
    Light,
}

impl SensorKind {
    /// All kinds, in fleet cycle order.
    pub const ALL: [SensorKind; 5] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::Pressure,
        SensorKind::Motion,
        SensorKind::Light,
    ];

    pub fn range(&self) -> SensorRange {
        match self {
            Self::Temperature => SensorRange::new(15.0, 30.0),
            Self::Humidity => SensorRange::new(30.0, 80.0),
            Self::Pressure => SensorRange::new(950.0, 1050.0),
            Self::Motion => SensorRange::new(0.0, 1.0),
            Self::Light => SensorRange::new(0.0, 1000.0),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Pressure => "hPa",
            Self::Motion => "",
            Self::Light => "lux",
        }
    }

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Pressure => "pressure",
            Self::Motion => "motion",
            Self::Light => "light",
        }
    }

    /// Capitalized name used in display names ("Kitchen Motion").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Pressure => "Pressure",
            Self::Motion => "Motion",
            Self::Light => "Light",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = EnvsenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| EnvsenseError::ParseKind(s.to_string()))
    }
}
