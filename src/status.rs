// Envsense - Status classification
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Health status of a reading relative to its kind's declared range.
//!
//! Branches are evaluated in order and the first match wins. The `Error`
//! branches cannot fire while the generator clamps its output, but they stay
//! part of the taxonomy.

use crate::error::EnvsenseError;
use crate::kind::SensorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fraction of `max` above which a reading is a warning.
pub const HIGH_WARNING_FACTOR: f64 = 0.9;

/// Multiple of `min` below which a reading is a warning.
/// For kinds with `min == 0` this threshold is 0 and never triggers.
pub const LOW_WARNING_FACTOR: f64 = 1.1;

/// Three-level status of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Warning,
    Error,
}

impl Status {
    /// Warning or error.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Numeric level for gauges (0=active, 1=warning, 2=error).
    pub fn level(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = EnvsenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(EnvsenseError::ParseStatus(s.to_string())),
        }
    }
}

/// Classify a value against its kind's range.
#[allow(clippy::if_same_then_else)]
pub fn classify(value: f64, kind: SensorKind) -> Status {
    let range = kind.range();

    if value > range.max {
        Status::Error
    } else if value < range.min {
        Status::Error
    } else if value > range.max * HIGH_WARNING_FACTOR {
        Status::Warning
    } else if value < range.min * LOW_WARNING_FACTOR {
        Status::Warning
    } else {
        Status::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!("Warning".parse::<Status>().unwrap(), Status::Warning);
        assert_eq!("error".parse::<Status>().unwrap(), Status::Error);
        assert!(matches!(
            "offline".parse::<Status>(),
            Err(EnvsenseError::ParseStatus(_))
        ));
    }

    #[test]
    fn test_nominal_values_are_active() {
        assert_eq!(classify(22.0, SensorKind::Temperature), Status::Active);
        assert_eq!(classify(50.0, SensorKind::Humidity), Status::Active);
        assert_eq!(classify(500.0, SensorKind::Light), Status::Active);
        assert_eq!(classify(0.0, SensorKind::Motion), Status::Active);
    }

    #[test]
    fn test_max_boundary_is_warning() {
        for kind in SensorKind::ALL {
            assert_eq!(classify(kind.range().max, kind), Status::Warning, "{kind}");
        }
    }

    #[test]
    fn test_min_boundary_is_warning_when_threshold_positive() {
        assert_eq!(classify(15.0, SensorKind::Temperature), Status::Warning);
        assert_eq!(classify(30.0, SensorKind::Humidity), Status::Warning);
        // 1.1 * 0 == 0, so the low branch never fires
        assert_eq!(classify(0.0, SensorKind::Light), Status::Active);
    }

    #[test]
    fn test_out_of_range_is_error() {
        assert_eq!(classify(30.1, SensorKind::Temperature), Status::Error);
        assert_eq!(classify(14.9, SensorKind::Temperature), Status::Error);
        assert_eq!(classify(-1.0, SensorKind::Light), Status::Error);
        assert_eq!(classify(2.0, SensorKind::Motion), Status::Error);
    }

    #[test]
    fn test_error_precedes_warning() {
        // 947 is above 0.9 * 1050 but below the pressure minimum
        assert_eq!(classify(947.0, SensorKind::Pressure), Status::Error);
    }

    #[test]
    fn test_pressure_in_range_always_warns() {
        assert_eq!(classify(950.0, SensorKind::Pressure), Status::Warning);
        assert_eq!(classify(1013.0, SensorKind::Pressure), Status::Warning);
    }

    #[test]
    fn test_warning_thresholds() {
        assert_eq!(classify(27.0, SensorKind::Temperature), Status::Active);
        assert_eq!(classify(27.1, SensorKind::Temperature), Status::Warning);
        assert_eq!(classify(16.4, SensorKind::Temperature), Status::Warning);
        assert_eq!(classify(901.0, SensorKind::Light), Status::Warning);
        assert_eq!(classify(1.0, SensorKind::Motion), Status::Warning);
    }

    #[test]
    fn test_status_helpers() {
        assert!(!Status::Active.is_alert());
        assert!(Status::Warning.is_alert());
        assert!(Status::Error.is_alert());
        assert_eq!(Status::Error.level(), 2);
        assert_eq!(serde_json::to_string(&Status::Warning).unwrap(), "\"warning\"");
    }
}
