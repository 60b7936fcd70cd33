// Envsense - Statistical analysis
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Summary statistics and trend fitting over retained history.
//!
//! Each sensor is analysed independently. A failure for one sensor (empty
//! series, non-finite result) drops that sensor from the batch output and
//! never fails the batch.

use crate::error::{self, AnalysisError, EnvsenseError};
use crate::history::HistoryStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which analysis to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Summary,
    Trend,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Trend => "trend",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = EnvsenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "trend" => Ok(Self::Trend),
            _ => Err(EnvsenseError::ParseMode(s.to_string())),
        }
    }
}

/// Summary statistics of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Direction of a fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Increasing
        } else if slope < 0.0 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

/// Trend of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub trend: TrendDirection,
    pub slope: f64,
}

/// Per-sensor analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Summary(Summary),
    Trend(Trend),
}

/// Compute summary statistics for a series.
pub fn summarize(sensor_id: &str, values: &[f64]) -> Result<Summary, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptySeries {
            sensor_id: sensor_id.to_string(),
        });
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let summary = Summary {
        mean,
        median,
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        count: values.len(),
    };

    for (field, v) in [
        ("mean", summary.mean),
        ("median", summary.median),
        ("std", summary.std),
    ] {
        ensure_finite(sensor_id, field, v)?;
    }
    Ok(summary)
}

/// Least-squares line `value = slope * index + intercept` over indices `0..n`.
///
/// Returns `None` for an empty series. A single point yields slope 0.
pub fn fit_line(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    Some((slope, y_mean - slope * x_mean))
}

/// Fit a trend over a series.
pub fn trend(sensor_id: &str, values: &[f64]) -> Result<Trend, AnalysisError> {
    let (slope, _) = fit_line(values).ok_or_else(|| AnalysisError::EmptySeries {
        sensor_id: sensor_id.to_string(),
    })?;
    ensure_finite(sensor_id, "slope", slope)?;

    Ok(Trend {
        trend: TrendDirection::from_slope(slope),
        slope,
    })
}

/// Analyse one sensor's retained history.
pub fn analyze_sensor(
    store: &HistoryStore,
    sensor_id: &str,
    mode: AnalysisMode,
) -> error::Result<AnalysisResult> {
    let values = store.values(sensor_id);
    let result = match mode {
        AnalysisMode::Summary => AnalysisResult::Summary(summarize(sensor_id, &values)?),
        AnalysisMode::Trend => AnalysisResult::Trend(trend(sensor_id, &values)?),
    };
    Ok(result)
}

/// Analyse a batch of sensors; failing sensors are omitted.
pub fn analyze<S: AsRef<str>>(
    store: &HistoryStore,
    sensor_ids: &[S],
    mode: AnalysisMode,
) -> BTreeMap<String, AnalysisResult> {
    let mut results = BTreeMap::new();

    for id in sensor_ids {
        let id = id.as_ref();
        match analyze_sensor(store, id, mode) {
            Ok(result) => {
                results.insert(id.to_string(), result);
            }
            Err(e) => log::debug!("omitting {} from {} analysis: {}", id, mode, e),
        }
    }

    results
}

fn ensure_finite(sensor_id: &str, field: &'static str, value: f64) -> Result<(), AnalysisError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::NonFinite {
            sensor_id: sensor_id.to_string(),
            field,
        })
    }
}
