// Envsense - Keyword query answering
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Keyword-driven answers over a reading snapshot.
//!
//! Queries are lower-cased and tested against an ordered list of rules. The
//! first rule whose predicate matches and whose handler produces text wins. A
//! handler returns `None` when its prerequisite data is missing, and
//! evaluation moves on to the next rule. The last rule always answers.

use crate::fleet::SensorSnapshot;
use crate::kind::SensorKind;

/// Reply when no rule produces an answer.
pub const HELP_TEXT: &str = "I can help with queries about sensor statistics, averages, maximums, minimums, and alerts. Try asking 'What is the average temperature?' or 'Are there any warnings?'";

/// Reply to an alert query when nothing is in warning or error.
pub const ALL_CLEAR_TEXT: &str = "All sensors are operating normally.";

/// One entry of the ordered rule list.
#[derive(Clone, Copy)]
pub struct QueryRule {
    /// Short name, reported alongside answers.
    pub name: &'static str,
    matches: fn(&str) -> bool,
    respond: fn(&str, &[SensorSnapshot]) -> Option<String>,
}

impl QueryRule {
    pub const fn new(
        name: &'static str,
        matches: fn(&str) -> bool,
        respond: fn(&str, &[SensorSnapshot]) -> Option<String>,
    ) -> Self {
        Self {
            name,
            matches,
            respond,
        }
    }

    /// Apply to an already lower-cased query.
    pub fn apply(&self, query: &str, snapshots: &[SensorSnapshot]) -> Option<String> {
        if (self.matches)(query) {
            (self.respond)(query, snapshots)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for QueryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRule").field("name", &self.name).finish()
    }
}

/// Built-in rules, in evaluation order.
pub const DEFAULT_RULES: [QueryRule; 6] = [
    QueryRule::new("average", match_average, answer_average),
    QueryRule::new("highest", match_highest, answer_highest),
    QueryRule::new("lowest", match_lowest, answer_lowest),
    QueryRule::new("alerts", match_alerts, answer_alerts),
    QueryRule::new("count", match_count, answer_count),
    QueryRule::new("help", match_any, answer_help),
];

/// Answer text plus the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub rule: &'static str,
    pub text: String,
}

/// Evaluates queries against an ordered rule list.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    rules: Vec<QueryRule>,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Engine over a custom rule list, evaluated in the given order.
    pub fn with_rules(rules: Vec<QueryRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[QueryRule] {
        &self.rules
    }

    /// Evaluate rules in order and return the first answer.
    pub fn respond(&self, query: &str, snapshots: &[SensorSnapshot]) -> Answer {
        let query = query.to_lowercase();

        self.rules
            .iter()
            .find_map(|rule| {
                rule.apply(&query, snapshots).map(|text| Answer {
                    rule: rule.name,
                    text,
                })
            })
            .unwrap_or_else(|| Answer {
                rule: "help",
                text: HELP_TEXT.to_string(),
            })
    }

    pub fn answer(&self, query: &str, snapshots: &[SensorSnapshot]) -> String {
        self.respond(query, snapshots).text
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Answer a query with the built-in rules.
pub fn answer(query: &str, snapshots: &[SensorSnapshot]) -> String {
    QueryEngine::new().answer(query, snapshots)
}

fn contains_any(query: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| query.contains(n))
}

fn of_kind(
    snapshots: &[SensorSnapshot],
    kind: SensorKind,
) -> impl Iterator<Item = &SensorSnapshot> {
    snapshots.iter().filter(move |s| s.kind == Some(kind))
}

/// First entry of `kind` whose value beats all earlier ones under `better`.
fn select_by(
    snapshots: &[SensorSnapshot],
    kind: SensorKind,
    better: fn(f64, f64) -> bool,
) -> Option<&SensorSnapshot> {
    of_kind(snapshots, kind).fold(None, |best, s| match best {
        Some(b) if !better(s.value, b.value) => Some(b),
        _ => Some(s),
    })
}

/// Values print as given. Whole values print as `22.0` for temperatures and
/// as integers for other kinds.
fn format_value(kind: SensorKind, value: f64) -> String {
    if !value.is_finite() || value.fract() != 0.0 {
        return format!("{}", value);
    }
    match kind {
        SensorKind::Temperature => format!("{:.1}", value),
        _ => format!("{}", value as i64),
    }
}

fn match_any(_: &str) -> bool {
    true
}

fn answer_help(_: &str, _: &[SensorSnapshot]) -> Option<String> {
    Some(HELP_TEXT.to_string())
}

fn match_average(q: &str) -> bool {
    contains_any(q, &["average temperature", "mean temperature"])
}

fn answer_average(_: &str, snapshots: &[SensorSnapshot]) -> Option<String> {
    let temps: Vec<f64> = of_kind(snapshots, SensorKind::Temperature)
        .map(|s| s.value)
        .collect();
    if temps.is_empty() {
        return None;
    }
    let mean = temps.iter().sum::<f64>() / temps.len() as f64;
    Some(format!(
        "The average temperature across all sensors is {:.1}°C",
        mean
    ))
}

fn match_highest(q: &str) -> bool {
    contains_any(q, &["highest", "maximum"])
}

fn answer_highest(q: &str, snapshots: &[SensorSnapshot]) -> Option<String> {
    let (kind, label) = if q.contains("temperature") {
        (SensorKind::Temperature, "temperature")
    } else if q.contains("humidity") {
        (SensorKind::Humidity, "humidity")
    } else {
        return None;
    };

    let top = select_by(snapshots, kind, |a, b| a > b)?;
    Some(format!(
        "The highest {} is {}{} at {}",
        label,
        format_value(kind, top.value),
        kind.unit(),
        top.name
    ))
}

fn match_lowest(q: &str) -> bool {
    contains_any(q, &["lowest", "minimum"]) && q.contains("temperature")
}

fn answer_lowest(_: &str, snapshots: &[SensorSnapshot]) -> Option<String> {
    let kind = SensorKind::Temperature;
    let bottom = select_by(snapshots, kind, |a, b| a < b)?;
    Some(format!(
        "The lowest temperature is {}{} at {}",
        format_value(kind, bottom.value),
        kind.unit(),
        bottom.name
    ))
}

fn match_alerts(q: &str) -> bool {
    contains_any(q, &["warning", "alert"])
}

fn answer_alerts(_: &str, snapshots: &[SensorSnapshot]) -> Option<String> {
    let alerts: Vec<String> = snapshots
        .iter()
        .filter(|s| s.status.is_alert())
        .map(|s| format!("{} ({})", s.name, s.status))
        .collect();

    if alerts.is_empty() {
        return Some(ALL_CLEAR_TEXT.to_string());
    }
    Some(format!(
        "Found {} sensor(s) with alerts: {}",
        alerts.len(),
        alerts.join(", ")
    ))
}

fn match_count(q: &str) -> bool {
    q.contains("how many")
}

fn answer_count(q: &str, snapshots: &[SensorSnapshot]) -> Option<String> {
    if q.contains("sensor") {
        return Some(format!(
            "There are {} sensors being monitored.",
            snapshots.len()
        ));
    }
    if q.contains("motion") {
        let moving = of_kind(snapshots, SensorKind::Motion)
            .filter(|s| s.value == 1.0)
            .count();
        return Some(format!(
            "There are {} motion sensor(s) currently detecting movement.",
            moving
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    fn snap(name: &str, kind: SensorKind, value: f64, status: Status) -> SensorSnapshot {
        SensorSnapshot {
            id: String::new(),
            name: name.to_string(),
            kind: Some(kind),
            value,
            unit: kind.unit().to_string(),
            min: kind.range().min,
            max: kind.range().max,
            status,
            last_update: None,
        }
    }

    fn temps(values: &[f64]) -> Vec<SensorSnapshot> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let name = format!("Room {}", i + 1);
                snap(&name, SensorKind::Temperature, *v, Status::Active)
            })
            .collect()
    }

    #[test]
    fn test_average_temperature() {
        let text = answer("What is the average temperature?", &temps(&[20.0, 22.0, 24.0]));
        assert_eq!(text, "The average temperature across all sensors is 22.0°C");
    }

    #[test]
    fn test_mean_temperature_is_case_insensitive() {
        let text = answer("MEAN TEMPERATURE please", &temps(&[21.0, 22.0]));
        assert!(text.contains("21.5"));
    }

    #[test]
    fn test_average_without_temperatures_falls_through() {
        let snapshots = vec![snap("Den Light", SensorKind::Light, 300.0, Status::Active)];
        assert_eq!(answer("average temperature", &snapshots), HELP_TEXT);

        // falls through to the alert rule
        let reply = QueryEngine::new().respond("average temperature alert", &snapshots);
        assert_eq!(reply.rule, "alerts");
        assert_eq!(reply.text, ALL_CLEAR_TEXT);
    }

    #[test]
    fn test_highest_temperature_first_wins_ties() {
        let text = answer("highest temperature", &temps(&[21.0, 24.5, 24.5, 19.0]));
        assert_eq!(text, "The highest temperature is 24.5°C at Room 2");
    }

    #[test]
    fn test_extremes_keep_supplied_precision() {
        let snapshots = temps(&[22.25, 21.0, 19.875]);
        assert_eq!(
            answer("highest temperature", &snapshots),
            "The highest temperature is 22.25°C at Room 1"
        );
        assert_eq!(
            answer("lowest temperature", &snapshots),
            "The lowest temperature is 19.875°C at Room 3"
        );
        assert_eq!(
            answer("highest temperature", &temps(&[22.0, 21.5])),
            "The highest temperature is 22.0°C at Room 1"
        );
    }

    #[test]
    fn test_unknown_kinds_still_count_and_alert() {
        let mut snapshots = temps(&[20.0]);
        let co2 = SensorSnapshot {
            kind: None,
            name: "Hall CO2".to_string(),
            status: Status::Warning,
            ..snapshots[0].clone()
        };
        snapshots.push(co2);

        assert_eq!(
            answer("how many sensors", &snapshots),
            "There are 2 sensors being monitored."
        );
        assert_eq!(
            answer("any warnings", &snapshots),
            "Found 1 sensor(s) with alerts: Hall CO2 (warning)"
        );
        assert!(answer("average temperature", &snapshots).contains("20.0"));
    }

    #[test]
    fn test_highest_humidity() {
        let snapshots = vec![
            snap("Kitchen Humidity", SensorKind::Humidity, 55.0, Status::Active),
            snap("Bedroom Humidity", SensorKind::Humidity, 63.0, Status::Active),
        ];
        let text = answer("Which room has the maximum humidity?", &snapshots);
        assert_eq!(text, "The highest humidity is 63% at Bedroom Humidity");
    }

    #[test]
    fn test_highest_temperature_missing_does_not_try_humidity() {
        let snapshots = vec![snap("Kitchen Humidity", SensorKind::Humidity, 55.0, Status::Active)];
        assert_eq!(answer("highest temperature and humidity", &snapshots), HELP_TEXT);
    }

    #[test]
    fn test_lowest_temperature() {
        let text = answer("minimum temperature?", &temps(&[21.0, 18.2, 18.2]));
        assert_eq!(text, "The lowest temperature is 18.2°C at Room 2");
    }

    #[test]
    fn test_lowest_requires_temperature() {
        assert_eq!(answer("lowest humidity", &temps(&[20.0])), HELP_TEXT);
    }

    #[test]
    fn test_no_warnings() {
        assert_eq!(answer("Are there any warnings?", &temps(&[20.0, 22.0])), ALL_CLEAR_TEXT);
    }

    #[test]
    fn test_warnings_listed() {
        let snapshots = vec![
            snap("Garage Pressure", SensorKind::Pressure, 1013.0, Status::Warning),
            snap("Kitchen Light", SensorKind::Light, 400.0, Status::Active),
            snap("Outdoor Temperature", SensorKind::Temperature, 31.0, Status::Error),
        ];
        let text = answer("any alerts", &snapshots);
        assert_eq!(
            text,
            "Found 2 sensor(s) with alerts: Garage Pressure (warning), Outdoor Temperature (error)"
        );
    }

    #[test]
    fn test_count_sensors() {
        let text = answer("How many sensors are there?", &temps(&[20.0, 21.0, 22.0]));
        assert_eq!(text, "There are 3 sensors being monitored.");
    }

    #[test]
    fn test_count_motion() {
        let snapshots = vec![
            snap("Hall Motion", SensorKind::Motion, 1.0, Status::Warning),
            snap("Den Motion", SensorKind::Motion, 0.0, Status::Active),
            snap("Attic Motion", SensorKind::Motion, 1.0, Status::Warning),
        ];
        let text = answer("how many detect motion", &snapshots);
        assert_eq!(
            text,
            "There are 2 motion sensor(s) currently detecting movement."
        );
    }

    #[test]
    fn test_rule_order_average_before_alerts() {
        let mut snapshots = temps(&[20.0]);
        snapshots[0].status = Status::Warning;
        let reply = QueryEngine::new().respond("average temperature warning", &snapshots);
        assert_eq!(reply.rule, "average");
    }

    #[test]
    fn test_default_help() {
        let reply = QueryEngine::new().respond("tell me a joke", &[]);
        assert_eq!(reply.rule, "help");
        assert_eq!(reply.text, HELP_TEXT);
    }

    #[test]
    fn test_custom_rules_without_help_fall_back() {
        let engine = QueryEngine::with_rules(vec![DEFAULT_RULES[4]]);
        assert_eq!(engine.rules().len(), 1);
        assert_eq!(engine.answer("what?", &[]), HELP_TEXT);
    }
}
