//! # envsense - Simulated environmental sensor fleet
//!
//! A fixed fleet of simulated sensors with bounded in-memory history,
//! statistical analysis and keyword-driven answers about current readings.
//!
//! ## Key Features
//!
//! - **Kind-specific generation**: Gaussian or Bernoulli models clamped to each
//!   kind's declared range, with a seedable RNG
//! - **Status classification**: `active`, `warning` or `error` per reading
//! - **Bounded history**: per-sensor FIFO series capped at [`MAX_HISTORY`]
//! - **Analysis**: summary statistics and least-squares trends
//! - **Keyword queries**: an ordered list of pattern rules, first match wins
//!
//! ## Quick Start
//!
//! ```rust
//! use envsense::{AnalysisMode, Fleet, FleetConfig, QueryEngine};
//!
//! let mut fleet = Fleet::with_config(FleetConfig::new().with_seed(42));
//!
//! // Take two snapshots of all 15 sensors
//! fleet.snapshot();
//! let snapshot = fleet.snapshot();
//! assert_eq!(snapshot.len(), 15);
//!
//! // Both readings of sensor-1 are retained
//! assert_eq!(fleet.history("sensor-1", 24).len(), 2);
//!
//! // Summary statistics over retained history
//! let results = fleet.analyze(&["sensor-1", "sensor-99"], AnalysisMode::Summary);
//! assert!(results.contains_key("sensor-1"));
//! assert!(!results.contains_key("sensor-99"));
//!
//! // Keyword queries over the snapshot
//! let answer = QueryEngine::new().answer("How many sensors are there?", &snapshot);
//! assert_eq!(answer, "There are 15 sensors being monitored.");
//! ```
//!
//! ## Modules
//!
//! - [`kind`]: Sensor kinds, ranges and units
//! - [`generator`]: Reading generation
//! - [`status`]: Status classification
//! - [`history`]: Bounded per-sensor history
//! - [`analysis`]: Summary and trend analysis
//! - [`query`]: Keyword query rules
//! - [`fleet`]: Fleet layout, snapshots and health

// Modules
pub mod analysis;
pub mod config;
pub mod error;
pub mod fleet;
pub mod generator;
pub mod health;
pub mod history;
pub mod kind;
pub mod query;
pub mod status;

// Re-exports for convenient access
pub use analysis::{AnalysisMode, AnalysisResult, Summary, Trend, TrendDirection};
pub use config::{FleetConfig, DEFAULT_HISTORY_HOURS};
pub use error::{AnalysisError, EnvsenseError, Result};
pub use fleet::{Fleet, SensorIdentity, SensorSnapshot, FLEET_SIZE, LOCATIONS};
pub use generator::ValueGenerator;
pub use health::{HealthReport, HealthStatus};
pub use history::{HistoryStore, Reading, MAX_HISTORY};
pub use kind::{SensorKind, SensorRange};
pub use query::{Answer, QueryEngine, QueryRule};
pub use status::{classify, Status};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
