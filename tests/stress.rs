//! Stress tests for envsense
//!
//! Run with: cargo test --release stress -- --ignored

use envsense::*;
use std::time::Instant;

#[test]
#[ignore] // Run manually with --ignored
fn stress_test_snapshots() {
    let mut fleet = Fleet::with_config(FleetConfig::new().with_seed(7));

    let iterations = 20_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let snapshot = fleet.snapshot();
        assert_eq!(snapshot.len(), FLEET_SIZE);
    }

    let elapsed = start.elapsed();
    let rate = iterations as f64 / elapsed.as_secs_f64();

    println!("Took {} snapshots in {:?}", iterations, elapsed);
    println!("Rate: {:.0} snapshots/second", rate);

    for identity in fleet.sensors() {
        assert_eq!(fleet.history_store().series_len(&identity.id()), MAX_HISTORY);
    }
    assert!(
        rate > 5_000.0,
        "Should take at least 5k snapshots/s, got {:.0}",
        rate
    );
}

#[test]
#[ignore]
fn stress_test_full_history_analysis() {
    let mut fleet = Fleet::with_config(FleetConfig::new().with_seed(8));
    for _ in 0..MAX_HISTORY {
        fleet.snapshot();
    }
    let ids: Vec<String> = fleet.sensors().iter().map(|s| s.id()).collect();

    let iterations = 1_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let summary = fleet.analyze(&ids, AnalysisMode::Summary);
        let trend = fleet.analyze(&ids, AnalysisMode::Trend);
        assert_eq!(summary.len(), FLEET_SIZE);
        assert_eq!(trend.len(), FLEET_SIZE);
    }

    let elapsed = start.elapsed();
    println!(
        "Analysed {} full batches in {:?} ({:.0}/s)",
        iterations,
        elapsed,
        iterations as f64 / elapsed.as_secs_f64()
    );
}
