// Envsense - Value generation
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Simulated sensor readings.
//!
//! Each kind has its own stochastic model: a Gaussian around a nominal value
//! for the continuous kinds, a biased coin for motion. Results are clamped to
//! the kind's declared range before rounding.

use crate::kind::SensorKind;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

/// Probability threshold above which a uniform draw counts as motion.
pub const MOTION_THRESHOLD: f64 = 0.7;

/// Gaussian model for a continuous kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    /// Nominal value the readings are centered on.
    pub base: f64,
    /// Standard deviation of the noise.
    pub std_dev: f64,
}

impl NoiseModel {
    /// Model for a kind, `None` for motion.
    pub fn for_kind(kind: SensorKind) -> Option<Self> {
        let (base, std_dev) = match kind {
            SensorKind::Temperature => (22.0, 2.0),
            SensorKind::Humidity => (50.0, 10.0),
            SensorKind::Pressure => (1013.0, 20.0),
            SensorKind::Light => (500.0, 200.0),
            SensorKind::Motion => return None,
        };
        Some(Self { base, std_dev })
    }
}

/// Produces readings from an owned, optionally seeded RNG.
#[derive(Debug, Clone)]
pub struct ValueGenerator {
    rng: StdRng,
}

impl ValueGenerator {
    /// Create a generator; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Draw one value for `kind`, always inside the kind's range.
    pub fn generate(&mut self, kind: SensorKind) -> f64 {
        let Some(model) = NoiseModel::for_kind(kind) else {
            return if self.rng.gen::<f64>() > MOTION_THRESHOLD {
                1.0
            } else {
                0.0
            };
        };

        let noise: f64 = self.rng.sample(StandardNormal);
        let value = kind.range().clamp(model.base + noise * model.std_dev);

        match kind {
            SensorKind::Temperature => (value * 10.0).round() / 10.0,
            _ => value.trunc(),
        }
    }
}

impl Default for ValueGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_within_range() {
        let mut gen = ValueGenerator::seeded(7);
        for kind in SensorKind::ALL {
            let range = kind.range();
            for _ in 0..10_000 {
                let v = gen.generate(kind);
                assert!(range.contains(v), "{kind} produced {v}");
            }
        }
    }

    #[test]
    fn test_motion_is_binary() {
        let mut gen = ValueGenerator::seeded(11);
        let mut ones = 0;
        for _ in 0..10_000 {
            let v = gen.generate(SensorKind::Motion);
            assert!(v == 0.0 || v == 1.0);
            if v == 1.0 {
                ones += 1;
            }
        }
        // P(motion) = 0.3
        assert!((2_500..3_500).contains(&ones), "ones = {ones}");
    }

    #[test]
    fn test_rounding() {
        let mut gen = ValueGenerator::seeded(3);
        for _ in 0..1_000 {
            let t = gen.generate(SensorKind::Temperature);
            assert!(((t * 10.0).round() - t * 10.0).abs() < 1e-9);

            let h = gen.generate(SensorKind::Humidity);
            assert_eq!(h.fract(), 0.0);
            let p = gen.generate(SensorKind::Pressure);
            assert_eq!(p.fract(), 0.0);
            let l = gen.generate(SensorKind::Light);
            assert_eq!(l.fract(), 0.0);
        }
    }

    #[test]
    fn test_temperature_centered() {
        let mut gen = ValueGenerator::seeded(42);
        let n = 5_000;
        let mean: f64 = (0..n)
            .map(|_| gen.generate(SensorKind::Temperature))
            .sum::<f64>()
            / n as f64;
        assert!((mean - 22.0).abs() < 0.2, "mean = {mean}");
    }

    #[test]
    fn test_reproducibility() {
        let mut a = ValueGenerator::seeded(12345);
        let mut b = ValueGenerator::seeded(12345);
        for kind in SensorKind::ALL.iter().cycle().take(50) {
            assert_eq!(a.generate(*kind), b.generate(*kind));
        }
    }
}
