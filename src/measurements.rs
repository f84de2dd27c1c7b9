//! Measurement generation
//!
//! The filter consumes measurements through the [`MeasurementSource`]
//! contract and does not care where they come from: a real sensor feed, log
//! replay, or the simulated sensor below. [`SimulatedSensor`] produces
//! detections with missed-detection gaps plus Poisson clutter, and
//! [`GroundTruth`] drives true target positions with Gaussian drift for
//! tests and demo scenarios.

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson, Uniform};

/// A source of scalar measurements for one time step.
///
/// Implementations must produce, for each true target position, a noisy
/// detection with probability `detection_prob`, plus a Poisson-distributed
/// number of clutter measurements uniform over the state space. Any
/// implementation with that output distribution is interchangeable from the
/// filter's perspective.
pub trait MeasurementSource {
    /// Produce this step's measurement set for the given true positions.
    ///
    /// The returned values carry no identity: nothing links a measurement
    /// to a particular target or marks it as clutter.
    fn measure<R: Rng>(&self, rng: &mut R, true_positions: &[f64]) -> Vec<f64>;
}

/// Simulated sensor with missed detections and uniform Poisson clutter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedSensor {
    /// Probability each true target produces a detection
    pub detection_prob: f64,
    /// Expected clutter measurements per step (Poisson rate)
    pub clutter_rate: f64,
    /// Interval clutter is drawn uniformly from, as `(min, max)`
    pub state_space: (f64, f64),
    /// Standard deviation of detection noise
    pub noise_std: f64,
}

impl SimulatedSensor {
    /// Create a sensor with unit detection noise (std 1.0)
    pub fn new(detection_prob: f64, clutter_rate: f64, state_space: (f64, f64)) -> Self {
        Self {
            detection_prob,
            clutter_rate,
            state_space,
            noise_std: 1.0,
        }
    }

    /// Sensor matching a filter configuration's measurement model
    pub fn from_config(config: &crate::phd::PhdConfig) -> Self {
        Self {
            detection_prob: config.detection_prob,
            clutter_rate: config.clutter_rate,
            state_space: config.state_space,
            noise_std: config.likelihood_std,
        }
    }
}

impl MeasurementSource for SimulatedSensor {
    fn measure<R: Rng>(&self, rng: &mut R, true_positions: &[f64]) -> Vec<f64> {
        let mut measurements = Vec::with_capacity(true_positions.len());

        let noise = Normal::new(0.0, self.noise_std).expect("noise_std must be non-negative");
        for &pos in true_positions {
            if rng.gen::<f64>() < self.detection_prob {
                measurements.push(pos + noise.sample(rng));
            }
        }

        if self.clutter_rate > 0.0 {
            let num_clutter =
                Poisson::new(self.clutter_rate).expect("positive clutter rate").sample(rng) as usize;
            let uniform = Uniform::new(self.state_space.0, self.state_space.1);
            measurements.extend((0..num_clutter).map(|_| uniform.sample(rng)));
        }

        measurements
    }
}

/// True target positions with per-step Gaussian drift.
///
/// Targets here are simulation inputs, not filter state: the filter never
/// sees them directly, only the measurements derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    positions: Vec<f64>,
    drift_std: f64,
}

impl GroundTruth {
    /// Create ground truth with the default drift (std 0.5)
    pub fn new(positions: Vec<f64>) -> Self {
        Self {
            positions,
            drift_std: 0.5,
        }
    }

    /// Create ground truth with a custom drift scale
    pub fn with_drift(positions: Vec<f64>, drift_std: f64) -> Self {
        Self {
            positions,
            drift_std,
        }
    }

    /// Current true positions
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Apply one step of independent Gaussian drift to every target
    pub fn drift<R: Rng>(&mut self, rng: &mut R) {
        if self.drift_std <= 0.0 {
            return;
        }
        let normal = Normal::new(0.0, self.drift_std).expect("positive drift std");
        for pos in &mut self.positions {
            *pos += normal.sample(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::rng::SimpleRng;

    #[test]
    fn test_perfect_detection_no_clutter() {
        let sensor = SimulatedSensor::new(1.0, 0.0, (0.0, 100.0));
        let mut rng = SimpleRng::new(42);

        let measurements = sensor.measure(&mut rng, &[30.0, 60.0]);

        assert_eq!(measurements.len(), 2);
        // Detection noise is std 1.0, measurements stay near truth
        assert!((measurements[0] - 30.0).abs() < 6.0);
        assert!((measurements[1] - 60.0).abs() < 6.0);
    }

    #[test]
    fn test_zero_detection_yields_only_clutter() {
        let sensor = SimulatedSensor::new(0.0, 10.0, (0.0, 100.0));
        let mut rng = SimpleRng::new(42);

        let measurements = sensor.measure(&mut rng, &[30.0, 60.0]);

        for &z in &measurements {
            assert!((0.0..100.0).contains(&z));
        }
    }

    #[test]
    fn test_no_targets_no_clutter_is_empty() {
        let sensor = SimulatedSensor::new(0.9, 0.0, (0.0, 100.0));
        let mut rng = SimpleRng::new(42);
        assert!(sensor.measure(&mut rng, &[]).is_empty());
    }

    #[test]
    fn test_clutter_count_roughly_matches_rate() {
        let sensor = SimulatedSensor::new(0.0, 10.0, (0.0, 100.0));
        let mut rng = SimpleRng::new(7);

        let trials = 200;
        let total: usize = (0..trials)
            .map(|_| sensor.measure(&mut rng, &[]).len())
            .sum();
        let mean = total as f64 / trials as f64;

        assert!((mean - 10.0).abs() < 1.5, "clutter mean {mean} far from 10");
    }

    #[test]
    fn test_ground_truth_drift_moves_targets_slightly() {
        let mut truth = GroundTruth::new(vec![30.0, 60.0]);
        let mut rng = SimpleRng::new(9);

        for _ in 0..10 {
            truth.drift(&mut rng);
        }

        // Ten steps of std-0.5 drift: total std ~1.58 per target
        assert!((truth.positions()[0] - 30.0).abs() < 10.0);
        assert!((truth.positions()[1] - 60.0).abs() < 10.0);
        assert_ne!(truth.positions(), &[30.0, 60.0]);
    }

    #[test]
    fn test_zero_drift_is_static() {
        let mut truth = GroundTruth::with_drift(vec![5.0], 0.0);
        let mut rng = SimpleRng::new(1);
        truth.drift(&mut rng);
        assert_eq!(truth.positions(), &[5.0]);
    }
}
