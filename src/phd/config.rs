//! Filter configuration
//!
//! All model parameters live in a single immutable [`PhdConfig`] value that
//! is handed to the engine at construction time. Validation happens once,
//! eagerly, so every `step` call can assume a well-formed model.

use super::errors::FilterError;

/// Configuration for a particle PHD filter.
///
/// Read-only after construction. Validated by [`PhdConfig::validate`],
/// which [`crate::phd::PhdFilter::new`] calls before accepting the config.
#[derive(Debug, Clone, PartialEq)]
pub struct PhdConfig {
    /// Target population size after resampling
    pub num_particles: usize,
    /// Probability a target persists to the next time step
    pub survival_prob: f64,
    /// Probability a present target is detected by the sensor
    pub detection_prob: f64,
    /// Expected new-target births per particle per step (Poisson rate,
    /// scaled by the current population size)
    pub birth_rate: f64,
    /// Expected false measurements per step (Poisson rate)
    pub clutter_rate: f64,
    /// Closed interval bounding the state space, as `(min, max)`
    pub state_space: (f64, f64),
    /// Standard deviation of the random-walk motion noise
    pub process_noise_std: f64,
    /// Standard deviation of the Gaussian measurement-likelihood kernel
    pub likelihood_std: f64,
}

impl Default for PhdConfig {
    fn default() -> Self {
        Self {
            num_particles: 500,
            survival_prob: 0.95,
            detection_prob: 0.9,
            birth_rate: 0.1,
            clutter_rate: 10.0,
            state_space: (0.0, 100.0),
            process_noise_std: 1.0,
            likelihood_std: 1.0,
        }
    }
}

impl PhdConfig {
    /// Width of the state space interval
    #[inline]
    pub fn state_space_width(&self) -> f64 {
        self.state_space.1 - self.state_space.0
    }

    /// Nominal per-particle weight of the steady-state population
    #[inline]
    pub fn nominal_weight(&self) -> f64 {
        1.0 / self.num_particles as f64
    }

    /// Check all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Configuration`] on the first violated
    /// invariant: non-positive population size, probabilities outside
    /// `[0, 1]`, negative rates, an empty or non-finite state space,
    /// invalid noise scales, or a parameter combination that cannot keep
    /// the post-update weight sum positive.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.num_particles == 0 {
            return Err(FilterError::configuration("num_particles must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.survival_prob) {
            return Err(FilterError::configuration(format!(
                "survival_prob must be in [0, 1], got {}",
                self.survival_prob
            )));
        }
        if !(0.0..=1.0).contains(&self.detection_prob) {
            return Err(FilterError::configuration(format!(
                "detection_prob must be in [0, 1], got {}",
                self.detection_prob
            )));
        }
        if !self.birth_rate.is_finite() || self.birth_rate < 0.0 {
            return Err(FilterError::configuration(format!(
                "birth_rate must be finite and >= 0, got {}",
                self.birth_rate
            )));
        }
        if !self.clutter_rate.is_finite() || self.clutter_rate < 0.0 {
            return Err(FilterError::configuration(format!(
                "clutter_rate must be finite and >= 0, got {}",
                self.clutter_rate
            )));
        }
        let (lo, hi) = self.state_space;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(FilterError::configuration(format!(
                "state_space must be a non-empty finite interval, got ({}, {})",
                lo, hi
            )));
        }
        if !self.process_noise_std.is_finite() || self.process_noise_std < 0.0 {
            return Err(FilterError::configuration(format!(
                "process_noise_std must be finite and >= 0, got {}",
                self.process_noise_std
            )));
        }
        if !self.likelihood_std.is_finite() || self.likelihood_std <= 0.0 {
            return Err(FilterError::configuration(format!(
                "likelihood_std must be finite and > 0, got {}",
                self.likelihood_std
            )));
        }
        // With zero survival the retained mass vanishes every predict step,
        // so either detections or births must be able to resupply it.
        if self.survival_prob == 0.0 && self.detection_prob == 0.0 {
            return Err(FilterError::configuration(
                "survival_prob and detection_prob cannot both be zero",
            ));
        }
        if self.survival_prob == 0.0 && self.birth_rate == 0.0 {
            return Err(FilterError::configuration(
                "survival_prob and birth_rate cannot both be zero",
            ));
        }
        Ok(())
    }
}
