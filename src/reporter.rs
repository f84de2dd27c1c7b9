//! Observability for filter execution.
//!
//! This module provides the [`StepReporter`] trait for debugging and research
//! instrumentation. Reporters receive callbacks after each stage of a filter
//! cycle without polluting the core algorithm logic.
//!
//! The default [`NoOpReporter`] compiles to zero overhead: all callback
//! methods are empty and are optimized away. [`LoggingReporter`] forwards
//! stage events to the `log` facade, and [`DebugReporter`] captures them
//! for later inspection in tests.

use crate::phd::population::ParticlePopulation;

// ============================================================================
// StepReporter trait
// ============================================================================

/// Observability trait for filter step execution.
///
/// All methods have default empty implementations, so implementors only
/// override the events they care about. Callbacks receive references; clone
/// within the callback if the data needs to outlive it.
pub trait StepReporter {
    /// Called after the predict stage (motion noise applied, weights
    /// scaled by the survival probability).
    fn on_predict(&mut self, _population: &ParticlePopulation) {}

    /// Called after birth particles are appended. `num_births` may be zero.
    fn on_birth(&mut self, _num_births: usize, _population: &ParticlePopulation) {}

    /// Called after the measurement update, before normalization.
    fn on_update(&mut self, _num_measurements: usize, _population: &ParticlePopulation) {}

    /// Called after normalization. `mass` is the pre-normalization weight
    /// sum, i.e. the estimated expected number of targets.
    fn on_normalize(&mut self, _mass: f64) {}

    /// Called after resampling, when the population is back at its
    /// configured size with uniform weights.
    fn on_resample(&mut self, _population: &ParticlePopulation) {}
}

// ============================================================================
// Implementations
// ============================================================================

/// Reporter that does nothing. The default for [`crate::phd::PhdFilter::step`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl StepReporter for NoOpReporter {}

/// Reporter that emits stage events through the `log` facade.
///
/// Population-level detail goes to `trace`, per-stage summaries to `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter;

impl StepReporter for LoggingReporter {
    fn on_predict(&mut self, population: &ParticlePopulation) {
        log::trace!("predict: {} particles propagated", population.len());
    }

    fn on_birth(&mut self, num_births: usize, population: &ParticlePopulation) {
        log::debug!(
            "birth: {} new particles, population now {}",
            num_births,
            population.len()
        );
    }

    fn on_update(&mut self, num_measurements: usize, population: &ParticlePopulation) {
        log::debug!(
            "update: {} measurements applied to {} particles",
            num_measurements,
            population.len()
        );
    }

    fn on_normalize(&mut self, mass: f64) {
        log::debug!("normalize: expected target count {:.3}", mass);
    }

    fn on_resample(&mut self, population: &ParticlePopulation) {
        log::trace!("resample: population back at {} particles", population.len());
    }
}

/// One captured stage event.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    /// Population size after predict
    Predict { population_size: usize },
    /// Birth count and resulting population size
    Birth {
        num_births: usize,
        population_size: usize,
    },
    /// Measurement count applied
    Update { num_measurements: usize },
    /// Pre-normalization weight sum
    Normalize { mass: f64 },
    /// Population size after resample
    Resample { population_size: usize },
}

/// Reporter that records every stage event, for tests and debugging.
#[derive(Debug, Clone, Default)]
pub struct DebugReporter {
    events: Vec<StageEvent>,
}

impl DebugReporter {
    /// Create an empty debug reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events, in order
    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    /// Discard captured events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl StepReporter for DebugReporter {
    fn on_predict(&mut self, population: &ParticlePopulation) {
        self.events.push(StageEvent::Predict {
            population_size: population.len(),
        });
    }

    fn on_birth(&mut self, num_births: usize, population: &ParticlePopulation) {
        self.events.push(StageEvent::Birth {
            num_births,
            population_size: population.len(),
        });
    }

    fn on_update(&mut self, num_measurements: usize, _population: &ParticlePopulation) {
        self.events.push(StageEvent::Update { num_measurements });
    }

    fn on_normalize(&mut self, mass: f64) {
        self.events.push(StageEvent::Normalize { mass });
    }

    fn on_resample(&mut self, population: &ParticlePopulation) {
        self.events.push(StageEvent::Resample {
            population_size: population.len(),
        });
    }
}
