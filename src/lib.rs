/*!
# particle-phd-rs - Particle-based PHD filter

Rust implementation of a particle-based Probability Hypothesis Density
(PHD) filter for multi-target tracking under clutter and missed detections.

## Features

- SIR-style particle filter specialized for a PHD intensity estimate
- Stochastic target births and survival-scaled weights per cycle
- Additive measurement update robust to clutter and missed detections
- Simulated measurement source with Poisson clutter for tests and demos
- Reporter hooks for logging and debugging each filter stage

## Modules

- [`phd`] - The filter engine, its configuration and particle population
- [`measurements`] - Measurement source contract and simulated sensor
- [`reporter`] - Per-stage observability hooks
- [`common`] - Low-level utilities (deterministic RNG)

## Example

```rust
use particle_phd_rs::phd::{PhdConfig, PhdFilter};
use particle_phd_rs::measurements::{GroundTruth, MeasurementSource, SimulatedSensor};
use particle_phd_rs::common::SimpleRng;

let mut rng = SimpleRng::new(42);

let config = PhdConfig::default();
let sensor = SimulatedSensor::from_config(&config);
let mut truth = GroundTruth::new(vec![30.0, 60.0]);
let mut filter = PhdFilter::new(config, &mut rng).unwrap();

for _ in 0..10 {
    let measurements = sensor.measure(&mut rng, truth.positions());
    truth.drift(&mut rng);
    let estimate = filter.step(&mut rng, &measurements).unwrap();
    println!("expected targets: {:.2}", estimate.expected_targets);
}
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// PHD filter engine, configuration and particle population
pub mod phd;

/// Measurement source contract and simulated sensor
pub mod measurements;

/// Observability hooks for filter execution
pub mod reporter;

/// Low-level utilities (deterministic RNG)
pub mod common;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Core types
pub use phd::{IntensityEstimate, Particle, ParticlePopulation, PhdConfig, PhdFilter};

// Errors
pub use phd::FilterError;

// Measurement generation
pub use measurements::{GroundTruth, MeasurementSource, SimulatedSensor};

// Reporters
pub use reporter::{DebugReporter, LoggingReporter, NoOpReporter, StepReporter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
