//! Particle-based PHD filter
//!
//! The Probability Hypothesis Density (PHD) is an intensity function over
//! the state space whose integral over a region approximates the expected
//! number of targets there. This module approximates the PHD with a weighted
//! particle cloud and advances it one predict→birth→update→normalize→
//! resample cycle per [`PhdFilter::step`] call.

pub mod config;
pub mod errors;
pub mod filter;
pub mod population;

pub use config::PhdConfig;
pub use errors::FilterError;
pub use filter::{IntensityEstimate, PhdFilter};
pub use population::{Particle, ParticlePopulation};
