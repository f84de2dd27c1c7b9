//! Particle population types
//!
//! The PHD intensity function is approximated by a weighted particle cloud.
//! A particle pairs its position with its weight in one struct so the two
//! can never fall out of alignment across births and resampling.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::config::PhdConfig;

/// One sample of the intensity function: a state-space position with its
/// associated weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in state space
    pub position: f64,
    /// Non-negative importance weight
    pub weight: f64,
}

impl Particle {
    /// Create a new particle
    #[inline]
    pub fn new(position: f64, weight: f64) -> Self {
        Self { position, weight }
    }
}

/// A weighted particle cloud approximating the PHD.
///
/// The population is a disposable working set: each filter cycle grows it
/// via births, reweights it, and resamples it back down to the configured
/// size. No particle carries identity across cycles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticlePopulation {
    particles: Vec<Particle>,
}

impl ParticlePopulation {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population from an existing particle set
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Draw the initial population: `num_particles` positions uniform over
    /// the state space, each with the nominal weight `1 / num_particles`.
    pub fn uniform_init<R: Rng>(config: &PhdConfig, rng: &mut R) -> Self {
        let uniform = Uniform::new(config.state_space.0, config.state_space.1);
        let weight = config.nominal_weight();
        let particles = (0..config.num_particles)
            .map(|_| Particle::new(uniform.sample(rng), weight))
            .collect();
        Self { particles }
    }

    /// Number of particles
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the population is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sum of all particle weights.
    ///
    /// Before normalization this is the PHD mass: the estimated expected
    /// number of targets in the state space.
    pub fn weight_sum(&self) -> f64 {
        self.particles.iter().map(|p| p.weight).sum()
    }

    /// Iterate over particles
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Iterate over particles mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Positions of all particles, in index order
    pub fn positions(&self) -> Vec<f64> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Weights of all particles, in index order
    pub fn weights(&self) -> Vec<f64> {
        self.particles.iter().map(|p| p.weight).collect()
    }

    /// Append a particle (used by the birth stage)
    #[inline]
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Particle at the given index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Replace the whole particle set (used by the resample stage)
    pub fn replace(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    /// Histogram of particle counts over `bins` equal-width cells spanning
    /// `range`. Positions outside the range are clamped into the boundary
    /// cells. Useful for inspecting where the intensity mass concentrates.
    pub fn histogram(&self, range: (f64, f64), bins: usize) -> Vec<usize> {
        let mut counts = vec![0usize; bins];
        if bins == 0 || range.1 <= range.0 {
            return counts;
        }
        let width = (range.1 - range.0) / bins as f64;
        for p in &self.particles {
            let cell = ((p.position - range.0) / width).floor();
            let cell = (cell.max(0.0) as usize).min(bins - 1);
            counts[cell] += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ParticlePopulation {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
