//! Low-level utilities

pub mod rng;

pub use rng::SimpleRng;
