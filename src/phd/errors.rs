//! Error types for the PHD filter
//!
//! This module provides proper error handling instead of panics.

use std::fmt;

/// Errors that can occur when constructing or running the filter
#[derive(Debug, Clone)]
pub enum FilterError {
    /// Configuration error, detected eagerly at construction
    Configuration {
        /// Description of the configuration issue
        description: String,
    },

    /// Numerical instability detected
    NumericalInstability {
        /// Description of the issue
        description: String,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::Configuration { description } => {
                write!(f, "Configuration error: {}", description)
            }
            FilterError::NumericalInstability { description } => {
                write!(f, "Numerical instability: {}", description)
            }
        }
    }
}

impl std::error::Error for FilterError {}

impl FilterError {
    /// Shorthand for a configuration error with the given description
    pub fn configuration(description: impl Into<String>) -> Self {
        FilterError::Configuration {
            description: description.into(),
        }
    }
}
