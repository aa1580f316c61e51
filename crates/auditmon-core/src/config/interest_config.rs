//! Degree-of-interest model parameters.

use serde::{Deserialize, Serialize};

use crate::errors::InterestError;

/// Parameters of the decaying interest model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestConfig {
    /// Subtracted from every other tracked granule on each hit. Must be >= 0.
    pub decay_rate: f64,
    /// Added to the hit granule. Must be > 0.
    pub interest_increase: f64,
    /// Entries strictly below this are dropped. Must be <= 0.
    pub interest_threshold: f64,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            interest_increase: 1.0,
            interest_threshold: -10.0,
        }
    }
}

impl InterestConfig {
    pub fn new(decay_rate: f64, interest_increase: f64, interest_threshold: f64) -> Self {
        Self {
            decay_rate,
            interest_increase,
            interest_threshold,
        }
    }

    /// Check every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), InterestError> {
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(InterestError::InvalidParameter {
                name: "decay_rate",
                value: self.decay_rate,
                reason: "must be a finite value >= 0",
            });
        }
        if !self.interest_increase.is_finite() || self.interest_increase <= 0.0 {
            return Err(InterestError::InvalidParameter {
                name: "interest_increase",
                value: self.interest_increase,
                reason: "must be a finite value > 0",
            });
        }
        if !self.interest_threshold.is_finite() || self.interest_threshold > 0.0 {
            return Err(InterestError::InvalidParameter {
                name: "interest_threshold",
                value: self.interest_threshold,
                reason: "must be a finite value <= 0",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(InterestConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_decay() {
        let err = InterestConfig::new(-0.1, 1.0, -10.0).validate().unwrap_err();
        assert!(matches!(
            err,
            InterestError::InvalidParameter { name: "decay_rate", .. }
        ));
    }

    #[test]
    fn rejects_zero_increase_and_positive_threshold() {
        assert!(InterestConfig::new(0.1, 0.0, -10.0).validate().is_err());
        assert!(InterestConfig::new(0.1, 1.0, 0.5).validate().is_err());
        assert!(InterestConfig::new(0.1, 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn rejects_nan() {
        assert!(InterestConfig::new(f64::NAN, 1.0, -10.0).validate().is_err());
        assert!(InterestConfig::new(0.1, f64::INFINITY, -10.0).validate().is_err());
    }
}
