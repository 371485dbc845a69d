//! Rolling Windows
//!
//! Fixed-capacity FIFO windows used to smooth noisy sensor readings:
//! - Rangefinder distance (mean)
//! - Vertical acceleration (sample standard deviation)
//! - Barometric altitude (mean, lagged pair)

mod window;

pub use window::RollingWindow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window statistic errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Window is empty")]
    Empty,

    #[error("Need at least {required} samples, window holds {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("Window capacity must be non-zero")]
    ZeroCapacity,
}

/// Window capacities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Rangefinder samples averaged into the shared mean distance
    pub distance_capacity: usize,
    /// Vertical acceleration samples for walking detection
    pub acceleration_capacity: usize,
    /// Altitude samples per slope window
    pub altitude_capacity: usize,
}

impl WindowConfig {
    /// Reject capacities no window can be built with
    pub fn validate(&self) -> Result<(), WindowError> {
        let capacities = [
            self.distance_capacity,
            self.acceleration_capacity,
            self.altitude_capacity,
        ];
        if capacities.contains(&0) {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            distance_capacity: 10,
            acceleration_capacity: 15,
            altitude_capacity: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacities_are_valid() {
        assert!(WindowConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_config_rejected() {
        let config = WindowConfig {
            altitude_capacity: 0,
            ..WindowConfig::default()
        };
        assert_eq!(config.validate(), Err(WindowError::ZeroCapacity));
    }
}
