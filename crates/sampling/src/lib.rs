//! Concurrent Sampling Loops
//!
//! Sensor loops that run beside the fusion loop on their own threads:
//! - Frame acquisition, publishing the newest frame through a watch cell
//! - Range sampling, publishing the rolling mean distance through an atomic
//! - Distance-adaptive pacing beeps on the pacing audio channel
//!
//! Each loop is the single writer of its snapshot and polls the shared
//! stop and standby flags.

pub mod acquisition;
pub mod beeper;
pub mod range;
pub mod shared;

pub use acquisition::AcquisitionLoop;
pub use beeper::PacingBeeper;
pub use range::RangeLoop;
pub use shared::{frame_cell, DistanceCell, FramePublisher, FrameReader, FrameSnapshot, RunFlags, CLEAR_DISTANCE_CM};

use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use thiserror::Error;
use tracing::debug;

/// Sampling error types
#[derive(Error, Debug)]
pub enum SamplingError {
    #[error("Failed to spawn {name} loop: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} loop panicked")]
    Panicked(&'static str),
}

/// Range sampling and pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Readings at or below this are treated as no return (cm)
    pub min_valid_cm: f32,
    /// Below this: continuous long beep (cm)
    pub contact_cm: i32,
    /// Upper bound of the near band (cm)
    pub near_cm: i32,
    /// Upper bound of the mid band (cm)
    pub mid_cm: i32,
    /// Upper bound of the far band; silent beyond (cm)
    pub far_cm: i32,
    pub near_divisor: u32,
    pub mid_divisor: u32,
    pub far_divisor: u32,
    /// Delay between rangefinder polls (ms)
    pub sample_interval_ms: u64,
    /// Poll interval while in standby (ms)
    pub idle_interval_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_valid_cm: 1.0,
            contact_cm: 75,
            near_cm: 150,
            mid_cm: 225,
            far_cm: 300,
            near_divisor: 220,
            mid_divisor: 380,
            far_divisor: 540,
            sample_interval_ms: 1,
            idle_interval_ms: 50,
        }
    }
}

/// Named handle on a sampling thread
pub struct LoopHandle<T> {
    name: &'static str,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> LoopHandle<T> {
    pub fn spawn<F>(name: &'static str, body: F) -> Result<Self, SamplingError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = std::thread::Builder::new()
            .name(format!("{}-loop", name))
            .spawn(body)
            .map_err(|source| SamplingError::Spawn { name, source })?;
        debug!("Spawned {} loop", name);
        Ok(Self { name, handle })
    }

    /// Wait for the loop to return
    pub fn join(self) -> Result<T, SamplingError> {
        self.handle.join().map_err(|_| SamplingError::Panicked(self.name))
    }
}
