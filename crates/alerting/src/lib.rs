//! Alerting System
//!
//! Turns candidate warnings into paced audio cues:
//! - Closed set of warning kinds with a fixed priority table
//! - Deduplicating arbitration queue draining onto the warning channel
//! - Exclusive audio channel handles over a shared sample player

mod audio;
mod queue;
mod warning;

pub use audio::{AudioChannel, AudioSink, Channel, LoggingAudioSink, RecordingAudioSink, MAX_VOLUME};
pub use queue::{QueueConfig, Warning, WarningQueue};
pub use warning::{Sample, WarningKind};
