//! Warning Arbitration Queue

use crate::{AudioChannel, WarningKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Played warnings are dropped once their age exceeds this many ticks
    pub retire_after_ticks: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            retire_after_ticks: 10,
        }
    }
}

/// Pending or recently played warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    /// Whether the warning has been announced
    pub played: bool,
    /// Ticks since it was announced
    pub age: u32,
    pub priority: u16,
}

impl Warning {
    pub fn new(kind: WarningKind) -> Self {
        Self {
            kind,
            played: false,
            age: 0,
            priority: kind.priority(),
        }
    }
}

/// Holds at most one live warning per kind and drains them by priority
pub struct WarningQueue {
    config: QueueConfig,
    /// Insertion order breaks priority ties
    warnings: Vec<Warning>,
}

impl WarningQueue {
    pub fn new(config: QueueConfig) -> Self {
        debug!("Creating warning queue with config: {:?}", config);
        Self {
            config,
            warnings: Vec::new(),
        }
    }

    /// Queue a warning; no-op if that kind is already live.
    ///
    /// Returns whether the warning was added.
    pub fn push(&mut self, kind: WarningKind) -> bool {
        if self.contains(kind) {
            return false;
        }
        debug!("Queued warning {:?} (priority {})", kind, kind.priority());
        self.warnings.push(Warning::new(kind));
        true
    }

    pub fn contains(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    /// Age played warnings, retire stale ones, and announce the most urgent
    /// unplayed warning if the channel is free.
    ///
    /// Returns the kind announced this tick.
    pub fn tick(&mut self, channel: &AudioChannel) -> Option<WarningKind> {
        let retire_after = self.config.retire_after_ticks;
        for warning in self.warnings.iter_mut().filter(|w| w.played) {
            warning.age += 1;
        }
        self.warnings.retain(|w| {
            let keep = !w.played || w.age <= retire_after;
            if !keep {
                debug!("Retired warning {:?}", w.kind);
            }
            keep
        });

        let mut next: Option<usize> = None;
        for (i, warning) in self.warnings.iter().enumerate() {
            if warning.played {
                continue;
            }
            if next.map_or(true, |n| warning.priority > self.warnings[n].priority) {
                next = Some(i);
            }
        }

        let index = next?;
        if channel.is_busy() {
            return None;
        }

        let warning = &mut self.warnings[index];
        channel.play(warning.kind.sample());
        warning.played = true;
        info!("Announced {:?}", warning.kind);
        Some(warning.kind)
    }

    /// Live warnings in insertion order
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn clear(&mut self) {
        self.warnings.clear();
    }
}

impl Default for WarningQueue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}
