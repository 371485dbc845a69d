//! Red-then-green traffic light debounce

use alerting::WarningKind;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrafficLightState {
    #[default]
    Unseen,
    RedSeen,
    GreenConfirmed,
}

/// Announces a red light once, then a green light only if it follows a red
/// within the hold window.
pub struct TrafficLightDebounce {
    state: TrafficLightState,
    hold_ticks: u32,
    hold_remaining: u32,
}

impl TrafficLightDebounce {
    pub fn new(hold_ticks: u32) -> Self {
        Self {
            state: TrafficLightState::Unseen,
            hold_ticks,
            hold_remaining: 0,
        }
    }

    /// A qualifying red light; restarts the hold window
    pub fn observe_red(&mut self) -> Option<WarningKind> {
        let alert = (self.state == TrafficLightState::Unseen).then_some(WarningKind::TrafficLightRed);
        self.state = TrafficLightState::RedSeen;
        self.hold_remaining = self.hold_ticks;
        alert
    }

    /// A qualifying green light
    pub fn observe_green(&mut self) -> Option<WarningKind> {
        if self.state != TrafficLightState::RedSeen {
            return None;
        }
        debug!("Green light confirmed after red");
        self.state = TrafficLightState::GreenConfirmed;
        Some(WarningKind::TrafficLightGreen)
    }

    /// Advance the hold window by one detection pass
    pub fn tick(&mut self) {
        if self.hold_remaining == 0 {
            return;
        }
        self.hold_remaining -= 1;
        if self.hold_remaining == 0 {
            debug!("Traffic light hold expired in {:?}", self.state);
            self.state = TrafficLightState::Unseen;
        }
    }

    pub fn state(&self) -> TrafficLightState {
        self.state
    }
}
