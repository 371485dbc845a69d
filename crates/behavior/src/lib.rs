//! Behavioral State Machines
//!
//! Small automata driven once per fusion tick:
//! - Head-tilt gestures and two-press shutdown confirmation
//! - Time/weather advisory bundle
//! - Walking detection (acceleration hysteresis)
//! - Slope detection (barometric altitude trend)
//! - Day/night classification (run-length confirmed)
//! - Traffic-light red/green debounce

pub mod advisory;
pub mod config;
pub mod daylight;
pub mod gesture;
pub mod motion;
pub mod slope;
pub mod traffic_light;

pub use advisory::Advisory;
pub use config::BehaviorConfig;
pub use daylight::{DaylightClassifier, LightClass};
pub use gesture::{Gesture, GestureRecognizer, ShutdownPress, ShutdownTimer};
pub use motion::WalkingDetector;
pub use slope::SlopeDetector;
pub use traffic_light::{TrafficLightDebounce, TrafficLightState};
