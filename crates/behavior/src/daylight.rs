//! Day/night scene classification with run-length confirmation

use crate::BehaviorConfig;
use tracing::{debug, info};

/// Scene light class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightClass {
    Day,
    Night,
}

/// Confirms a light change only after it persists for a run of ticks.
///
/// Observing the confirmed class again during a run discards the run
/// entirely; the next differing tick starts counting from one.
pub struct DaylightClassifier {
    night_below: u32,
    confirm_ticks: u32,
    confirmed: LightClass,
    candidate: Option<LightClass>,
    run_length: u32,
}

impl DaylightClassifier {
    pub fn new(config: &BehaviorConfig) -> Self {
        Self {
            night_below: config.night_luminance,
            confirm_ticks: config.daylight_confirm_ticks.max(1),
            confirmed: LightClass::Day,
            candidate: None,
            run_length: 0,
        }
    }

    /// Instantaneous class of a luminance score
    pub fn classify(&self, luminance: u32) -> LightClass {
        if luminance < self.night_below {
            LightClass::Night
        } else {
            LightClass::Day
        }
    }

    /// Feed one luminance score; returns the new class on a confirmed change
    pub fn observe(&mut self, luminance: u32) -> Option<LightClass> {
        let class = self.classify(luminance);

        if class == self.confirmed {
            if self.candidate.take().is_some() {
                debug!("Light change to {:?} abandoned after {} ticks", class, self.run_length);
            }
            self.run_length = 0;
            return None;
        }

        if self.candidate == Some(class) {
            self.run_length += 1;
        } else {
            self.candidate = Some(class);
            self.run_length = 1;
        }

        if self.run_length >= self.confirm_ticks {
            info!("Scene light changed to {:?}", class);
            self.confirmed = class;
            self.candidate = None;
            self.run_length = 0;
            return Some(class);
        }
        None
    }

    pub fn confirmed(&self) -> LightClass {
        self.confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier() -> DaylightClassifier {
        DaylightClassifier::new(&BehaviorConfig::default())
    }

    #[test]
    fn test_six_dark_ticks_do_not_confirm() {
        let mut light = classifier();
        for _ in 0..6 {
            assert_eq!(light.observe(60), None);
        }
        assert_eq!(light.observe(120), None);
        assert_eq!(light.confirmed(), LightClass::Day);
    }

    #[test]
    fn test_seven_dark_ticks_confirm() {
        let mut light = classifier();
        for _ in 0..6 {
            assert_eq!(light.observe(89), None);
        }
        assert_eq!(light.observe(89), Some(LightClass::Night));
        assert_eq!(light.confirmed(), LightClass::Night);
    }

    #[test]
    fn test_disagreement_resets_run() {
        let mut light = classifier();
        for _ in 0..5 {
            light.observe(10);
        }
        light.observe(200);
        for _ in 0..6 {
            assert_eq!(light.observe(10), None);
        }
        assert_eq!(light.observe(10), Some(LightClass::Night));
    }

    #[test]
    fn test_threshold_is_inclusive_for_day() {
        let light = classifier();
        assert_eq!(light.classify(90), LightClass::Day);
        assert_eq!(light.classify(89), LightClass::Night);
    }

    proptest! {
        #[test]
        fn prop_bright_scenes_stay_day(scores in prop::collection::vec(90u32..=255, 0..100)) {
            let mut light = classifier();
            for score in scores {
                prop_assert_eq!(light.observe(score), None);
            }
            prop_assert_eq!(light.confirmed(), LightClass::Day);
        }
    }
}
