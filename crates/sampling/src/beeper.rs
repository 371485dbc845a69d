//! Distance-adaptive pacing beeper

use crate::PacingConfig;
use alerting::{AudioChannel, Sample};

/// Beeps faster the closer the nearest obstacle is.
///
/// The counter runs freely; a beep is due whenever it is a multiple of the
/// divisor of the current distance band.
pub struct PacingBeeper {
    config: PacingConfig,
    counter: u64,
}

impl PacingBeeper {
    pub fn new(config: PacingConfig) -> Self {
        Self { config, counter: 0 }
    }

    /// Divisor for a mean distance (cm); zero means silent
    pub fn divisor_for(&self, mean_cm: i32) -> u32 {
        let cfg = &self.config;
        if mean_cm < cfg.contact_cm {
            1
        } else if mean_cm < cfg.near_cm {
            cfg.near_divisor
        } else if mean_cm < cfg.mid_cm {
            cfg.mid_divisor
        } else if mean_cm < cfg.far_cm {
            cfg.far_divisor
        } else {
            0
        }
    }

    /// Advance one sample and beep on `channel` if due and free
    pub fn tick(&mut self, mean_cm: i32, channel: &AudioChannel) -> Option<Sample> {
        self.counter = self.counter.wrapping_add(1);

        let divisor = self.divisor_for(mean_cm);
        if divisor == 0 || self.counter % divisor as u64 != 0 || channel.is_busy() {
            return None;
        }

        let sample = if divisor == 1 {
            Sample::LongBeep
        } else {
            Sample::ShortBeep
        };
        channel.play(sample);
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{Channel, RecordingAudioSink};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn beeper() -> PacingBeeper {
        PacingBeeper::new(PacingConfig::default())
    }

    #[test]
    fn test_bands() {
        let beeper = beeper();
        assert_eq!(beeper.divisor_for(50), 1);
        assert_eq!(beeper.divisor_for(74), 1);
        assert_eq!(beeper.divisor_for(75), 220);
        assert_eq!(beeper.divisor_for(149), 220);
        assert_eq!(beeper.divisor_for(150), 380);
        assert_eq!(beeper.divisor_for(200), 380);
        assert_eq!(beeper.divisor_for(225), 540);
        assert_eq!(beeper.divisor_for(300), 0);
        assert_eq!(beeper.divisor_for(350), 0);
        assert_eq!(beeper.divisor_for(1000), 0);
    }

    #[test]
    fn test_contact_beeps_long_every_tick() {
        let sink = Arc::new(RecordingAudioSink::new());
        let channel = AudioChannel::claim(sink.clone(), Channel::Pacing);
        let mut beeper = beeper();

        for _ in 0..3 {
            assert_eq!(beeper.tick(40, &channel), Some(Sample::LongBeep));
        }
        assert_eq!(sink.played_on(Channel::Pacing), vec![Sample::LongBeep; 3]);
    }

    #[test]
    fn test_near_band_cadence() {
        let sink = Arc::new(RecordingAudioSink::new());
        let channel = AudioChannel::claim(sink.clone(), Channel::Pacing);
        let mut beeper = beeper();

        let beeps = (0..660).filter(|_| beeper.tick(100, &channel).is_some()).count();
        assert_eq!(beeps, 3);
        assert!(sink.played_on(Channel::Pacing).iter().all(|s| *s == Sample::ShortBeep));
    }

    #[test]
    fn test_busy_channel_skips_beep() {
        let sink = Arc::new(RecordingAudioSink::new());
        sink.set_busy(Channel::Pacing, true);
        let channel = AudioChannel::claim(sink.clone(), Channel::Pacing);
        let mut beeper = beeper();

        assert_eq!(beeper.tick(10, &channel), None);
        assert!(sink.played().is_empty());
    }

    #[test]
    fn test_clear_path_is_silent() {
        let sink = Arc::new(RecordingAudioSink::new());
        let channel = AudioChannel::claim(sink.clone(), Channel::Pacing);
        let mut beeper = beeper();

        for _ in 0..2000 {
            assert_eq!(beeper.tick(1000, &channel), None);
        }
    }

    proptest! {
        #[test]
        fn prop_far_is_silent(mean in 300i32..5000) {
            prop_assert_eq!(beeper().divisor_for(mean), 0);
        }

        #[test]
        fn prop_contact_is_continuous(mean in i32::MIN..75) {
            prop_assert_eq!(beeper().divisor_for(mean), 1);
        }
    }
}
