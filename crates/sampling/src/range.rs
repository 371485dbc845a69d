//! Range sampling loop

use crate::{DistanceCell, LoopHandle, PacingBeeper, PacingConfig, RunFlags, SamplingError, CLEAR_DISTANCE_CM};
use alerting::AudioChannel;
use rolling_window::{RollingWindow, WindowError};
use sensor_adapter::{RangeError, Rangefinder};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Polls the rangefinder, publishes the rolling mean distance and drives
/// the pacing beeper on its own channel.
pub struct RangeLoop {
    rangefinder: Box<dyn Rangefinder>,
    window: RollingWindow<i32>,
    beeper: PacingBeeper,
    channel: AudioChannel,
    distance: Arc<DistanceCell>,
    flags: Arc<RunFlags>,
    min_valid_cm: f32,
    interval: Duration,
    idle: Duration,
}

impl RangeLoop {
    pub fn new(
        rangefinder: Box<dyn Rangefinder>,
        channel: AudioChannel,
        distance: Arc<DistanceCell>,
        flags: Arc<RunFlags>,
        capacity: usize,
        config: &PacingConfig,
    ) -> Result<Self, WindowError> {
        Ok(Self {
            rangefinder,
            window: RollingWindow::prefilled(capacity, CLEAR_DISTANCE_CM)?,
            beeper: PacingBeeper::new(config.clone()),
            channel,
            distance,
            flags,
            min_valid_cm: config.min_valid_cm,
            interval: Duration::from_millis(config.sample_interval_ms),
            idle: Duration::from_millis(config.idle_interval_ms),
        })
    }

    pub fn spawn(self) -> Result<LoopHandle<AudioChannel>, SamplingError> {
        LoopHandle::spawn("range", move || self.run())
    }

    /// Take one reading and publish the new mean (cm)
    pub fn step(&mut self) -> Result<i32, RangeError> {
        let distance = match self.rangefinder.sample_distance()? {
            Some(cm) if cm > self.min_valid_cm => cm as i32,
            _ => CLEAR_DISTANCE_CM,
        };
        self.window.push(distance);

        let mean = self.window.mean().map(|m| m as i32).unwrap_or(CLEAR_DISTANCE_CM);
        self.distance.publish(mean);
        self.beeper.tick(mean, &self.channel);
        Ok(mean)
    }

    /// Run until stopped or the rangefinder faults; hands the pacing channel back
    pub fn run(mut self) -> AudioChannel {
        info!("Starting distance loop");

        while !self.flags.should_stop() {
            if self.flags.in_standby() {
                std::thread::sleep(self.idle);
                continue;
            }
            if let Err(e) = self.step() {
                error!("{}; stopping distance loop", e);
                self.flags.raise_range_fault();
                return self.channel;
            }
            std::thread::sleep(self.interval);
        }

        info!("Received stop command; stopping distance loop");
        self.window.clear();
        self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{Channel, RecordingAudioSink, Sample};
    use sensor_adapter::sim::ScriptedRangefinder;

    fn range_loop(
        rangefinder: ScriptedRangefinder,
        sink: Arc<RecordingAudioSink>,
    ) -> (RangeLoop, Arc<DistanceCell>, Arc<RunFlags>) {
        let distance = Arc::new(DistanceCell::new());
        let flags = RunFlags::new();
        let config = PacingConfig {
            sample_interval_ms: 0,
            idle_interval_ms: 0,
            ..PacingConfig::default()
        };
        let channel = AudioChannel::claim(sink, Channel::Pacing);
        let range = RangeLoop::new(Box::new(rangefinder), channel, distance.clone(), flags.clone(), 10, &config).unwrap();
        (range, distance, flags)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let sink = Arc::new(RecordingAudioSink::new());
        let result = RangeLoop::new(
            Box::new(ScriptedRangefinder::constant(100.0)),
            AudioChannel::claim(sink, Channel::Pacing),
            Arc::new(DistanceCell::new()),
            RunFlags::new(),
            0,
            &PacingConfig::default(),
        );
        assert!(matches!(result, Err(WindowError::ZeroCapacity)));
    }

    #[test]
    fn test_mean_converges_from_clear() {
        let sink = Arc::new(RecordingAudioSink::new());
        let (mut range, distance, _) = range_loop(ScriptedRangefinder::constant(100.0), sink);

        // One reading of 100 among nine sentinels
        assert_eq!(range.step().unwrap(), 910);
        for _ in 0..9 {
            range.step().unwrap();
        }
        assert_eq!(distance.get(), 100);
    }

    #[test]
    fn test_non_returns_count_as_clear() {
        let sink = Arc::new(RecordingAudioSink::new());
        let script = vec![Ok(Some(1.0)), Ok(None), Ok(Some(0.0))];
        let (mut range, distance, _) = range_loop(ScriptedRangefinder::new(script), sink);

        for _ in 0..3 {
            assert_eq!(range.step().unwrap(), CLEAR_DISTANCE_CM);
        }
        assert_eq!(distance.get(), CLEAR_DISTANCE_CM);
    }

    #[test]
    fn test_close_obstacle_beeps_long() {
        let sink = Arc::new(RecordingAudioSink::new());
        let (mut range, _, _) = range_loop(ScriptedRangefinder::constant(30.0), sink.clone());

        for _ in 0..10 {
            range.step().unwrap();
        }
        assert_eq!(sink.played_on(Channel::Pacing), vec![Sample::LongBeep]);
    }

    #[test]
    fn test_fault_raises_flag_and_returns_channel() {
        let sink = Arc::new(RecordingAudioSink::new());
        let script = vec![Ok(Some(200.0)), Err(RangeError::Read("bus timeout".into()))];
        let (range, _, flags) = range_loop(ScriptedRangefinder::new(script), sink);

        let channel = range.run();
        assert!(flags.range_faulted());
        assert_eq!(channel.channel(), Channel::Pacing);
    }
}
