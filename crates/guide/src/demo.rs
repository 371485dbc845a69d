//! Bench collaborators: a simulated walk past a parked bicycle

use alerting::{AudioSink, LoggingAudioSink};
use fusion::Collaborators;
use proximity::{Detection, ObjectClass, ScriptedDetector};
use sensor_adapter::sim::{checkerboard, ScriptedFrameSource};
use sensor_adapter::{
    BarometricReading, CameraConfig, LocalClock, MotionConfig, MotionSample, MotionSensor, Quaternion,
    RangeError, Rangefinder, SensorError, Vector3,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Length each logged cue keeps its channel busy
const CLIP_LENGTH: Duration = Duration::from_millis(1500);

/// Stride frequency of the simulated wearer (Hz)
const STRIDE_HZ: f32 = 2.0;

/// Wearer walking on flat ground, head level
pub struct WalkingWearer {
    step: u64,
    rate_hz: u32,
}

impl WalkingWearer {
    pub fn new() -> Self {
        Self {
            step: 0,
            rate_hz: MotionConfig::default().accel_rate_hz,
        }
    }
}

impl Default for WalkingWearer {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSensor for WalkingWearer {
    fn begin(&mut self, config: &MotionConfig) -> Result<(), SensorError> {
        config.validate()?;
        self.rate_hz = config.accel_rate_hz;
        info!("Simulated motion sensor ready at {} Hz", self.rate_hz);
        Ok(())
    }

    fn poll(&mut self) -> Result<MotionSample, SensorError> {
        self.step += 1;
        let phase = self.step as f32 * std::f32::consts::TAU * STRIDE_HZ / self.rate_hz as f32;

        Ok(MotionSample {
            quaternion: Some(Quaternion::from_euler(-90.0, 0.0, 45.0)),
            acceleration: Some(Vector3::new(0.0, 0.0, 0.5 * phase.sin())),
            gyro: Some(Vector3::default()),
            barometer: Some(BarometricReading::from_pressure(1008.0, 18.5)),
        })
    }
}

/// Rangefinder sweeping between an approaching obstacle and open space
pub struct SweepingRangefinder {
    sample: u64,
    period: u64,
}

impl SweepingRangefinder {
    pub fn new(period: u64) -> Self {
        Self {
            sample: 0,
            period: period.max(2),
        }
    }
}

impl Rangefinder for SweepingRangefinder {
    fn open(&mut self) -> Result<(), RangeError> {
        info!("Simulated rangefinder ready");
        Ok(())
    }

    fn sample_distance(&mut self) -> Result<Option<f32>, RangeError> {
        self.sample += 1;
        let position = (self.sample % self.period) as f32 / self.period as f32;
        // 400 cm down to 40 cm, then open space for the rest of the cycle
        if position < 0.5 {
            Ok(Some(400.0 - 720.0 * position))
        } else {
            Ok(None)
        }
    }
}

/// Every collaborator the guide needs, simulated at the configured capture size
pub fn collaborators(camera: &CameraConfig) -> Collaborators {
    let bicycle = Detection::new(ObjectClass::Bicycle, 0.82, [0.35, 0.15, 0.68, 0.95]);
    let audio: Arc<dyn AudioSink> = Arc::new(LoggingAudioSink::new(CLIP_LENGTH));

    Collaborators {
        camera: Box::new(ScriptedFrameSource::repeating(checkerboard(camera.width, camera.height, 16))),
        rangefinder: Box::new(SweepingRangefinder::new(20_000)),
        motion: Box::new(WalkingWearer::new()),
        audio,
        clock: Box::new(LocalClock),
        detector: ScriptedDetector::factory(vec![vec![bicycle]], true),
    }
}
