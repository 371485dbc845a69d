//! Scripted collaborators for bench runs and tests

use crate::{
    CameraConfig, CameraError, FrameSource, MotionConfig, MotionSample, MotionSensor, RangeError,
    Rangefinder, SensorError, VideoFrame, WallClock,
};
use std::collections::VecDeque;
use tracing::debug;

/// Black/white checkerboard with square cells of `cell` pixels
pub fn checkerboard(width: u32, height: u32, cell: u32) -> VideoFrame {
    let cell = cell.max(1);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = if ((x / cell) + (y / cell)) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    VideoFrame::new(data, width, height, 0, 0)
}

/// Frame source replaying a fixed list of frames
pub struct ScriptedFrameSource {
    frames: VecDeque<VideoFrame>,
    last: Option<VideoFrame>,
    repeat_last: bool,
    open_error: Option<String>,
}

impl ScriptedFrameSource {
    /// Play `frames` once, then report end-of-stream
    pub fn new(frames: Vec<VideoFrame>) -> Self {
        Self {
            frames: frames.into(),
            last: None,
            repeat_last: false,
            open_error: None,
        }
    }

    /// Serve the same frame forever
    pub fn repeating(frame: VideoFrame) -> Self {
        Self {
            repeat_last: true,
            ..Self::new(vec![frame])
        }
    }

    /// Source whose `open` fails
    pub fn failing(reason: &str) -> Self {
        Self {
            open_error: Some(reason.to_string()),
            ..Self::new(Vec::new())
        }
    }
}

impl FrameSource for ScriptedFrameSource {
    fn open(&mut self, config: &CameraConfig) -> Result<(), CameraError> {
        if let Some(reason) = &self.open_error {
            return Err(CameraError::Open(reason.clone()));
        }
        config.validate()?;
        debug!(
            "Scripted camera opened at {}x{}@{}",
            config.width, config.height, config.fps
        );
        Ok(())
    }

    fn latest_frame(&mut self) -> Option<VideoFrame> {
        if let Some(frame) = self.frames.pop_front() {
            self.last = Some(frame.clone());
            return Some(frame);
        }
        if self.repeat_last {
            return self.last.clone();
        }
        debug!("Scripted frame source exhausted");
        None
    }
}

/// Motion sensor replaying scripted polls, then a fallback sample
pub struct ScriptedMotionSensor {
    script: VecDeque<Result<MotionSample, SensorError>>,
    fallback: MotionSample,
    begin_error: Option<String>,
}

impl ScriptedMotionSensor {
    pub fn new(script: Vec<Result<MotionSample, SensorError>>) -> Self {
        Self {
            script: script.into(),
            fallback: MotionSample::resting(),
            begin_error: None,
        }
    }

    /// Sensor that always reports `sample`
    pub fn steady(sample: MotionSample) -> Self {
        Self {
            fallback: sample,
            ..Self::new(Vec::new())
        }
    }

    /// Sensor whose `begin` fails
    pub fn failing(reason: &str) -> Self {
        Self {
            begin_error: Some(reason.to_string()),
            ..Self::new(Vec::new())
        }
    }
}

impl MotionSensor for ScriptedMotionSensor {
    fn begin(&mut self, config: &MotionConfig) -> Result<(), SensorError> {
        if let Some(reason) = &self.begin_error {
            return Err(SensorError::Open(reason.clone()));
        }
        config.validate()?;
        debug!(
            "Scripted motion sensor running (accel {} Hz, quaternion {} Hz)",
            config.accel_rate_hz,
            config.quaternion_rate_hz()
        );
        Ok(())
    }

    fn poll(&mut self) -> Result<MotionSample, SensorError> {
        self.script
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Rangefinder replaying scripted samples, then a fallback distance
pub struct ScriptedRangefinder {
    script: VecDeque<Result<Option<f32>, RangeError>>,
    fallback: Option<f32>,
    open_error: Option<String>,
}

impl ScriptedRangefinder {
    pub fn new(script: Vec<Result<Option<f32>, RangeError>>) -> Self {
        Self {
            script: script.into(),
            fallback: None,
            open_error: None,
        }
    }

    /// Rangefinder that always reports `distance_cm`
    pub fn constant(distance_cm: f32) -> Self {
        Self {
            fallback: Some(distance_cm),
            ..Self::new(Vec::new())
        }
    }

    /// Rangefinder whose `open` fails
    pub fn failing(reason: &str) -> Self {
        Self {
            open_error: Some(reason.to_string()),
            ..Self::new(Vec::new())
        }
    }
}

impl Rangefinder for ScriptedRangefinder {
    fn open(&mut self) -> Result<(), RangeError> {
        match &self.open_error {
            Some(reason) => Err(RangeError::Open(reason.clone())),
            None => Ok(()),
        }
    }

    fn sample_distance(&mut self) -> Result<Option<f32>, RangeError> {
        self.script.pop_front().unwrap_or(Ok(self.fallback))
    }
}

/// Clock pinned to one hour of the day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl WallClock for FixedClock {
    fn local_hour(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_source_ends() {
        let mut source = ScriptedFrameSource::new(vec![VideoFrame::filled(2, 2, [0, 0, 0])]);
        assert!(source.open(&CameraConfig::default()).is_ok());
        assert!(source.latest_frame().is_some());
        assert!(source.latest_frame().is_none());
    }

    #[test]
    fn test_repeating_source() {
        let mut source = ScriptedFrameSource::repeating(VideoFrame::filled(2, 2, [9, 9, 9]));
        for _ in 0..3 {
            assert_eq!(source.latest_frame().unwrap().data[0], 9);
        }
    }

    #[test]
    fn test_scripted_motion_falls_back() {
        let mut sensor = ScriptedMotionSensor::new(vec![Err(SensorError::Fault("bus".into()))]);
        assert!(sensor.poll().is_err());
        assert_eq!(sensor.poll().unwrap(), MotionSample::resting());
    }

    #[test]
    fn test_failing_open() {
        assert!(ScriptedRangefinder::failing("no bus").open().is_err());
        assert!(ScriptedMotionSensor::failing("no hub").begin(&MotionConfig::default()).is_err());
        assert!(ScriptedFrameSource::failing("no camera").open(&CameraConfig::default()).is_err());
    }

    #[test]
    fn test_unsupported_modes_rejected() {
        let still = CameraConfig {
            fps: 0,
            ..CameraConfig::default()
        };
        assert!(ScriptedFrameSource::repeating(checkerboard(4, 4, 1)).open(&still).is_err());

        let no_gyro = MotionConfig {
            gyro_rate_hz: 0,
            ..MotionConfig::default()
        };
        assert!(ScriptedMotionSensor::steady(MotionSample::resting()).begin(&no_gyro).is_err());
    }
}
