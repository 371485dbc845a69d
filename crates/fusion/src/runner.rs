//! Startup, fusion loop and orderly shutdown

use crate::{FusionEngine, FusionError, GuideConfig, TickOutcome};
use alerting::{AudioChannel, AudioSink, Channel, Sample, MAX_VOLUME};
use proximity::DetectorFactory;
use sampling::{frame_cell, AcquisitionLoop, DistanceCell, FrameSnapshot, LoopHandle, RangeLoop, RunFlags};
use sensor_adapter::{FrameSource, MotionSensor, Rangefinder, WallClock};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Devices and services the guide runs against
pub struct Collaborators {
    pub camera: Box<dyn FrameSource>,
    pub rangefinder: Box<dyn Rangefinder>,
    pub motion: Box<dyn MotionSensor>,
    pub audio: Arc<dyn AudioSink>,
    pub clock: Box<dyn WallClock>,
    pub detector: DetectorFactory,
}

/// Why the fusion loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Confirmed by the wearer with two tilt-ups
    UserShutdown,
    /// Stop flag raised from outside (signal handler)
    Interrupted,
    CameraFailure,
    MotionSensorFailure,
    RangefinderFailure,
}

/// Top-level guide process
pub struct Guide {
    config: GuideConfig,
    flags: Arc<RunFlags>,
}

impl Guide {
    pub fn new(config: GuideConfig) -> Self {
        Self {
            config,
            flags: RunFlags::new(),
        }
    }

    /// Shared flags; raising stop ends the run in an orderly way
    pub fn flags(&self) -> Arc<RunFlags> {
        self.flags.clone()
    }

    /// Run until shutdown or a fatal device error.
    ///
    /// Initialization failures are returned as errors without starting any
    /// loop; runtime device failures play their error cue and end the run.
    pub fn run(&self, collaborators: Collaborators) -> Result<ExitReason, FusionError> {
        let Collaborators {
            mut camera,
            mut rangefinder,
            mut motion,
            audio,
            clock,
            detector,
        } = collaborators;
        let fusion = &self.config.fusion;

        let warning = AudioChannel::claim(audio.clone(), Channel::Warning);
        let pacing = AudioChannel::claim(audio.clone(), Channel::Pacing);
        warning.set_volume(MAX_VOLUME);
        pacing.set_volume(MAX_VOLUME);

        warning.play(Sample::StartupSequence);
        wait_ms(fusion.startup_sequence_ms);

        let mut failures = Vec::new();
        if let Err(e) = rangefinder.open() {
            error!("Failed initializing rangefinder: {}", e);
            failures.push(e.to_string());
        }
        if let Err(e) = motion.begin(&self.config.motion) {
            error!("Failed initializing motion sensor: {}", e);
            failures.push(e.to_string());
        }
        if let Err(e) = camera.open(&self.config.camera) {
            error!("Failed to open video source: {}", e);
            failures.push(e.to_string());
        }
        if !failures.is_empty() {
            self.flags.request_stop();
            return Err(FusionError::Init(failures));
        }

        let mut engine = FusionEngine::new(self.config.clone(), clock, detector).map_err(|e| {
            error!("Failed loading object detector: {}", e);
            self.flags.request_stop();
            e
        })?;

        let (publisher, frames) = frame_cell();
        let idle = Duration::from_millis(self.config.pacing.idle_interval_ms);
        let frame_interval = Duration::from_millis(1000 / u64::from(self.config.camera.fps.max(1)));
        let acquisition = AcquisitionLoop::new(camera, publisher, self.flags.clone(), frame_interval, idle)
            .spawn()
            .map_err(|e| {
                error!("Failed starting video loop: {}", e);
                self.flags.request_stop();
                e
            })?;

        warning.play(Sample::StartupWarning);
        wait_ms(fusion.startup_warning_ms);
        warning.play(Sample::StartSignal);

        let distance = Arc::new(DistanceCell::new());
        let range = RangeLoop::new(
            rangefinder,
            pacing,
            distance.clone(),
            self.flags.clone(),
            self.config.windows.distance_capacity,
            &self.config.pacing,
        )
        .map_err(FusionError::from)
        .and_then(|range| range.spawn().map_err(FusionError::from));
        let range = match range {
            Ok(range) => range,
            Err(e) => {
                error!("Failed starting distance loop: {}", e);
                self.stop_acquisition(acquisition);
                return Err(e);
            }
        };

        info!("Guide running");
        let reason = loop {
            if self.flags.should_stop() {
                info!("Stop requested");
                break ExitReason::Interrupted;
            }
            if self.flags.range_faulted() {
                error!("Rangefinder fault; aborting");
                warning.play(Sample::ErrorRangefinder);
                wait_ms(fusion.range_error_ms);
                break ExitReason::RangefinderFailure;
            }

            let frame = match frames.latest() {
                FrameSnapshot::Frame(frame) if !frame.is_empty() => Some(frame),
                FrameSnapshot::Pending => None,
                FrameSnapshot::Frame(_) | FrameSnapshot::Ended => {
                    error!("Failed to get frame image from video source; aborting");
                    warning.play(Sample::ErrorCamera);
                    wait_ms(fusion.camera_error_ms);
                    break ExitReason::CameraFailure;
                }
            };

            let sample = match motion.poll() {
                Ok(sample) => sample,
                Err(e) => {
                    error!("{}; aborting", e);
                    warning.play(Sample::ErrorMotionSensor);
                    wait_ms(fusion.motion_error_ms);
                    break ExitReason::MotionSensorFailure;
                }
            };

            match engine.tick(&sample, frame.as_deref(), distance.get(), &warning) {
                Ok(TickOutcome::Continue) => {}
                Ok(TickOutcome::Shutdown) => break ExitReason::UserShutdown,
                Err(e) => {
                    error!("{}; aborting", e);
                    warning.play(Sample::ErrorCamera);
                    wait_ms(fusion.camera_error_ms);
                    break ExitReason::CameraFailure;
                }
            }
            self.flags.set_standby(engine.in_standby());

            std::thread::sleep(fusion.tick_interval());
        };

        self.flags.request_stop();
        match range.join() {
            Ok(pacing) => pacing.play(Sample::Shutdown),
            Err(e) => {
                warn!("{}; playing farewell on the warning channel", e);
                warning.play(Sample::Shutdown);
            }
        }
        wait_ms(fusion.farewell_ms);

        self.stop_acquisition(acquisition);
        engine.release();
        info!("Guide stopped: {:?}", reason);
        Ok(reason)
    }

    fn stop_acquisition(&self, acquisition: LoopHandle<()>) {
        self.flags.request_stop();
        if let Err(e) = acquisition.join() {
            warn!("{}", e);
        }
    }
}

fn wait_ms(ms: u64) {
    if ms > 0 {
        std::thread::sleep(Duration::from_millis(ms));
    }
}
