//! Per-tick fusion of motion, range and vision into warnings

use crate::{FusionError, GuideConfig};
use alerting::{AudioChannel, WarningKind, WarningQueue};
use behavior::{
    Advisory, BehaviorConfig, DaylightClassifier, Gesture, GestureRecognizer, LightClass,
    ShutdownPress, ShutdownTimer, SlopeDetector, WalkingDetector,
};
use proximity::{DetectorFactory, DetectorHandle, ProximityClassifier, ProximityContext};
use sensor_adapter::{BarometricReading, MotionSample, Orientation, Vector3, VideoFrame, WallClock};
use std::borrow::Cow;
use tracing::{debug, info, warn};

/// What the run loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The wearer confirmed shutdown
    Shutdown,
}

/// Last value seen for each motion output; polls that miss an output keep
/// the previous one.
#[derive(Debug, Clone, Default)]
struct LastReadings {
    orientation: Option<Orientation>,
    acceleration: Option<Vector3>,
    gyro: Option<Vector3>,
    barometer: Option<BarometricReading>,
}

impl LastReadings {
    fn update(&mut self, sample: &MotionSample, declination_deg: f32) {
        if let Some(q) = sample.quaternion {
            self.orientation = Some(Orientation::from_quaternion(q, declination_deg));
        }
        if let Some(a) = sample.acceleration {
            self.acceleration = Some(a);
        }
        if let Some(g) = sample.gyro {
            self.gyro = Some(g);
        }
        if let Some(b) = sample.barometer {
            self.barometer = Some(b);
        }
    }
}

/// Owns every state machine and the warning queue; driven once per tick by
/// the run loop.
pub struct FusionEngine {
    config: GuideConfig,
    clock: Box<dyn WallClock>,
    gestures: GestureRecognizer,
    shutdown: ShutdownTimer,
    walking: WalkingDetector,
    slope: SlopeDetector,
    daylight: DaylightClassifier,
    proximity: ProximityClassifier,
    detector: DetectorHandle,
    queue: WarningQueue,
    readings: LastReadings,
    standby: bool,
    sharpness: f64,
    ticks: u64,
}

impl FusionEngine {
    /// Create the engine and load the detector
    pub fn new(
        config: GuideConfig,
        clock: Box<dyn WallClock>,
        detector: DetectorFactory,
    ) -> Result<Self, FusionError> {
        let behavior: &BehaviorConfig = &config.behavior;
        let walking = WalkingDetector::new(config.windows.acceleration_capacity, behavior)?;
        let slope = SlopeDetector::new(config.windows.altitude_capacity, behavior)?;
        let mut detector = DetectorHandle::new(detector);
        detector.enable()?;

        Ok(Self {
            clock,
            gestures: GestureRecognizer::new(behavior),
            shutdown: ShutdownTimer::new(behavior.shutdown_window_ticks),
            walking,
            slope,
            daylight: DaylightClassifier::new(behavior),
            proximity: ProximityClassifier::new(config.proximity.clone()),
            detector,
            queue: WarningQueue::new(config.queue.clone()),
            readings: LastReadings::default(),
            standby: false,
            sharpness: 0.0,
            ticks: 0,
            config,
        })
    }

    /// Run one fusion tick.
    ///
    /// `frame` is `None` until the first frame has been captured. Warnings
    /// are played on `channel`.
    pub fn tick(
        &mut self,
        sample: &MotionSample,
        frame: Option<&VideoFrame>,
        mean_distance_cm: i32,
        channel: &AudioChannel,
    ) -> Result<TickOutcome, FusionError> {
        if frame.map_or(false, VideoFrame::is_empty) {
            return Err(FusionError::Camera(sensor_adapter::CameraError::EmptyFrame));
        }
        self.ticks += 1;
        self.readings.update(sample, self.config.motion.declination_deg);

        let quit = self.handle_gesture();
        self.shutdown.tick();

        if let Some(accel) = self.readings.acceleration {
            self.walking.update(accel.z);
        }

        if !self.standby {
            if let Some(barometer) = self.readings.barometer {
                if let Some(kind) = self.slope.update(barometer.altitude) {
                    self.queue.push(kind);
                }
            }
            if let Some(frame) = frame {
                let frame = self.crop_for_turn(frame);
                self.observe_light(&frame)?;
                self.sharpness = frame.sharpness()?;
                self.detect(&frame, mean_distance_cm);
            }
        }

        if quit {
            info!("Shutdown confirmed after {} ticks", self.ticks);
            return Ok(TickOutcome::Shutdown);
        }

        self.queue.tick(channel);
        Ok(TickOutcome::Continue)
    }

    /// Returns true when shutdown was confirmed
    fn handle_gesture(&mut self) -> bool {
        let Some(orientation) = self.readings.orientation else {
            return false;
        };
        let Some(gesture) = self.gestures.evaluate(orientation, self.standby) else {
            return false;
        };

        match gesture {
            Gesture::TiltRight => self.announce_advisory(),
            Gesture::TiltLeft => self.toggle_standby(),
            Gesture::TiltDown => {
                self.queue.push(WarningKind::Falling);
            }
            Gesture::TiltUp => match self.shutdown.press() {
                ShutdownPress::Armed => {
                    self.queue.push(WarningKind::ShutdownConfirm);
                }
                ShutdownPress::Confirmed => return true,
            },
        }
        false
    }

    fn announce_advisory(&mut self) {
        let Some(barometer) = self.readings.barometer else {
            warn!("No barometer reading yet; skipping advisory");
            return;
        };
        let advisory = Advisory::new(
            self.clock.local_hour(),
            barometer.temperature,
            barometer.pressure,
            self.config.behavior.rain_pressure_hpa,
        );
        for kind in advisory.kinds() {
            self.queue.push(kind);
        }
    }

    fn toggle_standby(&mut self) {
        if self.standby {
            info!("Leaving standby");
            self.standby = false;
            if self.daylight.confirmed() == LightClass::Day {
                self.enable_detector();
            }
            self.queue.push(WarningKind::StandbyOff);
        } else {
            info!("Entering standby");
            self.standby = true;
            self.detector.disable();
            self.queue.push(WarningKind::StandbyOn);
        }
    }

    fn enable_detector(&mut self) {
        if let Err(e) = self.detector.enable() {
            warn!("Object detector unavailable: {}", e);
        }
    }

    fn crop_for_turn<'a>(&self, frame: &'a VideoFrame) -> Cow<'a, VideoFrame> {
        let yaw_rate = self.readings.gyro.map_or(0.0, |g| g.y);
        match frame.crop_for_turn(yaw_rate, self.config.fusion.turn_rate_threshold) {
            Some(cropped) => {
                debug!("Turning at {:.1} deg/s; cropped frame to {}px", yaw_rate, cropped.width);
                Cow::Owned(cropped)
            }
            None => Cow::Borrowed(frame),
        }
    }

    fn observe_light(&mut self, frame: &VideoFrame) -> Result<(), FusionError> {
        let score = frame.luminance_score()?;
        match self.daylight.observe(score) {
            Some(LightClass::Day) => {
                self.enable_detector();
                self.queue.push(WarningKind::ToDay);
            }
            Some(LightClass::Night) => {
                self.detector.disable();
                self.queue.push(WarningKind::ToNight);
            }
            None => {}
        }
        Ok(())
    }

    fn detect(&mut self, frame: &VideoFrame, mean_distance_cm: i32) {
        if self.sharpness <= self.config.fusion.sharpness_threshold {
            return;
        }
        let detections = match self.detector.detect(frame) {
            Some(Ok(detections)) => detections,
            Some(Err(e)) => {
                warn!("Detection failed: {}", e);
                return;
            }
            None => return,
        };

        let context = ProximityContext {
            mean_distance_cm,
            moving: self.walking.is_moving(),
        };
        for kind in self.proximity.classify(&detections, frame.width, frame.height, context) {
            self.queue.push(kind);
        }
    }

    /// Drop the detector and clear every buffer
    pub fn release(&mut self) {
        self.detector.disable();
        self.queue.clear();
        self.walking.clear();
        self.slope.clear();
        debug!("Fusion engine released after {} ticks", self.ticks);
    }

    pub fn in_standby(&self) -> bool {
        self.standby
    }

    pub fn is_moving(&self) -> bool {
        self.walking.is_moving()
    }

    pub fn detector_enabled(&self) -> bool {
        self.detector.is_enabled()
    }

    pub fn light(&self) -> LightClass {
        self.daylight.confirmed()
    }

    /// Laplacian variance of the last frame examined
    pub fn sharpness(&self) -> f64 {
        self.sharpness
    }

    pub fn shutdown_pending(&self) -> bool {
        self.shutdown.is_active()
    }

    pub fn queue(&self) -> &WarningQueue {
        &self.queue
    }
}
