//! End-to-end runs of the guide against scripted devices

use alerting::{Channel, RecordingAudioSink, Sample, MAX_VOLUME};
use fusion::{Collaborators, ExitReason, FusionConfig, FusionError, Guide, GuideConfig};
use proximity::ScriptedDetector;
use sensor_adapter::sim::{checkerboard, FixedClock, ScriptedFrameSource, ScriptedMotionSensor, ScriptedRangefinder};
use sensor_adapter::{CameraConfig, CameraError, FrameSource, MotionSample, RangeError, SensorError, VideoFrame};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn test_config() -> GuideConfig {
    let mut config = GuideConfig::default();
    config.fusion = FusionConfig {
        tick_interval_ms: 1,
        ..FusionConfig::without_waits()
    };
    config.pacing.idle_interval_ms = 1;
    config
}

fn collaborators(
    camera: ScriptedFrameSource,
    rangefinder: ScriptedRangefinder,
    motion: ScriptedMotionSensor,
    sink: Arc<RecordingAudioSink>,
) -> Collaborators {
    Collaborators {
        camera: Box::new(camera),
        rangefinder: Box::new(rangefinder),
        motion: Box::new(motion),
        audio: sink,
        clock: Box::new(FixedClock(14)),
        detector: ScriptedDetector::factory(Vec::new(), false),
    }
}

fn street() -> ScriptedFrameSource {
    ScriptedFrameSource::repeating(checkerboard(320, 240, 8))
}

const STARTUP: [Sample; 3] = [Sample::StartupSequence, Sample::StartupWarning, Sample::StartSignal];

#[test]
fn test_init_failure_reports_every_device() {
    let sink = Arc::new(RecordingAudioSink::new());
    let guide = Guide::new(test_config());
    let result = guide.run(collaborators(
        ScriptedFrameSource::failing("no /dev/video0"),
        ScriptedRangefinder::failing("i2c bus 1"),
        ScriptedMotionSensor::steady(MotionSample::resting()),
        sink.clone(),
    ));

    match result {
        Err(FusionError::Init(failures)) => assert_eq!(failures.len(), 2),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(guide.flags().should_stop());
    assert_eq!(sink.played(), vec![(Sample::StartupSequence, Channel::Warning)]);
}

#[test]
fn test_two_tilt_ups_shut_down() {
    let sink = Arc::new(RecordingAudioSink::new());
    let tilt_up = MotionSample::with_orientation(0.0, 0.0, 0.0);
    let motion = ScriptedMotionSensor::new(vec![
        Ok(MotionSample::resting()),
        Ok(tilt_up.clone()),
        Ok(MotionSample::resting()),
        Ok(tilt_up),
    ]);

    let reason = Guide::new(test_config())
        .run(collaborators(street(), ScriptedRangefinder::constant(500.0), motion, sink.clone()))
        .unwrap();

    assert_eq!(reason, ExitReason::UserShutdown);
    let mut expected = STARTUP.to_vec();
    expected.push(Sample::ShutdownConfirm);
    assert_eq!(sink.played_on(Channel::Warning), expected);
    assert_eq!(sink.played_on(Channel::Pacing), vec![Sample::Shutdown]);
    assert_eq!(sink.volume(Channel::Warning), MAX_VOLUME);
    assert_eq!(sink.volume(Channel::Pacing), MAX_VOLUME);
}

#[test]
fn test_motion_fault_plays_error_cue() {
    let sink = Arc::new(RecordingAudioSink::new());
    let motion = ScriptedMotionSensor::new(vec![
        Ok(MotionSample::resting()),
        Err(SensorError::Fault("event status error bit".into())),
    ]);

    let reason = Guide::new(test_config())
        .run(collaborators(street(), ScriptedRangefinder::constant(500.0), motion, sink.clone()))
        .unwrap();

    assert_eq!(reason, ExitReason::MotionSensorFailure);
    assert_eq!(sink.played_on(Channel::Warning).last(), Some(&Sample::ErrorMotionSensor));
    assert_eq!(sink.played_on(Channel::Pacing), vec![Sample::Shutdown]);
}

#[test]
fn test_end_of_stream_plays_camera_error() {
    let sink = Arc::new(RecordingAudioSink::new());
    let camera = ScriptedFrameSource::new(vec![checkerboard(320, 240, 8)]);

    let reason = Guide::new(test_config())
        .run(collaborators(
            camera,
            ScriptedRangefinder::constant(500.0),
            ScriptedMotionSensor::steady(MotionSample::resting()),
            sink.clone(),
        ))
        .unwrap();

    assert_eq!(reason, ExitReason::CameraFailure);
    assert_eq!(sink.played_on(Channel::Warning).last(), Some(&Sample::ErrorCamera));
}

#[test]
fn test_rangefinder_fault_plays_error_cue() {
    let sink = Arc::new(RecordingAudioSink::new());
    let rangefinder = ScriptedRangefinder::new(vec![Err(RangeError::Read("no ack".into()))]);

    let reason = Guide::new(test_config())
        .run(collaborators(
            street(),
            rangefinder,
            ScriptedMotionSensor::steady(MotionSample::resting()),
            sink.clone(),
        ))
        .unwrap();

    assert_eq!(reason, ExitReason::RangefinderFailure);
    assert_eq!(sink.played_on(Channel::Warning).last(), Some(&Sample::ErrorRangefinder));
    // The range loop hands its channel back for the farewell
    assert_eq!(sink.played_on(Channel::Pacing), vec![Sample::Shutdown]);
}

#[test]
fn test_external_stop_is_orderly() {
    let sink = Arc::new(RecordingAudioSink::new());
    let guide = Guide::new(test_config());
    let flags = guide.flags();

    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        flags.request_stop();
    });

    let reason = guide
        .run(collaborators(
            street(),
            ScriptedRangefinder::constant(500.0),
            ScriptedMotionSensor::steady(MotionSample::resting()),
            sink.clone(),
        ))
        .unwrap();
    stopper.join().unwrap();

    assert_eq!(reason, ExitReason::Interrupted);
    assert_eq!(sink.played_on(Channel::Warning), STARTUP.to_vec());
    assert_eq!(sink.played_on(Channel::Pacing), vec![Sample::Shutdown]);
}

/// Camera that reports when the acquisition thread lets go of it
struct TrackedCamera {
    inner: ScriptedFrameSource,
    released: Arc<AtomicBool>,
}

impl FrameSource for TrackedCamera {
    fn open(&mut self, config: &CameraConfig) -> Result<(), CameraError> {
        self.inner.open(config)
    }

    fn latest_frame(&mut self) -> Option<VideoFrame> {
        self.inner.latest_frame()
    }
}

impl Drop for TrackedCamera {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_range_start_failure_joins_acquisition() {
    let sink = Arc::new(RecordingAudioSink::new());
    let released = Arc::new(AtomicBool::new(false));
    let mut config = test_config();
    config.windows.distance_capacity = 0;

    let guide = Guide::new(config);
    let mut devices = collaborators(
        street(),
        ScriptedRangefinder::constant(500.0),
        ScriptedMotionSensor::steady(MotionSample::resting()),
        sink.clone(),
    );
    devices.camera = Box::new(TrackedCamera {
        inner: street(),
        released: released.clone(),
    });

    let result = guide.run(devices);

    assert!(matches!(result, Err(FusionError::Window(_))));
    assert!(guide.flags().should_stop());
    // The camera is dropped only once the acquisition thread has exited
    assert!(released.load(Ordering::SeqCst));
    assert_eq!(sink.played_on(Channel::Pacing), Vec::<Sample>::new());
}
