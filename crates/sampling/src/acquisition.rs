//! Frame acquisition loop

use crate::{FramePublisher, LoopHandle, RunFlags, SamplingError};
use sensor_adapter::FrameSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pulls frames from the camera and publishes the newest one
pub struct AcquisitionLoop {
    source: Box<dyn FrameSource>,
    publisher: FramePublisher,
    flags: Arc<RunFlags>,
    interval: Duration,
    idle: Duration,
}

impl AcquisitionLoop {
    pub fn new(
        source: Box<dyn FrameSource>,
        publisher: FramePublisher,
        flags: Arc<RunFlags>,
        interval: Duration,
        idle: Duration,
    ) -> Self {
        Self {
            source,
            publisher,
            flags,
            interval,
            idle,
        }
    }

    pub fn spawn(self) -> Result<LoopHandle<()>, SamplingError> {
        LoopHandle::spawn("acquisition", move || self.run())
    }

    /// Run until stopped or the stream ends
    pub fn run(mut self) {
        info!("Starting video loop");
        let mut frames: u64 = 0;

        while !self.flags.should_stop() {
            if self.flags.in_standby() {
                std::thread::sleep(self.idle);
                continue;
            }

            match self.source.latest_frame() {
                Some(frame) => {
                    frames += 1;
                    self.publisher.publish(frame);
                }
                None => {
                    warn!("Video stream ended after {} frames", frames);
                    self.publisher.end();
                    return;
                }
            }
            std::thread::sleep(self.interval);
        }

        debug!("Published {} frames", frames);
        info!("Received stop command; stopping video loop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frame_cell, FrameSnapshot};
    use sensor_adapter::sim::ScriptedFrameSource;
    use sensor_adapter::VideoFrame;

    #[test]
    fn test_end_of_stream_publishes_ended() {
        let (publisher, reader) = frame_cell();
        let flags = RunFlags::new();
        let source = ScriptedFrameSource::new(vec![
            VideoFrame::filled(2, 2, [1, 1, 1]),
            VideoFrame::filled(2, 2, [2, 2, 2]),
        ]);

        AcquisitionLoop::new(Box::new(source), publisher, flags, Duration::ZERO, Duration::ZERO).run();
        assert!(matches!(reader.latest(), FrameSnapshot::Ended));
    }

    #[test]
    fn test_stop_flag_ends_loop() {
        let (publisher, reader) = frame_cell();
        let flags = RunFlags::new();
        let source = ScriptedFrameSource::repeating(VideoFrame::filled(2, 2, [5, 5, 5]));

        let handle = AcquisitionLoop::new(
            Box::new(source),
            publisher,
            flags.clone(),
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .spawn()
        .unwrap();

        std::thread::sleep(Duration::from_millis(20));
        flags.request_stop();
        handle.join().unwrap();
        assert!(matches!(reader.latest(), FrameSnapshot::Frame(_)));
    }
}
