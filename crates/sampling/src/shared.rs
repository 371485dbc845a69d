//! Single-writer snapshot cells shared between the loops

use sensor_adapter::VideoFrame;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Rangefinder sentinel meaning "nothing in range" (cm)
pub const CLEAR_DISTANCE_CM: i32 = 1000;

/// Latest frame as seen by the fusion loop
#[derive(Debug, Clone, Default)]
pub enum FrameSnapshot {
    /// Nothing captured yet
    #[default]
    Pending,
    Frame(Arc<VideoFrame>),
    /// The source ran dry
    Ended,
}

/// Write side of the frame cell, owned by the acquisition loop
pub struct FramePublisher {
    tx: watch::Sender<FrameSnapshot>,
}

impl FramePublisher {
    pub fn publish(&self, frame: VideoFrame) {
        self.tx.send_replace(FrameSnapshot::Frame(Arc::new(frame)));
    }

    pub fn end(&self) {
        self.tx.send_replace(FrameSnapshot::Ended);
    }
}

/// Read side of the frame cell
#[derive(Clone)]
pub struct FrameReader {
    rx: watch::Receiver<FrameSnapshot>,
}

impl FrameReader {
    /// Newest snapshot; never blocks the publisher
    pub fn latest(&self) -> FrameSnapshot {
        self.rx.borrow().clone()
    }
}

pub fn frame_cell() -> (FramePublisher, FrameReader) {
    let (tx, rx) = watch::channel(FrameSnapshot::Pending);
    (FramePublisher { tx }, FrameReader { rx })
}

/// Rolling mean rangefinder distance (cm)
#[derive(Debug)]
pub struct DistanceCell(AtomicI32);

impl DistanceCell {
    pub fn new() -> Self {
        Self(AtomicI32::new(CLEAR_DISTANCE_CM))
    }

    pub fn publish(&self, mean_cm: i32) {
        self.0.store(mean_cm, Ordering::Release);
    }

    pub fn get(&self) -> i32 {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for DistanceCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags polled by every loop
#[derive(Debug, Default)]
pub struct RunFlags {
    stop: AtomicBool,
    standby: AtomicBool,
    range_fault: AtomicBool,
}

impl RunFlags {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn set_standby(&self, standby: bool) {
        self.standby.store(standby, Ordering::SeqCst);
    }

    pub fn in_standby(&self) -> bool {
        self.standby.load(Ordering::SeqCst)
    }

    pub fn raise_range_fault(&self) {
        self.range_fault.store(true, Ordering::SeqCst);
    }

    pub fn range_faulted(&self) -> bool {
        self.range_fault.load(Ordering::SeqCst)
    }
}
