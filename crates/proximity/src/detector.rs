//! Object detector capability and its enable/disable slot

use crate::{Detection, DetectorError};
use sensor_adapter::VideoFrame;
use tracing::{debug, info};

/// Object detector over a single frame
pub trait Detector: Send {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<Detection>, DetectorError>;
}

/// Builds a fresh detector each time detection is enabled
pub type DetectorFactory = Box<dyn FnMut() -> Result<Box<dyn Detector>, DetectorError> + Send>;

/// Detector state: present and running, or released
pub enum DetectorSlot {
    Enabled(Box<dyn Detector>),
    Disabled,
}

/// Owns the detector lifecycle.
///
/// Disabling drops the detector (freeing its model); enabling builds a new
/// one through the factory.
pub struct DetectorHandle {
    factory: DetectorFactory,
    slot: DetectorSlot,
}

impl DetectorHandle {
    /// Create a handle with the detector released
    pub fn new(factory: DetectorFactory) -> Self {
        Self {
            factory,
            slot: DetectorSlot::Disabled,
        }
    }

    pub fn enable(&mut self) -> Result<(), DetectorError> {
        if self.is_enabled() {
            return Ok(());
        }
        let detector = (self.factory)()?;
        info!("Object detector loaded");
        self.slot = DetectorSlot::Enabled(detector);
        Ok(())
    }

    pub fn disable(&mut self) {
        if let DetectorSlot::Enabled(_) = std::mem::replace(&mut self.slot, DetectorSlot::Disabled) {
            info!("Object detector released");
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.slot, DetectorSlot::Enabled(_))
    }

    /// Run detection, or `None` while disabled
    pub fn detect(&mut self, frame: &VideoFrame) -> Option<Result<Vec<Detection>, DetectorError>> {
        match &mut self.slot {
            DetectorSlot::Enabled(detector) => {
                let result = detector.detect(frame);
                if let Ok(detections) = &result {
                    debug!("Detector returned {} detections", detections.len());
                }
                Some(result)
            }
            DetectorSlot::Disabled => None,
        }
    }
}

/// Detector replaying a fixed list of passes, then returning nothing
pub struct ScriptedDetector {
    passes: std::collections::VecDeque<Vec<Detection>>,
    repeat_last: bool,
}

impl ScriptedDetector {
    pub fn new(passes: Vec<Vec<Detection>>) -> Self {
        Self {
            passes: passes.into(),
            repeat_last: false,
        }
    }

    /// Factory yielding clones of the same script on every enable
    pub fn factory(passes: Vec<Vec<Detection>>, repeat_last: bool) -> DetectorFactory {
        Box::new(move || {
            let detector = ScriptedDetector {
                passes: passes.clone().into(),
                repeat_last,
            };
            Ok(Box::new(detector) as Box<dyn Detector>)
        })
    }
}

impl Detector for ScriptedDetector {
    fn detect(&mut self, _frame: &VideoFrame) -> Result<Vec<Detection>, DetectorError> {
        if self.repeat_last && self.passes.len() == 1 {
            return Ok(self.passes.front().cloned().unwrap_or_default());
        }
        Ok(self.passes.pop_front().unwrap_or_default())
    }
}
