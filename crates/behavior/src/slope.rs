//! Terrain grade detection from barometric altitude

use crate::BehaviorConfig;
use alerting::WarningKind;
use rolling_window::{RollingWindow, WindowError};
use tracing::debug;

/// Compares the mean of recent altitudes against a lagged copy of the
/// same window and alerts once per transition onto a grade.
pub struct SlopeDetector {
    recent: RollingWindow<f32>,
    lagged: RollingWindow<f32>,
    threshold: f64,
    on_slope: bool,
    slope: f64,
}

impl SlopeDetector {
    pub fn new(capacity: usize, config: &BehaviorConfig) -> Result<Self, WindowError> {
        Ok(Self {
            recent: RollingWindow::new(capacity)?,
            lagged: RollingWindow::new(capacity)?,
            threshold: config.slope_threshold as f64,
            on_slope: false,
            slope: 0.0,
        })
    }

    /// Add an altitude sample (m); returns a grade alert on entry
    pub fn update(&mut self, altitude: f32) -> Option<WarningKind> {
        self.recent.push(altitude);
        if let Some(oldest) = self.recent.oldest() {
            self.lagged.push(oldest);
        }

        let (Ok(recent), Ok(lagged)) = (self.recent.mean(), self.lagged.mean()) else {
            return None;
        };
        self.slope = (recent - lagged) / self.recent.len() as f64;

        let grade = if self.slope > self.threshold {
            Some(WarningKind::Uphill)
        } else if self.slope < -self.threshold {
            Some(WarningKind::Downhill)
        } else {
            None
        };

        match grade {
            Some(kind) if !self.on_slope => {
                debug!("Entered grade {:?} (slope {:.4})", kind, self.slope);
                self.on_slope = true;
                Some(kind)
            }
            Some(_) => None,
            None => {
                self.on_slope = false;
                None
            }
        }
    }

    /// Most recent slope estimate
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn on_slope(&self) -> bool {
        self.on_slope
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.lagged.clear();
        self.on_slope = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SlopeDetector {
        SlopeDetector::new(15, &BehaviorConfig::default()).unwrap()
    }

    fn feed(detector: &mut SlopeDetector, altitudes: impl IntoIterator<Item = f32>) -> Vec<WarningKind> {
        altitudes
            .into_iter()
            .filter_map(|a| detector.update(a))
            .collect()
    }

    #[test]
    fn test_flat_ground_is_silent() {
        let mut slope = detector();
        assert!(feed(&mut slope, std::iter::repeat(120.0).take(50)).is_empty());
        assert!(!slope.on_slope());
    }

    #[test]
    fn test_one_alert_per_grade() {
        let mut slope = detector();
        feed(&mut slope, std::iter::repeat(0.0).take(15));

        let climb = feed(&mut slope, (1..=30).map(|k| k as f32 * 0.5));
        assert_eq!(climb, vec![WarningKind::Uphill]);

        let plateau = feed(&mut slope, std::iter::repeat(15.0).take(40));
        assert!(plateau.is_empty());
        assert!(!slope.on_slope());

        let descent = feed(&mut slope, (1..=30).map(|k| 15.0 - k as f32 * 0.5));
        assert_eq!(descent, vec![WarningKind::Downhill]);
    }

    #[test]
    fn test_sensor_noise_below_threshold() {
        let mut slope = detector();
        let noise = (0..60).map(|k| 50.0 + if k % 2 == 0 { 0.05 } else { -0.05 });
        assert!(feed(&mut slope, noise).is_empty());
    }
}
