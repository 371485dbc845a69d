//! Detector output: object classes and bounding boxes

use serde::{Deserialize, Serialize};

/// Classes emitted by the object detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectClass {
    Background,
    Person,
    Bicycle,
    Car,
    Motorcycle,
    Bus,
    Bench,
    Chair,
    Bin,
    RedLight,
    GreenLight,
}

impl ObjectClass {
    /// Map a detector class id; unknown ids yield `None`
    pub fn from_id(id: u32) -> Option<Self> {
        let class = match id {
            0 => ObjectClass::Background,
            1 => ObjectClass::Person,
            2 => ObjectClass::Bicycle,
            3 => ObjectClass::Car,
            4 => ObjectClass::Motorcycle,
            5 => ObjectClass::Bus,
            6 => ObjectClass::Bench,
            7 => ObjectClass::Chair,
            8 => ObjectClass::Bin,
            9 => ObjectClass::RedLight,
            10 => ObjectClass::GreenLight,
            _ => return None,
        };
        Some(class)
    }
}

/// One detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detector class id
    pub class_id: u32,

    /// Detection confidence (0-1)
    pub confidence: f32,

    /// Normalized bounding box [x1, y1, x2, y2]
    pub bbox: [f32; 4],
}

impl Detection {
    pub fn new(class: ObjectClass, confidence: f32, bbox: [f32; 4]) -> Self {
        Self {
            class_id: class as u32,
            confidence,
            bbox,
        }
    }

    pub fn class(&self) -> Option<ObjectClass> {
        ObjectClass::from_id(self.class_id)
    }

    /// Bounding box in whole pixels (truncated)
    pub fn pixel_box(&self, width: u32, height: u32) -> [i32; 4] {
        let [x1, y1, x2, y2] = self.bbox;
        [
            (x1 * width as f32) as i32,
            (y1 * height as f32) as i32,
            (x2 * width as f32) as i32,
            (y2 * height as f32) as i32,
        ]
    }

    /// Corner-to-corner pixel diagonal, truncated
    pub fn apparent_size(&self, width: u32, height: u32) -> u32 {
        let [x1, y1, x2, y2] = self.pixel_box(width, height);
        let dx = (x2 - x1) as f64;
        let dy = (y2 - y1) as f64;
        (dx * dx + dy * dy).sqrt() as u32
    }

    /// Horizontal box centre in pixels
    pub fn center_x(&self, width: u32, height: u32) -> i32 {
        let [x1, _, x2, _] = self.pixel_box(width, height);
        (x1 + x2) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_ids() {
        assert_eq!(ObjectClass::from_id(0), Some(ObjectClass::Background));
        assert_eq!(ObjectClass::from_id(9), Some(ObjectClass::RedLight));
        assert_eq!(ObjectClass::from_id(11), None);
        assert_eq!(Detection::new(ObjectClass::Bus, 0.9, [0.0; 4]).class_id, 5);
    }

    #[test]
    fn test_apparent_size() {
        let det = Detection::new(ObjectClass::Person, 0.9, [0.375, 0.25, 0.625, 0.75]);
        assert_eq!(det.pixel_box(1024, 1024), [384, 256, 640, 768]);
        // sqrt(256^2 + 512^2) = 572.4
        assert_eq!(det.apparent_size(1024, 1024), 572);
        assert_eq!(det.center_x(1024, 1024), 512);
    }

    #[test]
    fn test_size_uses_truncated_pixels() {
        // 0.1 * 15 = 1.5 -> 1, 0.9 * 15 = 13.5 -> 13
        let det = Detection::new(ObjectClass::Bin, 0.9, [0.1, 0.0, 0.9, 0.0]);
        assert_eq!(det.apparent_size(15, 10), 12);
    }
}
