//! Video frame types and image measures

use crate::CameraError;
use image::{imageops, GrayImage, ImageBuffer, Rgb};
use imageproc::filter::laplacian_filter;

/// Downsampled grid used for the luminance score
pub const LUMINANCE_GRID: (u32, u32) = (64, 35);
/// Rows from the top of the grid averaged into the luminance score
pub const LUMINANCE_ROWS: u32 = 16;

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (nanoseconds)
    pub timestamp_ns: u64,
    /// Frame sequence number
    pub sequence: u32,
}

impl VideoFrame {
    /// Create a new video frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ns: u64, sequence: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp_ns,
            sequence,
        }
    }

    /// Frame of a single color
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Self::new(data, width, height, 0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        let px = self.data.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Convert to grayscale; a trailing partial pixel is ignored
    pub fn to_grayscale(&self) -> Vec<u8> {
        let mut gray = Vec::with_capacity((self.width * self.height) as usize);
        for pixel in self.data.chunks_exact(3) {
            // Luminance formula: 0.299*R + 0.587*G + 0.114*B
            let y = (pixel[0] as f32 * 0.299
                   + pixel[1] as f32 * 0.587
                   + pixel[2] as f32 * 0.114) as u8;
            gray.push(y);
        }
        gray
    }

    /// Crop a region of the frame
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Option<VideoFrame> {
        if w == 0 || h == 0 || x + w > self.width || y + h > self.height {
            return None;
        }

        let mut cropped = Vec::with_capacity((w * h * 3) as usize);
        for row in y..(y + h) {
            let start = ((row * self.width + x) * 3) as usize;
            let end = start + (w * 3) as usize;
            cropped.extend_from_slice(self.data.get(start..end)?);
        }

        Some(VideoFrame {
            data: cropped,
            width: w,
            height: h,
            timestamp_ns: self.timestamp_ns,
            sequence: self.sequence,
        })
    }

    /// Drop the side of the frame swept out of the forward cone during a turn.
    ///
    /// Returns `None` when the yaw rate is within `threshold` (deg/s) or the
    /// crop would leave nothing.
    pub fn crop_for_turn(&self, yaw_rate: f32, threshold: f32) -> Option<VideoFrame> {
        if yaw_rate.abs() <= threshold {
            return None;
        }

        let shift = (yaw_rate * 2.0) as i64;
        let (left, width) = if yaw_rate < 0.0 {
            let left = -shift;
            (left, self.width as i64 - (left + 1))
        } else {
            (0, self.width as i64 - shift)
        };

        if left < 0 || width <= 0 {
            return None;
        }
        self.crop(left as u32, 0, width as u32, self.height)
    }

    fn rgb_view(&self) -> Result<ImageBuffer<Rgb<u8>, &[u8]>, CameraError> {
        ImageBuffer::from_raw(self.width, self.height, self.data.as_slice()).ok_or(
            CameraError::Buffer {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Mean HSV value over the top strip of a downsampled copy (0-255).
    ///
    /// Low scores mean a dark scene.
    pub fn luminance_score(&self) -> Result<u32, CameraError> {
        if self.is_empty() {
            return Err(CameraError::EmptyFrame);
        }

        let (grid_w, grid_h) = LUMINANCE_GRID;
        let resized = imageops::resize(
            &self.rgb_view()?,
            grid_w,
            grid_h,
            imageops::FilterType::Triangle,
        );

        let mut sum: u32 = 0;
        for y in 0..LUMINANCE_ROWS {
            for x in 0..grid_w {
                // HSV value channel is the brightest component
                let px = resized.get_pixel(x, y).0;
                sum += px[0].max(px[1]).max(px[2]) as u32;
            }
        }
        Ok(sum / (LUMINANCE_ROWS * grid_w))
    }

    /// Variance of the Laplacian of the grayscale frame.
    ///
    /// Motion-blurred frames score low.
    pub fn sharpness(&self) -> Result<f64, CameraError> {
        if self.is_empty() {
            return Err(CameraError::EmptyFrame);
        }

        let gray = GrayImage::from_raw(self.width, self.height, self.to_grayscale()).ok_or(
            CameraError::Buffer {
                width: self.width,
                height: self.height,
            },
        )?;
        let lap = laplacian_filter(&gray);

        let n = (lap.width() * lap.height()) as f64;
        let mean = lap.pixels().map(|p| p.0[0] as f64).sum::<f64>() / n;
        let variance = lap
            .pixels()
            .map(|p| {
                let d = p.0[0] as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Ok(variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::checkerboard;

    #[test]
    fn test_crop_bounds() {
        let frame = VideoFrame::filled(10, 4, [1, 2, 3]);
        let cropped = frame.crop(2, 1, 5, 3).unwrap();
        assert_eq!((cropped.width, cropped.height), (5, 3));
        assert_eq!(cropped.data.len(), 5 * 3 * 3);
        assert!(frame.crop(8, 0, 5, 4).is_none());
    }

    #[test]
    fn test_turn_crop_left() {
        let frame = VideoFrame::filled(1280, 8, [0, 0, 0]);
        // -30 deg/s drops 60 columns on the left plus one
        let cropped = frame.crop_for_turn(-30.0, 20.0).unwrap();
        assert_eq!(cropped.width, 1280 - 61);
        assert_eq!(cropped.height, 8);
    }

    #[test]
    fn test_turn_crop_right() {
        let frame = VideoFrame::filled(1280, 8, [0, 0, 0]);
        let cropped = frame.crop_for_turn(25.5, 20.0).unwrap();
        assert_eq!(cropped.width, 1280 - 51);
    }

    #[test]
    fn test_no_crop_when_steady() {
        let frame = VideoFrame::filled(64, 8, [0, 0, 0]);
        assert!(frame.crop_for_turn(19.9, 20.0).is_none());
        assert!(frame.crop_for_turn(-20.0, 20.0).is_none());
    }

    #[test]
    fn test_luminance_dark_and_bright() {
        let dark = VideoFrame::filled(128, 72, [20, 30, 10]);
        let bright = VideoFrame::filled(128, 72, [40, 200, 90]);
        let dark_score = dark.luminance_score().unwrap();
        let bright_score = bright.luminance_score().unwrap();
        assert!((29..=30).contains(&dark_score));
        assert!((199..=200).contains(&bright_score));
    }

    #[test]
    fn test_sharpness() {
        let flat = VideoFrame::filled(32, 32, [128, 128, 128]);
        assert_eq!(flat.sharpness().unwrap(), 0.0);

        let sharp = checkerboard(32, 32, 1);
        assert!(sharp.sharpness().unwrap() > 40.0);
    }

    #[test]
    fn test_ragged_buffer_measures() {
        let mut data = VideoFrame::filled(4, 4, [90, 90, 90]).data;
        data.push(7);
        let padded = VideoFrame::new(data, 4, 4, 0, 0);
        assert_eq!(padded.to_grayscale().len(), 16);
        assert!(padded.luminance_score().is_ok());
        assert_eq!(padded.sharpness(), Ok(0.0));

        let short = VideoFrame::new(vec![90; 47], 4, 4, 0, 0);
        assert_eq!(short.sharpness(), Err(CameraError::Buffer { width: 4, height: 4 }));
    }

    #[test]
    fn test_empty_frame_measures() {
        let empty = VideoFrame::new(Vec::new(), 0, 0, 0, 0);
        assert_eq!(empty.luminance_score(), Err(CameraError::EmptyFrame));
        assert_eq!(empty.sharpness(), Err(CameraError::EmptyFrame));
    }
}
