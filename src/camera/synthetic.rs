use image::{DynamicImage, Rgb, RgbImage};

use crate::camera::FrameSource;
use crate::error::CameraError;

/// Stand-in video source used where a platform capture backend would plug
/// in. Renders a subject-like warm-toned oval over a cool gradient so the
/// preview and the detector both have something to look at.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    tick: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tick: 0,
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn capture(&mut self) -> Result<DynamicImage, CameraError> {
        self.tick = self.tick.wrapping_add(1);
        let (w, h) = (self.width, self.height);
        let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
        // Oval covering roughly the middle third of the frame, drifting a
        // few pixels per tick so consecutive frames differ.
        let drift = ((self.tick % 16) as f32 - 8.0) / 2.0;
        let (rx, ry) = (w as f32 / 6.0, h as f32 / 4.0);

        let mut image = RgbImage::new(w, h);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let dx = (x as f32 - cx - drift) / rx;
            let dy = (y as f32 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                let shade = (8.0 * dy) as i16;
                *pixel = Rgb([
                    (205_i16 + shade).clamp(0, 255) as u8,
                    (160_i16 + shade).clamp(0, 255) as u8,
                    (125_i16 + shade).clamp(0, 255) as u8,
                ]);
            } else {
                let g = (y * 96 / h.max(1)) as u8;
                *pixel = Rgb([32, 48 + g, 96 + g]);
            }
        }
        Ok(DynamicImage::ImageRgb8(image))
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_frames_of_requested_size() {
        let mut camera = SyntheticCamera::new(64, 48);
        let image = camera.capture().expect("Failed to capture");
        assert_eq!((image.width(), image.height()), (64, 48));
    }

    #[test]
    fn consecutive_frames_differ() {
        let mut camera = SyntheticCamera::new(64, 48);
        let a = camera.capture().expect("Failed to capture").to_rgb8();
        let b = camera.capture().expect("Failed to capture").to_rgb8();
        assert_ne!(a.as_raw(), b.as_raw());
    }
}
