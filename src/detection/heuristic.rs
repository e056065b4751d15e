use async_trait::async_trait;
use image::RgbImage;
use std::path::Path;
use tokio::sync::RwLock;

use crate::common::Frame;
use crate::detection::model::{AgeModelSet, DetectorWeights, EstimatorWeights};
use crate::detection::{DetectionProvider, FaceReading, FaceRegion};
use crate::error::DetectionError;

/// Skin-chroma face finder with a linear age estimator on top. Weights come
/// from the model files; until `load_models` succeeds every detection call
/// fails with `ModelsNotLoaded`.
pub struct HeuristicFaceDetector {
    min_confidence: f32,
    models: RwLock<Option<AgeModelSet>>,
}

impl HeuristicFaceDetector {
    pub fn new(min_confidence: f32) -> Self {
        Self {
            min_confidence,
            models: RwLock::new(None),
        }
    }

    fn is_skin(weights: &DetectorWeights, r: u8, g: u8, b: u8) -> bool {
        r >= weights.skin_red_min
            && r as u16 > b as u16 + weights.skin_chroma_margin as u16
            && r > g
            && g > b
    }

    /// Bounding box of the warm-toned pixel mass, with a confidence from
    /// how densely the box is filled and how much of the frame it covers.
    fn find_face_region(
        weights: &DetectorWeights,
        rgb: &RgbImage,
    ) -> Option<(FaceRegion, f32)> {
        let (width, height) = rgb.dimensions();
        let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
        let (mut max_x, mut max_y) = (0u32, 0u32);
        let mut skin_pixels = 0u32;

        for (x, y, pixel) in rgb.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            if Self::is_skin(weights, r, g, b) {
                skin_pixels += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        if skin_pixels == 0 {
            return None;
        }
        let frame_fraction = skin_pixels as f32 / (width * height).max(1) as f32;
        if frame_fraction < weights.min_region_fraction {
            return None;
        }

        let region = FaceRegion::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1);
        let density = (skin_pixels as f32 / region.area().max(1) as f32).min(1.0);
        let size_score = (frame_fraction / 0.25).min(1.0);
        let confidence = density * 0.7 + size_score * 0.3;
        Some((region, confidence))
    }

    fn estimate_age(weights: &EstimatorWeights, rgb: &RgbImage, region: FaceRegion) -> f32 {
        let (width, height) = rgb.dimensions();
        let mut luma_sum = 0.0f32;
        let mut texture_sum = 0.0f32;
        let mut pixels = 0u32;

        for y in region.y..(region.y + region.height).min(height) {
            let mut previous_luma: Option<f32> = None;
            for x in region.x..(region.x + region.width).min(width) {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                let luma = (r as f32 + g as f32 + b as f32) / 3.0;
                luma_sum += luma;
                if let Some(prev) = previous_luma {
                    texture_sum += (luma - prev).abs();
                }
                previous_luma = Some(luma);
                pixels += 1;
            }
        }

        let pixels = pixels.max(1) as f32;
        let brightness = luma_sum / pixels / 255.0;
        let texture = (texture_sum / pixels / 32.0).min(1.0);
        let extent = region.coverage(width, height);

        let age = weights.bias
            + weights.brightness_gain * (brightness - 0.5)
            + weights.texture_gain * texture
            + weights.extent_gain * extent;
        age.clamp(1.0, 99.0)
    }
}

#[async_trait]
impl DetectionProvider for HeuristicFaceDetector {
    async fn load_models(&self, base_path: &Path) -> Result<(), DetectionError> {
        let model_set = AgeModelSet::load(base_path).await?;
        *self.models.write().await = Some(model_set);
        tracing::info!("Detection models loaded from {}", base_path.display());
        Ok(())
    }

    async fn detect_face(&self, frame: &Frame) -> Result<Option<FaceReading>, DetectionError> {
        let guard = self.models.read().await;
        let models = guard.as_ref().ok_or(DetectionError::ModelsNotLoaded)?;

        let rgb = frame.image().to_rgb8();
        let Some((region, confidence)) = Self::find_face_region(&models.detector, &rgb) else {
            return Ok(None);
        };
        if confidence < self.min_confidence {
            tracing::debug!(
                "Face candidate below confidence threshold: {:.2} < {:.2}",
                confidence,
                self.min_confidence
            );
            return Ok(None);
        }

        let estimated_age = Self::estimate_age(&models.estimator, &rgb, region);
        Ok(Some(FaceReading {
            estimated_age,
            confidence,
            region,
        }))
    }
}
