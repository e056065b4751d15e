use serde::Deserialize;
use std::path::Path;

use crate::error::DetectionError;

/// Names the weight files making up one model set. Mirrors the two-net
/// layout the estimator was trained with: a face detector and an age
/// estimator, loaded together or not at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelManifest {
    pub detector: String,
    pub estimator: String,
}

/// Skin-chroma thresholds for the face detector.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorWeights {
    pub skin_red_min: u8,
    pub skin_chroma_margin: u8,
    pub min_region_fraction: f32,
}

/// Linear coefficients for the age estimator.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorWeights {
    pub bias: f32,
    pub brightness_gain: f32,
    pub texture_gain: f32,
    pub extent_gain: f32,
}

#[derive(Debug, Clone)]
pub struct AgeModelSet {
    pub detector: DetectorWeights,
    pub estimator: EstimatorWeights,
}

impl AgeModelSet {
    /// Reads `manifest.json` under `base_path` and every weight file it
    /// names. Any missing or malformed file fails the whole load.
    pub async fn load(base_path: &Path) -> Result<Self, DetectionError> {
        let manifest: ModelManifest = read_model_file(&base_path.join("manifest.json")).await?;
        let detector: DetectorWeights =
            read_model_file(&base_path.join(&manifest.detector)).await?;
        let estimator: EstimatorWeights =
            read_model_file(&base_path.join(&manifest.estimator)).await?;

        let model_set = Self {
            detector,
            estimator,
        };
        model_set.validate()?;
        Ok(model_set)
    }

    fn validate(&self) -> Result<(), DetectionError> {
        if self.detector.min_region_fraction <= 0.0 || self.detector.min_region_fraction >= 1.0 {
            return Err(DetectionError::ModelInvalid(format!(
                "min_region_fraction {} outside (0, 1)",
                self.detector.min_region_fraction
            )));
        }
        if !self.estimator.bias.is_finite() || self.estimator.bias <= 0.0 {
            return Err(DetectionError::ModelInvalid(format!(
                "estimator bias {} is not a usable age",
                self.estimator.bias
            )));
        }
        Ok(())
    }
}

async fn read_model_file<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<T, DetectionError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DetectionError::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| DetectionError::ModelParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use std::path::Path;

    /// Writes a loadable model directory for tests.
    pub fn write_model_dir(base: &Path) {
        std::fs::write(
            base.join("manifest.json"),
            r#"{ "detector": "face_detector.json", "estimator": "age_estimator.json" }"#,
        )
        .expect("Failed to write manifest");
        std::fs::write(
            base.join("face_detector.json"),
            r#"{ "skin_red_min": 120, "skin_chroma_margin": 16, "min_region_fraction": 0.02 }"#,
        )
        .expect("Failed to write detector weights");
        std::fs::write(
            base.join("age_estimator.json"),
            r#"{ "bias": 24.0, "brightness_gain": 18.0, "texture_gain": 40.0, "extent_gain": 6.0 }"#,
        )
        .expect("Failed to write estimator weights");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_reads_manifest_and_weights() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        test_fixtures::write_model_dir(dir.path());
        let model_set = AgeModelSet::load(dir.path()).await.expect("Failed to load");
        assert_eq!(model_set.detector.skin_red_min, 120);
        assert!((model_set.estimator.bias - 24.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn missing_directory_is_a_load_error() {
        let result = AgeModelSet::load(Path::new("does/not/exist")).await;
        assert!(matches!(result, Err(DetectionError::ModelLoad { .. })));
    }

    #[tokio::test]
    async fn malformed_weight_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        test_fixtures::write_model_dir(dir.path());
        std::fs::write(dir.path().join("age_estimator.json"), "not json")
            .expect("Failed to overwrite weights");
        let result = AgeModelSet::load(dir.path()).await;
        assert!(matches!(result, Err(DetectionError::ModelParse { .. })));
    }

    #[tokio::test]
    async fn out_of_range_weights_are_rejected() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        test_fixtures::write_model_dir(dir.path());
        std::fs::write(
            dir.path().join("face_detector.json"),
            r#"{ "skin_red_min": 120, "skin_chroma_margin": 16, "min_region_fraction": 2.0 }"#,
        )
        .expect("Failed to overwrite weights");
        let result = AgeModelSet::load(dir.path()).await;
        assert!(matches!(result, Err(DetectionError::ModelInvalid(_))));
    }
}
