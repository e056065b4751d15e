use async_trait::async_trait;
use std::path::Path;

use crate::common::Frame;
use crate::detection::FaceReading;
use crate::error::DetectionError;

/// Boundary to the face/age inference capability. One load call per
/// detector activation; `detect_face` is consumed once per sampling tick.
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    /// Prepares all detector/estimator resources under `base_path`. There is
    /// no partial success: any failure leaves the provider unusable.
    async fn load_models(&self, base_path: &Path) -> Result<(), DetectionError>;

    /// Returns the single most prominent face in the frame, or `None` when
    /// no face is found or confidence is insufficient.
    async fn detect_face(&self, frame: &Frame) -> Result<Option<FaceReading>, DetectionError>;
}
