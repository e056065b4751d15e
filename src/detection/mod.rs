pub mod face;
pub mod heuristic;
pub mod model;
pub mod provider;

pub use face::{FaceReading, FaceRegion};
pub use heuristic::HeuristicFaceDetector;
pub use model::AgeModelSet;
pub use provider::DetectionProvider;
