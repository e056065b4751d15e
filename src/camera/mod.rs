pub mod camera_client;
pub mod synthetic;

pub use camera_client::CameraClient;
pub use synthetic::SyntheticCamera;

use crate::error::CameraError;
use image::DynamicImage;

/// A device that can be polled for the current video image. Implementations
/// run on the capture thread owned by [`CameraClient`].
pub trait FrameSource: Send {
    fn capture(&mut self) -> Result<DynamicImage, CameraError>;
    fn name(&self) -> &'static str;
}
