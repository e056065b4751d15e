use chrono::Utc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::camera::FrameSource;
use crate::common::Frame;

/// Owns the capture thread and exposes the live frame handle. The watch
/// channel always holds the most recent frame; slow consumers never queue
/// stale frames behind fresh ones.
pub struct CameraClient {
    cancel_token: CancellationToken,
    capture_thread: Option<std::thread::JoinHandle<()>>,
    frame_rx: watch::Receiver<Option<Frame>>,
}

impl CameraClient {
    pub fn new(source: Box<dyn FrameSource>, frames_per_second: u32) -> Self {
        let cancel_token = CancellationToken::new();
        let (frame_tx, frame_rx) = watch::channel(None);
        let period = Duration::from_secs(1) / frames_per_second.max(1);
        let thread_token = cancel_token.clone();
        let capture_thread = std::thread::spawn(move || {
            run_capture_loop(source, frame_tx, period, thread_token);
        });
        Self {
            cancel_token,
            capture_thread: Some(capture_thread),
            frame_rx,
        }
    }

    /// Live, continuously-updating frame handle.
    pub fn frames(&self) -> watch::Receiver<Option<Frame>> {
        self.frame_rx.clone()
    }

    pub fn stop(&mut self) {
        self.cancel_token.cancel();
        if let Some(thread) = self.capture_thread.take() {
            thread.join().expect("Camera capture thread panicked");
        }
    }
}

impl Drop for CameraClient {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_capture_loop(
    mut source: Box<dyn FrameSource>,
    frame_tx: watch::Sender<Option<Frame>>,
    period: Duration,
    cancel_token: CancellationToken,
) {
    tracing::info!("Camera capture starting, source: {}", source.name());
    while !cancel_token.is_cancelled() {
        match source.capture() {
            Ok(image) => {
                frame_tx.send_replace(Some(Frame::new(image, Utc::now())));
            }
            Err(e) => {
                // A dropped capture is not fatal; the next poll may recover.
                tracing::warn!("Failed to capture frame: {}", e);
            }
        }
        std::thread::sleep(period);
    }
    tracing::info!("Camera capture stopped, source: {}", source.name());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::SyntheticCamera;

    #[tokio::test]
    async fn publishes_frames_until_stopped() {
        let mut client = CameraClient::new(Box::new(SyntheticCamera::new(64, 48)), 60);
        let mut frames = client.frames();
        frames
            .wait_for(|frame| frame.is_some())
            .await
            .expect("Capture thread died before producing a frame");
        client.stop();
        // A stopped client leaves the last frame in place but produces no more.
        let last_id = frames.borrow().as_ref().map(|f| f.frame_id());
        assert!(last_id.is_some());
    }

    #[tokio::test]
    async fn drop_stops_capture_thread() {
        let client = CameraClient::new(Box::new(SyntheticCamera::new(32, 32)), 60);
        let frames = client.frames();
        drop(client);
        // The capture thread owned the sender; a joined thread means it is gone.
        assert!(frames.has_changed().is_err());
    }
}
