use egui::TextureOptions;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::camera::{CameraClient, SyntheticCamera};
use crate::common::Frame;
use crate::config::Settings;
use crate::detection::{DetectionProvider, HeuristicFaceDetector};
use crate::session::{DetectionSession, SessionConfig, SessionEvent, SessionPhase};

/// The detector overlay: owns the camera and the running session, folds
/// session events into a phase, and renders the view for that phase.
pub struct DetectorPanel {
    phase: SessionPhase,
    sample_count: usize,
    camera: CameraClient,
    frames: watch::Receiver<Option<Frame>>,
    session: DetectionSession,
    event_rx: mpsc::Receiver<SessionEvent>,
}

impl DetectorPanel {
    pub fn open(settings: &Settings) -> Self {
        let camera = CameraClient::new(
            Box::new(SyntheticCamera::new(
                settings.camera.width,
                settings.camera.height,
            )),
            settings.camera.frames_per_second,
        );
        let detector: Arc<dyn DetectionProvider> =
            Arc::new(HeuristicFaceDetector::new(settings.detector.min_confidence));
        let frames = camera.frames();
        let (session, event_rx) =
            DetectionSession::spawn(detector, camera.frames(), SessionConfig::from(settings));
        Self {
            phase: SessionPhase::ModelsLoading,
            sample_count: 0,
            camera,
            frames,
            session,
            event_rx,
        }
    }

    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if matches!(event, SessionEvent::SampleRecorded { .. }) {
                self.sample_count += 1;
            }
            self.phase = self.phase.apply(event);
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns true when the user asked to close the panel.
    pub fn draw(&mut self, ui: &mut egui::Ui) -> bool {
        match self.phase {
            SessionPhase::ModelsLoading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.label("Loading detection models...");
                    ui.add_space(24.0);
                });
                false
            }
            SessionPhase::ModelsFailed => {
                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    ui.heading("Could not load the detection models");
                    ui.label("Face detection is unavailable right now. Please try again later.");
                    ui.add_space(12.0);
                    ui.button("Close").clicked()
                })
                .inner
            }
            SessionPhase::Sampling { seconds_remaining } => {
                self.draw_preview(ui);
                ui.horizontal(|ui| {
                    ui.strong(format!("{}s", seconds_remaining));
                    ui.label(format!("{} readings so far", self.sample_count));
                });
                ui.label("Keep your face in front of the camera...");
                ui.button("Cancel").clicked()
            }
            SessionPhase::Undetermined => {
                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    ui.heading("No reading");
                    ui.label("We never got a clear enough look at your face to guess.");
                    ui.add_space(12.0);
                    ui.button("Close").clicked()
                })
                .inner
            }
            SessionPhase::Result { final_age } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    ui.heading("The verdict!");
                    ui.strong(format!("You look about {} years old", final_age));
                    ui.add_space(12.0);
                    ui.button("Close").clicked()
                })
                .inner
            }
        }
    }

    fn draw_preview(&mut self, ui: &mut egui::Ui) {
        let frame = self.frames.borrow().clone();
        match frame {
            Some(frame) => {
                let image = frame.image().to_rgb8();
                let color_image = egui::ColorImage::from_rgb(
                    [image.width() as usize, image.height() as usize],
                    image.as_raw().as_slice(),
                );
                let texture_handle =
                    ui.ctx()
                        .load_texture("camera_preview", color_image, TextureOptions::default());
                ui.image(&texture_handle);
            }
            None => {
                ui.label("Warming up the camera...");
            }
        }
    }

    /// Cancels the session and releases the camera.
    pub fn close(mut self) {
        self.session.cancel();
        self.camera.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_models_reach_the_failed_phase() {
        let mut settings = Settings::default();
        settings.detector.model_base_path = "definitely/not/a/model/dir".to_string();
        let mut panel = DetectorPanel::open(&settings);

        for _ in 0..100 {
            panel.poll_events();
            if panel.phase() == SessionPhase::ModelsFailed {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(panel.phase(), SessionPhase::ModelsFailed);
        assert_eq!(panel.sample_count, 0);
        panel.close();
    }
}
