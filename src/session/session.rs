use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::common::Frame;
use crate::config::Settings;
use crate::detection::DetectionProvider;
use crate::session::aggregate::mean_age;
use crate::session::state::SessionEvent;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub tick_interval: Duration,
    pub countdown_seconds: u32,
    pub model_base_path: PathBuf,
}

impl From<&Settings> for SessionConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            tick_interval: Duration::from_millis(settings.session.tick_interval_ms),
            countdown_seconds: settings.session.countdown_seconds,
            model_base_path: PathBuf::from(&settings.detector.model_base_path),
        }
    }
}

/// One activation-to-close lifecycle of the age detector: model loading,
/// the sampling loop, the countdown, and the final aggregation. The spawned
/// task is the single owner of the sample sequence and the countdown
/// counter; detection work reports in through a channel and never touches
/// session state directly.
pub struct DetectionSession {
    session_id: Uuid,
    session_task: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl DetectionSession {
    pub fn spawn(
        detector: Arc<dyn DetectionProvider>,
        frames: watch::Receiver<Option<Frame>>,
        config: SessionConfig,
    ) -> (Self, mpsc::Receiver<SessionEvent>) {
        let session_id = Uuid::new_v4();
        let cancel_token = CancellationToken::new();
        let (event_tx, event_rx) = mpsc::channel(64);
        let session_task = tokio::spawn(run_session(
            session_id,
            detector,
            frames,
            config,
            cancel_token.clone(),
            event_tx,
        ));
        (
            Self {
                session_id,
                session_task,
                cancel_token,
            },
            event_rx,
        )
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Stops both the sampling loop and the countdown immediately. No
    /// result is computed and in-flight detections are discarded.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.session_task.is_finished()
    }
}

impl Drop for DetectionSession {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn run_session(
    session_id: Uuid,
    detector: Arc<dyn DetectionProvider>,
    frames: watch::Receiver<Option<Frame>>,
    config: SessionConfig,
    cancel_token: CancellationToken,
    event_tx: mpsc::Sender<SessionEvent>,
) {
    tracing::info!("Session {} loading detection models", session_id);
    let loaded = tokio::select! {
        _ = cancel_token.cancelled() => {
            tracing::info!("Session {} cancelled during model loading", session_id);
            return;
        }
        result = detector.load_models(&config.model_base_path) => result,
    };
    if let Err(e) = loaded {
        tracing::error!("Session {} failed to load models: {}", session_id, e);
        let _ = event_tx.send(SessionEvent::ModelsFailed).await;
        return;
    }

    let mut samples: Vec<u32> = Vec::new();
    // A zero-length countdown still gets one tick.
    let mut seconds_remaining = config.countdown_seconds.max(1);
    let _ = event_tx
        .send(SessionEvent::SamplingStarted { seconds_remaining })
        .await;
    tracing::info!(
        "Session {} sampling for {} ticks at {:?}",
        session_id,
        seconds_remaining,
        config.tick_interval
    );

    // Two independent timers on the same cadence. The detection tick is
    // never back-pressured by a slow detection; readings come back through
    // the channel whenever they land.
    let start = tokio::time::Instant::now();
    let mut detection_ticks =
        tokio::time::interval_at(start + config.tick_interval, config.tick_interval);
    let mut countdown_ticks =
        tokio::time::interval_at(start + config.tick_interval, config.tick_interval);
    let (reading_tx, mut reading_rx) = mpsc::channel::<u32>(32);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::info!(
                    "Session {} cancelled, discarding {} samples",
                    session_id,
                    samples.len()
                );
                return;
            }
            _ = detection_ticks.tick() => {
                let frame = frames.borrow().clone();
                match frame {
                    Some(frame) => spawn_detection_tick(
                        detector.clone(),
                        frame,
                        reading_tx.clone(),
                        cancel_token.clone(),
                    ),
                    None => tracing::debug!("No frame available yet, tick contributes nothing"),
                }
            }
            Some(age) = reading_rx.recv() => {
                samples.push(age);
                let _ = event_tx.send(SessionEvent::SampleRecorded { age }).await;
            }
            _ = countdown_ticks.tick() => {
                seconds_remaining -= 1;
                let _ = event_tx
                    .send(SessionEvent::CountdownTick { seconds_remaining })
                    .await;
                if seconds_remaining == 0 {
                    break;
                }
            }
        }
    }

    // Expiry. Readings already delivered still count; once the receiver is
    // gone, anything in flight has nowhere to land.
    drop(reading_tx);
    while let Ok(age) = reading_rx.try_recv() {
        samples.push(age);
        let _ = event_tx.send(SessionEvent::SampleRecorded { age }).await;
    }

    let final_age = mean_age(&samples);
    tracing::info!(
        "Session {} finished: {} samples, result {:?}",
        session_id,
        samples.len(),
        final_age
    );
    let _ = event_tx.send(SessionEvent::Finished { final_age }).await;
}

fn spawn_detection_tick(
    detector: Arc<dyn DetectionProvider>,
    frame: Frame,
    reading_tx: mpsc::Sender<u32>,
    cancel_token: CancellationToken,
) {
    tokio::spawn(async move {
        match detector.detect_face(&frame).await {
            Ok(Some(reading)) => {
                if cancel_token.is_cancelled() {
                    tracing::debug!("Discarding detection result from cancelled session");
                    return;
                }
                let age = reading.estimated_age.round() as u32;
                if reading_tx.send(age).await.is_err() {
                    tracing::debug!("Discarding detection result from ended session");
                }
            }
            Ok(None) => {
                tracing::debug!("No face found in frame {}", frame.frame_id());
            }
            Err(e) => {
                // Per-tick failures never abort the session.
                tracing::warn!("Detection tick failed: {}", e);
            }
        }
    });
}
