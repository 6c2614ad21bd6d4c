//! Gestura Frame Source
//!
//! Moves hand frames from a landmark provider into a [`FrameSession`]. The
//! provider runs on a blocking thread and hands frames across a bounded
//! channel, so a slow session applies backpressure instead of queueing
//! unbounded work. Providers are pluggable:
//!
//! - **Replay:** JSONL frame recordings on disk
//! - **Scripted:** In-memory frame queues for tests and demos
//!
//! Composed events can be written in append-only JSONL format via
//! [`writer::EventWriter`].

pub mod backends;
pub mod writer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use gestura_common::clock::FramePacer;
use gestura_common::config::ReplayDefaults;
use gestura_common::error::{GesturaError, GesturaResult};
use gestura_gesture_core::FrameSession;
use gestura_hand_model::HandFrame;
use tokio::sync::mpsc;

/// Trait for hand-landmark providers.
pub trait LandmarkProvider: Send {
    /// Prepare the provider. Called once, on the provider thread, before the
    /// first frame is read.
    fn start(&mut self) -> GesturaResult<()> {
        Ok(())
    }

    /// Read the next frame. Returns `None` once the stream has ended.
    fn next_frame(&mut self) -> GesturaResult<Option<HandFrame>>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Counters reported by a finished pump run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub frames_received: u64,
    pub frames_processed: u64,
    pub read_errors: u64,
}

/// Drives a provider into a session until the stream ends or the pump is
/// stopped.
pub struct FramePump {
    fps: u32,
    channel_capacity: usize,
    stop_flag: Arc<AtomicBool>,
}

impl FramePump {
    /// Create a pump. `fps == 0` delivers frames as fast as they arrive.
    pub fn new(fps: u32, channel_capacity: usize) -> Self {
        Self {
            fps,
            channel_capacity: channel_capacity.max(1),
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_defaults(defaults: &ReplayDefaults) -> Self {
        Self::new(defaults.fps, defaults.channel_capacity)
    }

    /// Run until the provider is exhausted or the stop flag is set.
    ///
    /// Frame-local read errors are counted and skipped. Any other provider
    /// error, including a failed start, is returned; its bare message goes to
    /// the session's status sink.
    pub async fn run(
        &self,
        mut provider: Box<dyn LandmarkProvider>,
        session: &mut FrameSession,
    ) -> GesturaResult<PumpStats> {
        let provider_name = provider.name().to_string();
        tracing::info!(
            provider = %provider_name,
            surface = %session.surface(),
            fps = self.fps,
            "Frame pump started"
        );

        let (tx, mut rx) = mpsc::channel::<GesturaResult<HandFrame>>(self.channel_capacity);
        let stop = self.stop_flag.clone();

        let producer = tokio::task::spawn_blocking(move || {
            if let Err(e) = provider.start() {
                let _ = tx.blocking_send(Err(e));
                return;
            }

            while !stop.load(Ordering::Relaxed) {
                let item = match provider.next_frame() {
                    Ok(Some(frame)) => Ok(frame),
                    Ok(None) => break,
                    Err(e) => Err(e),
                };
                let fatal = matches!(&item, Err(e) if !e.is_frame_local());
                if tx.blocking_send(item).is_err() || fatal {
                    break;
                }
            }
        });

        let mut pacer = FramePacer::new(self.fps);
        let mut stats = PumpStats::default();
        let mut failure = None;

        while let Some(item) = rx.recv().await {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }

            match item {
                Ok(frame) => {
                    stats.frames_received += 1;
                    let delay = pacer.delay_until_next(Instant::now());
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    session.process(&frame);
                    stats.frames_processed += 1;
                }
                Err(e) if e.is_frame_local() => {
                    stats.read_errors += 1;
                    tracing::warn!(provider = %provider_name, error = %e, "Skipping unreadable frame");
                }
                Err(e) => {
                    tracing::error!(provider = %provider_name, error = %e, "Landmark provider failed");
                    session.report_status(&e.message());
                    failure = Some(e);
                    break;
                }
            }
        }

        // Closing the receiver unblocks a producer waiting on a full channel.
        drop(rx);
        producer
            .await
            .map_err(|e| GesturaError::provider(format!("provider task panicked: {e}")))?;

        if let Some(e) = failure {
            return Err(e);
        }

        tracing::info!(
            frames = stats.frames_processed,
            read_errors = stats.read_errors,
            "Frame pump stopped"
        );
        Ok(stats)
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }
}

impl Default for FramePump {
    fn default() -> Self {
        Self::from_defaults(&ReplayDefaults::default())
    }
}
