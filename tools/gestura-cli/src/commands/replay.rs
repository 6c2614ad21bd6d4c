//! Replay a recorded frame stream through a gesture session.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gestura_common::clock::FrameClock;
use gestura_common::config::AppConfig;
use gestura_common::error::{GesturaError, GesturaResult};
use gestura_frame_source::backends::ReplayProvider;
use gestura_frame_source::writer::{EventStreamHeader, EventWriter};
use gestura_frame_source::{FramePump, PumpStats};
use gestura_gesture_core::{FrameSession, PipelineConfig, SessionStats};
use gestura_hand_model::{FrameEvent, Pose, SwipeEvent};

#[derive(Debug, Default)]
struct ReplaySummary {
    poses: HashMap<Pose, u64>,
    swipes_left: u64,
    swipes_right: u64,
    selections: u64,
}

impl ReplaySummary {
    fn record(&mut self, event: &FrameEvent) {
        *self.poses.entry(event.pose).or_default() += 1;
        match event.swipe {
            Some(SwipeEvent::Left) => self.swipes_left += 1,
            Some(SwipeEvent::Right) => self.swipes_right += 1,
            None => {}
        }
        if event.hold.is_some_and(|h| h.selected) {
            self.selections += 1;
        }
    }

    fn render(&self, pump: &PumpStats, session: &SessionStats, elapsed_secs: f64) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Frames:");
        let _ = writeln!(out, "  Processed: {}", pump.frames_processed);
        let _ = writeln!(out, "  With hand: {}", session.hands);
        let _ = writeln!(out, "  Malformed: {}", session.malformed_frames);
        let _ = writeln!(out, "  Unreadable lines: {}", pump.read_errors);
        let _ = writeln!(out, "  Elapsed: {elapsed_secs:.2}s");
        if session.consumer_failures > 0 {
            let _ = writeln!(out, "  Event write failures: {}", session.consumer_failures);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Poses:");
        for pose in Pose::ALL {
            let count = self.poses.get(&pose).copied().unwrap_or(0);
            let _ = writeln!(out, "  {:<10} {}", pose.label(), count);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Gestures:");
        let _ = writeln!(out, "  Swipe left: {}", self.swipes_left);
        let _ = writeln!(out, "  Swipe right: {}", self.swipes_right);
        let _ = writeln!(out, "  Selections: {}", self.selections);
        out
    }
}

pub async fn run(
    app_config: &AppConfig,
    frames: PathBuf,
    output: Option<PathBuf>,
    fps: Option<u32>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let clock = FrameClock::start();
    let pipeline = match config {
        Some(path) => PipelineConfig::load_from(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load pipeline config: {e}"))?,
        None => PipelineConfig::load(),
    };

    let provider = ReplayProvider::from_path(&frames)
        .map_err(|e| anyhow::anyhow!("Failed to open recording: {e}"))?;
    println!("Replaying {} frames from {}", provider.remaining(), frames.display());

    let surface = frames
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "replay".to_string());

    let writer = match output.as_ref() {
        Some(path) => {
            let header = EventStreamHeader::new(clock.epoch_wall(), surface.clone());
            Some(Arc::new(Mutex::new(EventWriter::new(path.clone(), header)?)))
        }
        None => None,
    };

    let summary = Arc::new(Mutex::new(ReplaySummary::default()));
    let tally = summary.clone();
    let sink = writer.clone();

    let mut session = FrameSession::new(surface, &pipeline)
        .map_err(|e| anyhow::anyhow!("Invalid pipeline config: {e}"))?;
    session.set_consumer(move |event: &FrameEvent| -> GesturaResult<()> {
        if let Ok(mut tally) = tally.lock() {
            tally.record(event);
        }
        match sink.as_ref() {
            Some(writer) => writer
                .lock()
                .map_err(|_| GesturaError::consumer("event writer lock poisoned"))?
                .write_event(event),
            None => Ok(()),
        }
    });

    let mut last_status = String::new();
    session.set_status_sink(move |status: &str| {
        if status != last_status {
            tracing::info!(status, "Detection status changed");
            last_status = status.to_string();
        }
    });

    let mut replay = app_config.replay.clone();
    if let Some(fps) = fps {
        replay.fps = fps;
    }
    let pump = FramePump::from_defaults(&replay);

    let stop_flag = pump.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop_flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    });

    let stats = pump
        .run(Box::new(provider), &mut session)
        .await
        .map_err(|e| anyhow::anyhow!("Replay failed: {e}"))?;
    let session_stats = session.stats();
    drop(session);

    // Flush here so a failed final write is reported instead of lost on drop.
    let written = match writer.as_ref() {
        Some(writer) => {
            let mut writer = writer
                .lock()
                .map_err(|_| anyhow::anyhow!("event writer lock poisoned"))?;
            writer
                .flush()
                .map_err(|e| anyhow::anyhow!("Failed to write events: {e}"))?;
            Some(writer.events_written())
        }
        None => None,
    };

    let summary = summary
        .lock()
        .map_err(|_| anyhow::anyhow!("replay summary lock poisoned"))?;

    println!();
    print!(
        "{}",
        summary.render(&stats, &session_stats, FrameClock::ns_to_secs(clock.elapsed_ns()))
    );

    if let (Some(path), Some(written)) = (output, written) {
        println!();
        println!("{written} events written to: {}", path.display());
        if session_stats.consumer_failures > 0 {
            println!(
                "Warning: {} events could not be written",
                session_stats.consumer_failures
            );
        }
    }

    Ok(())
}
