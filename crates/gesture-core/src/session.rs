//! Frame sessions: per-surface composition of the gesture pipeline.
//!
//! A [`FrameSession`] owns the temporal state for one UI surface (swipe
//! baseline and cooldown, pointer filter, hold timer). Each delivered frame is
//! classified, fed through the stateful stages, and composed into a single
//! [`FrameEvent`] for the registered consumer.
//!
//! Frame-local failures never escape: a malformed landmark set degrades to
//! the neutral event, and a consumer returning an error is logged and
//! skipped.

use gestura_common::error::{GesturaError, GesturaResult};
use gestura_hand_model::{
    FrameEvent, FrameStatus, HandFrame, HandLandmarkSet, Pose, TimestampNs,
};

use crate::classifier::GestureClassifier;
use crate::config::PipelineConfig;
use crate::hold::HoldTracker;
use crate::pointer::PointerSmoother;
use crate::swipe::SwipeDetector;

/// Receives the composed event for every processed frame.
///
/// Returned errors are counted and logged, and delivery continues with the
/// next frame. A panicking consumer is not caught: it unwinds through
/// [`FrameSession::process`] and whatever is driving it.
pub trait FrameConsumer: Send {
    fn on_frame(&mut self, event: &FrameEvent) -> GesturaResult<()>;
}

impl<F> FrameConsumer for F
where
    F: FnMut(&FrameEvent) -> GesturaResult<()> + Send,
{
    fn on_frame(&mut self, event: &FrameEvent) -> GesturaResult<()> {
        self(event)
    }
}

/// Receives human-readable detection status.
pub trait StatusSink: Send {
    fn on_status(&mut self, status: &str);
}

impl<F> StatusSink for F
where
    F: FnMut(&str) + Send,
{
    fn on_status(&mut self, status: &str) {
        self(status)
    }
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub hands: u64,
    pub malformed_frames: u64,
    pub swipes: u64,
    pub selections: u64,
    pub consumer_failures: u64,
}

/// Gesture state and dispatch for one UI surface.
pub struct FrameSession {
    surface: String,
    classifier: GestureClassifier,
    swipe: SwipeDetector,
    pointer: PointerSmoother,
    hold: HoldTracker,
    mirror_pointer: bool,
    consumer: Option<Box<dyn FrameConsumer>>,
    status_sink: Option<Box<dyn StatusSink>>,
    stats: SessionStats,
}

impl FrameSession {
    /// Create a session for the named surface, rejecting configs that
    /// [`PipelineConfig::validate`] refuses.
    pub fn new(surface: impl Into<String>, config: &PipelineConfig) -> GesturaResult<Self> {
        config.validate()?;
        Ok(Self::build(surface.into(), config))
    }

    pub fn with_defaults(surface: impl Into<String>) -> Self {
        Self::build(surface.into(), &PipelineConfig::default())
    }

    fn build(surface: String, config: &PipelineConfig) -> Self {
        tracing::debug!(surface = %surface, "Frame session created");
        Self {
            surface,
            classifier: GestureClassifier::new(config.classifier.clone()),
            swipe: SwipeDetector::new(config.swipe.clone()),
            pointer: PointerSmoother::new(config.pointer.clone()),
            hold: HoldTracker::new(config.hold.clone()),
            mirror_pointer: config.mirror_pointer,
            consumer: None,
            status_sink: None,
            stats: SessionStats::default(),
        }
    }

    /// Register the event consumer, replacing any previous one.
    pub fn set_consumer(&mut self, consumer: impl FrameConsumer + 'static) {
        self.consumer = Some(Box::new(consumer));
    }

    /// Register the status sink, replacing any previous one.
    pub fn set_status_sink(&mut self, sink: impl StatusSink + 'static) {
        self.status_sink = Some(Box::new(sink));
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Process one frame: compute the event, then deliver event and status.
    pub fn process(&mut self, frame: &HandFrame) -> FrameEvent {
        let (event, status) = self.evaluate(frame);
        self.dispatch(&event);
        self.report_status(status.as_str());
        event
    }

    /// Compute the event for one frame without delivering it.
    pub fn evaluate(&mut self, frame: &HandFrame) -> (FrameEvent, FrameStatus) {
        self.stats.frames += 1;

        let Some(hand) = frame.hand.as_ref() else {
            self.swipe.update(None);
            self.hold.update(None, frame.timestamp_ns);
            return (FrameEvent::neutral(), FrameStatus::NoHand);
        };

        match self.compose(hand, frame.timestamp_ns) {
            Ok(event) => {
                self.stats.hands += 1;
                if event.swipe.is_some() {
                    self.stats.swipes += 1;
                }
                if event.hold.is_some_and(|h| h.selected) {
                    self.stats.selections += 1;
                }
                (event, FrameStatus::HandDetected)
            }
            Err(e) => {
                // Not a fist, so any hold in progress ends here.
                self.hold.reset();
                self.stats.malformed_frames += 1;
                if self.stats.malformed_frames == 1 {
                    tracing::warn!(surface = %self.surface, error = %e, "Dropping malformed frame");
                } else {
                    tracing::debug!(surface = %self.surface, error = %e, "Dropping malformed frame");
                }
                (FrameEvent::neutral(), FrameStatus::NoHand)
            }
        }
    }

    fn compose(&mut self, hand: &HandLandmarkSet, t: TimestampNs) -> GesturaResult<FrameEvent> {
        hand.validate()
            .map_err(|e| GesturaError::malformed(e.to_string()))?;
        let (Some(wrist), Some(palm)) = (hand.wrist(), hand.palm()) else {
            return Err(GesturaError::malformed("missing wrist or palm landmark"));
        };

        let classification = self.classifier.classify(hand);
        let swipe = self.swipe.update(Some(wrist.x));

        let pointer = (classification.pose == Pose::OpenPalm).then(|| {
            let raw = if self.mirror_pointer {
                palm.xy().mirrored_x()
            } else {
                palm.xy()
            };
            self.pointer.update(raw)
        });

        let hold = self.hold.update(Some(classification.pose), t);

        Ok(FrameEvent {
            pose: classification.pose,
            finger_count: classification.finger_count,
            swipe,
            pointer,
            hold,
        })
    }

    fn dispatch(&mut self, event: &FrameEvent) {
        let Some(consumer) = self.consumer.as_mut() else {
            return;
        };
        if let Err(e) = consumer.on_frame(event) {
            self.stats.consumer_failures += 1;
            if self.stats.consumer_failures == 1 {
                tracing::warn!(surface = %self.surface, error = %e, "Frame consumer failed; continuing");
            } else {
                tracing::debug!(surface = %self.surface, error = %e, "Frame consumer failed");
            }
        }
    }

    /// Forward a status message to the status sink, if any.
    pub fn report_status(&mut self, status: &str) {
        if let Some(sink) = self.status_sink.as_mut() {
            sink.on_status(status);
        }
    }

    /// Last smoothed pointer position, whether or not the palm is open now.
    pub fn pointer_position(&self) -> gestura_hand_model::Point2D {
        self.pointer.position()
    }

    /// Clear all temporal state; consumer and sink stay registered.
    pub fn reset(&mut self) {
        self.swipe.reset();
        self.pointer.reset();
        self.hold.reset();
        tracing::debug!(surface = %self.surface, "Frame session reset");
    }
}

impl Drop for FrameSession {
    fn drop(&mut self) {
        tracing::debug!(
            surface = %self.surface,
            frames = self.stats.frames,
            swipes = self.stats.swipes,
            selections = self.stats.selections,
            malformed = self.stats.malformed_frames,
            consumer_failures = self.stats.consumer_failures,
            "Frame session ended"
        );
    }
}
