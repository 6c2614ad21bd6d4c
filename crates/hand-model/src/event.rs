//! Gesture results and the composed per-frame event.
//!
//! The JSON shape of [`FrameEvent`] is the contract with UI consumers:
//!
//! ```json
//! {"pose":"Open Palm","fingerCount":5,"swipe":null,"pointer":{"x":0.41,"y":0.5}}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::Point2D;

/// Hand pose classes recognized per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pose {
    Fist,
    Pinch,
    #[serde(rename = "Open Palm")]
    OpenPalm,
    #[serde(rename = "Hand Pose")]
    HandPose,
    #[default]
    #[serde(rename = "-")]
    None,
}

impl Pose {
    pub const ALL: [Pose; 5] = [
        Pose::Fist,
        Pose::Pinch,
        Pose::OpenPalm,
        Pose::HandPose,
        Pose::None,
    ];

    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Pose::Fist => "Fist",
            Pose::Pinch => "Pinch",
            Pose::OpenPalm => "Open Palm",
            Pose::HandPose => "Hand Pose",
            Pose::None => "-",
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying one landmark set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GestureClassification {
    pub pose: Pose,
    /// Number of extended fingers, always in `0..=5`.
    #[serde(rename = "fingerCount")]
    pub finger_count: u8,
}

impl GestureClassification {
    pub const NONE: GestureClassification = GestureClassification {
        pose: Pose::None,
        finger_count: 0,
    };

    pub fn new(pose: Pose, finger_count: u8) -> Self {
        Self {
            pose,
            finger_count: finger_count.min(5),
        }
    }
}

/// Horizontal swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeEvent {
    #[serde(rename = "Swipe Left")]
    Left,
    #[serde(rename = "Swipe Right")]
    Right,
}

impl fmt::Display for SwipeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeEvent::Left => f.write_str("Swipe Left"),
            SwipeEvent::Right => f.write_str("Swipe Right"),
        }
    }
}

/// Progress of an ongoing fist hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldProgress {
    /// Seconds the fist has been held.
    pub held_secs: f64,
    /// True on the single frame where the hold completed.
    pub selected: bool,
}

impl HoldProgress {
    /// Text shown on the held item: `"0.4s"` while holding, then `"Selected"`.
    pub fn label(&self) -> String {
        if self.selected {
            "Selected".to_string()
        } else {
            format!("{:.1}s", self.held_secs)
        }
    }
}

/// Human-readable detection status for UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    HandDetected,
    NoHand,
}

impl FrameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameStatus::HandDetected => "Hand detected",
            FrameStatus::NoHand => "No hand detected",
        }
    }
}

/// Everything the consumer learns about one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    pub pose: Pose,

    #[serde(rename = "fingerCount")]
    pub finger_count: u8,

    /// Edge-triggered swipe, present on at most one frame per motion.
    pub swipe: Option<SwipeEvent>,

    /// Smoothed pointer; present only while the palm is open.
    pub pointer: Option<Point2D>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<HoldProgress>,
}

impl FrameEvent {
    /// The event for frames with no usable hand.
    pub fn neutral() -> Self {
        Self {
            pose: Pose::None,
            finger_count: 0,
            swipe: None,
            pointer: None,
            hold: None,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    pub fn classification(&self) -> GestureClassification {
        GestureClassification::new(self.pose, self.finger_count)
    }
}

impl Default for FrameEvent {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Parse composed events from JSONL content.
pub fn parse_events(jsonl: &str) -> Result<Vec<FrameEvent>, serde_json::Error> {
    jsonl
        .lines()
        .filter(|line| crate::frame::is_record_line(line))
        .map(|line| serde_json::from_str(line.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_neutral_event_json() {
        let json = serde_json::to_string(&FrameEvent::neutral()).unwrap();
        assert_eq!(
            json,
            r#"{"pose":"-","fingerCount":0,"swipe":null,"pointer":null}"#
        );
    }

    #[test]
    fn test_pose_labels_match_serialized_form() {
        for pose in Pose::ALL {
            let json = serde_json::to_string(&pose).unwrap();
            assert_eq!(json, format!("\"{}\"", pose.label()));
            assert_eq!(pose.to_string(), pose.label());
        }
    }

    #[test]
    fn test_swipe_json() {
        assert_eq!(
            serde_json::to_string(&SwipeEvent::Left).unwrap(),
            "\"Swipe Left\""
        );
        let parsed: SwipeEvent = serde_json::from_str("\"Swipe Right\"").unwrap();
        assert_eq!(parsed, SwipeEvent::Right);
        assert_eq!(SwipeEvent::Right.to_string(), "Swipe Right");
    }

    #[test]
    fn test_event_with_pointer_and_hold() {
        let event = FrameEvent {
            pose: Pose::Fist,
            finger_count: 0,
            swipe: Some(SwipeEvent::Right),
            pointer: None,
            hold: Some(HoldProgress {
                held_secs: 0.5,
                selected: false,
            }),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"swipe\":\"Swipe Right\""));
        assert!(json.contains("\"hold\":{\"held_secs\":0.5,\"selected\":false}"));

        let parsed = parse_events(&format!("# header\n{json}\n")).unwrap();
        assert_eq!(parsed, vec![event]);
    }

    #[test]
    fn test_hold_label() {
        let holding = HoldProgress {
            held_secs: 0.42,
            selected: false,
        };
        assert_eq!(holding.label(), "0.4s");
        let done = HoldProgress {
            held_secs: 1.03,
            selected: true,
        };
        assert_eq!(done.label(), "Selected");
    }

    #[test]
    fn test_classification_clamps_finger_count() {
        assert_eq!(GestureClassification::new(Pose::HandPose, 9).finger_count, 5);
        assert_eq!(GestureClassification::default(), GestureClassification::NONE);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(FrameStatus::HandDetected.as_str(), "Hand detected");
        assert_eq!(FrameStatus::NoHand.as_str(), "No hand detected");
    }

    fn any_pose() -> impl Strategy<Value = Pose> {
        (0..Pose::ALL.len()).prop_map(|i| Pose::ALL[i])
    }

    proptest! {
        #[test]
        fn prop_finger_count_never_exceeds_five(pose in any_pose(), count in any::<u8>()) {
            let c = GestureClassification::new(pose, count);
            prop_assert!(c.finger_count <= 5);
            prop_assert_eq!(c.finger_count, count.min(5));
        }

        #[test]
        fn prop_event_json_keeps_contract_keys(
            pose in any_pose(),
            count in 0u8..=5,
            swipe in prop::option::of(prop_oneof![Just(SwipeEvent::Left), Just(SwipeEvent::Right)]),
            pointer in prop::option::of((0.02f64..=0.98, 0.02f64..=0.98)),
        ) {
            let event = FrameEvent {
                pose,
                finger_count: count,
                swipe,
                pointer: pointer.map(|(x, y)| Point2D::new(x, y)),
                hold: None,
            };
            let value: serde_json::Value = serde_json::to_value(&event).unwrap();
            let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
            prop_assert_eq!(keys.len(), 4);
            for key in ["pose", "fingerCount", "swipe", "pointer"] {
                prop_assert!(keys.contains(&key));
            }
            prop_assert_eq!(&value["pose"], pose.label());

            let line = serde_json::to_string(&event).unwrap();
            let parsed = parse_events(&line).unwrap();
            prop_assert_eq!(parsed.len(), 1);
            prop_assert_eq!(parsed[0].classification(), event.classification());
            prop_assert_eq!(parsed[0].swipe, event.swipe);
            prop_assert_eq!(parsed[0].pointer.is_some(), event.pointer.is_some());
        }
    }
}
