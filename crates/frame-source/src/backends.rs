//! Landmark provider implementations.

use std::collections::VecDeque;
use std::path::Path;

use gestura_common::error::{GesturaError, GesturaResult};
use gestura_hand_model::frame::is_record_line;
use gestura_hand_model::HandFrame;

use crate::LandmarkProvider;

/// Replays a JSONL frame recording.
///
/// Lines are decoded one at a time as frames are requested, so a single
/// corrupt line costs one frame rather than the whole recording.
pub struct ReplayProvider {
    name: String,
    lines: VecDeque<(usize, String)>,
}

impl ReplayProvider {
    /// Load a recording from disk.
    pub fn from_path(path: impl AsRef<Path>) -> GesturaResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GesturaError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut provider = Self::from_jsonl(&content);
        provider.name = format!("replay:{}", path.display());
        Ok(provider)
    }

    /// Replay frames from JSONL content held in memory.
    pub fn from_jsonl(content: &str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| is_record_line(line))
            .map(|(i, line)| (i + 1, line.trim().to_string()))
            .collect();
        Self {
            name: "replay".to_string(),
            lines,
        }
    }

    /// Frames not yet replayed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LandmarkProvider for ReplayProvider {
    fn next_frame(&mut self) -> GesturaResult<Option<HandFrame>> {
        let Some((line_no, line)) = self.lines.pop_front() else {
            return Ok(None);
        };
        serde_json::from_str(&line)
            .map(Some)
            .map_err(|e| GesturaError::malformed(format!("line {line_no}: {e}")))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Serves a fixed script of frames and errors.
#[derive(Default)]
pub struct ScriptedProvider {
    script: VecDeque<GesturaResult<HandFrame>>,
    start_error: Option<String>,
}

impl ScriptedProvider {
    pub fn new(frames: impl IntoIterator<Item = HandFrame>) -> Self {
        Self {
            script: frames.into_iter().map(Ok).collect(),
            start_error: None,
        }
    }

    pub fn push_frame(&mut self, frame: HandFrame) {
        self.script.push_back(Ok(frame));
    }

    pub fn push_error(&mut self, error: GesturaError) {
        self.script.push_back(Err(error));
    }

    /// Make `start` fail with the given message.
    pub fn fail_on_start(mut self, message: impl Into<String>) -> Self {
        self.start_error = Some(message.into());
        self
    }
}

impl LandmarkProvider for ScriptedProvider {
    fn start(&mut self) -> GesturaResult<()> {
        match self.start_error.take() {
            Some(message) => Err(GesturaError::provider(message)),
            None => Ok(()),
        }
    }

    fn next_frame(&mut self) -> GesturaResult<Option<HandFrame>> {
        self.script.pop_front().transpose()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDING: &str = r#"# recorded 2026-01-01
{"t":0,"hand":null}

{"t":33333333}
not json
{"t":66666666,"hand":null}
"#;

    #[test]
    fn test_replay_skips_comments_and_blank_lines() {
        let provider = ReplayProvider::from_jsonl(RECORDING);
        assert_eq!(provider.remaining(), 4);
    }

    #[test]
    fn test_replay_reports_bad_line_and_continues() {
        let mut provider = ReplayProvider::from_jsonl(RECORDING);
        assert_eq!(provider.next_frame().unwrap(), Some(HandFrame::empty(0)));
        assert_eq!(
            provider.next_frame().unwrap(),
            Some(HandFrame::empty(33_333_333))
        );

        let err = provider.next_frame().unwrap_err();
        assert!(err.is_frame_local());
        assert!(err.to_string().contains("line 5"));

        assert_eq!(
            provider.next_frame().unwrap(),
            Some(HandFrame::empty(66_666_666))
        );
        assert_eq!(provider.next_frame().unwrap(), None);
    }

    #[test]
    fn test_replay_missing_file() {
        let result = ReplayProvider::from_path("/nonexistent/gestura/frames.jsonl");
        assert!(matches!(result, Err(GesturaError::FileNotFound { .. })));
    }

    #[test]
    fn test_scripted_order_and_start_failure() {
        let mut provider = ScriptedProvider::new([HandFrame::empty(1)]);
        provider.push_error(GesturaError::malformed("bad"));
        provider.push_frame(HandFrame::empty(2));

        assert!(provider.start().is_ok());
        assert_eq!(provider.next_frame().unwrap(), Some(HandFrame::empty(1)));
        assert!(provider.next_frame().is_err());
        assert_eq!(provider.next_frame().unwrap(), Some(HandFrame::empty(2)));
        assert_eq!(provider.next_frame().unwrap(), None);

        let mut failing = ScriptedProvider::default().fail_on_start("camera unavailable");
        let err = failing.start().unwrap_err();
        assert_eq!(err.to_string(), "Provider error: camera unavailable");
    }
}
