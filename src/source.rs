// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose-frame source handling for capture sessions.
//!
//! The live camera and the pose-detection model are external collaborators;
//! the capture session only ever samples "the current frame" through the
//! [`PoseFrameSource`] trait at commit time. This module provides the trait
//! plus two implementations: [`ReplaySource`] for recorded sessions on disk
//! (how the CLI runs without a camera) and [`FixedSource`] for tests.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};
use crate::landmarks::Skeleton;
use crate::step::{StepId, pose_steps};

/// Provider of the current pose-detection frame.
///
/// Implementations are sampled at capture commit time only; no frame
/// history is buffered by the session.
pub trait PoseFrameSource {
    /// Skeleton detected in the current frame, or `None` when the detector
    /// has no pose (or no frame) right now.
    fn current_skeleton(&self) -> Option<Skeleton>;

    /// World-space skeleton for the current frame, when the detector
    /// provides one.
    fn current_world_skeleton(&self) -> Option<Skeleton> {
        None
    }

    /// Encoded still image of the current frame, embedded verbatim into the
    /// captured snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame image cannot be produced.
    fn capture_frame(&self) -> Result<Vec<u8>>;
}

/// One recorded pose-detection frame on disk.
///
/// The landmark keys follow the detector's wire shape; `image` optionally
/// names a sibling image file holding the encoded frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Detected landmarks (may be empty when no pose was present).
    pub landmarks: Skeleton,
    /// World-space landmarks, when recorded.
    #[serde(
        default,
        rename = "worldLandmarks",
        skip_serializing_if = "Option::is_none"
    )]
    pub world_landmarks: Option<Skeleton>,
    /// Relative path of the frame image file, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

/// Replays a recorded capture session from a directory.
///
/// The directory holds one JSON frame file per guided step, named by step
/// id (`front.json`, `side-right.json`, …). The source exposes one frame at
/// a time; callers advance it after each successful commit.
#[derive(Debug)]
pub struct ReplaySource {
    frames: Vec<LoadedFrame>,
    cursor: usize,
}

#[derive(Debug)]
struct LoadedFrame {
    skeleton: Skeleton,
    world_skeleton: Option<Skeleton>,
    image: Vec<u8>,
}

impl ReplaySource {
    /// Load a recorded session directory, one frame file per guided step.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory containing `<step-id>.json` frame files.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Config`] if the directory or any step's
    /// frame file is missing or malformed.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(MeasureError::Config(format!(
                "recorded session directory not found: {}",
                dir.display()
            )));
        }

        let mut frames = Vec::with_capacity(pose_steps().len());
        for step in pose_steps() {
            frames.push(Self::load_frame(dir, step.id)?);
        }

        Ok(Self { frames, cursor: 0 })
    }

    fn load_frame(dir: &Path, step_id: StepId) -> Result<LoadedFrame> {
        let path = dir.join(format!("{step_id}.json"));
        let content = std::fs::read_to_string(&path).map_err(|e| {
            MeasureError::Config(format!(
                "missing recorded frame for step '{step_id}' ({}: {e})",
                path.display()
            ))
        })?;
        let frame: RecordedFrame = serde_json::from_str(&content).map_err(|e| {
            MeasureError::Config(format!("invalid frame file {}: {e}", path.display()))
        })?;

        // Frame images are optional in recordings; an absent image becomes
        // an empty blob in the snapshot.
        let image = match &frame.image {
            Some(rel) => std::fs::read(dir.join(rel))?,
            None => Vec::new(),
        };

        Ok(LoadedFrame {
            skeleton: frame.landmarks,
            world_skeleton: frame.world_landmarks,
            image,
        })
    }

    /// Move on to the next recorded frame.
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// Number of recorded frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the recording holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn current(&self) -> Option<&LoadedFrame> {
        self.frames.get(self.cursor)
    }
}

impl PoseFrameSource for ReplaySource {
    fn current_skeleton(&self) -> Option<Skeleton> {
        self.current().map(|f| f.skeleton.clone())
    }

    fn current_world_skeleton(&self) -> Option<Skeleton> {
        self.current().and_then(|f| f.world_skeleton.clone())
    }

    fn capture_frame(&self) -> Result<Vec<u8>> {
        self.current().map(|f| f.image.clone()).ok_or_else(|| {
            MeasureError::Capture("replay source exhausted, no current frame".to_string())
        })
    }
}

/// A source that always serves the same frame. Test/bench helper.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    /// Skeleton served for every frame; `None` simulates "no pose detected".
    pub skeleton: Option<Skeleton>,
    /// World-space skeleton served for every frame.
    pub world_skeleton: Option<Skeleton>,
    /// Encoded frame image served for every capture.
    pub image: Vec<u8>,
}

impl FixedSource {
    /// Source serving the given skeleton on every frame.
    #[must_use]
    pub fn with_skeleton(skeleton: Skeleton) -> Self {
        Self {
            skeleton: Some(skeleton),
            world_skeleton: None,
            image: Vec::new(),
        }
    }
}

impl PoseFrameSource for FixedSource {
    fn current_skeleton(&self) -> Option<Skeleton> {
        self.skeleton.clone()
    }

    fn current_world_skeleton(&self) -> Option<Skeleton> {
        self.world_skeleton.clone()
    }

    fn capture_frame(&self) -> Result<Vec<u8>> {
        Ok(self.image.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{LANDMARK_COUNT, LandmarkPoint};

    fn write_session_dir(dir: &Path) {
        let skeleton =
            Skeleton::from_points(vec![LandmarkPoint::new(0.5, 0.5, 0.0); LANDMARK_COUNT]);
        for step in pose_steps() {
            let frame = RecordedFrame {
                landmarks: skeleton.clone(),
                world_landmarks: None,
                image: None,
            };
            std::fs::write(
                dir.join(format!("{}.json", step.id)),
                serde_json::to_string(&frame).unwrap(),
            )
            .unwrap();
        }
    }

    #[test]
    fn test_replay_source_walks_frames() {
        let dir = std::env::temp_dir().join("bodyscan-test-replay-walk");
        std::fs::create_dir_all(&dir).unwrap();
        write_session_dir(&dir);

        let mut source = ReplaySource::from_dir(&dir).unwrap();
        assert_eq!(source.len(), 5);

        for _ in 0..5 {
            assert!(source.current_skeleton().is_some());
            assert!(source.capture_frame().is_ok());
            source.advance();
        }
        assert!(source.current_skeleton().is_none());
        assert!(source.capture_frame().is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_replay_source_missing_dir() {
        let err = ReplaySource::from_dir("/nonexistent/bodyscan-session").unwrap_err();
        assert!(matches!(err, MeasureError::Config(_)));
    }

    #[test]
    fn test_fixed_source() {
        let source = FixedSource::default();
        assert!(source.current_skeleton().is_none());

        let skeleton = Skeleton::from_points(vec![LandmarkPoint::new(0.0, 0.0, 0.0)]);
        let source = FixedSource::with_skeleton(skeleton);
        assert!(source.current_skeleton().is_some());
    }
}
