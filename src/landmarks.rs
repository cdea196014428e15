// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton landmark data model.
//!
//! A detected pose is an ordered list of 33 landmarks at fixed anatomical
//! indices (the standard pose-landmark indexing). The index mapping is part
//! of the wire contract with the pose-detection collaborator and is never
//! reordered.

use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};

/// Number of landmarks in a complete skeleton.
pub const LANDMARK_COUNT: usize = 33;

// Anatomical landmark indices (standard 33-point pose topology).
pub const NOSE: usize = 0;
pub const LEFT_EYE_INNER: usize = 1;
pub const LEFT_EYE: usize = 2;
pub const LEFT_EYE_OUTER: usize = 3;
pub const RIGHT_EYE_INNER: usize = 4;
pub const RIGHT_EYE: usize = 5;
pub const RIGHT_EYE_OUTER: usize = 6;
pub const LEFT_EAR: usize = 7;
pub const RIGHT_EAR: usize = 8;
pub const MOUTH_LEFT: usize = 9;
pub const MOUTH_RIGHT: usize = 10;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_PINKY: usize = 17;
pub const RIGHT_PINKY: usize = 18;
pub const LEFT_INDEX: usize = 19;
pub const RIGHT_INDEX: usize = 20;
pub const LEFT_THUMB: usize = 21;
pub const RIGHT_THUMB: usize = 22;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;
pub const LEFT_HEEL: usize = 29;
pub const RIGHT_HEEL: usize = 30;
pub const LEFT_FOOT_INDEX: usize = 31;
pub const RIGHT_FOOT_INDEX: usize = 32;

/// Skeleton bone structure (pairs of landmark indices).
/// Defines which landmarks connect when rendering the pose overlay.
pub const POSE_CONNECTIONS: [[usize; 2]; 16] = [
    [LEFT_SHOULDER, RIGHT_SHOULDER], // shoulder line
    [LEFT_SHOULDER, LEFT_ELBOW],     // left upper arm
    [LEFT_ELBOW, LEFT_WRIST],        // left forearm
    [RIGHT_SHOULDER, RIGHT_ELBOW],   // right upper arm
    [RIGHT_ELBOW, RIGHT_WRIST],      // right forearm
    [LEFT_SHOULDER, LEFT_HIP],       // left flank
    [RIGHT_SHOULDER, RIGHT_HIP],     // right flank
    [LEFT_HIP, RIGHT_HIP],           // hip line
    [LEFT_HIP, LEFT_KNEE],           // left thigh
    [LEFT_KNEE, LEFT_ANKLE],         // left shin
    [RIGHT_HIP, RIGHT_KNEE],         // right thigh
    [RIGHT_KNEE, RIGHT_ANKLE],       // right shin
    [LEFT_ANKLE, LEFT_HEEL],         // left heel
    [RIGHT_ANKLE, RIGHT_HEEL],       // right heel
    [LEFT_HEEL, LEFT_FOOT_INDEX],    // left foot
    [RIGHT_HEEL, RIGHT_FOOT_INDEX],  // right foot
];

/// A single 3-D pose landmark in normalized, camera-relative coordinates.
///
/// `visibility` is the detector's per-landmark confidence in `[0, 1]`, or
/// `None` when the detector did not report one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl LandmarkPoint {
    /// Create a landmark without a visibility score.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Create a landmark with a visibility score.
    #[must_use]
    pub const fn with_visibility(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }
}

/// An ordered landmark sequence for one detected pose.
///
/// A complete skeleton holds [`LANDMARK_COUNT`] points; an empty skeleton
/// means "no pose detected" and fails the capture liveness gate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton {
    points: Vec<LandmarkPoint>,
}

impl Skeleton {
    /// Create a skeleton from an ordered landmark list.
    ///
    /// The list is taken as-is; index meaning follows the fixed anatomical
    /// table above.
    #[must_use]
    pub const fn from_points(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// Number of landmarks present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the skeleton carries no landmarks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmark at a fixed anatomical index.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Validation`] if the skeleton is shorter than
    /// the requested index (truncated detector output).
    pub fn point(&self, index: usize) -> Result<LandmarkPoint> {
        self.points.get(index).copied().ok_or_else(|| {
            MeasureError::Validation(format!(
                "landmark index {index} out of range (skeleton has {} points)",
                self.points.len()
            ))
        })
    }

    /// All landmarks, in anatomical index order.
    #[must_use]
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }
}
