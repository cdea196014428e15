// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Landmark-space to physical-length scale calibration.
//!
//! Normalized landmark coordinates carry no physical unit. The calibrator
//! derives a single scalar per session from the front snapshot: the
//! nose-to-shoulder-midpoint segment is assumed to span an average head
//! height of 9 inches, and every subsequent landmark-space distance is
//! multiplied by the resulting ratio. No distance-dependent correction is
//! applied.

use crate::error::{MeasureError, Result};
use crate::geometry::{distance, midpoint};
use crate::landmarks::{LEFT_SHOULDER, NOSE, RIGHT_SHOULDER};
use crate::session::CapturedSnapshot;
use crate::step::StepId;

/// Assumed head height used as the anatomical scale reference, in inches.
pub const ASSUMED_HEAD_HEIGHT_IN: f64 = 9.0;

/// Head segments at or below this length are treated as degenerate.
pub const HEAD_SEGMENT_EPSILON: f64 = 1e-6;

/// Derive the inches-per-landmark-unit ratio from a snapshot batch.
///
/// Uses the front snapshot's skeleton:
/// `head_segment = distance(nose, midpoint(shoulders))` and
/// `ratio = ASSUMED_HEAD_HEIGHT_IN / head_segment`.
///
/// # Errors
///
/// Returns [`MeasureError::Calibration`] when no front snapshot is present
/// or the head segment is numerically degenerate (≤ [`HEAD_SEGMENT_EPSILON`]),
/// which would otherwise divide by zero.
pub fn calibration_ratio(snapshots: &[CapturedSnapshot]) -> Result<f64> {
    let front = snapshots
        .iter()
        .find(|s| s.step_id == StepId::Front)
        .ok_or_else(|| {
            MeasureError::Calibration("front snapshot required for scale calibration".to_string())
        })?;

    let skeleton = &front.skeleton;
    let nose = skeleton.point(NOSE)?;
    let neck_base = midpoint(skeleton.point(LEFT_SHOULDER)?, skeleton.point(RIGHT_SHOULDER)?);

    let head_segment = distance(nose, neck_base);
    if head_segment <= HEAD_SEGMENT_EPSILON {
        return Err(MeasureError::Calibration(format!(
            "degenerate head segment ({head_segment:.2e}), cannot derive scale"
        )));
    }

    Ok(ASSUMED_HEAD_HEIGHT_IN / head_segment)
}
