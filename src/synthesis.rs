// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Measurement synthesis from captured pose snapshots.
//!
//! Consumes the ordered snapshot batch plus the calibration ratio and
//! derives the full measurement record through geometric and ratio-based
//! heuristics. The derivation is deliberately approximate and its constants
//! are a compatibility contract: downstream consumers pin their expectations
//! to these exact formulas.
//!
//! Synthesis is all-or-nothing: it returns a complete record or fails, and
//! never exposes a partially filled one. Progress is reported as a fixed
//! sequence of named phase-completion events, emitted in order by the
//! computation itself; once started, synthesis runs to completion or
//! failure.

use std::fmt;

use chrono::Utc;

use crate::error::{MeasureError, Result};
use crate::geometry::{distance, ellipse_circumference, midpoint};
use crate::landmarks::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE, RIGHT_HIP,
    RIGHT_SHOULDER, Skeleton,
};
use crate::measurements::{MeasurementRecord, Units};
use crate::session::CapturedSnapshot;
use crate::step::StepId;

/// Confidence recorded on every synthesized record.
///
/// A literal contract value in this pipeline version; it is not derived
/// from landmark visibility or capture quality.
pub const RECORD_CONFIDENCE: f64 = 0.75;

/// Named synthesis phases, completed in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Selecting and validating the pose snapshots.
    AnalyzingLandmarks,
    /// Scale-converting the primary skeletal distances.
    CalculatingProportions,
    /// Estimating cross-section circumferences.
    ProcessingDepth,
    /// Deriving the remaining measurements.
    GeneratingMeasurements,
    /// Assembling and checking the final record.
    ValidatingResults,
}

impl Phase {
    /// All phases in completion order.
    pub const ALL: [Self; 5] = [
        Self::AnalyzingLandmarks,
        Self::CalculatingProportions,
        Self::ProcessingDepth,
        Self::GeneratingMeasurements,
        Self::ValidatingResults,
    ];

    /// Human-readable phase label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AnalyzingLandmarks => "Analyzing pose landmarks",
            Self::CalculatingProportions => "Calculating body proportions",
            Self::ProcessingDepth => "Processing depth information",
            Self::GeneratingMeasurements => "Generating measurements",
            Self::ValidatingResults => "Validating results",
        }
    }

    /// Zero-based position in the phase sequence.
    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Monotonic progress over the phase sequence.
///
/// Tracks how many phases have completed; progress never decreases even if
/// a completion event is observed out of order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTracker {
    completed: usize,
}

impl PhaseTracker {
    /// Fresh tracker with no completed phases.
    #[must_use]
    pub const fn new() -> Self {
        Self { completed: 0 }
    }

    /// Record a phase completion.
    pub fn complete(&mut self, phase: Phase) {
        self.completed = self.completed.max(phase.index() + 1);
    }

    /// Number of completed phases.
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Completion fraction in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        self.completed as f64 / Phase::ALL.len() as f64
    }

    /// Whether every phase has completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.completed >= Phase::ALL.len()
    }
}

/// Synthesize a measurement record from the snapshot batch.
///
/// See [`synthesize_with_progress`]; this variant discards phase events.
///
/// # Errors
///
/// Returns [`MeasureError::Validation`] when required snapshots are absent.
pub fn synthesize(snapshots: &[CapturedSnapshot], ratio: f64) -> Result<MeasurementRecord> {
    synthesize_with_progress(snapshots, ratio, |_| {})
}

/// Synthesize a measurement record, reporting named phase completions.
///
/// Snapshot selection: front is the `front` snapshot; side is `side-right`,
/// falling back to `side-left`; arms is `front-arms`, falling back to the
/// front snapshot. The observer is invoked once per phase, in [`Phase::ALL`]
/// order, before this function returns.
///
/// # Arguments
///
/// * `snapshots` - The session's ordered snapshot batch.
/// * `ratio` - Calibration ratio (inches per landmark unit).
/// * `on_phase` - Observer called after each completed phase.
///
/// # Errors
///
/// Returns [`MeasureError::Validation`] when the front or side snapshot is
/// missing; no partial record is produced.
pub fn synthesize_with_progress(
    snapshots: &[CapturedSnapshot],
    ratio: f64,
    mut on_phase: impl FnMut(Phase),
) -> Result<MeasurementRecord> {
    // Phase 1: pick the snapshots each measurement family reads from.
    let front = find_step(snapshots, StepId::Front);
    let side = find_step(snapshots, StepId::SideRight)
        .or_else(|| find_step(snapshots, StepId::SideLeft));

    let (Some(front), Some(_side)) = (front, side) else {
        return Err(MeasureError::Validation(
            "missing required pose data".to_string(),
        ));
    };
    let arms = find_step(snapshots, StepId::FrontArms).unwrap_or(front);
    on_phase(Phase::AnalyzingLandmarks);

    let front_lm: &Skeleton = &front.skeleton;
    let arms_lm: &Skeleton = &arms.skeleton;

    // Phase 2: primary scale-converted distances.
    let nose = front_lm.point(NOSE)?;
    let left_shoulder = front_lm.point(LEFT_SHOULDER)?;
    let right_shoulder = front_lm.point(RIGHT_SHOULDER)?;
    let left_hip = front_lm.point(LEFT_HIP)?;
    let right_hip = front_lm.point(RIGHT_HIP)?;
    let left_ankle = front_lm.point(LEFT_ANKLE)?;
    let right_ankle = front_lm.point(RIGHT_ANKLE)?;

    let height = distance(nose, midpoint(left_ankle, right_ankle)) * ratio;
    let shoulder_width = distance(left_shoulder, right_shoulder) * ratio;
    on_phase(Phase::CalculatingProportions);

    // Phase 3: cross-section circumferences. The side view is required but
    // depth is not measured in this pipeline version, so every
    // cross-section is the circular (depth = 0) approximation.
    let hip_span = distance(left_hip, right_hip) * ratio;
    let chest_width = shoulder_width * 0.8;
    let waist_width = hip_span * 0.9;

    let chest_circumference = ellipse_circumference(chest_width, 0.0);
    let waist_circumference = ellipse_circumference(waist_width, 0.0);
    let hip_circumference = ellipse_circumference(hip_span, 0.0);
    on_phase(Phase::ProcessingDepth);

    // Phase 4: limb lengths and proportion-derived estimates. The shoulder
    // anchor for arm length stays on the front skeleton even when the
    // arms-extended snapshot supplies the elbow and wrist.
    let left_elbow = arms_lm.point(LEFT_ELBOW)?;
    let left_wrist = arms_lm.point(LEFT_WRIST)?;
    let upper_arm = distance(left_shoulder, left_elbow);
    let forearm = distance(left_elbow, left_wrist);
    let arm_length = (upper_arm + forearm) * ratio;

    let inseam = distance(left_hip, left_ankle) * ratio;
    let outseam = inseam * 1.15;

    let neck_circumference = height * 0.2;
    let bust_circumference = chest_circumference * 0.95;
    let underbust_circumference = chest_circumference * 0.85;
    let bicep_circumference = shoulder_width * 0.25;
    let wrist_circumference = height * 0.09;
    let thigh_circumference = hip_circumference * 0.6;
    let knee_circumference = thigh_circumference * 0.7;
    let calf_circumference = knee_circumference * 0.9;
    let ankle_circumference = calf_circumference * 0.6;
    let shirt_length = height * 0.4;
    on_phase(Phase::GeneratingMeasurements);

    // Phase 5: the complete record. Confidence is the fixed contract value.
    let record = MeasurementRecord {
        neck_circumference,
        shoulder_width,
        chest_circumference,
        bust_circumference: Some(bust_circumference),
        underbust_circumference: Some(underbust_circumference),
        waist_circumference,
        arm_length,
        bicep_circumference,
        wrist_circumference,
        shirt_length,
        hip_circumference,
        thigh_circumference,
        inseam,
        outseam,
        knee_circumference,
        calf_circumference,
        ankle_circumference,
        height,
        weight: None,
        confidence: RECORD_CONFIDENCE,
        captured_at: Utc::now(),
        units: Units::Inches,
    };
    on_phase(Phase::ValidatingResults);

    Ok(record)
}

fn find_step(snapshots: &[CapturedSnapshot], step_id: StepId) -> Option<&CapturedSnapshot> {
    snapshots.iter().find(|s| s.step_id == step_id)
}
