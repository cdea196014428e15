// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! End-to-end measurement pipeline.
//!
//! Runs the deterministic batch computation over a completed capture
//! session: scale calibration, measurement synthesis (with named phase
//! events), and sizing recommendation. Each stage is pure and synchronous;
//! the pipeline holds no state between scans beyond its configuration.

use crate::calibration::calibration_ratio;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::measurements::{MeasurementRecord, Units};
use crate::session::CapturedSnapshot;
use crate::sizing::{SizingRecommendation, recommend};
use crate::synthesis::{Phase, synthesize_with_progress};

/// Outcome of one processed scan.
///
/// The measurement record is kept in inches internally; convert at the
/// presentation or export boundary with [`ScanResult::measurements_in`].
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Complete measurement record (inches).
    pub measurements: MeasurementRecord,
    /// Garment recommendations, in the order Shirt, Pants, Jacket.
    pub recommendations: Vec<SizingRecommendation>,
    /// The snapshot batch the record was derived from.
    pub snapshots: Vec<CapturedSnapshot>,
}

impl ScanResult {
    /// The measurement record converted to the given display unit.
    #[must_use]
    pub fn measurements_in(&self, units: Units) -> MeasurementRecord {
        self.measurements.convert(units)
    }
}

/// Measurement pipeline over completed capture sessions.
///
/// # Example
///
/// ```no_run
/// use bodyscan::{CaptureSession, ScanPipeline, source::ReplaySource};
///
/// fn main() -> Result<(), bodyscan::MeasureError> {
///     let mut source = ReplaySource::from_dir("session/")?;
///     let mut session = CaptureSession::new();
///     while !session.is_complete() {
///         session.begin_capture(0, &source);
///         source.advance();
///     }
///
///     let pipeline = ScanPipeline::new();
///     let result = pipeline.process(session.into_snapshots()?)?;
///     println!("chest: {:.1} in", result.measurements.chest_circumference);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScanPipeline {
    config: ScanConfig,
}

impl ScanPipeline {
    /// Pipeline with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with custom configuration.
    #[must_use]
    pub const fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Process a completed snapshot batch into measurements and
    /// recommendations, discarding phase events.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MeasureError::Calibration`] when the front snapshot
    /// is missing or degenerate, and [`crate::MeasureError::Validation`]
    /// when synthesis lacks a required view. Either way no partial result
    /// is produced.
    pub fn process(&self, snapshots: Vec<CapturedSnapshot>) -> Result<ScanResult> {
        self.process_with_progress(snapshots, |_| {})
    }

    /// Process a completed snapshot batch, reporting named phase
    /// completions.
    ///
    /// Synthesis is invoked exactly once; the observer sees every phase,
    /// in order, before this function returns. Once started the
    /// computation is not cancellable; it runs to completion or failure.
    ///
    /// # Errors
    ///
    /// See [`ScanPipeline::process`].
    pub fn process_with_progress(
        &self,
        snapshots: Vec<CapturedSnapshot>,
        on_phase: impl FnMut(Phase),
    ) -> Result<ScanResult> {
        let ratio = calibration_ratio(&snapshots)?;
        let measurements = synthesize_with_progress(&snapshots, ratio, on_phase)?;
        let recommendations = recommend(&measurements);

        Ok(ScanResult {
            measurements,
            recommendations,
            snapshots,
        })
    }
}
