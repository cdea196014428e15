// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Export artifact for finished scans.
//!
//! The export document is a wire contract: top-level keys are exactly
//! `measurements`, `recommendations`, `rawPoseData`, `timestamp`, and
//! `confidence`, with the measurement field names defined by
//! [`MeasurementRecord`]'s serialization.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};
use crate::measurements::MeasurementRecord;
use crate::pipeline::ScanResult;
use crate::session::CapturedSnapshot;
use crate::sizing::SizingRecommendation;

/// Self-contained export document for one completed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanExport {
    /// The measurement record, in its declared unit.
    pub measurements: MeasurementRecord,
    /// Garment recommendations, Shirt/Pants/Jacket order.
    pub recommendations: Vec<SizingRecommendation>,
    /// Raw captured snapshots, including step ids and timestamps.
    #[serde(rename = "rawPoseData")]
    pub raw_pose_data: Vec<CapturedSnapshot>,
    /// Export creation time (ISO-8601).
    pub timestamp: DateTime<Utc>,
    /// Mirror of `measurements.confidence`.
    pub confidence: f64,
}

impl ScanExport {
    /// Build an export document from a processed scan result.
    ///
    /// The measurement record is embedded as given; convert it to the
    /// desired display unit before calling.
    #[must_use]
    pub fn new(
        measurements: MeasurementRecord,
        recommendations: Vec<SizingRecommendation>,
        raw_pose_data: Vec<CapturedSnapshot>,
    ) -> Self {
        let confidence = measurements.confidence;
        Self {
            measurements,
            recommendations,
            raw_pose_data,
            timestamp: Utc::now(),
            confidence,
        }
    }

    /// Build an export document from a [`ScanResult`], cloning its parts.
    #[must_use]
    pub fn from_result(result: &ScanResult) -> Self {
        Self::new(
            result.measurements.clone(),
            result.recommendations.clone(),
            result.snapshots.clone(),
        )
    }

    /// Default export file name, dated from the export timestamp
    /// (`body-measurements-YYYY-MM-DD.json`).
    #[must_use]
    pub fn default_filename(&self) -> String {
        format!("body-measurements-{}.json", self.timestamp.format("%Y-%m-%d"))
    }

    /// Serialize the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Export`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MeasureError::Export(format!("failed to serialize export: {e}")))
    }

    /// Write the document to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                MeasureError::Export(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        std::fs::write(path, self.to_json()?)
            .map_err(|e| MeasureError::Export(format!("failed to write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::tests::sample_record;
    use crate::sizing::recommend;

    fn sample_export() -> ScanExport {
        let record = sample_record();
        let recommendations = recommend(&record);
        ScanExport::new(record, recommendations, Vec::new())
    }

    #[test]
    fn test_top_level_keys_are_exact() {
        let export = sample_export();
        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "confidence",
                "measurements",
                "rawPoseData",
                "recommendations",
                "timestamp"
            ]
        );
    }

    #[test]
    fn test_confidence_mirrors_measurements() {
        let export = sample_export();
        assert!((export.confidence - export.measurements.confidence).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let export = sample_export();
        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[test]
    fn test_default_filename_is_dated() {
        let export = sample_export();
        let name = export.default_filename();
        assert!(name.starts_with("body-measurements-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = std::env::temp_dir().join("bodyscan-test-export");
        let path = dir.join("export.json");
        let export = sample_export();
        export.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: ScanExport = serde_json::from_str(&content).unwrap();
        assert_eq!(back.measurements, export.measurements);
        assert_eq!(back.recommendations, export.recommendations);

        std::fs::remove_dir_all(&dir).ok();
    }
}
