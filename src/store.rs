// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Persistence collaborator boundary.
//!
//! The measurement store is an external collaborator: the pipeline treats
//! writes as fire-and-forget relative to its own state, and a persistence
//! failure never invalidates an already-computed record. Connection
//! parameters are an explicit [`StoreConfig`] handed to the implementation;
//! there is no process-wide store singleton.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};
use crate::measurements::MeasurementRecord;
use crate::session::CapturedSnapshot;

/// Explicit connection parameters for a measurement store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory (or endpoint) the store writes under.
    pub root: PathBuf,
}

impl StoreConfig {
    /// Store configuration rooted at the given path.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

/// Profile and measurement persistence contract.
pub trait ProfileStore {
    /// Reuse an existing profile id, or create a fresh anonymous profile.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Persistence`] when the store rejects the
    /// write or is unavailable.
    fn create_or_reuse_profile(&self, existing: Option<&str>) -> Result<String>;

    /// Insert one measurement record with its raw snapshots under a
    /// profile, returning the new measurement id.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Persistence`] when the store rejects the
    /// write or is unavailable.
    fn insert_measurement(
        &self,
        profile_id: &str,
        record: &MeasurementRecord,
        snapshots: &[CapturedSnapshot],
    ) -> Result<String>;
}

/// Stored profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileDocument {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
}

/// Stored measurement row.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeasurementDocument {
    id: String,
    profile_id: String,
    measurements: MeasurementRecord,
    raw_landmarks: Vec<CapturedSnapshot>,
    confidence: f64,
    created_at: DateTime<Utc>,
}

/// Sequence suffix keeping generated ids unique within a process.
static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn next_id(prefix: &str) -> String {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{seq}", Utc::now().format("%Y%m%d%H%M%S%3f"))
}

/// File-backed measurement store.
///
/// Profiles and measurements are written as individual JSON documents under
/// the configured root, the stand-in implementation used by the CLI and
/// tests.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and lazily create) a store under the configured root.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Persistence`] when the directories cannot be
    /// created.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        for sub in ["profiles", "measurements"] {
            std::fs::create_dir_all(config.root.join(sub)).map_err(|e| {
                MeasureError::Persistence(format!(
                    "cannot create store directory under {}: {e}",
                    config.root.display()
                ))
            })?;
        }
        Ok(Self {
            root: config.root.clone(),
        })
    }

    fn profile_path(&self, id: &str) -> PathBuf {
        self.root.join("profiles").join(format!("{id}.json"))
    }

    fn measurement_path(&self, id: &str) -> PathBuf {
        self.root.join("measurements").join(format!("{id}.json"))
    }

    fn write_document<T: Serialize>(&self, path: &Path, document: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| MeasureError::Persistence(format!("cannot serialize document: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            MeasureError::Persistence(format!("cannot write {}: {e}", path.display()))
        })
    }
}

impl ProfileStore for JsonFileStore {
    fn create_or_reuse_profile(&self, existing: Option<&str>) -> Result<String> {
        if let Some(id) = existing {
            return Ok(id.to_string());
        }

        let profile = ProfileDocument {
            id: next_id("profile"),
            name: "Anonymous User".to_string(),
            created_at: Utc::now(),
        };
        self.write_document(&self.profile_path(&profile.id), &profile)?;
        Ok(profile.id)
    }

    fn insert_measurement(
        &self,
        profile_id: &str,
        record: &MeasurementRecord,
        snapshots: &[CapturedSnapshot],
    ) -> Result<String> {
        let document = MeasurementDocument {
            id: next_id("measurement"),
            profile_id: profile_id.to_string(),
            measurements: record.clone(),
            raw_landmarks: snapshots.to_vec(),
            confidence: record.confidence,
            created_at: Utc::now(),
        };
        self.write_document(&self.measurement_path(&document.id), &document)?;
        Ok(document.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::tests::sample_record;

    fn temp_store(name: &str) -> (StoreConfig, JsonFileStore) {
        let config = StoreConfig::new(std::env::temp_dir().join(name));
        let store = JsonFileStore::open(&config).unwrap();
        (config, store)
    }

    #[test]
    fn test_profile_create_and_reuse() {
        let (config, store) = temp_store("bodyscan-test-store-profiles");

        let id = store.create_or_reuse_profile(None).unwrap();
        assert!(store.profile_path(&id).exists());

        // An explicit id is reused as-is, nothing new is written.
        let reused = store.create_or_reuse_profile(Some(&id)).unwrap();
        assert_eq!(reused, id);

        std::fs::remove_dir_all(&config.root).ok();
    }

    #[test]
    fn test_insert_measurement_round_trip() {
        let (config, store) = temp_store("bodyscan-test-store-measurements");

        let profile_id = store.create_or_reuse_profile(None).unwrap();
        let record = sample_record();
        let measurement_id = store
            .insert_measurement(&profile_id, &record, &[])
            .unwrap();

        let content = std::fs::read_to_string(store.measurement_path(&measurement_id)).unwrap();
        let document: MeasurementDocument = serde_json::from_str(&content).unwrap();
        assert_eq!(document.profile_id, profile_id);
        assert_eq!(document.measurements, record);
        assert!((document.confidence - record.confidence).abs() < f64::EPSILON);

        std::fs::remove_dir_all(&config.root).ok();
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = next_id("profile");
        let b = next_id("profile");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unwritable_root_is_persistence_error() {
        // A root nested under a regular file cannot be created.
        let file = std::env::temp_dir().join("bodyscan-test-store-blocker");
        std::fs::write(&file, b"x").unwrap();

        let config = StoreConfig::new(file.join("store"));
        let err = JsonFileStore::open(&config).unwrap_err();
        assert!(matches!(err, MeasureError::Persistence(_)));

        std::fs::remove_file(std::env::temp_dir().join("bodyscan-test-store-blocker")).ok();
    }
}
