// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Ultralytics BodyScan Library
//!
//! Guided body-measurement capture and garment size recommendation from
//! pose landmarks, written in Rust. The library sequences a five-view
//! capture session, calibrates landmark space against an anatomical
//! reference, derives a full set of clothing-relevant measurements through
//! geometric heuristics, and maps them to discrete garment sizes.
//!
//! ## Features
//!
//! - **Guided Capture** - Five-pose state machine (front, sides, back,
//!   arms extended) with countdown, cancel, and liveness-gated commits
//! - **Deterministic Pipeline** - Pure, synchronous calibration, synthesis,
//!   and sizing over an immutable snapshot batch
//! - **Stable Contracts** - Exact measurement formulas and a bit-exact JSON
//!   export document for downstream consumers
//! - **Detector Agnostic** - Consumes any 33-point pose-landmark stream
//!   through a small source trait; no inference runtime required
//! - **Recorded Sessions** - Replay captured landmark frames from disk for
//!   reproducible scans and offline testing
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bodyscan = "0.1.0"
//! ```
//!
//! Or install the CLI tool:
//!
//! ```bash
//! cargo install bodyscan
//! ```
//!
//! ## Quick Start (Library)
//!
//! ```rust
//! use bodyscan::landmarks::{self, LANDMARK_COUNT};
//! use bodyscan::source::FixedSource;
//! use bodyscan::{CaptureSession, LandmarkPoint, ScanPipeline, Skeleton};
//!
//! fn main() -> Result<(), bodyscan::MeasureError> {
//!     // Landmarks normally arrive from the external pose detector; build
//!     // a simple standing figure here.
//!     let mut points = vec![LandmarkPoint::new(0.0, 0.0, 0.0); LANDMARK_COUNT];
//!     points[landmarks::LEFT_SHOULDER] = LandmarkPoint::new(-0.1, 0.2, 0.0);
//!     points[landmarks::RIGHT_SHOULDER] = LandmarkPoint::new(0.1, 0.2, 0.0);
//!     points[landmarks::LEFT_HIP] = LandmarkPoint::new(-0.08, 0.6, 0.0);
//!     points[landmarks::RIGHT_HIP] = LandmarkPoint::new(0.08, 0.6, 0.0);
//!     points[landmarks::LEFT_ANKLE] = LandmarkPoint::new(-0.08, 1.0, 0.0);
//!     points[landmarks::RIGHT_ANKLE] = LandmarkPoint::new(0.08, 1.0, 0.0);
//!     let source = FixedSource::with_skeleton(Skeleton::from_points(points));
//!
//!     // Capture all five guided poses, committing immediately.
//!     let mut session = CaptureSession::new();
//!     while !session.is_complete() {
//!         session.begin_capture(0, &source);
//!     }
//!
//!     // Calibrate, synthesize, and size in one pass.
//!     let result = ScanPipeline::new().process(session.into_snapshots()?)?;
//!     println!("height: {:.1} in", result.measurements.height);
//!     for rec in &result.recommendations {
//!         println!("{}: {} ({})", rec.category, rec.size, rec.fit);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! The `bodyscan` CLI replays recorded capture sessions:
//!
//! ```bash
//! # Run a scan over a recorded session directory
//! bodyscan scan --session recordings/alice/
//!
//! # Metric output and a custom export path
//! bodyscan scan --session recordings/alice/ --units cm --export results.json
//!
//! # Save skeleton overlays and persist to a file-backed store
//! bodyscan scan -s recordings/alice/ --save --store ./measurement-store
//!
//! # List the guided capture steps
//! bodyscan steps
//! ```
//!
//! **CLI Options:**
//!
//! | Option | Short | Description | Default |
//! |--------|-------|-------------|---------|
//! | `--session` | `-s` | Recorded session directory | (required) |
//! | `--timer` | | Countdown seconds per capture | `3` |
//! | `--units` | | Display units (`inches`, `cm`) | `inches` |
//! | `--export` | `-e` | Export artifact path | dated file name |
//! | `--save` | | Save annotated snapshot overlays | `false` |
//! | `--store` | | Measurement store root directory | off |
//! | `--profile` | | Existing profile id to reuse | off |
//! | `--verbose` | | Show verbose output | `true` |
//!
//! ## Recorded Session Format
//!
//! A session directory holds one JSON frame file per guided step, named by
//! step id:
//!
//! ```text
//! recordings/alice/
//! ├── front.json
//! ├── side-right.json
//! ├── back.json
//! ├── side-left.json
//! └── front-arms.json
//! ```
//!
//! Each frame file carries the detector's landmark list plus an optional
//! sibling image path:
//!
//! ```json
//! {
//!   "landmarks": [{"x": 0.51, "y": 0.12, "z": -0.03, "visibility": 0.99}],
//!   "worldLandmarks": null,
//!   "image": "front.jpg"
//! }
//! ```
//!
//! ## Export Artifact
//!
//! Every scan can be exported as a single JSON document with top-level keys
//! `measurements`, `recommendations`, `rawPoseData`, `timestamp`, and
//! `confidence`, a stable contract for downstream tooling.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`session`] | Capture session state machine ([`CaptureSession`]) |
//! | [`step`] | Guided pose steps ([`StepId`], [`pose_steps`]) |
//! | [`landmarks`] | Skeleton data model and landmark index table |
//! | [`geometry`] | Landmark vector math and circumference estimation |
//! | [`calibration`] | Landmark-space to inches scale calibration |
//! | [`synthesis`] | Measurement synthesis and processing phases |
//! | [`measurements`] | [`MeasurementRecord`] and unit conversion |
//! | [`sizing`] | Garment size recommendation rules |
//! | [`pipeline`] | End-to-end orchestration ([`ScanPipeline`]) |
//! | [`source`] | Pose-frame sources ([`PoseFrameSource`], replay) |
//! | [`export`] | JSON export artifact ([`ScanExport`]) |
//! | [`store`] | Persistence collaborator boundary |
//! | [`error`] | Error types ([`MeasureError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Skeleton overlay rendering on captured frames (default) |
//!
//! ## License
//!
//! This project is dual-licensed under AGPL-3.0 for open-source use or the
//! [Ultralytics Enterprise License](https://ultralytics.com/license) for
//! commercial applications.

// Modules
#[cfg(feature = "annotate")]
pub mod annotate;
pub mod calibration;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod landmarks;
pub mod measurements;
pub mod pipeline;
pub mod session;
pub mod sizing;
pub mod source;
pub mod step;
pub mod store;
pub mod synthesis;

// Re-export main types for convenience
pub use config::ScanConfig;
pub use error::{MeasureError, Result};
pub use export::ScanExport;
pub use landmarks::{LandmarkPoint, Skeleton};
pub use measurements::{MeasurementRecord, Units};
pub use pipeline::{ScanPipeline, ScanResult};
pub use session::{CaptureSession, CapturedSnapshot, SessionEffect, SessionEvent, SessionState};
pub use sizing::{Fit, SizingRecommendation, recommend};
pub use source::{PoseFrameSource, ReplaySource};
pub use step::{PoseStep, StepId, pose_steps};
pub use store::{JsonFileStore, ProfileStore, StoreConfig};
pub use synthesis::{Phase, PhaseTracker, synthesize, synthesize_with_progress};

// Re-export calibration constants for advanced use
pub use calibration::{ASSUMED_HEAD_HEIGHT_IN, calibration_ratio};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
