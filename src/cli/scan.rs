// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

#[cfg(feature = "annotate")]
use std::path::Path;

use crate::cli::args::ScanArgs;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::measurements::{MeasurementRecord, Units};
use crate::pipeline::{ScanPipeline, ScanResult};
use crate::session::{CaptureSession, SessionEffect};
use crate::source::ReplaySource;
use crate::step::pose_steps;
use crate::store::{JsonFileStore, ProfileStore, StoreConfig};
use crate::synthesis::{Phase, PhaseTracker};
use crate::export::ScanExport;
use crate::{error, info, phase, section, success, verbose, warn};

/// Run a measurement scan over a recorded session.
#[allow(clippy::too_many_lines)]
pub fn run_scan(args: &ScanArgs) {
    crate::cli::logging::set_verbose(args.verbose);

    let units: Units = match args.units.parse() {
        Ok(units) => units,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    let config = ScanConfig::new().with_timer(args.timer).with_units(units);

    let mut source = match ReplaySource::from_dir(&args.session) {
        Ok(source) => source,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    section!("Guided capture ({} steps)", pose_steps().len());
    let session = match run_capture(&mut source, &config) {
        Ok(session) => session,
        Err(step_title) => {
            error!("no live pose in the recorded frame for step '{step_title}'");
            process::exit(1);
        }
    };

    section!("Processing measurements");
    let pipeline = ScanPipeline::with_config(config);
    let snapshots = match session.into_snapshots() {
        Ok(snapshots) => snapshots,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let mut tracker = PhaseTracker::new();
    let result = match pipeline.process_with_progress(snapshots, |completed| {
        tracker.complete(completed);
        phase!(tracker.completed(), Phase::ALL.len(), completed.label());
    }) {
        Ok(result) => result,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let display = result.measurements_in(units);
    print_measurements(&display, units);
    info!(
        "  Confidence: {:.0}% over {} captured poses",
        display.confidence * 100.0,
        result.snapshots.len()
    );
    print_recommendations(&result);

    let export = ScanExport::new(
        display,
        result.recommendations.clone(),
        result.snapshots.clone(),
    );
    let export_path = args
        .export
        .clone()
        .unwrap_or_else(|| export.default_filename());
    match export.save(&export_path) {
        Ok(()) => {
            success!("Export written to {export_path}");
        }
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }

    save_overlays(args, &result, &export_path);

    if let Some(root) = &args.store {
        match persist(root, args.profile.as_deref(), &result) {
            Ok((profile_id, measurement_id)) => {
                success!("Measurement {measurement_id} saved for profile {profile_id}");
            }
            Err(e) => {
                // A failed write never discards the computed results; the
                // export artifact above stays valid for a retry.
                warn!("{e}");
            }
        }
    }
}

/// Drive the capture state machine across all recorded frames.
///
/// Returns the completed session, or the failing step's title when a
/// recorded frame carries no live pose (a recording cannot be retaken).
fn run_capture(source: &mut ReplaySource, config: &ScanConfig) -> std::result::Result<CaptureSession, String> {
    let mut session = CaptureSession::new();

    while let Some(step) = session.current_step() {
        verbose!("  {}: {}", step.title, step.instruction);

        let mut effect = session.begin_capture(config.timer_seconds, source);
        loop {
            match effect {
                SessionEffect::CountdownStarted { remaining, .. }
                | SessionEffect::CountdownTicked { remaining, .. } => {
                    verbose!("    countdown: {remaining}");
                    effect = session.tick(source);
                }
                SessionEffect::SnapshotCommitted { step: step_id } => {
                    verbose!("    captured '{step_id}'");
                    source.advance();
                    break;
                }
                SessionEffect::SessionCompleted => {
                    verbose!("    captured '{}', session complete", step.id);
                    source.advance();
                    break;
                }
                SessionEffect::CaptureFailed { .. }
                | SessionEffect::Cancelled { .. }
                | SessionEffect::Rejected => {
                    return Err(step.title.to_string());
                }
            }
        }
    }

    Ok(session)
}

fn print_measurements(record: &MeasurementRecord, units: Units) {
    section!("Measurements ({units})");

    let rows = [
        ("Neck circumference", record.neck_circumference),
        ("Shoulder width", record.shoulder_width),
        ("Chest circumference", record.chest_circumference),
        ("Waist circumference", record.waist_circumference),
        ("Arm length", record.arm_length),
        ("Bicep circumference", record.bicep_circumference),
        ("Wrist circumference", record.wrist_circumference),
        ("Shirt length", record.shirt_length),
        ("Hip circumference", record.hip_circumference),
        ("Thigh circumference", record.thigh_circumference),
        ("Inseam", record.inseam),
        ("Outseam", record.outseam),
        ("Knee circumference", record.knee_circumference),
        ("Calf circumference", record.calf_circumference),
        ("Ankle circumference", record.ankle_circumference),
        ("Height", record.height),
    ];
    for (label, value) in rows {
        info!("  {label:<22} {value:>8.1} {units}");
    }
}

fn print_recommendations(result: &ScanResult) {
    section!("Size recommendations");
    for rec in &result.recommendations {
        info!(
            "  {:<8} {:>8}  ({} fit, {:.0}% confidence)",
            rec.category,
            rec.size,
            rec.fit,
            rec.confidence * 100.0
        );
    }
}

#[cfg(feature = "annotate")]
fn save_overlays(args: &ScanArgs, result: &ScanResult, export_path: &str) {
    if !args.save {
        return;
    }

    let dir = Path::new(export_path)
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("annotated");

    for snapshot in &result.snapshots {
        let path = dir.join(format!("{}.png", snapshot.step_id));
        match crate::annotate::save_annotated(snapshot, &path) {
            Ok(()) => {
                verbose!("  overlay saved to {}", path.display());
            }
            Err(e) => {
                warn!("skipping overlay for '{}': {e}", snapshot.step_id);
            }
        }
    }
}

#[cfg(not(feature = "annotate"))]
fn save_overlays(args: &ScanArgs, _result: &ScanResult, _export_path: &str) {
    if args.save {
        warn!(
            "--save requires the 'annotate' feature. Compile with --features annotate to enable overlays."
        );
    }
}

fn persist(
    root: &str,
    profile: Option<&str>,
    result: &ScanResult,
) -> Result<(String, String)> {
    let store = JsonFileStore::open(&StoreConfig::new(root))?;
    let profile_id = store.create_or_reuse_profile(profile)?;
    let measurement_id =
        store.insert_measurement(&profile_id, &result.measurements, &result.snapshots)?;
    Ok((profile_id, measurement_id))
}

/// Print the guided capture step table.
pub fn print_steps() {
    section!("Guided capture steps");
    for (index, step) in pose_steps().iter().enumerate() {
        info!(
            "  {}. {:<14} {:>4}°  {}",
            index + 1,
            step.title,
            step.target_angle_degrees,
            step.description
        );
        verbose!("     {}", step.instruction);
    }
}
