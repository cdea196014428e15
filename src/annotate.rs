// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton overlay rendering for captured frames.
//!
//! Draws the detected landmarks and bone connections over a snapshot's
//! frame image, for visual inspection of what a scan actually captured.

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use std::path::Path;

use crate::error::{MeasureError, Result};
use crate::landmarks::POSE_CONNECTIONS;
use crate::session::CapturedSnapshot;

/// Bone segment color.
const BONE_COLOR: Rgb<u8> = Rgb([255, 128, 0]); // #ff8000
/// Landmark dot color.
const DOT_COLOR: Rgb<u8> = Rgb([0, 255, 0]); // #00ff00
/// Label text color.
const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]); // #ffffff

/// Landmark dot radius in pixels.
const DOT_RADIUS: i32 = 4;

/// Render the snapshot's skeleton over its frame image.
///
/// Landmark coordinates are normalized; they are scaled to the decoded
/// frame dimensions. Connections with a landmark missing from a truncated
/// skeleton are skipped rather than failing the whole overlay.
///
/// # Errors
///
/// Returns [`MeasureError::Image`] when the snapshot carries no frame
/// image or the bytes cannot be decoded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn annotate_snapshot(snapshot: &CapturedSnapshot) -> Result<RgbImage> {
    if snapshot.image.is_empty() {
        return Err(MeasureError::Image(
            "snapshot carries no frame image to annotate".to_string(),
        ));
    }

    let mut image = image::load_from_memory(&snapshot.image)?.to_rgb8();
    let (width, height) = (f64::from(image.width()), f64::from(image.height()));

    let skeleton = &snapshot.skeleton;
    for [a, b] in POSE_CONNECTIONS {
        let (Ok(start), Ok(end)) = (skeleton.point(a), skeleton.point(b)) else {
            continue;
        };
        draw_line_segment_mut(
            &mut image,
            ((start.x * width) as f32, (start.y * height) as f32),
            ((end.x * width) as f32, (end.y * height) as f32),
            BONE_COLOR,
        );
    }

    for point in skeleton.points() {
        draw_filled_circle_mut(
            &mut image,
            ((point.x * width) as i32, (point.y * height) as i32),
            DOT_RADIUS,
            DOT_COLOR,
        );
    }

    Ok(image)
}

/// Draw the step title onto an annotated frame.
///
/// The caller supplies the font; frames render fine without a label when no
/// font is available.
pub fn draw_step_label(image: &mut RgbImage, font: &FontRef<'_>, label: &str) {
    let scale = PxScale::from(24.0);
    draw_text_mut(image, LABEL_COLOR, 8, 8, scale, font, label);
}

/// Annotate a snapshot and write the overlay image to disk.
///
/// # Errors
///
/// Returns an error if annotation or the write fails.
pub fn save_annotated<P: AsRef<Path>>(snapshot: &CapturedSnapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| MeasureError::Image(format!("cannot create {}: {e}", parent.display())))?;
    }

    let image = annotate_snapshot(snapshot)?;
    image
        .save(path)
        .map_err(|e| MeasureError::Image(format!("cannot save {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{LANDMARK_COUNT, LandmarkPoint, Skeleton};
    use crate::step::StepId;
    use chrono::Utc;
    use std::io::Cursor;

    fn snapshot_with_image() -> CapturedSnapshot {
        let frame = RgbImage::from_pixel(64, 64, Rgb([20, 20, 20]));
        let mut bytes = Vec::new();
        frame
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        CapturedSnapshot {
            image: bytes,
            skeleton: Skeleton::from_points(vec![
                LandmarkPoint::new(0.5, 0.5, 0.0);
                LANDMARK_COUNT
            ]),
            world_skeleton: None,
            step_id: StepId::Front,
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn test_annotate_draws_on_frame() {
        let snapshot = snapshot_with_image();
        let annotated = annotate_snapshot(&snapshot).unwrap();
        // The landmark dot cluster at the center must have recolored pixels.
        assert_eq!(*annotated.get_pixel(32, 32), DOT_COLOR);
    }

    #[test]
    fn test_annotate_requires_frame_image() {
        let snapshot = CapturedSnapshot {
            image: Vec::new(),
            ..snapshot_with_image()
        };
        let err = annotate_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, MeasureError::Image(_)));
    }

    #[test]
    fn test_truncated_skeleton_still_annotates() {
        let snapshot = CapturedSnapshot {
            skeleton: Skeleton::from_points(vec![LandmarkPoint::new(0.25, 0.25, 0.0)]),
            ..snapshot_with_image()
        };
        assert!(annotate_snapshot(&snapshot).is_ok());
    }
}
