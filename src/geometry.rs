// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pure vector math over pose landmarks.

use crate::landmarks::{LandmarkPoint, Skeleton};

/// Euclidean distance between two landmarks.
///
/// Always computed over all three axes; landmark-space distances are never
/// projected down to 2-D.
///
/// # Arguments
///
/// * `p1` - First landmark.
/// * `p2` - Second landmark.
///
/// # Returns
///
/// Distance in normalized landmark space.
#[must_use]
pub fn distance(p1: LandmarkPoint, p2: LandmarkPoint) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    let dz = p1.z - p2.z;
    dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt()
}

/// Midpoint of two landmarks.
///
/// Coordinates are the component-wise mean. The combined visibility is the
/// minimum of the two scores, with an absent score treated as 1.0 before
/// taking the minimum.
#[must_use]
pub fn midpoint(p1: LandmarkPoint, p2: LandmarkPoint) -> LandmarkPoint {
    LandmarkPoint {
        x: (p1.x + p2.x) / 2.0,
        y: (p1.y + p2.y) / 2.0,
        z: (p1.z + p2.z) / 2.0,
        visibility: Some(
            p1.visibility
                .unwrap_or(1.0)
                .min(p2.visibility.unwrap_or(1.0)),
        ),
    }
}

/// Liveness gate for capture commits.
///
/// A skeleton counts as live iff its landmark sequence is non-empty.
/// Per-landmark visibility is not thresholded here.
#[must_use]
pub fn is_live(skeleton: &Skeleton) -> bool {
    !skeleton.is_empty()
}

/// Estimate a body-part circumference from a measured width and depth.
///
/// With no depth information the cross-section is assumed circular and the
/// circumference is `π * width`. Otherwise the cross-section is an ellipse
/// with semi-axes `a = width / 2`, `b = depth / 2` and the circumference is
/// Ramanujan's second approximation `π (3(a+b) − √((3a+b)(a+3b)))`.
///
/// # Arguments
///
/// * `width` - Measured cross-section width.
/// * `depth` - Measured cross-section depth, or 0.0 if unknown.
#[must_use]
pub fn ellipse_circumference(width: f64, depth: f64) -> f64 {
    if depth == 0.0 {
        return std::f64::consts::PI * width;
    }

    let a = width / 2.0;
    let b = depth / 2.0;
    std::f64::consts::PI * (3.0 * (a + b) - (3.0f64.mul_add(a, b) * 3.0f64.mul_add(b, a)).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_distance_is_3d() {
        let p1 = LandmarkPoint::new(0.0, 0.0, 0.0);
        let p2 = LandmarkPoint::new(1.0, 2.0, 2.0);
        // sqrt(1 + 4 + 4) = 3; a 2-D projection would give sqrt(5).
        assert!((distance(p1, p2) - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_distance_identity_and_symmetry() {
        let p1 = LandmarkPoint::new(0.3, -0.2, 0.7);
        let p2 = LandmarkPoint::new(-0.1, 0.5, 0.2);
        assert_eq!(distance(p1, p1), 0.0);
        assert!((distance(p1, p2) - distance(p2, p1)).abs() < TOLERANCE);
    }

    #[test]
    fn test_midpoint_coordinates() {
        let p1 = LandmarkPoint::new(0.0, 0.0, 0.0);
        let p2 = LandmarkPoint::new(1.0, 2.0, -1.0);
        let mid = midpoint(p1, p2);
        assert!((mid.x - 0.5).abs() < TOLERANCE);
        assert!((mid.y - 1.0).abs() < TOLERANCE);
        assert!((mid.z + 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_midpoint_visibility_min() {
        let p1 = LandmarkPoint::with_visibility(0.0, 0.0, 0.0, 0.4);
        let p2 = LandmarkPoint::with_visibility(1.0, 1.0, 1.0, 0.9);
        assert_eq!(midpoint(p1, p2).visibility, Some(0.4));

        // Absent visibility defaults to 1.0 before the min.
        let p3 = LandmarkPoint::new(1.0, 1.0, 1.0);
        assert_eq!(midpoint(p1, p3).visibility, Some(0.4));
        assert_eq!(midpoint(p3, p3).visibility, Some(1.0));
    }

    #[test]
    fn test_is_live() {
        assert!(!is_live(&Skeleton::default()));
        let skeleton = Skeleton::from_points(vec![LandmarkPoint::new(0.5, 0.5, 0.0)]);
        assert!(is_live(&skeleton));
    }

    #[test]
    fn test_circular_circumference() {
        for width in [0.1, 1.0, 7.2, 36.0] {
            let c = ellipse_circumference(width, 0.0);
            assert!((c - std::f64::consts::PI * width).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_ramanujan_circumference() {
        // A circle expressed as an ellipse must agree with π * d.
        let c = ellipse_circumference(2.0, 2.0);
        assert!((c - 2.0 * std::f64::consts::PI).abs() < 1e-9);

        // Worked example: a = 2, b = 1 → π(9 − √35) ≈ 9.688421.
        let c = ellipse_circumference(4.0, 2.0);
        assert!((c - 9.688_421_098).abs() < 1e-6);
    }
}
