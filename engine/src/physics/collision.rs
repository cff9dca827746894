//! Closest-Point Geometry
//!
//! Pure geometric routines shared by the narrow-phase tests and the
//! positional correction pass: point-vs-segment and segment-vs-segment
//! closest points. These are the numerically delicate parts of the engine;
//! every degenerate case (zero-length segments, near-parallel axes) falls
//! back to a deterministic answer instead of an error.
//!
//! The segment-vs-segment solver follows the standard dot-product
//! formulation (see Ericson, *Real-Time Collision Detection*, ch. 5.1.9)
//! with a two-pass clamp-and-refine for boundary-constrained cases.

use glam::Vec3;

use super::config::ZERO_TOLERANCE;

/// Returns the point on segment `start..end` closest to `point`.
///
/// A segment whose squared length is below the zero tolerance is treated
/// as the single point `start`.
pub fn closest_point_on_segment(point: Vec3, start: Vec3, end: Vec3) -> Vec3 {
    let segment = end - start;
    let to_point = point - start;

    let length_sq = segment.length_squared();
    if length_sq < ZERO_TOLERANCE {
        return start;
    }

    // t = (point - start) . (end - start) / |end - start|^2, clamped to the segment
    let t = (to_point.dot(segment) / length_sq).clamp(0.0, 1.0);
    start + segment * t
}

/// Returns the pair of closest points between segments A and B,
/// as `(point_on_a, point_on_b)`.
pub fn closest_point_segments(
    start_a: Vec3,
    end_a: Vec3,
    start_b: Vec3,
    end_b: Vec3,
) -> (Vec3, Vec3) {
    let seg_a = end_a - start_a;
    let seg_b = end_b - start_b;
    let offset = start_a - start_b;

    let len_a_sq = seg_a.length_squared();
    let len_b_sq = seg_b.length_squared();
    let b_dot_offset = seg_b.dot(offset);

    // Degenerate segments reduce to point-vs-point or point-vs-segment.
    if len_a_sq <= ZERO_TOLERANCE && len_b_sq <= ZERO_TOLERANCE {
        return (start_a, start_b);
    } else if len_a_sq <= ZERO_TOLERANCE {
        return (start_a, closest_point_on_segment(start_a, start_b, end_b));
    } else if len_b_sq <= ZERO_TOLERANCE {
        return (closest_point_on_segment(start_b, start_a, end_a), start_b);
    }

    let a_dot_offset = seg_a.dot(offset);
    let a_dot_b = seg_a.dot(seg_b);

    let (param_a, param_b) =
        closest_segment_parameters(len_a_sq, len_b_sq, a_dot_b, a_dot_offset, b_dot_offset);

    (start_a + seg_a * param_a, start_b + seg_b * param_b)
}

/// Solves for the parametric positions `(s, t)` of the closest points on
/// two proper (non-degenerate) segments.
///
/// Near-parallel segments skip the ill-conditioned division by picking
/// `s = 0` and projecting onto segment B directly.
fn closest_segment_parameters(
    len_a_sq: f32,
    len_b_sq: f32,
    a_dot_b: f32,
    a_dot_offset: f32,
    b_dot_offset: f32,
) -> (f32, f32) {
    let denom = len_a_sq * len_b_sq - a_dot_b * a_dot_b;

    let (mut param_a, mut param_b) = if denom.abs() > ZERO_TOLERANCE {
        // Infinite-line solution of the 2x2 system.
        (
            (a_dot_b * b_dot_offset - a_dot_offset * len_b_sq) / denom,
            (len_a_sq * b_dot_offset - a_dot_b * a_dot_offset) / denom,
        )
    } else {
        // Parallel lines: anchor at A's start and project onto B.
        (0.0, b_dot_offset / len_b_sq)
    };

    // Both parameters inside [0,1]: true interior closest points.
    if (0.0..=1.0).contains(&param_a) && (0.0..=1.0).contains(&param_b) {
        return (param_a, param_b);
    }

    // Otherwise the closest point lies on at least one segment endpoint.
    // Clamp and refine each parameter against the other until both are
    // consistent with their clamped ranges.
    param_a = param_a.clamp(0.0, 1.0);
    param_b = ((b_dot_offset + a_dot_b * param_a) / len_b_sq).clamp(0.0, 1.0);
    param_a = ((-a_dot_offset + a_dot_b * param_b) / len_a_sq).clamp(0.0, 1.0);

    (param_a, param_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    fn assert_vec3_near(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < TOLERANCE,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_point_projects_onto_segment_interior() {
        let closest = closest_point_on_segment(
            Vec3::new(5.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        );
        assert_vec3_near(closest, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_point_clamps_to_segment_ends() {
        let start = Vec3::new(0.0, 0.0, 0.0);
        let end = Vec3::new(10.0, 0.0, 0.0);

        let before = closest_point_on_segment(Vec3::new(-3.0, 1.0, 0.0), start, end);
        assert_vec3_near(before, start);

        let after = closest_point_on_segment(Vec3::new(14.0, -2.0, 0.0), start, end);
        assert_vec3_near(after, end);
    }

    #[test]
    fn test_zero_length_segment_returns_start() {
        let start = Vec3::new(1.0, 2.0, 3.0);

        let closest = closest_point_on_segment(Vec3::new(9.0, 9.0, 9.0), start, start);
        assert_eq!(closest, start);

        // Query point coinciding with the degenerate segment.
        let closest = closest_point_on_segment(start, start, start);
        assert_eq!(closest, start);
    }

    #[test]
    fn test_perpendicular_skew_segments() {
        // A runs along X at y=0, B runs along Z at y=4 above A's midpoint.
        // Analytic closest pair: (5,0,0) and (5,4,0).
        let (on_a, on_b) = closest_point_segments(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 4.0, -3.0),
            Vec3::new(5.0, 4.0, 3.0),
        );
        assert_vec3_near(on_a, Vec3::new(5.0, 0.0, 0.0));
        assert_vec3_near(on_b, Vec3::new(5.0, 4.0, 0.0));
    }

    #[test]
    fn test_parallel_segments() {
        // Overlapping parallel segments one unit apart. The anchor rule
        // picks A's start; B's closest point is directly below it.
        let (on_a, on_b) = closest_point_segments(
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(8.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        );
        assert_vec3_near(on_a, Vec3::new(2.0, 1.0, 0.0));
        assert_vec3_near(on_b, Vec3::new(2.0, 0.0, 0.0));
        assert!((on_a - on_b).length() - 1.0 < TOLERANCE);
    }

    #[test]
    fn test_both_segments_degenerate() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let (on_a, on_b) = closest_point_segments(a, a, b, b);
        assert_eq!(on_a, a);
        assert_eq!(on_b, b);
    }

    #[test]
    fn test_one_segment_degenerate() {
        let point = Vec3::new(5.0, 3.0, 0.0);
        let (on_a, on_b) = closest_point_segments(
            point,
            point,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        );
        assert_eq!(on_a, point);
        assert_vec3_near(on_b, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_closest_pair_on_endpoints() {
        // Segments pointing away from each other: closest pair must be the
        // facing endpoints, which only the clamp-and-refine pass finds.
        let (on_a, on_b) = closest_point_segments(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(8.0, 1.0, 0.0),
        );
        assert_vec3_near(on_a, Vec3::new(0.0, 0.0, 0.0));
        assert_vec3_near(on_b, Vec3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn test_crossing_segments_share_point() {
        // Segments crossing at the origin in the XZ plane.
        let (on_a, on_b) = closest_point_segments(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert_vec3_near(on_a, Vec3::ZERO);
        assert_vec3_near(on_b, Vec3::ZERO);
    }
}
