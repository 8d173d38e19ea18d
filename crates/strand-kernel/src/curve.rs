//! Hair shading geometry.

use strand_core::{KernelConfig, SegmentId};
use strand_math::Vector3;
use strand_scene::Scene;

use crate::shading::ShadingPoint;

/// View-dependent shading normal for a curve hit.
///
/// Removes `normalmix` times the tangent component of the view vector `I`,
/// so a thin strand lights like a cylinder facing the viewer. Returns the
/// zero vector when `point` is not on a curve; callers must then fall back
/// to the geometric normal.
///
/// The result is undefined for a zero-length tangent, or when `I` is
/// parallel to the tangent with `normalmix == 1`.
#[inline]
pub fn evaluate_curve_shading_normal(point: &ShadingPoint, normalmix: f32) -> Vector3 {
    if point.curve_segment.is_none() {
        return Vector3::ZERO;
    }
    debug_assert!(
        (0.0..=1.0).contains(&normalmix),
        "normalmix = {} outside [0, 1]",
        normalmix
    );

    let i = point.view_direction;
    let dpdu = point.dpdu;
    let len2 = dpdu.length_squared();
    debug_assert!(len2 > f32::MIN_POSITIVE, "degenerate curve tangent {dpdu}");

    let tangent_normal = -(-i - dpdu * (dpdu.dot(-i) * normalmix / len2));
    tangent_normal.normalize()
}

/// [`evaluate_curve_shading_normal`] with the scene-wide blend factor.
#[inline]
pub fn curve_shading_normal(point: &ShadingPoint, config: &KernelConfig) -> Vector3 {
    evaluate_curve_shading_normal(point, config.curve.normalmix)
}

/// Strand thickness (twice the interpolated key radius) at `point`, or 0
/// off curves.
#[inline]
pub fn curve_thickness(scene: &Scene, point: &ShadingPoint) -> f32 {
    let Some(segment) = point.curve_segment else {
        return 0.0;
    };
    let (k0, k1) = scene.topology().segment_keys(segment);
    let r = (k1.radius - k0.radius) * point.u + k0.radius;
    r * 2.0
}

/// Tangent of a linear segment (derivative of position with respect to `u`).
#[inline]
pub fn curve_tangent(scene: &Scene, segment: SegmentId) -> Vector3 {
    scene.topology().segment_tangent(segment)
}
