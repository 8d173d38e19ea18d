//! Per-hit shading context.

use strand_core::SegmentId;
use strand_math::{Differential, Point3, Ray, Vector3};
use strand_scene::Scene;

/// A ray hit on a curve segment, as reported by intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    pub prim: u32,
    pub segment: SegmentId,
    /// Parametric position along the segment, in `[0, 1]`.
    pub u: f32,
    /// Ray distance to the hit.
    pub t: f32,
}

/// Local context at a ray hit. Lives on the stack of one ray evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingPoint {
    pub prim: u32,
    /// `None` when the hit is not on a curve.
    pub curve_segment: Option<SegmentId>,
    pub u: f32,
    pub position: Point3,
    /// Unit direction from the hit back toward the ray origin.
    pub view_direction: Vector3,
    /// Derivative of position with respect to `u`.
    pub dpdu: Vector3,
    /// Change of `u` per pixel step.
    #[cfg(feature = "ray-differentials")]
    pub du: Differential<f32>,
}

impl ShadingPoint {
    /// A point on curve segment `segment` at parameter `u`.
    pub fn curve(
        prim: u32,
        segment: SegmentId,
        u: f32,
        view_direction: Vector3,
        dpdu: Vector3,
    ) -> Self {
        Self {
            prim,
            curve_segment: Some(segment),
            u,
            position: Point3::ZERO,
            view_direction,
            dpdu,
            #[cfg(feature = "ray-differentials")]
            du: Differential::zero(),
        }
    }

    /// A point on a non-curve primitive.
    pub fn surface(prim: u32, position: Point3, view_direction: Vector3) -> Self {
        Self {
            prim,
            curve_segment: None,
            u: 0.0,
            position,
            view_direction,
            dpdu: Vector3::ZERO,
            #[cfg(feature = "ray-differentials")]
            du: Differential::zero(),
        }
    }

    #[cfg(feature = "ray-differentials")]
    pub fn with_du(mut self, du: Differential<f32>) -> Self {
        self.du = du;
        self
    }

    /// Build the shading point for `hit` from the ray that produced it.
    ///
    /// The tangent is the segment's chord. With ray differentials enabled,
    /// the ray footprint is transferred onto the plane facing the ray and
    /// projected on the tangent to give `du`.
    pub fn from_curve_hit(scene: &Scene, ray: &Ray, hit: &CurveHit) -> Self {
        let dpdu = scene.topology().segment_tangent(hit.segment);
        let point = Self {
            position: ray.at(hit.t),
            ..Self::curve(hit.prim, hit.segment, hit.u, -ray.direction, dpdu)
        };

        #[cfg(feature = "ray-differentials")]
        let point = {
            let dp: Differential<Vector3> = ray.transfer(hit.t, -ray.direction);
            let inv_len2 = 1.0 / dpdu.length_squared();
            point.with_du(dp.map(|d| d.dot(dpdu) * inv_len2))
        };

        point
    }

    pub fn is_curve(&self) -> bool {
        self.curve_segment.is_some()
    }

    /// Screen-space derivative of `u`; zero when differentials are compiled out.
    #[inline]
    pub fn du(&self) -> Differential<f32> {
        #[cfg(feature = "ray-differentials")]
        {
            self.du
        }
        #[cfg(not(feature = "ray-differentials"))]
        {
            Differential::zero()
        }
    }
}
