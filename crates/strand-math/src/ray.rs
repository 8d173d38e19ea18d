use crate::{Differential, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A ray with optional screen-space differentials of its origin and direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
    /// Change of the origin per pixel step.
    pub dp: Differential<Vector3>,
    /// Change of the direction per pixel step.
    pub dd: Differential<Vector3>,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            dp: Differential::zero(),
            dd: Differential::zero(),
        }
    }

    pub fn with_differentials(
        mut self,
        dp: Differential<Vector3>,
        dd: Differential<Vector3>,
    ) -> Self {
        self.dp = dp;
        self.dd = dd;
        self
    }

    /// Point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }

    /// Transfer the position differential to a hit at distance `t` on a
    /// surface with geometric normal `ng`.
    ///
    /// The result lies in the tangent plane of the hit. A ray grazing the
    /// surface (`direction · ng == 0`) yields non-finite components.
    pub fn transfer(&self, t: f32, ng: Vector3) -> Differential<Vector3> {
        let tmp = self.direction / self.direction.dot(ng);
        let moved = self.dp + self.dd * t;
        moved.map(|d| d - tmp * d.dot(ng))
    }
}
