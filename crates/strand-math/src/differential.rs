//! Screen-space partial derivatives carried alongside a shading quantity.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Partial derivatives of a quantity with respect to a one-pixel step in
/// screen-space x and y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Differential<T> {
    pub dx: T,
    pub dy: T,
}

impl<T> Differential<T> {
    pub const fn new(dx: T, dy: T) -> Self {
        Self { dx, dy }
    }

    /// Apply `f` to both components.
    #[inline]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Differential<U> {
        Differential {
            dx: f(self.dx),
            dy: f(self.dy),
        }
    }
}

impl<T: Default> Differential<T> {
    /// Both components zero: the value does not vary across the pixel footprint.
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }
}

impl<T: Add<Output = T>> Add for Differential<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Differential<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            dx: self.dx - rhs.dx,
            dy: self.dy - rhs.dy,
        }
    }
}

impl<T: Neg<Output = T>> Neg for Differential<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

impl<T: Mul<f32, Output = T>> Mul<f32> for Differential<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self {
            dx: self.dx * rhs,
            dy: self.dy * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn test_zero() {
        let d: Differential<f32> = Differential::zero();
        assert_eq!(d.dx, 0.0);
        assert_eq!(d.dy, 0.0);

        let v: Differential<glam::Vec3> = Differential::zero();
        assert_eq!(v.dx, glam::Vec3::ZERO);
        assert_eq!(v.dy, glam::Vec3::ZERO);
    }

    #[test]
    fn test_arithmetic() {
        let a = Differential::new(vec3(1.0, 0.0, 0.0), vec3(0.0, 2.0, 0.0));
        let b = Differential::new(vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, 3.0));

        let sum = a + b;
        assert_eq!(sum.dx, vec3(1.0, 1.0, 0.0));
        assert_eq!(sum.dy, vec3(0.0, 2.0, 3.0));

        let scaled = a * 2.0;
        assert_eq!(scaled.dx, vec3(2.0, 0.0, 0.0));
        assert_eq!(scaled.dy, vec3(0.0, 4.0, 0.0));

        assert_eq!((a - a), Differential::zero());
        assert_eq!((-a).dx, vec3(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_map() {
        let d = Differential::new(vec3(3.0, 4.0, 0.0), vec3(0.0, 0.0, 2.0));
        let lengths = d.map(|v| v.length());
        assert_eq!(lengths, Differential::new(5.0, 2.0));
    }
}
