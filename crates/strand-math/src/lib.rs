pub mod aabb;
pub mod differential;
pub mod ray;

pub use glam::{vec3, Vec3, Vec4};
pub use aabb::Aabb3;
pub use differential::Differential;
pub use ray::Ray;

pub type Point3 = Vec3;
pub type Vector3 = Vec3;
