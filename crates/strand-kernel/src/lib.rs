//! Curve shading kernel.
//!
//! Runs once a ray hit and its parametric position along a curve segment are
//! known:
//!
//! - [`attribute`] - interpolate per-key / per-segment attributes and their
//!   screen-space differentials
//! - [`curve`] - view-dependent hair shading normal and strand thickness
//! - [`shading`] - the per-hit [`ShadingPoint`]
//! - [`batch`] - evaluate many hits in parallel over a shared scene
//!
//! Every function here is pure. Contract violations (missing segment,
//! `u` or `normalmix` outside `[0, 1]`, zero-length tangent) are caught by
//! debug assertions only.

pub mod attribute;
pub mod batch;
pub mod curve;
pub mod shading;

pub use attribute::{
    eval_attribute_node, resolve_curve_attribute, resolve_curve_attribute_float4,
    resolve_curve_attribute_scalar, resolve_curve_attribute_vector, AttributeNode, AttributeOutput,
};
pub use batch::{shade_curve_hits, CurveShadingSample};
pub use curve::{
    curve_shading_normal, curve_tangent, curve_thickness, evaluate_curve_shading_normal,
};
pub use shading::{CurveHit, ShadingPoint};
