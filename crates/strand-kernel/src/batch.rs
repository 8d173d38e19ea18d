//! Parallel shading of many curve hits against one frozen scene.

use rayon::prelude::*;
use strand_core::KernelConfig;
use strand_math::{Ray, Vector3};
use strand_scene::Scene;

use crate::attribute::{eval_attribute_node, AttributeNode, AttributeOutput};
use crate::curve::{curve_shading_normal, curve_thickness};
use crate::shading::{CurveHit, ShadingPoint};

/// Everything the material layer needs from one curve hit.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveShadingSample {
    pub point: ShadingPoint,
    pub normal: Vector3,
    pub thickness: f32,
    /// One output per requested node, in request order.
    pub inputs: Vec<AttributeOutput>,
}

/// Shade every `(ray, hit)` pair. Output order matches input order.
///
/// Hits are independent: each worker reads the shared scene and config and
/// owns its shading point.
pub fn shade_curve_hits(
    scene: &Scene,
    config: &KernelConfig,
    nodes: &[AttributeNode],
    hits: &[(Ray, CurveHit)],
) -> Vec<CurveShadingSample> {
    log::debug!(
        "shading {} curve hits with {} attribute inputs (normalmix {})",
        hits.len(),
        nodes.len(),
        config.curve.normalmix
    );

    hits.par_iter()
        .map(|(ray, hit)| {
            let point = ShadingPoint::from_curve_hit(scene, ray, hit);
            CurveShadingSample {
                normal: curve_shading_normal(&point, config),
                thickness: curve_thickness(scene, &point),
                inputs: nodes
                    .iter()
                    .map(|node| eval_attribute_node(scene, node, &point))
                    .collect(),
                point,
            }
        })
        .collect()
}
