//! Curve attribute resolution.
//!
//! `PerSegment` attributes are constant along a segment. `PerKey` attributes
//! are linearly interpolated between the segment's two keys by `u`, and
//! carry an x differential of `du.dx * (f1 - f0)`. The y differential is
//! always zero: curves are treated as one-dimensional in screen space.

use strand_core::{AttributeOffset, SegmentId};
use strand_math::{Differential, Vec3, Vec4};
use strand_scene::{AttributeElement, AttributeKind, AttributeValue, Scene};

use crate::shading::ShadingPoint;

/// Interpolate an attribute of type `T` at `point`.
///
/// The y differential of a curve attribute is always zero, so `_want_dy`
/// only exists for symmetry with surface primitives.
#[inline]
pub fn resolve_curve_attribute<T: AttributeValue>(
    scene: &Scene,
    elem: AttributeElement,
    offset: AttributeOffset,
    point: &ShadingPoint,
    want_dx: bool,
    _want_dy: bool,
) -> (T, Differential<T>) {
    let table = T::table(scene.attributes());

    match elem {
        AttributeElement::None => (T::default(), Differential::zero()),
        AttributeElement::PerSegment => {
            let Some(segment) = curve_segment(point, elem) else {
                return (T::default(), Differential::zero());
            };
            (table.fetch(offset.element(segment.value())), Differential::zero())
        }
        AttributeElement::PerKey => {
            let Some(segment) = curve_segment(point, elem) else {
                return (T::default(), Differential::zero());
            };
            debug_assert!(
                (0.0..=1.0).contains(&point.u),
                "curve parameter u = {} outside [0, 1]",
                point.u
            );
            let keys = scene.topology().segment(segment);
            let f0 = table.fetch(offset.element(keys.key_start.value()));
            let f1 = table.fetch(offset.element(keys.key_end.value()));

            let value = f0 * (1.0 - point.u) + f1 * point.u;
            (value, per_key_differential(point, f0, f1, want_dx))
        }
    }
}

#[inline]
fn curve_segment(point: &ShadingPoint, elem: AttributeElement) -> Option<SegmentId> {
    debug_assert!(
        point.curve_segment.is_some(),
        "{elem} attribute resolved on a shading point without a curve segment"
    );
    point.curve_segment
}

/// Zero whenever `du` is, which includes builds without ray differentials.
#[inline]
fn per_key_differential<T: AttributeValue>(
    point: &ShadingPoint,
    f0: T,
    f1: T,
    want_dx: bool,
) -> Differential<T> {
    let du = point.du();
    if !want_dx || du.dx == 0.0 {
        return Differential::zero();
    }
    Differential::new((f1 - f0) * du.dx, T::default())
}

/// Float attribute at `point`.
#[inline]
pub fn resolve_curve_attribute_scalar(
    scene: &Scene,
    elem: AttributeElement,
    offset: AttributeOffset,
    point: &ShadingPoint,
    want_dx: bool,
    want_dy: bool,
) -> (f32, Differential<f32>) {
    resolve_curve_attribute::<f32>(scene, elem, offset, point, want_dx, want_dy)
}

/// Float3 attribute at `point`, interpolated per component.
#[inline]
pub fn resolve_curve_attribute_vector(
    scene: &Scene,
    elem: AttributeElement,
    offset: AttributeOffset,
    point: &ShadingPoint,
    want_dx: bool,
    want_dy: bool,
) -> (Vec3, Differential<Vec3>) {
    resolve_curve_attribute::<Vec3>(scene, elem, offset, point, want_dx, want_dy)
}

/// Float4 (colour with alpha) attribute at `point`.
#[inline]
pub fn resolve_curve_attribute_float4(
    scene: &Scene,
    elem: AttributeElement,
    offset: AttributeOffset,
    point: &ShadingPoint,
    want_dx: bool,
    want_dy: bool,
) -> (Vec4, Differential<Vec4>) {
    resolve_curve_attribute::<Vec4>(scene, elem, offset, point, want_dx, want_dy)
}

/// A material input reading a named attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNode {
    pub name: String,
    /// Type the material expects; stored data is converted to it.
    pub kind: AttributeKind,
    pub want_dx: bool,
    pub want_dy: bool,
}

impl AttributeNode {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            want_dx: false,
            want_dy: false,
        }
    }

    pub fn with_derivatives(mut self) -> Self {
        self.want_dx = true;
        self.want_dy = true;
        self
    }
}

/// Resolved value of an [`AttributeNode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeOutput {
    Float(f32, Differential<f32>),
    Float3(Vec3, Differential<Vec3>),
    Float4(Vec4, Differential<Vec4>),
}

impl AttributeOutput {
    fn zero(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Float => AttributeOutput::Float(0.0, Differential::zero()),
            AttributeKind::Float3 => AttributeOutput::Float3(Vec3::ZERO, Differential::zero()),
            AttributeKind::Float4 => AttributeOutput::Float4(Vec4::ZERO, Differential::zero()),
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeOutput::Float(..) => AttributeKind::Float,
            AttributeOutput::Float3(..) => AttributeKind::Float3,
            AttributeOutput::Float4(..) => AttributeKind::Float4,
        }
    }

    /// Convert to `kind`: floats splat, vectors average to a float, alpha is
    /// dropped or set to 1 (with zero derivative).
    pub fn convert(self, kind: AttributeKind) -> Self {
        use AttributeKind as K;
        use AttributeOutput as O;

        match (self, kind) {
            (O::Float(v, d), K::Float3) => O::Float3(Vec3::splat(v), d.map(Vec3::splat)),
            (O::Float(v, d), K::Float4) => O::Float4(
                Vec3::splat(v).extend(1.0),
                d.map(|x| Vec3::splat(x).extend(0.0)),
            ),
            (O::Float3(v, d), K::Float) => O::Float(average(v), d.map(average)),
            (O::Float3(v, d), K::Float4) => O::Float4(v.extend(1.0), d.map(|x| x.extend(0.0))),
            (O::Float4(v, d), K::Float) => {
                O::Float(average(v.truncate()), d.map(|x| average(x.truncate())))
            }
            (O::Float4(v, d), K::Float3) => O::Float3(v.truncate(), d.map(Vec4::truncate)),
            (same, _) => same,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            AttributeOutput::Float(v, _) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float3(&self) -> Option<Vec3> {
        match self {
            AttributeOutput::Float3(v, _) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float4(&self) -> Option<Vec4> {
        match self {
            AttributeOutput::Float4(v, _) => Some(*v),
            _ => None,
        }
    }
}

#[inline]
fn average(v: Vec3) -> f32 {
    (v.x + v.y + v.z) * (1.0 / 3.0)
}

/// Evaluate a material attribute input at `point`.
///
/// An attribute the scene does not define, or any attribute on a non-curve
/// point, resolves to zero of the requested kind.
pub fn eval_attribute_node(
    scene: &Scene,
    node: &AttributeNode,
    point: &ShadingPoint,
) -> AttributeOutput {
    let Some(desc) = scene.find_attribute(&node.name) else {
        return AttributeOutput::zero(node.kind);
    };
    if !point.is_curve() {
        return AttributeOutput::zero(node.kind);
    }

    let (elem, offset) = (desc.element, desc.offset);
    let (dx, dy) = (node.want_dx, node.want_dy);
    let out = match desc.kind {
        AttributeKind::Float => {
            let (v, d) = resolve_curve_attribute_scalar(scene, elem, offset, point, dx, dy);
            AttributeOutput::Float(v, d)
        }
        AttributeKind::Float3 => {
            let (v, d) = resolve_curve_attribute_vector(scene, elem, offset, point, dx, dy);
            AttributeOutput::Float3(v, d)
        }
        AttributeKind::Float4 => {
            let (v, d) = resolve_curve_attribute_float4(scene, elem, offset, point, dx, dy);
            AttributeOutput::Float4(v, d)
        }
    };
    out.convert(node.kind)
}
