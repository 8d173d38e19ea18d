// Integration tests for curve attribute resolution and hair shading normals

use strand_core::{AttributeOffset, KernelConfig, SegmentId, StrandError};
use strand_kernel::*;
use strand_math::{vec3, Differential, Ray, Vec3};
use strand_scene::{AttributeElement, AttributeKind, CurveKey, Scene, SceneBuilder};

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Two strands: a straight one along +x (3 keys) and a bent one (4 keys).
fn hair() -> Scene {
    let mut builder = SceneBuilder::new();
    builder
        .add_curve(
            &[
                CurveKey::new(vec3(0.0, 0.0, 0.0), 0.05),
                CurveKey::new(vec3(1.0, 0.0, 0.0), 0.04),
                CurveKey::new(vec3(2.0, 0.0, 0.0), 0.03),
            ],
            0,
        )
        .unwrap();
    builder
        .add_curve(
            &[
                CurveKey::new(vec3(0.0, 1.0, 0.0), 0.05),
                CurveKey::new(vec3(0.5, 1.5, 0.0), 0.04),
                CurveKey::new(vec3(0.5, 2.5, 0.5), 0.03),
                CurveKey::new(vec3(0.0, 3.0, 1.0), 0.02),
            ],
            1,
        )
        .unwrap();

    builder
        .add_attribute(
            "color",
            AttributeElement::PerKey,
            vec![
                vec3(1.0, 0.0, 0.0),
                vec3(0.0, 1.0, 0.0),
                vec3(0.0, 0.0, 1.0),
                vec3(0.2, 0.2, 0.2),
                vec3(0.4, 0.4, 0.4),
                vec3(0.6, 0.6, 0.6),
                vec3(0.8, 0.8, 0.8),
            ],
        )
        .unwrap()
        .add_attribute(
            "intercept",
            AttributeElement::PerKey,
            vec![0.0f32, 0.5, 1.0, 0.0, 0.3, 0.6, 1.0],
        )
        .unwrap()
        .add_attribute(
            "random",
            AttributeElement::PerSegment,
            vec![0.11f32, 0.22, 0.33, 0.44, 0.55],
        )
        .unwrap();
    builder.build().unwrap()
}

fn offset(scene: &Scene, name: &str) -> AttributeOffset {
    scene.find_attribute(name).unwrap().offset
}

fn curve_point(scene: &Scene, segment: u32, u: f32) -> ShadingPoint {
    let segment = SegmentId::new(segment);
    ShadingPoint::curve(0, segment, u, vec3(0.0, 0.0, 1.0), curve_tangent(scene, segment))
}

#[test]
fn integration_endpoints_are_exact() {
    let scene = hair();
    let off = offset(&scene, "color");
    for seg in 0..5 {
        let keys = scene.topology().segment(SegmentId::new(seg));
        let f0 = scene.attributes().float3.fetch(off.element(keys.key_start.value()));
        let f1 = scene.attributes().float3.fetch(off.element(keys.key_end.value()));

        let (at0, _) = resolve_curve_attribute_vector(
            &scene,
            AttributeElement::PerKey,
            off,
            &curve_point(&scene, seg, 0.0),
            false,
            false,
        );
        let (at1, _) = resolve_curve_attribute_vector(
            &scene,
            AttributeElement::PerKey,
            off,
            &curve_point(&scene, seg, 1.0),
            false,
            false,
        );
        assert_eq!(at0, f0);
        assert_eq!(at1, f1);
    }
}

#[test]
fn integration_scalar_is_monotonic_between_keys() {
    let scene = hair();
    let off = offset(&scene, "intercept");
    let mut previous = f32::NEG_INFINITY;
    for step in 0..=20 {
        let u = step as f32 / 20.0;
        let (v, _) = resolve_curve_attribute_scalar(
            &scene,
            AttributeElement::PerKey,
            off,
            &curve_point(&scene, 3, u),
            false,
            false,
        );
        assert!(v >= previous, "intercept decreased at u = {u}");
        previous = v;
    }
    assert!(approx_eq(previous, 0.6));
}

#[test]
fn integration_per_segment_is_constant_with_zero_differentials() {
    let scene = hair();
    let off = offset(&scene, "random");
    for seg in 0..5 {
        let expected = [0.11, 0.22, 0.33, 0.44, 0.55][seg as usize];
        for u in [0.0, 0.25, 0.9, 1.0] {
            let p = curve_point(&scene, seg, u);
            #[cfg(feature = "ray-differentials")]
            let p = p.with_du(Differential::new(3.0, -1.0));
            let (v, d) = resolve_curve_attribute_scalar(
                &scene,
                AttributeElement::PerSegment,
                off,
                &p,
                true,
                true,
            );
            assert_eq!(v, expected);
            assert_eq!(d, Differential::zero());
        }
    }
}

#[cfg(feature = "ray-differentials")]
#[test]
fn integration_differential_is_linear_in_du() {
    let scene = hair();
    let off = offset(&scene, "color");
    for du_dx in [-4.0f32, 0.001, 0.5, 2.0] {
        let p = curve_point(&scene, 4, 0.3).with_du(Differential::new(du_dx, 7.0));
        let keys = scene.topology().segment(SegmentId::new(4));
        let f0 = scene.attributes().float3.fetch(off.element(keys.key_start.value()));
        let f1 = scene.attributes().float3.fetch(off.element(keys.key_end.value()));

        let (_, d) = resolve_curve_attribute_vector(
            &scene,
            AttributeElement::PerKey,
            off,
            &p,
            true,
            true,
        );
        assert_eq!(d.dx, (f1 - f0) * du_dx);
        assert_eq!(d.dy, Vec3::ZERO);
    }
}

#[cfg(feature = "ray-differentials")]
#[test]
fn integration_worked_example() {
    let scene = hair();
    let p = curve_point(&scene, 0, 0.5).with_du(Differential::new(2.0, 0.0));
    let (v, d) = resolve_curve_attribute_vector(
        &scene,
        AttributeElement::PerKey,
        offset(&scene, "color"),
        &p,
        true,
        true,
    );
    assert_eq!(v, vec3(0.5, 0.5, 0.0));
    assert_eq!(d.dx, vec3(-2.0, 2.0, 0.0));
    assert_eq!(d.dy, vec3(0.0, 0.0, 0.0));
}

#[test]
fn integration_none_element_falls_back_to_zero() {
    let scene = hair();
    for offset in [0, 3, 999_999] {
        let p = curve_point(&scene, 1, 0.5);
        let (s, ds) = resolve_curve_attribute_scalar(
            &scene,
            AttributeElement::None,
            AttributeOffset::new(offset),
            &p,
            true,
            true,
        );
        let (v, dv) = resolve_curve_attribute_vector(
            &scene,
            AttributeElement::None,
            AttributeOffset::new(offset),
            &p,
            true,
            true,
        );
        assert_eq!(s, 0.0);
        assert_eq!(ds, Differential::zero());
        assert_eq!(v, Vec3::ZERO);
        assert_eq!(dv, Differential::zero());
    }
}

#[test]
fn integration_shading_normal_is_unit_on_curves() {
    let scene = hair();
    let views = [
        vec3(0.0, 0.0, 1.0),
        vec3(0.3, -0.4, 0.8),
        vec3(-1.0, 0.2, 0.1),
        vec3(0.1, 1.0, -0.5),
    ];
    for seg in 0..5 {
        for view in views {
            for mix in [0.0, 0.25, 0.5, 1.0] {
                let segment = SegmentId::new(seg);
                let dpdu = curve_tangent(&scene, segment);
                let p = ShadingPoint::curve(0, segment, 0.5, view.normalize(), dpdu);
                let n = evaluate_curve_shading_normal(&p, mix);
                assert!(
                    approx_eq(n.length(), 1.0),
                    "|n| = {} for seg {seg}, mix {mix}",
                    n.length()
                );
            }
        }
    }
}

#[test]
fn integration_shading_normal_sentinel_off_curve() {
    let p = ShadingPoint::surface(4, vec3(1.0, 2.0, 3.0), vec3(0.0, 0.0, 1.0));
    for mix in [0.0, 0.3, 1.0] {
        assert_eq!(evaluate_curve_shading_normal(&p, mix), Vec3::ZERO);
    }
}

#[test]
fn integration_calls_are_bit_identical() {
    let scene = hair();
    let p = curve_point(&scene, 2, 0.37);
    #[cfg(feature = "ray-differentials")]
    let p = p.with_du(Differential::new(0.123, 0.456));
    let off = offset(&scene, "color");

    let a = resolve_curve_attribute_vector(&scene, AttributeElement::PerKey, off, &p, true, true);
    let b = resolve_curve_attribute_vector(&scene, AttributeElement::PerKey, off, &p, true, true);
    assert_eq!(a.0.to_array().map(f32::to_bits), b.0.to_array().map(f32::to_bits));
    assert_eq!(a.1.dx.to_array().map(f32::to_bits), b.1.dx.to_array().map(f32::to_bits));

    let n1 = evaluate_curve_shading_normal(&p, 0.8);
    let n2 = evaluate_curve_shading_normal(&p, 0.8);
    assert_eq!(n1.to_array().map(f32::to_bits), n2.to_array().map(f32::to_bits));
}

#[test]
fn integration_batch_matches_serial() {
    let scene = hair();
    let config = KernelConfig::with_normalmix(0.6);
    let nodes = [
        AttributeNode::new("color", AttributeKind::Float3).with_derivatives(),
        AttributeNode::new("random", AttributeKind::Float),
        AttributeNode::new("missing", AttributeKind::Float4),
    ];

    let hits: Vec<(Ray, CurveHit)> = (0..5u32)
        .flat_map(|seg| {
            [0.1f32, 0.5, 0.9].map(move |u| {
                let ray = Ray::new(vec3(0.0, 0.0, 8.0), vec3(0.1, 0.2, -1.0)).with_differentials(
                    Differential::new(vec3(0.01, 0.0, 0.0), vec3(0.0, 0.01, 0.0)),
                    Differential::zero(),
                );
                let hit = CurveHit {
                    prim: 0,
                    segment: SegmentId::new(seg),
                    u,
                    t: 8.0,
                };
                (ray, hit)
            })
        })
        .collect();

    let samples = shade_curve_hits(&scene, &config, &nodes, &hits);
    assert_eq!(samples.len(), hits.len());

    for ((ray, hit), sample) in hits.iter().zip(&samples) {
        let point = ShadingPoint::from_curve_hit(&scene, ray, hit);
        assert_eq!(sample.point, point);
        assert_eq!(sample.normal, curve_shading_normal(&point, &config));
        assert_eq!(sample.thickness, curve_thickness(&scene, &point));
        for (node, input) in nodes.iter().zip(&sample.inputs) {
            assert_eq!(*input, eval_attribute_node(&scene, node, &point));
            assert_eq!(input.kind(), node.kind);
        }
        assert_eq!(
            sample.inputs[2],
            AttributeOutput::Float4(Default::default(), Differential::zero())
        );
    }
}

#[test]
fn integration_coincident_keys_never_reach_shading() {
    let mut builder = SceneBuilder::new();
    let origin = CurveKey::new(Vec3::ZERO, 0.01);
    assert!(matches!(
        builder.add_curve(&[origin, origin], 0),
        Err(StrandError::DegenerateSegment { segment: 0 })
    ));

    // A short but non-degenerate tip still shades to finite values
    builder
        .add_curve(&[origin, CurveKey::new(vec3(0.0, 1e-3, 0.0), 0.005)], 0)
        .unwrap();
    let scene = builder.build().unwrap();

    let ray = Ray::new(vec3(0.0, 5e-4, 4.0), vec3(0.0, 0.0, -1.0)).with_differentials(
        Differential::new(vec3(0.01, 0.0, 0.0), vec3(0.0, 0.01, 0.0)),
        Differential::zero(),
    );
    let hit = CurveHit {
        prim: 0,
        segment: SegmentId::new(0),
        u: 0.5,
        t: 4.0,
    };
    let samples = shade_curve_hits(&scene, &KernelConfig::default(), &[], &[(ray, hit)]);

    assert!(samples[0].normal.is_finite());
    assert!(approx_eq(samples[0].normal.length(), 1.0));
    assert!(samples[0].point.du().dx.is_finite());
    assert!(samples[0].point.du().dy.is_finite());
}
