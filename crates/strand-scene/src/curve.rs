//! Curve topology: strands, their segments, and control points.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use strand_core::error::{Result, StrandError};
use strand_core::traits::Validate;
use strand_core::{CurveId, KeyIndex, SegmentId};
use strand_math::{Aabb3, Point3, Vector3};

/// Smallest squared segment length with a usable tangent.
pub const MIN_SEGMENT_LENGTH_SQUARED: f32 = f32::MIN_POSITIVE;

/// A control point of a strand. Layout matches a packed `float4`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct CurveKey {
    pub position: Point3,
    pub radius: f32,
}

impl CurveKey {
    pub fn new(position: Point3, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// The two keys bounding a linear curve segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Pod, Zeroable)]
pub struct CurveSegment {
    pub key_start: KeyIndex,
    pub key_end: KeyIndex,
}

/// A strand: a run of consecutive keys and the segments between them.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Curve {
    pub first_key: KeyIndex,
    pub num_keys: u32,
    pub first_segment: SegmentId,
    pub shader: u32,
}

impl Curve {
    pub fn num_segments(&self) -> u32 {
        self.num_keys.saturating_sub(1)
    }

    /// Segment ids belonging to this strand, root to tip.
    pub fn segments(&self) -> impl Iterator<Item = SegmentId> {
        let first = self.first_segment.value();
        (first..first + self.num_segments()).map(SegmentId::new)
    }
}

/// Flat tables of strands, segments and keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveTopology {
    pub curves: Vec<Curve>,
    pub segments: Vec<CurveSegment>,
    pub keys: Vec<CurveKey>,
}

impl CurveTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_curves(&self) -> usize {
        self.curves.len()
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    /// Append a strand, deriving one segment per consecutive key pair.
    ///
    /// Consecutive keys must not coincide: every segment needs a tangent.
    pub fn push_curve(&mut self, keys: &[CurveKey], shader: u32) -> Result<CurveId> {
        if keys.len() < 2 {
            return Err(StrandError::CurveTooShort { keys: keys.len() });
        }

        let curve_id = CurveId::new(self.curves.len() as u32);
        let first_key = self.keys.len() as u32;
        let first_segment = SegmentId::new(self.segments.len() as u32);

        if let Some(i) = keys.windows(2).position(|pair| is_degenerate(&pair[0], &pair[1])) {
            return Err(StrandError::DegenerateSegment {
                segment: first_segment.value() + i as u32,
            });
        }

        self.keys.extend_from_slice(keys);
        self.segments.extend((0..keys.len() as u32 - 1).map(|i| CurveSegment {
            key_start: KeyIndex::new(first_key + i),
            key_end: KeyIndex::new(first_key + i + 1),
        }));
        self.curves.push(Curve {
            first_key: KeyIndex::new(first_key),
            num_keys: keys.len() as u32,
            first_segment,
            shader,
        });

        Ok(curve_id)
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> CurveSegment {
        debug_assert!(
            id.index() < self.segments.len(),
            "segment {} out of range ({} segments)",
            id,
            self.segments.len()
        );
        self.segments[id.index()]
    }

    #[inline]
    pub fn key(&self, index: KeyIndex) -> CurveKey {
        debug_assert!(
            index.index() < self.keys.len(),
            "key {} out of range ({} keys)",
            index,
            self.keys.len()
        );
        self.keys[index.index()]
    }

    /// Both end keys of a segment.
    #[inline]
    pub fn segment_keys(&self, id: SegmentId) -> (CurveKey, CurveKey) {
        let segment = self.segment(id);
        (self.key(segment.key_start), self.key(segment.key_end))
    }

    /// Derivative of position with respect to `u` along a linear segment.
    #[inline]
    pub fn segment_tangent(&self, id: SegmentId) -> Vector3 {
        let (k0, k1) = self.segment_keys(id);
        k1.position - k0.position
    }

    /// Bounds of all keys, padded by their radii.
    pub fn bounds(&self) -> Option<Aabb3> {
        self.keys
            .iter()
            .map(|k| Aabb3::from_sphere(k.position, k.radius))
            .reduce(|a, b| a.merge(&b))
    }
}

impl Validate for CurveTopology {
    fn validate(&self) -> Result<()> {
        let num_keys = self.keys.len();

        // 1. Every segment references existing keys
        for (i, seg) in self.segments.iter().enumerate() {
            for key in [seg.key_start, seg.key_end] {
                if key.index() >= num_keys {
                    return Err(StrandError::InvalidKeyIndex {
                        segment: i as u32,
                        key: key.value(),
                        num_keys,
                    });
                }
            }
        }

        // 2. Strand ranges stay inside the key and segment tables
        for (i, curve) in self.curves.iter().enumerate() {
            if curve.num_keys < 2 {
                return Err(StrandError::CurveTooShort {
                    keys: curve.num_keys as usize,
                });
            }
            let key_end = curve.first_key.index() + curve.num_keys as usize;
            let seg_end = curve.first_segment.index() + curve.num_segments() as usize;
            if key_end > num_keys || seg_end > self.segments.len() {
                return Err(StrandError::Topology(format!(
                    "Curve {} spans keys {}..{} and segments {}..{}, \
                     beyond the tables ({} keys, {} segments)",
                    i,
                    curve.first_key.index(),
                    key_end,
                    curve.first_segment.index(),
                    seg_end,
                    num_keys,
                    self.segments.len()
                )));
            }
        }

        // 3. Every segment has a tangent
        for i in 0..self.segments.len() {
            let (k0, k1) = self.segment_keys(SegmentId::new(i as u32));
            if is_degenerate(&k0, &k1) {
                return Err(StrandError::DegenerateSegment { segment: i as u32 });
            }
        }

        Ok(())
    }
}

#[inline]
fn is_degenerate(k0: &CurveKey, k1: &CurveKey) -> bool {
    let len2 = (k1.position - k0.position).length_squared();
    len2.is_nan() || len2 <= MIN_SEGMENT_LENGTH_SQUARED
}
