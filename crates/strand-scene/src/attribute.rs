//! Typed attribute tables.
//!
//! Each attribute occupies a contiguous run of one table, starting at its
//! [`AttributeOffset`]. Element `i` of the attribute lives at `offset + i`.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use strand_core::AttributeOffset;
use strand_math::{Vec3, Vec4};

/// Storage granularity of an attribute relative to curve topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeElement {
    /// One value per curve segment, constant along the segment.
    PerSegment,
    /// One value per control point, interpolated along each segment.
    PerKey,
    /// Declared but not bound to data on this primitive.
    #[default]
    None,
}

impl AttributeElement {
    pub fn name(self) -> &'static str {
        match self {
            AttributeElement::PerSegment => "per-segment",
            AttributeElement::PerKey => "per-key",
            AttributeElement::None => "none",
        }
    }
}

impl fmt::Display for AttributeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar type of an attribute, selecting which table it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Float,
    Float3,
    Float4,
}

/// Immutable, contiguous run of attribute values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeTable<T> {
    values: Vec<T>,
}

impl<T: Copy> AttributeTable<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fetch the value at `index`.
    ///
    /// Indices come from validated scene topology, so an out-of-range index
    /// is a caller bug.
    #[inline]
    pub fn fetch(&self, index: usize) -> T {
        debug_assert!(
            index < self.values.len(),
            "attribute index {} out of range for table of {}",
            index,
            self.values.len()
        );
        self.values[index]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Append `values` and return the offset of the first one.
    pub(crate) fn append(&mut self, values: &[T]) -> AttributeOffset {
        let offset = AttributeOffset::new(self.values.len() as u32);
        self.values.extend_from_slice(values);
        offset
    }
}

/// All attribute tables of a scene, one per scalar type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeStore {
    pub float: AttributeTable<f32>,
    pub float3: AttributeTable<Vec3>,
    pub float4: AttributeTable<Vec4>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, data: &AttributeData) -> AttributeOffset {
        match data {
            AttributeData::Float(v) => self.float.append(v),
            AttributeData::Float3(v) => self.float3.append(v),
            AttributeData::Float4(v) => self.float4.append(v),
        }
    }
}

/// A value type that can be stored in an [`AttributeStore`] and linearly
/// interpolated along a curve segment.
pub trait AttributeValue:
    Copy
    + Default
    + PartialEq
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Send
    + Sync
    + 'static
{
    const KIND: AttributeKind;

    /// The table holding values of this type.
    fn table(store: &AttributeStore) -> &AttributeTable<Self>;
}

impl AttributeValue for f32 {
    const KIND: AttributeKind = AttributeKind::Float;

    #[inline]
    fn table(store: &AttributeStore) -> &AttributeTable<Self> {
        &store.float
    }
}

impl AttributeValue for Vec3 {
    const KIND: AttributeKind = AttributeKind::Float3;

    #[inline]
    fn table(store: &AttributeStore) -> &AttributeTable<Self> {
        &store.float3
    }
}

impl AttributeValue for Vec4 {
    const KIND: AttributeKind = AttributeKind::Float4;

    #[inline]
    fn table(store: &AttributeStore) -> &AttributeTable<Self> {
        &store.float4
    }
}

/// Attribute payload handed to the scene builder.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    Float(Vec<f32>),
    Float3(Vec<Vec3>),
    Float4(Vec<Vec4>),
}

impl AttributeData {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeData::Float(_) => AttributeKind::Float,
            AttributeData::Float3(_) => AttributeKind::Float3,
            AttributeData::Float4(_) => AttributeKind::Float4,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AttributeData::Float(v) => v.len(),
            AttributeData::Float3(v) => v.len(),
            AttributeData::Float4(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f32>> for AttributeData {
    fn from(v: Vec<f32>) -> Self {
        AttributeData::Float(v)
    }
}

impl From<Vec<Vec3>> for AttributeData {
    fn from(v: Vec<Vec3>) -> Self {
        AttributeData::Float3(v)
    }
}

impl From<Vec<Vec4>> for AttributeData {
    fn from(v: Vec<Vec4>) -> Self {
        AttributeData::Float4(v)
    }
}
