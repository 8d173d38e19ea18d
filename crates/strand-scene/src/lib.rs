//! Scene-owned, read-only tables consumed by the shading kernel.

pub mod attribute;
pub mod builder;
pub mod curve;
pub mod registry;
pub mod scene;

pub use attribute::{
    AttributeData, AttributeElement, AttributeKind, AttributeStore, AttributeTable, AttributeValue,
};
pub use builder::SceneBuilder;
pub use curve::{Curve, CurveKey, CurveSegment, CurveTopology, MIN_SEGMENT_LENGTH_SQUARED};
pub use registry::{AttributeDescriptor, AttributeId, AttributeRegistry};
pub use scene::Scene;
