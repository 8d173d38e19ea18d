use strand_math::Aabb3;

use crate::attribute::AttributeStore;
use crate::curve::CurveTopology;
use crate::registry::{AttributeDescriptor, AttributeRegistry};

/// A frozen scene: curve topology plus attribute tables.
///
/// Built by [`SceneBuilder`](crate::SceneBuilder) and never mutated
/// afterwards; share it by reference or `Arc` across shading threads.
#[derive(Debug, Clone)]
pub struct Scene {
    topology: CurveTopology,
    attributes: AttributeStore,
    registry: AttributeRegistry,
}

impl Scene {
    pub(crate) fn from_parts(
        topology: CurveTopology,
        attributes: AttributeStore,
        registry: AttributeRegistry,
    ) -> Self {
        Self {
            topology,
            attributes,
            registry,
        }
    }

    pub fn topology(&self) -> &CurveTopology {
        &self.topology
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Look up a material attribute by name.
    pub fn find_attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.registry.find(name)
    }

    pub fn bounds(&self) -> Option<Aabb3> {
        self.topology.bounds()
    }

    /// Raw bytes of the segment table, for upload to a device buffer.
    pub fn segment_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.topology.segments)
    }

    /// Raw bytes of the key table (`float4` per key: position, radius).
    pub fn key_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.topology.keys)
    }
}
