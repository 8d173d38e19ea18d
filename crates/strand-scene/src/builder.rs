//! Scene construction. The only place scene tables are written.

use strand_core::error::{Result, StrandError};
use strand_core::traits::Validate;
use strand_core::{AttributeOffset, CurveId};

use crate::attribute::{AttributeData, AttributeElement, AttributeStore};
use crate::curve::{CurveKey, CurveTopology};
use crate::registry::{AttributeDescriptor, AttributeRegistry};
use crate::scene::Scene;

struct PendingAttribute {
    name: String,
    element: AttributeElement,
    data: AttributeData,
}

/// Collects strands and attributes, then lays them out into a [`Scene`].
///
/// Attribute lengths are checked at [`build`](Self::build) time, once the
/// final key and segment counts are known.
#[derive(Default)]
pub struct SceneBuilder {
    topology: CurveTopology,
    pending: Vec<PendingAttribute>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a strand of at least two keys, no two consecutive ones coincident.
    pub fn add_curve(&mut self, keys: &[CurveKey], shader: u32) -> Result<CurveId> {
        self.topology.push_curve(keys, shader).map_err(|e| {
            log::warn!("rejected strand of {} keys: {e}", keys.len());
            e
        })
    }

    /// Declare an attribute. `data` must hold one value per key for
    /// [`AttributeElement::PerKey`], one per segment for
    /// [`AttributeElement::PerSegment`], and nothing for
    /// [`AttributeElement::None`].
    pub fn add_attribute(
        &mut self,
        name: &str,
        element: AttributeElement,
        data: impl Into<AttributeData>,
    ) -> Result<&mut Self> {
        if self.pending.iter().any(|a| a.name == name) {
            return Err(StrandError::DuplicateAttribute(name.to_string()));
        }
        self.pending.push(PendingAttribute {
            name: name.to_string(),
            element,
            data: data.into(),
        });
        Ok(self)
    }

    pub fn num_keys(&self) -> usize {
        self.topology.num_keys()
    }

    pub fn num_segments(&self) -> usize {
        self.topology.num_segments()
    }

    pub fn build(self) -> Result<Scene> {
        if let Err(e) = self.topology.validate() {
            log::warn!("curve topology failed validation: {e}");
            return Err(e);
        }

        let mut store = AttributeStore::new();
        let mut registry = AttributeRegistry::new();

        for attr in self.pending {
            let expected = match attr.element {
                AttributeElement::PerKey => self.topology.num_keys(),
                AttributeElement::PerSegment => self.topology.num_segments(),
                AttributeElement::None => 0,
            };
            if attr.data.len() != expected {
                log::warn!(
                    "attribute '{}' has {} values, {} {} expected",
                    attr.name,
                    attr.data.len(),
                    expected,
                    attr.element
                );
                return Err(StrandError::AttributeLength {
                    name: attr.name,
                    element: attr.element.name(),
                    expected,
                    actual: attr.data.len(),
                });
            }

            let offset = if attr.element == AttributeElement::None {
                AttributeOffset::default()
            } else {
                store.append(&attr.data)
            };
            log::debug!(
                "attribute '{}': {:?} {} at offset {}",
                attr.name,
                attr.data.kind(),
                attr.element,
                offset
            );
            registry.insert(AttributeDescriptor {
                name: attr.name,
                element: attr.element,
                kind: attr.data.kind(),
                offset,
            })?;
        }

        log::info!(
            "built scene: {} curves, {} segments, {} keys, {} attributes",
            self.topology.num_curves(),
            self.topology.num_segments(),
            self.topology.num_keys(),
            registry.len()
        );

        Ok(Scene::from_parts(self.topology, store, registry))
    }
}
