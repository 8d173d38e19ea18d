//! Name → attribute lookup used by material inputs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use strand_core::error::{Result, StrandError};
use strand_core::AttributeOffset;

use crate::attribute::{AttributeElement, AttributeKind};

new_key_type! {
    pub struct AttributeId;
}

/// Where an attribute's values live and how they map onto curve topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub element: AttributeElement,
    pub kind: AttributeKind,
    pub offset: AttributeOffset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeRegistry {
    attributes: SlotMap<AttributeId, AttributeDescriptor>,
    by_name: HashMap<String, AttributeId>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, descriptor: AttributeDescriptor) -> Result<AttributeId> {
        if self.by_name.contains_key(&descriptor.name) {
            return Err(StrandError::DuplicateAttribute(descriptor.name));
        }
        let name = descriptor.name.clone();
        let id = self.attributes.insert(descriptor);
        self.by_name.insert(name, id);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.by_name.get(name).and_then(|&id| self.attributes.get(id))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
