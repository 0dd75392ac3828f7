// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializable snapshot of a descriptor tree.
//!
//! Used for diagnostics and for exporting registered types (e.g. to a schema
//! registry). Children are resolved recursively; a self-referential type
//! recurses until the stack runs out.

use crate::annotation::Annotation;
use crate::descriptor::SerialDescriptor;
use crate::error::Result;
use crate::kind::SerialKind;
use serde::Serialize;

/// Snapshot of one descriptor and, recursively, its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptorSchema {
    pub name: String,
    pub kind: SerialKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementSchema>,
}

/// Snapshot of one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSchema {
    pub name: String,
    pub optional: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    pub descriptor: DescriptorSchema,
}

impl DescriptorSchema {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl SerialDescriptor {
    /// Snapshot this descriptor and every resolved child.
    ///
    /// Fails with [`DescriptorError::MissingDescriptor`](crate::DescriptorError::MissingDescriptor)
    /// if any element, at any depth, cannot be resolved.
    pub fn schema(&self) -> Result<DescriptorSchema> {
        let mut elements = Vec::with_capacity(self.elements_count());
        for index in 0..self.elements_count() {
            elements.push(ElementSchema {
                name: self.element_name(index)?.to_string(),
                optional: self.is_element_optional(index)?,
                annotations: self.element_annotations(index)?.to_vec(),
                descriptor: self.child_descriptor(index)?.schema()?,
            });
        }

        Ok(DescriptorSchema {
            name: self.name().to_string(),
            kind: self.kind(),
            annotations: self.type_annotations().to_vec(),
            elements,
        })
    }
}
