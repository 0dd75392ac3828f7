// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for SerialDescriptor.

use crate::annotation::Annotation;
use crate::descriptor::SerialDescriptor;
use crate::error::{DescriptorError, Result};
use crate::kind::{PrimitiveKind, SerialKind};
use crate::resolver::ChildResolver;
use std::sync::Arc;

/// Builder for creating sealed SerialDescriptor instances.
///
/// The first failing step (an element annotation with no element before it)
/// is remembered and reported by [`build`](Self::build) or
/// [`finish`](Self::finish); later steps are still applied.
#[derive(Debug)]
pub struct SerialDescriptorBuilder {
    descriptor: SerialDescriptor,
    error: Option<DescriptorError>,
}

impl SerialDescriptorBuilder {
    /// Create a new builder for a class type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            descriptor: SerialDescriptor::new(name),
            error: None,
        }
    }

    /// Attach a generated child resolver.
    pub fn resolver(self, resolver: impl ChildResolver + 'static) -> Self {
        self.shared_resolver(Arc::new(resolver))
    }

    /// Attach an already shared child resolver.
    pub fn shared_resolver(mut self, resolver: Arc<dyn ChildResolver>) -> Self {
        self.descriptor.set_resolver(resolver);
        self
    }

    /// Set the reported kind.
    pub fn kind(mut self, kind: SerialKind) -> Self {
        self.descriptor = self.descriptor.with_kind(kind);
        self
    }

    /// Add a required element.
    pub fn element(mut self, name: impl Into<String>) -> Self {
        self.descriptor.add_element(name);
        self
    }

    /// Add an optional element.
    pub fn optional_element(mut self, name: impl Into<String>) -> Self {
        self.descriptor.add_element_with(name, true);
        self
    }

    /// Add an element together with its explicit child descriptor.
    pub fn nested_element(self, name: impl Into<String>, nested: Arc<SerialDescriptor>) -> Self {
        self.element(name).child(nested)
    }

    /// Add an optional element together with its explicit child descriptor.
    pub fn optional_nested_element(
        self,
        name: impl Into<String>,
        nested: Arc<SerialDescriptor>,
    ) -> Self {
        self.optional_element(name).child(nested)
    }

    /// Add a primitive element.
    pub fn primitive_element(self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.nested_element(name, Arc::new(SerialDescriptor::primitive(kind)))
    }

    /// Annotate the most recently added element.
    pub fn element_annotation(mut self, annotation: Annotation) -> Self {
        if let Err(err) = self.descriptor.push_element_annotation(annotation) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Annotate the type.
    pub fn type_annotation(mut self, annotation: Annotation) -> Self {
        self.descriptor.push_type_annotation(annotation);
        self
    }

    /// Append an explicit child descriptor.
    pub fn child(mut self, descriptor: Arc<SerialDescriptor>) -> Self {
        self.descriptor.push_child_descriptor(descriptor);
        self
    }

    /// Return the descriptor without sealing it.
    pub fn finish(self) -> Result<SerialDescriptor> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.descriptor),
        }
    }

    /// Seal the descriptor: the name index is built up front and the result
    /// is shared read-only.
    pub fn build(self) -> Result<Arc<SerialDescriptor>> {
        let descriptor = self.finish()?;
        descriptor.build_index();
        Ok(Arc::new(descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::GeneratedChildren;

    #[test]
    fn test_struct_builder() {
        let desc = SerialDescriptorBuilder::new("Point3D")
            .primitive_element("x", PrimitiveKind::F64)
            .primitive_element("y", PrimitiveKind::F64)
            .primitive_element("z", PrimitiveKind::F64)
            .build()
            .expect("build");

        assert_eq!(desc.name(), "Point3D");
        assert_eq!(desc.kind(), SerialKind::Class);
        assert_eq!(desc.elements_count(), 3);
        assert_eq!(desc.element_index("z"), Some(2));
        assert_eq!(
            desc.child_descriptor(1).map(|c| c.kind()),
            Ok(SerialKind::Primitive(PrimitiveKind::F64))
        );
    }

    #[test]
    fn test_optional_and_annotations() {
        let desc = SerialDescriptorBuilder::new("Reading")
            .type_annotation(Annotation::new("final"))
            .primitive_element("id", PrimitiveKind::U32)
            .element_annotation(Annotation::new("key"))
            .optional_element("note")
            .child(Arc::new(SerialDescriptor::primitive(PrimitiveKind::String)))
            .build()
            .expect("build");

        assert_eq!(desc.is_element_optional(0), Ok(false));
        assert_eq!(desc.is_element_optional(1), Ok(true));
        assert_eq!(
            desc.element_annotations(0).map(|a| a.to_vec()),
            Ok(vec![Annotation::new("key")])
        );
        assert_eq!(desc.type_annotations().len(), 1);
    }

    #[test]
    fn test_annotation_before_element_fails_build() {
        let result = SerialDescriptorBuilder::new("Broken")
            .element_annotation(Annotation::new("key"))
            .element("x")
            .element_annotation(Annotation::new("id").with_value(1))
            .build();

        assert_eq!(
            result.map(|d| d.elements_count()),
            Err(DescriptorError::Precondition {
                type_name: "Broken".into()
            })
        );
    }

    #[test]
    fn test_nested_struct() {
        let point = SerialDescriptorBuilder::new("Point")
            .primitive_element("x", PrimitiveKind::F64)
            .primitive_element("y", PrimitiveKind::F64)
            .build()
            .expect("point");

        let rect = SerialDescriptorBuilder::new("Rectangle")
            .nested_element("top_left", point.clone())
            .optional_nested_element("bottom_right", point.clone())
            .build()
            .expect("rect");

        assert_eq!(rect.elements_count(), 2);
        assert_eq!(rect.is_element_optional(1), Ok(true));
        let child = rect.child_descriptor(1).expect("bottom_right");
        assert!(Arc::ptr_eq(&child, &point));
    }

    #[test]
    fn test_builder_with_resolver() {
        let generated = Arc::new(SerialDescriptor::primitive(PrimitiveKind::I16));
        let desc = SerialDescriptorBuilder::new("Generated")
            .resolver(GeneratedChildren::new(vec![generated.clone()]))
            .kind(SerialKind::Object)
            .element("value")
            .finish()
            .expect("finish");

        assert!(desc.has_resolver());
        assert_eq!(desc.kind(), SerialKind::Object);
        assert!(Arc::ptr_eq(&desc.child_descriptor(0).expect("value"), &generated));
    }
}
