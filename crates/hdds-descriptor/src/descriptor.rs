// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural descriptor of a record-like type.
//!
//! A [`SerialDescriptor`] is filled once (build phase, `&mut self`) and then
//! shared read-only between encoders and decoders (query phase, usually
//! behind an `Arc`). Element `i` is the `i`-th element added.
//!
//! ## Child resolution
//!
//! [`SerialDescriptor::child_descriptor`] looks in two places, in order:
//!
//! 1. the generated [`ChildResolver`], when the descriptor has one;
//! 2. the explicit child list filled by [`SerialDescriptor::push_child_descriptor`].
//!
//! If neither knows the index the lookup fails with
//! [`DescriptorError::MissingDescriptor`].
//!
//! ## Equality
//!
//! Two descriptors are equal when their names are equal and their resolved
//! child descriptors are pairwise equal. Optional flags, annotations and the
//! kind are ignored, so a class descriptor named `u32` with no elements
//! equals [`SerialDescriptor::primitive`] of `PrimitiveKind::U32`.
//! Comparing resolves children; use
//! [`SerialDescriptor::try_eq`] to see resolution failures instead of
//! treating unresolvable slots as absent.
//!
//! ## Duplicate names
//!
//! Element names are not checked for uniqueness. When a name is added more
//! than once, [`SerialDescriptor::element_index`] returns the last index.

use crate::annotation::Annotation;
use crate::error::{DescriptorError, Result};
use crate::kind::{PrimitiveKind, SerialKind};
use crate::resolver::ChildResolver;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Runtime description of a structured type.
#[derive(Clone)]
pub struct SerialDescriptor {
    name: String,
    kind: SerialKind,
    names: Vec<String>,
    optional: Vec<bool>,
    element_annotations: Vec<Vec<Annotation>>,
    type_annotations: Vec<Annotation>,
    children: Vec<Arc<SerialDescriptor>>,
    resolver: Option<Arc<dyn ChildResolver>>,
    /// Name -> index, built on first lookup.
    indices: OnceLock<HashMap<String, usize>>,
}

impl SerialDescriptor {
    /// Create an empty class descriptor with no generated resolver.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SerialKind::Class,
            names: Vec::new(),
            optional: Vec::new(),
            element_annotations: Vec::new(),
            type_annotations: Vec::new(),
            children: Vec::new(),
            resolver: None,
            indices: OnceLock::new(),
        }
    }

    /// Create an empty class descriptor backed by a generated resolver.
    pub fn with_resolver(name: impl Into<String>, resolver: Arc<dyn ChildResolver>) -> Self {
        let mut desc = Self::new(name);
        desc.resolver = Some(resolver);
        desc
    }

    /// Create a leaf descriptor for a primitive type.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.type_name()).with_kind(SerialKind::Primitive(kind))
    }

    /// Override the reported kind.
    pub fn with_kind(mut self, kind: SerialKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn set_resolver(&mut self, resolver: Arc<dyn ChildResolver>) {
        self.resolver = Some(resolver);
    }

    // ---------------------------------------------------------------------
    // Build phase
    // ---------------------------------------------------------------------

    /// Append a required element.
    pub fn add_element(&mut self, name: impl Into<String>) {
        self.add_element_with(name, false);
    }

    /// Append an element with an explicit optional flag.
    pub fn add_element_with(&mut self, name: impl Into<String>, is_optional: bool) {
        self.names.push(name.into());
        self.optional.push(is_optional);
        self.element_annotations.push(Vec::new());
        // A lookup may already have cached the index.
        self.indices.take();
    }

    /// Annotate the most recently added element.
    pub fn push_element_annotation(&mut self, annotation: Annotation) -> Result<()> {
        match self.element_annotations.last_mut() {
            Some(annotations) => {
                annotations.push(annotation);
                Ok(())
            }
            None => Err(DescriptorError::Precondition {
                type_name: self.name.clone(),
            }),
        }
    }

    /// Annotate the type as a whole.
    pub fn push_type_annotation(&mut self, annotation: Annotation) {
        self.type_annotations.push(annotation);
    }

    /// Append an explicit child descriptor.
    ///
    /// The n-th call supplies the fallback descriptor for element `n - 1`.
    /// Alignment with [`add_element`](Self::add_element) calls is up to the
    /// caller.
    pub fn push_child_descriptor(&mut self, descriptor: Arc<SerialDescriptor>) {
        self.children.push(descriptor);
    }

    // ---------------------------------------------------------------------
    // Query phase
    // ---------------------------------------------------------------------

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SerialKind {
        self.kind
    }

    /// Returns `true` if a generated resolver is attached.
    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    pub fn elements_count(&self) -> usize {
        self.names.len()
    }

    /// Element names in index order.
    pub fn element_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn element_name(&self, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn is_element_optional(&self, index: usize) -> Result<bool> {
        self.optional
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn element_annotations(&self, index: usize) -> Result<&[Annotation]> {
        self.element_annotations
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn type_annotations(&self) -> &[Annotation] {
        &self.type_annotations
    }

    /// Index of the element called `name`, or `None` for an unknown name.
    ///
    /// Decoders use `None` to skip fields they do not recognize. The index
    /// map is built on the first call and reused afterwards.
    pub fn element_index(&self, name: &str) -> Option<usize> {
        self.indices().get(name).copied()
    }

    /// Build the name index now rather than on the first lookup.
    pub fn build_index(&self) {
        let _ = self.indices();
    }

    /// Descriptor of the element at `index`.
    ///
    /// The generated resolver wins over the explicit child list.
    pub fn child_descriptor(&self, index: usize) -> Result<Arc<SerialDescriptor>> {
        if let Some(desc) = self
            .resolver
            .as_ref()
            .and_then(|resolver| resolver.child_descriptor(index))
        {
            return Ok(desc);
        }
        if let Some(desc) = self.children.get(index) {
            return Ok(Arc::clone(desc));
        }
        log::debug!(
            "[descriptor] no child descriptor for {}[{}] (resolver={}, explicit={})",
            self.name,
            index,
            self.resolver.is_some(),
            self.children.len()
        );
        Err(DescriptorError::MissingDescriptor {
            index,
            type_name: self.name.clone(),
        })
    }

    /// Resolved child descriptors for every element, in index order.
    ///
    /// Fails on the first element that cannot be resolved.
    pub fn element_descriptors(&self) -> Result<Vec<Arc<SerialDescriptor>>> {
        (0..self.elements_count())
            .map(|index| self.child_descriptor(index))
            .collect()
    }

    /// Structural equality that reports resolution failures.
    ///
    /// Names are compared first; only if they match are both child lists
    /// resolved, so a [`DescriptorError::MissingDescriptor`] from either
    /// side is returned instead of a boolean. Both lists are resolved in
    /// full before their lengths are compared.
    ///
    /// A descriptor compared with itself (same address) is equal without
    /// resolving anything, even if some of its children cannot be resolved.
    pub fn try_eq(&self, other: &SerialDescriptor) -> Result<bool> {
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        if self.name != other.name {
            return Ok(false);
        }
        let ours = self.element_descriptors()?;
        let theirs = other.element_descriptors()?;
        if ours.len() != theirs.len() {
            return Ok(false);
        }
        for (a, b) in ours.iter().zip(&theirs) {
            if !a.try_eq(b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn indices(&self) -> &HashMap<String, usize> {
        self.indices.get_or_init(|| {
            let mut indices = HashMap::with_capacity(self.names.len());
            // Later inserts overwrite earlier ones: last duplicate wins.
            for (index, name) in self.names.iter().enumerate() {
                indices.insert(name.clone(), index);
            }
            log::trace!(
                "[descriptor] built name index for {} ({} elements, {} distinct)",
                self.name,
                self.names.len(),
                indices.len()
            );
            indices
        })
    }

    /// Child slots for `PartialEq`/`Hash`: unresolvable slots become `None`.
    fn resolved_slots(&self) -> Vec<Option<Arc<SerialDescriptor>>> {
        (0..self.elements_count())
            .map(|index| self.child_descriptor(index).ok())
            .collect()
    }

    fn out_of_range(&self, index: usize) -> DescriptorError {
        DescriptorError::IndexOutOfRange {
            index,
            count: self.names.len(),
            type_name: self.name.clone(),
        }
    }
}

impl PartialEq for SerialDescriptor {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.name == other.name && self.resolved_slots() == other.resolved_slots()
    }
}

impl Eq for SerialDescriptor {}

impl Hash for SerialDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.resolved_slots().hash(state);
    }
}

impl fmt::Debug for SerialDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("elements", &self.names)
            .field("optional", &self.optional)
            .field("children", &self.children.len())
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

impl fmt::Display for SerialDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.names.join(", "))
    }
}
