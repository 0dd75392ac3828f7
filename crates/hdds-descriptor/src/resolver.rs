// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generated child-descriptor resolution.
//!
//! A [`ChildResolver`] is the capability a generated serializer exposes:
//! "descriptor of the element at index `i`", known at codegen time. When a
//! descriptor carries one, it is consulted before the explicit child list
//! (see [`SerialDescriptor::child_descriptor`]).

use crate::descriptor::SerialDescriptor;
use std::fmt;
use std::sync::Arc;

/// Resolves the descriptor of a child element by index.
///
/// Implementations are called concurrently from many traversals and must
/// return the same descriptor for a given index for the lifetime of the
/// owning descriptor.
pub trait ChildResolver: Send + Sync {
    /// Look up the child descriptor at `index`.
    ///
    /// Returns `None` if this resolver has no entry for the index, in which
    /// case the owning descriptor falls back to its explicit child list.
    fn child_descriptor(&self, index: usize) -> Option<Arc<SerialDescriptor>>;
}

impl<R: ChildResolver + ?Sized> ChildResolver for Arc<R> {
    fn child_descriptor(&self, index: usize) -> Option<Arc<SerialDescriptor>> {
        (**self).child_descriptor(index)
    }
}

/// List-backed [`ChildResolver`], the shape of a generated serializer's
/// child serializer table.
#[derive(Debug, Default, Clone)]
pub struct GeneratedChildren {
    children: Vec<Arc<SerialDescriptor>>,
}

impl GeneratedChildren {
    /// Create a resolver over the given per-index descriptors.
    #[must_use]
    pub fn new(children: Vec<Arc<SerialDescriptor>>) -> Self {
        Self { children }
    }

    /// Number of known children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if no children are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl From<Vec<Arc<SerialDescriptor>>> for GeneratedChildren {
    fn from(children: Vec<Arc<SerialDescriptor>>) -> Self {
        Self::new(children)
    }
}

impl ChildResolver for GeneratedChildren {
    fn child_descriptor(&self, index: usize) -> Option<Arc<SerialDescriptor>> {
        self.children.get(index).cloned()
    }
}

/// Closure-backed [`ChildResolver`].
pub struct FnResolver<F>(F);

impl<F> FnResolver<F>
where
    F: Fn(usize) -> Option<Arc<SerialDescriptor>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ChildResolver for FnResolver<F>
where
    F: Fn(usize) -> Option<Arc<SerialDescriptor>> + Send + Sync,
{
    fn child_descriptor(&self, index: usize) -> Option<Arc<SerialDescriptor>> {
        (self.0)(index)
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}
