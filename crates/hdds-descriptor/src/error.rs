// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors raised while building or querying a descriptor.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DescriptorError>;

/// Descriptor construction and query errors.
///
/// None of these are transient: each one points at a schema-construction
/// defect, and callers decide whether it is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// An element annotation was pushed before any element was added.
    #[error("cannot annotate element of {type_name}: no element has been added yet")]
    Precondition { type_name: String },

    /// Index-based query outside `[0, elements_count)`.
    #[error("element index {index} out of range for {type_name} ({count} elements)")]
    IndexOutOfRange {
        index: usize,
        count: usize,
        type_name: String,
    },

    /// Neither the resolver nor the explicit child list has a descriptor
    /// for this index.
    #[error("element descriptor at index {index} has not been found in {type_name}")]
    MissingDescriptor { index: usize, type_name: String },

    /// A registry build closure returned a descriptor for another type.
    #[error("descriptor {type_name} cannot be registered as {expected}")]
    NameMismatch { expected: String, type_name: String },
}

impl DescriptorError {
    /// Name of the descriptor that raised the error.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Precondition { type_name }
            | Self::IndexOutOfRange { type_name, .. }
            | Self::MissingDescriptor { type_name, .. }
            | Self::NameMismatch { type_name, .. } => type_name,
        }
    }
}
