// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural kinds reported by descriptors.

use std::fmt;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    /// Canonical type name used for leaf descriptors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Kind of the type a descriptor describes.
///
/// Informational only: kind takes no part in descriptor equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SerialKind {
    /// Record with named elements.
    #[default]
    Class,
    /// Singleton with no state (elements usually empty).
    Object,
    /// Leaf value.
    Primitive(PrimitiveKind),
}

impl SerialKind {
    /// Check if this is a primitive leaf.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Check if values of this kind are traversed element by element.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Class | Self::Object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_type_name() {
        assert_eq!(PrimitiveKind::Bool.type_name(), "bool");
        assert_eq!(PrimitiveKind::U32.type_name(), "u32");
        assert_eq!(PrimitiveKind::F64.to_string(), "f64");
        assert_eq!(PrimitiveKind::String.type_name(), "string");
    }

    #[test]
    fn test_serial_kind() {
        assert_eq!(SerialKind::default(), SerialKind::Class);
        assert!(SerialKind::Class.is_structured());
        assert!(SerialKind::Object.is_structured());
        assert!(!SerialKind::Primitive(PrimitiveKind::I8).is_structured());
        assert!(SerialKind::Primitive(PrimitiveKind::I8).is_primitive());
    }
}
