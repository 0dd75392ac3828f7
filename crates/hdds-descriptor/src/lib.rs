// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural type descriptors for generic encoders and decoders.
//!
//! A [`SerialDescriptor`] describes the shape of a record-like type at
//! runtime: element names in order, per-element optionality and
//! annotations, type annotations, and the descriptor of each element.
//! Encoders walk it by index; decoders map wire keys back to indices.
//!
//! # Features
//!
//! - **SerialDescriptor**: append-only build phase, read-only query phase
//! - **ChildResolver**: generated child descriptors, preferred over explicit ones
//! - **Builder API**: fluent construction of sealed, shared descriptors
//! - **DescriptorRegistry**: concurrent register-once store keyed by type name
//! - **Schema snapshot** (`serde` feature): serializable descriptor tree
//!
//! # Example
//!
//! ```rust
//! use hdds_descriptor::{Annotation, PrimitiveKind, SerialDescriptorBuilder};
//!
//! let reading = SerialDescriptorBuilder::new("SensorReading")
//!     .primitive_element("sensor_id", PrimitiveKind::U32)
//!     .element_annotation(Annotation::new("key"))
//!     .primitive_element("temperature", PrimitiveKind::F64)
//!     .primitive_element("unit", PrimitiveKind::String)
//!     .build()
//!     .unwrap();
//!
//! // Encoder side: walk by index
//! for index in 0..reading.elements_count() {
//!     let name = reading.element_name(index).unwrap();
//!     let child = reading.child_descriptor(index).unwrap();
//!     println!("{name}: {child}");
//! }
//!
//! // Decoder side: map wire keys back to indices, skip unknown ones
//! assert_eq!(reading.element_index("temperature"), Some(1));
//! assert_eq!(reading.element_index("humidity"), None);
//! ```

mod annotation;
mod builder;
mod descriptor;
mod error;
mod kind;
mod registry;
mod resolver;
#[cfg(feature = "serde")]
mod schema;

pub use annotation::{Annotation, AnnotationValue};
pub use builder::SerialDescriptorBuilder;
pub use descriptor::SerialDescriptor;
pub use error::{DescriptorError, Result};
pub use kind::{PrimitiveKind, SerialKind};
pub use registry::{DescriptorRegistry, RegistryConfig};
pub use resolver::{ChildResolver, FnResolver, GeneratedChildren};
#[cfg(feature = "serde")]
pub use schema::{DescriptorSchema, ElementSchema};
