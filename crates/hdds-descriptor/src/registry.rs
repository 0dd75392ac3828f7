// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent registry of descriptors keyed by type name.
//!
//! Type registration happens once per type, usually from whichever thread
//! first needs the type. The registry guarantees the build closure runs at
//! most once per name and that every caller gets the same shared
//! descriptor back.

use crate::descriptor::SerialDescriptor;
use crate::error::{DescriptorError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL_REGISTRY: OnceLock<DescriptorRegistry> = OnceLock::new();

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Initial capacity of the backing map.
    pub capacity_hint: usize,

    /// Build each descriptor's name index at registration time instead of
    /// on its first lookup.
    pub seal_on_register: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity_hint: 64,
            seal_on_register: true,
        }
    }
}

/// Register-once store of shared descriptors.
#[derive(Debug)]
pub struct DescriptorRegistry {
    config: RegistryConfig,
    descriptors: DashMap<String, Arc<SerialDescriptor>>,
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorRegistry {
    /// Create an empty registry with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            descriptors: DashMap::with_capacity(config.capacity_hint),
            config,
        }
    }

    /// Process-wide registry.
    pub fn global() -> &'static DescriptorRegistry {
        GLOBAL_REGISTRY.get_or_init(DescriptorRegistry::new)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Return the descriptor registered under `name`, building it with
    /// `build` if this is the first request.
    ///
    /// `build` runs while the entry is locked, so concurrent callers for the
    /// same name wait for it instead of building twice. It must not call
    /// back into this registry: register child types first. If `build`
    /// fails, or returns a descriptor whose name is not `name`, nothing is
    /// stored and an error is returned.
    pub fn get_or_register<F>(&self, name: &str, build: F) -> Result<Arc<SerialDescriptor>>
    where
        F: FnOnce() -> Result<SerialDescriptor>,
    {
        if let Some(existing) = self.descriptors.get(name) {
            return Ok(Arc::clone(existing.value()));
        }

        match self.descriptors.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let built = build()?;
                if built.name() != name {
                    return Err(DescriptorError::NameMismatch {
                        expected: name.to_string(),
                        type_name: built.name().to_string(),
                    });
                }
                let descriptor = self.prepare(built);
                log::debug!(
                    "[registry] registered {} ({} elements)",
                    name,
                    descriptor.elements_count()
                );
                entry.insert(Arc::clone(&descriptor));
                Ok(descriptor)
            }
        }
    }

    /// Register a finished descriptor under its own name.
    ///
    /// If the name is already taken the existing descriptor is kept and
    /// returned.
    pub fn register(&self, descriptor: SerialDescriptor) -> Arc<SerialDescriptor> {
        match self.descriptors.entry(descriptor.name().to_string()) {
            Entry::Occupied(entry) => {
                log::debug!("[registry] {} already registered, keeping first", entry.key());
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                let descriptor = self.prepare(descriptor);
                log::debug!(
                    "[registry] registered {} ({} elements)",
                    descriptor.name(),
                    descriptor.elements_count()
                );
                entry.insert(Arc::clone(&descriptor));
                descriptor
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<SerialDescriptor>> {
        self.descriptors
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .descriptors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    fn prepare(&self, descriptor: SerialDescriptor) -> Arc<SerialDescriptor> {
        if self.config.seal_on_register {
            descriptor.build_index();
        }
        Arc::new(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Annotation;
    use crate::builder::SerialDescriptorBuilder;
    use crate::kind::PrimitiveKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    fn point() -> Result<SerialDescriptor> {
        SerialDescriptorBuilder::new("Point")
            .primitive_element("x", PrimitiveKind::F64)
            .primitive_element("y", PrimitiveKind::F64)
            .finish()
    }

    #[test]
    fn test_get_or_register_builds_once() {
        let registry = DescriptorRegistry::new();
        let calls = AtomicUsize::new(0);

        let first = registry
            .get_or_register("Point", || {
                calls.fetch_add(1, Ordering::SeqCst);
                point()
            })
            .expect("register");
        let second = registry
            .get_or_register("Point", || {
                calls.fetch_add(1, Ordering::SeqCst);
                point()
            })
            .expect("lookup");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Point"));
    }

    #[test]
    fn test_failed_build_is_not_stored() {
        let registry = DescriptorRegistry::new();
        let result = registry.get_or_register("Broken", || {
            SerialDescriptorBuilder::new("Broken")
                .element_annotation(Annotation::new("key"))
                .finish()
        });

        assert!(matches!(result, Err(DescriptorError::Precondition { .. })));
        assert!(registry.is_empty());
        assert!(registry.get("Broken").is_none());
    }

    #[test]
    fn test_get_or_register_rejects_other_name() {
        let registry = DescriptorRegistry::new();
        let result = registry.get_or_register("Vector", point);

        assert_eq!(
            result.map(|d| d.elements_count()),
            Err(DescriptorError::NameMismatch {
                expected: "Vector".into(),
                type_name: "Point".into()
            })
        );
        assert!(registry.is_empty());

        // The name stays free for a matching build.
        let vector = registry
            .get_or_register("Vector", || Ok(SerialDescriptor::new("Vector")))
            .expect("register");
        assert_eq!(vector.name(), "Vector");
    }

    #[test]
    fn test_register_keeps_first() {
        let registry = DescriptorRegistry::new();
        let first = registry.register(point().expect("point"));

        let mut other = SerialDescriptor::new("Point");
        other.add_element("z");
        let second = registry.register(other);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.elements_count(), 2);
    }

    #[test]
    fn test_names_sorted() {
        let registry = DescriptorRegistry::with_config(RegistryConfig {
            capacity_hint: 4,
            seal_on_register: false,
        });
        registry.register(SerialDescriptor::new("b.Second"));
        registry.register(SerialDescriptor::new("a.First"));

        assert_eq!(registry.names(), vec!["a.First".to_string(), "b.Second".to_string()]);
        assert!(!registry.config().seal_on_register);
    }

    #[test]
    fn test_concurrent_registration() {
        const THREADS: usize = 8;
        let registry = Arc::new(DescriptorRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    registry
                        .get_or_register("Point", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            point()
                        })
                        .expect("register")
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|d| Arc::ptr_eq(d, &results[0])));
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = DescriptorRegistry::global();
        let b = DescriptorRegistry::global();
        assert!(std::ptr::eq(a, b));
    }
}
