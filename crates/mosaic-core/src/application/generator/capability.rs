//! Optional-capability resolution.
//!
//! Some generator steps (unit test setup, lint setup) are provided by
//! optional companions. Instead of conditionally loading a module at the
//! call site, providers are registered up front under a capability key
//! and resolved lazily: the first resolution runs the factory and caches
//! the provider, later resolutions hit the cache, and an unknown key is
//! a typed failure rather than a silent fallthrough.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::application::error::WorkspaceError;
use crate::application::generator::task::Tasks;
use crate::application::tree::FsTree;
use crate::error::MosaicResult;

/// Options a capability provider receives: which project it should wire up.
#[derive(Debug, Clone)]
pub struct CapabilityOptions {
    pub project: String,
}

impl CapabilityOptions {
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
        }
    }
}

/// A capability provider is an ordinary generator function.
pub type CapabilityGenerator =
    fn(&mut FsTree, &CapabilityOptions, &GeneratorContext) -> MosaicResult<Tasks>;

/// Locates a provider; run at most once per key.
pub type CapabilityFactory = fn() -> CapabilityGenerator;

/// Capability key → provider mapping, populated lazily and cached.
#[derive(Default)]
pub struct CapabilityRegistry {
    factories: BTreeMap<String, CapabilityFactory>,
    resolved: RefCell<BTreeMap<String, CapabilityGenerator>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, factory: CapabilityFactory) {
        self.factories.insert(key.into(), factory);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Resolve a provider, caching it under its key. Resolving the same
    /// key twice returns the same provider without re-running the factory.
    pub fn resolve(&self, key: &str) -> MosaicResult<CapabilityGenerator> {
        if let Some(generator) = self.resolved.borrow().get(key) {
            return Ok(*generator);
        }
        let factory = self.factories.get(key).ok_or_else(|| {
            WorkspaceError::CapabilityUnavailable {
                key: key.to_string(),
            }
        })?;
        debug!(capability = key, "resolving capability provider");
        let generator = factory();
        self.resolved
            .borrow_mut()
            .insert(key.to_string(), generator);
        Ok(generator)
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("keys", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Everything a generator receives besides the tree and its own options.
#[derive(Debug, Default)]
pub struct GeneratorContext {
    pub capabilities: CapabilityRegistry,
}

impl GeneratorContext {
    pub fn new(capabilities: CapabilityRegistry) -> Self {
        Self { capabilities }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MosaicError;

    fn provider(
        _tree: &mut FsTree,
        _options: &CapabilityOptions,
        _ctx: &GeneratorContext,
    ) -> MosaicResult<Tasks> {
        Ok(Tasks::new())
    }

    #[test]
    fn resolution_is_cached() {
        let mut registry = CapabilityRegistry::new();
        registry.register("jest", || provider);
        let first = registry.resolve("jest").unwrap();
        let second = registry.resolve("jest").unwrap();
        assert!(std::ptr::fn_addr_eq(first, second));
    }

    #[test]
    fn unknown_capability_is_a_typed_failure() {
        let registry = CapabilityRegistry::new();
        let err = registry.resolve("karma").unwrap_err();
        assert!(matches!(
            err,
            MosaicError::Workspace(WorkspaceError::CapabilityUnavailable { .. })
        ));
    }

    #[test]
    fn registration_is_visible_before_resolution() {
        let mut registry = CapabilityRegistry::new();
        registry.register("eslint", || provider);
        assert!(registry.is_registered("eslint"));
        assert!(!registry.is_registered("jest"));
    }
}
