//! Built-in capability wiring.

use mosaic_core::application::generator::capability::{CapabilityRegistry, GeneratorContext};

pub const ESLINT_CAPABILITY: &str = "eslint";
pub const JEST_CAPABILITY: &str = "jest";

/// The registry with every built-in provider registered.
pub fn builtin_capabilities() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry.register(ESLINT_CAPABILITY, || crate::linting::lint_project_capability);
    registry.register(JEST_CAPABILITY, || crate::testing::jest_project_capability);
    registry
}

/// A ready-to-use generator context.
pub fn generator_context() -> GeneratorContext {
    GeneratorContext::new(builtin_capabilities())
}
