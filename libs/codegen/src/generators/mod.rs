//! Code generators for unit catalogs
//!
//! Each target language has its own module that implements the `Generator`
//! trait over a resolved registry.

pub mod cpp;

use anyhow::Result;
use metron_catalog::UnitRegistry;

/// Trait that all language generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate code from a resolved unit registry
    fn generate(&self, registry: &UnitRegistry) -> Result<Self::Output>;
}

/// Configuration options for code generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Prefix for generated per-type class names (`Unit` -> `UnitLength`).
    pub class_prefix: String,
    /// Export macro placed on generated class declarations, if any.
    pub export_macro: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            class_prefix: "Unit".to_string(),
            export_macro: None,
        }
    }
}
