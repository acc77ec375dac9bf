#![forbid(unsafe_code)]

//! Dimensional-unit catalog compiler front half: the catalog DSL parser,
//! the unit data model, and the compound resolver that assigns bit-packed
//! enums and conversion multipliers.
//!
//! The back half (C++ fragment generation and marker splicing) lives in
//! `metron-codegen`.

mod error;
mod expr;
mod model;
mod parser;
mod resolve;

use once_cell::sync::Lazy;

pub use error::{Error, Result};
pub use model::{CompoundOp, CompoundRelation, MultiplierSpec, Unit, UnitRegistry, UnitType};
pub use parser::{parse, parse_with_options, ParseOptions};
pub use resolve::{resolve_all, unpack};

/// The production catalog shipped with the crate.
pub const DEFAULT_CATALOG: &str = include_str!("../data/default.units");

/// Families of the default catalog whose simple units take the
/// negative-enum remap.
pub const DEFAULT_NEGATIVE_ENUM_TYPES: &[&str] = &["AreaDB"];

static DEFAULT_REGISTRY: Lazy<UnitRegistry> = Lazy::new(|| {
    compile_with_options(DEFAULT_CATALOG, &default_options())
        .expect("failed to compile embedded default catalog")
});

/// Parse options matching the embedded default catalog.
pub fn default_options() -> ParseOptions {
    ParseOptions {
        negative_enum_types: DEFAULT_NEGATIVE_ENUM_TYPES
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Parse and resolve a catalog in one step.
pub fn compile(text: &str) -> Result<UnitRegistry> {
    compile_with_options(text, &ParseOptions::default())
}

/// Parse and resolve a catalog in one step, with options.
pub fn compile_with_options(text: &str, options: &ParseOptions) -> Result<UnitRegistry> {
    let mut registry = parse_with_options(text, options)?;
    resolve_all(&mut registry)?;
    Ok(registry)
}

/// The embedded default catalog, parsed and resolved once.
pub fn default_registry() -> &'static UnitRegistry {
    &DEFAULT_REGISTRY
}
