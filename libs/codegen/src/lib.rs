//! Unit Catalog Code Generator
//!
//! This library is the back half of the unit catalog compiler. It turns a
//! resolved [`UnitRegistry`] into C++ source fragments and splices them into
//! marker-delimited regions of existing target files.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Catalog** (`metron-catalog`): DSL text parsed and resolved into a
//!    registry of unit types with packed enums and multipliers
//! 2. **Generators**: language-specific rendering from the registry
//! 3. **Splicer**: in-place replacement of marker regions in target files,
//!    with numbered backups
//!
//! Generation is a one-shot batch transform: a failure while splicing a
//! later file leaves earlier files written (their backups allow rollback).

pub mod error;
pub mod generators;
pub mod splice;
pub mod template;
pub mod utils;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use metron_catalog::{ParseOptions, UnitRegistry};

use generators::cpp::{self, CppGenerator, CppOutput};
use generators::{Generator, GeneratorConfig};
use splice::UpdateOutcome;

/// Main entry point for code generation
pub struct CodeGenerator {
    registry: UnitRegistry,
}

impl CodeGenerator {
    /// Create a code generator from catalog DSL text.
    pub fn from_catalog(text: &str, options: &ParseOptions) -> Result<Self> {
        let registry =
            metron_catalog::compile_with_options(text, options).context("compiling catalog")?;
        Ok(Self { registry })
    }

    /// Create a code generator from an already resolved registry.
    pub fn from_registry(registry: UnitRegistry) -> Self {
        Self { registry }
    }

    /// Get the resolved registry
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Generate code for a specific language
    pub fn generate<G: Generator>(&self, generator: G) -> Result<G::Output> {
        generator.generate(&self.registry)
    }
}

/// Which regions of which target file receive generated content.
#[derive(Debug, Clone)]
pub struct TargetLayout {
    pub files: Vec<TargetFile>,
}

#[derive(Debug, Clone)]
pub struct TargetFile {
    pub path: PathBuf,
    pub regions: Vec<String>,
}

impl TargetLayout {
    /// The standard three-file layout: class declarations and value
    /// wrappers in `unit_types.hpp`, the type-id enum in `units.hpp`, the
    /// registration lines and table definitions in `units.cpp`.
    pub fn standard(dir: &Path) -> Self {
        Self {
            files: vec![
                TargetFile {
                    path: dir.join("unit_types.hpp"),
                    regions: vec![
                        cpp::REGION_UNIT_CLASSES.to_string(),
                        cpp::REGION_VALUE_CLASSES.to_string(),
                    ],
                },
                TargetFile {
                    path: dir.join("units.hpp"),
                    regions: vec![cpp::REGION_TYPE_ENUMS.to_string()],
                },
                TargetFile {
                    path: dir.join("units.cpp"),
                    regions: vec![
                        cpp::REGION_TYPE_INTERFACES.to_string(),
                        cpp::REGION_DEFINITIONS.to_string(),
                    ],
                },
            ],
        }
    }
}

/// Splice generated output into the target files of a layout.
///
/// Returns one outcome per file, in layout order. Files are processed in
/// order and writes are not transactional across files.
pub fn splice_output(
    output: &CppOutput,
    layout: &TargetLayout,
) -> Result<Vec<(PathBuf, UpdateOutcome)>> {
    let mut outcomes = Vec::with_capacity(layout.files.len());
    for target in &layout.files {
        let mut regions = BTreeMap::new();
        for region in &target.regions {
            let content = output
                .regions
                .get(region)
                .ok_or_else(|| error::Error::UnknownRegion(region.clone()))?;
            regions.insert(region.clone(), content.clone());
        }
        let outcome = splice::update_file(&target.path, &regions)
            .with_context(|| format!("updating {}", target.path.display()))?;
        outcomes.push((target.path.clone(), outcome));
    }
    Ok(outcomes)
}

/// Convenience helper: compile a catalog and splice the C++ output into the
/// standard layout under `target_dir`.
pub fn generate_cpp_into(
    catalog: &str,
    options: &ParseOptions,
    config: GeneratorConfig,
    target_dir: &Path,
) -> Result<Vec<(PathBuf, UpdateOutcome)>> {
    let codegen = CodeGenerator::from_catalog(catalog, options)?;
    let output = codegen
        .generate(CppGenerator::new(config))
        .context("running C++ generator")?;
    splice_output(&output, &TargetLayout::standard(target_dir))
}
