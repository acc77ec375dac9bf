//! C++ code generator for unit catalogs
//!
//! Renders, per resolved unit type, the class declaration, the out-of-line
//! definitions (multiplier array and lookup maps), and a typed value
//! wrapper, plus the catalog-wide type-id enum and the runtime registration
//! lines. The artifacts are grouped into the named regions the splicer
//! replaces in target files.

mod templates;

use std::collections::BTreeMap;

use anyhow::Result;
use heck::ToSnakeCase;
use metron_catalog::UnitRegistry;

use crate::error::Error;
use crate::generators::{Generator, GeneratorConfig};

/// Region holding the per-type class declarations.
pub const REGION_UNIT_CLASSES: &str = "UnitClasses";
/// Region holding the typed value-wrapper classes.
pub const REGION_VALUE_CLASSES: &str = "UnitValueClasses";
/// Region holding the catalog-wide type-id enum.
pub const REGION_TYPE_ENUMS: &str = "UnitTypeEnums";
/// Region holding the runtime type registration lines.
pub const REGION_TYPE_INTERFACES: &str = "UnitTypeInterfaces";
/// Region holding the out-of-line table definitions.
pub const REGION_DEFINITIONS: &str = "UnitDefinitions";

/// Output of the C++ generator
#[derive(Debug)]
pub struct CppOutput {
    /// Generated text per splice region.
    pub regions: BTreeMap<String, String>,
    /// One self-contained fragment per type (snake_case file names), for
    /// inspection without splicing.
    pub fragments: BTreeMap<String, String>,
}

/// C++ code generator
pub struct CppGenerator {
    config: GeneratorConfig,
}

impl CppGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator for CppGenerator {
    type Output = CppOutput;

    fn generate(&self, registry: &UnitRegistry) -> Result<Self::Output> {
        let mut class_decls = String::new();
        let mut definitions = String::new();
        let mut value_classes = String::new();
        let mut type_interfaces = String::new();
        let mut fragments = BTreeMap::new();

        for unit_type in registry.types() {
            if !unit_type.resolved {
                return Err(Error::Unresolved {
                    unit_type: unit_type.name.clone(),
                }
                .into());
            }

            let class_decl = templates::render_class_decl(unit_type, &self.config);
            let definition = templates::render_definitions(unit_type, &self.config);
            let value_class = templates::render_value_class(unit_type, &self.config);

            class_decls.push_str(&class_decl);
            definitions.push_str(&definition);
            value_classes.push_str(&value_class);
            type_interfaces.push_str(&templates::render_type_interface(unit_type, &self.config));

            fragments.insert(
                format!("{}.hpp", unit_type.name.to_snake_case()),
                format!("{class_decl}{value_class}{definition}"),
            );
        }

        let mut regions = BTreeMap::new();
        regions.insert(REGION_UNIT_CLASSES.to_string(), class_decls);
        regions.insert(REGION_VALUE_CLASSES.to_string(), value_classes);
        regions.insert(REGION_TYPE_ENUMS.to_string(), type_enum_block(registry));
        regions.insert(REGION_TYPE_INTERFACES.to_string(), type_interfaces);
        regions.insert(REGION_DEFINITIONS.to_string(), definitions);

        Ok(CppOutput { regions, fragments })
    }
}

/// The catalog-wide type-id enum, one entry per type in declaration order.
fn type_enum_block(registry: &UnitRegistry) -> String {
    let mut code = String::new();
    for unit_type in registry.types() {
        code.push_str(&format!(
            "         {} = {},\n",
            unit_type.enum_name, unit_type.type_id
        ));
    }
    // No comma after the last enumerator.
    code.truncate(code.len().saturating_sub(2));
    code
}
