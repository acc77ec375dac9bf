//! Catalog data model
//!
//! The registry and its unit types form the bridge between the catalog DSL
//! and code generation. Entities are created once by the parser, mutated in
//! place by the resolver, and treated as immutable once their owning type is
//! marked resolved.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry of all unit types parsed from a catalog, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitRegistry {
    types: Vec<UnitType>,
    /// Maps a type name to its index in `types`.
    name_index: HashMap<String, usize>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type to the registry. Returns `false` if the name is taken.
    pub fn add_type(&mut self, unit_type: UnitType) -> bool {
        if self.name_index.contains_key(&unit_type.name) {
            return false;
        }
        self.name_index
            .insert(unit_type.name.clone(), self.types.len());
        self.types.push(unit_type);
        true
    }

    /// Get a type by name.
    pub fn get(&self, name: &str) -> Option<&UnitType> {
        self.name_index.get(name).map(|&i| &self.types[i])
    }

    /// Get a type by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut UnitType> {
        let i = *self.name_index.get(name)?;
        Some(&mut self.types[i])
    }

    /// Iterate over all types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &UnitType> {
        self.types.iter()
    }

    /// Names of all types in declaration order.
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// One physical-quantity family (Length, Speed, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitType {
    /// Unique identifier within the catalog (e.g. "Length").
    pub name: String,
    /// External symbolic name used by consuming code (e.g. "cLENGTH").
    pub enum_name: String,
    /// Declaration index, used as the catalog-wide type id.
    pub type_id: usize,
    /// Relation to other types, if this is a compound type.
    pub relation: Option<CompoundRelation>,
    /// Units in declaration order; the first is the standard unit.
    pub units: Vec<Unit>,
    /// Simple units of this family get enums remapped below -1. Applied only
    /// when the family also contains compound units, so its plain enums would
    /// otherwise collide with operand enums in a combined representation.
    pub negative_enums: bool,

    /// Set once resolution completes; resolution is idempotent.
    pub resolved: bool,
    /// Total bits used by a packed enum of this type.
    pub bit_width: u32,
    /// Low bits reserved for this type's own simple units (and sentinel).
    pub shift: u32,
    /// Highest enum assigned to a simple unit (0 if there are none).
    pub last_simple_unit: i64,
}

impl UnitType {
    pub fn new(name: String, enum_name: String, type_id: usize) -> Self {
        Self {
            name,
            enum_name,
            type_id,
            relation: None,
            units: Vec::new(),
            negative_enums: false,
            resolved: false,
            bit_width: 0,
            shift: 0,
            last_simple_unit: 0,
        }
    }

    /// The standard unit is always the first declared.
    pub fn standard_unit(&self) -> Option<&Unit> {
        self.units.first()
    }

    /// Find a unit by one of its aliases.
    pub fn unit_by_alias(&self, alias: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.aliases.iter().any(|a| a == alias))
    }

    /// True when any unit's conversion cannot be expressed as a multiplier.
    /// Selects the conversion-dispatch shape in generated code.
    pub fn has_non_multiplier_units(&self) -> bool {
        self.units.iter().any(|u| u.multiplier_value == Some(0.0))
    }

    /// True for 2-operand (ratio/product) compound types.
    pub fn is_two_operand(&self) -> bool {
        matches!(
            self.relation,
            Some(CompoundRelation {
                op: CompoundOp::Ratio | CompoundOp::Product,
                ..
            })
        )
    }

    /// True for 1-operand (integer power) compound types.
    pub fn is_power(&self) -> bool {
        matches!(
            self.relation,
            Some(CompoundRelation {
                op: CompoundOp::Power { .. },
                ..
            })
        )
    }
}

/// How a compound type is derived from its operand types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRelation {
    /// 2 operand names for ratio/product, 1 for power.
    pub operands: Vec<String>,
    pub op: CompoundOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundOp {
    /// `A/B` — multiplier is operand1 / operand2.
    Ratio,
    /// `A*B` — multiplier is operand1 * operand2.
    Product,
    /// `A^n` — multiplier is operand raised to `dimension`.
    Power { dimension: i32 },
}

impl CompoundOp {
    /// The operator character as it appears in the DSL and in emitted code.
    pub fn symbol(&self) -> char {
        match self {
            CompoundOp::Ratio => '/',
            CompoundOp::Product => '*',
            CompoundOp::Power { .. } => '^',
        }
    }
}

/// Multiplier declaration of a unit, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiplierSpec {
    /// A numeric literal or arithmetic expression over literals. The text
    /// `0` marks a non-linear unit whose conversion is hand-written.
    Scalar(String),
    /// The `CU` marker: derive the multiplier from the compound composition.
    Compound,
}

/// One concrete unit within a UnitType.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Canonical internal identifier: `c` + uppercased declared name.
    pub name: String,
    pub multiplier: MultiplierSpec,
    /// User-facing input strings; the first is the preferred output form
    /// unless `default_alias` overrides it.
    pub aliases: Vec<String>,
    pub default_alias: Option<String>,
    /// For `CU` units: operand alias tokens derived from the first alias.
    pub operand_aliases: Vec<String>,

    /// Assigned during resolution.
    pub enum_value: Option<i64>,
    /// Scale factor relative to the standard unit; 0.0 marks non-linear.
    pub multiplier_value: Option<f64>,
    /// Multiplier source text, emitted verbatim into generated tables.
    pub multiplier_text: Option<String>,
}

impl Unit {
    pub fn new(name: String, multiplier: MultiplierSpec, aliases: Vec<String>) -> Self {
        Self {
            name,
            multiplier,
            aliases,
            default_alias: None,
            operand_aliases: Vec::new(),
            enum_value: None,
            multiplier_value: None,
            multiplier_text: None,
        }
    }

    /// Preferred output string for this unit.
    pub fn preferred_name(&self) -> &str {
        self.default_alias.as_deref().unwrap_or(&self.aliases[0])
    }

    pub fn is_compound(&self) -> bool {
        self.multiplier == MultiplierSpec::Compound
    }
}
