//! Compound resolution and enum packing
//!
//! Resolution computes, for every unit type, the fields needed to encode
//! each of its units as a single integer and the multiplier needed to
//! convert between that unit and the type's standard unit. Compound types
//! resolve their operand types first (depth-first, memoized through the
//! `resolved` flag); a cycle in the declared relations is a fatal error.
//!
//! Enum layout of a resolved 2-operand compound unit:
//!
//! ```text
//! | operand1 enum | operand2 enum | shift bits |
//! ```
//!
//! where the low `shift` bits distinguish the type's own simple units, with
//! slot 0 reserved as the compound-flag sentinel.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::expr;
use crate::model::{CompoundOp, MultiplierSpec, UnitRegistry, UnitType};

/// Resolve every type in the registry, in declaration order.
pub fn resolve_all(registry: &mut UnitRegistry) -> Result<()> {
    let names = registry.type_names();
    let mut visiting = HashSet::new();
    for name in &names {
        resolve_type(registry, name, &mut visiting)?;
    }
    Ok(())
}

/// Recover the operand enum pair from a packed 2-operand compound enum.
///
/// `shift` is the compound type's own shift; `predicate_bits` is the second
/// operand type's bit width.
pub fn unpack(enum_value: i64, shift: u32, predicate_bits: u32) -> (i64, i64) {
    let predicate = (enum_value >> shift) & ((1 << predicate_bits) - 1);
    let subject = enum_value >> shift >> predicate_bits;
    (subject, predicate)
}

fn resolve_type(
    registry: &mut UnitRegistry,
    name: &str,
    visiting: &mut HashSet<String>,
) -> Result<()> {
    let unit_type = registry
        .get(name)
        .ok_or_else(|| Error::UnknownType(name.to_string()))?;
    if unit_type.resolved {
        return Ok(());
    }
    if !visiting.insert(name.to_string()) {
        return Err(Error::CompoundCycle(name.to_string()));
    }

    let operand_names: Vec<String> = unit_type
        .relation
        .as_ref()
        .map(|r| r.operands.clone())
        .unwrap_or_default();
    for operand in &operand_names {
        resolve_type(registry, operand, visiting)?;
    }

    // Operand types are resolved now; snapshot them so the type itself can
    // be mutated below.
    let operand_types: Vec<UnitType> = operand_names
        .iter()
        .map(|n| registry.get(n).cloned().unwrap())
        .collect();

    let unit_type = registry.get_mut(name).unwrap();
    assign_simple_units(unit_type)?;
    check_standard_unit(unit_type)?;
    assign_compound_units(unit_type, &operand_types)?;

    unit_type.bit_width = if unit_type.relation.is_some() {
        operand_types.iter().map(|o| o.bit_width).sum::<u32>() + unit_type.shift
    } else {
        unit_type.shift
    };

    apply_negative_enums(unit_type);
    unit_type.resolved = true;
    visiting.remove(name);
    Ok(())
}

/// Assign enums and multipliers to the simple (non-`CU`) units, then derive
/// `last_simple_unit` and `shift`.
fn assign_simple_units(unit_type: &mut UnitType) -> Result<()> {
    let two_operand = unit_type.is_two_operand();
    let type_name = unit_type.name.clone();
    let mut enum_val: i64 = 0;

    for unit in &mut unit_type.units {
        let MultiplierSpec::Scalar(text) = &unit.multiplier else {
            continue;
        };
        // Slot 0 of a 2-operand compound is the compound-flag sentinel.
        if enum_val == 0 && two_operand {
            enum_val = 1;
        }
        unit.enum_value = Some(enum_val);
        let value = expr::eval(text).map_err(|message| Error::BadExpression {
            unit_type: type_name.clone(),
            unit: unit.name.clone(),
            message,
        })?;
        unit.multiplier_value = Some(value);
        unit.multiplier_text = Some(text.clone());
        enum_val += 1;
    }

    unit_type.last_simple_unit = (enum_val - 1).max(0);
    // A pure-compound 2-operand type still reserves the sentinel slot.
    if two_operand && enum_val == 0 {
        enum_val = 1;
    }
    unit_type.shift = ceil_log2((enum_val + 1) as u64);
    Ok(())
}

/// The standard unit's multiplier, when a plain literal, must be 1.
fn check_standard_unit(unit_type: &UnitType) -> Result<()> {
    let Some(first) = unit_type.standard_unit() else {
        return Ok(());
    };
    let MultiplierSpec::Scalar(text) = &first.multiplier else {
        return Ok(());
    };
    if let Ok(value) = text.parse::<f64>() {
        if value != 1.0 && value != 0.0 {
            return Err(Error::StandardUnitMultiplier {
                unit_type: unit_type.name.clone(),
                unit: first.name.clone(),
                value,
            });
        }
    }
    Ok(())
}

/// Pack enums and derive multipliers for the `CU` units.
fn assign_compound_units(unit_type: &mut UnitType, operand_types: &[UnitType]) -> Result<()> {
    let Some(relation) = unit_type.relation.clone() else {
        return Ok(());
    };
    let shift = unit_type.shift;
    let type_name = unit_type.name.clone();

    for i in 0..unit_type.units.len() {
        if !unit_type.units[i].is_compound() {
            continue;
        }
        let operand_aliases = unit_type.units[i].operand_aliases.clone();

        match relation.op {
            CompoundOp::Ratio | CompoundOp::Product => {
                let u1 = lookup(&operand_types[0], &operand_aliases[0])?;
                let u2 = lookup(&operand_types[1], &operand_aliases[1])?;
                let (e1, e2) = (u1.enum_value.unwrap(), u2.enum_value.unwrap());
                let (m1, m2) = (u1.multiplier_value.unwrap(), u2.multiplier_value.unwrap());

                let unit = &mut unit_type.units[i];
                unit.enum_value =
                    Some((e1 << operand_types[1].bit_width << shift) | (e2 << shift));
                unit.multiplier_value = Some(match relation.op {
                    CompoundOp::Ratio => m1 / m2,
                    _ => m1 * m2,
                });
            }
            CompoundOp::Power { dimension } => {
                let operand = lookup(&operand_types[0], &operand_aliases[0])?;
                let operand_enum = operand.enum_value.unwrap();
                let multiplier = operand.multiplier_value.unwrap().powi(dimension);

                // A multi-dimensional unit shadows the one-dimension unit its
                // name is built from; it borrows that unit's enum rather than
                // allocating its own.
                let preferred = unit_type.units[i].preferred_name().to_string();
                let matched = operand.aliases.iter().any(|a| preferred.contains(a.as_str()));
                if !matched {
                    return Err(Error::PowerAliasMismatch {
                        unit_type: type_name.clone(),
                        unit: unit_type.units[i].name.clone(),
                        operand: operand.name.clone(),
                    });
                }
                let unit = &mut unit_type.units[i];
                unit.enum_value = Some(operand_enum);
                unit.multiplier_value = Some(multiplier);
            }
        }
    }
    Ok(())
}

fn lookup<'a>(operand_type: &'a UnitType, alias: &str) -> Result<&'a crate::model::Unit> {
    operand_type
        .unit_by_alias(alias)
        .ok_or_else(|| Error::UnknownAlias {
            unit_type: operand_type.name.clone(),
            alias: alias.to_string(),
        })
}

/// Remap simple-unit enums below -1 for flagged families. -1 itself stays
/// reserved as the global "invalid unit" sentinel, so the first remapped
/// value is -2. Only applies when the family also has compound units.
fn apply_negative_enums(unit_type: &mut UnitType) {
    if !unit_type.negative_enums {
        return;
    }
    if !unit_type.units.iter().any(|u| u.is_compound()) {
        return;
    }
    for unit in &mut unit_type.units {
        if !unit.is_compound() {
            let e = unit.enum_value.unwrap();
            unit.enum_value = Some(-(e + 2));
        }
    }
}

/// Number of bits needed to represent values in `0..x`.
fn ceil_log2(x: u64) -> u32 {
    if x <= 1 {
        0
    } else {
        64 - (x - 1).leading_zeros()
    }
}
