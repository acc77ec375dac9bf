//! Catalog DSL parser
//!
//! The catalog is strictly line-oriented. `BEGIN <Name> <cENUM> [<relation>]`
//! opens a unit type; the sentinel `BEGIN Stop` terminates parsing. Every
//! other non-blank line inside an open type declares one unit:
//!
//! ```text
//! name multiplier alias...
//! ```
//!
//! The multiplier is a numeric literal, an arithmetic expression, `CU` for
//! compound-derived, or `0` for non-linear units. An alias prefixed with
//! `default:` becomes the preferred output form.

use crate::error::{Error, Result};
use crate::model::{CompoundOp, CompoundRelation, MultiplierSpec, Unit, UnitRegistry, UnitType};

const DEFAULT_MARKER: &str = "default:";

/// Caller-provided parse configuration.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Families whose simple units get the negative-enum remap. Sets the
    /// `negative_enums` flag on matching types.
    pub negative_enum_types: Vec<String>,
}

/// Parse a catalog with default options.
pub fn parse(text: &str) -> Result<UnitRegistry> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse a catalog into a registry of unresolved unit types.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<UnitRegistry> {
    let mut registry = UnitRegistry::new();
    let mut open: Option<UnitType> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens[0] == "BEGIN" {
            if let Some(finished) = open.take() {
                register(&mut registry, finished, line_no)?;
            }
            let name = *tokens.get(1).ok_or_else(|| Error::MalformedBegin {
                line: line_no,
                message: "missing type name".to_string(),
            })?;
            if name == "Stop" {
                break;
            }
            let enum_name = *tokens.get(2).ok_or_else(|| Error::MalformedBegin {
                line: line_no,
                message: format!("type '{name}' is missing its enum symbol"),
            })?;

            let mut unit_type =
                UnitType::new(name.to_string(), enum_name.to_string(), registry.len());
            if let Some(token) = tokens.get(3) {
                unit_type.relation = Some(parse_relation(token, line_no)?);
            }
            open = Some(unit_type);
        } else {
            let unit_type = open.as_mut().ok_or(Error::UnitOutsideType { line: line_no })?;
            let unit = parse_unit(&tokens, unit_type, line_no)?;
            unit_type.units.push(unit);
        }
    }

    if let Some(finished) = open.take() {
        let line_no = text.lines().count();
        register(&mut registry, finished, line_no)?;
    }

    for name in &options.negative_enum_types {
        if let Some(unit_type) = registry.get_mut(name) {
            unit_type.negative_enums = true;
        }
    }

    Ok(registry)
}

fn register(registry: &mut UnitRegistry, unit_type: UnitType, line: usize) -> Result<()> {
    let name = unit_type.name.clone();
    if !registry.add_type(unit_type) {
        return Err(Error::DuplicateType { line, name });
    }
    Ok(())
}

/// Parse a compound-relation token: `A/B`, `A*B` or `A^n`.
fn parse_relation(token: &str, line: usize) -> Result<CompoundRelation> {
    let malformed = || Error::MalformedCompound {
        line,
        token: token.to_string(),
    };

    if let Some((operand, exponent)) = token.split_once('^') {
        if operand.is_empty() {
            return Err(malformed());
        }
        let dimension: i32 = exponent.parse().map_err(|_| malformed())?;
        return Ok(CompoundRelation {
            operands: vec![operand.to_string()],
            op: CompoundOp::Power { dimension },
        });
    }
    for (sym, op) in [('*', CompoundOp::Product), ('/', CompoundOp::Ratio)] {
        if let Some((lhs, rhs)) = token.split_once(sym) {
            if lhs.is_empty() || rhs.is_empty() {
                return Err(malformed());
            }
            return Ok(CompoundRelation {
                operands: vec![lhs.to_string(), rhs.to_string()],
                op,
            });
        }
    }
    Err(malformed())
}

fn parse_unit(tokens: &[&str], unit_type: &UnitType, line: usize) -> Result<Unit> {
    if tokens.len() < 3 {
        return Err(Error::MalformedUnit { line });
    }
    let name = format!("c{}", tokens[0].to_uppercase());
    let multiplier = if tokens[1] == "CU" {
        MultiplierSpec::Compound
    } else {
        MultiplierSpec::Scalar(tokens[1].to_string())
    };

    let mut aliases = Vec::with_capacity(tokens.len() - 2);
    let mut default_alias = None;
    for token in &tokens[2..] {
        let alias = match token.strip_prefix(DEFAULT_MARKER) {
            Some(stripped) => {
                default_alias = Some(stripped.to_string());
                stripped
            }
            None => token,
        };
        aliases.push(alias.to_string());
    }

    for alias in &aliases {
        let clash = unit_type.units.iter().any(|u| u.aliases.contains(alias));
        if clash {
            return Err(Error::DuplicateAlias {
                line,
                unit_type: unit_type.name.clone(),
                alias: alias.clone(),
            });
        }
    }

    let mut unit = Unit::new(name, multiplier, aliases);
    unit.default_alias = default_alias;
    if unit.is_compound() {
        unit.operand_aliases = operand_aliases(&unit.aliases[0], unit_type, line)?;
    }
    Ok(unit)
}

/// Derive the operand alias tokens of a `CU` unit from its first alias.
///
/// A ratio/product unit splits on the rightmost occurrence of the type's
/// operator (so `w/m2/sr/m` under a ratio splits into `w/m2/sr` and `m`).
/// A power unit drops a `^n` suffix or a trailing dimension digit
/// (`m2` -> `m`).
fn operand_aliases(alias: &str, unit_type: &UnitType, line: usize) -> Result<Vec<String>> {
    let relation = unit_type
        .relation
        .as_ref()
        .ok_or_else(|| Error::CompoundUnitInSimpleType {
            line,
            unit_type: unit_type.name.clone(),
        })?;

    let no_delimiter = || Error::NoDelimiter {
        line,
        alias: alias.to_string(),
    };

    // A 2-operand relation needs its operator in the alias; the power-style
    // forms below would yield a single operand token.
    if let CompoundOp::Ratio | CompoundOp::Product = relation.op {
        let sym = relation.op.symbol();
        return match alias.rfind(sym) {
            Some(pos) => Ok(vec![alias[..pos].to_string(), alias[pos + 1..].to_string()]),
            None => Err(no_delimiter()),
        };
    }
    if let Some((operand, _)) = alias.split_once('^') {
        return Ok(vec![operand.to_string()]);
    }
    if alias.ends_with('2') || alias.ends_with('3') {
        return Ok(vec![alias[..alias.len() - 1].to_string()]);
    }
    Err(no_delimiter())
}
