//! Error types for catalog parsing and resolution

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("line {line}: malformed BEGIN directive: {message}")]
    MalformedBegin { line: usize, message: String },

    #[error("line {line}: malformed compound token '{token}': operand missing")]
    MalformedCompound { line: usize, token: String },

    #[error("line {line}: unit declared outside of a BEGIN block")]
    UnitOutsideType { line: usize },

    #[error("line {line}: unit declaration needs a name, a multiplier and at least one alias")]
    MalformedUnit { line: usize },

    #[error("line {line}: duplicate unit type '{name}'")]
    DuplicateType { line: usize, name: String },

    #[error("line {line}: compound unit alias '{alias}' has no operator delimiter")]
    NoDelimiter { line: usize, alias: String },

    #[error("line {line}: CU multiplier in unit type '{unit_type}', which declares no compound relation")]
    CompoundUnitInSimpleType { line: usize, unit_type: String },

    #[error("line {line}: duplicate alias '{alias}' within unit type '{unit_type}'")]
    DuplicateAlias {
        line: usize,
        unit_type: String,
        alias: String,
    },

    #[error("unit type '{0}' does not exist")]
    UnknownType(String),

    #[error("unit type '{unit_type}' has no unit with alias '{alias}'")]
    UnknownAlias { unit_type: String, alias: String },

    #[error("compound relation cycle involving unit type '{0}'")]
    CompoundCycle(String),

    #[error("standard unit '{unit}' of type '{unit_type}' has multiplier {value}, expected 1")]
    StandardUnitMultiplier {
        unit_type: String,
        unit: String,
        value: f64,
    },

    #[error("unit '{unit}' of type '{unit_type}': bad multiplier expression: {message}")]
    BadExpression {
        unit_type: String,
        unit: String,
        message: String,
    },

    #[error(
        "power unit '{unit}' of type '{unit_type}': no alias of operand unit '{operand}' \
         occurs in its preferred name"
    )]
    PowerAliasMismatch {
        unit_type: String,
        unit: String,
        operand: String,
    },
}
