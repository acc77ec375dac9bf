//! Fixed C++ templates and their per-type substitution sets
//!
//! Placeholder names are substituted by `crate::template::render` from an
//! explicit field set built out of a resolved `UnitType`.

use metron_catalog::{CompoundOp, UnitType};

use crate::generators::GeneratorConfig;
use crate::template::render;

/// Per-type class declaration: enum, packing constants, conversion hooks,
/// lookup-table members.
pub const CLASS_DECL: &str = "
struct $EXPORT$CLASS_NAME
{
   enum BaseUnit
   {
$ENUM_LIST
   };
   static constexpr int                      cSTANDARD_UNIT_ID = $STD_UNIT_ID;
   static constexpr int                      cBASE_UNIT_COUNT  = $BU_COUNT;
   static constexpr int                      cUSED_BITS        = $BITS;
   static constexpr int                      cUNIT_TYPE_ID     = $UNIT_TYPE_ID;
   static constexpr int                      cLAST_SIMPLE_UNIT = $LAST_SIMPLE_UNIT;
   static constexpr bool                     cIS_COMPOUND_UNIT = $IS_COMPOUND;
   static constexpr bool                     cIS_MULTIDIM      = $IS_MULTIDIM;
$COMPOUND_TYPES
   static double                             ConvertToStandard(const double aValue, const int aUnit)$CONVERT_TO
   static double                             ConvertFromStandard(const double aValue, const int aUnit)$CONVERT_FROM
   static std::string                        FindUnitName(int aUnitId)                                 { return UnitFunctions::FindUnitName(aUnitId); }
   static int                                ReadUnit(const std::string& aUnitName)                    { return UnitFunctions::ReadUnit(aUnitName); }
   static bool                               IsUnitValid(int aUnitId)                                  { return UnitFunctions::IsUnitValid(aUnitId); }
   static bool                               IsUnitValid(const std::string& aName)                     { return UnitFunctions::IsUnitValid(aName); }
   static const double                       mBaseUnitMultiplier[cLAST_SIMPLE_UNIT + 2];
   static const std::map<std::string, int>   mUnitStrings;
   static const std::map<int, std::string>   mUnitToString;
};
";

/// Per-type out-of-line definitions: multiplier array and both lookup maps.
pub const DEFINITIONS: &str = "
const double $CLASS_NAME::mBaseUnitMultiplier[$CLASS_NAME::cLAST_SIMPLE_UNIT + 2] =
{
$UNIT_MULTIPLIERS 0
};
const std::map<std::string, int> $CLASS_NAME_UnitStrings()
{
   std::map<std::string, int> sm;
$UNIT_STRING_INIT
   return sm;
}
const std::map<std::string, int> $CLASS_NAME::mUnitStrings = $CLASS_NAME_UnitStrings();
const std::map<int, std::string> $CLASS_NAME_UnitToStrings()
{
   std::map<int, std::string> sm;
$UNIT_TO_STRING_INIT
   return sm;
}
const std::map<int, std::string> $CLASS_NAME::mUnitToString = $CLASS_NAME_UnitToStrings();

";

/// Typed value wrapper, one per unit type.
pub const VALUE_CLASS: &str = "
class $EXPORT$TYPE_NAMEValue : public UnitaryValue<$CLASS_NAME>
{
   public:
      $TYPE_NAMEValue() : UnitaryValue<$CLASS_NAME>() {}
      $TYPE_NAMEValue(double aValue) : UnitaryValue<$CLASS_NAME>(aValue) {}
      $TYPE_NAMEValue(double aValue, int aUnit) : UnitaryValue<$CLASS_NAME>() { Set(aValue, aUnit); }
      $TYPE_NAMEValue(double aValue, const std::string& aUnit) : UnitaryValue<$CLASS_NAME>() { Set(aValue, aUnit); }
};
";

/// One registration line per type, spliced into the runtime registry ctor.
pub const TYPE_INTERFACE: &str =
    "   mUnitTypes[$UNIT_ENUM_NAME] = std::make_unique<UnitTypeT<$CLASS_NAME>>(\"$UNIT_CAPS_NAME\");\n";

pub fn class_name(unit_type: &UnitType, config: &GeneratorConfig) -> String {
    format!("{}{}", config.class_prefix, unit_type.name)
}

fn export_text(config: &GeneratorConfig) -> String {
    match &config.export_macro {
        Some(macro_name) => format!("{macro_name} "),
        None => String::new(),
    }
}

/// Build the substitution set shared by all templates of one type.
pub fn substitutions(unit_type: &UnitType, config: &GeneratorConfig) -> Vec<(&'static str, String)> {
    let simple_count = unit_type.units.iter().filter(|u| !u.is_compound()).count();
    let std_unit_id = unit_type
        .standard_unit()
        .and_then(|u| u.enum_value)
        .unwrap_or(0);

    // Conversion hooks degrade to bare declarations when the type carries
    // non-linear units; those conversions are hand-written elsewhere.
    let (convert_to, convert_from) = if unit_type.has_non_multiplier_units() {
        (";".to_string(), ";".to_string())
    } else {
        (
            "   { return UnitFunctions::ConvertToStandard(aValue, aUnit); }".to_string(),
            " { return UnitFunctions::ConvertFromStandard(aValue, aUnit); }".to_string(),
        )
    };

    vec![
        ("CLASS_NAME", class_name(unit_type, config)),
        ("TYPE_NAME", unit_type.name.clone()),
        ("EXPORT", export_text(config)),
        ("ENUM_LIST", enum_list(unit_type)),
        ("STD_UNIT_ID", std_unit_id.to_string()),
        ("BU_COUNT", simple_count.to_string()),
        ("BITS", unit_type.bit_width.to_string()),
        ("UNIT_TYPE_ID", unit_type.type_id.to_string()),
        ("LAST_SIMPLE_UNIT", unit_type.last_simple_unit.to_string()),
        ("IS_COMPOUND", unit_type.is_two_operand().to_string()),
        ("IS_MULTIDIM", unit_type.is_power().to_string()),
        ("COMPOUND_TYPES", compound_types(unit_type, config)),
        ("CONVERT_TO", convert_to),
        ("CONVERT_FROM", convert_from),
        ("UNIT_MULTIPLIERS", multiplier_rows(unit_type)),
        ("UNIT_STRING_INIT", string_map_init(unit_type, config)),
        ("UNIT_TO_STRING_INIT", enum_map_init(unit_type)),
        ("UNIT_ENUM_NAME", unit_type.enum_name.clone()),
        ("UNIT_CAPS_NAME", caps_name(unit_type)),
    ]
}

pub fn render_class_decl(unit_type: &UnitType, config: &GeneratorConfig) -> String {
    render(CLASS_DECL, &substitutions(unit_type, config))
}

pub fn render_definitions(unit_type: &UnitType, config: &GeneratorConfig) -> String {
    render(DEFINITIONS, &substitutions(unit_type, config))
}

pub fn render_value_class(unit_type: &UnitType, config: &GeneratorConfig) -> String {
    render(VALUE_CLASS, &substitutions(unit_type, config))
}

pub fn render_type_interface(unit_type: &UnitType, config: &GeneratorConfig) -> String {
    render(TYPE_INTERFACE, &substitutions(unit_type, config))
}

/// Symbolic name handed to the runtime type interface: the enum symbol
/// without its `c` prefix (`cLENGTH` -> `LENGTH`).
fn caps_name(unit_type: &UnitType) -> String {
    unit_type
        .enum_name
        .strip_prefix('c')
        .unwrap_or(&unit_type.enum_name)
        .to_string()
}

fn enum_list(unit_type: &UnitType) -> String {
    let mut code = String::new();
    for unit in &unit_type.units {
        code.push_str(&format!(
            "      {} = {},\n",
            unit.name,
            unit.enum_value.unwrap_or(0)
        ));
    }
    // No comma after the last enumerator.
    code.truncate(code.len().saturating_sub(2));
    code
}

/// Multiplier array rows: simple units only, source text verbatim. The
/// sentinel slot of a 2-operand compound with simple units holds a zero.
fn multiplier_rows(unit_type: &UnitType) -> String {
    let mut rows = String::new();
    for unit in &unit_type.units {
        if unit.is_compound() {
            continue;
        }
        if unit_type.is_two_operand() && rows.is_empty() {
            rows.push_str("   0, // unused\n");
        }
        let text = unit
            .multiplier_text
            .as_deref()
            .unwrap_or("0");
        rows.push_str(&format!("   {}, // {}\n", text, unit.name));
    }
    rows
}

fn string_map_init(unit_type: &UnitType, config: &GeneratorConfig) -> String {
    let class = class_name(unit_type, config);
    let mut code = String::new();
    for unit in &unit_type.units {
        for alias in &unit.aliases {
            code.push_str(&format!("   sm[\"{alias}\"] = {class}::{};\n", unit.name));
        }
    }
    code
}

fn enum_map_init(unit_type: &UnitType) -> String {
    let mut code = String::new();
    for unit in &unit_type.units {
        code.push_str(&format!(
            "   sm[{}] = \"{}\";\n",
            unit.enum_value.unwrap_or(0),
            unit.preferred_name()
        ));
    }
    code
}

/// The `UnitFunctions` alias plus, for compound types, the operand type
/// aliases and packing constants generated code decodes with.
fn compound_types(unit_type: &UnitType, config: &GeneratorConfig) -> String {
    let class = class_name(unit_type, config);
    let mut code = format!(
        "   using UnitFunctions = UnitsDetail::UnitFunctionsT<{class}, cIS_COMPOUND_UNIT, cIS_MULTIDIM>;\n"
    );
    let Some(relation) = &unit_type.relation else {
        return code;
    };
    match relation.op {
        CompoundOp::Ratio | CompoundOp::Product => {
            let subject = format!("{}{}", config.class_prefix, relation.operands[0]);
            let predicate = format!("{}{}", config.class_prefix, relation.operands[1]);
            code.push_str(&format!(
                "\n   using SubjectType = {subject};\n   using PredicateType = {predicate};\n   static constexpr int  cSUBJECT_BITS      = SubjectType::cUSED_BITS;\n   static constexpr int  cPREDICATE_BITS    = PredicateType::cUSED_BITS;\n   static constexpr char cCOMPOUND_OPERATOR = '{}';\n",
                relation.op.symbol()
            ));
        }
        CompoundOp::Power { dimension } => {
            let operand = format!("{}{}", config.class_prefix, relation.operands[0]);
            code.push_str(&format!(
                "   using OneDimensionType = {operand};\n   static constexpr int cDIM = {dimension};\n"
            ));
        }
    }
    code
}
