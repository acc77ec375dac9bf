use metron_catalog::ParseOptions;
use metron_codegen::generators::cpp::{
    CppGenerator, CppOutput, REGION_DEFINITIONS, REGION_TYPE_ENUMS, REGION_TYPE_INTERFACES,
    REGION_UNIT_CLASSES, REGION_VALUE_CLASSES,
};
use metron_codegen::generators::GeneratorConfig;
use metron_codegen::CodeGenerator;
use pretty_assertions::assert_eq;

const SMALL_CATALOG: &str = "\
BEGIN Length cLENGTH
   meters 1.0 meters meter m
   feet 0.3048 feet foot ft
BEGIN Time cTIME
   seconds 1.0 seconds s
   minutes 60.0 minutes min
BEGIN Speed cSPEED Length/Time
   meters_per_second CU m/s
BEGIN Area cAREA Length^2
   meters2 CU m2
BEGIN Stop
";

fn generate(catalog: &str, config: GeneratorConfig) -> CppOutput {
    let codegen = CodeGenerator::from_catalog(catalog, &ParseOptions::default()).unwrap();
    codegen.generate(CppGenerator::new(config)).unwrap()
}

fn generate_default(catalog: &str) -> CppOutput {
    generate(catalog, GeneratorConfig::default())
}

#[test]
fn class_block_carries_packing_constants() {
    let output = generate_default(SMALL_CATALOG);
    let classes = &output.regions[REGION_UNIT_CLASSES];

    assert!(classes.contains("struct UnitLength\n{"));
    assert!(classes.contains("      cMETERS = 0,\n      cFEET = 1\n"));
    assert!(classes.contains("cSTANDARD_UNIT_ID = 0;"));
    assert!(classes.contains("cBASE_UNIT_COUNT  = 2;"));
    assert!(classes.contains("cUSED_BITS        = 2;"));
    assert!(classes.contains("cLAST_SIMPLE_UNIT = 1;"));
    assert!(classes.contains("cIS_COMPOUND_UNIT = false;"));

    // Every multiplier-bearing type keeps the generic conversion path.
    assert!(classes
        .contains("ConvertToStandard(const double aValue, const int aUnit)   { return UnitFunctions::ConvertToStandard(aValue, aUnit); }"));
}

#[test]
fn compound_class_blocks_declare_operand_types() {
    let output = generate_default(SMALL_CATALOG);
    let classes = &output.regions[REGION_UNIT_CLASSES];

    assert!(classes.contains("using SubjectType = UnitLength;"));
    assert!(classes.contains("using PredicateType = UnitTime;"));
    assert!(classes.contains("cSUBJECT_BITS      = SubjectType::cUSED_BITS;"));
    assert!(classes.contains("cCOMPOUND_OPERATOR = '/';"));

    assert!(classes.contains("using OneDimensionType = UnitLength;"));
    assert!(classes.contains("cDIM = 2;"));
}

#[test]
fn non_linear_types_get_bare_conversion_declarations() {
    let output = generate_default(
        "BEGIN Temperature cTEMPERATURE\n\
         \x20  kelvin 1.0 kelvin k\n\
         \x20  celsius 0 celsius c\n\
         BEGIN Stop\n",
    );
    let classes = &output.regions[REGION_UNIT_CLASSES];
    assert!(classes.contains("ConvertToStandard(const double aValue, const int aUnit);"));
    assert!(classes.contains("ConvertFromStandard(const double aValue, const int aUnit);"));
    assert!(!classes.contains("return UnitFunctions::ConvertToStandard"));
}

#[test]
fn definitions_emit_source_text_multipliers() {
    let output = generate_default(SMALL_CATALOG);
    let definitions = &output.regions[REGION_DEFINITIONS];

    assert!(definitions.contains(
        "const double UnitLength::mBaseUnitMultiplier[UnitLength::cLAST_SIMPLE_UNIT + 2] =\n\
         {\n\
         \x20  1.0, // cMETERS\n\
         \x20  0.3048, // cFEET\n\
         \x200\n\
         };"
    ));
    assert!(definitions.contains("   sm[\"meters\"] = UnitLength::cMETERS;"));
    assert!(definitions.contains("   sm[\"ft\"] = UnitLength::cFEET;"));
    assert!(definitions.contains("   sm[0] = \"meters\";"));
    assert!(definitions.contains("   sm[1] = \"feet\";"));
}

#[test]
fn two_operand_type_with_simple_units_emits_unused_sentinel_row() {
    let output = generate_default(
        "BEGIN Length cLENGTH\n\
         \x20  meters 1.0 meters m\n\
         BEGIN Time cTIME\n\
         \x20  seconds 1.0 seconds s\n\
         BEGIN Speed cSPEED Length/Time\n\
         \x20  meters_per_second CU m/s\n\
         \x20  warp 299792458.0 warp\n\
         BEGIN Stop\n",
    );
    let definitions = &output.regions[REGION_DEFINITIONS];
    assert!(definitions.contains(
        "{\n\
         \x20  0, // unused\n\
         \x20  299792458.0, // cWARP\n\
         \x200\n\
         };"
    ));
}

#[test]
fn type_enum_block_lists_types_in_declaration_order() {
    let output = generate_default(SMALL_CATALOG);
    assert_eq!(
        output.regions[REGION_TYPE_ENUMS],
        "         cLENGTH = 0,\n\
         \x20        cTIME = 1,\n\
         \x20        cSPEED = 2,\n\
         \x20        cAREA = 3"
    );
}

#[test]
fn type_interfaces_register_each_type() {
    let output = generate_default(SMALL_CATALOG);
    let interfaces = &output.regions[REGION_TYPE_INTERFACES];
    assert!(interfaces
        .contains("   mUnitTypes[cLENGTH] = std::make_unique<UnitTypeT<UnitLength>>(\"LENGTH\");\n"));
    assert!(interfaces
        .contains("   mUnitTypes[cSPEED] = std::make_unique<UnitTypeT<UnitSpeed>>(\"SPEED\");\n"));
}

#[test]
fn value_classes_wrap_each_type() {
    let output = generate_default(SMALL_CATALOG);
    let values = &output.regions[REGION_VALUE_CLASSES];
    assert!(values.contains("class LengthValue : public UnitaryValue<UnitLength>"));
    assert!(values.contains("SpeedValue(double aValue, int aUnit)"));
}

#[test]
fn export_macro_and_prefix_are_configurable() {
    let config = GeneratorConfig {
        class_prefix: "Ut".to_string(),
        export_macro: Some("UNITS_EXPORT".to_string()),
    };
    let output = generate(SMALL_CATALOG, config);
    let classes = &output.regions[REGION_UNIT_CLASSES];
    assert!(classes.contains("struct UNITS_EXPORT UtLength"));
    assert!(classes.contains("using SubjectType = UtLength;"));
}

#[test]
fn fragments_use_snake_case_file_names() {
    let output = generate_default(
        "BEGIN Angle cANGLE\n\
         \x20  radians 1.0 radians rad\n\
         BEGIN Time cTIME\n\
         \x20  seconds 1.0 seconds s\n\
         BEGIN AngularRate cANGULAR_RATE Angle/Time\n\
         \x20  radians_per_second CU rad/s\n\
         BEGIN Stop\n",
    );
    assert!(output.fragments.contains_key("angle.hpp"));
    assert!(output.fragments.contains_key("angular_rate.hpp"));
    let fragment = &output.fragments["angular_rate.hpp"];
    assert!(fragment.contains("struct UnitAngularRate"));
    assert!(fragment.contains("class AngularRateValue"));
}
