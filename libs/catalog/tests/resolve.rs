use metron_catalog::{
    compile, default_registry, unpack, CompoundOp, Error, MultiplierSpec, UnitType,
};

#[test]
fn simple_type_resolves_in_declaration_order() {
    let registry = compile(
        "BEGIN Length cLENGTH\n\
         \x20  meters 1.0 meters meter m\n\
         \x20  feet 0.3048 feet foot ft\n\
         BEGIN Stop\n",
    )
    .unwrap();

    let length = registry.get("Length").unwrap();
    assert!(length.resolved);
    assert_eq!(length.standard_unit().unwrap().preferred_name(), "meters");
    assert_eq!(length.units[0].enum_value, Some(0));
    assert_eq!(length.units[1].enum_value, Some(1));
    assert_eq!(length.units[0].multiplier_value, Some(1.0));
    assert_eq!(length.units[1].multiplier_value, Some(0.3048));
}

#[test]
fn ratio_compound_combines_operand_enums() {
    let registry = compile(
        "BEGIN Length cLENGTH\n\
         \x20  meters 1.0 meters meter m\n\
         \x20  feet 0.3048 feet foot ft\n\
         BEGIN Time cTIME\n\
         \x20  seconds 1.0 seconds s\n\
         \x20  minutes 60.0 minutes min\n\
         BEGIN Speed cSPEED Length/Time\n\
         \x20  meters_per_second CU m/s\n\
         \x20  feet_per_minute CU ft/min\n\
         BEGIN Stop\n",
    )
    .unwrap();

    let speed = registry.get("Speed").unwrap();
    // No simple units, so only the sentinel slot is reserved.
    assert_eq!(speed.shift, 1);
    let time_bits = registry.get("Time").unwrap().bit_width;

    let mps = &speed.units[0];
    assert_eq!(mps.enum_value, Some(0));
    assert_eq!(mps.multiplier_value, Some(1.0));

    let fpm = &speed.units[1];
    let expected = (1i64 << time_bits << speed.shift) | (1 << speed.shift);
    assert_eq!(fpm.enum_value, Some(expected));
    assert_eq!(fpm.multiplier_value, Some(0.3048 / 60.0));

    let (subject, predicate) = unpack(expected, speed.shift, time_bits);
    assert_eq!((subject, predicate), (1, 1));
}

#[test]
fn two_operand_compound_with_simple_units_reserves_sentinel() {
    let registry = default_registry();
    let accel = registry.get("Acceleration").unwrap();

    // The lone simple unit starts at 1; slot 0 is the compound flag.
    let g = accel.unit_by_alias("g").unwrap();
    assert_eq!(g.enum_value, Some(1));
    assert_eq!(g.multiplier_value, Some(9.80665));
    assert_eq!(accel.last_simple_unit, 1);
    assert_eq!(accel.shift, 2);

    let time2_bits = registry.get("Time2").unwrap().bit_width;
    let fps2 = accel.unit_by_alias("ft/s2").unwrap();
    let (subject, predicate) = unpack(fps2.enum_value.unwrap(), accel.shift, time2_bits);
    let feet = registry.get("Length").unwrap().unit_by_alias("ft").unwrap();
    assert_eq!(subject, feet.enum_value.unwrap());
    assert_eq!(predicate, 0);
}

#[test]
fn default_catalog_standard_units_have_unit_multiplier() {
    for unit_type in default_registry().types() {
        let standard = unit_type.standard_unit().unwrap();
        assert_eq!(
            standard.multiplier_value,
            Some(1.0),
            "standard unit of {} is not 1.0",
            unit_type.name
        );
    }
}

#[test]
fn default_catalog_enums_are_distinct_within_each_type() {
    for unit_type in default_registry().types() {
        let enums: Vec<i64> = unit_type
            .units
            .iter()
            .map(|u| u.enum_value.unwrap())
            .collect();
        for (i, a) in enums.iter().enumerate() {
            for b in &enums[i + 1..] {
                assert_ne!(a, b, "duplicate enum {a} in type {}", unit_type.name);
            }
        }
    }
}

#[test]
fn alias_round_trip_through_enum() {
    fn unit_for_enum(unit_type: &UnitType, value: i64) -> &metron_catalog::Unit {
        unit_type
            .units
            .iter()
            .find(|u| u.enum_value == Some(value))
            .unwrap()
    }

    for unit_type in default_registry().types() {
        for unit in &unit_type.units {
            for alias in &unit.aliases {
                let found = unit_type.unit_by_alias(alias).unwrap();
                assert_eq!(found.enum_value, unit.enum_value);
                let back = unit_for_enum(unit_type, found.enum_value.unwrap());
                assert_eq!(back.preferred_name(), unit.preferred_name());
            }
        }
    }
}

#[test]
fn speed_knots_pack_and_unpack() {
    let registry = default_registry();
    let speed = registry.get("Speed").unwrap();
    let knots = speed.unit_by_alias("knots").unwrap();

    let length = registry.get("Length").unwrap();
    let time = registry.get("Time").unwrap();
    let nm = length.unit_by_alias("nm").unwrap().enum_value.unwrap();
    let hours = time.unit_by_alias("h").unwrap().enum_value.unwrap();

    let (subject, predicate) = unpack(knots.enum_value.unwrap(), speed.shift, time.bit_width);
    assert_eq!((subject, predicate), (nm, hours));

    let expected = 1852.0 / (60.0 * 60.0);
    let got = knots.multiplier_value.unwrap();
    assert!((got - expected).abs() < 1e-12);
}

#[test]
fn power_type_borrows_operand_enum() {
    let registry = default_registry();
    let area = registry.get("Area").unwrap();
    let length = registry.get("Length").unwrap();

    let m2 = area.unit_by_alias("m2").unwrap();
    let meters = length.unit_by_alias("m").unwrap();
    assert_eq!(m2.enum_value, meters.enum_value);
    assert_eq!(m2.multiplier_value, Some(1.0));

    let ft2 = area.unit_by_alias("ft2").unwrap();
    let feet = length.unit_by_alias("ft").unwrap();
    assert_eq!(ft2.enum_value, feet.enum_value);
    assert_eq!(ft2.multiplier_value, Some(0.3048 * 0.3048));

    let volume = registry.get("Volume").unwrap();
    let m3 = volume.unit_by_alias("m3").unwrap();
    assert_eq!(m3.multiplier_value, Some(1.0));
    assert_eq!(
        volume.relation.as_ref().unwrap().op,
        CompoundOp::Power { dimension: 3 }
    );
}

#[test]
fn negative_enum_family_remaps_simple_units() {
    let registry = default_registry();
    let area_db = registry.get("AreaDB").unwrap();
    assert!(area_db.negative_enums);

    let dbsm = area_db.unit_by_alias("dbsm").unwrap();
    assert_eq!(dbsm.enum_value, Some(-2));
    // The compound unit keeps its borrowed non-negative enum.
    let m2 = area_db.unit_by_alias("m2").unwrap();
    assert_eq!(m2.enum_value, Some(0));
}

#[test]
fn non_multiplier_units_flag_the_type() {
    let registry = default_registry();
    assert!(registry.get("Temperature").unwrap().has_non_multiplier_units());
    assert!(registry.get("PowerDB").unwrap().has_non_multiplier_units());
    assert!(!registry.get("Length").unwrap().has_non_multiplier_units());
    assert!(!registry.get("Speed").unwrap().has_non_multiplier_units());
}

#[test]
fn unknown_operand_type_is_fatal() {
    let err = compile(
        "BEGIN Speed cSPEED Length/Time\n\
         \x20  meters_per_second CU m/s\n\
         BEGIN Stop\n",
    )
    .unwrap_err();
    assert_eq!(err, Error::UnknownType("Length".to_string()));
}

#[test]
fn unknown_operand_alias_is_fatal() {
    let err = compile(
        "BEGIN Length cLENGTH\n\
         \x20  meters 1.0 meters m\n\
         BEGIN Time cTIME\n\
         \x20  seconds 1.0 seconds s\n\
         BEGIN Speed cSPEED Length/Time\n\
         \x20  furlongs_per_second CU fur/s\n\
         BEGIN Stop\n",
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::UnknownAlias {
            unit_type: "Length".to_string(),
            alias: "fur".to_string(),
        }
    );
}

#[test]
fn ratio_unit_with_power_style_alias_is_fatal() {
    let err = compile(
        "BEGIN Length cLENGTH\n\
         \x20  meters 1.0 meters m\n\
         BEGIN Time cTIME\n\
         \x20  seconds 1.0 seconds s\n\
         BEGIN Speed cSPEED Length/Time\n\
         \x20  odd CU m2\n\
         BEGIN Stop\n",
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::NoDelimiter {
            line: 6,
            alias: "m2".to_string(),
        }
    );
}

#[test]
fn compound_cycle_is_fatal() {
    let err = compile(
        "BEGIN A cA B^2\n\
         BEGIN B cB A^2\n\
         BEGIN Stop\n",
    )
    .unwrap_err();
    assert!(matches!(err, Error::CompoundCycle(_)));
}

#[test]
fn power_alias_mismatch_is_fatal() {
    let err = compile(
        "BEGIN Length cLENGTH\n\
         \x20  meters 1.0 meters\n\
         BEGIN Area cAREA Length^2\n\
         \x20  square CU meters2 default:sq\n\
         BEGIN Stop\n",
    )
    .unwrap_err();
    assert!(matches!(err, Error::PowerAliasMismatch { .. }));
}

#[test]
fn standard_unit_literal_must_be_one() {
    let err = compile(
        "BEGIN Length cLENGTH\n\
         \x20  feet 0.3048 feet ft\n\
         BEGIN Stop\n",
    )
    .unwrap_err();
    assert!(matches!(err, Error::StandardUnitMultiplier { .. }));
}

#[test]
fn registry_round_trips_through_json() {
    let registry = compile(
        "BEGIN Length cLENGTH\n\
         \x20  meters 1.0 meters m\n\
         \x20  feet 0.3048 feet ft\n\
         BEGIN Area cAREA Length^2\n\
         \x20  meters2 CU m2\n\
         BEGIN Stop\n",
    )
    .unwrap();

    let json = serde_json::to_string(&registry).unwrap();
    let restored: metron_catalog::UnitRegistry = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), registry.len());
    let area = restored.get("Area").unwrap();
    assert_eq!(area.units[0].multiplier, MultiplierSpec::Compound);
    assert_eq!(area.units[0].enum_value, Some(0));
    assert_eq!(
        restored.get("Length").unwrap().units[1].multiplier_text,
        Some("0.3048".to_string())
    );
}

#[test]
fn default_catalog_shape() {
    let registry = default_registry();
    assert_eq!(registry.len(), 41);

    let length = registry.get("Length").unwrap();
    assert_eq!(length.type_id, 0);
    assert_eq!(length.bit_width, 4);
    let time = registry.get("Time").unwrap();
    assert_eq!(time.bit_width, 3);
    let speed = registry.get("Speed").unwrap();
    assert_eq!(speed.bit_width, 4 + 3 + 1);
    assert_eq!(
        registry.get("Responsivity").unwrap().type_id,
        registry.len() - 1
    );
}
