//! End-to-end resolution against small hand-built tables.

use std::sync::Arc;
use std::thread;

use afvalpas_core::{
    District, PassNumber, ResolveError, Stage, ValidationError, WastePass, WastePassService,
    WastePassTables,
};

fn fixture_tables() -> WastePassTables {
    WastePassTables::builder()
        .district(District::Noord, [("1000", "1003")])
        .district(District::Oost, [("1004", "1007")])
        .district(District::Zuid, [("1008", "1009")])
        .pass_number(District::Noord, "0123456789")
        .pass_number(District::Zuid, "0123456789")
        .container_exception(("1000", "1000"), ["AB"])
        .container_exception(("1001", "1001"), ["AB"])
        .no_containers(("1002", "1003"))
        .build()
        .unwrap()
}

fn service() -> WastePassService {
    WastePassService::new(fixture_tables())
}

fn pass(district: District, has_container: bool) -> WastePass {
    WastePass {
        district,
        pass_number: PassNumber("0123456789".to_owned()),
        has_container,
    }
}

#[test]
fn test_valid_postal_code_with_container() {
    let service = service();
    for (postal_code, district) in [
        ("1000AA", District::Noord),
        ("1001 aa", District::Noord),
        ("1008aa", District::Zuid),
    ] {
        assert_eq!(
            service.resolve_waste_pass(postal_code, None),
            Ok(pass(district, true)),
            "{postal_code}"
        );
    }
}

#[test]
fn test_valid_postal_code_without_container() {
    let service = service();
    for postal_code in ["1000AB", "1001 AB", "1002 ab", "1003 ab", "1002AA"] {
        let result = service.resolve_waste_pass(postal_code, None).unwrap();
        assert!(!result.has_container, "{postal_code}");
        assert_eq!(result.district, District::Noord);
    }
}

#[test]
fn test_district_not_found() {
    assert_eq!(
        service().resolve_waste_pass("9999ZZ", None),
        Err(ResolveError::NotFound(Stage::District))
    );
}

#[test]
fn test_pass_number_not_found() {
    assert_eq!(
        service().resolve_waste_pass("1004AA", None),
        Err(ResolveError::NotFound(Stage::PassNumber))
    );
}

#[test]
fn test_invalid_postal_codes() {
    let service = service();
    for (postal_code, expected) in [
        ("12345A", ValidationError::PostalCodeLetters),
        ("12345AB", ValidationError::PostalCodeLength),
        ("123", ValidationError::PostalCodeLength),
        ("123ABC", ValidationError::PostalCodeNumber),
        ("ABCDEF", ValidationError::PostalCodeNumber),
        ("1234A1", ValidationError::PostalCodeLetters),
        ("", ValidationError::PostalCodeRequired),
    ] {
        assert_eq!(
            service.resolve_waste_pass(postal_code, None),
            Err(ResolveError::Validation(expected)),
            "{postal_code}"
        );
    }
}

#[test]
fn test_house_numbers() {
    let service = service();
    for house_number in [Some("42"), Some("1"), None] {
        assert_eq!(
            service.resolve_waste_pass("1000AA", house_number),
            Ok(pass(District::Noord, true))
        );
    }

    // validated before the postal code is looked up
    for house_number in ["42A", "ABC", "12.3"] {
        assert_eq!(
            service.resolve_waste_pass("1086AB", Some(house_number)),
            Err(ResolveError::Validation(ValidationError::HouseNumber))
        );
    }
}

#[test]
fn test_overlapping_ranges_first_match_wins() {
    let tables = WastePassTables::builder()
        .district(District::West, [("1050", "1059")])
        .district(District::Centrum, [("1055", "1060")])
        .pass_number(District::West, "W")
        .pass_number(District::Centrum, "C")
        .container_exception(("1050", "1056"), ["AA"])
        .no_containers(("1055", "1055"))
        .build()
        .unwrap();
    let service = WastePassService::new(tables);

    let overlapping = service.resolve_waste_pass("1055AB", None).unwrap();
    assert_eq!(overlapping.district, District::West);
    assert_eq!(overlapping.pass_number.as_str(), "W");
    // the later empty exception never applies
    assert!(overlapping.has_container);

    let beyond = service.resolve_waste_pass("1060AA", None).unwrap();
    assert_eq!(beyond.district, District::Centrum);
    assert!(beyond.has_container);
}

#[test]
fn test_overlap_order_is_configuration_order() {
    let tables = WastePassTables::builder()
        .district(District::Centrum, [("1055", "1060")])
        .district(District::West, [("1050", "1059")])
        .pass_number(District::West, "W")
        .pass_number(District::Centrum, "C")
        .build()
        .unwrap();
    let service = WastePassService::new(tables);

    let result = service.resolve_waste_pass("1055AB", None).unwrap();
    assert_eq!(result.district, District::Centrum);
}

#[test]
fn test_resolution_is_deterministic() {
    let service = service();
    let first = service.resolve_waste_pass("1001AB", Some("7"));
    for _ in 0..10 {
        assert_eq!(service.resolve_waste_pass("1001AB", Some("7")), first);
    }
}

#[test]
fn test_no_exceptions_means_container_present() {
    let tables = WastePassTables::builder()
        .district(District::Weesp, [("1380", "1384")])
        .pass_number(District::Weesp, "80706D8AD88404")
        .build()
        .unwrap();
    let service = WastePassService::new(tables);

    assert!(service.resolve_waste_pass("1381ZZ", None).unwrap().has_container);
}

#[test]
fn test_replace_tables() {
    let service = service();
    let before = service.tables();

    let replacement = WastePassTables::builder()
        .district(District::Oost, [("1000", "1009")])
        .pass_number(District::Oost, "OOST")
        .build()
        .unwrap();
    service.replace_tables(replacement);

    let result = service.resolve_waste_pass("1000AB", None).unwrap();
    assert_eq!(result.district, District::Oost);
    assert!(result.has_container);

    // earlier snapshots are unaffected
    assert_eq!(*before, fixture_tables());
}

#[test]
fn test_concurrent_lookups_during_replacement() {
    let service = Arc::new(service());
    let alternate = WastePassTables::builder()
        .district(District::Noord, [("1000", "1003")])
        .pass_number(District::Noord, "0123456789")
        .build()
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..500 {
                    let result = service.resolve_waste_pass("1000AA", None).unwrap();
                    assert_eq!(result, pass(District::Noord, true));
                }
            })
        })
        .collect();

    for round in 0..50 {
        if round % 2 == 0 {
            service.replace_tables(alternate.clone());
        } else {
            service.replace_tables(fixture_tables());
        }
    }

    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_district_overview() {
    let rows = service().districts();
    let districts: Vec<_> = rows.iter().map(|row| row.district).collect();
    assert_eq!(districts, [District::Noord, District::Oost, District::Zuid]);

    let oost = &rows[1];
    assert_eq!(oost.ranges[0].to_string(), "1004-1007");
    assert!(oost.pass_number.is_none());
}

#[test]
fn test_district_overview_lists_pass_only_districts() {
    let tables = WastePassTables::builder()
        .district(District::Noord, [("1020", "1039")])
        .pass_number(District::Westpoort, "80706D8A897004")
        .build()
        .unwrap();
    let rows = WastePassService::new(tables).districts();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].district, District::Westpoort);
    assert!(rows[1].ranges.is_empty());
}

#[test]
fn test_district_overview_keeps_pass_table_order() {
    let tables = WastePassTables::builder()
        .district(District::Noord, [("1020", "1039")])
        .pass_number(District::Westpoort, "80706D8A897004")
        .pass_number(District::Noord, "80706D8A3F8604")
        .pass_number(District::Centrum, "80706D8A6FA604")
        .build()
        .unwrap();
    let rows = WastePassService::new(tables).districts();

    let order: Vec<_> = rows.iter().map(|row| row.district).collect();
    assert_eq!(order, [District::Noord, District::Westpoort, District::Centrum]);
    assert_eq!(
        rows[2].pass_number,
        Some(PassNumber("80706D8A6FA604".to_owned()))
    );
}

#[test]
fn test_serialized_shape() {
    let result = service().resolve_waste_pass("1000AA", None).unwrap();
    let json = to_json(&result);
    assert_eq!(
        json,
        r#"{"district":"Noord","pass_number":"0123456789","has_container":true}"#
    );

    let nieuw_west = WastePass {
        district: District::NieuwWest,
        pass_number: PassNumber("80706D8A2E9504".to_owned()),
        has_container: false,
    };
    assert!(to_json(&nieuw_west).contains(r#""district":"Nieuw-West""#));
}

fn to_json(pass: &WastePass) -> String {
    serde_json::to_string(pass).unwrap()
}
