//! End-to-end checks over an on-disk register: load, validate, filter and
//! write back.

mod common;

use std::sync::Arc;

use common::{register_file, COMPANY_1, COMPANY_2};
use wtr::data::product_codes::{known_codes, PRODUCT_CODE_LEN};
use wtr::data::validate::{unused_product_codes, validate_coverage, validate_rows};
use wtr::data::{
    filter_companies, filter_product_codes, load_file, load_str, to_csv_string,
    LicenceCollection, FILTER_POINT_TO_POINT, WTR_COLUMNS,
};

const EXPECTED_HEADER: &str = "Licence Number,Licence issue date,SID_LAT_N_S,SID_LAT_DEG,SID_LAT_MIN,SID_LAT_SEC,SID_LONG_E_W,SID_LONG_DEG,SID_LONG_MIN,SID_LONG_SEC,NGR,Frequency,Frequency Type,Station Type,Channel Width,Channel Width type,Height above sea level,Antenna ERP,Antenna ERP type,Antenna Type,Antenna Gain,Antenna AZIMUTH,Horizontal Elements,Vertical Elements,Antenna Height,Antenna Location,EFL_UPPER_LOWER,Antenna Direction,Antenna Elevation,Antenna Polarisation,Antenna Name,Feeding Loss,Fade Margin,Emission Code,AP_COMMENT_INTERN,Vector,Licencee Surname,Licencee First Name,Licencee Company,Status,Tradeable,Publishable,Product Code,Product Description,Product Description 31,Product Description 32";

fn load_fixture() -> (tempfile::TempDir, LicenceCollection) {
    let dir = tempfile::tempdir().unwrap();
    let path = register_file(dir.path());
    let register = load_file(&path).unwrap();
    assert!(!register.is_empty(), "failed to read licence file");
    (dir, register)
}

#[test]
fn test_write_back_keeps_header_line() {
    let (_dir, register) = load_fixture();

    let text = to_csv_string(&register).unwrap();
    assert!(!text.is_empty());
    assert!(text.starts_with(EXPECTED_HEADER), "header wrong");
    assert_eq!(register.header().len(), WTR_COLUMNS.len());
}

#[test]
fn test_write_back_round_trips() {
    let (_dir, register) = load_fixture();

    let again = load_str(&to_csv_string(&register).unwrap()).unwrap();
    assert_eq!(again.len(), register.len());
    assert_eq!(again.header(), register.header());
    assert!(again.iter().eq(register.iter()));
}

#[test]
fn test_product_codes_and_descriptions() {
    let (_dir, register) = load_fixture();

    validate_rows(&register).unwrap();
    validate_coverage(&register).unwrap();
    assert!(unused_product_codes(&register).is_empty());

    for row in register.iter() {
        assert_eq!(row.product_code.len(), PRODUCT_CODE_LEN);
        assert!(!row.product_description.is_empty());
    }
    let used = register.product_codes();
    for code in known_codes() {
        assert!(used.contains(&code), "known product code not used: {code}");
    }
}

#[test]
fn test_filter_product_code() {
    let (_dir, register) = load_fixture();
    let before = register.len();

    let p2p = register.filter(&FILTER_POINT_TO_POINT);
    assert_eq!(p2p.header(), register.header(), "filter did not copy headers");
    assert_ne!(p2p.len(), register.len(), "filter did not filter");
    assert_eq!(register.len(), before);

    // same filter again is a no-op
    let again = p2p.filter(&FILTER_POINT_TO_POINT);
    assert_eq!(again.header(), p2p.header());
    assert_eq!(again.len(), p2p.len());

    // the category and its only code agree
    let by_code = register.filter(&filter_product_codes(["301010"]));
    assert_eq!(by_code.header(), p2p.header());
    assert_eq!(by_code.len(), p2p.len());
    assert!(by_code
        .rows()
        .iter()
        .zip(p2p.rows())
        .all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn test_filter_in_place_product_code() {
    let (_dir, register) = load_fixture();

    let p2p = register.filter(&FILTER_POINT_TO_POINT);
    assert_ne!(p2p.len(), register.len());

    let mut register2 = register.clone();
    register2.filter_in_place(&filter_product_codes(["301010"]));

    assert_ne!(register.len(), register2.len(), "in-place filter touched the source");
    assert_eq!(p2p.len(), register2.len());
    assert_eq!(register2.header(), register.header());
}

#[test]
fn test_filter_licensee_companies() {
    let (_dir, register) = load_fixture();

    let companies = register.companies();
    assert!(companies.contains(&COMPANY_1), "could not find {COMPANY_1}");
    assert!(companies.contains(&COMPANY_2), "could not find {COMPANY_2}");

    let customer1 = register.filter(&filter_companies([COMPANY_1]));
    let customer2 = register.filter(&filter_companies([COMPANY_2]));
    assert_eq!(customer1.header(), register.header());
    assert_eq!(customer2.header(), register.header());
    assert_ne!(customer1.len(), register.len());
    assert_ne!(customer2.len(), register.len());

    let both = register.filter(&filter_companies([COMPANY_1, COMPANY_2]));
    assert_eq!(both.header(), register.header());
    assert_eq!(both.len(), customer1.len() + customer2.len());
}

#[test]
fn test_quoted_company_names_survive_filtering_and_writing() {
    let (_dir, register) = load_fixture();

    let quoted = register.filter(&filter_companies(["Smith, Jones & Co"]));
    assert!(!quoted.is_empty());

    let text = to_csv_string(&quoted).unwrap();
    let back = load_str(&text).unwrap();
    assert_eq!(back.companies(), vec!["Smith, Jones & Co"]);
    assert_eq!(back.len(), quoted.len());
}

#[test]
fn test_frequencies_parse() {
    let (_dir, register) = load_fixture();
    assert!(register
        .iter()
        .all(|r| r.frequency_hz().is_some_and(|hz| hz >= 18.0e9)));
}
