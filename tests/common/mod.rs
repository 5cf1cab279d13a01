//! Synthetic register used by the integration tests.

use std::path::{Path, PathBuf};

use wtr::data::product_codes::{describe, PRODUCT_CODES};
use wtr::data::{write_csv_file, LicenceCollection, LicenceRow};

pub const COMPANY_1: &str = "MBNL";
pub const COMPANY_2: &str = "Vodafone Ltd";

fn licence(n: usize, company: &str, code: &str) -> LicenceRow {
    LicenceRow {
        licence_number: format!("{:07}/1", 1_000_000 + n),
        frequency: format!("{:.4}", 18.0 + n as f64 * 0.0125),
        frequency_type: "GHz".to_string(),
        licencee_company: company.to_string(),
        product_code: code.to_string(),
        product_description: describe(code).unwrap_or("Unknown").to_string(),
        ..Default::default()
    }
}

/// Every known product code at least once, a point-to-point majority, two
/// named companies plus a few others, and some fields needing CSV quoting.
pub fn register() -> LicenceCollection {
    let others = ["Arqiva Ltd", "EE Ltd", "Smith, Jones & Co", "The \"Best\" Radio Ltd"];

    let mut rows: Vec<LicenceRow> = PRODUCT_CODES
        .iter()
        .enumerate()
        .map(|(n, (code, _))| licence(n, others[n % others.len()], code))
        .collect();

    for n in rows.len()..120 {
        let company = match n % 5 {
            0 | 1 => COMPANY_1,
            2 => COMPANY_2,
            k => others[k - 3],
        };
        let code = if n % 4 == 0 { "306010" } else { "301010" };
        let mut row = licence(n, company, code);
        if n % 17 == 0 {
            row.ap_comment_intern = "line one\nline two, with comma".to_string();
        }
        rows.push(row);
    }

    LicenceCollection::with_wtr_header(rows)
}

/// Write [`register`] to `dir` and return its path.
pub fn register_file(dir: &Path) -> PathBuf {
    let path = dir.join("WTR.csv");
    write_csv_file(&register(), &path).expect("writing fixture");
    path
}
