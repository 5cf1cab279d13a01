//! Data-integrity checks over a loaded register.

use std::collections::BTreeSet;

use super::error::ValidationError;
use super::model::LicenceCollection;
use super::product_codes::{self, PRODUCT_CODE_LEN};

/// Check every row: product code known and [`PRODUCT_CODE_LEN`] characters
/// long, product description present. Reports the first failing row
/// (0-based, excluding the header line).
pub fn validate_rows(collection: &LicenceCollection) -> Result<(), ValidationError> {
    for (row, licence) in collection.iter().enumerate() {
        let code = licence.product_code.as_str();

        if code.chars().count() != PRODUCT_CODE_LEN {
            return Err(ValidationError::ProductCodeLength {
                row,
                code: code.to_string(),
                expected: PRODUCT_CODE_LEN,
            });
        }
        if !product_codes::is_known(code) {
            return Err(ValidationError::UnknownProductCode {
                row,
                code: code.to_string(),
            });
        }
        if licence.product_description.trim().is_empty() {
            return Err(ValidationError::MissingProductDescription { row });
        }
    }

    log::debug!("validated {} rows", collection.len());
    Ok(())
}

/// Known product codes that no row uses, in table order.
pub fn unused_product_codes(collection: &LicenceCollection) -> Vec<&'static str> {
    let used: BTreeSet<&str> = collection
        .iter()
        .map(|r| r.product_code.as_str())
        .collect();

    product_codes::known_codes()
        .filter(|code| !used.contains(code))
        .collect()
}

/// A full register snapshot is expected to use every known product code.
pub fn validate_coverage(collection: &LicenceCollection) -> Result<(), ValidationError> {
    let unused = unused_product_codes(collection);
    for code in &unused {
        log::warn!("known product code {code} not present in data");
    }
    match unused.first() {
        Some(code) => Err(ValidationError::UnusedProductCode {
            code: code.to_string(),
        }),
        None => Ok(()),
    }
}
