use std::collections::BTreeSet;

use crate::data::filter::Predicate;
use crate::data::model::{LicenceCollection, LicenceRow};
use crate::data::product_codes;

// ---------------------------------------------------------------------------
// Licence query
// ---------------------------------------------------------------------------

/// A reusable selection over the register.
///
/// Each criterion narrows the result only when set: an empty company set
/// means "any company". Set criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenceQuery {
    /// Licencee companies to keep (exact match).
    pub companies: BTreeSet<String>,

    /// Product codes to keep (exact match).
    pub product_codes: BTreeSet<String>,

    /// Restrict to the point-to-point category.
    pub point_to_point: bool,
}

impl LicenceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, name: impl Into<String>) -> Self {
        self.companies.insert(name.into());
        self
    }

    pub fn with_product_code(mut self, code: impl Into<String>) -> Self {
        self.product_codes.insert(code.into());
        self
    }

    pub fn only_point_to_point(mut self) -> Self {
        self.point_to_point = true;
        self
    }

    /// Add the company if absent, remove it if present.
    pub fn toggle_company(&mut self, name: &str) {
        if !self.companies.remove(name) {
            self.companies.insert(name.to_string());
        }
    }

    /// Add the product code if absent, remove it if present.
    pub fn toggle_product_code(&mut self, code: &str) {
        if !self.product_codes.remove(code) {
            self.product_codes.insert(code.to_string());
        }
    }

    /// Drop every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the query keeps every row.
    pub fn is_unconstrained(&self) -> bool {
        self.companies.is_empty() && self.product_codes.is_empty() && !self.point_to_point
    }

    /// Copying application: see [`LicenceCollection::filter`].
    pub fn apply(&self, collection: &LicenceCollection) -> LicenceCollection {
        collection.filter(self)
    }

    /// Mutating application: see [`LicenceCollection::filter_in_place`].
    pub fn apply_in_place(&self, collection: &mut LicenceCollection) {
        if self.is_unconstrained() {
            return;
        }
        collection.filter_in_place(self);
    }
}

impl Predicate for LicenceQuery {
    fn matches(&self, row: &LicenceRow) -> bool {
        if !self.companies.is_empty() && !self.companies.contains(&row.licencee_company) {
            return false;
        }
        if !self.product_codes.is_empty() && !self.product_codes.contains(&row.product_code) {
            return false;
        }
        if self.point_to_point && !product_codes::is_point_to_point(&row.product_code) {
            return false;
        }
        true
    }
}
