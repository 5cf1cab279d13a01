use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{LicenceCollection, LicenceRow};
use super::product_codes;

// ---------------------------------------------------------------------------
// Predicate – membership test over a single row
// ---------------------------------------------------------------------------

/// A pure test deciding whether a row belongs in a filtered collection.
///
/// Any `Fn(&LicenceRow) -> bool` is a predicate, so ad-hoc filters can be
/// written as closures.
pub trait Predicate {
    fn matches(&self, row: &LicenceRow) -> bool;

    fn and<P: Predicate>(self, other: P) -> And<Self, P>
    where
        Self: Sized,
    {
        And(self, other)
    }

    fn or<P: Predicate>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<F> Predicate for F
where
    F: Fn(&LicenceRow) -> bool,
{
    fn matches(&self, row: &LicenceRow) -> bool {
        self(row)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

impl<A: Predicate, B: Predicate> Predicate for And<A, B> {
    fn matches(&self, row: &LicenceRow) -> bool {
        self.0.matches(row) && self.1.matches(row)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(A, B);

impl<A: Predicate, B: Predicate> Predicate for Or<A, B> {
    fn matches(&self, row: &LicenceRow) -> bool {
        self.0.matches(row) || self.1.matches(row)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Not<A>(A);

impl<A: Predicate> Predicate for Not<A> {
    fn matches(&self, row: &LicenceRow) -> bool {
        !self.0.matches(row)
    }
}

// ---------------------------------------------------------------------------
// Combinators
// ---------------------------------------------------------------------------

/// Rows whose product code is one of a fixed set (exact, case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCodeFilter {
    codes: BTreeSet<String>,
}

impl ProductCodeFilter {
    pub fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }
}

impl Predicate for ProductCodeFilter {
    fn matches(&self, row: &LicenceRow) -> bool {
        self.codes.contains(row.product_code.as_str())
    }
}

/// Build a [`ProductCodeFilter`]. Order and duplicates in `codes` do not matter.
pub fn filter_product_codes<I, S>(codes: I) -> ProductCodeFilter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ProductCodeFilter {
        codes: codes.into_iter().map(Into::into).collect(),
    }
}

/// Rows whose licencee company is exactly one of a fixed set of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyFilter {
    names: BTreeSet<String>,
}

impl Predicate for CompanyFilter {
    fn matches(&self, row: &LicenceRow) -> bool {
        self.names.contains(row.licencee_company.as_str())
    }
}

/// Build a [`CompanyFilter`].
///
/// Each row carries one company, so filtering by several names yields the
/// union of the single-name results.
pub fn filter_companies<I, S>(names: I) -> CompanyFilter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CompanyFilter {
        names: names.into_iter().map(Into::into).collect(),
    }
}

/// Rows in the point-to-point category, i.e. whose product code is listed in
/// [`product_codes::POINT_TO_POINT_CODES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointToPointFilter;

pub const FILTER_POINT_TO_POINT: PointToPointFilter = PointToPointFilter;

impl Predicate for PointToPointFilter {
    fn matches(&self, row: &LicenceRow) -> bool {
        product_codes::is_point_to_point(&row.product_code)
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

impl LicenceCollection {
    /// Copying filter: a new collection with the rows matching `predicate`,
    /// in their original order. `self` is left untouched.
    ///
    /// The result shares the header and the individual rows with `self` but
    /// owns a freshly allocated row vector.
    pub fn filter<P>(&self, predicate: &P) -> LicenceCollection
    where
        P: Predicate + ?Sized,
    {
        let rows: Vec<Arc<LicenceRow>> = self
            .rows
            .iter()
            .filter(|row| predicate.matches(row))
            .cloned()
            .collect();

        log::debug!("filter kept {} of {} rows", rows.len(), self.rows.len());

        LicenceCollection {
            header: self.header.clone(),
            rows,
        }
    }

    /// In-place filter: drops every row not matching `predicate`, keeping the
    /// survivors in their original order. The header is not touched.
    ///
    /// Only this collection's row vector changes. Collections previously
    /// derived from it (by `clone` or [`filter`](Self::filter)) own their own
    /// vectors and are unaffected.
    pub fn filter_in_place<P>(&mut self, predicate: &P)
    where
        P: Predicate + ?Sized,
    {
        let before = self.rows.len();
        self.rows.retain(|row| predicate.matches(row));
        log::debug!("filter_in_place kept {} of {before} rows", self.rows.len());
    }
}
