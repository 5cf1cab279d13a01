use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::product_codes;

// ---------------------------------------------------------------------------
// Register schema
// ---------------------------------------------------------------------------

/// The published register header, in file order.
pub const WTR_COLUMNS: [&str; 46] = [
    "Licence Number",
    "Licence issue date",
    "SID_LAT_N_S",
    "SID_LAT_DEG",
    "SID_LAT_MIN",
    "SID_LAT_SEC",
    "SID_LONG_E_W",
    "SID_LONG_DEG",
    "SID_LONG_MIN",
    "SID_LONG_SEC",
    "NGR",
    "Frequency",
    "Frequency Type",
    "Station Type",
    "Channel Width",
    "Channel Width type",
    "Height above sea level",
    "Antenna ERP",
    "Antenna ERP type",
    "Antenna Type",
    "Antenna Gain",
    "Antenna AZIMUTH",
    "Horizontal Elements",
    "Vertical Elements",
    "Antenna Height",
    "Antenna Location",
    "EFL_UPPER_LOWER",
    "Antenna Direction",
    "Antenna Elevation",
    "Antenna Polarisation",
    "Antenna Name",
    "Feeding Loss",
    "Fade Margin",
    "Emission Code",
    "AP_COMMENT_INTERN",
    "Vector",
    "Licencee Surname",
    "Licencee First Name",
    "Licencee Company",
    "Status",
    "Tradeable",
    "Publishable",
    "Product Code",
    "Product Description",
    "Product Description 31",
    "Product Description 32",
];

// ---------------------------------------------------------------------------
// LicenceRow – one record of the register
// ---------------------------------------------------------------------------

/// A single licence record. Field order matches [`WTR_COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenceRow {
    #[serde(rename = "Licence Number")]
    pub licence_number: String,
    #[serde(rename = "Licence issue date")]
    pub licence_issue_date: String,
    #[serde(rename = "SID_LAT_N_S")]
    pub sid_lat_n_s: String,
    #[serde(rename = "SID_LAT_DEG")]
    pub sid_lat_deg: String,
    #[serde(rename = "SID_LAT_MIN")]
    pub sid_lat_min: String,
    #[serde(rename = "SID_LAT_SEC")]
    pub sid_lat_sec: String,
    #[serde(rename = "SID_LONG_E_W")]
    pub sid_long_e_w: String,
    #[serde(rename = "SID_LONG_DEG")]
    pub sid_long_deg: String,
    #[serde(rename = "SID_LONG_MIN")]
    pub sid_long_min: String,
    #[serde(rename = "SID_LONG_SEC")]
    pub sid_long_sec: String,
    #[serde(rename = "NGR")]
    pub ngr: String,
    #[serde(rename = "Frequency")]
    pub frequency: String,
    /// Unit of `frequency`: `Hz`, `kHz`, `MHz` or `GHz`.
    #[serde(rename = "Frequency Type")]
    pub frequency_type: String,
    #[serde(rename = "Station Type")]
    pub station_type: String,
    #[serde(rename = "Channel Width")]
    pub channel_width: String,
    #[serde(rename = "Channel Width type")]
    pub channel_width_type: String,
    #[serde(rename = "Height above sea level")]
    pub height_above_sea_level: String,
    #[serde(rename = "Antenna ERP")]
    pub antenna_erp: String,
    #[serde(rename = "Antenna ERP type")]
    pub antenna_erp_type: String,
    #[serde(rename = "Antenna Type")]
    pub antenna_type: String,
    #[serde(rename = "Antenna Gain")]
    pub antenna_gain: String,
    #[serde(rename = "Antenna AZIMUTH")]
    pub antenna_azimuth: String,
    #[serde(rename = "Horizontal Elements")]
    pub horizontal_elements: String,
    #[serde(rename = "Vertical Elements")]
    pub vertical_elements: String,
    #[serde(rename = "Antenna Height")]
    pub antenna_height: String,
    #[serde(rename = "Antenna Location")]
    pub antenna_location: String,
    #[serde(rename = "EFL_UPPER_LOWER")]
    pub efl_upper_lower: String,
    #[serde(rename = "Antenna Direction")]
    pub antenna_direction: String,
    #[serde(rename = "Antenna Elevation")]
    pub antenna_elevation: String,
    #[serde(rename = "Antenna Polarisation")]
    pub antenna_polarisation: String,
    #[serde(rename = "Antenna Name")]
    pub antenna_name: String,
    #[serde(rename = "Feeding Loss")]
    pub feeding_loss: String,
    #[serde(rename = "Fade Margin")]
    pub fade_margin: String,
    #[serde(rename = "Emission Code")]
    pub emission_code: String,
    #[serde(rename = "AP_COMMENT_INTERN")]
    pub ap_comment_intern: String,
    #[serde(rename = "Vector")]
    pub vector: String,
    #[serde(rename = "Licencee Surname")]
    pub licencee_surname: String,
    #[serde(rename = "Licencee First Name")]
    pub licencee_first_name: String,
    #[serde(rename = "Licencee Company")]
    pub licencee_company: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Tradeable")]
    pub tradeable: String,
    #[serde(rename = "Publishable")]
    pub publishable: String,
    #[serde(rename = "Product Code")]
    pub product_code: String,
    #[serde(rename = "Product Description")]
    pub product_description: String,
    #[serde(rename = "Product Description 31")]
    pub product_description_31: String,
    #[serde(rename = "Product Description 32")]
    pub product_description_32: String,
}

impl LicenceRow {
    /// Field values in [`WTR_COLUMNS`] order.
    pub fn fields(&self) -> [&str; 46] {
        [
            self.licence_number.as_str(),
            self.licence_issue_date.as_str(),
            self.sid_lat_n_s.as_str(),
            self.sid_lat_deg.as_str(),
            self.sid_lat_min.as_str(),
            self.sid_lat_sec.as_str(),
            self.sid_long_e_w.as_str(),
            self.sid_long_deg.as_str(),
            self.sid_long_min.as_str(),
            self.sid_long_sec.as_str(),
            self.ngr.as_str(),
            self.frequency.as_str(),
            self.frequency_type.as_str(),
            self.station_type.as_str(),
            self.channel_width.as_str(),
            self.channel_width_type.as_str(),
            self.height_above_sea_level.as_str(),
            self.antenna_erp.as_str(),
            self.antenna_erp_type.as_str(),
            self.antenna_type.as_str(),
            self.antenna_gain.as_str(),
            self.antenna_azimuth.as_str(),
            self.horizontal_elements.as_str(),
            self.vertical_elements.as_str(),
            self.antenna_height.as_str(),
            self.antenna_location.as_str(),
            self.efl_upper_lower.as_str(),
            self.antenna_direction.as_str(),
            self.antenna_elevation.as_str(),
            self.antenna_polarisation.as_str(),
            self.antenna_name.as_str(),
            self.feeding_loss.as_str(),
            self.fade_margin.as_str(),
            self.emission_code.as_str(),
            self.ap_comment_intern.as_str(),
            self.vector.as_str(),
            self.licencee_surname.as_str(),
            self.licencee_first_name.as_str(),
            self.licencee_company.as_str(),
            self.status.as_str(),
            self.tradeable.as_str(),
            self.publishable.as_str(),
            self.product_code.as_str(),
            self.product_description.as_str(),
            self.product_description_31.as_str(),
            self.product_description_32.as_str(),
        ]
    }

    /// Value of the named register column, or `None` if the name is not
    /// one of [`WTR_COLUMNS`].
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = WTR_COLUMNS.iter().position(|c| *c == column)?;
        Some(self.fields()[index])
    }

    /// Frequency in hertz, combining `Frequency` with its `Frequency Type`.
    /// `None` when either field is blank or not understood.
    pub fn frequency_hz(&self) -> Option<f64> {
        let value = self.frequency.trim().parse::<f64>().ok()?;
        let scale = match self.frequency_type.trim() {
            "Hz" => 1.0,
            "kHz" => 1e3,
            "MHz" => 1e6,
            "GHz" => 1e9,
            _ => return None,
        };
        Some(value * scale)
    }
}

// ---------------------------------------------------------------------------
// Header – ordered column names, shared between derived collections
// ---------------------------------------------------------------------------

/// Column names in file order. Cloning shares the underlying storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Arc<[String]>,
}

impl Header {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The register's own 46-column header.
    pub fn wtr() -> Self {
        Self::new(WTR_COLUMNS)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Whether both handles point at the same column storage.
    pub fn shares_storage(&self, other: &Header) -> bool {
        Arc::ptr_eq(&self.columns, &other.columns)
    }
}

// ---------------------------------------------------------------------------
// LicenceCollection – a header plus an ordered sequence of rows
// ---------------------------------------------------------------------------

/// An ordered set of licence rows under a shared header.
///
/// Rows are reference counted and never modified once loaded, so deriving a
/// collection copies pointers rather than records. The row vector itself is
/// owned by exactly one collection: `clone()` yields an independent vector.
#[derive(Debug, Clone)]
pub struct LicenceCollection {
    pub(crate) header: Header,
    pub(crate) rows: Vec<Arc<LicenceRow>>,
}

impl LicenceCollection {
    pub fn new(header: Header, rows: Vec<LicenceRow>) -> Self {
        Self {
            header,
            rows: rows.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build a collection over rows already owned elsewhere.
    pub fn from_shared(header: Header, rows: Vec<Arc<LicenceRow>>) -> Self {
        Self { header, rows }
    }

    /// Collection under the standard register header.
    pub fn with_wtr_header(rows: Vec<LicenceRow>) -> Self {
        Self::new(Header::wtr(), rows)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn rows(&self) -> &[Arc<LicenceRow>] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &LicenceRow> {
        self.rows.iter().map(|r| &**r)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the collection has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct, non-blank company names in sorted order.
    pub fn companies(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .iter()
            .map(|r| r.licencee_company.as_str())
            .filter(|c| !c.trim().is_empty())
            .collect();
        names.into_iter().collect()
    }

    /// Distinct product codes in sorted order.
    pub fn product_codes(&self) -> Vec<&str> {
        let codes: BTreeSet<&str> = self.iter().map(|r| r.product_code.as_str()).collect();
        codes.into_iter().collect()
    }

    pub fn count_by_product_code(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in self.iter() {
            *counts.entry(row.product_code.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> CollectionSummary {
        let per_code = self
            .count_by_product_code()
            .into_iter()
            .map(|(code, rows)| ProductCodeCount {
                description: product_codes::describe(&code).map(str::to_string),
                code,
                rows,
            })
            .collect();

        CollectionSummary {
            rows: self.len(),
            columns: self.header.len(),
            companies: self.companies().len(),
            product_codes: per_code,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub rows: usize,
    pub columns: usize,
    pub companies: usize,
    pub product_codes: Vec<ProductCodeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCodeCount {
    pub code: String,
    /// `None` for codes missing from the lookup table.
    pub description: Option<String>,
    pub rows: usize,
}

impl fmt::Display for CollectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows:      {}", self.rows)?;
        writeln!(f, "columns:   {}", self.columns)?;
        writeln!(f, "companies: {}", self.companies)?;
        for entry in &self.product_codes {
            let description = entry.description.as_deref().unwrap_or("<unknown>");
            writeln!(f, "  {}  {:>8}  {description}", entry.code, entry.rows)?;
        }
        Ok(())
    }
}
