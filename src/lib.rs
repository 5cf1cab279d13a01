//! Load, filter and write the Ofcom Wireless Telegraphy Register (WTR).
//!
//! ```no_run
//! use std::path::Path;
//! use wtr::data::{filter_companies, load_file, FILTER_POINT_TO_POINT};
//!
//! let register = load_file(Path::new("WTR.csv"))?;
//! let links = register.filter(&FILTER_POINT_TO_POINT);
//! let mut mbnl = links.clone();
//! mbnl.filter_in_place(&filter_companies(["MBNL"]));
//! mbnl.write_csv(std::io::stdout().lock())?;
//! # Ok::<(), wtr::data::WtrError>(())
//! ```

pub mod data;
pub mod query;
