//! CSV output for licence collections.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;

use super::error::{Result, WtrError};
use super::model::{Header, LicenceCollection, WTR_COLUMNS};

/// Write `collection` as CSV: the header line, then one record per row in
/// header order. Fields containing the delimiter, a quote or a line break
/// are quoted.
///
/// Each header column is looked up by name, so a reordered or narrower
/// header writes matching values. A column outside [`WTR_COLUMNS`] fails
/// with [`WtrError::UnknownColumn`] before anything is written.
///
/// The encoder buffers internally and is flushed into `sink` before
/// returning, so `sink` sees a flush but is never closed.
pub fn write_csv<W: Write>(collection: &LicenceCollection, sink: W) -> Result<()> {
    let layout = column_layout(collection.header())?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);

    writer
        .write_record(collection.header().iter())
        .map_err(WtrError::CsvWrite)?;

    for row in collection.iter() {
        let fields = row.fields();
        writer
            .write_record(layout.iter().map(|&i| fields[i]))
            .map_err(WtrError::CsvWrite)?;
    }

    writer.flush()?;
    log::debug!("wrote {} rows", collection.len());
    Ok(())
}

/// Index into [`fields`](crate::data::LicenceRow::fields) for each header column.
fn column_layout(header: &Header) -> Result<Vec<usize>> {
    header
        .iter()
        .map(|column| {
            WTR_COLUMNS
                .iter()
                .position(|c| *c == column)
                .ok_or_else(|| WtrError::UnknownColumn {
                    column: column.to_string(),
                })
        })
        .collect()
}

/// Write `collection` to a new file at `path`, replacing any existing file.
pub fn write_csv_file(collection: &LicenceCollection, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| WtrError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write_csv(collection, &mut out)?;
    out.flush()?;
    log::info!("wrote {} licences to {}", collection.len(), path.display());
    Ok(())
}

/// Render `collection` to an in-memory CSV string.
pub fn to_csv_string(collection: &LicenceCollection) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(collection, &mut buf)?;
    // the encoder only ever writes UTF-8 we handed it
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl LicenceCollection {
    /// See [`write_csv`].
    pub fn write_csv<W: Write>(&self, sink: W) -> Result<()> {
        write_csv(self, sink)
    }
}
