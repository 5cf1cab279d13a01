use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, StringRecord};

use super::error::{Result, WtrError};
use super::model::{Header, LicenceCollection, LicenceRow, WTR_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a register CSV from disk.
pub fn load_file(path: &Path) -> Result<LicenceCollection> {
    log::debug!("opening register {}", path.display());
    let file = File::open(path).map_err(|source| WtrError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = load_reader(file)?;
    log::info!("loaded {} licences from {}", collection.len(), path.display());
    Ok(collection)
}

/// Load a register CSV from any byte source.
///
/// The header line must be exactly [`WTR_COLUMNS`]. Every record must have
/// the same number of fields as the header. The first bad record aborts the
/// whole load.
pub fn load_reader<R: Read>(source: R) -> Result<LicenceCollection> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);

    let header_record = read_header(&mut reader)?;
    check_schema(&header_record)?;

    let mut rows = Vec::new();
    let mut lossy = 0usize;

    for result in reader.byte_records() {
        let bytes = result.map_err(csv_error)?;
        let line = bytes.position().map_or(0, |p| p.line());
        let (record, was_lossy) = decode_record(bytes);
        if was_lossy {
            lossy += 1;
        }

        let row: LicenceRow = record
            .deserialize(Some(&header_record))
            .map_err(|source| WtrError::Csv { line, source })?;
        rows.push(row);
    }

    if lossy > 0 {
        log::warn!("{lossy} records contained invalid UTF-8 and were decoded lossily");
    }

    Ok(LicenceCollection::new(
        Header::new(header_record.iter()),
        rows,
    ))
}

/// Load a register from an in-memory string.
pub fn load_str(text: &str) -> Result<LicenceCollection> {
    load_reader(text.as_bytes())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_header<R: Read>(reader: &mut csv::Reader<R>) -> Result<StringRecord> {
    let raw = reader.byte_headers().map_err(csv_error)?.clone();
    if raw.is_empty() {
        return Err(WtrError::EmptyInput);
    }

    let (record, _) = decode_record(raw);
    let mut names: Vec<String> = record.iter().map(str::to_string).collect();
    if let Some(first) = names.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }
    Ok(StringRecord::from(names))
}

fn check_schema(header: &StringRecord) -> Result<()> {
    if header.len() != WTR_COLUMNS.len() {
        return Err(WtrError::ColumnCount {
            expected: WTR_COLUMNS.len(),
            found: header.len(),
        });
    }

    for (index, (found, expected)) in header.iter().zip(WTR_COLUMNS).enumerate() {
        if found != expected {
            return Err(WtrError::SchemaMismatch {
                index,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }
    Ok(())
}

/// UTF-8 decode, falling back to lossy replacement. Returns whether the
/// fallback was used.
fn decode_record(bytes: ByteRecord) -> (StringRecord, bool) {
    match StringRecord::from_byte_record(bytes) {
        Ok(record) => (record, false),
        Err(err) => (StringRecord::from_byte_record_lossy(err.into_byte_record()), true),
    }
}

fn csv_error(source: csv::Error) -> WtrError {
    let line = source.position().map_or(0, |p| p.line());
    WtrError::Csv { line, source }
}
