use std::fs;
use std::path::Path;

use tracing::warn;

use crate::constants::OUTPUT_COLUMNS;
use crate::error::Result;
use crate::pipeline::DestinationRow;
use crate::table::RawTable;

/// Decode raw export bytes. Exports usually arrive as UTF-8, but older
/// spreadsheet tools still emit single-byte encodings; those are decoded as
/// Windows-1252 instead of being rejected.
fn decode_bytes(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    warn!("input is not valid UTF-8, falling back to Windows-1252");
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// Read a raw registration CSV into a `RawTable`. Ragged rows are accepted;
/// the first record is treated as the header record.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let bytes = fs::read(path)?;
    let text = decode_bytes(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.iter().map(String::from).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }

    RawTable::new(headers, rows)
}

/// Write normalized rows to an upload-ready CSV with the fixed header.
pub fn write_csv(path: &Path, rows: &[DestinationRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.write_record(row.values())?;
    }
    writer.flush()?;
    Ok(())
}
