//! CSV serialization of collected records.
//!
//! Reports are written in one go after the traversal has fully finished,
//! so an aborted run never leaves a half-written file behind. An existing
//! file at the target path is overwritten, not appended to.

use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::error::ReportError;

/// Writes records to a CSV file with a fixed header row.
///
/// Every field is double-quoted. The header is written even when there
/// are no records, so an empty report still documents its columns.
///
/// # Arguments
///
/// * `path` - Target file; replaced if it already exists.
/// * `columns` - Header row, matching the record's field order.
/// * `records` - The ordered rows to serialize.
pub fn write_report<T, P>(path: P, columns: &[&str], records: &[T]) -> Result<(), ReportError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(columns)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}
