//! CSV sink for collected records
//!
//! Writes a header row `Title,Video URL,Tags` followed by one row per record,
//! with the tag list joined by `", "`. Quoting and escaping of fields that
//! contain delimiters, quotes, or newlines follow standard CSV rules via the
//! csv crate. Any I/O failure aborts the whole write.

use crate::model::Record;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

const HEADER: [&str; 3] = ["Title", "Video URL", "Tags"];

/// Serializes all records to a CSV file at `path`
pub fn write_records(records: &[Record], path: &Path) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    write_to(records, &mut writer)?;
    tracing::debug!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Writes header and rows to an already-open CSV writer
fn write_to<W: io::Write>(records: &[Record], writer: &mut csv::Writer<W>) -> OutputResult<()> {
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.title.as_str(),
            record.video_url.as_str(),
            &record.tags_joined(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
