use crate::error::Result;
use crate::models::SearchRecord;
use chrono::{DateTime, TimeZone};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// UTF-8 byte-order mark, lets spreadsheet tools detect the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const CSV_HEADER: [&str; 6] = ["name", "full_name", "url", "stars", "forks", "description"];

pub fn output_file_name<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}.csv", timestamp.format("%Y%m%d%H%M%S"))
}

/// Collapses every line break (`\r\n`, `\r` or `\n`) into a single space
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Writes `records` to `{destination}/{timestamp}.csv` and returns the path.
/// A file left half-written by a failed write is removed again.
pub fn write_csv<Tz>(
    destination: &Path,
    records: &[SearchRecord],
    timestamp: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let output_path = destination.join(output_file_name(timestamp));

    if let Err(e) = write_records(&output_path, records) {
        if output_path.exists() {
            if let Err(remove_err) = fs::remove_file(&output_path) {
                warn!(path = %output_path.display(), "Failed to remove partial output: {}", remove_err);
            }
        }
        return Err(e);
    }

    info!(path = %output_path.display(), records = records.len(), "Wrote CSV export");
    Ok(output_path)
}

fn write_records(path: &Path, records: &[SearchRecord]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record([
            record.name.clone(),
            record.full_name.clone(),
            record.url.clone(),
            record.stars.to_string(),
            record.forks.to_string(),
            single_line(record.description.as_deref().unwrap_or_default()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
