use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::helpers;

use super::models::SensorReading;

pub const CSV_HEADER: &str = "Time,PM2.5 (ug/m3),Temperature (°C),Humidity (%)";
pub const FILENAME_PREFIX: &str = "purple-air-data-";

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("reading has no numeric '{0}' field")]
    MissingField(&'static str),
    #[error("could not write CSV file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// A two-line CSV document: fixed header row plus one data row.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvRecord {
    pub timestamp: String,
    pub content: String,
}

/// A CSV file written to local storage. Files from previous cycles are
/// never deleted or overwritten; each cycle produces a distinct file.
#[derive(Debug)]
pub struct OutputFile {
    pub path: PathBuf,
    pub record: CsvRecord,
}

/// Values are rendered with exactly one fractional digit, rounded to the
/// nearest representable decimal (Rust `{:.1}` formatting).
pub fn format_record(reading: &SensorReading) -> Result<CsvRecord, FormatError> {
    let pm2_5 = reading.pm2_5.ok_or(FormatError::MissingField("pm2.5"))?;
    let temperature = reading
        .temperature
        .ok_or(FormatError::MissingField("temperature"))?;
    let humidity = reading
        .humidity
        .ok_or(FormatError::MissingField("humidity"))?;

    let timestamp = helpers::iso_millis(reading.observed_at);
    let content = format!(
        "{CSV_HEADER}\n{timestamp},{pm2_5:.1},{temperature:.1},{humidity:.1}"
    );
    Ok(CsvRecord { timestamp, content })
}

/// The timestamp seeds the filename, with the characters that are not
/// filename-safe (`:` and `.`) replaced by `-`.
pub fn filename_for(timestamp: &str) -> String {
    format!("{FILENAME_PREFIX}{}.csv", timestamp.replace([':', '.'], "-"))
}

pub fn format_and_write(
    reading: &SensorReading,
    output_dir: &Path,
) -> Result<OutputFile, FormatError> {
    let record = format_record(reading)?;
    let path = output_dir.join(filename_for(&record.timestamp));
    write_whole(&path, &record.content)?;
    log::info!("Wrote CSV record to {}", path.display());
    Ok(OutputFile { path, record })
}

// Whole content or nothing: the content first goes to a `.part` sibling,
// which is then renamed into place.
fn write_whole(path: &Path, content: &str) -> Result<(), FormatError> {
    let write_err = |source| FormatError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    let part_path = path.with_extension("csv.part");
    fs::write(&part_path, content).map_err(write_err)?;
    fs::rename(&part_path, path).map_err(write_err)
}
