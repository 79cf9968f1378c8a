use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the asteroid table from a CSV file.
///
/// The `.csv` extension is appended when missing. Every failure is logged
/// here and returned as a [`DataError`]:
/// * missing file → [`DataError::NotFound`]
/// * zero-byte file or no header → [`DataError::EmptyFile`]
/// * ragged rows, invalid UTF-8 → [`DataError::Parse`]
/// * any other OS-level error (permissions, directories) → [`DataError::InvalidPath`]
pub fn load_data(path: impl AsRef<Path>) -> Result<Table> {
    let path = ensure_csv_extension(path.as_ref());
    match read_csv(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} rows with {} columns from {}",
                table.len(),
                table.columns().len(),
                path.display()
            );
            Ok(table)
        }
        Err(e) => Err(e.logged()),
    }
}

/// Append `.csv` to `path` unless it already ends with it (case-insensitive).
pub fn ensure_csv_extension(path: &Path) -> PathBuf {
    if path.to_string_lossy().to_ascii_lowercase().ends_with(".csv") {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".csv");
    PathBuf::from(name)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one asteroid approach per row.
/// Cell types are guessed per cell, then mixed numeric columns are unified.
fn read_csv(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(DataError::EmptyFile(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        rows.push(record.iter().map(guess_value).collect());
    }

    Ok(Table::new(headers, rows)?.unify_numeric_columns())
}

fn open_error(path: &Path, err: io::Error) -> DataError {
    match err.kind() {
        io::ErrorKind::NotFound => DataError::NotFound(path.to_path_buf()),
        _ => DataError::InvalidPath {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

fn csv_error(path: &Path, err: csv::Error) -> DataError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DataError::InvalidPath {
            path: path.to_path_buf(),
            source,
        },
        csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. } => {
            DataError::Parse(message)
        }
        _ => DataError::Other(message),
    }
}

fn guess_value(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    match s {
        "True" | "true" | "TRUE" => Value::Bool(true),
        "False" | "false" | "FALSE" => Value::Bool(false),
        _ => Value::String(s.to_string()),
    }
}
