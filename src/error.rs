//! Error types for the asteroid pipeline.
//!
//! Every stage returns [`DataError`] instead of panicking. The variants are
//! grouped into four broad categories (see [`ErrorCategory`]) so callers can
//! tell "the file is missing" apart from "the file is fine but nothing
//! survived the filter".

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`DataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// File missing or unreadable.
    AbsentInput,
    /// Unparsable file, column, or unusable numeric data.
    MalformedInput,
    /// Well-formed but zero rows (from load or after filtering).
    EmptyInput,
    /// A required column is missing from the schema.
    SchemaViolation,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid file name or file path {}: {source}", .path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Failed to parse the CSV file: {0}")]
    Parse(String),

    #[error("Table is empty")]
    EmptyTable,

    #[error("Missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Column '{0}' has no usable values")]
    NoUsableData(String),

    #[error("Need at least two complete pairs for a regression, got {0}")]
    InsufficientData(usize),

    #[error("Cannot fit a regression line: all '{0}' values are identical")]
    DegenerateRegression(String),

    #[error("{0}")]
    Other(String),
}

impl DataError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DataError::NotFound(_) | DataError::InvalidPath { .. } => ErrorCategory::AbsentInput,
            DataError::Parse(_)
            | DataError::NoUsableData(_)
            | DataError::DegenerateRegression(_)
            | DataError::Other(_) => ErrorCategory::MalformedInput,
            DataError::EmptyFile(_) | DataError::EmptyTable | DataError::InsufficientData(_) => {
                ErrorCategory::EmptyInput
            }
            DataError::MissingColumns(_) => ErrorCategory::SchemaViolation,
        }
    }

    /// Log the error where it is detected and hand it back for propagation.
    pub(crate) fn logged(self) -> Self {
        log::error!("Error: {self}");
        self
    }
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            DataError::NotFound(PathBuf::from("x.csv")).category(),
            ErrorCategory::AbsentInput
        );
        assert_eq!(
            DataError::Parse("bad row".into()).category(),
            ErrorCategory::MalformedInput
        );
        assert_eq!(DataError::EmptyTable.category(), ErrorCategory::EmptyInput);
        assert_eq!(
            DataError::MissingColumns(vec!["Name".into()]).category(),
            ErrorCategory::SchemaViolation
        );
    }

    #[test]
    fn missing_columns_message_lists_names() {
        let err = DataError::MissingColumns(vec!["Name".into(), "Orbit ID".into()]);
        assert_eq!(
            err.to_string(),
            r#"Missing required columns: ["Name", "Orbit ID"]"#
        );
    }

    #[test]
    fn logged_returns_the_same_error() {
        let err = DataError::InsufficientData(1).logged();
        assert!(matches!(err, DataError::InsufficientData(1)));
        assert_eq!(err.to_string(), "Need at least two complete pairs for a regression, got 1");
    }
}
