//! Flat-file data sources for the storefront.
//!
//! # Files
//!
//! Both files are pipe-delimited, one record per line. Blank lines and lines
//! starting with `#` are ignored.
//!
//! - `melons.txt` - `id|melon_type|common_name|price|image_url|color|seedless`
//! - `customers.txt` - `first_name|last_name|email|password`
//!
//! The catalog is read once at startup and never changes. The customer list
//! seeds an in-memory repository; signups are added in memory only.

pub mod customers;
pub mod melons;

pub use customers::CustomerRepository;
pub use melons::{CatalogError, MelonCatalog};

use thiserror::Error;

/// Errors from the customer repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The customer file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in the customer file is invalid.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Hashing a seeded password failed.
    #[error("password hashing failed")]
    PasswordHash,
}

/// One data line of a pipe-delimited file.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Record {
    /// 1-based line number.
    pub line: usize,
    /// Trimmed fields, exactly as many as requested.
    pub fields: Vec<String>,
}

/// Failure reading a pipe-delimited file.
#[derive(Debug)]
pub(crate) enum RecordError {
    Io(std::io::Error),
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl RecordError {
    fn reason(expected: usize, found: usize) -> String {
        format!("expected {expected} fields separated by '|', found {found}")
    }
}

impl From<RecordError> for RepositoryError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Io(e) => Self::Io(e),
            RecordError::FieldCount {
                line,
                expected,
                found,
            } => Self::Malformed {
                line,
                reason: RecordError::reason(expected, found),
            },
        }
    }
}

impl From<RecordError> for CatalogError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Io(e) => Self::Io(e),
            RecordError::FieldCount {
                line,
                expected,
                found,
            } => Self::Malformed {
                line,
                reason: RecordError::reason(expected, found),
            },
        }
    }
}

/// Iterate over the data lines of a pipe-delimited file.
///
/// Blank lines and `#` comments are skipped. Every yielded record has
/// exactly `expected` fields.
pub(crate) fn records<R: std::io::BufRead>(
    reader: R,
    expected: usize,
) -> impl Iterator<Item = Result<Record, RecordError>> {
    reader.lines().enumerate().filter_map(move |(idx, line)| {
        let line_no = idx + 1;
        let raw = match line {
            Ok(raw) => raw,
            Err(e) => return Some(Err(RecordError::Io(e))),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let fields: Vec<String> = trimmed.split('|').map(|f| f.trim().to_owned()).collect();
        if fields.len() != expected {
            return Some(Err(RecordError::FieldCount {
                line: line_no,
                expected,
                found: fields.len(),
            }));
        }

        Some(Ok(Record {
            line: line_no,
            fields,
        }))
    })
}
