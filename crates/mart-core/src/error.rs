//! Unified error types for the mart crates
//!
//! [`MartError`] is the error every library crate returns at its public
//! boundary. Loader failures carry a more detailed [`LoadError`] which converts
//! into `MartError::Load`.
//!
//! # Example
//!
//! ```ignore
//! use mart_core::{MartError, MartResult};
//!
//! fn answer(page: &str, question: &str) -> MartResult<()> {
//!     let dataset = handle.get()?;
//!     let question = catalog::resolve(page, question)?;
//!     catalog::run(question, &dataset, None)?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading the sales CSV into a [`crate::Dataset`].
///
/// Every variant is fatal for the session: no partial dataset is produced.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("opening {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks one or more required columns
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A row could not be decoded (wrong field count, non-numeric measure, ...)
    #[error("malformed CSV at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    /// A cell decoded but holds a value outside its domain
    #[error("invalid value {value:?} for column '{column}' at line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
}

/// Unified error type for all mart operations.
#[derive(Error, Debug)]
pub enum MartError {
    /// Dataset could not be loaded
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// The (page, question) pair is not registered in the catalog
    #[error("Unknown query: page '{page}', question '{question}'")]
    UnknownQuery { page: String, question: String },

    /// I/O errors while writing export targets
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Structural validation errors (bad bindings, ragged rows)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failures reported by the dataframe backend
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using MartError.
pub type MartResult<T> = Result<T, MartError>;

impl MartError {
    pub fn unknown_query(page: impl Into<String>, question: impl Into<String>) -> Self {
        MartError::UnknownQuery {
            page: page.into(),
            question: question.into(),
        }
    }
}

impl From<serde_json::Error> for MartError {
    fn from(err: serde_json::Error) -> Self {
        MartError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = LoadError::MissingColumns(vec!["Date".into(), "Time".into()]);
        assert_eq!(err.to_string(), "missing required column(s): Date, Time");
    }

    #[test]
    fn load_error_converts_into_mart_error() {
        let err: MartError = LoadError::MissingColumns(vec!["Date".into()]).into();
        assert!(matches!(err, MartError::Load(_)));
        assert!(err.to_string().contains("Date"));
    }

    #[test]
    fn unknown_query_names_page_and_question() {
        let err = MartError::unknown_query("Univariate Analysis", "Nope");
        let text = err.to_string();
        assert!(text.contains("Univariate Analysis"));
        assert!(text.contains("Nope"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MartError = io_err.into();
        assert!(matches!(err, MartError::Io(_)));
    }

    #[test]
    fn question_mark_operator() {
        fn inner() -> MartResult<()> {
            Err(MartError::Validation("test".into()))
        }

        fn outer() -> MartResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
