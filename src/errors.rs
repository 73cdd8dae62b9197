//! Error types for reading crossword structures and word lists.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E006) for documentation lookup:
//!
//! - E001: `EmptyStructure` (Structure text has no rows)
//! - E002: `NoOpenCells` (Structure has no `_` cells)
//! - E003: `InvalidCell` (Structure row contains a control character)
//! - E004: `NomError` (Low-level nom parser error)
//! - E005: `Io` (A file could not be read)
//! - E006: `EmptyVocabulary` (No words survived loading)
//!
//! # Examples
//!
//! ```
//! use xwfill::errors::StructureError;
//!
//! fn check(contents: &str) -> Result<(), Box<StructureError>> {
//!     if contents.trim().is_empty() {
//!         return Err(Box::new(StructureError::EmptyStructure));
//!     }
//!     Ok(())
//! }
//!
//! if let Err(e) = check("") {
//!     println!("Error: {}", e);
//!     println!("Code: {}", e.code());
//!     if let Some(help) = e.help() {
//!         println!("Help: {}", help);
//!     }
//! }
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};

/// Errors raised while turning input text into a crossword and a vocabulary
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    #[error("Empty structure")]
    EmptyStructure,

    #[error("Structure has no open cells")]
    NoOpenCells,

    #[error("Invalid cell {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),

    #[error("failed to read '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Word list is empty")]
    EmptyVocabulary,
}

impl<'a> NomParseError<&'a str> for Box<StructureError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(StructureError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl StructureError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            StructureError::EmptyStructure => "E001",
            StructureError::NoOpenCells => "E002",
            StructureError::InvalidCell { .. } => "E003",
            StructureError::NomError(_) => "E004",
            StructureError::Io { .. } => "E005",
            StructureError::EmptyVocabulary => "E006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            StructureError::EmptyStructure => "Structure text has no rows",
            StructureError::NoOpenCells => "Structure has no open cells",
            StructureError::InvalidCell { .. } => "Structure row contains an invalid character",
            StructureError::NomError(_) => "Low-level structure parser error",
            StructureError::Io { .. } => "A file could not be read",
            StructureError::EmptyVocabulary => "No words survived loading",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            StructureError::EmptyStructure => "The structure file was empty or contained only blank lines, so there is no grid to fill.",
            StructureError::NoOpenCells => "Every cell in the structure is blocked. Open cells are written as '_'; any other printable character is a blocked cell.",
            StructureError::InvalidCell { .. } => "Structure rows may contain '_' for open cells and any printable character for blocked cells. Control characters such as tabs are rejected.",
            StructureError::NomError(_) => "The structure row parser failed without a more specific diagnosis. This is usually an internal error.",
            StructureError::Io { .. } => "The structure or word-list file could not be opened or was not valid UTF-8.",
            StructureError::EmptyVocabulary => "The word list contained no usable lines after trimming, score filtering and deduplication.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            StructureError::EmptyStructure => Some("Example structure: '#___#' on one line, '#_##_' on the next"),
            StructureError::NoOpenCells => Some("Mark fillable cells with '_' (e.g., '__#__')"),
            StructureError::InvalidCell { .. } => Some("Replace tabs and other control characters with '#' or '_'"),
            StructureError::Io { .. } => Some("Check that the path exists and the file is readable UTF-8 text"),
            StructureError::EmptyVocabulary => Some("Provide one word per line, optionally as 'word;score', and check --min-score"),
            StructureError::NomError(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
