//! Generate error code documentation from the error enums themselves.
//!
//! Codes, descriptions, details and help text come from the `code()`, `description()`,
//! `details()` and `help()` methods of `StructureError` and `FillError`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use xwfill::errors::StructureError;
use xwfill::solver::FillError;

/// Append documentation for every error in `$errors` to the `String` `$out`
macro_rules! generate_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            let _ = writeln!($out, "### {}: {}\n", error.code(), error.description());
            let _ = writeln!($out, "**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                let _ = writeln!($out, "**How to fix:**\n```\n{help_text}\n```\n");
            }

            let _ = writeln!($out, "**Example error message:**\n```\n{error}\n```\n");
            let _ = writeln!($out, "**Detailed format:**\n```\n{}\n```\n", error.display_detailed());
            let _ = writeln!($out, "---\n");
        }
    };
}

fn all_structure_error_variants() -> Vec<StructureError> {
    vec![
        StructureError::EmptyStructure,
        StructureError::NoOpenCells,
        StructureError::InvalidCell { row: 2, col: 4, found: '\t' },
        StructureError::NomError(nom::error::ErrorKind::Satisfy),
        StructureError::Io { path: "data/structure9.txt".to_string(), reason: "No such file or directory".to_string() },
        StructureError::EmptyVocabulary,
    ]
}

fn all_fill_error_variants() -> Vec<FillError> {
    vec![
        FillError::StructureFailure(Box::new(StructureError::EmptyStructure)),
        FillError::NoVariables,
    ]
}

fn generate_docs() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**This document is generated from the source code. Do not edit manually.**\n");
    let _ = writeln!(out, "## Table of Contents\n");
    let _ = writeln!(out, "- [Fill Errors (F001–F002)](#fill-errors)");
    let _ = writeln!(out, "- [Structure Errors (E001–E006)](#structure-errors)\n");

    let _ = writeln!(out, "## Fill Errors\n");
    let _ = writeln!(out, "Top-level errors from the fill pipeline. These wrap structure errors or indicate there is nothing to fill.\n");
    generate_error_docs!(out, all_fill_error_variants());

    let _ = writeln!(out, "## Structure Errors\n");
    let _ = writeln!(out, "Errors that occur while reading a structure or a word list.\n");
    generate_error_docs!(out, all_structure_error_variants());

    let _ = writeln!(out, "## Error Display Formats\n");
    let _ = writeln!(out, "### Simple Format\n```\nError: <message>\n```\n");
    let _ = writeln!(out, "### Detailed Format (via `display_detailed()`)\n```\n<message> (<code>)\n<help text if available>\n```");

    out
}

fn main() {
    print!("{}", generate_docs());
}
