//! `word_list`: load and normalize the vocabulary used to fill the grid.
//!
//! Reads either from a file (native builds) or from an in-memory string (WASM builds,
//! where the text comes from JavaScript).
//!
//! Parsing rules:
//! - One word per line, optionally followed by `;score`.
//! - Lines are trimmed; empty lines are skipped.
//! - Scored lines below `min_score` are skipped, as are lines whose score doesn't parse.
//! - Unscored lines are always kept.
//! - Words are normalized to uppercase, deduplicated, and sorted by length, then alphabetically.

use std::collections::BTreeSet;

use log::debug;

use crate::errors::StructureError;
use crate::interner::{intern, Word};

/// A processed, ready-to-use word list.
#[derive(Debug, Clone)]
pub struct WordList {
    /// Uppercase words sorted by (length, alphabetical).
    /// Example: `["AT", "CAT", "DOG", "HELLO"]`
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    #[must_use]
    pub fn parse_from_str(contents: &str, min_score: i32) -> WordList {
        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() {
                    return None;
                }

                let word = match line.split_once(';') {
                    Some((word_raw, score_raw)) => {
                        let Ok(score) = score_raw.trim().parse::<i32>() else {
                            debug!("skipping word-list line with unparsable score: {line:?}");
                            return None;
                        };
                        if score < min_score {
                            return None;
                        }
                        word_raw.trim()
                    }
                    None => line,
                };

                (!word.is_empty()).then(|| word.to_uppercase())
            })
            .collect();

        // dedup() only removes adjacent duplicates, so sort alphabetically first
        words.sort();
        words.dedup();
        // length in characters, matching slot lengths
        words.sort_by_cached_key(|w| (w.chars().count(), w.clone()));

        WordList { words }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Returns `StructureError::Io` if the file cannot be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        min_score: i32,
    ) -> Result<WordList, Box<StructureError>> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            Box::new(StructureError::Io { path: path_ref.display().to_string(), reason: e.to_string() })
        })?;
        Ok(Self::parse_from_str(&data, min_score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The interned vocabulary handed to the solver.
    ///
    /// # Errors
    ///
    /// Returns `StructureError::EmptyVocabulary` if no words survived loading.
    pub fn vocabulary(&self) -> Result<BTreeSet<Word>, Box<StructureError>> {
        if self.words.is_empty() {
            return Err(Box::new(StructureError::EmptyVocabulary));
        }
        Ok(self.words.iter().map(intern).collect())
    }
}
