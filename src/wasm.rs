use crate::crossword::Crossword;
use crate::log::init_logger;
use crate::render::render;
use crate::solver::{fill, FillError, FillStatus, SolverConfig};
use crate::word_list::WordList;
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "F002")
    code: String,
    message: String,
    description: String,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<FillError> for WasmError {
    fn from(e: FillError) -> Self {
        // surface the nested StructureError rather than the wrapper
        match &e {
            FillError::StructureFailure(se) => WasmError {
                code: se.code().to_string(),
                message: se.to_string(),
                description: se.description().to_string(),
                details: se.details().to_string(),
                help: se.help().map(str::to_string),
            },
            FillError::NoVariables => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);
        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }
        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }
        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(what: &str, e: &serde_wasm_bindgen::Error) -> WasmError {
    WasmError {
        code: "WASM001".to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
}

/// Set up the panic hook and logging. Call once after the module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
struct WasmFillResult {
    /// Rendered rows (empty when unsatisfiable)
    grid: Vec<String>,
    status: String,
    elapsed_ms: f64,
}

/// JS entry: (structure: string, words: string, inference: boolean)
/// returns `{ grid: string[], status: "filled" | "unsatisfiable", elapsed_ms: number }`
#[wasm_bindgen]
pub fn fill_wasm(structure: &str, words: &str, inference: bool) -> Result<JsValue, JsValue> {
    let crossword: Crossword = structure.parse().map_err(|e| WasmError::from(FillError::from(e)))?;
    let vocabulary = WordList::parse_from_str(words, i32::MIN)
        .vocabulary()
        .map_err(|e| WasmError::from(FillError::from(e)))?;

    let result = fill(&crossword, &vocabulary, SolverConfig { inference }).map_err(WasmError::from)?;

    let grid = result
        .assignment
        .as_ref()
        .map(|a| render(&crossword, a).lines().map(str::to_string).collect())
        .unwrap_or_default();
    let status = match result.status {
        FillStatus::Filled => "filled",
        FillStatus::Unsatisfiable => "unsatisfiable",
    };

    let wasm_result = WasmFillResult {
        grid,
        status: status.to_string(),
        elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
    };
    to_value(&wasm_result).map_err(|e| serialization_error("fill result", &e).into())
}

/// Parse a newline-separated word list (optionally `word;score`) and return the
/// normalized words as a JS string array.
#[wasm_bindgen]
pub fn parse_word_list(text: &str, min_score: i32) -> Result<JsValue, JsValue> {
    let word_list = WordList::parse_from_str(text, min_score);
    to_value(&word_list.words).map_err(|e| serialization_error("word list", &e).into())
}
