use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use xwfill::crossword::Crossword;
use xwfill::render;
use xwfill::solver::{self, FillError, FillStatus, SolverConfig};
use xwfill::word_list::WordList;

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Structure file: one row per line, '_' for open cells, anything else blocked
    structure: PathBuf,

    /// Word list file (one word per line, optionally 'word;score')
    words: PathBuf,

    /// Write the filled grid to this file
    output: Option<PathBuf>,

    /// Minimum score for scored word-list lines
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Disable arc-consistency inference during search
    #[arg(long)]
    no_inference: bool,
}

/// Entry point of the xwfill CLI.
///
/// Delegates to [`try_main`], printing any error with its code and help before
/// exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var(xwfill::log::DEBUG_ENV_VAR).is_ok();
    xwfill::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(fill_err) = e.downcast_ref::<FillError>() {
            eprintln!("Error: {}", fill_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load the structure and word list, fill the grid, print it (and optionally save it).
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let crossword = Crossword::load_from_path(&cli.structure).map_err(FillError::from)?;
    let word_list = WordList::load_from_path(&cli.words, cli.min_score).map_err(FillError::from)?;
    let vocabulary = word_list.vocabulary().map_err(FillError::from)?;

    let config = SolverConfig { inference: !cli.no_inference };
    let result = solver::fill(&crossword, &vocabulary, config)?;

    match (&result.status, &result.assignment) {
        (FillStatus::Filled, Some(assignment)) => {
            let grid = render::render(&crossword, assignment);
            print!("{grid}");
            if let Some(path) = &cli.output {
                std::fs::write(path, &grid)
                    .map_err(|e| format!("failed to write '{}': {e}", path.display()))?;
                log::info!("Saved grid to {}", path.display());
            }
        }
        _ => println!("No solution."),
    }

    eprintln!(
        "Loaded {} words for {} slots; solved in {:.3}s.",
        word_list.len(),
        crossword.variables().len(),
        result.elapsed.as_secs_f64()
    );

    Ok(())
}
