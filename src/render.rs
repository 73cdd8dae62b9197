//! Text rendering of a (possibly partial) fill.

use crate::crossword::Crossword;
use crate::domains::char_at;
use crate::solver::Assignment;

/// Drawn for blocked cells.
pub const BLOCK: char = '█';

/// `height × width` grid of letters placed by `assignment` (`None` where nothing is placed).
#[must_use]
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width()]; crossword.height()];
    for (var, word) in assignment {
        for (k, (r, c)) in var.cells().enumerate() {
            if let Some(cell) = letters.get_mut(r).and_then(|row| row.get_mut(c)) {
                *cell = char_at(word, k);
            }
        }
    }
    letters
}

/// One line per row: blocked cells as [`BLOCK`], open cells as their letter or a space.
#[must_use]
pub fn render(crossword: &Crossword, assignment: &Assignment) -> String {
    let letters = letter_grid(crossword, assignment);
    let mut out = String::with_capacity(crossword.height() * (crossword.width() + 1));
    for (r, row) in letters.iter().enumerate() {
        for (c, letter) in row.iter().enumerate() {
            out.push(if crossword.is_open(r, c) { letter.unwrap_or(' ') } else { BLOCK });
        }
        out.push('\n');
    }
    out
}
