//! `crossword`: the problem graph the solver consumes.
//!
//! A [`Crossword`] owns the grid geometry, the slot [`Variable`]s found in it, and the
//! symmetric overlap map between crossing slots. It is built either from a structure
//! text (one row per line, `_` for an open cell, anything else blocked) or directly
//! from a list of variables.
//!
//! Overlaps are computed once from geometry and never change afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

use log::debug;
use nom::{
    branch::alt,
    character::complete::{char, satisfy},
    combinator::map,
    multi::many0,
    IResult,
    Parser,
};

use crate::errors::StructureError;
use crate::variable::Variable;

/// Parser result type with our `StructureError`
type PResult<'a, O> = IResult<&'a str, O, Box<StructureError>>;

/// Character marking an open (fillable) cell.
pub const OPEN_CELL: char = '_';

static NO_NEIGHBORS: BTreeSet<Variable> = BTreeSet::new();

#[derive(Debug, Clone)]
pub struct Crossword {
    height: usize,
    width: usize,
    /// `structure[row][col]` is true for open cells
    structure: Vec<Vec<bool>>,
    /// Slots in their stable (row, col, direction, length) order
    variables: Vec<Variable>,
    /// Only crossing pairs are present; both orders are stored
    overlaps: HashMap<(Variable, Variable), (usize, usize)>,
    neighbors: BTreeMap<Variable, BTreeSet<Variable>>,
}

// === Structure row parsers ===

fn cell(input: &str) -> PResult<'_, bool> {
    alt((
        map(char(OPEN_CELL), |_| true),
        map(satisfy(|c| !c.is_control()), |_| false),
    ))
    .parse(input)
}

fn row_cells(input: &str) -> PResult<'_, Vec<bool>> {
    many0(cell).parse(input)
}

/// Parse one structure line into open/blocked flags.
fn parse_row(row: usize, line: &str) -> Result<Vec<bool>, Box<StructureError>> {
    match row_cells(line) {
        Ok(("", cells)) => Ok(cells),
        Ok((rest, cells)) => Err(Box::new(StructureError::InvalidCell {
            row,
            col: cells.len(),
            found: rest.chars().next().unwrap_or('?'),
        })),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => {
            Err(Box::new(StructureError::NomError(nom::error::ErrorKind::Complete)))
        }
    }
}

impl FromStr for Crossword {
    type Err = Box<StructureError>;

    /// Parse a structure text into a `Crossword`.
    ///
    /// Rows shorter than the widest row are padded with blocked cells.
    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = contents.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(Box::new(StructureError::EmptyStructure));
        }

        let rows = lines
            .iter()
            .enumerate()
            .map(|(i, line)| parse_row(i, line))
            .collect::<Result<Vec<_>, _>>()?;

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let structure: Vec<Vec<bool>> = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, false);
                r
            })
            .collect();

        if !structure.iter().flatten().any(|&open| open) {
            return Err(Box::new(StructureError::NoOpenCells));
        }

        let variables = find_variables(&structure, height, width);
        Ok(Self::build(height, width, structure, variables))
    }
}

/// Every maximal run of two or more open cells, across and down.
fn find_variables(structure: &[Vec<bool>], height: usize, width: usize) -> Vec<Variable> {
    let open = |r: usize, c: usize| structure[r][c];
    let mut variables = Vec::new();

    for r in 0..height {
        for c in 0..width {
            if !open(r, c) {
                continue;
            }
            if c == 0 || !open(r, c - 1) {
                let length = (c..width).take_while(|&k| open(r, k)).count();
                if length > 1 {
                    variables.push(Variable::across(r, c, length));
                }
            }
            if r == 0 || !open(r - 1, c) {
                let length = (r..height).take_while(|&k| open(k, c)).count();
                if length > 1 {
                    variables.push(Variable::down(r, c, length));
                }
            }
        }
    }

    variables
}

impl Crossword {
    /// Build a problem graph directly from slots. The grid is sized to fit them and
    /// every covered cell is open.
    pub fn from_variables(variables: impl IntoIterator<Item = Variable>) -> Self {
        let variables: Vec<Variable> = variables.into_iter().collect();
        let height = variables.iter().flat_map(|v| v.cells()).map(|(r, _)| r + 1).max().unwrap_or(0);
        let width = variables.iter().flat_map(|v| v.cells()).map(|(_, c)| c + 1).max().unwrap_or(0);

        let mut structure = vec![vec![false; width]; height];
        for (r, c) in variables.iter().flat_map(|v| v.cells()) {
            structure[r][c] = true;
        }

        Self::build(height, width, structure, variables)
    }

    /// Native-only convenience method: read a structure file and parse it.
    ///
    /// # Errors
    ///
    /// Returns `StructureError::Io` if the file cannot be read, or any parse error
    /// from [`Crossword::from_str`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<StructureError>> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            Box::new(StructureError::Io { path: path_ref.display().to_string(), reason: e.to_string() })
        })?;
        data.parse()
    }

    fn build(height: usize, width: usize, structure: Vec<Vec<bool>>, mut variables: Vec<Variable>) -> Self {
        variables.sort();
        variables.dedup();

        // cell -> every (slot, index within slot) covering it
        let mut by_cell: BTreeMap<(usize, usize), Vec<(Variable, usize)>> = BTreeMap::new();
        for v in &variables {
            for (k, cell) in v.cells().enumerate() {
                by_cell.entry(cell).or_default().push((*v, k));
            }
        }

        let mut overlaps = HashMap::new();
        for covering in by_cell.values() {
            for &(x, ix) in covering {
                for &(y, iy) in covering {
                    if x != y {
                        // same-direction slots may share several cells; keep the first
                        overlaps.entry((x, y)).or_insert((ix, iy));
                    }
                }
            }
        }

        let mut neighbors: BTreeMap<Variable, BTreeSet<Variable>> =
            variables.iter().map(|v| (*v, BTreeSet::new())).collect();
        for &(x, y) in overlaps.keys() {
            neighbors.entry(x).or_default().insert(y);
        }

        debug!(
            "crossword {height}x{width}: {} variables, {} crossings",
            variables.len(),
            overlaps.len() / 2
        );

        Self { height, width, structure, variables, overlaps, neighbors }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// True if `(row, col)` is inside the grid and open.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.structure.get(row).and_then(|r| r.get(col)).copied().unwrap_or(false)
    }

    /// Slots in stable order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// `(index in x, index in y)` of the shared cell, or `None` if x and y don't cross.
    #[must_use]
    pub fn overlap(&self, x: &Variable, y: &Variable) -> Option<(usize, usize)> {
        self.overlaps.get(&(*x, *y)).copied()
    }

    /// Every slot crossing `var`.
    #[must_use]
    pub fn neighbors(&self, var: &Variable) -> &BTreeSet<Variable> {
        self.neighbors.get(var).unwrap_or(&NO_NEIGHBORS)
    }
}
