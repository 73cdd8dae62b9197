//! Backtracking search that fills every slot of a [`Crossword`] with a distinct word.
//!
//! # Pipeline
//!
//! 1. Node consistency drops words of the wrong length.
//! 2. AC-3 prunes words with no support in a crossing slot. This pruning is shared by
//!    the whole search.
//! 3. Backtracking picks the unassigned slot with the fewest candidates (ties: most
//!    crossings, then slot order) and tries its words least-constraining first (ties:
//!    alphabetical). With inference enabled each branch works on its own copy of the
//!    domains, narrowed by AC-3 after the tentative assignment.
//!
//! The first complete, consistent assignment wins. An unsatisfiable grid is not an
//! error: [`CrosswordCreator::solve`] returns `None`.
//!
//! # Error Handling
//!
//! [`fill`] returns [`FillError`]:
//!
//! - F001: `StructureFailure` (Structure or word list could not be used (wraps [`StructureError`]))
//! - F002: `NoVariables` (Structure has no slot of two or more cells)
//!
//! # Examples
//!
//! ```
//! use xwfill::crossword::Crossword;
//! use xwfill::solver::{fill, FillStatus, SolverConfig};
//! use xwfill::word_list::WordList;
//!
//! let crossword: Crossword = "___\n_##\n_##\n".parse()?;
//! let vocabulary = WordList::parse_from_str("cat\ncow\ndog", 0).vocabulary()?;
//! let result = fill(&crossword, &vocabulary, SolverConfig::default())?;
//!
//! assert_eq!(result.status, FillStatus::Filled);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::time::Duration;

use instant::Instant;
use log::{debug, info};

use crate::consistency::{self, arcs_into, Arc};
use crate::crossword::Crossword;
use crate::domains::{char_at, word_len, Domains};
use crate::errors::StructureError;
use crate::interner::Word;
use crate::variable::Variable;

/// A (possibly partial) mapping from slot to word.
pub type Assignment = BTreeMap<Variable, Word>;

/// Tunables for the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Run AC-3 on a branch-local copy of the domains after every tentative assignment.
    pub inference: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { inference: true }
    }
}

/// Outcome of a [`fill`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStatus {
    /// Every slot received a word.
    Filled,
    /// The search was exhausted without a consistent assignment.
    Unsatisfiable,
}

#[derive(Debug, Clone)]
pub struct FillResult {
    /// The complete assignment, or `None` when unsatisfiable.
    pub assignment: Option<Assignment>,
    pub status: FillStatus,
    /// Wall-clock time spent in consistency enforcement and search.
    pub elapsed: Duration,
}

/// Unified error type for the fill pipeline.
#[derive(Debug, thiserror::Error)]
pub enum FillError {
    /// The structure or the word list could not be used.
    #[error("structure failure: {0}")]
    StructureFailure(#[from] Box<StructureError>),

    /// The structure has open cells but no slot of length two or more.
    #[error("no slots to fill (structure has no run of two or more open cells)")]
    NoVariables,
}

impl FillError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            FillError::StructureFailure(_) => "F001",
            FillError::NoVariables => "F002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            FillError::StructureFailure(_) => "Structure or word list could not be used",
            FillError::NoVariables => "Structure has no slot of two or more cells",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            FillError::StructureFailure(_) => "Loading the structure or the word list failed. This wraps an underlying StructureError (see Structure Errors section for specific error codes).",
            FillError::NoVariables => "Slots are maximal horizontal or vertical runs of at least two open cells. The structure only has isolated open cells, so there is nothing to fill.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            FillError::NoVariables => Some("Connect open cells into runs, e.g. '___' instead of '_#_'"),
            FillError::StructureFailure(_) => None, // StructureError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            FillError::StructureFailure(se) => {
                format!("{}\n  caused by: {}", self.code(), se.display_detailed())
            }
            FillError::NoVariables => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}

/// True if every slot of the crossword has a word.
#[must_use]
pub fn assignment_complete(crossword: &Crossword, assignment: &Assignment) -> bool {
    assignment.len() == crossword.variables().len()
}

/// True if the words are pairwise distinct, each fits its slot's length, and every
/// pair of assigned crossing slots agrees on the shared cell.
#[must_use]
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let mut seen: HashSet<&Word> = HashSet::with_capacity(assignment.len());

    for (var, word) in assignment {
        if !seen.insert(word) {
            return false;
        }
        if word_len(word) != var.length {
            return false;
        }
        for neighbor in crossword.neighbors(var) {
            let Some(other) = assignment.get(neighbor) else {
                continue;
            };
            let Some((i, j)) = crossword.overlap(var, neighbor) else {
                continue;
            };
            if char_at(word, i) != char_at(other, j) {
                return false;
            }
        }
    }

    true
}

/// Unassigned slot with the fewest candidates, then the most crossings, then the
/// earliest in slot order. `None` once every slot is assigned.
#[must_use]
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<Variable> {
    crossword
        .variables()
        .iter()
        .filter(|v| !assignment.contains_key(*v))
        // min_by_key keeps the first of equal keys
        .min_by_key(|v| (domains.size(v), Reverse(crossword.neighbors(v).len())))
        .copied()
}

/// `var`'s candidates ordered by how many words they would eliminate from the domains
/// of unassigned crossing slots (fewest first, ties alphabetical).
///
/// Eliminations are counted per neighbor: a word ruled out for two neighbors counts twice.
#[must_use]
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &Domains,
    var: &Variable,
    assignment: &Assignment,
) -> Vec<Word> {
    let Some(domain) = domains.get(var) else {
        return Vec::new();
    };

    // for each unassigned neighbor: (index in var, neighbor domain size, letter counts at the crossing)
    let crossings: Vec<(usize, usize, HashMap<char, usize>)> = crossword
        .neighbors(var)
        .iter()
        .filter(|n| !assignment.contains_key(*n))
        .filter_map(|n| {
            let (i, j) = crossword.overlap(var, n)?;
            let neighbor_domain = domains.get(n)?;
            let mut counts: HashMap<char, usize> = HashMap::new();
            for c in neighbor_domain.iter().filter_map(|w| char_at(w, j)) {
                *counts.entry(c).or_default() += 1;
            }
            Some((i, neighbor_domain.len(), counts))
        })
        .collect();

    let eliminated = |word: &str| -> usize {
        crossings
            .iter()
            .map(|(i, total, counts)| {
                let agreeing = char_at(word, *i).and_then(|c| counts.get(&c)).copied().unwrap_or(0);
                total - agreeing
            })
            .sum()
    };

    let mut scored: Vec<(usize, Word)> = domain.iter().map(|w| (eliminated(w), Word::clone(w))).collect();
    // stable sort keeps the alphabetical domain order among equal scores
    scored.sort_by_key(|(score, _)| *score);
    scored.into_iter().map(|(_, w)| w).collect()
}

/// Fills a [`Crossword`] from a vocabulary. Owns the domain store for one solve.
#[derive(Debug, Clone)]
pub struct CrosswordCreator<'a> {
    crossword: &'a Crossword,
    domains: Domains,
    config: SolverConfig,
}

/// Per-search counters, only logged.
#[derive(Debug, Default)]
struct SearchStats {
    nodes: usize,
    dead_ends: usize,
}

impl<'a> CrosswordCreator<'a> {
    /// Every slot's domain starts as the full vocabulary.
    #[must_use]
    pub fn new(crossword: &'a Crossword, vocabulary: &BTreeSet<Word>) -> Self {
        Self {
            crossword,
            domains: Domains::initialize(crossword.variables(), vocabulary),
            config: SolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn crossword(&self) -> &Crossword {
        self.crossword
    }

    #[must_use]
    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// See [`consistency::enforce_node_consistency`].
    pub fn enforce_node_consistency(&mut self) -> usize {
        consistency::enforce_node_consistency(self.crossword, &mut self.domains)
    }

    /// See [`consistency::revise`].
    pub fn revise(&mut self, x: &Variable, y: &Variable) -> bool {
        consistency::revise(self.crossword, &mut self.domains, x, y)
    }

    /// AC-3 over the given worklist, or over every arc when `arcs` is `None`.
    pub fn ac3(&mut self, arcs: Option<Vec<Arc>>) -> bool {
        match arcs {
            Some(arcs) => consistency::ac3_with(self.crossword, &mut self.domains, arcs),
            None => consistency::ac3(self.crossword, &mut self.domains),
        }
    }

    #[must_use]
    pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
        assignment_complete(self.crossword, assignment)
    }

    #[must_use]
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        consistent(self.crossword, assignment)
    }

    #[must_use]
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<Variable> {
        select_unassigned_variable(self.crossword, &self.domains, assignment)
    }

    #[must_use]
    pub fn order_domain_values(&self, var: &Variable, assignment: &Assignment) -> Vec<Word> {
        order_domain_values(self.crossword, &self.domains, var, assignment)
    }

    /// Extend `assignment` to a complete, consistent one, or `None` if impossible.
    ///
    /// The creator's own domains are never modified by the search.
    #[must_use]
    pub fn backtrack(&self, assignment: Assignment) -> Option<Assignment> {
        let (found, stats) = self.search(assignment);
        debug!(
            "search {} after {} nodes ({} dead ends)",
            if found.is_some() { "succeeded" } else { "failed" },
            stats.nodes,
            stats.dead_ends
        );
        found
    }

    fn search(&self, assignment: Assignment) -> (Option<Assignment>, SearchStats) {
        let mut assignment = assignment;
        let mut stats = SearchStats::default();
        let found = self.backtrack_from(&mut assignment, &self.domains, &mut stats);
        (found.then_some(assignment), stats)
    }

    fn backtrack_from(&self, assignment: &mut Assignment, domains: &Domains, stats: &mut SearchStats) -> bool {
        if self.assignment_complete(assignment) {
            return true;
        }

        let Some(var) = select_unassigned_variable(self.crossword, domains, assignment) else {
            return false;
        };

        for word in order_domain_values(self.crossword, domains, &var, assignment) {
            stats.nodes += 1;
            assignment.insert(var, Word::clone(&word));

            if consistent(self.crossword, assignment) {
                let solved = if self.config.inference {
                    // narrow a branch-local copy; siblings keep the untouched `domains`
                    let mut branch = domains.clone();
                    branch.retain(&var, |w| w == &*word);
                    consistency::ac3_with(self.crossword, &mut branch, arcs_into(self.crossword, &var))
                        && self.backtrack_from(assignment, &branch, stats)
                } else {
                    self.backtrack_from(assignment, domains, stats)
                };
                if solved {
                    return true;
                }
            }

            assignment.remove(&var);
        }

        stats.dead_ends += 1;
        false
    }

    /// Enforce node and arc consistency, then search from the empty assignment.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.enforce_node_consistency();
        if !self.ac3(None) {
            // a domain is empty: the search below fails as soon as it selects that slot
            debug!("arc consistency emptied a domain");
        }
        self.backtrack(Assignment::new())
    }
}

/// Fill `crossword` from `vocabulary`, timing the solve.
///
/// # Errors
///
/// - `FillError::NoVariables` if the crossword has no slots.
/// - `FillError::StructureFailure` wrapping `StructureError::EmptyVocabulary` if the
///   vocabulary is empty.
///
/// An unsatisfiable grid is reported through `FillStatus::Unsatisfiable`, not an error.
pub fn fill(
    crossword: &Crossword,
    vocabulary: &BTreeSet<Word>,
    config: SolverConfig,
) -> Result<FillResult, FillError> {
    if crossword.variables().is_empty() {
        return Err(FillError::NoVariables);
    }
    if vocabulary.is_empty() {
        return Err(FillError::StructureFailure(Box::new(StructureError::EmptyVocabulary)));
    }

    info!(
        "Filling {} slots from {} words (inference {})",
        crossword.variables().len(),
        vocabulary.len(),
        if config.inference { "on" } else { "off" }
    );

    let start = Instant::now();
    let mut creator = CrosswordCreator::new(crossword, vocabulary).with_config(config);
    let assignment = creator.solve();
    let elapsed = start.elapsed();

    let status = if assignment.is_some() { FillStatus::Filled } else { FillStatus::Unsatisfiable };
    info!("{status:?} in {:.3}s", elapsed.as_secs_f64());

    debug_assert!(
        assignment.as_ref().is_none_or(|a| assignment_complete(crossword, a) && consistent(crossword, a)),
        "a returned assignment must be complete and consistent"
    );

    Ok(FillResult { assignment, status, elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::intern;

    fn vocabulary(words: &[&str]) -> BTreeSet<Word> {
        words.iter().map(intern).collect()
    }

    fn assignment(pairs: &[(Variable, &str)]) -> Assignment {
        pairs.iter().map(|(v, w)| (*v, intern(w))).collect()
    }

    fn words_of(assignment: &Assignment) -> Vec<String> {
        assignment.values().map(|w| w.to_string()).collect()
    }

    // x: across at (2,0) len 3, y: down at (0,1) len 5, crossing at x[1] / y[2]
    fn cross() -> (Variable, Variable) {
        (Variable::across(2, 0, 3), Variable::down(0, 1, 5))
    }

    const BOTH_CONFIGS: [SolverConfig; 2] = [SolverConfig { inference: true }, SolverConfig { inference: false }];

    mod consistency_predicate {
        use super::*;

        #[test]
        fn test_empty_assignment_is_consistent() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            assert!(consistent(&cw, &Assignment::new()));
        }

        #[test]
        fn test_matching_crossing_is_consistent() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            assert!(consistent(&cw, &assignment(&[(x, "CAT"), (y, "BEAST")])));
        }

        #[test]
        fn test_conflicting_crossing_is_inconsistent() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            assert!(!consistent(&cw, &assignment(&[(x, "CAT"), (y, "HELLO")])));
        }

        #[test]
        fn test_wrong_length_is_inconsistent() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            assert!(!consistent(&cw, &assignment(&[(x, "CATS")])));
        }

        #[test]
        fn test_repeated_word_is_inconsistent() {
            let a = Variable::across(0, 0, 3);
            let b = Variable::across(2, 0, 3);
            let cw = Crossword::from_variables([a, b]);
            assert!(!consistent(&cw, &assignment(&[(a, "CAT"), (b, "CAT")])));
            assert!(consistent(&cw, &assignment(&[(a, "CAT"), (b, "DOG")])));
        }

        #[test]
        fn test_partial_assignment_ignores_unassigned_neighbors() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            assert!(consistent(&cw, &assignment(&[(y, "HELLO")])));
        }
    }

    mod heuristics {
        use super::*;

        #[test]
        fn test_select_prefers_fewest_remaining_values() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "COT", "BEAST"]));
            creator.enforce_node_consistency();
            // x has 2 candidates, y has 1
            assert_eq!(creator.select_unassigned_variable(&Assignment::new()), Some(y));
            assert_eq!(creator.select_unassigned_variable(&assignment(&[(y, "BEAST")])), Some(x));
        }

        #[test]
        fn test_select_breaks_ties_by_degree() {
            // hub (down col 1) crosses both a and b; a and b only cross hub
            let a = Variable::across(0, 0, 3);
            let hub = Variable::down(0, 1, 3);
            let b = Variable::across(2, 0, 3);
            let cw = Crossword::from_variables([a, hub, b]);
            let creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "DOG"]));
            assert_eq!(creator.select_unassigned_variable(&Assignment::new()), Some(hub));
        }

        #[test]
        fn test_select_breaks_remaining_ties_by_slot_order() {
            let a = Variable::across(0, 0, 3);
            let b = Variable::across(2, 0, 3);
            let cw = Crossword::from_variables([b, a]);
            let creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "DOG"]));
            assert_eq!(creator.select_unassigned_variable(&Assignment::new()), Some(a));
        }

        #[test]
        fn test_select_none_when_complete() {
            let a = Variable::across(0, 0, 3);
            let cw = Crossword::from_variables([a]);
            let creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT"]));
            assert_eq!(creator.select_unassigned_variable(&assignment(&[(a, "CAT")])), None);
        }

        #[test]
        fn test_order_least_constraining_first() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "COT", "BEAST", "FEAST", "BLOOM"]));
            creator.enforce_node_consistency();
            // y[2] letters: A, A, O. CAT eliminates 1, COT eliminates 2
            let ordered = creator.order_domain_values(&x, &Assignment::new());
            assert_eq!(ordered, vec![intern("CAT"), intern("COT")]);
        }

        #[test]
        fn test_order_ties_are_alphabetical() {
            let a = Variable::across(0, 0, 3);
            let cw = Crossword::from_variables([a]);
            let creator = CrosswordCreator::new(&cw, &vocabulary(&["DOG", "CAT", "EMU"]));
            let ordered = creator.order_domain_values(&a, &Assignment::new());
            assert_eq!(ordered, vec![intern("CAT"), intern("DOG"), intern("EMU")]);
        }

        #[test]
        fn test_order_ignores_assigned_neighbors() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["COT", "CAT", "BEAST", "FEAST"]));
            creator.enforce_node_consistency();
            // with y assigned nothing is eliminated, so the order falls back to alphabetical
            let ordered = creator.order_domain_values(&x, &assignment(&[(y, "BEAST")]));
            assert_eq!(ordered, vec![intern("CAT"), intern("COT")]);
        }

        #[test]
        fn test_order_counts_eliminations_per_neighbor() {
            // a crosses both b and c at its first and last letters
            let a = Variable::across(0, 0, 3);
            let b = Variable::down(0, 0, 3);
            let c = Variable::down(0, 2, 3);
            let cw = Crossword::from_variables([a, b, c]);
            let domains = Domains::initialize(cw.variables(), &vocabulary(&["TOT", "TAX", "XIS"]));

            // b and c both hold {TOT, TAX, XIS}; a's letters 0 and 2 meet their letter 0
            // TOT: b loses XIS, c loses XIS -> 2
            // TAX: b loses XIS, c loses TOT and TAX -> 3
            // XIS: b loses TOT and TAX, c loses all three -> 5
            let ordered = order_domain_values(&cw, &domains, &a, &Assignment::new());
            assert_eq!(ordered, vec![intern("TOT"), intern("TAX"), intern("XIS")]);
        }
    }

    mod search {
        use super::*;

        #[test]
        fn test_two_crossing_slots() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            for config in BOTH_CONFIGS {
                let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "BEAST"])).with_config(config);
                let solution = creator.solve().expect("CAT[1] == BEAST[2]");
                assert_eq!(solution, assignment(&[(x, "CAT"), (y, "BEAST")]));
            }
        }

        #[test]
        fn test_two_crossing_slots_with_disagreeing_letters() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            for config in BOTH_CONFIGS {
                let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "HELLO"])).with_config(config);
                assert!(creator.solve().is_none());
            }
        }

        #[test]
        fn test_single_slot_takes_any_word() {
            let v = Variable::across(0, 0, 4);
            let cw = Crossword::from_variables([v]);
            let words = vocabulary(&["WORD", "FOUR", "FIVE"]);
            let mut creator = CrosswordCreator::new(&cw, &words);
            assert_eq!(creator.enforce_node_consistency(), 0);

            let solution = creator.backtrack(Assignment::new()).unwrap();
            assert!(words.contains(&solution[&v]));
        }

        #[test]
        fn test_single_slot_without_fitting_word() {
            let v = Variable::across(0, 0, 4);
            let cw = Crossword::from_variables([v]);
            let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["OK"]));
            assert!(creator.solve().is_none());
            assert_eq!(creator.domains().size(&v), 0);
        }

        #[test]
        fn test_disjoint_slots_need_distinct_words() {
            let a = Variable::across(0, 0, 3);
            let b = Variable::across(2, 0, 3);
            let cw = Crossword::from_variables([a, b]);
            for config in BOTH_CONFIGS {
                let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT"])).with_config(config);
                assert!(creator.solve().is_none());

                let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "DOG"])).with_config(config);
                let solution = creator.solve().unwrap();
                assert_ne!(solution[&a], solution[&b]);
            }
        }

        #[test]
        fn test_backtracks_out_of_a_dead_end() {
            // hub crosses a at hub[0] and b at hub[2]
            let a = Variable::across(0, 0, 3);
            let hub = Variable::down(0, 0, 3);
            let b = Variable::across(2, 0, 3);
            let cw = Crossword::from_variables([a, hub, b]);
            let words = vocabulary(&["ABA", "ACE", "EKE"]);

            for config in BOTH_CONFIGS {
                let mut creator = CrosswordCreator::new(&cw, &words).with_config(config);
                creator.enforce_node_consistency();
                assert!(creator.ac3(None));
                // arc consistency cannot see that a and b would both need the last A-word
                assert_eq!(creator.domains().total(), 9);

                // hub is picked first and ABA is its least constraining value
                assert_eq!(creator.select_unassigned_variable(&Assignment::new()), Some(hub));
                assert_eq!(creator.order_domain_values(&hub, &Assignment::new())[0], intern("ABA"));

                let (solution, stats) = creator.search(Assignment::new());
                assert!(stats.dead_ends > 0, "hub = ABA must fail before hub = ACE succeeds");
                // EKE would be missing from b if the ABA branch leaked its pruning
                assert_eq!(solution, Some(assignment(&[(hub, "ACE"), (a, "ABA"), (b, "EKE")])));
            }
        }

        #[test]
        fn test_solve_is_deterministic() {
            let cw: Crossword = "#___#\n#_##_\n#_##_\n#_##_\n#____\n".parse().unwrap();
            let words = vocabulary(&["ONE", "TWO", "SIX", "OTTER", "TENS", "SEVEN", "NINE", "FIVE", "THREE", "EIGHT", "FOUR", "NEST"]);
            let first = CrosswordCreator::new(&cw, &words).solve();
            for _ in 0..3 {
                assert_eq!(CrosswordCreator::new(&cw, &words).solve(), first);
            }
        }

        #[test]
        fn test_backtrack_does_not_touch_creator_domains() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            let mut creator = CrosswordCreator::new(&cw, &vocabulary(&["CAT", "COT", "BEAST", "BLOOM"]));
            creator.enforce_node_consistency();
            let before = creator.domains().clone();
            assert!(creator.backtrack(Assignment::new()).is_some());
            assert_eq!(creator.domains(), &before);
        }

        #[test]
        fn test_inference_and_plain_search_agree_on_satisfiability() {
            let cw: Crossword = "____\n_##_\n____\n".parse().unwrap();
            let words = vocabulary(&["BEAR", "BUSY", "RAIN", "YELP", "RING", "LEAN", "BEAD", "BARD"]);
            let with = fill(&cw, &words, SolverConfig { inference: true }).unwrap();
            let without = fill(&cw, &words, SolverConfig { inference: false }).unwrap();
            assert_eq!(with.status, without.status);
        }
    }

    mod fill_pipeline {
        use super::*;

        #[test]
        fn test_fill_reports_filled() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            let result = fill(&cw, &vocabulary(&["CAT", "BEAST"]), SolverConfig::default()).unwrap();
            assert_eq!(result.status, FillStatus::Filled);
            assert_eq!(words_of(&result.assignment.unwrap()), vec!["BEAST", "CAT"]);
        }

        #[test]
        fn test_fill_reports_unsatisfiable() {
            let (x, y) = cross();
            let cw = Crossword::from_variables([x, y]);
            let result = fill(&cw, &vocabulary(&["CAT", "HELLO"]), SolverConfig::default()).unwrap();
            assert_eq!(result.status, FillStatus::Unsatisfiable);
            assert!(result.assignment.is_none());
        }

        #[test]
        fn test_fill_without_slots_is_error() {
            let cw: Crossword = "_#_\n".parse().unwrap();
            let err = fill(&cw, &vocabulary(&["CAT"]), SolverConfig::default()).unwrap_err();
            assert!(matches!(err, FillError::NoVariables));
        }

        #[test]
        fn test_fill_with_empty_vocabulary_is_error() {
            let cw = Crossword::from_variables([Variable::across(0, 0, 2)]);
            let err = fill(&cw, &BTreeSet::new(), SolverConfig::default()).unwrap_err();
            assert!(matches!(err, FillError::StructureFailure(ref se) if matches!(**se, StructureError::EmptyVocabulary)));
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_codes() {
            assert_eq!(FillError::StructureFailure(Box::new(StructureError::EmptyStructure)).code(), "F001");
            assert_eq!(FillError::NoVariables.code(), "F002");
        }

        #[test]
        fn test_structure_failure_shows_chain() {
            let err = FillError::StructureFailure(Box::new(StructureError::NoOpenCells));
            let detailed = err.display_detailed();
            assert!(detailed.contains("F001"));
            assert!(detailed.contains("caused by"));
            assert!(detailed.contains("E002"));
        }

        #[test]
        fn test_no_variables_has_help() {
            let detailed = FillError::NoVariables.display_detailed();
            assert!(detailed.contains("F002"));
            assert!(detailed.contains("runs"));
            assert!(FillError::NoVariables.to_string().contains("no slots"));
        }

        #[test]
        fn test_from_structure_error() {
            let err: FillError = Box::new(StructureError::EmptyVocabulary).into();
            assert!(matches!(err, FillError::StructureFailure(_)));
            assert!(!err.description().is_empty());
            assert!(!err.details().is_empty());
        }
    }
}
