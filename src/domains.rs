//! Per-variable candidate word sets.
//!
//! Domains only ever shrink: pruning is the single mutation. The search engine copies
//! the whole store when it branches, so a pruned sibling never leaks into another branch.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;

use crate::interner::Word;
use crate::variable::Variable;

/// Candidate words for one variable, iterated alphabetically.
pub type Domain = BTreeSet<Word>;

/// Character count of a word (words are not assumed to be ASCII).
#[inline]
#[must_use]
pub fn word_len(word: &str) -> usize {
    word.chars().count()
}

/// The `i`-th character of a word.
#[inline]
#[must_use]
pub fn char_at(word: &str, i: usize) -> Option<char> {
    word.chars().nth(i)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    map: BTreeMap<Variable, Domain>,
}

impl Domains {
    /// Every variable starts with the full vocabulary.
    #[must_use]
    pub fn initialize(variables: &[Variable], vocabulary: &BTreeSet<Word>) -> Self {
        let map = variables.iter().map(|v| (*v, vocabulary.clone())).collect();
        Self { map }
    }

    /// Current domain of `var`, if `var` is known.
    #[must_use]
    pub fn get(&self, var: &Variable) -> Option<&Domain> {
        self.map.get(var)
    }

    /// Number of candidates left for `var` (0 for unknown variables).
    #[must_use]
    pub fn size(&self, var: &Variable) -> usize {
        self.map.get(var).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn contains_word(&self, var: &Variable, word: &str) -> bool {
        self.map.get(var).is_some_and(|d| d.contains(word))
    }

    /// Remove `word` from `var`'s domain. Returns true if it was present.
    pub fn prune(&mut self, var: &Variable, word: &str) -> bool {
        self.map.get_mut(var).is_some_and(|d| d.remove(word))
    }

    /// Keep only the words of `var`'s domain satisfying `keep`. Returns how many were removed.
    pub fn retain(&mut self, var: &Variable, mut keep: impl FnMut(&str) -> bool) -> usize {
        let Some(domain) = self.map.get_mut(var) else {
            return 0;
        };
        let before = domain.len();
        domain.retain(|w| keep(w));
        before - domain.len()
    }

    /// `(variable, domain)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Domain)> {
        self.map.iter()
    }

    /// Total number of candidate words across all variables.
    #[must_use]
    pub fn total(&self) -> usize {
        self.map.values().map(BTreeSet::len).sum()
    }
}

impl Index<&Variable> for Domains {
    type Output = Domain;

    /// # Panics
    /// Panics if `var` was not part of the variables the store was initialized with.
    /// That indicates a bug in the caller, not bad input.
    fn index(&self, var: &Variable) -> &Domain {
        match self.map.get(var) {
            Some(domain) => domain,
            None => panic!("no domain for variable {var}"),
        }
    }
}
