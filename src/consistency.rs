//! Node and arc consistency over a [`Domains`] store.
//!
//! Node consistency drops words of the wrong length. Arc consistency (AC-3) repeatedly
//! revises ordered pairs of crossing variables until no domain changes or one empties.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::crossword::Crossword;
use crate::domains::{char_at, word_len, Domains};
use crate::variable::Variable;

/// An ordered pair `(x, y)`: "make x consistent with y".
pub type Arc = (Variable, Variable);

/// Remove from every domain the words whose length differs from the variable's length.
///
/// Returns the number of words removed. Never fails, but may leave domains empty.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) -> usize {
    let removed: usize = crossword
        .variables()
        .iter()
        .map(|var| domains.retain(var, |w| word_len(w) == var.length))
        .sum();

    debug!("node consistency removed {removed} words; {} candidates remain", domains.total());
    removed
}

/// Make `x` arc consistent with `y`: drop each word of `x` that no word of `y` agrees
/// with at their shared cell.
///
/// Returns true if `x`'s domain changed. Variables that don't cross are trivially
/// consistent and nothing changes.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: &Variable, y: &Variable) -> bool {
    let Some((ix, iy)) = crossword.overlap(x, y) else {
        return false;
    };

    let supported: HashSet<char> = domains
        .get(y)
        .map(|d| d.iter().filter_map(|w| char_at(w, iy)).collect())
        .unwrap_or_default();

    let removed = domains.retain(x, |w| char_at(w, ix).is_some_and(|c| supported.contains(&c)));
    removed > 0
}

/// Every ordered pair of crossing variables, both directions, in variable order.
#[must_use]
pub fn all_arcs(crossword: &Crossword) -> VecDeque<Arc> {
    crossword
        .variables()
        .iter()
        .flat_map(|x| crossword.neighbors(x).iter().map(move |y| (*x, *y)))
        .collect()
}

/// Arcs `(z, var)` for every neighbor `z` of `var`, used after `var`'s domain narrows.
#[must_use]
pub fn arcs_into(crossword: &Crossword, var: &Variable) -> VecDeque<Arc> {
    crossword.neighbors(var).iter().map(|z| (*z, *var)).collect()
}

/// AC-3 starting from every arc in the problem.
///
/// Returns false as soon as a domain becomes empty; true once the worklist drains.
pub fn ac3(crossword: &Crossword, domains: &mut Domains) -> bool {
    ac3_with(crossword, domains, all_arcs(crossword))
}

/// AC-3 starting from a caller-supplied worklist (processed first-in, first-out).
pub fn ac3_with(crossword: &Crossword, domains: &mut Domains, arcs: impl IntoIterator<Item = Arc>) -> bool {
    let mut queue: VecDeque<Arc> = arcs.into_iter().collect();
    let mut revisions = 0usize;

    while let Some((x, y)) = queue.pop_front() {
        if !revise(crossword, domains, &x, &y) {
            continue;
        }
        revisions += 1;

        if domains.size(&x) == 0 {
            debug!("ac3: domain of {x} emptied after {revisions} revisions");
            return false;
        }

        // pruning x may have removed the only support some other neighbor had
        queue.extend(crossword.neighbors(&x).iter().filter(|z| **z != y).map(|z| (*z, x)));
    }

    debug!("ac3: fixed point after {revisions} revisions; {} candidates remain", domains.total());
    true
}
