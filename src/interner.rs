//! Word interning so every domain shares one allocation per vocabulary word.
//!
//! Search copies domains on every branch; with interned `Rc<str>` words those
//! copies only bump reference counts.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// A vocabulary word as stored in domains and assignments.
pub type Word = Rc<str>;

thread_local! {
    /// Thread-local word cache (the solver is single-threaded).
    static WORDS: RefCell<HashSet<Rc<str>>> = RefCell::new(HashSet::new());
}

/// Intern a word, returning the shared `Rc<str>` for it.
pub fn intern(s: impl AsRef<str>) -> Word {
    let s = s.as_ref();

    WORDS.with(|words| {
        let mut cache = words.borrow_mut();
        if let Some(existing) = cache.get(s) {
            return Rc::clone(existing);
        }
        let rc: Rc<str> = Rc::from(s);
        cache.insert(Rc::clone(&rc));
        rc
    })
}

#[cfg(test)]
pub fn clear() {
    WORDS.with(|words| words.borrow_mut().clear());
}
