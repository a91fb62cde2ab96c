//! Shared storage for token text
//!
//! Names, numbers, symbols and whitespace repeat all over a source, so their
//! text is interned once per process. The interner never shrinks. Free-form
//! text such as string literals, comments and content blocks rarely repeats
//! and is stored per token instead.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};

use lazy_static::lazy_static;

lazy_static! {
    static ref INTERNER: Mutex<HashSet<Arc<str>>> = Mutex::new(HashSet::new());
}

/// A reference-counted token value.
///
/// Values built with [`InternedString::new`] go through a process-wide set
/// that only ever grows, so identical names produced by different lines share
/// one allocation. Values built with [`InternedString::unshared`] skip the
/// set. Either way cloning tokens out of a line's cache stays cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternedString(Arc<str>);

impl InternedString {
    /// Intern `s`, reusing the existing allocation if it was seen before
    pub fn new(s: &str) -> Self {
        // The set is only ever inserted into, so a poisoned lock is still consistent.
        let mut set = INTERNER.lock().unwrap_or_else(PoisonError::into_inner);
        match set.get(s) {
            Some(existing) => InternedString(Arc::clone(existing)),
            None => {
                let arc: Arc<str> = Arc::from(s);
                set.insert(Arc::clone(&arc));
                InternedString(arc)
            }
        }
    }

    /// Wrap `s` in its own allocation, leaving the interner untouched
    pub fn unshared(s: &str) -> Self {
        InternedString(Arc::from(s))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for InternedString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InternedString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<char> for InternedString {
    fn from(c: char) -> Self {
        Self::new(c.encode_utf8(&mut [0; 4]))
    }
}

impl PartialEq<str> for InternedString {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for InternedString {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if `s` is held by the interner
#[cfg(test)]
pub(crate) fn is_interned(s: &str) -> bool {
    INTERNER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(s)
}
