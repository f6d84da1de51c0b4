//! Interned strings.
//!
//! Every identifier, string literal and file name the lexer sees is stored
//! once in a [`SymbolTable`] and referred to through a [`Symbol`]. Symbols
//! compare and hash by identity, so comparing two identifiers never touches
//! their text.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashSet;

/// Handle to an interned string.
///
/// Two symbols obtained from the same [`SymbolTable`] are equal iff their
/// text is equal. Equality and hashing look at the handle only.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Returns the interned text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<u8>() as usize
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl Deref for Symbol {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

/// Insert-only pool of interned strings.
///
/// The table is `Sync`: several parsers running on different threads may
/// share one table through an [`Arc`] and intern concurrently.
#[derive(Debug, Default)]
pub struct SymbolTable {
    pool: Mutex<FxHashSet<Arc<str>>>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning the existing symbol if it was seen before.
    pub fn intern(&self, text: &str) -> Symbol {
        // The pool is never left half-updated, so a poisoned lock is still usable.
        let mut pool = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = pool.get(text) {
            return Symbol(Arc::clone(existing));
        }
        let fresh: Arc<str> = Arc::from(text);
        pool.insert(Arc::clone(&fresh));
        Symbol(fresh)
    }

    /// Returns the number of distinct strings interned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
