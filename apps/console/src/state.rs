//! # Library State
//!
//! Shared handle to the one `Library` instance behind the console session.
//!
//! ## Thread Safety
//! The library is wrapped in `Arc<Mutex<T>>`:
//! 1. One exclusive lock guards the whole catalog + registry, matching the
//!    single-writer semantics of the lending rules
//! 2. Every operation acquires the lock, runs to completion, and returns -
//!    no operation suspends or blocks on I/O while holding it
//!
//! ## Why Not RwLock?
//! Catalog operations are quick, and most menu actions modify state. A
//! RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use marquee_core::Library;

/// Shared, lock-guarded library state.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    library: Arc<Mutex<Library>>,
}

impl LibraryState {
    /// Creates state around an empty library.
    pub fn new() -> Self {
        LibraryState {
            library: Arc::new(Mutex::new(Library::new())),
        }
    }

    /// Executes a function with read access to the library.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = state.with_library(|lib| lib.item_count());
    /// ```
    pub fn with_library<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Library) -> R,
    {
        let library = self.library.lock().expect("Library mutex poisoned");
        f(&library)
    }

    /// Executes a function with write access to the library.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_library_mut(|lib| lib.borrow(patron, &title))?;
    /// ```
    pub fn with_library_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Library) -> R,
    {
        let mut library = self.library.lock().expect("Library mutex poisoned");
        f(&mut library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{Classification, Genre};

    #[test]
    fn test_state_shares_one_library() {
        let state = LibraryState::new();
        let clone = state.clone();

        state.with_library_mut(|lib| {
            lib.add_or_increment("Dune", Genre::SciFi, Classification::M15Plus, 155, 2)
        })
        .unwrap();

        // The clone sees the same underlying library
        assert_eq!(clone.with_library(|lib| lib.item_count()), 1);
        assert!(clone.with_library(|lib| lib.contains("Dune")));
    }
}
