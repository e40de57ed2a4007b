//! # marquee-core: Pure Catalog Logic for Marquee
//!
//! This crate is the **heart** of Marquee. It models a physical media
//! lending catalog - titled items with multiple physical copies, borrowed
//! and returned by registered patrons under capacity constraints - as pure
//! data structures with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Marquee Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  Console App (apps/console)                   │ │
//! │  │    Menus ──► Prompts ──► Staff Gate ──► Table Display        │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │ operation contracts               │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │               ★ marquee-core (THIS CRATE) ★                   │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌────────────┐    │ │
//! │  │   │  types  │  │  index  │  │ registry │  │  catalog   │    │ │
//! │  │   │  Item   │  │HashIndex│  │ Patrons  │  │  Library   │    │ │
//! │  │   │ Patron  │  │ chains  │  │  lookup  │  │ borrow/ret │    │ │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └────────────┘    │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO PROMPTING • NO DISPLAY • PURE FUNCTIONS        │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Patron, Genre, Classification, handles)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`index`] - Fixed-capacity chained hash index over titles
//! - [`registry`] - Patron registry with name-pair lookup
//! - [`catalog`] - The `Library` service: borrow/return orchestration
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: Console, network, file system access is FORBIDDEN here
//! 3. **Handles, Not Pointers**: Items and patrons live in owning arenas;
//!    relationships store `ItemId`/`PatronId` values, never references
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use marquee_core::{Genre, Classification, Library};
//!
//! let mut library = Library::new();
//! library
//!     .add_or_increment("Dune", Genre::SciFi, Classification::M15Plus, 155, 2)
//!     .unwrap();
//!
//! let alice = library.register("Alice", "Nguyen", "0400111222", "1234").unwrap();
//! library.borrow(alice, "Dune").unwrap();
//!
//! let dune = library.find_by_title("Dune").unwrap();
//! assert_eq!(dune.available_copies, 1);
//! assert_eq!(dune.times_borrowed, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod index;
pub mod registry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use marquee_core::Library` instead of
// `use marquee_core::catalog::Library`

pub use catalog::{AddOutcome, Library, RemoveOutcome, ReturnOutcome};
pub use error::{CatalogError, CatalogResult, ValidationError};
pub use index::HashIndex;
pub use registry::PatronRegistry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of bucket slots in the title hash index.
///
/// Fixed design constant: the table is never resized or rehashed. Collisions
/// are resolved by chaining within a bucket.
pub const HASH_TABLE_SIZE: usize = 2000;

/// Multiplier of the polynomial hash accumulator.
pub const HASH_PRIME: u64 = 67;

/// Maximum number of distinct titles the catalog will hold.
///
/// Exceeding the bound rejects new-title insertion; copy increments on
/// titles already present are unaffected.
pub const MAX_CATALOG_TITLES: usize = 1000;

/// Maximum number of items a single patron may hold at once.
pub const MAX_HELD_ITEMS: usize = 5;
