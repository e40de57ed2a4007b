//! # Error Types
//!
//! Domain-specific error types for marquee-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  marquee-core errors (this file)                                   │
//! │  ├── CatalogError     - Catalog and lending rule violations        │
//! │  └── ValidationError  - Input validation failures                  │
//! │                                                                     │
//! │  Console app                                                        │
//! │  └── anyhow::Error    - Fatal startup failures only                │
//! │                                                                     │
//! │  Flow: ValidationError → CatalogError → displayed by the console,  │
//! │        menu loop continues (every variant is recoverable)          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (title, name, counts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog and lending errors.
///
/// These errors represent lending rule violations or catalog state
/// conflicts. All of them are recoverable: the console displays the message
/// and the menu loop continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No item with this title exists in the catalog.
    #[error("Title not found: '{0}'")]
    TitleNotFound(String),

    /// The catalog already holds the maximum number of distinct titles.
    ///
    /// ## When This Occurs
    /// - Adding a brand-new title once the distinct-title bound is reached
    /// - Never triggered by copy increments on an existing title
    #[error("Catalog is full: cannot hold more than {max} titles")]
    CatalogFull { max: usize },

    /// More copies were requested for removal than are currently on the shelf.
    ///
    /// Copies out on loan are never removable, so `available` here counts
    /// shelved copies only.
    #[error("Cannot remove {requested} copies of '{title}': only {available} available")]
    InsufficientCopies {
        title: String,
        available: u32,
        requested: u32,
    },

    /// Every copy of the title is currently on loan.
    #[error("No copies of '{title}' are available to borrow")]
    NoCopiesAvailable { title: String },

    /// The patron already holds a copy of this title.
    #[error("'{title}' is already borrowed by this patron")]
    AlreadyBorrowed { title: String },

    /// The patron is at the per-patron hold limit.
    ///
    /// ## When This Occurs
    /// - Borrowing a sixth item while five are held
    ///
    /// ## User Workflow
    /// ```text
    /// Borrow request (holds: 5)
    ///      │
    ///      ▼
    /// HoldLimitReached { max: 5 }
    ///      │
    ///      ▼
    /// Console shows: "return one of the items you have borrowed first"
    /// ```
    #[error("Borrowing limit reached: a patron may hold at most {max} items")]
    HoldLimitReached { max: usize },

    /// The patron does not hold an item with this title.
    #[error("'{title}' is not among this patron's borrowed items")]
    NotBorrowed { title: String },

    /// No registered patron matches the name pair.
    #[error("Patron not found: {name}")]
    PatronNotFound { name: String },

    /// A patron with the same name pair is already registered.
    #[error("Patron {name} is already registered")]
    DuplicateRegistration { name: String },

    /// Deregistration blocked while the patron still holds items.
    #[error("Patron {name} still holds {held} borrowed item(s); all items must be returned first")]
    HasActiveLoans { name: String, held: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied input doesn't meet requirements.
/// Used for early validation before catalog logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u32, max: u32 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-digit PIN, unknown genre name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================
