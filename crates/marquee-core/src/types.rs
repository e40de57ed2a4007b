//! # Domain Types
//!
//! Core domain types used throughout Marquee.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Item       │   │     Patron      │   │     Handles     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  title (key)    │   │  first + last   │   │  ItemId(usize)  │   │
//! │  │  genre          │   │  (lookup key)   │   │  PatronId(usize)│   │
//! │  │  classification │   │  contact_number │   └─────────────────┘   │
//! │  │  total/available│   │  pin (4 digits) │                         │
//! │  │  times_borrowed │   │  held_items     │                         │
//! │  └─────────────────┘   └─────────────────┘                         │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐                         │
//! │  │      Genre      │   │ Classification  │                         │
//! │  │  Drama..Other   │   │  G PG M15+ MA15+│                         │
//! │  └─────────────────┘   └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Handle-Based Identity Pattern
//! Items and patrons live in owning arenas (the hash index and the patron
//! registry). Every relationship between the two aggregates - a patron's
//! held items, an item's last borrower - stores an `ItemId` or `PatronId`
//! slot handle, never a reference. This keeps ownership acyclic: the arenas
//! own record lifetime, handles only navigate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::validate_pin;
use crate::MAX_HELD_ITEMS;

// =============================================================================
// Handles
// =============================================================================

/// Slot handle of an item in the catalog's hash index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    /// Returns the raw slot index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Slot handle of a patron in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PatronId(pub(crate) usize);

impl PatronId {
    /// Returns the raw slot index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

// =============================================================================
// Genre
// =============================================================================

/// Genre of a catalog item. Closed set: parsing rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Drama,
    Adventure,
    Family,
    Action,
    SciFi,
    Comedy,
    Animated,
    Thriller,
    Other,
}

impl Genre {
    /// All genres, in prompt/display order.
    pub const ALL: [Genre; 9] = [
        Genre::Drama,
        Genre::Adventure,
        Genre::Family,
        Genre::Action,
        Genre::SciFi,
        Genre::Comedy,
        Genre::Animated,
        Genre::Thriller,
        Genre::Other,
    ];

    /// Display/prompt name of the genre.
    pub const fn name(&self) -> &'static str {
        match self {
            Genre::Drama => "Drama",
            Genre::Adventure => "Adventure",
            Genre::Family => "Family",
            Genre::Action => "Action",
            Genre::SciFi => "Sci-Fi",
            Genre::Comedy => "Comedy",
            Genre::Animated => "Animated",
            Genre::Thriller => "Thriller",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    /// Case-insensitive parse; `sci-fi`, `scifi` and `sci_fi` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drama" => Ok(Genre::Drama),
            "adventure" => Ok(Genre::Adventure),
            "family" => Ok(Genre::Family),
            "action" => Ok(Genre::Action),
            "sci-fi" | "scifi" | "sci_fi" => Ok(Genre::SciFi),
            "comedy" => Ok(Genre::Comedy),
            "animated" => Ok(Genre::Animated),
            "thriller" => Ok(Genre::Thriller),
            "other" => Ok(Genre::Other),
            _ => Err(ValidationError::InvalidFormat {
                field: "genre".to_string(),
                reason: format!("'{}' is not a recognised genre", s.trim()),
            }),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Audience classification of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// General audiences.
    G,
    /// Parental guidance recommended.
    Pg,
    /// Not recommended under 15.
    M15Plus,
    /// Restricted to 15 and over.
    Ma15Plus,
}

impl Classification {
    /// All classifications, in prompt/display order.
    pub const ALL: [Classification; 4] = [
        Classification::G,
        Classification::Pg,
        Classification::M15Plus,
        Classification::Ma15Plus,
    ];

    /// Display/prompt name of the classification.
    pub const fn name(&self) -> &'static str {
        match self {
            Classification::G => "G",
            Classification::Pg => "PG",
            Classification::M15Plus => "M15+",
            Classification::Ma15Plus => "MA15+",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Classification {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" => Ok(Classification::G),
            "pg" => Ok(Classification::Pg),
            "m15+" | "m15plus" | "m15" => Ok(Classification::M15Plus),
            "ma15+" | "ma15plus" | "ma15" => Ok(Classification::Ma15Plus),
            _ => Err(ValidationError::InvalidFormat {
                field: "classification".to_string(),
                reason: format!("'{}' is not a recognised classification", s.trim()),
            }),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalog entry: one title and its physical copy accounting.
///
/// ## Invariants
/// - `available_copies <= total_copies` at all times
/// - `times_borrowed` never decreases
/// - `title`, `genre`, `classification` and `duration_minutes` are immutable
///   after creation (repeat adds only grow the copy counters)
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// Lookup key; unique within the catalog by insert-or-increment.
    pub title: String,

    /// Genre of the item.
    pub genre: Genre,

    /// Audience classification.
    pub classification: Classification,

    /// Running time in minutes.
    pub duration_minutes: u32,

    /// Physical copies owned by the library.
    pub total_copies: u32,

    /// Copies currently on the shelf (not on loan).
    pub available_copies: u32,

    /// Number of successful borrows over the item's lifetime.
    pub times_borrowed: u64,

    /// Most recent borrower, informational only. Multiple copies may be on
    /// loan at once; `Patron::held_items` is the source of truth for who
    /// holds what.
    pub last_borrower: Option<PatronId>,

    /// When the title first entered the catalog.
    pub added_at: DateTime<Utc>,

    /// Monotone insertion sequence; deterministic tie-break for the
    /// most-borrowed ranking.
    pub(crate) seq: u64,
}

impl Item {
    /// Creates a new catalog entry with all copies on the shelf.
    pub fn new(
        title: impl Into<String>,
        genre: Genre,
        classification: Classification,
        duration_minutes: u32,
        copies: u32,
        seq: u64,
    ) -> Self {
        Item {
            title: title.into(),
            genre,
            classification,
            duration_minutes,
            total_copies: copies,
            available_copies: copies,
            times_borrowed: 0,
            last_borrower: None,
            added_at: Utc::now(),
            seq,
        }
    }

    /// Adds copies to both the total and available counters.
    pub fn add_copies(&mut self, count: u32) {
        self.total_copies += count;
        self.available_copies += count;
    }

    /// Removes shelved copies from both counters.
    ///
    /// Returns `false` (and leaves the counters untouched) when more copies
    /// are requested than are on the shelf; copies out on loan are never
    /// removable.
    pub fn remove_copies(&mut self, count: u32) -> bool {
        if count > self.available_copies {
            return false;
        }
        self.available_copies -= count;
        self.total_copies -= count;
        true
    }

    /// Takes one copy off the shelf for a borrow.
    ///
    /// Returns `false` when no copy is available; the counters are only
    /// touched on success.
    pub fn take_copy(&mut self, borrower: PatronId) -> bool {
        if self.available_copies == 0 {
            return false;
        }
        self.available_copies -= 1;
        self.times_borrowed += 1;
        self.last_borrower = Some(borrower);
        true
    }

    /// Puts one copy back on the shelf.
    ///
    /// Returns `false` when every copy is already shelved - the increment is
    /// skipped, since `available_copies` is capped at `total_copies`.
    pub fn return_copy(&mut self) -> bool {
        if self.available_copies >= self.total_copies {
            return false;
        }
        self.available_copies += 1;
        true
    }

    /// Number of copies currently out on loan.
    #[inline]
    pub fn copies_on_loan(&self) -> u32 {
        self.total_copies - self.available_copies
    }

    /// Whether at least one copy is on the shelf.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

// =============================================================================
// Patron
// =============================================================================

/// A registered borrower.
///
/// ## Invariants
/// - `pin` is exactly four ASCII digits (checked at construction)
/// - `held_items` never exceeds [`MAX_HELD_ITEMS`] entries and never holds
///   the same item twice (enforced by the lending service)
#[derive(Debug, Clone, Serialize)]
pub struct Patron {
    /// First half of the lookup key.
    pub first_name: String,

    /// Second half of the lookup key.
    pub last_name: String,

    /// Contact phone number.
    pub contact_number: String,

    /// Four-digit numeric PIN used for member login. Never serialized.
    #[serde(skip_serializing)]
    pin: String,

    /// Items currently held, in borrow order.
    pub held_items: Vec<ItemId>,

    /// When the patron registered.
    pub registered_at: DateTime<Utc>,
}

impl Patron {
    /// Creates a new patron, validating the PIN.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        contact_number: impl Into<String>,
        pin: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let pin = pin.into();
        validate_pin(&pin)?;

        Ok(Patron {
            first_name: first_name.into(),
            last_name: last_name.into(),
            contact_number: contact_number.into(),
            pin,
            held_items: Vec::new(),
            registered_at: Utc::now(),
        })
    }

    /// Full display name, `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the name pair matches, exact comparison.
    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    /// Constant-shape PIN check for member login.
    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin == pin
    }

    /// Whether the patron currently holds this item.
    #[inline]
    pub fn holds(&self, item: ItemId) -> bool {
        self.held_items.contains(&item)
    }

    /// Number of items currently held.
    #[inline]
    pub fn hold_count(&self) -> usize {
        self.held_items.len()
    }

    /// Whether the patron is at the borrowing limit.
    #[inline]
    pub fn at_hold_limit(&self) -> bool {
        self.held_items.len() >= MAX_HELD_ITEMS
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
