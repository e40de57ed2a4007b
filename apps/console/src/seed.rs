//! # Seed Data Loading
//!
//! Populates the library from a JSON file for development and demos.
//!
//! ## File Shape
//! ```json
//! {
//!   "items": [
//!     {
//!       "title": "Dune",
//!       "genre": "sci_fi",
//!       "classification": "m15_plus",
//!       "duration_minutes": 155,
//!       "copies": 2
//!     }
//!   ],
//!   "patrons": [
//!     {
//!       "first_name": "Alice",
//!       "last_name": "Nguyen",
//!       "contact_number": "0400 111 222",
//!       "pin": "1234"
//!     }
//!   ]
//! }
//! ```
//!
//! Entries are applied through the same operation contracts the menus use;
//! an entry the core rejects is skipped with a warning rather than aborting
//! the whole load.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use marquee_core::{Classification, Genre, Library};

// =============================================================================
// Seed File Types
// =============================================================================

/// Top-level seed file: both sections optional.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub items: Vec<ItemSeed>,

    #[serde(default)]
    pub patrons: Vec<PatronSeed>,
}

/// One catalog entry to stock.
#[derive(Debug, Deserialize)]
pub struct ItemSeed {
    pub title: String,
    pub genre: Genre,
    pub classification: Classification,
    pub duration_minutes: u32,
    pub copies: u32,
}

/// One patron to register.
#[derive(Debug, Deserialize)]
pub struct PatronSeed {
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
    pub pin: String,
}

// =============================================================================
// Loading
// =============================================================================

/// Parses seed JSON.
pub fn parse(json: &str) -> Result<SeedFile> {
    serde_json::from_str(json).context("invalid seed file")
}

/// Reads and parses a seed file from disk.
pub fn load(path: &Path) -> Result<SeedFile> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read seed file {}", path.display()))?;
    parse(&json)
}

/// Applies a seed to the library, one entry at a time.
///
/// Returns `(items_applied, patrons_applied)`. Rejected entries (duplicate
/// patron, invalid PIN, catalog full, ...) are logged and skipped.
pub fn apply(seed: &SeedFile, library: &mut Library) -> (usize, usize) {
    let mut items = 0;
    for item in &seed.items {
        match library.add_or_increment(
            &item.title,
            item.genre,
            item.classification,
            item.duration_minutes,
            item.copies,
        ) {
            Ok(_) => items += 1,
            Err(reason) => warn!(title = %item.title, %reason, "seed item skipped"),
        }
    }

    let mut patrons = 0;
    for patron in &seed.patrons {
        match library.register(
            &patron.first_name,
            &patron.last_name,
            &patron.contact_number,
            &patron.pin,
        ) {
            Ok(_) => patrons += 1,
            Err(reason) => warn!(
                first = %patron.first_name,
                last = %patron.last_name,
                %reason,
                "seed patron skipped"
            ),
        }
    }

    (items, patrons)
}
