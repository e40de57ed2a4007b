//! # Title Hash Index
//!
//! Fixed-capacity hash index mapping titles to catalog items, with chained
//! collision resolution.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         HashIndex                                   │
//! │                                                                     │
//! │  buckets (2000 slots, fixed)          slots (item arena)           │
//! │  ┌──────┬───────────────────┐         ┌────┬──────────────┐        │
//! │  │ 0    │ []                │         │ 0  │ Some(Item)   │        │
//! │  │ 1    │ [ItemId(0)]       │────────►│ 1  │ Some(Item)   │        │
//! │  │ ...  │                   │         │ 2  │ None (free)  │        │
//! │  │ 597  │ [ItemId(1),       │         │ ...│              │        │
//! │  │      │  ItemId(3)]       │         └────┴──────────────┘        │
//! │  │ ...  │                   │                                      │
//! │  │ 1999 │ []                │         free: [2]                    │
//! │  └──────┴───────────────────┘                                      │
//! │                                                                     │
//! │  hash(title): per character, h = (h * 67 + code) % 2000            │
//! │  Distinct titles may share a bucket; chains are scanned with an    │
//! │  explicit title-equality check. The table is never resized.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index is the sole owner of item lifetime: items live in the slot
//! arena, and every `ItemId` handed out is a slot handle into it. Chains
//! are append-only at the tail, so bucket order is insertion order.

use crate::error::CatalogError;
use crate::types::{Item, ItemId};
use crate::{HASH_PRIME, HASH_TABLE_SIZE, MAX_CATALOG_TITLES};

// =============================================================================
// Hash Index
// =============================================================================

/// Fixed-size chained hash index over item titles, owning item storage.
#[derive(Debug)]
pub struct HashIndex {
    /// Item arena; `ItemId` is an index into this vector. Freed slots are
    /// recycled via `free`.
    slots: Vec<Option<Item>>,

    /// Recycled slot indices, used before growing `slots`.
    free: Vec<usize>,

    /// Bucket chains of slot handles, `HASH_TABLE_SIZE` of them, fixed.
    buckets: Vec<Vec<ItemId>>,

    /// Number of distinct titles currently indexed.
    len: usize,
}

impl HashIndex {
    /// Creates an empty index with all `HASH_TABLE_SIZE` buckets allocated.
    pub fn new() -> Self {
        HashIndex {
            slots: Vec::new(),
            free: Vec::new(),
            buckets: vec![Vec::new(); HASH_TABLE_SIZE],
            len: 0,
        }
    }

    /// Bucket index of a title.
    ///
    /// Polynomial accumulator over the title's characters:
    /// `h = (h * 67 + code_point) % 2000`. Deterministic, unseeded, and not
    /// collision-resistant - arbitrary titles may land in the same bucket,
    /// which the chain scan handles.
    pub fn bucket_of(title: &str) -> usize {
        let mut hash: u64 = 0;
        for c in title.chars() {
            hash = (hash * HASH_PRIME + c as u64) % HASH_TABLE_SIZE as u64;
        }
        hash as usize
    }

    /// Number of distinct titles in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no titles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the distinct-title bound has been reached.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= MAX_CATALOG_TITLES
    }

    /// Inserts a new item, appending it to the tail of its bucket chain.
    ///
    /// ## Preconditions
    /// The title must not already be indexed; callers look up with
    /// [`find`](Self::find) first and grow the existing record's copy
    /// counters instead of inserting a duplicate key.
    ///
    /// ## Errors
    /// [`CatalogError::CatalogFull`] once `MAX_CATALOG_TITLES` distinct
    /// titles are held.
    pub fn insert(&mut self, item: Item) -> Result<ItemId, CatalogError> {
        if self.is_full() {
            return Err(CatalogError::CatalogFull {
                max: MAX_CATALOG_TITLES,
            });
        }
        debug_assert!(self.find(&item.title).is_none(), "duplicate title insert");

        let bucket = Self::bucket_of(&item.title);

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(item);
                ItemId(slot)
            }
            None => {
                self.slots.push(Some(item));
                ItemId(self.slots.len() - 1)
            }
        };

        self.buckets[bucket].push(id);
        self.len += 1;
        Ok(id)
    }

    /// Looks up a title, scanning the whole bucket chain.
    ///
    /// Two distinct titles may legitimately share a bucket, so every entry
    /// in the chain is compared by title until an exact match is found.
    pub fn find(&self, title: &str) -> Option<ItemId> {
        let bucket = Self::bucket_of(title);
        self.buckets[bucket]
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|item| item.title == title))
    }

    /// Returns the item behind a handle, if the slot is live.
    #[inline]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Mutable access to the item behind a handle.
    #[inline]
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Removes an item, splicing it out of its bucket chain and freeing its
    /// slot for reuse. Returns the removed record, or `None` for a dead
    /// handle.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let item = self.slots.get_mut(id.0)?.take()?;

        let bucket = Self::bucket_of(&item.title);
        self.buckets[bucket].retain(|entry| *entry != id);

        self.free.push(id.0);
        self.len -= 1;
        Some(item)
    }

    /// Iterates over all live items with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (ItemId(i), item)))
    }
}

impl Default for HashIndex {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Classification, Genre};

    fn test_item(title: &str) -> Item {
        Item::new(title, Genre::Drama, Classification::Pg, 100, 1, 0)
    }

    /// Finds two distinct generated titles that share a bucket.
    fn colliding_titles() -> (String, String) {
        let mut seen: Vec<(usize, String)> = Vec::new();
        for i in 0..10_000 {
            let title = format!("Title {}", i);
            let bucket = HashIndex::bucket_of(&title);
            if let Some((_, other)) = seen.iter().find(|(b, _)| *b == bucket) {
                return (other.clone(), title);
            }
            seen.push((bucket, title));
        }
        unreachable!("2000 buckets must collide within 10k titles");
    }

    #[test]
    fn test_hash_is_deterministic_and_in_range() {
        assert_eq!(HashIndex::bucket_of("Dune"), HashIndex::bucket_of("Dune"));
        for title in ["", "a", "Dune", "The Matrix", "日本語タイトル"] {
            assert!(HashIndex::bucket_of(title) < HASH_TABLE_SIZE);
        }
    }

    #[test]
    fn test_insert_and_find() {
        let mut index = HashIndex::new();
        let id = index.insert(test_item("Dune")).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.find("Dune"), Some(id));
        assert_eq!(index.find("The Matrix"), None);
        assert_eq!(index.get(id).unwrap().title, "Dune");
    }

    #[test]
    fn test_colliding_titles_both_found() {
        let (a, b) = colliding_titles();
        assert_eq!(HashIndex::bucket_of(&a), HashIndex::bucket_of(&b));

        let mut index = HashIndex::new();
        let id_a = index.insert(test_item(&a)).unwrap();
        let id_b = index.insert(test_item(&b)).unwrap();

        // Same chain, distinct records
        assert_ne!(id_a, id_b);
        assert_eq!(index.find(&a), Some(id_a));
        assert_eq!(index.find(&b), Some(id_b));
    }

    #[test]
    fn test_remove_splices_chain() {
        let (a, b) = colliding_titles();
        let mut index = HashIndex::new();
        let id_a = index.insert(test_item(&a)).unwrap();
        let id_b = index.insert(test_item(&b)).unwrap();

        let removed = index.remove(id_a).unwrap();
        assert_eq!(removed.title, a);

        // Chain neighbour survives the splice
        assert_eq!(index.find(&a), None);
        assert_eq!(index.find(&b), Some(id_b));
        assert_eq!(index.len(), 1);

        // Dead handle: no double remove
        assert!(index.remove(id_a).is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_slot_reuse_after_remove() {
        let mut index = HashIndex::new();
        let id_a = index.insert(test_item("A")).unwrap();
        index.insert(test_item("B")).unwrap();

        index.remove(id_a);
        let id_c = index.insert(test_item("C")).unwrap();

        // Freed slot is recycled
        assert_eq!(id_c.index(), id_a.index());
        assert_eq!(index.find("C"), Some(id_c));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_capacity_bound_rejects_new_titles() {
        let mut index = HashIndex::new();
        for i in 0..MAX_CATALOG_TITLES {
            index.insert(test_item(&format!("Title {}", i))).unwrap();
        }
        assert!(index.is_full());

        let err = index.insert(test_item("One Too Many")).unwrap_err();
        assert_eq!(
            err,
            CatalogError::CatalogFull {
                max: MAX_CATALOG_TITLES
            }
        );

        // Removal frees capacity again
        let id = index.find("Title 0").unwrap();
        index.remove(id);
        assert!(index.insert(test_item("One Too Many")).is_ok());
    }

    #[test]
    fn test_iter_sees_only_live_slots() {
        let mut index = HashIndex::new();
        index.insert(test_item("A")).unwrap();
        let id_b = index.insert(test_item("B")).unwrap();
        index.insert(test_item("C")).unwrap();
        index.remove(id_b);

        let mut titles: Vec<&str> = index.iter().map(|(_, item)| item.title.as_str()).collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
