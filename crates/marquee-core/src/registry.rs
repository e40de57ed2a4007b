//! # Patron Registry
//!
//! Owns patron records and answers name-pair lookups.
//!
//! Patrons live in a slot arena; `PatronId` is a slot handle. Lookup is a
//! linear scan over live slots keyed by the `(first_name, last_name)` pair -
//! uniqueness of the pair is enforced by a pre-insert existence check, not a
//! structural constraint. A patron can only be deregistered once every held
//! item has been returned.

use crate::error::CatalogError;
use crate::types::{ItemId, Patron, PatronId};
use crate::validation::{validate_contact_number, validate_name};

// =============================================================================
// Patron Registry
// =============================================================================

/// Linear-scan registry of patrons, owner of patron lifetime.
#[derive(Debug, Default)]
pub struct PatronRegistry {
    /// Patron arena; `PatronId` is an index into this vector.
    slots: Vec<Option<Patron>>,

    /// Recycled slot indices.
    free: Vec<usize>,

    /// Number of registered patrons.
    len: usize,
}

impl PatronRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered patrons.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no patrons are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Registers a new patron.
    ///
    /// ## Errors
    /// - [`CatalogError::Validation`] for an empty/overlong name, a bad
    ///   contact number, or a PIN that is not four digits
    /// - [`CatalogError::DuplicateRegistration`] when the name pair is taken
    pub fn register(
        &mut self,
        first_name: &str,
        last_name: &str,
        contact_number: &str,
        pin: &str,
    ) -> Result<PatronId, CatalogError> {
        validate_name("first name", first_name)?;
        validate_name("last name", last_name)?;
        validate_contact_number(contact_number)?;

        if self.find(first_name, last_name).is_some() {
            return Err(CatalogError::DuplicateRegistration {
                name: format!("{} {}", first_name, last_name),
            });
        }

        let patron = Patron::new(first_name, last_name, contact_number, pin)?;

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(patron);
                PatronId(slot)
            }
            None => {
                self.slots.push(Some(patron));
                PatronId(self.slots.len() - 1)
            }
        };

        self.len += 1;
        Ok(id)
    }

    /// Deregisters a patron by name pair.
    ///
    /// ## Errors
    /// - [`CatalogError::PatronNotFound`] when no such name pair exists
    /// - [`CatalogError::HasActiveLoans`] while any item is still held
    pub fn deregister(&mut self, first_name: &str, last_name: &str) -> Result<(), CatalogError> {
        let id = self
            .find(first_name, last_name)
            .ok_or_else(|| CatalogError::PatronNotFound {
                name: format!("{} {}", first_name, last_name),
            })?;

        let patron = self.get(id).expect("live handle from find");
        if !patron.held_items.is_empty() {
            return Err(CatalogError::HasActiveLoans {
                name: patron.full_name(),
                held: patron.held_items.len(),
            });
        }

        self.slots[id.0] = None;
        self.free.push(id.0);
        self.len -= 1;
        Ok(())
    }

    /// Looks up a patron by exact name pair.
    pub fn find(&self, first_name: &str, last_name: &str) -> Option<PatronId> {
        self.iter()
            .find(|(_, patron)| patron.matches_name(first_name, last_name))
            .map(|(id, _)| id)
    }

    /// Contact number for a name pair.
    ///
    /// ## Errors
    /// [`CatalogError::PatronNotFound`] when no such name pair exists.
    pub fn find_contact(&self, first_name: &str, last_name: &str) -> Result<&str, CatalogError> {
        let id = self
            .find(first_name, last_name)
            .ok_or_else(|| CatalogError::PatronNotFound {
                name: format!("{} {}", first_name, last_name),
            })?;
        Ok(self.get(id).expect("live handle from find").contact_number.as_str())
    }

    /// Returns the patron behind a handle, if the slot is live.
    #[inline]
    pub fn get(&self, id: PatronId) -> Option<&Patron> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Mutable access to the patron behind a handle.
    #[inline]
    pub fn get_mut(&mut self, id: PatronId) -> Option<&mut Patron> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Whether any registered patron currently holds this item.
    pub fn any_holds(&self, item: ItemId) -> bool {
        self.iter().any(|(_, patron)| patron.holds(item))
    }

    /// All patrons currently holding this item, in registration slot order.
    pub fn holders(&self, item: ItemId) -> impl Iterator<Item = (PatronId, &Patron)> {
        self.iter().filter(move |(_, patron)| patron.holds(item))
    }

    /// Iterates over all registered patrons with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (PatronId, &Patron)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|patron| (PatronId(i), patron)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_find() {
        let mut registry = PatronRegistry::new();
        let id = registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("Alice", "Nguyen"), Some(id));
        assert_eq!(registry.find("Bob", "Nguyen"), None);
        assert_eq!(registry.get(id).unwrap().full_name(), "Alice Nguyen");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = PatronRegistry::new();
        registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();

        let err = registry
            .register("Alice", "Nguyen", "0400999888", "9999")
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateRegistration {
                name: "Alice Nguyen".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_first_name_different_last_name_ok() {
        let mut registry = PatronRegistry::new();
        registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();
        assert!(registry
            .register("Alice", "Tran", "0400333444", "5678")
            .is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_validates_input() {
        let mut registry = PatronRegistry::new();
        assert!(registry.register("", "Nguyen", "0400111222", "1234").is_err());
        assert!(registry.register("Alice", "Nguyen", "", "1234").is_err());
        assert!(registry
            .register("Alice", "Nguyen", "0400111222", "12")
            .is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_deregister() {
        let mut registry = PatronRegistry::new();
        registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();

        registry.deregister("Alice", "Nguyen").unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.find("Alice", "Nguyen"), None);

        let err = registry.deregister("Alice", "Nguyen").unwrap_err();
        assert!(matches!(err, CatalogError::PatronNotFound { .. }));
    }

    #[test]
    fn test_deregister_blocked_by_active_loans() {
        let mut registry = PatronRegistry::new();
        let id = registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();
        registry.get_mut(id).unwrap().held_items.push(ItemId(0));

        let err = registry.deregister("Alice", "Nguyen").unwrap_err();
        assert_eq!(
            err,
            CatalogError::HasActiveLoans {
                name: "Alice Nguyen".to_string(),
                held: 1
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_find_contact() {
        let mut registry = PatronRegistry::new();
        registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();

        assert_eq!(registry.find_contact("Alice", "Nguyen").unwrap(), "0400111222");
        assert!(matches!(
            registry.find_contact("Bob", "Tran"),
            Err(CatalogError::PatronNotFound { .. })
        ));
    }

    #[test]
    fn test_holders_and_any_holds() {
        let mut registry = PatronRegistry::new();
        let alice = registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();
        let bob = registry
            .register("Bob", "Tran", "0400333444", "5678")
            .unwrap();

        let item = ItemId(3);
        registry.get_mut(alice).unwrap().held_items.push(item);

        assert!(registry.any_holds(item));
        assert!(!registry.any_holds(ItemId(4)));

        let holder_ids: Vec<PatronId> = registry.holders(item).map(|(id, _)| id).collect();
        assert_eq!(holder_ids, vec![alice]);
        assert!(!holder_ids.contains(&bob));
    }

    #[test]
    fn test_slot_reuse_after_deregister() {
        let mut registry = PatronRegistry::new();
        let alice = registry
            .register("Alice", "Nguyen", "0400111222", "1234")
            .unwrap();
        registry
            .register("Bob", "Tran", "0400333444", "5678")
            .unwrap();

        registry.deregister("Alice", "Nguyen").unwrap();
        let carol = registry
            .register("Carol", "Lee", "0400555666", "4321")
            .unwrap();

        assert_eq!(carol.index(), alice.index());
        assert_eq!(registry.len(), 2);
    }
}
