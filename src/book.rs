//! Address book collection
//!
//! The form never owns the address book. It receives an `AddressCollection`
//! per call and hands finished entries to it.

use crate::address::AddressBookEntry;

pub trait AddressCollection {
    /// Take ownership of a finished entry.
    fn add_address(&mut self, entry: AddressBookEntry);

    /// Remove every entry for the given address id. Returns how many were removed.
    fn remove_address(&mut self, id: &str) -> usize;

    /// Entries in insertion order.
    fn addresses(&self) -> &[AddressBookEntry];

    fn len(&self) -> usize {
        self.addresses().len()
    }

    fn is_empty(&self) -> bool {
        self.addresses().is_empty()
    }
}

/// Ordered in-memory address book.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressBook {
    entries: Vec<AddressBookEntry>,
}

impl InMemoryAddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn contains(&self, entry: &AddressBookEntry) -> bool {
        self.entries.iter().any(|e| {
            e.id() == entry.id()
                && e.first_name == entry.first_name
                && e.last_name == entry.last_name
        })
    }
}

impl AddressCollection for InMemoryAddressBook {
    fn add_address(&mut self, entry: AddressBookEntry) {
        if self.contains(&entry) {
            tracing::debug!(id = entry.id(), "entry already in address book, ignoring");
            return;
        }
        tracing::info!(id = entry.id(), name = %entry.full_name(), "address added to book");
        self.entries.push(entry);
    }

    fn remove_address(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(id, removed, "address removed from book");
        }
        removed
    }

    fn addresses(&self) -> &[AddressBookEntry] {
        &self.entries
    }
}
