//! Owner-scoped local mirror of the remote book collection.

use hashbrown::HashMap;

use crate::{
    book::Book,
    types::{BookId, UserId},
};

/// The single in-memory collection mirrored from the backend.
///
/// Owned exclusively by the runtime loop. Sync events replace its contents
/// wholesale; nothing patches it incrementally, so it can never diverge from
/// the last snapshot the backend delivered. Order is the backend's result
/// order.
#[derive(Debug, Default)]
pub struct Shelf {
    owner: Option<UserId>,
    records: HashMap<BookId, Book>,
    order: Vec<BookId>,
}

impl Shelf {
    /// Creates an empty, unowned shelf.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner, if a session is active.
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    /// Switches the owner, clearing all mirrored records first.
    ///
    /// Clearing happens before any data for the new owner can arrive, so no
    /// record from a previous session is ever visible to the next one.
    pub fn set_owner(&mut self, owner: Option<UserId>) {
        self.records.clear();
        self.order.clear();
        self.owner = owner;
    }

    /// Replaces the mirrored collection with a fresh snapshot.
    pub fn replace_all(&mut self, books: Vec<Book>) {
        self.records.clear();
        self.order.clear();
        for book in books {
            self.order.push(book.id.clone());
            self.records.insert(book.id.clone(), book);
        }
    }

    /// Drops all mirrored records, keeping the owner.
    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    /// Looks up a mirrored record by id.
    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.records.get(id)
    }

    /// Cloning lookup for handing records across the channel boundary.
    pub fn get_cloned(&self, id: &BookId) -> Option<Book> {
        self.get(id).cloned()
    }

    /// Full mirrored collection in backend order.
    pub fn snapshot(&self) -> Vec<Book> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    /// Number of mirrored records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is mirrored.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
