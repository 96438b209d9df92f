//! Edit interaction state machine.

use crate::{
    book::{Book, BookFields},
    types::BookId,
};

/// Tracks the one record a view may be editing at a time.
///
/// `Idle -> Editing(book) -> Saving(id) -> Idle`, with cancel returning to
/// `Idle` from `Editing`. Field changes inside the session run through
/// [`BookFields::normalize`], so the progress/status coupling already holds
/// in the working copy before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    /// No edit in flight.
    #[default]
    Idle,
    /// A working copy is open in the edit form.
    Editing(Book),
    /// The working copy was handed to the mutation gateway.
    Saving(BookId),
}

impl EditSession {
    /// Opens an edit session on a working copy of `book`.
    ///
    /// Replaces any session still in `Editing`; refused while a save is in
    /// flight.
    pub fn begin(&mut self, book: Book) -> bool {
        match self {
            EditSession::Saving(_) => false,
            _ => {
                *self = EditSession::Editing(book);
                true
            }
        }
    }

    /// Overwrites the working copy's editable fields.
    ///
    /// No-op outside `Editing`. Returns the normalized working copy when the
    /// change was applied.
    pub fn change(&mut self, fields: BookFields) -> Option<&Book> {
        match self {
            EditSession::Editing(book) => {
                *book = Book::from_fields(book.id.clone(), fields.normalized());
                Some(book)
            }
            _ => None,
        }
    }

    /// Closes the form and yields the record to persist.
    ///
    /// Transitions `Editing -> Saving`; returns `None` in any other state.
    pub fn save(&mut self) -> Option<Book> {
        match std::mem::take(self) {
            EditSession::Editing(book) => {
                *self = EditSession::Saving(book.id.clone());
                Some(book)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Abandons the working copy. No-op while saving.
    pub fn cancel(&mut self) {
        if let EditSession::Editing(_) = self {
            *self = EditSession::Idle;
        }
    }

    /// Acknowledges the save outcome, returning to `Idle`.
    ///
    /// Called whether the mutation succeeded or was dropped; failure is
    /// visible only as the absence of a change in the next sync.
    pub fn settle(&mut self) {
        if let EditSession::Saving(_) = self {
            *self = EditSession::Idle;
        }
    }

    /// Current working copy, if a form is open.
    pub fn editing(&self) -> Option<&Book> {
        match self {
            EditSession::Editing(book) => Some(book),
            _ => None,
        }
    }

    /// True when no edit is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, EditSession::Idle)
    }
}
