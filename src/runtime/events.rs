//! Runtime event stream payloads.

use crate::types::{BookId, UserId};

/// Why a mutation was dropped before reaching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Add with an empty or whitespace-only title.
    EmptyTitle,
    /// Mutation attempted with no authenticated owner.
    NoOwner,
    /// Edit or delete with an empty identifier.
    MissingId,
}

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShelfEvent {
    /// A storage session was established.
    SignedIn {
        /// Owner both systems agreed on.
        owner: UserId,
    },
    /// The storage session ended and local state was cleared.
    SignedOut,
    /// The local mirror was replaced with a fresh snapshot.
    Synced {
        /// Records in the snapshot.
        count: usize,
    },
    /// A new book was written to the backend.
    Added {
        /// Assigned book id.
        id: BookId,
    },
    /// An existing book was overwritten at the backend.
    Edited {
        /// Edited book id.
        id: BookId,
    },
    /// A book was deleted at the backend.
    Deleted {
        /// Deleted book id.
        id: BookId,
    },
    /// A mutation was dropped locally without a backend call.
    Rejected {
        /// Local validation failure.
        reason: RejectReason,
    },
}
