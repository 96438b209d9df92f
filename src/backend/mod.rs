//! Storage backend abstraction and local implementations.

/// Hashbrown-backed in-memory backend.
pub mod memory;
/// SQLite-backed document store.
pub mod sqlite;

use tokio::sync::mpsc;

use crate::{
    book::{Book, BookFields},
    types::{BookId, UserId},
};

/// Failures surfaced by a storage backend.
#[derive(Debug)]
pub enum BackendError {
    /// Credential string could not be exchanged for a session.
    BadCredential,
    /// Target document does not exist.
    MissingDocument(BookId),
    /// SQLite failure.
    Sqlite(rusqlite::Error),
    /// Document payload encode/decode failure.
    Serde(serde_json::Error),
    /// Any other backend failure.
    Message(String),
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Pushed by a backend after every committed write.
///
/// Stands in for the remote database's live query: a subscribed runtime
/// re-fetches the owner's collection when a notice for that owner arrives
/// and ignores everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    /// Owner whose collection changed.
    pub owner: UserId,
}

/// Narrow contract the document database is reached through.
///
/// Implementations are local stand-ins for the remote service; the runtime
/// owns one exclusively and is its only caller.
pub trait StorageBackend: Send {
    /// Exchanges a credential string for a scoped session, returning the
    /// user identifier both systems agree on.
    fn exchange_token(&mut self, token: &str) -> BackendResult<UserId>;

    /// Revokes the active session, if any.
    fn revoke_session(&mut self) -> BackendResult<()>;

    /// Inserts a document scoped to `owner`, returning the assigned id.
    fn insert(
        &mut self,
        owner: &UserId,
        fields: &BookFields,
        created_at_ms: u64,
    ) -> BackendResult<BookId>;

    /// Overwrites the editable fields of the document at `id`.
    fn overwrite(&mut self, id: &BookId, fields: &BookFields) -> BackendResult<()>;

    /// Deletes the document at `id`. Deleting an absent id succeeds.
    fn delete(&mut self, id: &BookId) -> BackendResult<()>;

    /// Full materialized result set for one owner, in insertion order.
    fn fetch_owned(&mut self, owner: &UserId) -> BackendResult<Vec<Book>>;

    /// Registers the channel change notices are pushed onto.
    fn attach_notifier(&mut self, _tx: mpsc::UnboundedSender<ChangeNotice>) {}
}

/// Extracts the user identifier from a local-backend credential.
///
/// Local backends accept tokens of the form `"<user id>:<nonce>"`; anything
/// without a non-empty id part is rejected.
pub(crate) fn owner_from_token(token: &str) -> BackendResult<UserId> {
    let id = token.split(':').next().unwrap_or_default();
    if id.is_empty() {
        return Err(BackendError::BadCredential);
    }
    Ok(id.to_string())
}
