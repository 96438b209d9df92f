//! SQLite-backed document store.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tokio::sync::mpsc;

use crate::{
    book::{Book, BookFields},
    types::{BookId, UserId},
};

use super::{BackendError, BackendResult, ChangeNotice, StorageBackend, owner_from_token};

/// SQLite implementation of [`StorageBackend`].
///
/// Documents are JSON payload rows scoped by an owner column, ordered by
/// insertion sequence. Opens in WAL mode with `synchronous=NORMAL`.
pub struct SqliteBackend {
    conn: Connection,
    session: Option<UserId>,
    notifier: Option<mpsc::UnboundedSender<ChangeNotice>>,
}

impl SqliteBackend {
    /// Opens or creates a document store at `path`.
    pub fn open(path: impl AsRef<Path>) -> BackendResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory document store.
    pub fn open_in_memory() -> BackendResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> BackendResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self {
            conn,
            session: None,
            notifier: None,
        })
    }

    /// Owner of the active session, if any.
    pub fn session(&self) -> Option<&UserId> {
        self.session.as_ref()
    }

    fn owner_of(&self, id: &BookId) -> BackendResult<Option<UserId>> {
        let owner: Option<String> = self
            .conn
            .query_row("SELECT owner FROM books WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(owner)
    }

    fn notify(&self, owner: &UserId) {
        if let Some(tx) = &self.notifier {
            let _ = tx.send(ChangeNotice {
                owner: owner.clone(),
            });
        }
    }
}

impl StorageBackend for SqliteBackend {
    fn exchange_token(&mut self, token: &str) -> BackendResult<UserId> {
        let owner = owner_from_token(token)?;
        self.session = Some(owner.clone());
        Ok(owner)
    }

    fn revoke_session(&mut self) -> BackendResult<()> {
        self.session = None;
        Ok(())
    }

    fn insert(
        &mut self,
        owner: &UserId,
        fields: &BookFields,
        created_at_ms: u64,
    ) -> BackendResult<BookId> {
        let next: i64 = self
            .conn
            .query_row("SELECT COALESCE(MAX(seq), 0) + 1 FROM books", [], |row| {
                row.get(0)
            })?;
        let id = format!("b{next:06}");
        let payload = serde_json::to_string(fields)?;
        self.conn.execute(
            "INSERT INTO books(id, owner, created_at, payload) VALUES (?1, ?2, ?3, ?4)",
            params![id, owner, created_at_ms as i64, payload],
        )?;
        self.notify(owner);
        Ok(id)
    }

    fn overwrite(&mut self, id: &BookId, fields: &BookFields) -> BackendResult<()> {
        let payload = serde_json::to_string(fields)?;
        let changed = self.conn.execute(
            "UPDATE books SET payload = ?2 WHERE id = ?1",
            params![id, payload],
        )?;
        if changed == 0 {
            return Err(BackendError::MissingDocument(id.clone()));
        }
        if let Some(owner) = self.owner_of(id)? {
            self.notify(&owner);
        }
        Ok(())
    }

    fn delete(&mut self, id: &BookId) -> BackendResult<()> {
        // Owner read must precede the delete for the notice to carry it.
        let owner = self.owner_of(id)?;
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        if changed > 0
            && let Some(owner) = owner
        {
            self.notify(&owner);
        }
        Ok(())
    }

    fn fetch_owned(&mut self, owner: &UserId) -> BackendResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, payload FROM books WHERE owner = ?1 ORDER BY seq ASC")?;

        let rows = stmt.query_map(params![owner], |row| {
            let id: String = row.get(0)?;
            let payload: String = row.get(1)?;
            Ok((id, payload))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, payload) = row?;
            let fields: BookFields = serde_json::from_str(&payload)?;
            out.push(Book::from_fields(id, fields));
        }
        Ok(out)
    }

    fn attach_notifier(&mut self, tx: mpsc::UnboundedSender<ChangeNotice>) {
        self.notifier = Some(tx);
    }
}
