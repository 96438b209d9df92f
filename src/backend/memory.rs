//! In-memory backend for tests and examples.

use hashbrown::HashMap;
use tokio::sync::mpsc;

use crate::{
    book::{Book, BookFields},
    types::{BookId, UserId},
};

use super::{BackendError, BackendResult, ChangeNotice, StorageBackend, owner_from_token};

#[derive(Debug, Clone)]
struct StoredDoc {
    owner: UserId,
    #[allow(dead_code)]
    created_at_ms: u64,
    fields: BookFields,
}

/// Hashbrown-backed [`StorageBackend`] with insertion-order results.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    docs: HashMap<BookId, StoredDoc>,
    order: Vec<BookId>,
    session: Option<UserId>,
    next_id: u64,
    notifier: Option<mpsc::UnboundedSender<ChangeNotice>>,
}

impl MemoryBackend {
    /// Creates an empty backend with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Owner of the active session, if any.
    pub fn session(&self) -> Option<&UserId> {
        self.session.as_ref()
    }

    /// Total documents across all owners.
    pub fn doc_count(&self) -> usize {
        self.order.len()
    }

    fn notify(&self, owner: &UserId) {
        if let Some(tx) = &self.notifier {
            let _ = tx.send(ChangeNotice {
                owner: owner.clone(),
            });
        }
    }
}

impl StorageBackend for MemoryBackend {
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
        self.next_id += 1;
        let id = format!("b{:06}", self.next_id);
        self.docs.insert(
            id.clone(),
            StoredDoc {
                owner: owner.clone(),
                created_at_ms,
                fields: fields.clone(),
            },
        );
        self.order.push(id.clone());
        self.notify(owner);
        Ok(id)
    }

    fn overwrite(&mut self, id: &BookId, fields: &BookFields) -> BackendResult<()> {
        let doc = self
            .docs
            .get_mut(id)
            .ok_or_else(|| BackendError::MissingDocument(id.clone()))?;
        doc.fields = fields.clone();
        let owner = doc.owner.clone();
        self.notify(&owner);
        Ok(())
    }

    fn delete(&mut self, id: &BookId) -> BackendResult<()> {
        let Some(doc) = self.docs.remove(id) else {
            return Ok(());
        };
        if let Some(pos) = self.order.iter().position(|x| x == id) {
            self.order.remove(pos);
        }
        self.notify(&doc.owner);
        Ok(())
    }

    fn fetch_owned(&mut self, owner: &UserId) -> BackendResult<Vec<Book>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| {
                let doc = self.docs.get(id)?;
                (doc.owner == *owner).then(|| Book::from_fields(id.clone(), doc.fields.clone()))
            })
            .collect())
    }

    fn attach_notifier(&mut self, tx: mpsc::UnboundedSender<ChangeNotice>) {
        self.notifier = Some(tx);
    }
}
