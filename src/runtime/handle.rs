//! Single-writer runtime owning the backend and the local mirror.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use crate::{
    backend::{ChangeNotice, StorageBackend},
    book::{Book, BookDraft, DraftError},
    core::shelf::Shelf,
    types::{BookId, UserId},
};

use super::events::{RejectReason, ShelfEvent};

/// Failures a handle call can surface to its caller.
///
/// Backend and validation failures never appear here; per the degrade-to-
/// no-op policy they are logged inside the loop and observable only as the
/// absence of a state change.
#[derive(Debug)]
pub enum RuntimeError {
    /// The runtime task is gone.
    ChannelClosed,
}

/// Tuning knobs for the runtime loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the command queue.
    pub command_queue_bound: usize,
    /// Capacity of the broadcast event stream.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            events_capacity: 1024,
        }
    }
}

/// Cloneable handle to a spawned booklog runtime.
pub struct BookLogHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<ShelfEvent>,
}

impl Clone for BookLogHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    SignIn {
        token: String,
        resp: oneshot::Sender<Option<UserId>>,
    },
    SignOut {
        resp: oneshot::Sender<()>,
    },
    Add {
        draft: BookDraft,
        resp: oneshot::Sender<()>,
    },
    Edit {
        book: Book,
        resp: oneshot::Sender<()>,
    },
    Delete {
        id: BookId,
        resp: oneshot::Sender<()>,
    },
    Get {
        id: BookId,
        resp: oneshot::Sender<Option<Book>>,
    },
    List {
        resp: oneshot::Sender<Vec<Book>>,
    },
    Owner {
        resp: oneshot::Sender<Option<UserId>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the single-writer loop around `backend`.
///
/// The loop is the backend's only caller and the only writer of the local
/// mirror; everything else goes through the returned handle. Change notices
/// from the backend are multiplexed into the same loop, so command handling
/// and re-sync never interleave.
pub fn spawn_booklog(mut backend: Box<dyn StorageBackend>, config: RuntimeConfig) -> BookLogHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<ShelfEvent>(config.events_capacity);

    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel::<ChangeNotice>();
    backend.attach_notifier(notice_tx);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut shelf = Shelf::new();

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    if handle_command(cmd, &mut shelf, backend.as_mut(), &events_tx_loop) {
                        break;
                    }
                }
                notice = notice_rx.recv() => {
                    let Some(notice) = notice else { break; };
                    handle_notice(notice, &mut shelf, backend.as_mut(), &events_tx_loop);
                }
            }
        }
    });

    BookLogHandle { cmd_tx, events_tx }
}

impl BookLogHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ShelfEvent> {
        self.events_tx.subscribe()
    }

    /// Exchanges a credential for a storage session.
    ///
    /// Returns the agreed owner id, or `None` when bridging failed and the
    /// runtime stays unauthenticated.
    pub async fn sign_in(&self, token: impl Into<String>) -> Result<Option<UserId>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SignIn {
                token: token.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Revokes the storage session and clears the mirror.
    pub async fn sign_out(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SignOut { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Creates a record scoped to the current owner.
    ///
    /// Resolves once the write was attempted; the record becomes visible
    /// through the next sync event, never as a return value.
    pub async fn add(&self, draft: BookDraft) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Add { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Overwrites the editable fields of `book` at its identifier.
    pub async fn edit(&self, book: Book) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Edit { book, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Deletes the record at `id`.
    pub async fn delete(&self, id: impl Into<BookId>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Delete {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Looks up one mirrored record.
    pub async fn get(&self, id: impl Into<BookId>) -> Result<Option<Book>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Get {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Full mirrored collection in backend order.
    pub async fn list(&self) -> Result<Vec<Book>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::List { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Owner of the active storage session, if any.
    pub async fn owner(&self) -> Result<Option<UserId>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Owner { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the runtime loop.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    shelf: &mut Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) -> bool {
    match cmd {
        Command::SignIn { token, resp } => {
            let _ = resp.send(sign_in(&token, shelf, backend, events_tx));
        }
        Command::SignOut { resp } => {
            sign_out(shelf, backend, events_tx);
            let _ = resp.send(());
        }
        Command::Add { draft, resp } => {
            add_book(draft, shelf, backend, events_tx);
            let _ = resp.send(());
        }
        Command::Edit { book, resp } => {
            edit_book(book, shelf, backend, events_tx);
            let _ = resp.send(());
        }
        Command::Delete { id, resp } => {
            delete_book(id, shelf, backend, events_tx);
            let _ = resp.send(());
        }
        Command::Get { id, resp } => {
            let _ = resp.send(shelf.get_cloned(&id));
        }
        Command::List { resp } => {
            let _ = resp.send(shelf.snapshot());
        }
        Command::Owner { resp } => {
            let _ = resp.send(shelf.owner().cloned());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

fn sign_in(
    token: &str,
    shelf: &mut Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) -> Option<UserId> {
    let owner = match backend.exchange_token(token) {
        Ok(owner) => owner,
        Err(err) => {
            warn!(?err, "credential exchange failed; staying unauthenticated");
            sign_out(shelf, backend, events_tx);
            return None;
        }
    };

    // Re-bridging an already-active session is a no-op.
    if shelf.owner() == Some(&owner) {
        return Some(owner);
    }

    // Switching owners: the old subscription dies with the owner swap, and
    // the swap clears the mirror before anything for the new owner lands.
    shelf.set_owner(Some(owner.clone()));
    let _ = events_tx.send(ShelfEvent::SignedIn {
        owner: owner.clone(),
    });
    resync(shelf, backend, events_tx);
    Some(owner)
}

fn sign_out(
    shelf: &mut Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) {
    if let Err(err) = backend.revoke_session() {
        warn!(?err, "session revoke failed");
    }
    if shelf.owner().is_some() {
        shelf.set_owner(None);
        let _ = events_tx.send(ShelfEvent::SignedOut);
    }
}

fn add_book(
    draft: BookDraft,
    shelf: &Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) {
    let Some(owner) = shelf.owner().cloned() else {
        warn!("no authenticated owner; dropping add");
        let _ = events_tx.send(ShelfEvent::Rejected {
            reason: RejectReason::NoOwner,
        });
        return;
    };

    let fields = match draft.sanitized() {
        Ok(fields) => fields,
        Err(DraftError::EmptyTitle) => {
            warn!("empty title; dropping add");
            let _ = events_tx.send(ShelfEvent::Rejected {
                reason: RejectReason::EmptyTitle,
            });
            return;
        }
    };

    match backend.insert(&owner, &fields, now_ms()) {
        Ok(id) => {
            let _ = events_tx.send(ShelfEvent::Added { id });
        }
        Err(err) => warn!(?err, "add failed"),
    }
}

fn edit_book(
    book: Book,
    shelf: &Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) {
    if book.id.is_empty() {
        debug!("edit without id; dropping");
        let _ = events_tx.send(ShelfEvent::Rejected {
            reason: RejectReason::MissingId,
        });
        return;
    }
    if shelf.owner().is_none() {
        warn!("no authenticated owner; dropping edit");
        let _ = events_tx.send(ShelfEvent::Rejected {
            reason: RejectReason::NoOwner,
        });
        return;
    }

    let fields = book.fields().normalized();
    match backend.overwrite(&book.id, &fields) {
        Ok(()) => {
            let _ = events_tx.send(ShelfEvent::Edited { id: book.id });
        }
        Err(err) => warn!(id = %book.id, ?err, "edit failed"),
    }
}

fn delete_book(
    id: BookId,
    shelf: &Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) {
    if id.is_empty() {
        debug!("delete without id; dropping");
        let _ = events_tx.send(ShelfEvent::Rejected {
            reason: RejectReason::MissingId,
        });
        return;
    }
    if shelf.owner().is_none() {
        warn!("no authenticated owner; dropping delete");
        let _ = events_tx.send(ShelfEvent::Rejected {
            reason: RejectReason::NoOwner,
        });
        return;
    }

    match backend.delete(&id) {
        Ok(()) => {
            let _ = events_tx.send(ShelfEvent::Deleted { id });
        }
        Err(err) => warn!(%id, ?err, "delete failed"),
    }
}

fn handle_notice(
    notice: ChangeNotice,
    shelf: &mut Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) {
    // A notice for anyone but the active owner is stale or foreign; a late
    // event from a previous session must not repopulate the mirror.
    if shelf.owner() != Some(&notice.owner) {
        debug!(owner = %notice.owner, "ignoring notice for inactive owner");
        return;
    }
    resync(shelf, backend, events_tx);
}

fn resync(
    shelf: &mut Shelf,
    backend: &mut dyn StorageBackend,
    events_tx: &broadcast::Sender<ShelfEvent>,
) {
    let Some(owner) = shelf.owner().cloned() else {
        return;
    };

    match backend.fetch_owned(&owner) {
        Ok(books) => {
            shelf.replace_all(books);
            let _ = events_tx.send(ShelfEvent::Synced { count: shelf.len() });
        }
        Err(err) => {
            warn!(%owner, ?err, "collection fetch failed; falling back to empty");
            shelf.clear();
            let _ = events_tx.send(ShelfEvent::Synced { count: 0 });
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
