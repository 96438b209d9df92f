//! Book-tracking client core: owner-scoped live collection mirror, mutation
//! gateway, and derived view state over a pluggable document backend.
//!
//! # Examples
//!
//! Derived view state is pure and needs no runtime:
//! ```
//! use booklog::{
//!     book::Book,
//!     types::{Category, ReadingStatus},
//!     view::page::ViewState,
//! };
//!
//! let books: Vec<Book> = (0..25)
//!     .map(|i| Book {
//!         id: format!("b{i}"),
//!         title: format!("Book {i}"),
//!         author: "Unknown Author".to_string(),
//!         category: Category::Fiction,
//!         status: ReadingStatus::WantToRead,
//!         rating: 0,
//!         review: None,
//!         progress: 0,
//!     })
//!     .collect();
//!
//! let mut view = ViewState::default();
//! view.set_page(3);
//! let page = view.page_view(&books);
//! assert_eq!(page.items.len(), 5);
//! assert_eq!(page.page_count, 3);
//! ```
//!
//! Runtime usage with the in-memory backend:
//! ```
//! use booklog::{
//!     backend::memory::MemoryBackend,
//!     book::BookDraft,
//!     runtime::handle::{RuntimeConfig, spawn_booklog},
//!     types::{Category, ReadingStatus},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_booklog(Box::new(MemoryBackend::new()), RuntimeConfig::default());
//! let owner = handle.sign_in("alice:demo").await.expect("sign in");
//! assert_eq!(owner.as_deref(), Some("alice"));
//! handle
//!     .add(BookDraft {
//!         title: "Dune".to_string(),
//!         author: "Frank Herbert".to_string(),
//!         category: Category::Fiction,
//!         status: ReadingStatus::WantToRead,
//!         rating: 0,
//!         review: None,
//!         progress: 0,
//!     })
//!     .await
//!     .expect("add");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Storage backend seam and local implementations.
pub mod backend;
/// Book domain records and edit transition.
pub mod book;
/// Local mirror of the synced collection.
pub mod core;
/// Logical routing destinations and session guard.
pub mod routes;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Identity-provider seam and session bridge.
pub mod session;
/// Shared identifier aliases and enums.
pub mod types;
/// Derived view state: filters, pagination, edit session.
pub mod view;
