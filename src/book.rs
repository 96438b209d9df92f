//! Book domain record, draft, and editable-field types.

use serde::{Deserialize, Serialize};

use crate::types::{BookId, Category, ReadingStatus};

/// Highest allowed rating.
pub const MAX_RATING: u8 = 5;
/// Progress value at which a book counts as finished.
pub const MAX_PROGRESS: u8 = 100;
/// Placeholder used when the author field is left blank.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// The editable surface of a book document.
///
/// This is exactly the field set an edit overwrites at the backend; owner id
/// and creation timestamp live outside it and are never editable. Absent
/// `rating` and `progress` values decode to `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    /// Display title.
    pub title: String,
    /// Display author.
    pub author: String,
    /// Genre bucket.
    pub category: Category,
    /// Reading status bucket.
    pub status: ReadingStatus,
    /// Star rating, 0-5. Meaningful when finished.
    #[serde(default)]
    pub rating: u8,
    /// Free-text review. Meaningful when finished.
    #[serde(default)]
    pub review: Option<String>,
    /// Reading progress, 0-100. Meaningful when currently reading.
    #[serde(default)]
    pub progress: u8,
}

impl BookFields {
    /// Applies the edit transition in place.
    ///
    /// Clamps `rating` and `progress` into range, and forces
    /// `status = Finished` once progress reaches 100. Every mutation path
    /// that persists an edit goes through here, so the progress/status
    /// coupling holds no matter where the edit originated.
    pub fn normalize(&mut self) {
        self.rating = self.rating.min(MAX_RATING);
        self.progress = self.progress.min(MAX_PROGRESS);
        if self.progress == MAX_PROGRESS {
            self.status = ReadingStatus::Finished;
        }
    }

    /// Returns a normalized copy.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.normalize();
        out
    }
}

/// Fully materialized book record as mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable backend-assigned identifier.
    pub id: BookId,
    /// Display title.
    pub title: String,
    /// Display author.
    pub author: String,
    /// Genre bucket.
    pub category: Category,
    /// Reading status bucket.
    pub status: ReadingStatus,
    /// Star rating, 0-5.
    #[serde(default)]
    pub rating: u8,
    /// Free-text review.
    #[serde(default)]
    pub review: Option<String>,
    /// Reading progress, 0-100.
    #[serde(default)]
    pub progress: u8,
}

impl Book {
    /// Reassembles a record from an identifier plus its editable fields.
    pub fn from_fields(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            category: fields.category,
            status: fields.status,
            rating: fields.rating,
            review: fields.review,
            progress: fields.progress,
        }
    }

    /// Extracts the editable field set.
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            category: self.category,
            status: self.status,
            rating: self.rating,
            review: self.review.clone(),
            progress: self.progress,
        }
    }
}

/// Local validation failures for a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Title was empty after trimming.
    EmptyTitle,
}

/// Insert payload used to create a new [`Book`].
///
/// Carries no identifier; the backend assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    /// Display title. Must be non-empty after trimming.
    pub title: String,
    /// Display author. Blank falls back to [`UNKNOWN_AUTHOR`].
    pub author: String,
    /// Genre bucket.
    pub category: Category,
    /// Reading status bucket.
    pub status: ReadingStatus,
    /// Star rating, 0-5.
    pub rating: u8,
    /// Free-text review.
    pub review: Option<String>,
    /// Reading progress, 0-100.
    pub progress: u8,
}

impl BookDraft {
    /// Validates the draft and produces the field set to persist.
    ///
    /// Rejects an empty or whitespace-only title, substitutes
    /// [`UNKNOWN_AUTHOR`] for a blank author, and clamps the numeric fields.
    /// Unlike edits, creating a book does not trigger the finished
    /// transition; the draft's status stands as entered.
    pub fn sanitized(&self) -> Result<BookFields, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        let author = self.author.trim();
        Ok(BookFields {
            title: title.to_string(),
            author: if author.is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                author.to_string()
            },
            category: self.category,
            status: self.status,
            rating: self.rating.min(MAX_RATING),
            review: self.review.clone(),
            progress: self.progress.min(MAX_PROGRESS),
        })
    }
}
