//! Shared identifier aliases and book enums.

use serde::{Deserialize, Serialize};

/// Opaque book identifier assigned by the storage backend.
///
/// Empty before the record has been persisted.
pub type BookId = String;
/// Authenticated user identifier used to scope all record access.
pub type UserId = String;

/// Reading status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    /// Not started yet.
    #[serde(rename = "wanttoread")]
    WantToRead,
    /// In progress.
    #[serde(rename = "currentlyreading")]
    CurrentlyReading,
    /// Done.
    #[serde(rename = "finished")]
    Finished,
}

impl ReadingStatus {
    /// All statuses in form order.
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::WantToRead,
        ReadingStatus::CurrentlyReading,
        ReadingStatus::Finished,
    ];

    /// Wire name used in documents and filter values.
    pub fn wire_name(self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "wanttoread",
            ReadingStatus::CurrentlyReading => "currentlyreading",
            ReadingStatus::Finished => "finished",
        }
    }

    /// Parses a wire name back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.wire_name() == s)
    }
}

/// Fixed genre set a book is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Fiction.
    Fiction,
    /// Non fiction.
    #[serde(rename = "Non Fiction")]
    NonFiction,
    /// Biography.
    Biography,
    /// Science.
    Science,
    /// History.
    History,
    /// Philosophy.
    Philosophy,
    /// Technology.
    Technology,
    /// Self help.
    #[serde(rename = "Self Help")]
    SelfHelp,
    /// Mystery.
    Mystery,
    /// Romance.
    Romance,
    /// Fantasy.
    Fantasy,
    /// Poetry.
    Poetry,
}

impl Category {
    /// All categories in form order.
    pub const ALL: [Category; 12] = [
        Category::Fiction,
        Category::NonFiction,
        Category::Biography,
        Category::Science,
        Category::History,
        Category::Philosophy,
        Category::Technology,
        Category::SelfHelp,
        Category::Mystery,
        Category::Romance,
        Category::Fantasy,
        Category::Poetry,
    ];

    /// Display and wire name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non Fiction",
            Category::Biography => "Biography",
            Category::Science => "Science",
            Category::History => "History",
            Category::Philosophy => "Philosophy",
            Category::Technology => "Technology",
            Category::SelfHelp => "Self Help",
            Category::Mystery => "Mystery",
            Category::Romance => "Romance",
            Category::Fantasy => "Fantasy",
            Category::Poetry => "Poetry",
        }
    }

    /// Parses a display name back into a category.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == s)
    }
}
