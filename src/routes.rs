//! Logical routing destinations and the session guard.

use crate::types::BookId;

/// The five destinations the client renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page, always reachable.
    Home,
    /// The signed-in user's collection.
    MyList,
    /// Record creation form.
    AddRecord,
    /// Detail page for one record.
    RecordDetail(BookId),
    /// Catch-all for unknown paths.
    NotFound,
}

impl Route {
    /// True for destinations that mutate records.
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::MyList | Route::AddRecord | Route::RecordDetail(_)
        )
    }
}

/// Resolves a path to a destination, applying the session guard.
///
/// Record-mutating destinations redirect to [`Route::Home`] without an
/// active session. Sign-in and sign-up paths are handled by the provider's
/// own widgets and land on home here.
pub fn resolve(path: &str, signed_in: bool) -> Route {
    let trimmed = path.trim_end_matches('/');
    let route = match trimmed {
        "" | "/" => Route::Home,
        "/mybooks" => Route::MyList,
        "/addbook" => Route::AddRecord,
        _ => {
            if let Some(id) = trimmed.strip_prefix("/bookdetail/") {
                if id.is_empty() || id.contains('/') {
                    Route::NotFound
                } else {
                    Route::RecordDetail(id.to_string())
                }
            } else if trimmed.starts_with("/sign-in") || trimmed.starts_with("/sign-up") {
                Route::Home
            } else {
                Route::NotFound
            }
        }
    };

    if route.requires_session() && !signed_in {
        return Route::Home;
    }
    route
}
