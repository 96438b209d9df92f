//! Local mirror of the synced collection.

/// Owner-scoped mirror replaced wholesale on every sync.
pub mod shelf;
