//! Derived view state computed from the synced collection.

/// One-at-a-time edit interaction state machine.
pub mod edit;
/// Filtering and pagination over the mirrored collection.
pub mod page;
