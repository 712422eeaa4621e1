//! Persisted domain model.
//!
//! # Responsibility
//! - Define the item record owned by the list pane.
//!
//! # Invariants
//! - Every item is identified by a stable, non-nil `ItemId`.
//! - Deletion removes the row; there are no tombstones.

pub mod item;
