//! Decorative blob background of the detail pane.
//!
//! # Responsibility
//! - Model blob offset/color state and the tracker that owns it.
//! - Sample the route curve used by the path variant.
//! - Drive both motion loops from one caller-supplied clock.
//!
//! # Invariants
//! - All state is transient; nothing here is persisted.
//! - Randomness is injected, so seeded runs are reproducible.

pub mod blob;
pub mod config;
pub mod easing;
pub mod palette;
pub mod path;
pub mod scene;
pub mod tracker;
