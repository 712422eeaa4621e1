//! Flutter-facing bindings for TreeNote core.

pub mod api;
