//! Core domain logic for TreeNote.
//! Owns the persisted item list and the detail pane's blob background.

pub mod db;
pub mod decor;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use decor::blob::{Blob, BlobId, ChangeObserver, Subject, Unobserved, OFFSET_LIMIT};
pub use decor::config::{SceneConfig, SceneConfigError, SceneVariant};
pub use decor::easing::Easing;
pub use decor::palette::{BlobColor, Palette};
pub use decor::path::{PathSampler, Point, QuadCurve};
pub use decor::scene::{
    BlobFrame, BlobScene, BlobShape, CancelToken, SceneFrame, SceneLayout, ScenePhase,
    BLOB_SHAPE, FOREGROUND_SHAPE, SCENE_LAYOUT,
};
pub use decor::tracker::{BlobTracker, BLOB_COUNT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{format_timestamp_label, Item, ItemId, ItemValidationError};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, SqliteItemRepository};
pub use service::item_service::{ItemService, ItemServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
