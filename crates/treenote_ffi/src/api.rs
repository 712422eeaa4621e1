//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose item list and blob background use-cases to Dart via FRB.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - At most one blob scene is alive per process; starting a new one
//!   tears down the previous one.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;
use treenote_core::db::open_db;
use treenote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BlobScene, BlobShape, Item, ItemService, SceneConfig, SceneFrame, SqliteItemRepository,
    SCENE_LAYOUT,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "treenote.sqlite3";
const DB_PATH_ENV: &str = "TREENOTE_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SCENE: Mutex<Option<BlobScene>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the item list pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub item_id: String,
    pub timestamp_ms: i64,
    /// Numeric date, standard time label.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListResponse {
    pub items: Vec<ItemEntry>,
    pub message: String,
}

/// Result envelope for add/delete actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActionResponse {
    pub ok: bool,
    /// Affected item IDs: the created one, or the deleted ones in list order.
    pub item_ids: Vec<String>,
    pub message: String,
}

impl ItemActionResponse {
    fn success(message: impl Into<String>, item_ids: Vec<String>) -> Self {
        Self {
            ok: true,
            item_ids,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_ids: Vec::new(),
            message: message.into(),
        }
    }
}

/// Adds an item stamped with the current time.
#[flutter_rust_bridge::frb(sync)]
pub fn item_add() -> ItemActionResponse {
    match with_item_service(|service| service.add_item().map_err(|err| err.to_string())) {
        Ok(item) => ItemActionResponse::success("Item added.", vec![item.id.to_string()]),
        Err(err) => ItemActionResponse::failure(format!("item_add failed: {err}")),
    }
}

/// Lists items in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn item_list() -> ItemListResponse {
    match with_item_service(|service| service.list_items().map_err(|err| err.to_string())) {
        Ok(items) => {
            let items = items.iter().map(to_item_entry).collect::<Vec<_>>();
            let message = format!("{} item(s).", items.len());
            ItemListResponse { items, message }
        }
        Err(err) => ItemListResponse {
            items: Vec::new(),
            message: format!("item_list failed: {err}"),
        },
    }
}

/// Deletes one item by stable ID.
#[flutter_rust_bridge::frb(sync)]
pub fn item_delete(item_id: String) -> ItemActionResponse {
    let Ok(id) = Uuid::parse_str(item_id.trim()) else {
        return ItemActionResponse::failure(format!(
            "item_delete failed: invalid item id `{}`",
            item_id.trim()
        ));
    };
    match with_item_service(|service| service.delete_item(id).map_err(|err| err.to_string())) {
        Ok(()) => ItemActionResponse::success("Item deleted.", vec![id.to_string()]),
        Err(err) => ItemActionResponse::failure(format!("item_delete failed: {err}")),
    }
}

/// Deletes the items shown at `offsets` (swipe/edit delete).
#[flutter_rust_bridge::frb(sync)]
pub fn item_delete_at(offsets: Vec<u32>) -> ItemActionResponse {
    let offsets = offsets
        .into_iter()
        .filter_map(|offset| usize::try_from(offset).ok())
        .collect::<Vec<_>>();
    match with_item_service(|service| {
        service
            .delete_items_at(&offsets)
            .map_err(|err| err.to_string())
    }) {
        Ok(ids) => ItemActionResponse::success(
            format!("Deleted {} item(s).", ids.len()),
            ids.iter().map(Uuid::to_string).collect(),
        ),
        Err(err) => ItemActionResponse::failure(format!("item_delete_at failed: {err}")),
    }
}

/// Rendered state of one blob.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobFrameDto {
    pub blob_id: String,
    pub color: String,
    pub color_hex: String,
    pub offset_x: f32,
    pub offset_y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrameDto {
    pub progress: f32,
    pub path_x: Option<f32>,
    pub path_y: Option<f32>,
    pub blobs: Vec<BlobFrameDto>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneResponse {
    pub ok: bool,
    /// `None` when the scene is not running.
    pub frame: Option<SceneFrameDto>,
    pub message: String,
}

/// Rounded-rectangle geometry for the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobShapeDto {
    pub corner_radius: f32,
    pub blur_radius: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl From<BlobShape> for BlobShapeDto {
    fn from(shape: BlobShape) -> Self {
        Self {
            corner_radius: shape.corner_radius,
            blur_radius: shape.blur_radius,
            max_width: shape.max_width,
            max_height: shape.max_height,
        }
    }
}

/// Fixed pane layout: blobs first, then the solid foreground card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneShapeDto {
    pub canvas_size: f32,
    pub blob: BlobShapeDto,
    pub foreground: BlobShapeDto,
}

#[flutter_rust_bridge::frb(sync)]
pub fn scene_shape() -> SceneShapeDto {
    SceneShapeDto {
        canvas_size: SCENE_LAYOUT.canvas_size,
        blob: SCENE_LAYOUT.blob.into(),
        foreground: SCENE_LAYOUT.foreground.into(),
    }
}

/// Starts the blob scene on view appearance.
///
/// Input semantics:
/// - `config_json`: `SceneConfig` JSON; empty means the jitter preset.
/// - `now_ms`: host monotonic clock in milliseconds.
#[flutter_rust_bridge::frb(sync)]
pub fn scene_start(config_json: String, now_ms: u64) -> SceneResponse {
    let config = match parse_scene_config(&config_json) {
        Ok(config) => config,
        Err(err) => return scene_failure(format!("scene_start failed: {err}")),
    };
    let mut scene = match BlobScene::new(config) {
        Ok(scene) => scene,
        Err(err) => return scene_failure(format!("scene_start failed: {err}")),
    };

    let frame = scene.appear(Duration::from_millis(now_ms));
    let mut slot = SCENE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(mut previous) = slot.replace(scene) {
        warn!("event=scene_replace module=ffi status=ok");
        previous.disappear();
    }
    scene_success("Scene started.", frame)
}

/// Advances the running scene to `now_ms` and returns its frame.
#[flutter_rust_bridge::frb(sync)]
pub fn scene_tick(now_ms: u64) -> SceneResponse {
    let mut slot = SCENE.lock().unwrap_or_else(PoisonError::into_inner);
    match slot.as_mut() {
        Some(scene) => match scene.tick(Duration::from_millis(now_ms)) {
            Some(frame) => scene_success("Scene running.", Some(frame)),
            None => scene_failure("Scene stopped."),
        },
        None => scene_failure("No scene running."),
    }
}

/// Tears the scene down on view disappearance.
///
/// Returns whether a scene was running.
#[flutter_rust_bridge::frb(sync)]
pub fn scene_stop() -> bool {
    let mut slot = SCENE.lock().unwrap_or_else(PoisonError::into_inner);
    match slot.take() {
        Some(mut scene) => {
            scene.disappear();
            true
        }
        None => false,
    }
}

fn parse_scene_config(raw: &str) -> Result<SceneConfig, String> {
    if raw.trim().is_empty() {
        return Ok(SceneConfig::jitter());
    }
    serde_json::from_str(raw).map_err(|err| format!("invalid scene config: {err}"))
}

fn scene_success(message: &str, frame: Option<SceneFrame>) -> SceneResponse {
    SceneResponse {
        ok: true,
        frame: frame.map(to_scene_frame_dto),
        message: message.to_string(),
    }
}

fn scene_failure(message: impl Into<String>) -> SceneResponse {
    SceneResponse {
        ok: false,
        frame: None,
        message: message.into(),
    }
}

fn to_scene_frame_dto(frame: SceneFrame) -> SceneFrameDto {
    SceneFrameDto {
        progress: frame.progress,
        path_x: frame.path_point.map(|point| point.x),
        path_y: frame.path_point.map(|point| point.y),
        blobs: frame
            .blobs
            .into_iter()
            .map(|blob| BlobFrameDto {
                blob_id: blob.id.to_string(),
                color: blob.color.name().to_string(),
                color_hex: blob.color_hex,
                offset_x: blob.offset_x,
                offset_y: blob.offset_y,
            })
            .collect(),
    }
}

fn to_item_entry(item: &Item) -> ItemEntry {
    ItemEntry {
        item_id: item.id.to_string(),
        timestamp_ms: item.timestamp,
        label: item.display_label(),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_item_service<T>(
    f: impl FnOnce(&ItemService<SqliteItemRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("item DB open failed: {err}"))?;
    let service = ItemService::new(SqliteItemRepository::new(&conn));
    f(&service)
}
