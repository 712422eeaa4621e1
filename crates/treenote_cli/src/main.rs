//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `treenote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use std::time::Duration;
use treenote_core::db::open_db_in_memory;
use treenote_core::{BlobScene, ItemService, SceneConfig, SqliteItemRepository};

const PROBE_SEED: u64 = 1;
const PROBE_TICKS_MS: [u64; 4] = [0, 500, 1_000, 2_000];

fn main() {
    println!("treenote_core ping={}", treenote_core::ping());
    println!("treenote_core version={}", treenote_core::core_version());

    match probe_item_store() {
        Ok(count) => println!("item_store status=ok items={count}"),
        Err(err) => println!("item_store status=error error={err}"),
    }

    for config in [SceneConfig::jitter(), SceneConfig::path()] {
        probe_scene(config.with_seed(PROBE_SEED));
    }
}

fn probe_item_store() -> Result<usize, Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let service = ItemService::new(SqliteItemRepository::new(&conn));
    let first = service.add_item()?;
    service.add_item()?;
    service.delete_item(first.id)?;
    Ok(service.list_items()?.len())
}

fn probe_scene(config: SceneConfig) {
    let variant = config.variant;
    let mut scene = match BlobScene::new(config) {
        Ok(scene) => scene,
        Err(err) => {
            println!("scene variant={variant:?} status=error error={err}");
            return;
        }
    };

    for (index, at_ms) in PROBE_TICKS_MS.into_iter().enumerate() {
        let now = Duration::from_millis(at_ms);
        let frame = if index == 0 {
            scene.appear(now)
        } else {
            scene.tick(now)
        };
        let Some(frame) = frame else {
            break;
        };

        let blobs = frame
            .blobs
            .iter()
            .map(|blob| {
                format!(
                    "{}({:.2},{:.2})",
                    blob.color.name(),
                    blob.offset_x,
                    blob.offset_y
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "scene variant={variant:?} t_ms={at_ms} progress={:.3} blobs=[{blobs}]",
            frame.progress
        );
    }
    scene.disappear();
}
