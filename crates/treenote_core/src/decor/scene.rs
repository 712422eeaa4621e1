//! Single-clock driver for the detail pane's blob background.
//!
//! # Responsibility
//! - Own one `BlobTracker` per view appearance.
//! - Derive loop progress and fire periodic jitter from the same clock.
//! - Produce per-frame render state for the host UI.
//!
//! # Invariants
//! - Nothing mutates the tracker outside `appear` and `tick`.
//! - After cancellation or `disappear`, ticks yield no frames.
//! - Clock values are host-monotonic; a tick earlier than the last one is
//!   treated as no time passing.

use crate::decor::blob::{BlobId, ChangeObserver, Subject};
use crate::decor::config::{SceneConfig, SceneConfigError, SceneVariant};
use crate::decor::easing::{Easing, OffsetTransition};
use crate::decor::palette::BlobColor;
use crate::decor::path::{PathSampler, Point};
use crate::decor::tracker::BlobTracker;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Side length of the square canvas hosting the blobs.
pub const CANVAS_SIZE: f32 = 300.0;

/// Fixed geometry of every rendered blob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlobShape {
    pub corner_radius: f32,
    pub blur_radius: f32,
    pub max_width: f32,
    pub max_height: f32,
}

pub const BLOB_SHAPE: BlobShape = BlobShape {
    corner_radius: 10.0,
    blur_radius: 4.0,
    max_width: 50.0,
    max_height: 100.0,
};

/// Solid card drawn centered in front of the blobs, never blurred or moved.
pub const FOREGROUND_SHAPE: BlobShape = BlobShape {
    corner_radius: 10.0,
    blur_radius: 0.0,
    max_width: 50.0,
    max_height: 100.0,
};

/// Everything the host needs to lay out the pane besides per-frame state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneLayout {
    pub canvas_size: f32,
    /// Geometry of each moving blob, drawn first.
    pub blob: BlobShape,
    /// Geometry of the static card, drawn last.
    pub foreground: BlobShape,
}

pub const SCENE_LAYOUT: SceneLayout = SceneLayout {
    canvas_size: CANVAS_SIZE,
    blob: BLOB_SHAPE,
    foreground: FOREGROUND_SHAPE,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlobFrame {
    pub id: BlobId,
    pub color: BlobColor,
    pub color_hex: String,
    pub offset_x: f32,
    pub offset_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    /// Eased loop progress in `[0, 1]`.
    pub progress: f32,
    /// Route position; `None` in the jitter variant.
    pub path_point: Option<Point>,
    pub blobs: Vec<BlobFrame>,
}

/// Shared flag that stops a running scene on its next tick.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug)]
struct Running {
    tracker: BlobTracker,
    transitions: Vec<OffsetTransition>,
    appeared_at: Duration,
    next_jitter_at: Duration,
    last_tick: Duration,
}

#[derive(Debug, Default)]
struct NotificationCount {
    trackers: usize,
    blobs: usize,
}

impl ChangeObserver for NotificationCount {
    fn will_change(&mut self, subject: Subject<'_>) {
        match subject {
            Subject::Tracker(_) => self.trackers += 1,
            Subject::Blob(_) => self.blobs += 1,
        }
    }
}

/// Blob background state machine: `Idle -> Running -> Stopped`.
#[derive(Debug)]
pub struct BlobScene {
    config: SceneConfig,
    rng: StdRng,
    sampler: PathSampler,
    token: CancelToken,
    running: Option<Running>,
    phase: ScenePhase,
    jitter_steps: u64,
}

impl BlobScene {
    /// Creates an idle scene.
    ///
    /// # Errors
    /// - Returns `SceneConfigError` when `config.validate()` fails.
    pub fn new(config: SceneConfig) -> Result<Self, SceneConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            rng,
            sampler: PathSampler::default(),
            token: CancelToken::default(),
            running: None,
            phase: ScenePhase::Idle,
            jitter_steps: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// Number of jitter steps applied since the scene appeared.
    pub fn jitter_steps(&self) -> u64 {
        self.jitter_steps
    }

    pub fn tracker(&self) -> Option<&BlobTracker> {
        self.running.as_ref().map(|running| &running.tracker)
    }

    /// Token that stops this scene from any thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Starts the scene at clock time `now` and returns its first frame.
    ///
    /// Builds a fresh tracker and immediately jitters it, as the view does on
    /// appearance. Returns `None` if the scene was already stopped; calling
    /// this on a running scene just renders the current frame.
    pub fn appear(&mut self, now: Duration) -> Option<SceneFrame> {
        match self.phase {
            ScenePhase::Stopped => return None,
            ScenePhase::Running => return self.frame_at(now),
            ScenePhase::Idle => {}
        }
        if self.token.is_cancelled() {
            self.stop("cancelled");
            return None;
        }

        let tracker = BlobTracker::new(&self.config.palette, &mut self.rng);
        let transitions = tracker
            .blobs()
            .iter()
            .map(|blob| resting_transition((blob.offset_x(), blob.offset_y()), now))
            .collect();
        self.running = Some(Running {
            tracker,
            transitions,
            appeared_at: now,
            next_jitter_at: now + self.config.jitter_period(),
            last_tick: now,
        });
        self.phase = ScenePhase::Running;
        info!(
            "event=scene_appear module=decor status=ok variant={:?} seeded={}",
            self.config.variant,
            self.config.seed.is_some()
        );

        self.jitter(now);
        self.frame_at(now)
    }

    /// Advances the clock to `now`, applying due jitter, and renders.
    ///
    /// When several jitter periods elapsed since the previous tick only one
    /// step is applied, at the latest due instant.
    pub fn tick(&mut self, now: Duration) -> Option<SceneFrame> {
        if self.phase != ScenePhase::Running {
            return None;
        }
        if self.token.is_cancelled() {
            self.stop("cancelled");
            return None;
        }

        let period = self.config.jitter_period();
        let due_at = {
            let running = self.running.as_mut()?;
            let now = now.max(running.last_tick);
            running.last_tick = now;
            if now < running.next_jitter_at {
                None
            } else {
                let missed = (now - running.next_jitter_at).as_nanos() / period.as_nanos();
                let due_at = running.next_jitter_at + period * saturating_u32(missed);
                running.next_jitter_at = due_at + period;
                Some(due_at)
            }
        };
        if let Some(due_at) = due_at {
            self.jitter(due_at);
        }

        let now = self.running.as_ref()?.last_tick;
        self.frame_at(now)
    }

    /// Tears the scene down; later ticks yield nothing.
    pub fn disappear(&mut self) {
        self.token.cancel();
        if self.phase != ScenePhase::Stopped {
            self.stop("disappeared");
        }
    }

    fn stop(&mut self, reason: &str) {
        self.running = None;
        self.phase = ScenePhase::Stopped;
        info!(
            "event=scene_disappear module=decor status=ok reason={reason} jitter_steps={}",
            self.jitter_steps
        );
    }

    fn jitter(&mut self, at: Duration) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let displayed = running
            .transitions
            .iter()
            .map(|transition| transition.value_at(at))
            .collect::<Vec<_>>();

        let mut notifications = NotificationCount::default();
        running
            .tracker
            .randomize_positions(&mut self.rng, &mut notifications);

        let duration = self.config.jitter_transition();
        running.transitions = running
            .tracker
            .blobs()
            .iter()
            .zip(displayed)
            .map(|(blob, from)| OffsetTransition {
                from,
                to: (blob.offset_x(), blob.offset_y()),
                started_at: at,
                duration,
                easing: Easing::EaseInOut,
            })
            .collect();
        self.jitter_steps += 1;

        debug!(
            "event=scene_jitter module=decor status=ok step={} at_ms={} tracker_notifications={} blob_notifications={}",
            self.jitter_steps,
            at.as_millis(),
            notifications.trackers,
            notifications.blobs
        );
    }

    fn frame_at(&self, now: Duration) -> Option<SceneFrame> {
        let running = self.running.as_ref()?;
        let progress = self.progress_at(now.saturating_sub(running.appeared_at));
        let path_point = match self.config.variant {
            SceneVariant::Jitter => None,
            SceneVariant::Path => Some(self.sampler.point_at_progress(progress)),
        };
        let anchor = path_point.unwrap_or_default();

        let blobs = running
            .tracker
            .blobs()
            .iter()
            .zip(&running.transitions)
            .map(|(blob, transition)| {
                let (offset_x, offset_y) = transition.value_at(now);
                BlobFrame {
                    id: blob.id(),
                    color: blob.color(),
                    color_hex: blob.color().hex(),
                    offset_x: anchor.x + offset_x,
                    offset_y: anchor.y + offset_y,
                }
            })
            .collect();

        Some(SceneFrame {
            progress,
            path_point,
            blobs,
        })
    }

    /// Eased loop progress after `elapsed` time in the running state.
    fn progress_at(&self, elapsed: Duration) -> f32 {
        let cycles = elapsed.as_secs_f64() / self.config.progress_duration().as_secs_f64();
        let linear = if self.config.autoreverse {
            let phase = cycles % 2.0;
            if phase <= 1.0 {
                phase
            } else {
                2.0 - phase
            }
        } else if cycles > 0.0 && cycles.fract() == 0.0 {
            1.0
        } else {
            cycles.fract()
        };
        self.config.progress_easing.apply(linear as f32)
    }
}

fn resting_transition(offset: (f32, f32), at: Duration) -> OffsetTransition {
    OffsetTransition {
        from: offset,
        to: offset,
        started_at: at,
        duration: Duration::ZERO,
        easing: Easing::EaseInOut,
    }
}

fn saturating_u32(value: u128) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{BlobScene, ScenePhase, BLOB_SHAPE, SCENE_LAYOUT};
    use crate::decor::config::SceneConfig;
    use crate::decor::easing::Easing;
    use std::time::Duration;

    #[test]
    fn progress_autoreverses_each_leg() {
        let scene = BlobScene::new(SceneConfig::jitter().with_seed(1)).unwrap();
        assert_eq!(scene.progress_at(Duration::ZERO), 0.0);
        assert_eq!(scene.progress_at(Duration::from_millis(1_000)), 1.0);
        assert_eq!(scene.progress_at(Duration::from_millis(2_000)), 0.0);
        assert!((scene.progress_at(Duration::from_millis(1_500)) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn progress_without_autoreverse_restarts() {
        let config = SceneConfig {
            autoreverse: false,
            ..SceneConfig::jitter().with_seed(1)
        };
        let scene = BlobScene::new(config).unwrap();
        assert_eq!(scene.progress_at(Duration::from_millis(1_000)), 1.0);
        assert!(scene.progress_at(Duration::from_millis(1_100)) < 0.1);
    }

    #[test]
    fn linear_progress_tracks_elapsed_time() {
        let config = SceneConfig {
            progress_easing: Easing::Linear,
            ..SceneConfig::path().with_seed(1)
        };
        let scene = BlobScene::new(config).unwrap();
        assert_eq!(scene.progress_at(Duration::from_millis(1_000)), 0.25);
        assert_eq!(scene.progress_at(Duration::from_millis(6_000)), 0.5);
    }

    #[test]
    fn foreground_card_is_solid_and_drawn_over_blobs() {
        let foreground = SCENE_LAYOUT.foreground;
        assert_eq!(foreground.blur_radius, 0.0);
        assert_eq!(foreground.corner_radius, 10.0);
        assert_eq!(
            (foreground.max_width, foreground.max_height),
            (BLOB_SHAPE.max_width, BLOB_SHAPE.max_height)
        );
        assert_eq!(SCENE_LAYOUT.blob, BLOB_SHAPE);
        assert_eq!(SCENE_LAYOUT.canvas_size, 300.0);
    }

    #[test]
    fn missed_periods_collapse_into_one_step() {
        let mut scene = BlobScene::new(SceneConfig::jitter().with_seed(3)).unwrap();
        scene.appear(Duration::ZERO).unwrap();
        assert_eq!(scene.jitter_steps(), 1);

        scene.tick(Duration::from_millis(5_500)).unwrap();
        assert_eq!(scene.jitter_steps(), 2);

        scene.tick(Duration::from_millis(5_900)).unwrap();
        assert_eq!(scene.jitter_steps(), 2);

        scene.tick(Duration::from_millis(6_000)).unwrap();
        assert_eq!(scene.jitter_steps(), 3);
        assert_eq!(scene.phase(), ScenePhase::Running);
    }
}
