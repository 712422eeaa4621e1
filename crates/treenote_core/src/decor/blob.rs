//! Single decorative blob and the change-notification contract.
//!
//! # Invariants
//! - Both offsets stay within `[-OFFSET_LIMIT, OFFSET_LIMIT]`.
//! - Observers are notified before a mutation is applied, so they read the
//!   old state during `will_change`.

use crate::decor::palette::BlobColor;
use crate::decor::tracker::BlobTracker;
use rand::Rng;
use uuid::Uuid;

pub type BlobId = Uuid;

/// Absolute bound of either blob offset, in points.
pub const OFFSET_LIMIT: f32 = 15.0;

/// Object about to change, as seen by a [`ChangeObserver`].
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Blob(&'a Blob),
    Tracker(&'a BlobTracker),
}

/// Receives "will change" notifications ahead of each mutation.
pub trait ChangeObserver {
    fn will_change(&mut self, subject: Subject<'_>);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl ChangeObserver for Unobserved {
    fn will_change(&mut self, _subject: Subject<'_>) {}
}

/// Offset and color state of one blurred shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    id: BlobId,
    offset_x: f32,
    offset_y: f32,
    color: BlobColor,
}

impl Blob {
    /// Creates a pink blob at a random offset.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            id: Uuid::new_v4(),
            offset_x: sample_offset(rng),
            offset_y: sample_offset(rng),
            color: BlobColor::Pink,
        }
    }

    pub fn id(&self) -> BlobId {
        self.id
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn color(&self) -> BlobColor {
        self.color
    }

    /// Re-samples the vertical offset only.
    ///
    /// `observer` sees this blob before the new value is committed.
    pub fn randomize_positions<R, O>(&mut self, rng: &mut R, observer: &mut O)
    where
        R: Rng + ?Sized,
        O: ChangeObserver + ?Sized,
    {
        observer.will_change(Subject::Blob(self));
        self.offset_y = sample_offset(rng);
    }

    pub(crate) fn set_offset_x(&mut self, value: f32) {
        self.offset_x = value;
    }

    pub(crate) fn set_color(&mut self, color: BlobColor) {
        self.color = color;
    }
}

/// Uniform sample from the closed offset range.
pub(crate) fn sample_offset<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-OFFSET_LIMIT..=OFFSET_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::{Blob, ChangeObserver, Subject, Unobserved, OFFSET_LIMIT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct SeenOffsets(Vec<f32>);

    impl ChangeObserver for SeenOffsets {
        fn will_change(&mut self, subject: Subject<'_>) {
            if let Subject::Blob(blob) = subject {
                self.0.push(blob.offset_y());
            }
        }
    }

    #[test]
    fn randomize_keeps_horizontal_offset_and_color() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut blob = Blob::new(&mut rng);
        let (offset_x, color) = (blob.offset_x(), blob.color());

        for _ in 0..50 {
            blob.randomize_positions(&mut rng, &mut Unobserved);
            assert_eq!(blob.offset_x(), offset_x);
            assert_eq!(blob.color(), color);
            assert!((-OFFSET_LIMIT..=OFFSET_LIMIT).contains(&blob.offset_y()));
        }
    }

    #[test]
    fn observer_reads_value_before_commit() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut blob = Blob::new(&mut rng);
        let mut seen = SeenOffsets(Vec::new());

        let before = blob.offset_y();
        blob.randomize_positions(&mut rng, &mut seen);

        assert_eq!(seen.0, vec![before]);
        assert_ne!(blob.offset_y(), before);
    }
}
