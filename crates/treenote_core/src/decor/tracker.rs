//! Owner of the fixed blob set shown behind the detail pane.
//!
//! # Responsibility
//! - Create exactly [`BLOB_COUNT`] blobs with palette colors.
//! - Refresh both offsets of every blob on `randomize_positions`.
//!
//! # Invariants
//! - The blob collection never grows or shrinks after construction.
//! - Vertical offsets change through `Blob::randomize_positions`; horizontal
//!   offsets are written here directly.

use crate::decor::blob::{sample_offset, Blob, ChangeObserver, Subject};
use crate::decor::palette::Palette;
use rand::Rng;
use uuid::Uuid;

pub const BLOB_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct BlobTracker {
    id: Uuid,
    blobs: Vec<Blob>,
}

impl BlobTracker {
    /// Creates [`BLOB_COUNT`] blobs, each colored by a uniform palette pick.
    pub fn new<R: Rng + ?Sized>(palette: &Palette, rng: &mut R) -> Self {
        let blobs = (0..BLOB_COUNT)
            .map(|_| {
                let mut blob = Blob::new(rng);
                blob.set_color(palette.pick(rng));
                blob
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            blobs,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Re-samples both offsets of every blob.
    ///
    /// Emits one tracker notification, then one blob notification per blob,
    /// each before its mutation.
    pub fn randomize_positions<R, O>(&mut self, rng: &mut R, observer: &mut O)
    where
        R: Rng + ?Sized,
        O: ChangeObserver + ?Sized,
    {
        observer.will_change(Subject::Tracker(self));
        for blob in &mut self.blobs {
            blob.randomize_positions(rng, observer);
            blob.set_offset_x(sample_offset(rng));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlobTracker, BLOB_COUNT};
    use crate::decor::blob::{ChangeObserver, Subject};
    use crate::decor::palette::Palette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Notifications(Vec<&'static str>);

    impl ChangeObserver for Notifications {
        fn will_change(&mut self, subject: Subject<'_>) {
            self.0.push(match subject {
                Subject::Tracker(_) => "tracker",
                Subject::Blob(_) => "blob",
            });
        }
    }

    #[test]
    fn tracker_notifies_before_each_blob() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tracker = BlobTracker::new(&Palette::default(), &mut rng);
        let mut notifications = Notifications::default();

        tracker.randomize_positions(&mut rng, &mut notifications);

        assert_eq!(notifications.0.len(), 1 + BLOB_COUNT);
        assert_eq!(notifications.0[0], "tracker");
        assert!(notifications.0[1..].iter().all(|kind| *kind == "blob"));
    }

    #[test]
    fn randomize_refreshes_horizontal_offsets() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut tracker = BlobTracker::new(&Palette::default(), &mut rng);
        let before = tracker
            .blobs()
            .iter()
            .map(|blob| blob.offset_x())
            .collect::<Vec<_>>();

        tracker.randomize_positions(&mut rng, &mut crate::decor::blob::Unobserved);

        let after = tracker
            .blobs()
            .iter()
            .map(|blob| blob.offset_x())
            .collect::<Vec<_>>();
        assert_ne!(before, after);
    }
}
