//! Item domain model.
//!
//! # Responsibility
//! - Define the single persisted record shown in the item list.
//! - Provide the display label used by the list pane.
//!
//! # Invariants
//! - `id` is never nil and never reused for another item.
//! - `timestamp` is Unix epoch milliseconds and never negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a persisted item.
pub type ItemId = Uuid;

/// Validation failures for item construction and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    NilId,
    NegativeTimestamp(i64),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "item id must not be nil"),
            Self::NegativeTimestamp(value) => {
                write!(f, "item timestamp ({value}) must be >= 0")
            }
        }
    }
}

impl Error for ItemValidationError {}

/// Timestamped list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemWire")]
pub struct Item {
    pub id: ItemId,
    /// Creation time in Unix epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Deserialize)]
struct ItemWire {
    id: ItemId,
    timestamp: i64,
}

impl TryFrom<ItemWire> for Item {
    type Error = ItemValidationError;

    fn try_from(value: ItemWire) -> Result<Self, Self::Error> {
        Self::with_parts(value.id, value.timestamp)
    }
}

impl Item {
    /// Creates an item stamped with the current wall-clock time.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: now_epoch_ms(),
        }
    }

    /// Creates an item from existing identity and timestamp.
    ///
    /// # Errors
    /// - `NilId` when `id` is nil.
    /// - `NegativeTimestamp` when `timestamp < 0`.
    pub fn with_parts(id: ItemId, timestamp: i64) -> Result<Self, ItemValidationError> {
        let item = Self { id, timestamp };
        item.validate()?;
        Ok(item)
    }

    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        if self.timestamp < 0 {
            return Err(ItemValidationError::NegativeTimestamp(self.timestamp));
        }
        Ok(())
    }

    /// List label in numeric-date, standard-time form (UTC).
    ///
    /// Example: `9/7/2024, 3:04:05 PM`.
    pub fn display_label(&self) -> String {
        format_timestamp_label(self.timestamp)
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats epoch milliseconds as `M/D/YYYY, h:mm:ss AM|PM` in UTC.
pub fn format_timestamp_label(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(datetime) => datetime.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => timestamp_ms.to_string(),
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
