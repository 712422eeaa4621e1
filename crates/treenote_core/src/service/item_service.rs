//! Item list use-case service.
//!
//! # Responsibility
//! - Provide the list pane's add/delete/list entry points.
//! - Translate list positions (swipe/edit delete) into stable item IDs.
//!
//! # Invariants
//! - Position-based deletes validate every offset before deleting anything,
//!   then hand the whole batch to one atomic repository call.
//! - Service layer remains storage-agnostic.

use crate::model::item::{Item, ItemId};
use crate::repo::item_repo::{ItemRepository, RepoError, RepoResult};
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for position-based list operations.
#[derive(Debug)]
pub enum ItemServiceError {
    /// A list offset does not address a current item.
    IndexOutOfRange { index: usize, len: usize },
    Repo(RepoError),
}

impl Display for ItemServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "item offset {index} out of range for list of {len}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ItemServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IndexOutOfRange { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ItemServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for the item list.
pub struct ItemService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new item stamped with the current time.
    pub fn add_item(&self) -> RepoResult<Item> {
        let item = Item::new();
        self.repo.insert_item(&item)?;
        info!(
            "event=item_add module=service status=ok item_id={} timestamp={}",
            item.id, item.timestamp
        );
        Ok(item)
    }

    /// Deletes one item by stable ID.
    pub fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        self.repo.delete_item(id)?;
        info!("event=item_delete module=service status=ok item_id={id}");
        Ok(())
    }

    /// Deletes the items currently shown at `offsets` in the list.
    ///
    /// Duplicate offsets are collapsed. Returns the deleted IDs in list order.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when any offset is past the end; nothing is deleted.
    /// - `Repo` when the batch delete fails; nothing is deleted.
    pub fn delete_items_at(&self, offsets: &[usize]) -> Result<Vec<ItemId>, ItemServiceError> {
        let items = self.repo.list_items()?;
        let offsets = offsets.iter().copied().collect::<BTreeSet<_>>();

        if let Some(&index) = offsets.iter().find(|&&index| index >= items.len()) {
            return Err(ItemServiceError::IndexOutOfRange {
                index,
                len: items.len(),
            });
        }

        let ids = offsets
            .into_iter()
            .map(|index| items[index].id)
            .collect::<Vec<_>>();
        self.repo.delete_items(&ids)?;
        info!(
            "event=item_delete_batch module=service status=ok count={}",
            ids.len()
        );

        Ok(ids)
    }

    /// Lists all items in display (insertion) order.
    pub fn list_items(&self) -> RepoResult<Vec<Item>> {
        self.repo.list_items()
    }

    /// Lists display labels in the same order as `list_items`.
    pub fn item_labels(&self) -> RepoResult<Vec<String>> {
        Ok(self
            .repo
            .list_items()?
            .iter()
            .map(Item::display_label)
            .collect())
    }
}
