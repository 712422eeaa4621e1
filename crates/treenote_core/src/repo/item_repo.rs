//! Item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/read/delete APIs over the `items` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Item::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `list_items` returns rows in insertion order.
//! - `delete_items` removes every listed item or none of them.

use crate::db::DbError;
use crate::model::item::{Item, ItemId, ItemValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    NotFound(ItemId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the item list.
pub trait ItemRepository {
    fn insert_item(&self, item: &Item) -> RepoResult<ItemId>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
    /// Deletes all `ids` atomically; on error the store is unchanged.
    fn delete_items(&self, ids: &[ItemId]) -> RepoResult<()>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn list_items(&self) -> RepoResult<Vec<Item>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert_item(&self, item: &Item) -> RepoResult<ItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO items (id, timestamp) VALUES (?1, ?2);",
            params![item.id.to_string(), item.timestamp],
        )?;

        Ok(item.id)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        delete_row(self.conn, id)
    }

    fn delete_items(&self, ids: &[ItemId]) -> RepoResult<()> {
        // Dropping `tx` on an early return rolls the batch back.
        let tx = self.conn.unchecked_transaction()?;
        for &id in ids {
            delete_row(&tx, id)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let columns = self
            .conn
            .query_row(
                "SELECT id, timestamp FROM items WHERE id = ?1;",
                [id.to_string()],
                read_columns,
            )
            .optional()?;

        columns.map(parse_item).transpose()
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, timestamp FROM items ORDER BY seq ASC;")?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item(read_columns(row)?)?);
        }

        Ok(items)
    }
}

fn delete_row(conn: &Connection, id: ItemId) -> RepoResult<()> {
    let changed = conn.execute("DELETE FROM items WHERE id = ?1;", [id.to_string()])?;
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(())
}

fn read_columns(row: &Row<'_>) -> rusqlite::Result<(String, i64)> {
    Ok((row.get("id")?, row.get("timestamp")?))
}

fn parse_item((id_text, timestamp): (String, i64)) -> RepoResult<Item> {
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in items.id"))
    })?;
    Ok(Item::with_parts(id, timestamp)?)
}

#[cfg(test)]
mod tests {
    use super::{parse_item, RepoError};

    #[test]
    fn parse_item_rejects_malformed_uuid() {
        let err = parse_item(("not-a-uuid".to_string(), 1)).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("items.id")));
    }
}
