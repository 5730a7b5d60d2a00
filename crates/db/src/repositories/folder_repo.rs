//! Repository for the `folders` table.

use sqlx::{FromRow, PgPool};
use jotter_core::types::{RecordId, Timestamp};

use crate::client::Order;
use crate::models::folder::{Folder, FolderChanges, FolderColumn, NewFolder};

/// Column list for folders queries.
const COLUMNS: &str = "id, name, created_at";

#[derive(FromRow)]
struct FolderRow {
    id: String,
    name: String,
    created_at: Timestamp,
}

impl From<FolderRow> for Folder {
    fn from(row: FolderRow) -> Self {
        Folder {
            id: RecordId::from(row.id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Provides CRUD operations for folders.
pub struct FolderRepo;

impl FolderRepo {
    /// List all folders, optionally ordered by one whitelisted column.
    pub async fn list(
        pool: &PgPool,
        order: Option<Order<FolderColumn>>,
    ) -> Result<Vec<Folder>, sqlx::Error> {
        let mut query = format!("SELECT {COLUMNS} FROM folders");
        if let Some(order) = order {
            query.push_str(&format!(
                " ORDER BY {} {}",
                order.column.as_sql(),
                order.direction.as_sql()
            ));
        }
        let rows = sqlx::query_as::<_, FolderRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Folder::from).collect())
    }

    /// Find a folder by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &RecordId) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders WHERE id = $1");
        let row = sqlx::query_as::<_, FolderRow>(&query)
            .bind(id.as_str())
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Folder::from))
    }

    /// Insert a new folder, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewFolder) -> Result<Folder, sqlx::Error> {
        let query = format!("INSERT INTO folders (name) VALUES ($1) RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, FolderRow>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Rename a folder. Returns `None` when no folder has the given ID.
    pub async fn update(
        pool: &PgPool,
        id: &RecordId,
        input: &FolderChanges,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("UPDATE folders SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, FolderRow>(&query)
            .bind(id.as_str())
            .bind(&input.name)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Folder::from))
    }

    /// Delete a folder by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while notes still reference it.
    pub async fn delete(pool: &PgPool, id: &RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
