//! Repository for the `notes` table.

use sqlx::{FromRow, PgPool};
use jotter_core::types::{RecordId, Timestamp};

use crate::client::Order;
use crate::models::note::{NewNote, Note, NoteChanges, NoteColumn};

/// Column list for notes queries.
const COLUMNS: &str = "id, title, content, folder_id, created_at, updated_at";

#[derive(FromRow)]
struct NoteRow {
    id: String,
    title: Option<String>,
    content: Option<String>,
    folder_id: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: RecordId::from(row.id),
            title: row.title,
            content: row.content,
            folder_id: row.folder_id.map(RecordId::from),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// List all notes, optionally ordered by one whitelisted column.
    pub async fn list(
        pool: &PgPool,
        order: Option<Order<NoteColumn>>,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let mut query = format!("SELECT {COLUMNS} FROM notes");
        if let Some(order) = order {
            query.push_str(&format!(
                " ORDER BY {} {}",
                order.column.as_sql(),
                order.direction.as_sql()
            ));
        }
        let rows = sqlx::query_as::<_, NoteRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    /// Find a note by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &RecordId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id.as_str())
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Note::from))
    }

    /// Insert a new note, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (title, content, folder_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(input.title.as_deref())
            .bind(input.content.as_deref())
            .bind(input.folder_id.as_ref().map(RecordId::as_str))
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Replace a note's title, content and folder, returning the updated row.
    ///
    /// Returns `None` when no note has the given ID.
    pub async fn update(
        pool: &PgPool,
        id: &RecordId,
        input: &NoteChanges,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = $2,
                content = $3,
                folder_id = $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id.as_str())
            .bind(input.title.as_deref())
            .bind(input.content.as_deref())
            .bind(input.folder_id.as_ref().map(RecordId::as_str))
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Note::from))
    }

    /// Delete a note by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
