//! [`DataClient`] backed by a PostgreSQL pool.

use async_trait::async_trait;
use jotter_core::types::RecordId;

use crate::client::{ClientError, ClientResult, DataClient, Order, Record, Table};
use crate::models::folder::{Folder, FolderChanges, FolderColumn, NewFolder};
use crate::models::note::{NewNote, Note, NoteChanges, NoteColumn};
use crate::repositories::{FolderRepo, NoteRepo};
use crate::DbPool;

/// Data client issuing one query per operation against the pool.
#[derive(Clone)]
pub struct PgDataClient {
    notes: PgNotes,
    folders: PgFolders,
    pool: DbPool,
}

impl PgDataClient {
    pub fn new(pool: DbPool) -> Self {
        Self {
            notes: PgNotes { pool: pool.clone() },
            folders: PgFolders { pool: pool.clone() },
            pool,
        }
    }
}

#[async_trait]
impl DataClient for PgDataClient {
    fn notes(&self) -> &dyn Table<Note> {
        &self.notes
    }

    fn folders(&self) -> &dyn Table<Folder> {
        &self.folders
    }

    async fn ping(&self) -> ClientResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
struct PgNotes {
    pool: DbPool,
}

#[async_trait]
impl Table<Note> for PgNotes {
    async fn list(&self, order: Option<Order<NoteColumn>>) -> ClientResult<Vec<Note>> {
        Ok(NoteRepo::list(&self.pool, order).await?)
    }

    async fn get(&self, id: &RecordId) -> ClientResult<Option<Note>> {
        Ok(NoteRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, fields: NewNote) -> ClientResult<Note> {
        let note = NoteRepo::create(&self.pool, &fields).await?;
        tracing::debug!(note_id = %note.id, "Inserted note row");
        Ok(note)
    }

    async fn update(&self, id: &RecordId, fields: NoteChanges) -> ClientResult<Note> {
        NoteRepo::update(&self.pool, id, &fields)
            .await?
            .ok_or_else(|| ClientError::no_rows(Note::TABLE, id))
    }

    async fn delete(&self, id: &RecordId) -> ClientResult<()> {
        let deleted = NoteRepo::delete(&self.pool, id).await?;
        tracing::debug!(note_id = %id, deleted, "Deleted note row");
        Ok(())
    }
}

#[derive(Clone)]
struct PgFolders {
    pool: DbPool,
}

#[async_trait]
impl Table<Folder> for PgFolders {
    async fn list(&self, order: Option<Order<FolderColumn>>) -> ClientResult<Vec<Folder>> {
        Ok(FolderRepo::list(&self.pool, order).await?)
    }

    async fn get(&self, id: &RecordId) -> ClientResult<Option<Folder>> {
        Ok(FolderRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, fields: NewFolder) -> ClientResult<Folder> {
        let folder = FolderRepo::create(&self.pool, &fields).await?;
        tracing::debug!(folder_id = %folder.id, "Inserted folder row");
        Ok(folder)
    }

    async fn update(&self, id: &RecordId, fields: FolderChanges) -> ClientResult<Folder> {
        FolderRepo::update(&self.pool, id, &fields)
            .await?
            .ok_or_else(|| ClientError::no_rows(Folder::TABLE, id))
    }

    async fn delete(&self, id: &RecordId) -> ClientResult<()> {
        let deleted = FolderRepo::delete(&self.pool, id).await?;
        tracing::debug!(folder_id = %id, deleted, "Deleted folder row");
        Ok(())
    }
}
