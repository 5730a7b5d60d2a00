//! In-process [`DataClient`] used by tests and `DATA_BACKEND=memory` runs.
//!
//! Rows live in plain vectors. Every call is appended to a shared log so
//! tests can assert exactly which round trips a component made, and
//! [`MemoryDataClient::fail_next`] turns the next matching call into a
//! [`ClientError`]. An optional latency keeps calls suspended long enough
//! to observe overlapping requests.
//!
//! The folder reference on notes is not checked against the folders table.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use jotter_core::types::{RecordId, Timestamp};

use crate::client::{ClientError, ClientResult, DataClient, Direction, Order, Record, Table};
use crate::models::folder::{Folder, FolderChanges, FolderColumn, NewFolder};
use crate::models::note::{NewNote, Note, NoteChanges, NoteColumn};

/// Code carried by failures injected with [`MemoryDataClient::fail_next`].
pub const INJECTED_FAILURE_CODE: &str = "INJECTED";

/// The five table operations, as recorded in the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Insert,
    Update,
    Delete,
}

/// One entry of the call log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCall {
    pub table: &'static str,
    pub operation: Operation,
    /// Target id for `get`, `update` and `delete`.
    pub id: Option<RecordId>,
}

#[derive(Default)]
struct Shared {
    calls: Mutex<Vec<ClientCall>>,
    failures: Mutex<Vec<(&'static str, Operation)>>,
    latency: Mutex<Option<Duration>>,
    last_timestamp: Mutex<Option<Timestamp>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    /// Log the call, wait out the configured latency, then consume a
    /// matching injected failure if one is pending.
    async fn begin(
        &self,
        table: &'static str,
        operation: Operation,
        id: Option<&RecordId>,
    ) -> ClientResult<()> {
        lock(&self.calls).push(ClientCall {
            table,
            operation,
            id: id.cloned(),
        });

        let latency = *lock(&self.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut failures = lock(&self.failures);
        if let Some(pos) = failures
            .iter()
            .position(|&(t, op)| t == table && op == operation)
        {
            failures.remove(pos);
            return Err(ClientError::with_code(
                format!("Injected failure on {table} {operation:?}"),
                INJECTED_FAILURE_CODE,
            ));
        }
        Ok(())
    }

    /// Strictly increasing "server" clock so creation order is total.
    fn now(&self) -> Timestamp {
        let mut last = lock(&self.last_timestamp);
        let mut now = chrono::Utc::now();
        if let Some(prev) = *last {
            if now <= prev {
                now = prev + chrono::Duration::microseconds(1);
            }
        }
        *last = Some(now);
        now
    }
}

/// Behaviour the in-memory table needs from a record type.
pub trait MemoryRecord: Record {
    /// Build the stored row from insert fields and server-assigned values.
    fn create(id: RecordId, now: Timestamp, fields: Self::New) -> Self;

    /// Apply update fields, stamping `now` where the store would.
    fn apply(&mut self, now: Timestamp, changes: Self::Changes);

    /// Ascending comparison on `column`. NULLs sort after values, as in
    /// PostgreSQL.
    fn compare(&self, other: &Self, column: Self::Column) -> Ordering;
}

fn compare_nullable<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

impl MemoryRecord for Note {
    fn create(id: RecordId, now: Timestamp, fields: NewNote) -> Self {
        Note {
            id,
            title: fields.title,
            content: fields.content,
            folder_id: fields.folder_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, now: Timestamp, changes: NoteChanges) {
        self.title = changes.title;
        self.content = changes.content;
        self.folder_id = changes.folder_id;
        self.updated_at = now;
    }

    fn compare(&self, other: &Self, column: NoteColumn) -> Ordering {
        match column {
            NoteColumn::Title => compare_nullable(self.title.as_ref(), other.title.as_ref()),
            NoteColumn::CreatedAt => self.created_at.cmp(&other.created_at),
            NoteColumn::UpdatedAt => self.updated_at.cmp(&other.updated_at),
        }
    }
}

impl MemoryRecord for Folder {
    fn create(id: RecordId, now: Timestamp, fields: NewFolder) -> Self {
        Folder {
            id,
            name: fields.name,
            created_at: now,
        }
    }

    fn apply(&mut self, _now: Timestamp, changes: FolderChanges) {
        self.name = changes.name;
    }

    fn compare(&self, other: &Self, column: FolderColumn) -> Ordering {
        match column {
            FolderColumn::Name => self.name.cmp(&other.name),
            FolderColumn::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

struct MemoryTable<R> {
    rows: Mutex<Vec<R>>,
    shared: Arc<Shared>,
}

impl<R> MemoryTable<R> {
    fn new(shared: Arc<Shared>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            shared,
        }
    }
}

#[async_trait]
impl<R: MemoryRecord> Table<R> for MemoryTable<R> {
    async fn list(&self, order: Option<Order<R::Column>>) -> ClientResult<Vec<R>> {
        self.shared.begin(R::TABLE, Operation::List, None).await?;
        let mut rows = lock(&self.rows).clone();
        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let ord = a.compare(b, order.column);
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }
        Ok(rows)
    }

    async fn get(&self, id: &RecordId) -> ClientResult<Option<R>> {
        self.shared.begin(R::TABLE, Operation::Get, Some(id)).await?;
        Ok(lock(&self.rows).iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, fields: R::New) -> ClientResult<R> {
        self.shared.begin(R::TABLE, Operation::Insert, None).await?;
        let id = RecordId::new(uuid::Uuid::new_v4().to_string());
        let row = R::create(id, self.shared.now(), fields);
        lock(&self.rows).push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &RecordId, fields: R::Changes) -> ClientResult<R> {
        self.shared.begin(R::TABLE, Operation::Update, Some(id)).await?;
        let now = self.shared.now();
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ClientError::no_rows(R::TABLE, id))?;
        row.apply(now, fields);
        Ok(row.clone())
    }

    async fn delete(&self, id: &RecordId) -> ClientResult<()> {
        self.shared.begin(R::TABLE, Operation::Delete, Some(id)).await?;
        lock(&self.rows).retain(|r| r.id() != id);
        Ok(())
    }
}

/// Data client holding every row in process memory.
pub struct MemoryDataClient {
    notes: MemoryTable<Note>,
    folders: MemoryTable<Folder>,
    shared: Arc<Shared>,
}

impl MemoryDataClient {
    pub fn new() -> Self {
        let shared = Arc::new(Shared::default());
        Self {
            notes: MemoryTable::new(Arc::clone(&shared)),
            folders: MemoryTable::new(Arc::clone(&shared)),
            shared,
        }
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<ClientCall> {
        lock(&self.shared.calls).clone()
    }

    /// Number of logged calls matching `table` and `operation`.
    pub fn count_calls(&self, table: &str, operation: Operation) -> usize {
        lock(&self.shared.calls)
            .iter()
            .filter(|c| c.table == table && c.operation == operation)
            .count()
    }

    pub fn clear_calls(&self) {
        lock(&self.shared.calls).clear();
    }

    /// Make the next `operation` on `table` fail with a [`ClientError`].
    pub fn fail_next(&self, table: &'static str, operation: Operation) {
        lock(&self.shared.failures).push((table, operation));
    }

    /// Suspend every call for `latency` before it takes effect.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *lock(&self.shared.latency) = latency;
    }
}

impl Default for MemoryDataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataClient for MemoryDataClient {
    fn notes(&self) -> &dyn Table<Note> {
        &self.notes
    }

    fn folders(&self) -> &dyn Table<Folder> {
        &self.folders
    }

    async fn ping(&self) -> ClientResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn new_note(title: &str, folder: Option<&RecordId>) -> NewNote {
        NewNote {
            title: Some(title.to_string()),
            content: None,
            folder_id: folder.cloned(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let client = MemoryDataClient::new();
        let note = client.notes().insert(new_note("a", None)).await.unwrap();

        assert!(!note.id.as_str().is_empty());
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(client.notes().get(&note.id).await.unwrap(), Some(note));
    }

    #[tokio::test]
    async fn list_orders_by_column_and_direction() {
        let client = MemoryDataClient::new();
        let first = client.notes().insert(new_note("b", None)).await.unwrap();
        let second = client.notes().insert(new_note("a", None)).await.unwrap();

        let newest_first = client
            .notes()
            .list(Some(Order::desc(NoteColumn::CreatedAt)))
            .await
            .unwrap();
        assert_eq!(
            newest_first.iter().map(|n| &n.id).collect::<Vec<_>>(),
            vec![&second.id, &first.id]
        );

        let by_title = client
            .notes()
            .list(Some(Order::asc(NoteColumn::Title)))
            .await
            .unwrap();
        assert_eq!(by_title[0].id, second.id);
    }

    #[tokio::test]
    async fn untitled_notes_sort_last_ascending() {
        let client = MemoryDataClient::new();
        let untitled = client.notes().insert(NewNote::default()).await.unwrap();
        client.notes().insert(new_note("z", None)).await.unwrap();

        let rows = client
            .notes()
            .list(Some(Order::asc(NoteColumn::Title)))
            .await
            .unwrap();
        assert_eq!(rows.last().map(|n| &n.id), Some(&untitled.id));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_bumps_updated_at() {
        let client = MemoryDataClient::new();
        let note = client.notes().insert(new_note("old", None)).await.unwrap();

        let updated = client
            .notes()
            .update(
                &note.id,
                NoteChanges {
                    title: Some("new".into()),
                    content: Some("body".into()),
                    folder_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.title.as_deref(), Some("new"));
        assert_eq!(updated.content.as_deref(), Some("body"));
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn update_of_missing_row_fails_and_delete_is_idempotent() {
        let client = MemoryDataClient::new();
        let missing = RecordId::from("missing");

        let err = client
            .notes()
            .update(&missing, NoteChanges::default())
            .await
            .unwrap_err();
        assert_eq!(err.code.as_deref(), Some(crate::client::NO_ROWS_CODE));

        assert_matches!(client.notes().delete(&missing).await, Ok(()));
    }

    #[tokio::test]
    async fn injected_failure_hits_only_the_next_matching_call() {
        let client = MemoryDataClient::new();
        client.fail_next(Folder::TABLE, Operation::Insert);

        assert!(client.notes().insert(new_note("ok", None)).await.is_ok());
        let err = client
            .folders()
            .insert(NewFolder { name: "Work".into() })
            .await
            .unwrap_err();
        assert_eq!(err.code.as_deref(), Some(INJECTED_FAILURE_CODE));
        assert!(client
            .folders()
            .insert(NewFolder { name: "Work".into() })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn failed_insert_stores_nothing() {
        let client = MemoryDataClient::new();
        client.fail_next(Note::TABLE, Operation::Insert);

        assert!(client.notes().insert(new_note("x", None)).await.is_err());
        assert!(client.notes().list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn call_log_records_table_operation_and_id() {
        let client = MemoryDataClient::new();
        let id = RecordId::from("n1");
        let _ = client.notes().get(&id).await;
        let _ = client.folders().list(None).await;

        assert_eq!(
            client.calls(),
            vec![
                ClientCall {
                    table: "notes",
                    operation: Operation::Get,
                    id: Some(id),
                },
                ClientCall {
                    table: "folders",
                    operation: Operation::List,
                    id: None,
                },
            ]
        );
        assert_eq!(client.count_calls("folders", Operation::List), 1);

        client.clear_calls();
        assert!(client.calls().is_empty());
    }
}
