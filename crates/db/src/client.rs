//! The data-client contract the application is written against.
//!
//! Each table is reached through a [`Table`] handle offering exactly five
//! single-round-trip operations. There are no transactions, no batching and
//! no retries; a failure comes back as a [`ClientError`] straight away.

use std::fmt::Debug;

use async_trait::async_trait;
use jotter_core::types::RecordId;

use crate::models::folder::Folder;
use crate::models::note::Note;

/// A remote operation failed.
///
/// The only failure kind the application models. Not-found, validation,
/// permission and network problems all look the same from here; the
/// message is meant for logs and status lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
    /// Backend-specific error code, when the store reported one.
    pub code: Option<String>,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// The store matched no row for an operation that needs one.
    pub fn no_rows(table: &str, id: &RecordId) -> Self {
        Self::with_code(format!("No row in {table} with id {id}"), NO_ROWS_CODE)
    }
}

/// Code attached by [`ClientError::no_rows`].
pub const NO_ROWS_CODE: &str = "NO_ROWS";

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => Self {
                message: db_err.message().to_string(),
                code: db_err.code().map(|c| c.into_owned()),
            },
            other => Self::new(other.to_string()),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Sort direction for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Single-column ordering for [`Table::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order<C> {
    pub column: C,
    pub direction: Direction,
}

impl<C> Order<C> {
    pub fn asc(column: C) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: C) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// A record type stored in one table.
pub trait Record: Debug + Clone + Send + Sync + 'static {
    /// Columns a listing may be ordered by.
    type Column: Debug + Copy + Send + Sync + 'static;
    /// Fields supplied on insert; the store adds id and timestamps.
    type New: Debug + Send + 'static;
    /// Fields replaced on update.
    type Changes: Debug + Send + 'static;

    const TABLE: &'static str;

    fn id(&self) -> &RecordId;
}

/// Operations on one logical table.
#[async_trait]
pub trait Table<R: Record>: Send + Sync {
    /// Fetch every row, optionally ordered by one column.
    async fn list(&self, order: Option<Order<R::Column>>) -> ClientResult<Vec<R>>;

    /// Fetch at most one row by primary key.
    async fn get(&self, id: &RecordId) -> ClientResult<Option<R>>;

    /// Insert a row; the store assigns id and creation timestamp.
    async fn insert(&self, fields: R::New) -> ClientResult<R>;

    /// Replace a row's mutable fields; the store assigns the updated timestamp.
    ///
    /// Updating an id that matches no row is an error.
    async fn update(&self, id: &RecordId, fields: R::Changes) -> ClientResult<R>;

    /// Delete by primary key. Deleting an id that matches no row succeeds.
    async fn delete(&self, id: &RecordId) -> ClientResult<()>;
}

/// Handle to the remote store, injected wherever data is read or written.
#[async_trait]
pub trait DataClient: Send + Sync {
    fn notes(&self) -> &dyn Table<Note>;

    fn folders(&self) -> &dyn Table<Folder>;

    /// Cheap reachability probe for the health endpoint.
    async fn ping(&self) -> ClientResult<()>;
}
