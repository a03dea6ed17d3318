//! Task data accessor contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide async CRUD over the `tasks` table.
//! - Translate raw SQLite failures into `TaskStoreError` kinds.
//!
//! # Invariants
//! - Every call obtains its own connection from the configuration provider.
//! - Every mutation runs in exactly one write transaction.
//! - `save` upserts by `task_id`; it never creates a duplicate row.
//! - `save` calls `TaskRecord::validate()` before opening the store.
//! - `remove_task` reports a missing id as `ItemNotFound`, never a no-op.

use crate::db::{open_db, ConfigurationProvider, DbError};
use crate::model::task::{TaskId, TaskRecord, TaskValidationError};
use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::task;

const TASK_SELECT_SQL: &str = "SELECT task_id, name, notes FROM tasks";

pub type StoreResult<T> = Result<T, TaskStoreError>;

/// Failure kinds surfaced by task persistence.
#[derive(Debug)]
pub enum TaskStoreError {
    /// The store could not be opened, bootstrapped or migrated.
    DatabaseAccessFailure(DbError),
    /// Delete requested for an id with no stored task.
    ItemNotFound(TaskId),
    /// A write failed because the device has no space left.
    OutOfDiskSpace(rusqlite::Error),
    /// Any other SQLite failure after the store was opened.
    StorageFault(rusqlite::Error),
    /// A task handed to `save` failed validation; nothing was written.
    Validation(TaskValidationError),
    /// A stored row does not form a valid task.
    InvalidData(String),
    /// The blocking worker running the operation panicked or was cancelled.
    WorkerFailed(String),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseAccessFailure(err) => write!(f, "failed to access task store: {err}"),
            Self::ItemNotFound(id) => write!(f, "task not found: {id}"),
            Self::OutOfDiskSpace(err) => write!(f, "out of disk space: {err}"),
            Self::StorageFault(err) => write!(f, "storage fault: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::WorkerFailed(message) => write!(f, "storage worker failed: {message}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DatabaseAccessFailure(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::OutOfDiskSpace(err) | Self::StorageFault(err) => Some(err),
            Self::ItemNotFound(_) | Self::InvalidData(_) | Self::WorkerFailed(_) => None,
        }
    }
}

impl From<DbError> for TaskStoreError {
    fn from(value: DbError) -> Self {
        Self::DatabaseAccessFailure(value)
    }
}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for TaskStoreError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(ErrorCode::DiskFull) => Self::OutOfDiskSpace(value),
            _ => Self::StorageFault(value),
        }
    }
}

/// Async persistence contract for task records.
///
/// Each method resolves exactly once, with a value or an error.
#[async_trait]
pub trait TaskDataAccessor: Send + Sync {
    /// Returns every stored task in storage order.
    async fn read_all(&self) -> StoreResult<Vec<TaskRecord>>;
    /// Returns the task with `id`, or `None`.
    async fn get_task_by_id(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>>;
    /// Inserts `task`, or replaces the stored task sharing its id.
    async fn save(&self, task: &TaskRecord) -> StoreResult<()>;
    /// Deletes the task with `id`; fails with `ItemNotFound` when absent.
    async fn remove_task(&self, id: &TaskId) -> StoreResult<()>;
}

/// SQLite-backed task accessor.
///
/// SQLite work runs on tokio's blocking pool. Dropping a returned future
/// stops waiting for the result but lets an in-flight transaction finish.
#[derive(Clone)]
pub struct SqliteTaskDataAccessor {
    provider: Arc<dyn ConfigurationProvider>,
}

impl SqliteTaskDataAccessor {
    pub fn new(provider: Arc<dyn ConfigurationProvider>) -> Self {
        Self { provider }
    }

    async fn with_connection<T, F>(&self, job: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        task::spawn_blocking(move || {
            let config = provider.fetch_configuration();
            let mut conn = open_db(&config)?;
            job(&mut conn)
        })
        .await
        .map_err(|err| TaskStoreError::WorkerFailed(err.to_string()))?
    }
}

#[async_trait]
impl TaskDataAccessor for SqliteTaskDataAccessor {
    async fn read_all(&self) -> StoreResult<Vec<TaskRecord>> {
        self.with_connection(|conn| read_all_tasks(conn)).await
    }

    async fn get_task_by_id(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>> {
        let id = id.clone();
        self.with_connection(move |conn| find_task(conn, &id)).await
    }

    async fn save(&self, task: &TaskRecord) -> StoreResult<()> {
        task.validate()?;
        let task = task.clone();
        self.with_connection(move |conn| upsert_task(conn, &task)).await
    }

    async fn remove_task(&self, id: &TaskId) -> StoreResult<()> {
        let id = id.clone();
        self.with_connection(move |conn| delete_task(conn, &id)).await
    }
}

fn read_all_tasks(conn: &Connection) -> StoreResult<Vec<TaskRecord>> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL};"))?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();

    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }

    Ok(tasks)
}

fn find_task(conn: &Connection, id: &TaskId) -> StoreResult<Option<TaskRecord>> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE task_id = ?1;"))?;
    let mut rows = stmt.query([id.as_str()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_task_row(row)?));
    }

    Ok(None)
}

fn upsert_task(conn: &mut Connection, task: &TaskRecord) -> StoreResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute(
        "INSERT INTO tasks (task_id, name, notes)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(task_id) DO UPDATE SET
            name = excluded.name,
            notes = excluded.notes;",
        params![task.id.as_str(), task.name.as_str(), task.notes.as_str()],
    )?;
    tx.commit()?;
    Ok(())
}

fn delete_task(conn: &mut Connection, id: &TaskId) -> StoreResult<()> {
    // Immediate: the lookup and the delete see the same committed state.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let exists = tx
        .query_row(
            "SELECT 1 FROM tasks WHERE task_id = ?1;",
            [id.as_str()],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !exists {
        return Err(TaskStoreError::ItemNotFound(id.clone()));
    }

    tx.execute("DELETE FROM tasks WHERE task_id = ?1;", [id.as_str()])?;
    tx.commit()?;
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<TaskRecord> {
    let task_id: String = row.get("task_id")?;
    if task_id.is_empty() {
        return Err(TaskStoreError::InvalidData(
            "empty task_id in tasks.task_id".to_string(),
        ));
    }

    Ok(TaskRecord {
        id: TaskId::from(task_id),
        name: row.get("name")?,
        notes: row.get("notes")?,
    })
}
