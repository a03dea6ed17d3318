//! Task use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points consumed by presentation and CLI layers.
//! - Route every accessor call through the error-logging decorator.
//!
//! # Invariants
//! - Service APIs never bypass the accessor's persistence contract.
//! - Results and errors are forwarded unchanged.

use crate::model::task::{TaskId, TaskRecord};
use crate::repo::task_accessor::{StoreResult, TaskDataAccessor};
use crate::service::error_logging::ErrorLogger;
use async_trait::async_trait;

const COMPONENT: &str = "local_task_service";

/// Domain-facing task operations.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn read_all(&self) -> StoreResult<Vec<TaskRecord>>;
    async fn get_task_by_id(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>>;
    async fn save(&self, task: &TaskRecord) -> StoreResult<()>;
    async fn remove_task(&self, id: &TaskId) -> StoreResult<()>;
}

/// Task service over a local accessor.
pub struct LocalTaskService<A: TaskDataAccessor> {
    accessor: A,
    logger: ErrorLogger,
}

impl<A: TaskDataAccessor> LocalTaskService<A> {
    pub fn new(accessor: A, logger: ErrorLogger) -> Self {
        Self { accessor, logger }
    }
}

#[async_trait]
impl<A: TaskDataAccessor> TaskService for LocalTaskService<A> {
    async fn read_all(&self) -> StoreResult<Vec<TaskRecord>> {
        self.logger
            .log_errors(self.accessor.read_all(), COMPONENT, "read_all")
            .await
    }

    async fn get_task_by_id(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>> {
        self.logger
            .log_errors(self.accessor.get_task_by_id(id), COMPONENT, "get_task_by_id")
            .await
    }

    async fn save(&self, task: &TaskRecord) -> StoreResult<()> {
        self.logger
            .log_errors(self.accessor.save(task), COMPONENT, "save")
            .await
    }

    async fn remove_task(&self, id: &TaskId) -> StoreResult<()> {
        self.logger
            .log_errors(self.accessor.remove_task(id), COMPONENT, "remove_task")
            .await
    }
}
