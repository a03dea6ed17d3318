//! Task list screen model.
//!
//! # Invariants
//! - An empty store yields `TaskListState::Empty`, never a failure.
//! - Rows are sorted by case-insensitive name, then id.

use crate::messages::MessageCatalog;
use crate::model::task::{TaskId, TaskRecord};
use crate::presentation::ErrorAlert;
use crate::result::{OperationResult, ResultConverter};
use crate::service::task_service::TaskService;
use std::sync::Arc;

/// One displayed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub value: String,
}

impl From<TaskRecord> for TaskRow {
    fn from(task: TaskRecord) -> Self {
        Self {
            id: task.id,
            title: task.name,
            value: task.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListState {
    Tasks(Vec<TaskRow>),
    Empty { placeholder: String },
    Failed(ErrorAlert),
}

pub struct TaskListModel {
    service: Arc<dyn TaskService>,
    converter: ResultConverter,
    catalog: MessageCatalog,
}

impl TaskListModel {
    pub fn new(
        service: Arc<dyn TaskService>,
        converter: ResultConverter,
        catalog: MessageCatalog,
    ) -> Self {
        Self {
            service,
            converter,
            catalog,
        }
    }

    pub fn title(&self) -> &'static str {
        self.catalog.task_list_title
    }

    /// Reads every task and builds the list state.
    pub async fn load(&self) -> TaskListState {
        match self.converter.convert(self.service.read_all()).await {
            OperationResult::Successful(tasks) if tasks.is_empty() => TaskListState::Empty {
                placeholder: self.catalog.task_list_placeholder.to_string(),
            },
            OperationResult::Successful(mut tasks) => {
                tasks.sort_by_cached_key(|task| (task.name.to_lowercase(), task.id.clone()));
                TaskListState::Tasks(tasks.into_iter().map(TaskRow::from).collect())
            }
            OperationResult::Failed { message } => {
                TaskListState::Failed(ErrorAlert::new(self.catalog.error_title, message))
            }
        }
    }

    pub async fn remove(&self, id: &TaskId) -> Result<(), ErrorAlert> {
        match self.converter.convert(self.service.remove_task(id)).await {
            OperationResult::Successful(()) => Ok(()),
            OperationResult::Failed { message } => {
                Err(ErrorAlert::new(self.catalog.error_title, message))
            }
        }
    }
}
