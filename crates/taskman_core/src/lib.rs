//! Core task persistence and result conversion for taskman.
//! This crate is the single source of truth for task storage invariants.

pub mod container;
pub mod db;
pub mod logging;
pub mod messages;
pub mod model;
pub mod presentation;
pub mod repo;
pub mod result;
pub mod service;

pub use container::AppContainer;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use messages::{ErrorMessageService, Locale, LocalizedErrorMessageService, MessageCatalog};
pub use model::task::{TaskId, TaskRecord, TaskValidationError};
pub use presentation::task_editor::TaskEditor;
pub use presentation::task_list::{TaskListModel, TaskListState, TaskRow};
pub use presentation::ErrorAlert;
pub use repo::task_accessor::{
    SqliteTaskDataAccessor, StoreResult, TaskDataAccessor, TaskStoreError,
};
pub use result::{OperationResult, ResultConverter};
pub use service::error_logging::{ErrorLogger, ErrorSink, LogErrorSink};
pub use service::task_service::{LocalTaskService, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
