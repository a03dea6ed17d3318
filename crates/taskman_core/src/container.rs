//! Composition root wiring concrete implementations together.
//!
//! # Responsibility
//! - Build the accessor → logger → service chain and the result converter
//!   once, from explicit constructor arguments.
//! - Hand out presentation models sharing those instances.
//!
//! # Invariants
//! - No process-wide state; every container is independent.

use crate::db::{ConfigurationProvider, DefaultConfigurationProvider};
use crate::messages::{LocalizedErrorMessageService, MessageCatalog};
use crate::model::task::TaskRecord;
use crate::presentation::task_editor::TaskEditor;
use crate::presentation::task_list::TaskListModel;
use crate::repo::task_accessor::SqliteTaskDataAccessor;
use crate::result::ResultConverter;
use crate::service::error_logging::{ErrorLogger, ErrorSink, LogErrorSink};
use crate::service::task_service::{LocalTaskService, TaskService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContainer {
    service: Arc<dyn TaskService>,
    converter: ResultConverter,
    catalog: MessageCatalog,
}

impl AppContainer {
    /// Wires the SQLite-backed service.
    pub fn new(
        provider: Arc<dyn ConfigurationProvider>,
        sink: Arc<dyn ErrorSink>,
        catalog: MessageCatalog,
    ) -> Self {
        let accessor = SqliteTaskDataAccessor::new(provider);
        let service = LocalTaskService::new(accessor, ErrorLogger::new(sink));
        Self::with_service(Arc::new(service), catalog)
    }

    /// Default wiring for one database file, logging through `log`.
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(DefaultConfigurationProvider::new(path)),
            Arc::new(LogErrorSink),
            MessageCatalog::english(),
        )
    }

    /// Wires presentation and conversion around any service implementation.
    pub fn with_service(service: Arc<dyn TaskService>, catalog: MessageCatalog) -> Self {
        let messages = Arc::new(LocalizedErrorMessageService::new(catalog));
        Self {
            service,
            converter: ResultConverter::new(messages),
            catalog,
        }
    }

    pub fn task_service(&self) -> Arc<dyn TaskService> {
        Arc::clone(&self.service)
    }

    pub fn converter(&self) -> ResultConverter {
        self.converter.clone()
    }

    pub fn catalog(&self) -> MessageCatalog {
        self.catalog
    }

    pub fn task_list(&self) -> TaskListModel {
        TaskListModel::new(self.task_service(), self.converter(), self.catalog)
    }

    pub fn task_editor(&self) -> TaskEditor {
        TaskEditor::new(self.task_service(), self.converter(), self.catalog)
    }

    pub fn task_editor_for(&self, task: TaskRecord) -> TaskEditor {
        TaskEditor::editing(self.task_service(), self.converter(), self.catalog, task)
    }
}
