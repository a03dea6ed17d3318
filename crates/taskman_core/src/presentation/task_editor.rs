//! Task editor screen model.
//!
//! # Invariants
//! - The task id is fixed for the editor's lifetime; saving twice updates
//!   the same stored task.
//! - `can_save` requires a changed snapshot and a non-blank name.

use crate::messages::MessageCatalog;
use crate::model::task::{TaskId, TaskRecord};
use crate::presentation::ErrorAlert;
use crate::result::{OperationResult, ResultConverter};
use crate::service::task_service::TaskService;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldKind {
    Name,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorField {
    pub kind: EditorFieldKind,
    pub title: String,
    pub value: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSection {
    pub title: Option<String>,
    pub fields: Vec<EditorField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Snapshot {
    name: String,
    notes: String,
}

pub struct TaskEditor {
    service: Arc<dyn TaskService>,
    converter: ResultConverter,
    catalog: MessageCatalog,
    id: TaskId,
    is_new: bool,
    initial: Snapshot,
    current: Snapshot,
}

impl TaskEditor {
    /// Editor for a task that does not exist yet.
    pub fn new(
        service: Arc<dyn TaskService>,
        converter: ResultConverter,
        catalog: MessageCatalog,
    ) -> Self {
        Self {
            service,
            converter,
            catalog,
            id: TaskId::generate(),
            is_new: true,
            initial: Snapshot::default(),
            current: Snapshot::default(),
        }
    }

    /// Editor opened on an existing task.
    pub fn editing(
        service: Arc<dyn TaskService>,
        converter: ResultConverter,
        catalog: MessageCatalog,
        task: TaskRecord,
    ) -> Self {
        let snapshot = Snapshot {
            name: task.name,
            notes: task.notes,
        };
        Self {
            service,
            converter,
            catalog,
            id: task.id,
            is_new: false,
            initial: snapshot.clone(),
            current: snapshot,
        }
    }

    pub fn title(&self) -> &'static str {
        self.catalog.edit_task_title
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn name(&self) -> &str {
        &self.current.name
    }

    pub fn notes(&self) -> &str {
        &self.current.notes
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.current.name = name.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.current.notes = notes.into();
    }

    pub fn can_save(&self) -> bool {
        self.current != self.initial && !self.current.name.trim().is_empty()
    }

    pub fn sections(&self) -> Vec<EditorSection> {
        let fields = vec![
            EditorField {
                kind: EditorFieldKind::Name,
                title: self.catalog.name_title.to_string(),
                value: self.current.name.clone(),
                hint: self.catalog.name_hint.to_string(),
            },
            EditorField {
                kind: EditorFieldKind::Notes,
                title: self.catalog.notes_title.to_string(),
                value: self.current.notes.clone(),
                hint: self.catalog.notes_hint.to_string(),
            },
        ];
        vec![EditorSection {
            title: None,
            fields,
        }]
    }

    /// Persists the current snapshot.
    ///
    /// An unchanged snapshot of a stored task is returned without a write.
    pub async fn save(&mut self) -> Result<TaskRecord, ErrorAlert> {
        if self.current.name.trim().is_empty() {
            return Err(self.alert(self.catalog.name_required));
        }

        let task = TaskRecord::with_id(
            self.id.clone(),
            self.current.name.clone(),
            self.current.notes.clone(),
        );
        if !self.is_new && self.current == self.initial {
            return Ok(task);
        }

        match self.converter.convert(self.service.save(&task)).await {
            OperationResult::Successful(()) => {
                self.initial = self.current.clone();
                self.is_new = false;
                Ok(task)
            }
            OperationResult::Failed { message } => Err(self.alert(message)),
        }
    }

    /// Deletes the edited task from the store.
    pub async fn delete(&self) -> Result<(), ErrorAlert> {
        match self.converter.convert(self.service.remove_task(&self.id)).await {
            OperationResult::Successful(()) => Ok(()),
            OperationResult::Failed { message } => Err(self.alert(message)),
        }
    }

    fn alert(&self, message: impl Into<String>) -> ErrorAlert {
        ErrorAlert::new(self.catalog.error_title, message)
    }
}
