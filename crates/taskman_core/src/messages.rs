//! User-facing message catalogs and error-to-message mapping.
//!
//! # Responsibility
//! - Hold every string the core hands to a UI, per locale.
//! - Map any error to one displayable message.
//!
//! # Invariants
//! - `ErrorMessageService::message_for` is pure and total.
//! - Errors not defined by this crate map to the generic message.

use crate::repo::task_accessor::TaskStoreError;
use std::error::Error;

/// Locales with a bundled catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    German,
}

impl Locale {
    /// Picks a catalog from a BCP-47 tag such as `de-CH`, by primary language.
    ///
    /// Unknown languages fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "de" => Self::German,
            _ => Self::English,
        }
    }

    pub fn catalog(self) -> MessageCatalog {
        match self {
            Self::English => MessageCatalog::english(),
            Self::German => MessageCatalog::german(),
        }
    }
}

/// Strings for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCatalog {
    pub error_generic: &'static str,
    pub error_title: &'static str,
    pub error_database_access: &'static str,
    pub error_item_not_found: &'static str,
    pub error_out_of_disk_space: &'static str,
    pub task_list_title: &'static str,
    pub task_list_placeholder: &'static str,
    pub edit_task_title: &'static str,
    pub name_title: &'static str,
    pub name_hint: &'static str,
    pub name_required: &'static str,
    pub notes_title: &'static str,
    pub notes_hint: &'static str,
}

impl MessageCatalog {
    pub const fn english() -> Self {
        Self {
            error_generic: "An error occurred",
            error_title: "Error",
            error_database_access: "Failed to access the local database",
            error_item_not_found:
                "The item you are trying to delete could not be found in the local database",
            error_out_of_disk_space: "The device has run out of storage space",
            task_list_title: "Your Tasks",
            task_list_placeholder: "You have not added any tasks yet",
            edit_task_title: "Edit Task",
            name_title: "Name",
            name_hint: "E.g. Buy food",
            name_required: "Enter a name for your task",
            notes_title: "Notes",
            notes_hint: "Additional notes...",
        }
    }

    pub const fn german() -> Self {
        Self {
            error_generic: "Ein Fehler ist aufgetreten",
            error_title: "Fehler",
            error_database_access: "Auf die lokale Datenbank konnte nicht zugegriffen werden",
            error_item_not_found:
                "Der zu löschende Eintrag wurde in der lokalen Datenbank nicht gefunden",
            error_out_of_disk_space: "Auf dem Gerät ist kein Speicherplatz mehr frei",
            task_list_title: "Deine Aufgaben",
            task_list_placeholder: "Du hast noch keine Aufgaben erfasst",
            edit_task_title: "Aufgabe bearbeiten",
            name_title: "Name",
            name_hint: "z. B. Essen kaufen",
            name_required: "Gib einen Namen für deine Aufgabe ein",
            notes_title: "Notizen",
            notes_hint: "Weitere Notizen...",
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

/// Turns errors into displayable text.
pub trait ErrorMessageService: Send + Sync {
    fn message_for(&self, error: &(dyn Error + 'static)) -> String;
}

/// Catalog-backed message mapping for task store errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalizedErrorMessageService {
    catalog: MessageCatalog,
}

impl LocalizedErrorMessageService {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self { catalog }
    }

    fn store_message(&self, error: &TaskStoreError) -> &'static str {
        match error {
            TaskStoreError::DatabaseAccessFailure(_) => self.catalog.error_database_access,
            TaskStoreError::ItemNotFound(_) => self.catalog.error_item_not_found,
            TaskStoreError::OutOfDiskSpace(_) => self.catalog.error_out_of_disk_space,
            TaskStoreError::StorageFault(_)
            | TaskStoreError::Validation(_)
            | TaskStoreError::InvalidData(_)
            | TaskStoreError::WorkerFailed(_) => self.catalog.error_generic,
        }
    }
}

impl ErrorMessageService for LocalizedErrorMessageService {
    fn message_for(&self, error: &(dyn Error + 'static)) -> String {
        match error.downcast_ref::<TaskStoreError>() {
            Some(store_error) => self.store_message(store_error),
            None => self.catalog.error_generic,
        }
        .to_string()
    }
}
