use futures::future;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use taskman_core::db::DbError;
use taskman_core::{
    ErrorMessageService, Locale, LocalizedErrorMessageService, MessageCatalog, OperationResult,
    ResultConverter, TaskId, TaskStoreError,
};

#[derive(Debug)]
struct Unrelated;

impl Display for Unrelated {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrelated")
    }
}

impl Error for Unrelated {}

fn english_converter() -> ResultConverter {
    ResultConverter::new(Arc::new(LocalizedErrorMessageService::new(
        MessageCatalog::english(),
    )))
}

fn access_failure() -> TaskStoreError {
    TaskStoreError::DatabaseAccessFailure(DbError::UnsupportedSchemaVersion {
        db_version: 9,
        latest_supported: 4,
    })
}

fn disk_full() -> rusqlite::Error {
    rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
        None,
    )
}

#[tokio::test]
async fn success_becomes_successful() {
    let converter = english_converter();
    let result = converter
        .convert(future::ready(Ok::<_, TaskStoreError>(vec![1, 2, 3])))
        .await;
    assert_eq!(result, OperationResult::Successful(vec![1, 2, 3]));
}

#[tokio::test]
async fn failure_becomes_failed_with_service_message() {
    let service = LocalizedErrorMessageService::new(MessageCatalog::english());
    let converter = english_converter();

    let err = TaskStoreError::ItemNotFound(TaskId::from("A"));
    let expected = service.message_for(&err);
    let result = converter
        .convert(future::ready(Err::<(), _>(err)))
        .await;

    assert_eq!(result, OperationResult::Failed { message: expected });
}

#[tokio::test]
async fn foreign_errors_are_absorbed_too() {
    let result = english_converter()
        .convert(future::ready(Err::<u8, _>(Unrelated)))
        .await;
    assert_eq!(result.error(), Some("An error occurred"));
}

#[test]
fn store_errors_map_to_specific_messages() {
    let service = LocalizedErrorMessageService::new(MessageCatalog::english());

    assert_eq!(
        service.message_for(&access_failure()),
        "Failed to access the local database"
    );
    assert_eq!(
        service.message_for(&TaskStoreError::ItemNotFound(TaskId::from("A"))),
        "The item you are trying to delete could not be found in the local database"
    );
    assert_eq!(
        service.message_for(&TaskStoreError::OutOfDiskSpace(disk_full())),
        "The device has run out of storage space"
    );
}

#[test]
fn unclassified_faults_map_to_generic_message() {
    let service = LocalizedErrorMessageService::default();

    let busy = rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
        None,
    );
    assert_eq!(
        service.message_for(&TaskStoreError::StorageFault(busy)),
        "An error occurred"
    );
    assert_eq!(
        service.message_for(&TaskStoreError::WorkerFailed("panicked".to_string())),
        "An error occurred"
    );
    assert_eq!(service.message_for(&Unrelated), "An error occurred");
}

#[test]
fn german_catalog_localizes_store_errors() {
    let service = LocalizedErrorMessageService::new(Locale::from_tag("de-CH").catalog());
    assert_eq!(
        service.message_for(&TaskStoreError::OutOfDiskSpace(disk_full())),
        "Auf dem Gerät ist kein Speicherplatz mehr frei"
    );
    assert_eq!(service.message_for(&Unrelated), "Ein Fehler ist aufgetreten");
}
