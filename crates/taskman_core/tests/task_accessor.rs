use std::collections::HashSet;
use std::sync::Arc;
use taskman_core::db::{DefaultConfigurationProvider, StoreConfiguration, SCHEMA_VERSION};
use taskman_core::{
    SqliteTaskDataAccessor, TaskDataAccessor, TaskId, TaskRecord, TaskStoreError,
    TaskValidationError,
};
use tempfile::TempDir;

fn accessor_in(dir: &TempDir) -> SqliteTaskDataAccessor {
    let provider = DefaultConfigurationProvider::new(dir.path().join("tasks.sqlite3"));
    SqliteTaskDataAccessor::new(Arc::new(provider))
}

#[tokio::test]
async fn empty_store_reads_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);

    let tasks = accessor.read_all().await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn save_and_get_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);

    let task = TaskRecord::new("Buy food", "milk, bread");
    accessor.save(&task).await.unwrap();

    let loaded = accessor.get_task_by_id(&task.id).await.unwrap().unwrap();
    assert_eq!(loaded, task);
}

#[tokio::test]
async fn get_unknown_id_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);
    accessor.save(&TaskRecord::new("a", "")).await.unwrap();

    let loaded = accessor.get_task_by_id(&TaskId::from("missing")).await.unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn saving_same_id_twice_replaces_record() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);

    accessor
        .save(&TaskRecord::with_id("A", "x", "first"))
        .await
        .unwrap();
    accessor
        .save(&TaskRecord::with_id("A", "y", "second"))
        .await
        .unwrap();

    let tasks = accessor.read_all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, TaskId::from("A"));
    assert_eq!(tasks[0].name, "y");
    assert_eq!(tasks[0].notes, "second");
}

#[tokio::test]
async fn saving_empty_id_is_rejected_and_list_stays_readable() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);
    let good = TaskRecord::new("good", "");
    accessor.save(&good).await.unwrap();

    let err = accessor
        .save(&TaskRecord::with_id("", "bad", ""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TaskStoreError::Validation(TaskValidationError::EmptyId)
    ));

    assert_eq!(accessor.read_all().await.unwrap(), vec![good]);
}

#[tokio::test]
async fn remove_existing_task_deletes_it() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);

    let keep = TaskRecord::new("keep", "");
    let drop_me = TaskRecord::new("drop", "");
    accessor.save(&keep).await.unwrap();
    accessor.save(&drop_me).await.unwrap();

    accessor.remove_task(&drop_me.id).await.unwrap();

    let tasks = accessor.read_all().await.unwrap();
    assert_eq!(tasks, vec![keep]);
}

#[tokio::test]
async fn remove_missing_task_fails_with_item_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);

    let err = accessor
        .remove_task(&TaskId::from("nonexistent"))
        .await
        .unwrap_err();
    assert!(matches!(err, TaskStoreError::ItemNotFound(id) if id.as_str() == "nonexistent"));
}

#[tokio::test]
async fn removing_twice_reports_second_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);
    let task = TaskRecord::new("once", "");
    accessor.save(&task).await.unwrap();

    accessor.remove_task(&task.id).await.unwrap();
    let err = accessor.remove_task(&task.id).await.unwrap_err();
    assert!(matches!(err, TaskStoreError::ItemNotFound(_)));
}

#[tokio::test]
async fn data_survives_new_accessor_instances() {
    let dir = tempfile::tempdir().unwrap();
    let task = TaskRecord::new("persisted", "across handles");
    accessor_in(&dir).save(&task).await.unwrap();

    let loaded = accessor_in(&dir).read_all().await.unwrap();
    assert_eq!(loaded, vec![task]);
}

#[tokio::test]
async fn unopenable_location_fails_with_database_access_failure() {
    let dir = tempfile::tempdir().unwrap();
    let provider = DefaultConfigurationProvider::new(dir.path().join("missing/dir/tasks.sqlite3"));
    let accessor = SqliteTaskDataAccessor::new(Arc::new(provider));

    let read_err = accessor.read_all().await.unwrap_err();
    assert!(matches!(read_err, TaskStoreError::DatabaseAccessFailure(_)));

    let save_err = accessor.save(&TaskRecord::new("x", "")).await.unwrap_err();
    assert!(matches!(save_err, TaskStoreError::DatabaseAccessFailure(_)));

    let remove_err = accessor.remove_task(&TaskId::from("x")).await.unwrap_err();
    assert!(matches!(remove_err, TaskStoreError::DatabaseAccessFailure(_)));
}

#[tokio::test]
async fn corrupt_file_fails_with_database_access_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    std::fs::write(&path, vec![0x5a; 4096]).unwrap();
    let accessor = SqliteTaskDataAccessor::new(Arc::new(DefaultConfigurationProvider::new(path)));

    let err = accessor.get_task_by_id(&TaskId::from("A")).await.unwrap_err();
    assert!(matches!(err, TaskStoreError::DatabaseAccessFailure(_)));
}

#[tokio::test]
async fn newer_schema_on_disk_fails_with_database_access_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let newer = StoreConfiguration::new(&path).with_schema_version(SCHEMA_VERSION + 5);
    SqliteTaskDataAccessor::new(Arc::new(newer))
        .save(&TaskRecord::new("from the future", ""))
        .await
        .unwrap();

    let current = SqliteTaskDataAccessor::new(Arc::new(StoreConfiguration::new(&path)));
    let err = current.read_all().await.unwrap_err();
    assert!(matches!(err, TaskStoreError::DatabaseAccessFailure(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_all_persist() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = accessor_in(&dir);
    // Create the schema before racing writers against it.
    accessor.read_all().await.unwrap();

    let tasks: Vec<TaskRecord> = (0..16)
        .map(|index| TaskRecord::new(format!("task {index}"), ""))
        .collect();
    let results = futures::future::join_all(tasks.iter().map(|task| accessor.save(task))).await;
    assert!(results.iter().all(Result::is_ok));

    let stored: HashSet<TaskId> = accessor
        .read_all()
        .await
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    let expected: HashSet<TaskId> = tasks.into_iter().map(|task| task.id).collect();
    assert_eq!(stored, expected);
}
