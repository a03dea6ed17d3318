use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use taskman_core::db::DefaultConfigurationProvider;
use taskman_core::{
    ErrorLogger, ErrorSink, LocalTaskService, SqliteTaskDataAccessor, StoreResult,
    TaskDataAccessor, TaskId, TaskRecord, TaskService, TaskStoreError,
};

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<(String, String, String)>>,
}

impl RecordingSink {
    fn records(&self) -> Vec<(String, String, String)> {
        self.records.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn record(&self, error: &dyn Error, component: &str, operation: &str) {
        self.records.lock().unwrap().push((
            error.to_string(),
            component.to_string(),
            operation.to_string(),
        ));
    }
}

/// Accessor double answering every call with a canned outcome.
#[derive(Default)]
struct StubAccessor {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl StubAccessor {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn outcome<T>(&self, value: T, id: &str) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(TaskStoreError::ItemNotFound(TaskId::from(id)))
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl TaskDataAccessor for StubAccessor {
    async fn read_all(&self) -> StoreResult<Vec<TaskRecord>> {
        self.outcome(vec![TaskRecord::with_id("A", "x", "")], "all")
    }

    async fn get_task_by_id(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>> {
        self.outcome(Some(TaskRecord::with_id(id.clone(), "x", "")), id.as_str())
    }

    async fn save(&self, task: &TaskRecord) -> StoreResult<()> {
        self.outcome((), task.id.as_str())
    }

    async fn remove_task(&self, id: &TaskId) -> StoreResult<()> {
        self.outcome((), id.as_str())
    }
}

fn service_with(accessor: StubAccessor) -> (LocalTaskService<StubAccessor>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let service = LocalTaskService::new(accessor, ErrorLogger::new(sink.clone()));
    (service, sink)
}

#[tokio::test]
async fn successful_calls_pass_through_without_logging() {
    let (service, sink) = service_with(StubAccessor::default());

    let tasks = service.read_all().await.unwrap();
    assert_eq!(tasks, vec![TaskRecord::with_id("A", "x", "")]);
    let task = service.get_task_by_id(&TaskId::from("B")).await.unwrap();
    assert_eq!(task.unwrap().id, TaskId::from("B"));
    service.save(&TaskRecord::new("n", "")).await.unwrap();
    service.remove_task(&TaskId::from("B")).await.unwrap();

    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn failures_are_logged_once_and_returned_unchanged() {
    let (service, sink) = service_with(StubAccessor::failing());

    let err = service.remove_task(&TaskId::from("gone")).await.unwrap_err();
    assert!(matches!(err, TaskStoreError::ItemNotFound(ref id) if id.as_str() == "gone"));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, err.to_string());
    assert_eq!(records[0].1, "local_task_service");
    assert_eq!(records[0].2, "remove_task");
}

#[tokio::test]
async fn each_operation_is_logged_under_its_own_name() {
    let (service, sink) = service_with(StubAccessor::failing());

    assert!(service.read_all().await.is_err());
    assert!(service.get_task_by_id(&TaskId::from("a")).await.is_err());
    assert!(service.save(&TaskRecord::with_id("a", "", "")).await.is_err());

    let operations: Vec<String> = sink.records().into_iter().map(|record| record.2).collect();
    assert_eq!(operations, vec!["read_all", "get_task_by_id", "save"]);
}

#[derive(Debug)]
struct Foreign;

impl Display for Foreign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "foreign failure")
    }
}

impl Error for Foreign {}

#[tokio::test]
async fn logger_is_transparent_for_any_payload_and_error() {
    let sink = Arc::new(RecordingSink::default());
    let logger = ErrorLogger::new(sink.clone());

    let value = logger
        .log_errors(async { Ok::<_, Foreign>(42_u64) }, "test", "ok")
        .await
        .unwrap();
    assert_eq!(value, 42);

    let result = logger
        .log_errors(async { Err::<u64, _>(Foreign) }, "test", "fails")
        .await;
    assert!(result.is_err());
    assert_eq!(
        sink.records(),
        vec![(
            "foreign failure".to_string(),
            "test".to_string(),
            "fails".to_string()
        )]
    );
}

#[tokio::test]
async fn service_forwards_every_call_to_accessor() {
    let calls = Arc::new(AtomicUsize::new(0));
    let accessor = StubAccessor {
        fail: false,
        calls: Arc::clone(&calls),
    };
    let (service, _sink) = service_with(accessor);

    service.read_all().await.unwrap();
    service.read_all().await.unwrap();
    service.remove_task(&TaskId::from("x")).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn service_over_sqlite_logs_missing_delete() {
    let dir = tempfile::tempdir().unwrap();
    let accessor = SqliteTaskDataAccessor::new(Arc::new(DefaultConfigurationProvider::new(
        dir.path().join("tasks.sqlite3"),
    )));
    let sink = Arc::new(RecordingSink::default());
    let service = LocalTaskService::new(accessor, ErrorLogger::new(sink.clone()));

    let task = TaskRecord::new("Buy food", "");
    service.save(&task).await.unwrap();
    assert_eq!(service.read_all().await.unwrap(), vec![task.clone()]);

    service.remove_task(&task.id).await.unwrap();
    let err = service.remove_task(&task.id).await.unwrap_err();
    assert!(matches!(err, TaskStoreError::ItemNotFound(_)));
    assert_eq!(sink.records().len(), 1);
}
