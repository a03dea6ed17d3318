//! Error-observing decorator for async operations.
//!
//! # Responsibility
//! - Record failures of wrapped operations through an `ErrorSink`.
//! - Hand results back exactly as the wrapped operation produced them.
//!
//! # Invariants
//! - Success values pass through untouched.
//! - Each failure is recorded exactly once, then the same error is returned.
//! - No retry, no delay, no swallowing.

use crate::logging::single_line;
use log::error;
use std::error::Error;
use std::future::Future;
use std::sync::Arc;

const MAX_ERROR_CHARS: usize = 240;

/// Side channel receiving `(error, component, operation)` records.
pub trait ErrorSink: Send + Sync {
    fn record(&self, error: &dyn Error, component: &str, operation: &str);
}

/// Sink writing one `operation_failed` line to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn record(&self, err: &dyn Error, component: &str, operation: &str) {
        error!(
            "event=operation_failed module={} operation={} status=error error={}",
            component,
            operation,
            single_line(&err.to_string(), MAX_ERROR_CHARS)
        );
    }
}

/// Wraps operations so their errors reach an `ErrorSink`.
#[derive(Clone)]
pub struct ErrorLogger {
    sink: Arc<dyn ErrorSink>,
}

impl ErrorLogger {
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        Self { sink }
    }

    /// Logger backed by [`LogErrorSink`].
    pub fn to_log() -> Self {
        Self::new(Arc::new(LogErrorSink))
    }

    /// Awaits `operation`, recording its error under `component`/`operation_name`.
    pub async fn log_errors<T, E, F>(
        &self,
        operation: F,
        component: &str,
        operation_name: &str,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Error,
    {
        operation
            .await
            .inspect_err(|err| self.sink.record(err, component, operation_name))
    }
}
