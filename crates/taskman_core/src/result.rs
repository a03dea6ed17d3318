//! Tagged operation results for UI consumers.
//!
//! # Responsibility
//! - Absorb operation errors into `OperationResult::Failed` with a
//!   displayable message.
//!
//! # Invariants
//! - `ResultConverter::convert` always yields exactly one result and never
//!   returns the original error.

use crate::messages::ErrorMessageService;
use std::error::Error;
use std::future::Future;
use std::sync::Arc;

/// Outcome of an operation, as seen by a UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult<T> {
    Successful(T),
    Failed { message: String },
}

impl<T> OperationResult<T> {
    pub fn result_value(&self) -> Option<&T> {
        match self {
            Self::Successful(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub fn into_result_value(self) -> Option<T> {
        match self {
            Self::Successful(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    /// Failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Successful(_) => None,
            Self::Failed { message } => Some(message),
        }
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Successful(_))
    }

    pub fn is_failed(&self) -> bool {
        !self.is_successful()
    }
}

/// Converts fallible operations into `OperationResult`s.
#[derive(Clone)]
pub struct ResultConverter {
    messages: Arc<dyn ErrorMessageService>,
}

impl ResultConverter {
    pub fn new(messages: Arc<dyn ErrorMessageService>) -> Self {
        Self { messages }
    }

    /// Awaits `operation` and tags its outcome.
    pub async fn convert<T, E, F>(&self, operation: F) -> OperationResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Error + 'static,
    {
        match operation.await {
            Ok(value) => OperationResult::Successful(value),
            Err(err) => OperationResult::Failed {
                message: self.messages.message_for(&err),
            },
        }
    }
}
