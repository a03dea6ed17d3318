//! Toolkit-free presentation models for task screens.
//!
//! # Responsibility
//! - Turn service results into display-ready state.
//! - Route every failure through the result converter so callers only match
//!   on variants.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod task_editor;
pub mod task_list;

/// Error to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAlert {
    pub title: String,
    pub message: String,
}

impl ErrorAlert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl Display for ErrorAlert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

impl Error for ErrorAlert {}
