//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate accessor calls into use-case level APIs.
//! - Keep presentation/CLI layers decoupled from storage details.

pub mod error_logging;
pub mod task_service;
