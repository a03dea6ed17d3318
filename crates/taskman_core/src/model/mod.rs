//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by storage, services and presentation.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` generated client-side.

pub mod task;
