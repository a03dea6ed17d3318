//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the task data-access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`ItemNotFound`) in addition to
//!   storage transport errors.

pub mod task_accessor;
