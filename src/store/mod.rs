//! Task persistence layer
//!
//! All task records live in SQLite and every access goes through
//! [`TaskStore`]. Store failures are tagged so the HTTP layer can map
//! validation, missing-record, and backend errors to distinct statuses.

mod models;
mod task_store;

pub use models::{NewTask, Task, TaskChanges};
pub use task_store::{StoreError, TaskStore};

#[cfg(test)]
mod store_test;
