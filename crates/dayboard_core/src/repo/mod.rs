//! Persistence contracts for snapshot storage.

pub mod task_repo;
