//! Use-case services over the domain models.

pub mod task_service;
