//! Domain records shared across the screen components.

pub mod student;
pub mod task;
pub mod weather;
