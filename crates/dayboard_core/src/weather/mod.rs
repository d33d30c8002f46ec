//! Weather screen logic: external lookups and the lookup state machine.

pub mod client;
pub mod lookup;
