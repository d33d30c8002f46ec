//! FFI surface exposing `dayboard_core` to the mobile UI.

pub mod api;
