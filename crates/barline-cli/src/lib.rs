//! Barline CLI library.
//!
//! Command implementations live here; `main.rs` holds argument
//! definitions and dispatch.

pub mod commands;
