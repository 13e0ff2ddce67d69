//! Command implementations for the Barline CLI.
//!
//! Each module exposes a `run` function returning the process exit code;
//! `main.rs` dispatches into them.

pub mod build;
pub mod count;
pub mod doctor;
pub mod generate;
pub mod generate_all;
pub mod lyrics;
pub mod template;
pub mod validate;
pub mod validate_all;
pub mod validate_section;
pub mod verify;
