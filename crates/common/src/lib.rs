//! Shared building blocks for the todo API crates: health payload and tracing setup.

pub mod types;
pub mod utils;
