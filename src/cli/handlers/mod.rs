//! CLI command handlers.

pub mod status;
