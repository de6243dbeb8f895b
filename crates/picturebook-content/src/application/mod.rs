//! Application layer for picture book content.

pub mod command_handlers;
pub mod query_handlers;
