//! Application layer for the reader.

pub mod command_handlers;
pub mod query_handlers;
pub mod reader;
