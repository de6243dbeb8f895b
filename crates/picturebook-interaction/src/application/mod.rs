//! Application layer for page interactions.

pub mod page_runtime;
