//! Domain layer for the reader.

pub mod animator;
pub mod commands;
pub mod events;
pub mod gesture;
pub mod navigation;
pub mod registry;
pub mod settings;
