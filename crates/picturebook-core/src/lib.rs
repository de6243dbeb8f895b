//! Picturebook Core: shared abstractions.
//!
//! This crate defines the clock, timer scheduling, event envelope and error
//! types that every other picturebook crate builds on. It contains no
//! presentation or I/O code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod scheduler;
