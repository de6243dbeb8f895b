//! Domain layer for picture book content.

pub mod aggregates;
pub mod interactions;
pub mod pages;
pub mod raw;
pub mod tuning;
pub mod validation;
