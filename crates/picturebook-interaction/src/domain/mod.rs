//! Domain layer for page interactions.

pub mod coverage;
pub mod cursor;
pub mod input;
pub mod resolver;
pub mod resolvers;
