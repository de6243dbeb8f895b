//! Picturebook Content: the book model.
//!
//! Responsible for ingesting authored YAML/JSON books, validating them,
//! compiling them into an immutable [`Book`](domain::aggregates::Book),
//! versioning/hashing, and read-only views such as the transcript.

pub mod application;
pub mod domain;
