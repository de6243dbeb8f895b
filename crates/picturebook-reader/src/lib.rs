//! Picturebook Reader: the progression engine's public face.
//!
//! Responsible for the page completion registry, the navigation controller
//! and its gating rules, the page-turn animator, the drag-to-flip gesture,
//! and the [`Reader`](application::reader::Reader) facade that presentation
//! layers talk to.

pub mod application;
pub mod domain;
