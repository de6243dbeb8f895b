//! Picturebook Interaction: per-page progression.
//!
//! Responsible for the interaction resolvers (tap, wipe, two-stage tap,
//! toggle, timed, film reel), the frame cursor of multi-frame pages, and the
//! page runtime that wires a mounted page's resolver and cursor together.
//!
//! Nothing in this crate owns a timer. Resolvers and the cursor return
//! requests to schedule; the owner of the clock delivers them back.

pub mod application;
pub mod domain;
