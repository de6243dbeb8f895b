//! Picturebook Runtime: drives a reader with real time.
//!
//! Responsible for environment configuration, tracing initialisation, a
//! clock backed by the tokio timer, the line-command script the headless
//! binary accepts, and the event loop that pumps input and ticks into a
//! [`Reader`](picturebook_reader::application::reader::Reader).

pub mod clock;
pub mod config;
pub mod event_loop;
pub mod script;
pub mod telemetry;
