//! Shared test doubles and fixtures for the picture-book engine.

mod clock;
mod fixtures;
mod recording;

pub use clock::{FixedClock, ManualClock};
pub use fixtures::{fixture_time, minimal_book, winter_cabin};
pub use recording::RecordingSink;
