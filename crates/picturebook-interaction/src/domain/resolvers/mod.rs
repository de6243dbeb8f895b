//! The interaction resolver family.

mod reel;
mod tap;
mod timed;
mod toggle;
mod two_stage;
mod wipe;

pub use reel::{FilmReel, reel_blur, reel_row_interval_ms, reel_speed};
pub use tap::TapElement;
pub use timed::TimedResolve;
pub use toggle::Toggle;
pub use two_stage::{Stage, TwoStageTap};
pub use wipe::ThresholdWipe;
