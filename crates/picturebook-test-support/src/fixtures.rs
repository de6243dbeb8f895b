//! Book fixtures.

use chrono::{DateTime, TimeZone, Utc};
use picturebook_content::application::command_handlers::load_book_from_yaml;
use picturebook_content::domain::aggregates::Book;

const WINTER_CABIN: &str = include_str!("../fixtures/winter-cabin.yaml");

const MINIMAL: &str = r"
meta:
  title: Minimal
pages:
  - { id: cover, type: cover, text: Minimal, background: /cover.png }
  - { id: page-1, type: story, text: One, background: /1.png }
  - { id: page-2, type: story, text: Two, background: /2.png }
";

/// A fixed instant every test can start its clock from.
///
/// # Panics
///
/// Never in practice; the date is a valid constant.
#[must_use]
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
        .single()
        .expect("valid fixture time")
}

/// An 18-page book exercising every page variant and interaction.
///
/// | index | page |
/// |---|---|
/// | 0 | cover |
/// | 2 | story with `light-switch` |
/// | 4 | story with `cosmic-float` |
/// | 7 | multi-frame: `fog-wipe`, plain |
/// | 9 | transition, 10 s |
/// | 12 | multi-frame: `fireplace`, plain |
/// | 14 | multi-frame: `tap-element`, `tap-element`, plain |
/// | 16 | multi-frame: `tap-element`, `tap-element` |
/// | 17 | closing story page |
///
/// Every other page is a plain story page.
///
/// # Panics
///
/// Panics if the bundled fixture stops compiling.
#[must_use]
pub fn winter_cabin() -> Book {
    load_book_from_yaml(WINTER_CABIN).expect("winter-cabin fixture compiles")
}

/// A three-page book with no interactions.
///
/// # Panics
///
/// Panics if the fixture stops compiling.
#[must_use]
pub fn minimal_book() -> Book {
    load_book_from_yaml(MINIMAL).expect("minimal fixture compiles")
}
