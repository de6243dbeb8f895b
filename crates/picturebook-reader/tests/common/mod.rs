//! Shared helpers for reader integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use picturebook_content::domain::aggregates::Book;
use picturebook_core::clock::Clock;
use picturebook_core::event::DomainEvent;
use picturebook_reader::application::reader::Reader;
use picturebook_reader::domain::events::ReaderEvent;
use picturebook_test_support::{ManualClock, RecordingSink, fixture_time, winter_cabin};

/// Page indices in the winter-cabin fixture.
pub const LIGHT_SWITCH_PAGE: usize = 2;
pub const COSMIC_FLOAT_PAGE: usize = 4;
pub const FOG_PAGE: usize = 7;
pub const REEL_PAGE: usize = 9;
pub const FIREPLACE_PAGE: usize = 12;
pub const LANTERN_PAGE: usize = 14;
pub const CANDLE_PAGE: usize = 16;

/// A reader on a manual clock with every event recorded.
pub struct Session {
    pub reader: Reader,
    pub clock: ManualClock,
    pub events: RecordingSink<ReaderEvent>,
}

impl Session {
    /// Opens the winter-cabin fixture on its cover.
    pub fn open() -> Self {
        Self::open_book(winter_cabin())
    }

    /// Opens `book` on its start page.
    pub fn open_book(book: Book) -> Self {
        let clock = ManualClock::new(fixture_time());
        let shared: Arc<dyn Clock> = Arc::new(clock.clone());
        let mut reader = Reader::new(Arc::new(book), shared);
        let events = RecordingSink::new();
        let sink = events.clone();
        reader.subscribe(move |event: &ReaderEvent| sink.push(event.clone()));
        Self {
            reader,
            clock,
            events,
        }
    }

    /// Moves the clock forward and delivers whatever came due.
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.reader.tick();
    }

    /// Lets the page turn in flight finish.
    pub fn finish_turn(&mut self) {
        let settle = self.reader.settings().flip_curve.settle_ms();
        self.advance(settle);
        assert!(!self.reader.is_transitioning(), "turn did not finish");
    }

    /// Jumps to `index` and waits for the turn to finish.
    pub fn turn_to(&mut self, index: usize) {
        self.reader
            .request_jump(index)
            .unwrap_or_else(|reason| panic!("jump to {index} rejected: {reason}"));
        self.finish_turn();
        assert_eq!(self.reader.current_index(), index);
        self.events.drain();
    }

    /// Event types recorded since the last drain.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.items().iter().map(DomainEvent::event_type).collect()
    }
}
