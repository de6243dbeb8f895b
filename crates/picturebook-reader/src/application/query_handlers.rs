//! Query handlers for the reader.
//!
//! Read-only views the presentation layer renders from.

use picturebook_content::domain::pages::{Page, PageKind, TextAnchor};
use picturebook_interaction::application::page_runtime::PageRuntimeView;
use serde::Serialize;

use crate::application::reader::Reader;
use crate::domain::animator::FlipFrame;
use crate::domain::gesture::PageCurl;
use crate::domain::navigation::PendingTransition;

/// Summary of the page on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    /// Page index.
    pub index: usize,
    /// Page id.
    pub id: String,
    /// Page variant.
    pub kind: &'static str,
    /// Body text.
    pub text: String,
    /// Where the text sits, for pages that place it.
    pub anchor: Option<TextAnchor>,
}

impl PageSummary {
    fn of(index: usize, page: &Page) -> Self {
        let anchor = match &page.kind {
            PageKind::Story { anchor, .. } | PageKind::MultiFrame { anchor, .. } => Some(*anchor),
            PageKind::Cover { .. } | PageKind::Transition { .. } => None,
        };
        Self {
            index,
            id: page.id.clone(),
            kind: page.kind_name(),
            text: page.text.clone(),
            anchor,
        }
    }
}

/// Everything a renderer needs for one frame of the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReaderView {
    /// The page on screen.
    pub page: PageSummary,
    /// Number of pages.
    pub page_count: usize,
    /// `(current + 1) / page_count`.
    pub progress: f64,
    /// Whether the next-page button is enabled.
    pub can_go_next: bool,
    /// Whether the previous-page button is enabled.
    pub can_go_prev: bool,
    /// Whether the page on screen has been completed.
    pub page_complete: bool,
    /// `+1`, `-1`, or `0`.
    pub last_direction: i8,
    /// Page turn in flight.
    pub transition: Option<PendingTransition>,
    /// Visual state of the page turn.
    pub flip: Option<FlipFrame>,
    /// Curl of a page being dragged.
    pub curl: Option<PageCurl>,
    /// Interaction and frame state of the page on screen.
    pub runtime: PageRuntimeView,
    /// Completed pages in ascending order.
    pub completed_pages: Vec<usize>,
}

/// Builds the view of `reader` at its clock's current time.
#[must_use]
pub fn reader_view(reader: &Reader) -> ReaderView {
    let index = reader.current_index();
    ReaderView {
        page: PageSummary::of(index, reader.current_page()),
        page_count: reader.page_count(),
        progress: reader.progress(),
        can_go_next: reader.can_go_next(),
        can_go_prev: reader.can_go_prev(),
        page_complete: reader.is_page_complete(index),
        last_direction: reader.last_direction(),
        transition: reader.pending_transition(),
        flip: reader.flip_frame(),
        curl: reader.page_curl(),
        runtime: reader.page_view(),
        completed_pages: reader.completed_pages(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use picturebook_core::clock::Clock;
    use picturebook_test_support::{ManualClock, fixture_time, winter_cabin};

    use super::*;

    #[test]
    fn test_view_of_a_fresh_reader() {
        // Arrange
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(fixture_time()));
        let book = Arc::new(winter_cabin());
        let reader = Reader::new(Arc::clone(&book), clock);

        // Act
        let view = reader_view(&reader);

        // Assert
        assert_eq!(view.page.index, 0);
        assert_eq!(view.page.kind, "cover");
        assert_eq!(view.page_count, book.page_count());
        assert!(view.can_go_next);
        assert!(!view.can_go_prev);
        assert_eq!(view.last_direction, 0);
        assert!(view.transition.is_none());
        assert!(view.completed_pages.is_empty());
    }

    #[test]
    fn test_view_serializes() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(fixture_time()));
        let reader = Reader::new(Arc::new(winter_cabin()), clock);

        let json = serde_json::to_value(reader_view(&reader)).unwrap();

        assert_eq!(json["page"]["id"], "cover");
        assert_eq!(json["can_go_next"], true);
    }
}
