//! Drag-to-flip gesture.
//!
//! A horizontal drag past a small dead zone picks a direction; releasing
//! after enough of the page width has been covered asks for an advance in
//! that direction. While dragging, the page curls proportionally.

use serde::Serialize;

use crate::domain::navigation::Direction;

/// Horizontal travel, in pixels, before a drag picks a direction.
pub const DIRECTION_DEAD_ZONE_PX: f64 = 10.0;

/// Page width assumed when the renderer does not report one.
pub const DEFAULT_PAGE_WIDTH_PX: f64 = 800.0;

/// Visual curl of a page being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageCurl {
    /// Drag progress in `[0, 1]`.
    pub progress: f64,
    /// Rotation around the spine, in degrees.
    pub rotate_y: f64,
    /// Perspective tilt from vertical travel, in degrees.
    pub rotate_x: f64,
    /// Page scale.
    pub scale: f64,
    /// Shadow intensity.
    pub shadow: f64,
    /// Corner curl, in degrees.
    pub corner_curl: f64,
}

impl PageCurl {
    /// Curl for a drag of `(dx, dy)` pixels over a page `width` wide.
    #[must_use]
    pub fn from_drag(dx: f64, dy: f64, width: f64) -> Self {
        let width = if width > 0.0 { width } else { DEFAULT_PAGE_WIDTH_PX };
        let progress = (dx.abs() / width).clamp(0.0, 1.0);
        Self {
            progress,
            rotate_y: progress * 180.0,
            rotate_x: dy / 500.0 * 5.0,
            scale: 1.0 - progress * 0.05,
            shadow: (progress * std::f64::consts::PI).sin() * 0.5,
            corner_curl: progress * 30.0,
        }
    }

    /// A flat page.
    #[must_use]
    pub fn flat() -> Self {
        Self::from_drag(0.0, 0.0, DEFAULT_PAGE_WIDTH_PX)
    }
}

/// State of one pointer drag across the page.
#[derive(Debug, Clone)]
pub struct DragFlip {
    threshold: f64,
    page_width: f64,
    origin: Option<(f64, f64)>,
    offset: (f64, f64),
    direction: Option<Direction>,
}

impl DragFlip {
    /// A drag that flips once `threshold` of `page_width` is covered.
    #[must_use]
    pub fn new(threshold: f64, page_width: f64) -> Self {
        Self {
            threshold,
            page_width: if page_width > 0.0 {
                page_width
            } else {
                DEFAULT_PAGE_WIDTH_PX
            },
            origin: None,
            offset: (0.0, 0.0),
            direction: None,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    /// Direction picked so far.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Pointer travel since the drag began.
    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Updates the page width, e.g. after a resize.
    pub fn set_page_width(&mut self, page_width: f64) {
        if page_width > 0.0 {
            self.page_width = page_width;
        }
    }

    /// Pointer down at `(x, y)`.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
        self.offset = (0.0, 0.0);
        self.direction = None;
    }

    /// Pointer moved to `(x, y)`. A direction is only picked if a page
    /// exists that way. Leftward travel turns forward.
    pub fn move_to(&mut self, x: f64, y: f64, can_go_next: bool, can_go_prev: bool) {
        let Some((ox, oy)) = self.origin else {
            return;
        };
        let dx = x - ox;
        let dy = y - oy;
        if dx < -DIRECTION_DEAD_ZONE_PX && can_go_next {
            self.direction = Some(Direction::Forward);
        } else if dx > DIRECTION_DEAD_ZONE_PX && can_go_prev {
            self.direction = Some(Direction::Backward);
        }
        self.offset = (dx, dy);
    }

    /// Pointer released. Returns the direction to advance in if the drag
    /// covered enough of the page. The gesture resets either way.
    pub fn release(&mut self) -> Option<Direction> {
        self.origin?;
        let covered = self.offset.0.abs() / self.page_width;
        let flip = self.direction.filter(|_| covered >= self.threshold);
        self.origin = None;
        self.offset = (0.0, 0.0);
        self.direction = None;
        flip
    }

    /// Current curl of the dragged page.
    #[must_use]
    pub fn curl(&self) -> PageCurl {
        PageCurl::from_drag(self.offset.0, self.offset.1, self.page_width)
    }
}
