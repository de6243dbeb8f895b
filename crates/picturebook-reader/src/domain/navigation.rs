//! Navigation controller.
//!
//! Owns the current page index and the last navigation direction, decides
//! whether a requested page change is legal, and commits it only once the
//! page-turn animation has finished. While a transition is in flight every
//! new request is rejected; nothing is queued.

use picturebook_content::domain::tuning::JumpPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards the end of the book.
    Forward,
    /// Towards the cover.
    Backward,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// The page one step from `from`, if it exists in a book of
    /// `page_count` pages.
    #[must_use]
    pub fn step(self, from: usize, page_count: usize) -> Option<usize> {
        let target = match self {
            Self::Forward => from.checked_add(1)?,
            Self::Backward => from.checked_sub(1)?,
        };
        (target < page_count).then_some(target)
    }
}

/// How a transition was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// One page forward or back.
    Advance,
    /// Directly to a page.
    Jump,
}

/// A legal page change waiting for its animation to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingTransition {
    /// Page being left.
    pub from: usize,
    /// Page being turned to.
    pub to: usize,
    /// Turn direction.
    pub direction: Direction,
    /// How it was requested.
    pub kind: TransitionKind,
}

/// Why a navigation request was refused. Refusals are ordinary outcomes:
/// nothing changes, and retrying later is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The target lies outside the book. `None` means before the first page.
    #[error("target {target:?} is outside a book of {page_count} pages")]
    OutOfBounds {
        /// Requested page.
        target: Option<usize>,
        /// Number of pages.
        page_count: usize,
    },
    /// The target is the current page.
    #[error("already on page {0}")]
    SamePage(usize),
    /// A multi-frame page on the way is not complete.
    #[error("page {page} is not complete")]
    Incomplete {
        /// The gating page.
        page: usize,
    },
    /// A page turn is already in progress.
    #[error("a page turn is in progress")]
    Busy,
}

/// Navigation state machine.
#[derive(Debug, Clone)]
pub struct NavigationController {
    page_count: usize,
    current: usize,
    last_direction: Option<Direction>,
    pending: Option<PendingTransition>,
}

impl NavigationController {
    /// Starts idle on `start`, clamped into the book.
    #[must_use]
    pub fn new(page_count: usize, start: usize) -> Self {
        Self {
            page_count,
            current: start.min(page_count.saturating_sub(1)),
            last_direction: None,
            pending: None,
        }
    }

    /// Current page index.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Direction of the last committed page change.
    #[must_use]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// `+1`, `-1`, or `0` before any page change.
    #[must_use]
    pub fn last_direction_sign(&self) -> i8 {
        self.last_direction.map_or(0, Direction::sign)
    }

    /// The transition in flight, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests a one-page move.
    ///
    /// `is_blocked` reports whether a page gates forward navigation.
    ///
    /// # Errors
    ///
    /// Returns a `Rejection` if a transition is in flight, the target is
    /// outside the book, or the move is forward from a blocked page.
    pub fn request_advance(
        &mut self,
        direction: Direction,
        is_blocked: impl Fn(usize) -> bool,
    ) -> Result<PendingTransition, Rejection> {
        if self.pending.is_some() {
            return Err(Rejection::Busy);
        }
        let Some(to) = direction.step(self.current, self.page_count) else {
            return Err(Rejection::OutOfBounds {
                target: match direction {
                    Direction::Forward => Some(self.current.saturating_add(1)),
                    Direction::Backward => None,
                },
                page_count: self.page_count,
            });
        };
        if direction == Direction::Forward && is_blocked(self.current) {
            return Err(Rejection::Incomplete { page: self.current });
        }
        Ok(self.begin(to, direction, TransitionKind::Advance))
    }

    /// Requests a direct move to `target`, gated according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns a `Rejection` if a transition is in flight, the target is
    /// outside the book or already current, or `policy` finds an incomplete
    /// page in the way of a forward jump.
    pub fn request_jump(
        &mut self,
        target: usize,
        policy: JumpPolicy,
        is_blocked: impl Fn(usize) -> bool,
    ) -> Result<PendingTransition, Rejection> {
        if self.pending.is_some() {
            return Err(Rejection::Busy);
        }
        if target >= self.page_count {
            return Err(Rejection::OutOfBounds {
                target: Some(target),
                page_count: self.page_count,
            });
        }
        if target == self.current {
            return Err(Rejection::SamePage(target));
        }
        let direction = if target > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        if direction == Direction::Forward {
            let gate = match policy {
                JumpPolicy::Unrestricted => None,
                JumpPolicy::GateCurrent => Some(self.current).filter(|&p| is_blocked(p)),
                JumpPolicy::GateIntermediate => (self.current..target).find(|&p| is_blocked(p)),
            };
            if let Some(page) = gate {
                return Err(Rejection::Incomplete { page });
            }
        }
        Ok(self.begin(target, direction, TransitionKind::Jump))
    }

    /// Commits the transition in flight once its animation has finished.
    pub fn commit(&mut self) -> Option<PendingTransition> {
        let pending = self.pending.take()?;
        self.current = pending.to;
        self.last_direction = Some(pending.direction);
        tracing::info!(
            from = pending.from,
            page = pending.to,
            direction = ?pending.direction,
            "page committed"
        );
        Some(pending)
    }

    fn begin(&mut self, to: usize, direction: Direction, kind: TransitionKind) -> PendingTransition {
        let pending = PendingTransition {
            from: self.current,
            to,
            direction,
            kind,
        };
        self.pending = Some(pending);
        tracing::debug!(from = pending.from, to, ?direction, ?kind, "transition started");
        pending
    }
}
