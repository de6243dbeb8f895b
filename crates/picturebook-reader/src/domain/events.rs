//! Domain events published by the reader.

use picturebook_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use crate::domain::navigation::{Direction, TransitionKind};

/// Emitted when an accepted page change starts animating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionStarted {
    /// Page being left.
    pub from: usize,
    /// Page being turned to.
    pub to: usize,
    /// Turn direction.
    pub direction: Direction,
    /// Advance or jump.
    pub kind: TransitionKind,
}

/// Emitted when a page change is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChanged {
    /// Previous page.
    pub from: usize,
    /// New current page.
    pub to: usize,
    /// Turn direction.
    pub direction: Direction,
}

/// Emitted when a multi-frame page shows a different frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameChanged {
    /// The page.
    pub page: usize,
    /// Frame shown before.
    pub from: usize,
    /// Frame shown now.
    pub to: usize,
}

/// Emitted when an interaction on the current page resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResolved {
    /// The page.
    pub page: usize,
    /// The frame, for multi-frame pages.
    pub frame: Option<usize>,
}

/// Emitted the first time a page becomes complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCompleted {
    /// The page.
    pub page: usize,
}

/// Event type identifier for [`TransitionStarted`].
pub const TRANSITION_STARTED_EVENT_TYPE: &str = "reader.transition_started";

/// Event type identifier for [`PageChanged`].
pub const PAGE_CHANGED_EVENT_TYPE: &str = "reader.page_changed";

/// Event type identifier for [`FrameChanged`].
pub const FRAME_CHANGED_EVENT_TYPE: &str = "reader.frame_changed";

/// Event type identifier for [`InteractionResolved`].
pub const INTERACTION_RESOLVED_EVENT_TYPE: &str = "reader.interaction_resolved";

/// Event type identifier for [`PageCompleted`].
pub const PAGE_COMPLETED_EVENT_TYPE: &str = "reader.page_completed";

/// Event payload variants for the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReaderEventKind {
    /// A page turn has started.
    TransitionStarted(TransitionStarted),
    /// A page turn has been committed.
    PageChanged(PageChanged),
    /// A different frame is on screen.
    FrameChanged(FrameChanged),
    /// An interaction has resolved.
    InteractionResolved(InteractionResolved),
    /// A page has become complete.
    PageCompleted(PageCompleted),
}

impl ReaderEventKind {
    /// Event type identifier of this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TransitionStarted(_) => TRANSITION_STARTED_EVENT_TYPE,
            Self::PageChanged(_) => PAGE_CHANGED_EVENT_TYPE,
            Self::FrameChanged(_) => FRAME_CHANGED_EVENT_TYPE,
            Self::InteractionResolved(_) => INTERACTION_RESOLVED_EVENT_TYPE,
            Self::PageCompleted(_) => PAGE_COMPLETED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the reader.
#[derive(Debug, Clone)]
pub struct ReaderEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ReaderEventKind,
}

impl DomainEvent for ReaderEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
