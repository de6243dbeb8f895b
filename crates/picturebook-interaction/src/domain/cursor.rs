//! Frame cursor for multi-frame pages.
//!
//! One cursor exists per mounted multi-frame page and is rebuilt whenever
//! the page is mounted again, so a revisit always starts at frame 0. Timer
//! requests carry the cursor's epoch, which moves on every frame change;
//! a timer from an earlier epoch is stale and ignored.

use picturebook_content::domain::pages::Frame;
use picturebook_content::domain::tuning::InteractionTuning;
use serde::Serialize;

/// Where the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "frame", rename_all = "snake_case")]
pub enum CursorState {
    /// Showing a frame, waiting on it.
    Viewing(usize),
    /// The last frame is resolved; page completion is pending.
    Resolving,
    /// The page is complete.
    Done,
}

/// Timers the cursor may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorTimer {
    /// A last frame without interaction completes the page.
    AutoComplete {
        /// Epoch the timer was requested in.
        epoch: u64,
    },
    /// A resolved last frame completes the page.
    CompletePage {
        /// Epoch the timer was requested in.
        epoch: u64,
    },
}

/// Something the cursor wants to happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSignal {
    /// Deliver `timer` back after `after_ms` milliseconds.
    Schedule {
        /// Timer to deliver.
        timer: CursorTimer,
        /// Delay in milliseconds.
        after_ms: u64,
    },
    /// The shown frame changed.
    FrameChanged {
        /// Frame shown before.
        from: usize,
        /// Frame shown now.
        to: usize,
    },
    /// The page is complete. Emitted at most once.
    PageComplete,
}

/// Frame state machine of one multi-frame page instance.
#[derive(Debug, Clone)]
pub struct FrameCursor {
    has_interaction: Vec<bool>,
    state: CursorState,
    interaction_resolved: bool,
    epoch: u64,
    auto_complete_ms: u64,
    frame_complete_ms: u64,
}

impl FrameCursor {
    /// A cursor on frame 0.
    #[must_use]
    pub fn new(frames: &[Frame], tuning: &InteractionTuning) -> Self {
        Self {
            has_interaction: frames.iter().map(|f| f.interaction.is_some()).collect(),
            state: CursorState::Viewing(0),
            interaction_resolved: false,
            epoch: 0,
            auto_complete_ms: tuning.last_frame_complete_ms,
            frame_complete_ms: tuning.frame_complete_ms,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Index of the frame on screen.
    #[must_use]
    pub fn current_frame(&self) -> usize {
        match self.state {
            CursorState::Viewing(index) => index,
            CursorState::Resolving | CursorState::Done => self.last_frame(),
        }
    }

    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.has_interaction.len()
    }

    /// Whether the current frame's interaction has resolved.
    #[must_use]
    pub fn interaction_resolved(&self) -> bool {
        self.interaction_resolved
    }

    /// Whether the page is complete.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }

    /// Resets to frame 0 and evaluates it.
    ///
    /// `suppress_auto` holds back the last-frame auto-complete while an
    /// earlier interaction is still attached.
    pub fn enter(&mut self, suppress_auto: bool) -> Vec<CursorSignal> {
        self.state = CursorState::Viewing(0);
        self.interaction_resolved = false;
        self.epoch += 1;
        self.evaluate(suppress_auto)
    }

    /// The current frame's interaction resolved.
    pub fn on_resolved(&mut self) -> Vec<CursorSignal> {
        let CursorState::Viewing(index) = self.state else {
            return Vec::new();
        };
        self.interaction_resolved = true;
        if index == self.last_frame() {
            self.state = CursorState::Resolving;
            self.epoch += 1;
            tracing::debug!(frame = index, "last frame resolved");
            return vec![CursorSignal::Schedule {
                timer: CursorTimer::CompletePage { epoch: self.epoch },
                after_ms: self.frame_complete_ms,
            }];
        }
        self.move_to(index, index + 1, false)
    }

    /// An interaction asked to show another frame without resolving.
    ///
    /// Ignored unless the cursor is viewing a frame and `to` is a different,
    /// existing frame.
    pub fn on_frame_change(&mut self, to: usize, suppress_auto: bool) -> Vec<CursorSignal> {
        match self.state {
            CursorState::Viewing(from) if to != from && to < self.frame_count() => {
                self.move_to(from, to, suppress_auto)
            }
            _ => Vec::new(),
        }
    }

    /// Delivers a timer the cursor asked for.
    pub fn on_timer(&mut self, timer: CursorTimer) -> Vec<CursorSignal> {
        match (timer, self.state) {
            (CursorTimer::AutoComplete { epoch }, CursorState::Viewing(index))
                if epoch == self.epoch && index == self.last_frame() =>
            {
                self.finish()
            }
            (CursorTimer::CompletePage { epoch }, CursorState::Resolving)
                if epoch == self.epoch =>
            {
                self.finish()
            }
            _ => Vec::new(),
        }
    }

    fn finish(&mut self) -> Vec<CursorSignal> {
        self.state = CursorState::Done;
        self.interaction_resolved = true;
        vec![CursorSignal::PageComplete]
    }

    fn move_to(&mut self, from: usize, to: usize, suppress_auto: bool) -> Vec<CursorSignal> {
        self.state = CursorState::Viewing(to);
        self.interaction_resolved = false;
        self.epoch += 1;
        tracing::debug!(from, to, "frame changed");
        let mut signals = vec![CursorSignal::FrameChanged { from, to }];
        signals.extend(self.evaluate(suppress_auto));
        signals
    }

    fn evaluate(&self, suppress_auto: bool) -> Vec<CursorSignal> {
        let index = self.current_frame();
        let plain_last = index == self.last_frame()
            && !self.has_interaction.get(index).copied().unwrap_or(true);
        if plain_last && !suppress_auto {
            vec![CursorSignal::Schedule {
                timer: CursorTimer::AutoComplete { epoch: self.epoch },
                after_ms: self.auto_complete_ms,
            }]
        } else {
            Vec::new()
        }
    }

    fn last_frame(&self) -> usize {
        self.has_interaction.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use picturebook_content::domain::interactions::{InteractionKind, InteractionSpec};
    use picturebook_content::domain::pages::AssetRef;

    use super::*;

    fn frames(interactions: &[Option<InteractionKind>]) -> Vec<Frame> {
        interactions
            .iter()
            .enumerate()
            .map(|(i, kind)| Frame {
                image: AssetRef::new(format!("/{i}.png")),
                interaction: kind.map(InteractionSpec::new),
            })
            .collect()
    }

    fn cursor(interactions: &[Option<InteractionKind>]) -> FrameCursor {
        FrameCursor::new(&frames(interactions), &InteractionTuning::default())
    }

    #[test]
    fn test_single_plain_frame_schedules_auto_complete() {
        // Arrange
        let mut cursor = cursor(&[None]);

        // Act
        let entered = cursor.enter(false);
        let CursorSignal::Schedule { timer, after_ms } = entered[0] else {
            panic!("expected a schedule, got {entered:?}");
        };
        let completed = cursor.on_timer(timer);

        // Assert
        assert_eq!(after_ms, 800);
        assert_eq!(completed, vec![CursorSignal::PageComplete]);
        assert!(cursor.is_done());
    }

    #[test]
    fn test_resolving_middle_frame_advances_and_resets_flag() {
        // Arrange
        let tap = Some(InteractionKind::TapElement);
        let mut cursor = cursor(&[tap, tap, None]);
        cursor.enter(false);

        // Act
        let signals = cursor.on_resolved();

        // Assert
        assert_eq!(signals, vec![CursorSignal::FrameChanged { from: 0, to: 1 }]);
        assert_eq!(cursor.state(), CursorState::Viewing(1));
        assert!(!cursor.interaction_resolved());
    }

    #[test]
    fn test_resolving_last_frame_completes_after_delay() {
        // Arrange
        let mut cursor = cursor(&[Some(InteractionKind::TapElement)]);
        cursor.enter(false);

        // Act
        let signals = cursor.on_resolved();
        let CursorSignal::Schedule { timer, after_ms } = signals[0] else {
            panic!("expected a schedule, got {signals:?}");
        };
        let state_while_pending = cursor.state();
        let completed = cursor.on_timer(timer);

        // Assert
        assert_eq!(after_ms, 500);
        assert_eq!(state_while_pending, CursorState::Resolving);
        assert_eq!(completed, vec![CursorSignal::PageComplete]);
        assert!(cursor.on_resolved().is_empty());
    }

    #[test]
    fn test_frame_change_reaching_plain_last_frame_schedules_auto_complete() {
        // Arrange
        let mut cursor = cursor(&[Some(InteractionKind::FogWipe), None]);
        cursor.enter(false);

        // Act
        let signals = cursor.on_frame_change(1, false);

        // Assert
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0], CursorSignal::FrameChanged { from: 0, to: 1 });
        assert!(matches!(
            signals[1],
            CursorSignal::Schedule {
                timer: CursorTimer::AutoComplete { .. },
                after_ms: 800,
            }
        ));
        assert!(!cursor.interaction_resolved());
    }

    #[test]
    fn test_suppressed_frame_change_schedules_nothing() {
        // Arrange
        let mut cursor = cursor(&[Some(InteractionKind::Fireplace), None]);
        cursor.enter(false);

        // Act
        let signals = cursor.on_frame_change(1, true);

        // Assert
        assert_eq!(signals, vec![CursorSignal::FrameChanged { from: 0, to: 1 }]);
    }

    #[test]
    fn test_timer_from_earlier_frame_is_stale() {
        // Arrange
        let mut cursor = cursor(&[None, None]);
        cursor.enter(false);
        let signals = cursor.on_frame_change(1, false);
        let CursorSignal::Schedule { timer, .. } = signals[1] else {
            panic!("expected a schedule, got {signals:?}");
        };
        cursor.on_frame_change(0, false);
        cursor.on_frame_change(1, true);

        // Act
        let fired = cursor.on_timer(timer);

        // Assert
        assert!(fired.is_empty());
        assert!(!cursor.is_done());
    }

    #[test]
    fn test_out_of_range_frame_change_is_ignored() {
        let mut cursor = cursor(&[None, None]);
        cursor.enter(false);

        assert!(cursor.on_frame_change(5, false).is_empty());
        assert!(cursor.on_frame_change(0, false).is_empty());
        assert_eq!(cursor.current_frame(), 0);
    }
}
