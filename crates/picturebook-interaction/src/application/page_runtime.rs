//! Runtime state of the page on screen.
//!
//! A `PageRuntime` is built when a page is mounted and dropped when the page
//! is left, so nothing survives a revisit. It owns the page's frame cursor
//! and at most one attached resolver, routes input and timer deliveries to
//! them, and reports what happened as [`PageSignal`]s.
//!
//! Every resolver attachment gets a fresh [`AttachmentId`] that is stamped
//! on its timers. When a resolver is detached its id is retired, and any of
//! its timers still in flight are ignored on delivery.

use chrono::{DateTime, Utc};
use picturebook_content::domain::interactions::{InteractionContext, InteractionSpec};
use picturebook_content::domain::pages::{Page, PageKind};
use picturebook_content::domain::tuning::InteractionTuning;
use serde::Serialize;
use thiserror::Error;

use crate::domain::cursor::{CursorSignal, CursorState, CursorTimer, FrameCursor};
use crate::domain::input::InteractionInput;
use crate::domain::resolver::{Effect, Resolver, ResolverSnapshot, ResolverTimer, resolver_for};
use crate::domain::resolvers::FilmReel;

/// Identifies one attachment of a resolver to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AttachmentId(u64);

/// A timer requested by the page runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeTimer {
    /// Requested by an attached resolver.
    Resolver {
        /// Attachment that asked.
        attachment: AttachmentId,
        /// Timer to deliver back.
        timer: ResolverTimer,
    },
    /// Requested by the frame cursor.
    Cursor(CursorTimer),
}

/// Something that happened on the mounted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    /// Deliver `timer` back through [`PageRuntime::handle_timer`] after
    /// `after_ms` milliseconds.
    Schedule {
        /// Timer to deliver.
        timer: RuntimeTimer,
        /// Delay in milliseconds.
        after_ms: u64,
    },
    /// A resolver was detached; its pending timers may be cancelled.
    Detached {
        /// The retired attachment.
        attachment: AttachmentId,
    },
    /// The shown frame changed.
    FrameChanged {
        /// Frame shown before.
        from: usize,
        /// Frame shown now.
        to: usize,
    },
    /// An interaction resolved.
    InteractionResolved {
        /// Frame it resolved on, for multi-frame pages.
        frame: Option<usize>,
    },
    /// The page's gating condition is satisfied. Emitted at most once.
    PageComplete,
}

/// An externally reported signal that does not apply to the page as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StaleSignal {
    /// The page has no interaction to resolve.
    #[error("page has nothing to resolve")]
    NothingToResolve,
    /// The page already completed.
    #[error("page is already complete")]
    AlreadyComplete,
    /// The signal names a frame that is not on screen.
    #[error("frame {requested:?} is not the current frame {current:?}")]
    WrongFrame {
        /// Frame named by the signal.
        requested: Option<usize>,
        /// Frame on screen.
        current: Option<usize>,
    },
}

/// Presentation state of the mounted page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRuntimeView {
    /// Frame on screen, for multi-frame pages.
    pub frame: Option<usize>,
    /// Number of frames, for multi-frame pages.
    pub frame_count: Option<usize>,
    /// Cursor state, for multi-frame pages.
    pub cursor: Option<CursorState>,
    /// Whether the current interaction has resolved.
    pub interaction_resolved: bool,
    /// Name of the attached resolver.
    pub resolver_name: Option<&'static str>,
    /// State of the attached resolver.
    pub resolver: Option<ResolverSnapshot>,
}

#[derive(Debug)]
enum Progression {
    Static,
    Interactive {
        completed: bool,
    },
    Frames {
        cursor: FrameCursor,
        interactions: Vec<Option<InteractionSpec>>,
    },
    Reel {
        completed: bool,
    },
}

#[derive(Debug)]
struct Attached {
    id: AttachmentId,
    frame: Option<usize>,
    resolver: Box<dyn Resolver>,
}

/// Runtime of one mounted page.
#[derive(Debug)]
pub struct PageRuntime {
    page_index: usize,
    progression: Progression,
    attached: Option<Attached>,
    last_attachment: u64,
    tuning: InteractionTuning,
}

impl PageRuntime {
    /// Mounts `page`, attaching its first interaction.
    ///
    /// Returns the runtime and the signals mounting produced, typically the
    /// first timer requests.
    #[must_use]
    pub fn mount(
        page: &Page,
        page_index: usize,
        tuning: &InteractionTuning,
        now: DateTime<Utc>,
    ) -> (Self, Vec<PageSignal>) {
        let progression = match &page.kind {
            PageKind::Story {
                interaction: Some(_),
                ..
            } => Progression::Interactive { completed: false },
            PageKind::MultiFrame { frames, .. } => Progression::Frames {
                cursor: FrameCursor::new(frames, tuning),
                interactions: frames.iter().map(|f| f.interaction.clone()).collect(),
            },
            PageKind::Transition { .. } => Progression::Reel { completed: false },
            PageKind::Cover { .. } | PageKind::Story { .. } => Progression::Static,
        };
        let mut runtime = Self {
            page_index,
            progression,
            attached: None,
            last_attachment: 0,
            tuning: tuning.clone(),
        };
        let mut signals = Vec::new();

        match &page.kind {
            PageKind::Story {
                interaction: Some(spec),
                ..
            } => {
                let resolver = resolver_for(spec, InteractionContext::Page, tuning);
                runtime.attach(resolver, None, now, &mut signals);
            }
            PageKind::MultiFrame { .. } => {
                runtime.attach_frame(0, now, &mut signals);
                let entered = match &mut runtime.progression {
                    Progression::Frames { cursor, .. } => cursor.enter(false),
                    _ => Vec::new(),
                };
                runtime.apply_cursor(entered, now, &mut signals);
            }
            PageKind::Transition {
                total_duration_ms, ..
            } => {
                let reel = FilmReel::new(
                    *total_duration_ms,
                    tuning.reel_natural_ms,
                    tuning.reel_skip_ms,
                );
                runtime.attach(Box::new(reel), None, now, &mut signals);
            }
            PageKind::Cover { .. } | PageKind::Story { .. } => {}
        }

        tracing::debug!(
            page = page_index,
            kind = page.kind_name(),
            resolver = runtime.resolver_name(),
            "page mounted"
        );
        (runtime, signals)
    }

    /// A runtime with nothing to drive, for an index that holds no page.
    #[must_use]
    pub fn unmounted(page_index: usize) -> (Self, Vec<PageSignal>) {
        let runtime = Self {
            page_index,
            progression: Progression::Static,
            attached: None,
            last_attachment: 0,
            tuning: InteractionTuning::default(),
        };
        (runtime, Vec::new())
    }

    /// Index of the mounted page.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Frame on screen, for multi-frame pages.
    #[must_use]
    pub fn current_frame(&self) -> Option<usize> {
        match &self.progression {
            Progression::Frames { cursor, .. } => Some(cursor.current_frame()),
            _ => None,
        }
    }

    /// Cursor state, for multi-frame pages.
    #[must_use]
    pub fn cursor_state(&self) -> Option<CursorState> {
        match &self.progression {
            Progression::Frames { cursor, .. } => Some(cursor.state()),
            _ => None,
        }
    }

    /// Whether the current interaction has resolved.
    #[must_use]
    pub fn interaction_resolved(&self) -> bool {
        match &self.progression {
            Progression::Frames { cursor, .. } => cursor.interaction_resolved(),
            Progression::Interactive { completed } | Progression::Reel { completed } => *completed,
            Progression::Static => false,
        }
    }

    /// Name of the attached resolver.
    #[must_use]
    pub fn resolver_name(&self) -> Option<&'static str> {
        self.attached.as_ref().map(|a| a.resolver.name())
    }

    /// Presentation state of the page at `now`.
    #[must_use]
    pub fn view(&self, now: DateTime<Utc>) -> PageRuntimeView {
        let (frame_count, cursor) = match &self.progression {
            Progression::Frames { cursor, .. } => (Some(cursor.frame_count()), Some(cursor.state())),
            _ => (None, None),
        };
        PageRuntimeView {
            frame: self.current_frame(),
            frame_count,
            cursor,
            interaction_resolved: self.interaction_resolved(),
            resolver_name: self.resolver_name(),
            resolver: self.attached.as_ref().map(|a| a.resolver.snapshot(now)),
        }
    }

    /// Routes one input event to the attached resolver.
    pub fn handle_input(&mut self, input: &InteractionInput, now: DateTime<Utc>) -> Vec<PageSignal> {
        let mut signals = Vec::new();
        let Some(attached) = self.attached.as_mut() else {
            return signals;
        };
        let id = attached.id;
        let effects = attached.resolver.handle_input(input, now);
        self.apply_effects(id, effects, now, &mut signals);
        signals
    }

    /// Delivers a timer this runtime asked for. Timers of detached
    /// resolvers and earlier cursor epochs are ignored.
    pub fn handle_timer(&mut self, timer: RuntimeTimer, now: DateTime<Utc>) -> Vec<PageSignal> {
        let mut signals = Vec::new();
        match timer {
            RuntimeTimer::Resolver { attachment, timer } => match self.attached.as_mut() {
                Some(attached) if attached.id == attachment => {
                    let effects = attached.resolver.handle_timer(timer, now);
                    self.apply_effects(attachment, effects, now, &mut signals);
                }
                _ => {
                    tracing::debug!(page = self.page_index, ?timer, "stale resolver timer ignored");
                }
            },
            RuntimeTimer::Cursor(timer) => {
                let cursor_signals = match &mut self.progression {
                    Progression::Frames { cursor, .. } => cursor.on_timer(timer),
                    _ => Vec::new(),
                };
                self.apply_cursor(cursor_signals, now, &mut signals);
            }
        }
        signals
    }

    /// A renderer reports that the interaction of `frame` (or of the page,
    /// for `None`) resolved on its own.
    ///
    /// # Errors
    ///
    /// Returns `StaleSignal` without changing anything if the report does
    /// not match what is on screen.
    pub fn external_resolved(
        &mut self,
        frame: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<Vec<PageSignal>, StaleSignal> {
        let mut signals = Vec::new();
        match &self.progression {
            Progression::Static => return Err(StaleSignal::NothingToResolve),
            Progression::Interactive { completed } | Progression::Reel { completed } => {
                if frame.is_some() {
                    return Err(StaleSignal::WrongFrame {
                        requested: frame,
                        current: None,
                    });
                }
                if *completed {
                    return Err(StaleSignal::AlreadyComplete);
                }
                self.detach(&mut signals);
                signals.push(PageSignal::InteractionResolved { frame: None });
                self.complete_single(&mut signals);
            }
            Progression::Frames { cursor, .. } => {
                let CursorState::Viewing(current) = cursor.state() else {
                    return Err(StaleSignal::AlreadyComplete);
                };
                if frame.is_some_and(|f| f != current) {
                    return Err(StaleSignal::WrongFrame {
                        requested: frame,
                        current: Some(current),
                    });
                }
                self.detach(&mut signals);
                signals.push(PageSignal::InteractionResolved {
                    frame: Some(current),
                });
                self.resolve_cursor(now, &mut signals);
            }
        }
        Ok(signals)
    }

    /// A renderer-driven interaction asks to show frame `to` without
    /// resolving.
    ///
    /// # Errors
    ///
    /// Returns `StaleSignal::WrongFrame` if the page is not viewing a frame
    /// or `to` is not a different, existing frame.
    pub fn external_frame_change(
        &mut self,
        to: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<PageSignal>, StaleSignal> {
        let Progression::Frames { cursor, .. } = &self.progression else {
            return Err(StaleSignal::WrongFrame {
                requested: Some(to),
                current: None,
            });
        };
        let current = cursor.current_frame();
        let valid = matches!(cursor.state(), CursorState::Viewing(_))
            && to != current
            && to < cursor.frame_count();
        if !valid {
            return Err(StaleSignal::WrongFrame {
                requested: Some(to),
                current: Some(current),
            });
        }

        let mut signals = Vec::new();
        self.detach(&mut signals);
        let cursor_signals = match &mut self.progression {
            Progression::Frames { cursor, .. } => cursor.on_frame_change(to, false),
            _ => Vec::new(),
        };
        self.apply_cursor(cursor_signals, now, &mut signals);
        Ok(signals)
    }

    fn attach(
        &mut self,
        mut resolver: Box<dyn Resolver>,
        frame: Option<usize>,
        now: DateTime<Utc>,
        signals: &mut Vec<PageSignal>,
    ) {
        self.last_attachment += 1;
        let id = AttachmentId(self.last_attachment);
        let effects = resolver.attach(now);
        tracing::debug!(page = self.page_index, ?frame, resolver = resolver.name(), "resolver attached");
        self.attached = Some(Attached {
            id,
            frame,
            resolver,
        });
        self.apply_effects(id, effects, now, signals);
    }

    fn attach_frame(&mut self, index: usize, now: DateTime<Utc>, signals: &mut Vec<PageSignal>) {
        let Progression::Frames { interactions, .. } = &self.progression else {
            return;
        };
        let Some(Some(spec)) = interactions.get(index) else {
            return;
        };
        let context = InteractionContext::Frame {
            has_next: index + 1 < interactions.len(),
        };
        let resolver = resolver_for(spec, context, &self.tuning);
        self.attach(resolver, Some(index), now, signals);
    }

    fn detach(&mut self, signals: &mut Vec<PageSignal>) {
        if let Some(attached) = self.attached.take() {
            tracing::debug!(
                page = self.page_index,
                frame = ?attached.frame,
                resolver = attached.resolver.name(),
                "resolver detached"
            );
            signals.push(PageSignal::Detached {
                attachment: attached.id,
            });
        }
    }

    fn apply_effects(
        &mut self,
        id: AttachmentId,
        effects: Vec<Effect>,
        now: DateTime<Utc>,
        signals: &mut Vec<PageSignal>,
    ) {
        for effect in effects {
            if self.attached.as_ref().map(|a| a.id) != Some(id) {
                break;
            }
            match effect {
                Effect::Schedule { timer, after_ms } => signals.push(PageSignal::Schedule {
                    timer: RuntimeTimer::Resolver {
                        attachment: id,
                        timer,
                    },
                    after_ms,
                }),
                Effect::RevealNextFrame => self.reveal_next_frame(now, signals),
                Effect::Resolved => self.on_resolver_resolved(now, signals),
            }
        }
    }

    fn reveal_next_frame(&mut self, now: DateTime<Utc>, signals: &mut Vec<PageSignal>) {
        let settled = self
            .attached
            .as_ref()
            .is_none_or(|a| a.resolver.is_settled());
        let cursor_signals = match &mut self.progression {
            Progression::Frames { cursor, .. } => {
                let next = cursor.current_frame() + 1;
                cursor.on_frame_change(next, !settled)
            }
            _ => return,
        };
        if settled {
            self.detach(signals);
        }
        self.apply_cursor(cursor_signals, now, signals);
    }

    fn on_resolver_resolved(&mut self, now: DateTime<Utc>, signals: &mut Vec<PageSignal>) {
        let settled = self
            .attached
            .as_ref()
            .is_none_or(|a| a.resolver.is_settled());
        if settled {
            self.detach(signals);
        }
        signals.push(PageSignal::InteractionResolved {
            frame: self.current_frame(),
        });
        if matches!(self.progression, Progression::Frames { .. }) {
            self.resolve_cursor(now, signals);
        } else {
            self.complete_single(signals);
        }
    }

    fn resolve_cursor(&mut self, now: DateTime<Utc>, signals: &mut Vec<PageSignal>) {
        let cursor_signals = match &mut self.progression {
            Progression::Frames { cursor, .. } => cursor.on_resolved(),
            _ => Vec::new(),
        };
        self.apply_cursor(cursor_signals, now, signals);
    }

    fn complete_single(&mut self, signals: &mut Vec<PageSignal>) {
        if let Progression::Interactive { completed } | Progression::Reel { completed } =
            &mut self.progression
        {
            if !*completed {
                *completed = true;
                signals.push(PageSignal::PageComplete);
            }
        }
    }

    fn apply_cursor(
        &mut self,
        cursor_signals: Vec<CursorSignal>,
        now: DateTime<Utc>,
        signals: &mut Vec<PageSignal>,
    ) {
        for signal in cursor_signals {
            match signal {
                CursorSignal::Schedule { timer, after_ms } => signals.push(PageSignal::Schedule {
                    timer: RuntimeTimer::Cursor(timer),
                    after_ms,
                }),
                CursorSignal::FrameChanged { from, to } => {
                    signals.push(PageSignal::FrameChanged { from, to });
                    if self.attached.is_none() {
                        self.attach_frame(to, now, signals);
                    }
                }
                CursorSignal::PageComplete => signals.push(PageSignal::PageComplete),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use picturebook_core::clock::millis;
    use picturebook_test_support::{fixture_time, winter_cabin};

    use super::*;

    /// Drives a runtime against an in-test timer list.
    struct Harness {
        runtime: PageRuntime,
        now: DateTime<Utc>,
        pending: Vec<(DateTime<Utc>, RuntimeTimer)>,
        log: Vec<PageSignal>,
    }

    impl Harness {
        fn mount(page_index: usize) -> Self {
            let book = winter_cabin();
            let now = fixture_time();
            let page = book.page(page_index).unwrap();
            let (runtime, signals) = PageRuntime::mount(page, page_index, book.tuning(), now);
            let mut harness = Self {
                runtime,
                now,
                pending: Vec::new(),
                log: Vec::new(),
            };
            harness.absorb(signals);
            harness
        }

        fn absorb(&mut self, signals: Vec<PageSignal>) {
            for signal in signals {
                match signal {
                    PageSignal::Schedule { timer, after_ms } => {
                        self.pending.push((self.now + millis(after_ms), timer));
                    }
                    PageSignal::Detached { attachment } => self.pending.retain(|(_, t)| {
                        !matches!(t, RuntimeTimer::Resolver { attachment: a, .. } if *a == attachment)
                    }),
                    other => self.log.push(other),
                }
            }
        }

        fn input(&mut self, input: InteractionInput) {
            let signals = self.runtime.handle_input(&input, self.now);
            self.absorb(signals);
        }

        fn advance(&mut self, ms: u64) {
            let target = self.now + millis(ms);
            loop {
                self.pending.sort_by_key(|(due, _)| *due);
                match self.pending.first() {
                    Some((due, _)) if *due <= target => {
                        let (due, timer) = self.pending.remove(0);
                        self.now = due;
                        let signals = self.runtime.handle_timer(timer, due);
                        self.absorb(signals);
                    }
                    _ => break,
                }
            }
            self.now = target;
        }

        fn completed(&self) -> bool {
            self.log.contains(&PageSignal::PageComplete)
        }
    }

    #[test]
    fn test_fog_wipe_reveals_then_auto_completes() {
        // Arrange
        let mut harness = Harness::mount(7);

        // Act
        harness.input(InteractionInput::CoverageReport(0.51));
        harness.advance(799);
        let frame_before_reveal = harness.runtime.current_frame();
        harness.advance(1);
        let frame_after_reveal = harness.runtime.current_frame();
        harness.advance(799);
        let completed_early = harness.completed();
        harness.advance(1);

        // Assert
        assert_eq!(frame_before_reveal, Some(0));
        assert_eq!(frame_after_reveal, Some(1));
        assert!(!completed_early);
        assert!(harness.completed());
        assert_eq!(harness.runtime.resolver_name(), None);
    }

    #[test]
    fn test_fireplace_holds_auto_complete_until_second_stage() {
        // Arrange
        let mut harness = Harness::mount(12);

        // Act
        harness.input(InteractionInput::region_tap("bucket"));
        let frame_after_bucket = harness.runtime.current_frame();
        harness.advance(5000);
        let completed_without_fire = harness.completed();
        harness.input(InteractionInput::region_tap("fireplace"));
        let resolved_on_tap = harness
            .log
            .contains(&PageSignal::InteractionResolved { frame: Some(1) });
        harness.advance(499);
        let completed_early = harness.completed();
        harness.advance(1);

        // Assert
        assert_eq!(frame_after_bucket, Some(1));
        assert!(!completed_without_fire);
        assert!(resolved_on_tap);
        assert!(!completed_early);
        assert!(harness.completed());
    }

    #[test]
    fn test_tap_sequence_needs_one_tap_per_frame() {
        // Arrange
        let mut harness = Harness::mount(16);

        // Act
        harness.input(InteractionInput::surface_tap());
        let after_first = harness.runtime.current_frame();
        harness.input(InteractionInput::surface_tap());
        harness.input(InteractionInput::surface_tap());
        harness.advance(500);

        // Assert
        assert_eq!(after_first, Some(1));
        assert!(harness.completed());
        let resolutions = harness
            .log
            .iter()
            .filter(|s| matches!(s, PageSignal::InteractionResolved { .. }))
            .count();
        assert_eq!(resolutions, 2);
    }

    #[test]
    fn test_light_switch_completes_story_page_after_delay() {
        // Arrange
        let mut harness = Harness::mount(2);

        // Act
        harness.input(InteractionInput::surface_tap());
        harness.advance(1999);
        let early = harness.completed();
        harness.advance(1);
        harness.input(InteractionInput::surface_tap());

        // Assert
        assert!(!early);
        assert!(harness.completed());
        assert_eq!(harness.runtime.resolver_name(), Some("toggle"));
        match harness.runtime.view(harness.now).resolver {
            Some(ResolverSnapshot::Toggle { on, toggled }) => {
                assert!(!on);
                assert!(toggled);
            }
            other => panic!("expected toggle snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_transition_skip_resolves_after_short_delay() {
        // Arrange
        let mut harness = Harness::mount(9);
        harness.advance(3000);

        // Act
        harness.input(InteractionInput::surface_tap());
        harness.advance(499);
        let early = harness.completed();
        harness.advance(1);

        // Assert
        assert!(!early);
        assert!(harness.completed());
    }

    #[test]
    fn test_external_resolution_for_other_frame_is_stale() {
        // Arrange
        let (mut runtime, _) = {
            let book = winter_cabin();
            PageRuntime::mount(book.page(14).unwrap(), 14, book.tuning(), fixture_time())
        };

        // Act
        let stale = runtime.external_resolved(Some(2), fixture_time());
        let accepted = runtime.external_resolved(Some(0), fixture_time()).unwrap();

        // Assert
        assert_eq!(
            stale,
            Err(StaleSignal::WrongFrame {
                requested: Some(2),
                current: Some(0),
            })
        );
        assert!(accepted.contains(&PageSignal::FrameChanged { from: 0, to: 1 }));
        assert_eq!(runtime.current_frame(), Some(1));
    }

    #[test]
    fn test_external_frame_change_reattaches_new_frame_interaction() {
        // Arrange
        let book = winter_cabin();
        let (mut runtime, _) =
            PageRuntime::mount(book.page(14).unwrap(), 14, book.tuning(), fixture_time());

        // Act
        let signals = runtime.external_frame_change(1, fixture_time()).unwrap();

        // Assert
        assert!(matches!(signals[0], PageSignal::Detached { .. }));
        assert_eq!(signals[1], PageSignal::FrameChanged { from: 0, to: 1 });
        assert_eq!(runtime.resolver_name(), Some("tap-element"));
        assert!(runtime.external_frame_change(7, fixture_time()).is_err());
    }

    #[test]
    fn test_plain_story_page_has_nothing_to_resolve() {
        // Arrange
        let book = winter_cabin();
        let (mut runtime, signals) =
            PageRuntime::mount(book.page(1).unwrap(), 1, book.tuning(), fixture_time());

        // Act
        let result = runtime.external_resolved(None, fixture_time());

        // Assert
        assert!(signals.is_empty());
        assert_eq!(result, Err(StaleSignal::NothingToResolve));
    }

    #[test]
    fn test_view_serializes_cursor_and_resolver() {
        // Arrange
        let book = winter_cabin();
        let (runtime, _) =
            PageRuntime::mount(book.page(7).unwrap(), 7, book.tuning(), fixture_time());

        // Act
        let json = serde_json::to_value(runtime.view(fixture_time())).unwrap();

        // Assert
        assert_eq!(json["frame"], 0);
        assert_eq!(json["frame_count"], 2);
        assert_eq!(json["cursor"]["state"], "viewing");
        assert_eq!(json["resolver"]["resolver"], "wipe");
    }
}
