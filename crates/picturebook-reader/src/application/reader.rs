//! The reader facade.
//!
//! A [`Reader`] owns everything that changes while a book is read: the
//! navigation controller, the completion registry, the page-turn animator,
//! the runtime of the page on screen and the scheduler holding every
//! pending timer. Presentation layers talk only to this type.
//!
//! Time moves forward only through [`Reader::tick`]. Each tick delivers,
//! in due order, every timer and flip completion that has come due on the
//! reader's clock. Every mount gets a fresh instance number that is stamped
//! on its timers; leaving a page cancels them, and any that slip through are
//! dropped on delivery.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use picturebook_content::domain::aggregates::Book;
use picturebook_content::domain::pages::Page;
use picturebook_core::clock::{Clock, millis};
use picturebook_core::event::EventStamper;
use picturebook_core::scheduler::Scheduler;
use picturebook_interaction::application::page_runtime::{
    PageRuntime, PageRuntimeView, PageSignal, RuntimeTimer, StaleSignal,
};
use picturebook_interaction::domain::cursor::CursorState;
use picturebook_interaction::domain::input::InteractionInput;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::animator::{FlipFrame, TransitionAnimator};
use crate::domain::commands::Key;
use crate::domain::events::{
    FrameChanged, InteractionResolved, PageChanged, PageCompleted, ReaderEvent, ReaderEventKind,
    TransitionStarted,
};
use crate::domain::gesture::{DragFlip, PageCurl};
use crate::domain::navigation::{Direction, NavigationController, PendingTransition, Rejection};
use crate::domain::registry::CompletionRegistry;
use crate::domain::settings::ReaderSettings;

/// Receives reader events.
pub trait ReaderListener: Send {
    /// Called once per event, in emission order.
    fn on_event(&mut self, event: &ReaderEvent);
}

impl<F> ReaderListener for F
where
    F: FnMut(&ReaderEvent) + Send,
{
    fn on_event(&mut self, event: &ReaderEvent) {
        self(event);
    }
}

/// Handle returned by [`Reader::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A renderer report that does not match the page on screen. Nothing
/// changed; the report can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StaleReport {
    /// The report names a page that is not current.
    #[error("page {page} is not on screen (current page is {current})")]
    WrongPage {
        /// Page named by the report.
        page: usize,
        /// Current page.
        current: usize,
    },
    /// The page is current but the report does not match its state.
    #[error(transparent)]
    Page(#[from] StaleSignal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTimer {
    instance: u64,
    timer: RuntimeTimer,
}

/// The picture-book progression engine.
pub struct Reader {
    book: Arc<Book>,
    clock: Arc<dyn Clock>,
    settings: ReaderSettings,
    navigation: NavigationController,
    registry: CompletionRegistry,
    animator: TransitionAnimator,
    drag: DragFlip,
    page: PageRuntime,
    instance: u64,
    scheduler: Scheduler<ScheduledTimer>,
    stamper: EventStamper,
    listeners: Vec<(SubscriptionId, Box<dyn ReaderListener>)>,
    last_subscription: u64,
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("title", &self.book.meta().title)
            .field("current", &self.navigation.current())
            .field("pending", &self.navigation.pending())
            .field("instance", &self.instance)
            .field("timers", &self.scheduler.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Reader {
    /// Opens `book` on its start page with settings from the book's tuning.
    #[must_use]
    pub fn new(book: Arc<Book>, clock: Arc<dyn Clock>) -> Self {
        let settings = ReaderSettings::from_tuning(book.tuning());
        Self::with_settings(book, clock, settings)
    }

    /// Opens `book` on its start page with explicit settings.
    #[must_use]
    pub fn with_settings(book: Arc<Book>, clock: Arc<dyn Clock>, settings: ReaderSettings) -> Self {
        let now = clock.now();
        let start = book.start_page();
        let (page, signals) = match book.page(start) {
            Some(p) => PageRuntime::mount(p, start, book.tuning(), now),
            None => PageRuntime::unmounted(start),
        };
        let mut reader = Self {
            navigation: NavigationController::new(book.page_count(), start),
            registry: CompletionRegistry::new(),
            animator: TransitionAnimator::new(settings.flip_curve),
            drag: DragFlip::new(settings.drag_flip_threshold, settings.page_width),
            page,
            instance: 1,
            scheduler: Scheduler::new(),
            stamper: EventStamper::new(Uuid::new_v4()),
            listeners: Vec::new(),
            last_subscription: 0,
            settings,
            book,
            clock,
        };
        tracing::info!(
            session_id = %reader.stamper.session_id(),
            title = %reader.book.meta().title,
            pages = reader.book.page_count(),
            page = start,
            "reader opened"
        );
        reader.apply_signals(signals, now);
        reader
    }

    /// The book being read.
    #[must_use]
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Settings in effect.
    #[must_use]
    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Identifier stamped on every event of this reading session.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.stamper.session_id()
    }

    /// Current time on the reader's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Index of the page on screen.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigation.current()
    }

    /// The page on screen.
    ///
    /// # Panics
    ///
    /// Panics if the book is empty, which [`Book::compile`] rules out.
    #[must_use]
    pub fn current_page(&self) -> &Page {
        &self.book.pages()[self.navigation.current()]
    }

    /// Number of pages in the book.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.book.page_count()
    }

    /// Whether `page` has been completed this session.
    #[must_use]
    pub fn is_page_complete(&self, page: usize) -> bool {
        self.registry.is_complete(page)
    }

    /// Completed pages in ascending order.
    #[must_use]
    pub fn completed_pages(&self) -> Vec<usize> {
        self.registry.completed().collect()
    }

    /// Whether `page` holds back forward navigation: a multi-frame page
    /// that is not yet complete.
    #[must_use]
    pub fn is_blocking(&self, page: usize) -> bool {
        is_blocking(&self.book, &self.registry, page)
    }

    /// Whether a forward advance would be accepted right now.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        let current = self.navigation.current();
        !self.navigation.is_transitioning()
            && current + 1 < self.page_count()
            && !self.is_blocking(current)
    }

    /// Whether a backward advance would be accepted right now.
    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        !self.navigation.is_transitioning() && self.navigation.current() > 0
    }

    /// Reading progress, `(current + 1) / page_count`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        (self.navigation.current() + 1) as f64 / self.page_count().max(1) as f64
    }

    /// Whether a page turn is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.navigation.is_transitioning()
    }

    /// The page turn in flight.
    #[must_use]
    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.navigation.pending()
    }

    /// `+1`, `-1`, or `0` before the first page change.
    #[must_use]
    pub fn last_direction(&self) -> i8 {
        self.navigation.last_direction_sign()
    }

    /// Frame on screen, for multi-frame pages.
    #[must_use]
    pub fn current_frame(&self) -> Option<usize> {
        self.page.current_frame()
    }

    /// Cursor state, for multi-frame pages.
    #[must_use]
    pub fn cursor_state(&self) -> Option<CursorState> {
        self.page.cursor_state()
    }

    /// Presentation state of the page on screen.
    #[must_use]
    pub fn page_view(&self) -> PageRuntimeView {
        self.page.view(self.clock.now())
    }

    /// Visual state of the page turn in flight.
    #[must_use]
    pub fn flip_frame(&self) -> Option<FlipFrame> {
        self.animator.sample(self.clock.now())
    }

    /// Curl of the page being dragged.
    #[must_use]
    pub fn page_curl(&self) -> Option<PageCurl> {
        self.drag.is_dragging().then(|| self.drag.curl())
    }

    /// The earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        match (self.scheduler.next_due(), self.animator.finishes_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Registers a listener for every subsequent event.
    pub fn subscribe(&mut self, listener: impl ReaderListener + 'static) -> SubscriptionId {
        self.last_subscription += 1;
        let id = SubscriptionId(self.last_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Requests a one-page turn.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the turn is not legal right now. Nothing
    /// changes in that case.
    pub fn request_advance(&mut self, direction: Direction) -> Result<PendingTransition, Rejection> {
        let book = &self.book;
        let registry = &self.registry;
        let result = self
            .navigation
            .request_advance(direction, |p| is_blocking(book, registry, p));
        self.begin_transition(result)
    }

    /// Turns to the next page.
    ///
    /// # Errors
    ///
    /// See [`request_advance`](Self::request_advance).
    pub fn next(&mut self) -> Result<PendingTransition, Rejection> {
        self.request_advance(Direction::Forward)
    }

    /// Turns to the previous page.
    ///
    /// # Errors
    ///
    /// See [`request_advance`](Self::request_advance).
    pub fn prev(&mut self) -> Result<PendingTransition, Rejection> {
        self.request_advance(Direction::Backward)
    }

    /// Requests a turn directly to `index`, gated by the jump policy.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the jump is not legal right now.
    pub fn request_jump(&mut self, index: usize) -> Result<PendingTransition, Rejection> {
        let book = &self.book;
        let registry = &self.registry;
        let result = self.navigation.request_jump(index, self.settings.jump_policy, |p| {
            is_blocking(book, registry, p)
        });
        self.begin_transition(result)
    }

    /// Turns back to the cover.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if already on the cover or mid-turn.
    pub fn go_to_cover(&mut self) -> Result<PendingTransition, Rejection> {
        self.request_jump(0)
    }

    /// Handles a key press.
    ///
    /// # Errors
    ///
    /// See [`request_advance`](Self::request_advance).
    pub fn press_key(&mut self, key: Key) -> Result<PendingTransition, Rejection> {
        self.request_advance(key.direction())
    }

    /// Routes input to the interaction on screen.
    pub fn send_input(&mut self, input: &InteractionInput) {
        let now = self.clock.now();
        let signals = self.page.handle_input(input, now);
        self.apply_signals(signals, now);
    }

    /// A renderer reports that the interaction of `page` (and `frame`, for
    /// multi-frame pages) resolved on its own.
    ///
    /// # Errors
    ///
    /// Returns a [`StaleReport`] if the report does not match what is on
    /// screen. Nothing changes in that case.
    pub fn on_interaction_resolved(
        &mut self,
        page: usize,
        frame: Option<usize>,
    ) -> Result<(), StaleReport> {
        self.check_current(page)?;
        let now = self.clock.now();
        let signals = self
            .page
            .external_resolved(frame, now)
            .inspect_err(|reason| {
                tracing::warn!(page, ?frame, %reason, "stale resolution report ignored");
            })?;
        self.apply_signals(signals, now);
        Ok(())
    }

    /// A renderer-driven interaction asks `page` to show `frame`.
    ///
    /// # Errors
    ///
    /// Returns a [`StaleReport`] if the page is not on screen or the frame
    /// change does not apply. Nothing changes in that case.
    pub fn on_frame_change_requested(&mut self, page: usize, frame: usize) -> Result<(), StaleReport> {
        self.check_current(page)?;
        let now = self.clock.now();
        let signals = self
            .page
            .external_frame_change(frame, now)
            .inspect_err(|reason| {
                tracing::warn!(page, frame, %reason, "stale frame change ignored");
            })?;
        self.apply_signals(signals, now);
        Ok(())
    }

    /// Pointer down for a drag-to-flip, in pixels.
    pub fn drag_start(&mut self, x: f64, y: f64) {
        self.drag.begin(x, y);
    }

    /// Pointer moved during a drag-to-flip.
    pub fn drag_move(&mut self, x: f64, y: f64) {
        let (next, prev) = (self.can_go_next(), self.can_go_prev());
        self.drag.move_to(x, y, next, prev);
    }

    /// Pointer released. Returns the outcome of the advance the drag asked
    /// for, or `None` if it did not cover enough of the page.
    pub fn drag_end(&mut self) -> Option<Result<PendingTransition, Rejection>> {
        let direction = self.drag.release()?;
        Some(self.request_advance(direction))
    }

    /// Resizes the page used by the drag gesture.
    pub fn set_page_width(&mut self, width: f64) {
        self.drag.set_page_width(width);
    }

    /// Delivers everything that has come due on the clock. Returns how many
    /// timers and flip completions were handled.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut handled = 0;
        loop {
            let timer_due = self.scheduler.next_due().filter(|due| *due <= now);
            let flip_due = self.animator.finishes_at().filter(|due| *due <= now);
            match (timer_due, flip_due) {
                (None, None) => break,
                (Some(timer), Some(flip)) if flip < timer => self.finish_flip(flip),
                (None, Some(flip)) => self.finish_flip(flip),
                (Some(_), _) => {
                    if let Some(task) = self.scheduler.pop_due(now) {
                        self.deliver(task.payload, task.due_at);
                    }
                }
            }
            handled += 1;
        }
        handled
    }

    fn check_current(&self, page: usize) -> Result<(), StaleReport> {
        let current = self.navigation.current();
        if page == current && !self.navigation.is_transitioning() {
            return Ok(());
        }
        tracing::warn!(page, current, "report for a page not on screen ignored");
        Err(StaleReport::WrongPage { page, current })
    }

    fn begin_transition(
        &mut self,
        result: Result<PendingTransition, Rejection>,
    ) -> Result<PendingTransition, Rejection> {
        let pending = result.inspect_err(|reason| {
            tracing::debug!(
                page = self.navigation.current(),
                %reason,
                "navigation rejected"
            );
        })?;
        self.animator.start(pending.direction, self.clock.now());
        self.emit(ReaderEventKind::TransitionStarted(TransitionStarted {
            from: pending.from,
            to: pending.to,
            direction: pending.direction,
            kind: pending.kind,
        }));
        Ok(pending)
    }

    fn finish_flip(&mut self, at: DateTime<Utc>) {
        self.animator.poll_finished(at);
        let Some(committed) = self.navigation.commit() else {
            return;
        };
        self.mount(committed.to, at);
        self.emit(ReaderEventKind::PageChanged(PageChanged {
            from: committed.from,
            to: committed.to,
            direction: committed.direction,
        }));
    }

    fn mount(&mut self, index: usize, at: DateTime<Utc>) {
        let retired = self.instance;
        let cancelled = self.scheduler.cancel_where(|t| t.instance == retired);
        self.instance += 1;
        let (page, signals) = match self.book.page(index) {
            Some(p) => PageRuntime::mount(p, index, self.book.tuning(), at),
            None => PageRuntime::unmounted(index),
        };
        self.page = page;
        tracing::debug!(page = index, cancelled, instance = self.instance, "page runtime mounted");
        self.apply_signals(signals, at);
    }

    fn deliver(&mut self, scheduled: ScheduledTimer, at: DateTime<Utc>) {
        if scheduled.instance != self.instance {
            tracing::debug!(instance = scheduled.instance, "timer of a left page dropped");
            return;
        }
        let signals = self.page.handle_timer(scheduled.timer, at);
        self.apply_signals(signals, at);
    }

    fn apply_signals(&mut self, signals: Vec<PageSignal>, at: DateTime<Utc>) {
        let page = self.page.page_index();
        let instance = self.instance;
        for signal in signals {
            match signal {
                PageSignal::Schedule { timer, after_ms } => {
                    self.scheduler
                        .schedule_after(at, millis(after_ms), ScheduledTimer { instance, timer });
                }
                PageSignal::Detached { attachment } => {
                    self.scheduler.cancel_where(|t| {
                        t.instance == instance
                            && matches!(t.timer, RuntimeTimer::Resolver { attachment: a, .. } if a == attachment)
                    });
                }
                PageSignal::FrameChanged { from, to } => {
                    tracing::debug!(page, from, to, "frame changed");
                    self.emit(ReaderEventKind::FrameChanged(FrameChanged { page, from, to }));
                }
                PageSignal::InteractionResolved { frame } => {
                    tracing::debug!(page, ?frame, "interaction resolved");
                    self.emit(ReaderEventKind::InteractionResolved(InteractionResolved {
                        page,
                        frame,
                    }));
                }
                PageSignal::PageComplete => {
                    if self.registry.mark_complete(page) {
                        tracing::info!(page, "page completed");
                        self.emit(ReaderEventKind::PageCompleted(PageCompleted { page }));
                    }
                }
            }
        }
    }

    fn emit(&mut self, kind: ReaderEventKind) {
        let metadata = self.stamper.stamp(kind.event_type(), self.clock.as_ref());
        let event = ReaderEvent { metadata, kind };
        for (_, listener) in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

fn is_blocking(book: &Book, registry: &CompletionRegistry, page: usize) -> bool {
    book.page(page).is_some_and(Page::is_multi_frame) && !registry.is_complete(page)
}
