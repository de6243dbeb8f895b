//! Interactions that resolve on their own after a fixed running time.

use chrono::{DateTime, Utc};
use picturebook_content::domain::interactions::InteractionKind;
use picturebook_core::clock::{elapsed_millis, millis};

use crate::domain::input::InteractionInput;
use crate::domain::resolver::{Effect, Resolver, ResolverSnapshot, ResolverTimer};

/// Resolves `duration_ms` after being attached, ignoring all input.
#[derive(Debug)]
pub struct TimedResolve {
    kind: InteractionKind,
    duration_ms: u64,
    started_at: Option<DateTime<Utc>>,
    resolved: bool,
}

impl TimedResolve {
    /// A timer that has not started.
    #[must_use]
    pub fn new(kind: InteractionKind, duration_ms: u64) -> Self {
        Self {
            kind,
            duration_ms,
            started_at: None,
            resolved: false,
        }
    }

    /// Which timed interaction this is.
    #[must_use]
    pub fn kind(&self) -> InteractionKind {
        self.kind
    }
}

impl Resolver for TimedResolve {
    fn name(&self) -> &'static str {
        "timed"
    }

    fn attach(&mut self, now: DateTime<Utc>) -> Vec<Effect> {
        if self.started_at.is_some() {
            return Vec::new();
        }
        self.started_at = Some(now);
        vec![Effect::Schedule {
            timer: ResolverTimer::Resolve,
            after_ms: self.duration_ms,
        }]
    }

    fn handle_input(&mut self, _input: &InteractionInput, _now: DateTime<Utc>) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_timer(&mut self, timer: ResolverTimer, now: DateTime<Utc>) -> Vec<Effect> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        if timer != ResolverTimer::Resolve
            || self.resolved
            || now < started_at + millis(self.duration_ms)
        {
            return Vec::new();
        }
        self.resolved = true;
        vec![Effect::Resolved]
    }

    fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn snapshot(&self, now: DateTime<Utc>) -> ResolverSnapshot {
        let elapsed = self.started_at.map_or(0, |start| elapsed_millis(start, now));
        let remaining_ms = if self.resolved {
            0
        } else {
            self.duration_ms.saturating_sub(elapsed)
        };
        ResolverSnapshot::Timed { remaining_ms }
    }
}
