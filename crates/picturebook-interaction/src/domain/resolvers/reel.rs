//! Film reel shown on transition pages.
//!
//! Progress runs from 0 to 1 over the page's total duration. The reel
//! resolves a short while after running out, or sooner if the reader taps
//! to skip. The speed, blur and row curves are presentation only.

use chrono::{DateTime, Utc};
use picturebook_core::clock::elapsed_millis;

use crate::domain::input::InteractionInput;
use crate::domain::resolver::{Effect, Resolver, ResolverSnapshot, ResolverTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finish {
    Natural,
    Skipped,
}

/// Time-driven transition page resolver.
#[derive(Debug)]
pub struct FilmReel {
    total_ms: u64,
    natural_delay_ms: u64,
    skip_delay_ms: u64,
    started_at: Option<DateTime<Utc>>,
    finish: Option<Finish>,
    resolved: bool,
}

impl FilmReel {
    /// A reel that has not started.
    #[must_use]
    pub fn new(total_ms: u64, natural_delay_ms: u64, skip_delay_ms: u64) -> Self {
        Self {
            total_ms,
            natural_delay_ms,
            skip_delay_ms,
            started_at: None,
            finish: None,
            resolved: false,
        }
    }

    /// Progress through the reel at `now`, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        if self.finish.is_some() {
            return 1.0;
        }
        match self.started_at {
            Some(start) if self.total_ms > 0 => {
                (elapsed_millis(start, now) as f64 / self.total_ms as f64).min(1.0)
            }
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    /// Whether the reader tapped to skip.
    #[must_use]
    pub fn was_skipped(&self) -> bool {
        self.finish == Some(Finish::Skipped)
    }

    fn finish(&mut self, how: Finish) -> Vec<Effect> {
        if self.finish.is_some() {
            return Vec::new();
        }
        self.finish = Some(how);
        let after_ms = match how {
            Finish::Natural => self.natural_delay_ms,
            Finish::Skipped => self.skip_delay_ms,
        };
        tracing::debug!(skipped = how == Finish::Skipped, "film reel finished");
        vec![Effect::Schedule {
            timer: ResolverTimer::Resolve,
            after_ms,
        }]
    }
}

impl Resolver for FilmReel {
    fn name(&self) -> &'static str {
        "film-reel"
    }

    fn attach(&mut self, now: DateTime<Utc>) -> Vec<Effect> {
        if self.started_at.is_some() {
            return Vec::new();
        }
        self.started_at = Some(now);
        vec![Effect::Schedule {
            timer: ResolverTimer::ReelEnd,
            after_ms: self.total_ms,
        }]
    }

    fn handle_input(&mut self, input: &InteractionInput, _now: DateTime<Utc>) -> Vec<Effect> {
        match input {
            InteractionInput::Tap(_) if self.started_at.is_some() => self.finish(Finish::Skipped),
            _ => Vec::new(),
        }
    }

    fn handle_timer(&mut self, timer: ResolverTimer, _now: DateTime<Utc>) -> Vec<Effect> {
        match timer {
            ResolverTimer::ReelEnd => self.finish(Finish::Natural),
            ResolverTimer::Resolve if self.finish.is_some() && !self.resolved => {
                self.resolved = true;
                vec![Effect::Resolved]
            }
            _ => Vec::new(),
        }
    }

    fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn snapshot(&self, now: DateTime<Utc>) -> ResolverSnapshot {
        let progress = self.progress(now);
        ResolverSnapshot::Reel {
            progress,
            speed: reel_speed(progress),
            blur: reel_blur(progress),
            row_interval_ms: reel_row_interval_ms(progress),
            skipped: self.was_skipped(),
        }
    }
}

/// Playback speed multiplier: eases in over the first 10%, accelerates to
/// 4x until 70%, then eases out to a stop.
#[must_use]
pub fn reel_speed(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.1 {
        (p / 0.1).powi(2) * 0.5
    } else if p < 0.7 {
        let t = (p - 0.1) / 0.6;
        0.5 + t * 3.5
    } else {
        let t = (p - 0.7) / 0.3;
        4.0 * (1.0 - t * t)
    }
}

/// Motion blur in pixels, wobbling during the fast plateau.
#[must_use]
pub fn reel_blur(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.1 {
        p * 30.0
    } else if p < 0.7 {
        3.0 + (p * 40.0).sin() * 2.0
    } else {
        5.0 * (1.0 - (p - 0.7) / 0.3)
    }
}

/// Milliseconds between panel row changes.
#[must_use]
pub fn reel_row_interval_ms(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.1 {
        800.0
    } else if p < 0.7 {
        800.0 - 600.0 * ((p - 0.1) / 0.6)
    } else {
        200.0 + 600.0 * ((p - 0.7) / 0.3)
    }
}
