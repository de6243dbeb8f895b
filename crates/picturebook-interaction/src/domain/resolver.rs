//! The resolver capability shared by every interaction.
//!
//! A resolver is chosen once when its page or frame is mounted and then fed
//! input and timer deliveries until it resolves. It never schedules anything
//! itself: it returns [`Effect::Schedule`] and the owner delivers the timer
//! back through [`Resolver::handle_timer`] when it falls due.

use std::fmt;

use chrono::{DateTime, Utc};
use picturebook_content::domain::interactions::{
    InteractionContext, InteractionKind, InteractionSpec,
};
use picturebook_content::domain::tuning::InteractionTuning;
use serde::Serialize;

use crate::domain::input::InteractionInput;
use crate::domain::resolvers::{TapElement, ThresholdWipe, TimedResolve, Toggle, TwoStageTap};

/// Timers a resolver may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverTimer {
    /// Emit the resolved signal.
    Resolve,
    /// Reveal the following frame.
    Reveal,
    /// A film reel has run its full length.
    ReelEnd,
}

/// Something a resolver wants to happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `timer` back after `after_ms` milliseconds.
    Schedule {
        /// Timer to deliver.
        timer: ResolverTimer,
        /// Delay in milliseconds.
        after_ms: u64,
    },
    /// Show the next frame without resolving.
    RevealNextFrame,
    /// The interaction is resolved. Emitted at most once.
    Resolved,
}

/// Presentation state of a resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resolver", rename_all = "snake_case")]
pub enum ResolverSnapshot {
    /// Tap the surface.
    Tap {
        /// Whether the tap has landed.
        resolved: bool,
    },
    /// Wipe away a mask.
    Wipe {
        /// Fraction of the mask cleared so far.
        cleared: f64,
        /// Fraction required.
        threshold: f64,
        /// Whether the threshold was reached.
        cleared_enough: bool,
    },
    /// Two taps on named regions.
    TwoStage {
        /// Current stage name.
        stage: &'static str,
    },
    /// A switch.
    Toggle {
        /// Current visual value.
        on: bool,
        /// Whether the switch has been flipped at least once.
        toggled: bool,
    },
    /// Runs on its own.
    Timed {
        /// Milliseconds left before resolution.
        remaining_ms: u64,
    },
    /// A film reel.
    Reel {
        /// Progress through the reel.
        progress: f64,
        /// Playback speed multiplier.
        speed: f64,
        /// Motion blur in pixels.
        blur: f64,
        /// Milliseconds between panel row changes.
        row_interval_ms: f64,
        /// Whether the reader skipped to the end.
        skipped: bool,
    },
}

/// Common capability of every interaction state machine.
pub trait Resolver: Send + fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Called once when the resolver becomes active.
    fn attach(&mut self, _now: DateTime<Utc>) -> Vec<Effect> {
        Vec::new()
    }

    /// Feeds one input event.
    fn handle_input(&mut self, input: &InteractionInput, now: DateTime<Utc>) -> Vec<Effect>;

    /// Delivers a timer the resolver asked for.
    fn handle_timer(&mut self, timer: ResolverTimer, now: DateTime<Utc>) -> Vec<Effect>;

    /// Whether [`Effect::Resolved`] has been emitted.
    fn is_resolved(&self) -> bool;

    /// Whether the resolver will never react to input again.
    ///
    /// A resolver that is not settled after revealing the next frame stays
    /// attached to the page.
    fn is_settled(&self) -> bool {
        self.is_resolved()
    }

    /// Presentation state.
    fn snapshot(&self, now: DateTime<Utc>) -> ResolverSnapshot;
}

/// Builds the resolver for an authored interaction.
#[must_use]
pub fn resolver_for(
    spec: &InteractionSpec,
    context: InteractionContext,
    tuning: &InteractionTuning,
) -> Box<dyn Resolver> {
    match (spec.kind, context) {
        (InteractionKind::FogWipe, context) => {
            let has_next = matches!(context, InteractionContext::Frame { has_next: true });
            Box::new(ThresholdWipe::new(
                tuning.threshold_for(spec),
                tuning.wipe_brush_radius,
                tuning.delay_for(spec),
                has_next,
            ))
        }
        (InteractionKind::Fireplace, _) => Box::new(TwoStageTap::new(tuning.delay_for(spec))),
        (InteractionKind::TapElement, InteractionContext::Frame { .. }) => {
            Box::new(TapElement::new())
        }
        (InteractionKind::TapElement | InteractionKind::LightSwitch, _) => {
            Box::new(Toggle::new(tuning.delay_for(spec)))
        }
        (
            kind @ (InteractionKind::CosmicFloat
            | InteractionKind::GlowPulse
            | InteractionKind::ParallaxStars
            | InteractionKind::WindParticles),
            _,
        ) => Box::new(TimedResolve::new(kind, tuning.duration_for(spec))),
    }
}
