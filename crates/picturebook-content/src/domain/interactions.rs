//! Interaction identifiers and per-instance parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every interaction a page or frame can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    /// Drag to wipe away a fog mask.
    FogWipe,
    /// Tap the bucket, then tap the fireplace.
    Fireplace,
    /// Tap the designated surface.
    TapElement,
    /// Flip a light on or off.
    LightSwitch,
    /// Floating figures, resolves on its own.
    CosmicFloat,
    /// Pulsing glow, resolves on its own.
    GlowPulse,
    /// Drifting star field, resolves on its own.
    ParallaxStars,
    /// Blowing particles, resolves on its own.
    WindParticles,
}

/// The identifier does not name a known interaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown interaction '{0}'")]
pub struct UnknownInteraction(pub String);

/// Where an interaction is placed, which decides the resolver it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionContext {
    /// Directly on a story page.
    Page,
    /// On a frame of a multi-frame page.
    Frame {
        /// Whether another frame follows this one.
        has_next: bool,
    },
}

impl InteractionKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::FogWipe,
        Self::Fireplace,
        Self::TapElement,
        Self::LightSwitch,
        Self::CosmicFloat,
        Self::GlowPulse,
        Self::ParallaxStars,
        Self::WindParticles,
    ];

    /// The authored identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FogWipe => "fog-wipe",
            Self::Fireplace => "fireplace",
            Self::TapElement => "tap-element",
            Self::LightSwitch => "light-switch",
            Self::CosmicFloat => "cosmic-float",
            Self::GlowPulse => "glow-pulse",
            Self::ParallaxStars => "parallax-stars",
            Self::WindParticles => "wind-particles",
        }
    }

    /// Whether the interaction may be placed in the given context.
    ///
    /// Frames accept wipe, two-stage and tap interactions. Story pages accept
    /// toggles and timed interactions. The two-stage fireplace reveals its
    /// second stage on the following frame, so it needs one.
    #[must_use]
    pub fn allowed_in(self, context: InteractionContext) -> bool {
        match context {
            InteractionContext::Page => !matches!(self, Self::FogWipe | Self::Fireplace),
            InteractionContext::Frame { .. } => {
                matches!(self, Self::FogWipe | Self::Fireplace | Self::TapElement)
            }
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = UnknownInteraction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownInteraction(s.to_owned()))
    }
}

/// An interaction attached to a page or frame, with optional overrides of
/// the book's tuning for this one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionSpec {
    /// Which interaction runs.
    pub kind: InteractionKind,
    /// Cleared fraction required by a wipe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Delay between the triggering input and resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    /// Running time of a timed interaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl InteractionSpec {
    /// An interaction with no per-instance overrides.
    #[must_use]
    pub fn new(kind: InteractionKind) -> Self {
        Self {
            kind,
            threshold: None,
            delay_ms: None,
            duration_ms: None,
        }
    }
}
