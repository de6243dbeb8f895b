//! Tunable thresholds, delays and durations.
//!
//! Every value defaults to the behaviour readers of the published book are
//! used to. A book may override any of them in its `tuning` block, and a
//! single interaction may override its own threshold, delay or duration.

use serde::{Deserialize, Serialize};

use crate::domain::interactions::{InteractionKind, InteractionSpec};

/// How direct jumps interact with completion gating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JumpPolicy {
    /// Jumps are never gated.
    #[default]
    Unrestricted,
    /// A forward jump away from an incomplete multi-frame page is refused.
    GateCurrent,
    /// A forward jump is refused if the current page or any page strictly
    /// between it and the target is an incomplete multi-frame page.
    GateIntermediate,
}

/// Book-wide tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionTuning {
    /// Cleared fraction at which a wipe resolves.
    pub wipe_threshold: f64,
    /// Wipe brush radius as a fraction of the surface width.
    pub wipe_brush_radius: f64,
    /// Pause between a wipe clearing and the next frame being revealed.
    pub wipe_reveal_delay_ms: u64,
    /// Pause before a last frame without interaction completes the page.
    pub last_frame_complete_ms: u64,
    /// Pause between the last frame's interaction resolving and the page
    /// completing.
    pub frame_complete_ms: u64,
    /// Pause between the first toggle and resolution.
    pub toggle_resolve_ms: u64,
    /// Pause between the second stage tap and resolution. Zero resolves on
    /// the tap itself.
    pub two_stage_resolve_ms: u64,
    /// Pause between a film reel running out and resolution.
    pub reel_natural_ms: u64,
    /// Pause between a film reel being skipped and resolution.
    pub reel_skip_ms: u64,
    /// Running time of a transition page that does not set its own.
    pub default_transition_ms: u64,
    /// Running time of `wind-particles`.
    pub wind_particles_ms: u64,
    /// Running time of `glow-pulse`.
    pub glow_pulse_ms: u64,
    /// Running time of `cosmic-float`.
    pub cosmic_float_ms: u64,
    /// Running time of `parallax-stars`.
    pub parallax_stars_ms: u64,
    /// Page flip spring stiffness.
    pub flip_stiffness: f64,
    /// Page flip spring damping.
    pub flip_damping: f64,
    /// Page flip spring mass.
    pub flip_mass: f64,
    /// Fraction of the page width a drag must cover to turn the page.
    pub drag_flip_threshold: f64,
    /// Jump gating.
    pub jump_policy: JumpPolicy,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            wipe_threshold: 0.5,
            wipe_brush_radius: 0.08,
            wipe_reveal_delay_ms: 800,
            last_frame_complete_ms: 800,
            frame_complete_ms: 500,
            toggle_resolve_ms: 2000,
            two_stage_resolve_ms: 0,
            reel_natural_ms: 1500,
            reel_skip_ms: 500,
            default_transition_ms: 10_000,
            wind_particles_ms: 4000,
            glow_pulse_ms: 5000,
            cosmic_float_ms: 6000,
            parallax_stars_ms: 8000,
            flip_stiffness: 120.0,
            flip_damping: 18.0,
            flip_mass: 1.0,
            drag_flip_threshold: 0.4,
            jump_policy: JumpPolicy::Unrestricted,
        }
    }
}

impl InteractionTuning {
    /// Default running time of a timed interaction kind.
    #[must_use]
    pub fn timed_duration_ms(&self, kind: InteractionKind) -> Option<u64> {
        match kind {
            InteractionKind::WindParticles => Some(self.wind_particles_ms),
            InteractionKind::GlowPulse => Some(self.glow_pulse_ms),
            InteractionKind::CosmicFloat => Some(self.cosmic_float_ms),
            InteractionKind::ParallaxStars => Some(self.parallax_stars_ms),
            _ => None,
        }
    }

    /// Wipe threshold for one interaction instance.
    #[must_use]
    pub fn threshold_for(&self, spec: &InteractionSpec) -> f64 {
        spec.threshold.unwrap_or(self.wipe_threshold)
    }

    /// Resolution delay for one interaction instance, falling back to the
    /// kind's book-wide delay.
    #[must_use]
    pub fn delay_for(&self, spec: &InteractionSpec) -> u64 {
        spec.delay_ms.unwrap_or(match spec.kind {
            InteractionKind::FogWipe => self.wipe_reveal_delay_ms,
            InteractionKind::Fireplace => self.two_stage_resolve_ms,
            InteractionKind::LightSwitch | InteractionKind::TapElement => {
                self.toggle_resolve_ms
            }
            _ => 0,
        })
    }

    /// Running time for one timed interaction instance.
    #[must_use]
    pub fn duration_for(&self, spec: &InteractionSpec) -> u64 {
        spec.duration_ms
            .or_else(|| self.timed_duration_ms(spec.kind))
            .unwrap_or(0)
    }

    /// Names of fields holding unusable values.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if !(self.wipe_threshold > 0.0 && self.wipe_threshold <= 1.0) {
            invalid.push("wipe_threshold");
        }
        if !(self.wipe_brush_radius > 0.0 && self.wipe_brush_radius.is_finite()) {
            invalid.push("wipe_brush_radius");
        }
        if self.default_transition_ms == 0 {
            invalid.push("default_transition_ms");
        }
        for (field, value) in [
            ("wind_particles_ms", self.wind_particles_ms),
            ("glow_pulse_ms", self.glow_pulse_ms),
            ("cosmic_float_ms", self.cosmic_float_ms),
            ("parallax_stars_ms", self.parallax_stars_ms),
        ] {
            if value == 0 {
                invalid.push(field);
            }
        }
        if !(self.flip_stiffness > 0.0 && self.flip_stiffness.is_finite()) {
            invalid.push("flip_stiffness");
        }
        if !(self.flip_damping >= 0.0 && self.flip_damping.is_finite()) {
            invalid.push("flip_damping");
        }
        if !(self.flip_mass > 0.0 && self.flip_mass.is_finite()) {
            invalid.push("flip_mass");
        }
        if !(self.drag_flip_threshold > 0.0 && self.drag_flip_threshold <= 1.0) {
            invalid.push("drag_flip_threshold");
        }
        invalid
    }
}
