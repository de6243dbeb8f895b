//! Reader settings derived from a book's tuning.

use picturebook_content::domain::tuning::{InteractionTuning, JumpPolicy};

use crate::domain::animator::FlipCurve;
use crate::domain::gesture::DEFAULT_PAGE_WIDTH_PX;

/// How the reader gates, animates and recognises page turns.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderSettings {
    /// Gating applied to forward jumps.
    pub jump_policy: JumpPolicy,
    /// Curve of the page-turn animation.
    pub flip_curve: FlipCurve,
    /// Fraction of the page width a drag must cover to flip.
    pub drag_flip_threshold: f64,
    /// Page width used by the drag gesture, in pixels.
    pub page_width: f64,
}

impl ReaderSettings {
    /// Settings for a book tuned with `tuning`.
    #[must_use]
    pub fn from_tuning(tuning: &InteractionTuning) -> Self {
        Self {
            jump_policy: tuning.jump_policy,
            flip_curve: FlipCurve::from_tuning(tuning),
            drag_flip_threshold: tuning.drag_flip_threshold,
            page_width: DEFAULT_PAGE_WIDTH_PX,
        }
    }

    /// Replaces the jump policy.
    #[must_use]
    pub fn with_jump_policy(mut self, jump_policy: JumpPolicy) -> Self {
        self.jump_policy = jump_policy;
        self
    }

    /// Replaces the flip curve.
    #[must_use]
    pub fn with_flip_curve(mut self, flip_curve: FlipCurve) -> Self {
        self.flip_curve = flip_curve;
        self
    }
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self::from_tuning(&InteractionTuning::default())
    }
}
