//! Two taps on named regions, in order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::input::{BUCKET_REGION, FIREPLACE_REGION, InteractionInput, TapTarget};
use crate::domain::resolver::{Effect, Resolver, ResolverSnapshot, ResolverTimer};

/// Progress through a two-stage interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for the first region.
    Bucket,
    /// Waiting for the second region, shown on the next frame.
    Fireplace,
    /// Second region tapped; a delayed resolution is pending.
    Lit,
    /// Resolved.
    Complete,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::Fireplace => "fireplace",
            Self::Lit => "lit",
            Self::Complete => "complete",
        }
    }
}

/// Tap the bucket, which reveals the next frame, then tap the fireplace.
///
/// A tap on the wrong region for the current stage does nothing. The
/// resolver stays attached across the frame it reveals. With no delay the
/// fireplace tap resolves on the spot.
#[derive(Debug)]
pub struct TwoStageTap {
    stage: Stage,
    delay_ms: u64,
}

impl TwoStageTap {
    /// Starts at the first stage.
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            stage: Stage::Bucket,
            delay_ms,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }
}

impl Resolver for TwoStageTap {
    fn name(&self) -> &'static str {
        "two-stage-tap"
    }

    fn handle_input(&mut self, input: &InteractionInput, _now: DateTime<Utc>) -> Vec<Effect> {
        let InteractionInput::Tap(TapTarget::Region(region)) = input else {
            return Vec::new();
        };
        match (self.stage, region.as_str()) {
            (Stage::Bucket, BUCKET_REGION) => {
                self.stage = Stage::Fireplace;
                vec![Effect::RevealNextFrame]
            }
            (Stage::Fireplace, FIREPLACE_REGION) if self.delay_ms == 0 => {
                self.stage = Stage::Complete;
                vec![Effect::Resolved]
            }
            (Stage::Fireplace, FIREPLACE_REGION) => {
                self.stage = Stage::Lit;
                vec![Effect::Schedule {
                    timer: ResolverTimer::Resolve,
                    after_ms: self.delay_ms,
                }]
            }
            _ => Vec::new(),
        }
    }

    fn handle_timer(&mut self, timer: ResolverTimer, _now: DateTime<Utc>) -> Vec<Effect> {
        if timer == ResolverTimer::Resolve && self.stage == Stage::Lit {
            self.stage = Stage::Complete;
            vec![Effect::Resolved]
        } else {
            Vec::new()
        }
    }

    fn is_resolved(&self) -> bool {
        self.stage == Stage::Complete
    }

    fn snapshot(&self, _now: DateTime<Utc>) -> ResolverSnapshot {
        ResolverSnapshot::TwoStage {
            stage: self.stage.as_str(),
        }
    }
}
