//! Single tap on the page surface.

use chrono::{DateTime, Utc};

use crate::domain::input::{InteractionInput, TapTarget};
use crate::domain::resolver::{Effect, Resolver, ResolverSnapshot, ResolverTimer};

/// Resolves on the first tap anywhere on the page artwork.
#[derive(Debug, Default)]
pub struct TapElement {
    resolved: bool,
}

impl TapElement {
    /// An unresolved tap target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Resolver for TapElement {
    fn name(&self) -> &'static str {
        "tap-element"
    }

    fn handle_input(&mut self, input: &InteractionInput, _now: DateTime<Utc>) -> Vec<Effect> {
        if self.resolved || *input != InteractionInput::Tap(TapTarget::Surface) {
            return Vec::new();
        }
        self.resolved = true;
        vec![Effect::Resolved]
    }

    fn handle_timer(&mut self, _timer: ResolverTimer, _now: DateTime<Utc>) -> Vec<Effect> {
        Vec::new()
    }

    fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn snapshot(&self, _now: DateTime<Utc>) -> ResolverSnapshot {
        ResolverSnapshot::Tap {
            resolved: self.resolved,
        }
    }
}
