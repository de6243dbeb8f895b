//! A switch whose first flip resolves the interaction.

use chrono::{DateTime, Utc};

use crate::domain::input::{InteractionInput, TapTarget};
use crate::domain::resolver::{Effect, Resolver, ResolverSnapshot, ResolverTimer};

/// Any surface tap flips the switch. The first flip schedules resolution;
/// later flips only change the visual value.
#[derive(Debug)]
pub struct Toggle {
    on: bool,
    toggled: bool,
    resolved: bool,
    delay_ms: u64,
}

impl Toggle {
    /// A switch that starts off.
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            on: false,
            toggled: false,
            resolved: false,
            delay_ms,
        }
    }

    /// Current visual value.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Resolver for Toggle {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn handle_input(&mut self, input: &InteractionInput, _now: DateTime<Utc>) -> Vec<Effect> {
        if *input != InteractionInput::Tap(TapTarget::Surface) {
            return Vec::new();
        }
        self.on = !self.on;
        if self.toggled {
            return Vec::new();
        }
        self.toggled = true;
        vec![Effect::Schedule {
            timer: ResolverTimer::Resolve,
            after_ms: self.delay_ms,
        }]
    }

    fn handle_timer(&mut self, timer: ResolverTimer, _now: DateTime<Utc>) -> Vec<Effect> {
        if timer == ResolverTimer::Resolve && self.toggled && !self.resolved {
            self.resolved = true;
            vec![Effect::Resolved]
        } else {
            Vec::new()
        }
    }

    fn is_resolved(&self) -> bool {
        self.resolved
    }

    // The switch keeps flipping after resolution.
    fn is_settled(&self) -> bool {
        false
    }

    fn snapshot(&self, _now: DateTime<Utc>) -> ResolverSnapshot {
        ResolverSnapshot::Toggle {
            on: self.on,
            toggled: self.toggled,
        }
    }
}

#[cfg(test)]
mod tests {
    use picturebook_test_support::fixture_time;

    use super::*;

    #[test]
    fn test_first_flip_schedules_resolution_once() {
        // Arrange
        let mut switch = Toggle::new(2000);
        let now = fixture_time();

        // Act
        let first = switch.handle_input(&InteractionInput::surface_tap(), now);
        let second = switch.handle_input(&InteractionInput::surface_tap(), now);

        // Assert
        assert_eq!(
            first,
            vec![Effect::Schedule {
                timer: ResolverTimer::Resolve,
                after_ms: 2000,
            }]
        );
        assert!(second.is_empty());
        assert!(!switch.is_on());
    }

    #[test]
    fn test_flips_after_resolution_only_change_visuals() {
        // Arrange
        let mut switch = Toggle::new(2000);
        let now = fixture_time();
        switch.handle_input(&InteractionInput::surface_tap(), now);

        // Act
        let resolved = switch.handle_timer(ResolverTimer::Resolve, now);
        let flip = switch.handle_input(&InteractionInput::surface_tap(), now);

        // Assert
        assert_eq!(resolved, vec![Effect::Resolved]);
        assert!(flip.is_empty());
        assert!(switch.is_resolved());
        assert!(!switch.is_on());
    }

    #[test]
    fn test_timer_before_any_flip_is_ignored() {
        let mut switch = Toggle::new(2000);

        assert!(switch.handle_timer(ResolverTimer::Resolve, fixture_time()).is_empty());
        assert!(!switch.is_resolved());
    }
}
