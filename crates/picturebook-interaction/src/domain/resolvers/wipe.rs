//! Drag to wipe a mask away.

use chrono::{DateTime, Utc};

use crate::domain::coverage::CoverageGrid;
use crate::domain::input::{InteractionInput, Point};
use crate::domain::resolver::{Effect, Resolver, ResolverSnapshot, ResolverTimer};

/// Clears once the wiped fraction reaches a threshold.
///
/// On a frame with a successor the clearing reveals the next frame after a
/// delay and the wipe settles without resolving; anywhere else it resolves
/// after the delay. Input after clearing is ignored.
#[derive(Debug)]
pub struct ThresholdWipe {
    threshold: f64,
    brush_radius: f64,
    delay_ms: u64,
    has_next: bool,
    grid: CoverageGrid,
    reported: f64,
    last_point: Option<Point>,
    cleared: bool,
    revealed: bool,
    resolved: bool,
}

impl ThresholdWipe {
    /// A fully covered mask.
    #[must_use]
    pub fn new(threshold: f64, brush_radius: f64, delay_ms: u64, has_next: bool) -> Self {
        Self {
            threshold,
            brush_radius,
            delay_ms,
            has_next,
            grid: CoverageGrid::new(),
            reported: 0.0,
            last_point: None,
            cleared: false,
            revealed: false,
            resolved: false,
        }
    }

    /// Fraction cleared so far, from strokes or renderer reports, whichever
    /// is larger.
    #[must_use]
    pub fn cleared_fraction(&self) -> f64 {
        self.grid.cleared_fraction().max(self.reported)
    }

    fn check_threshold(&mut self) -> Vec<Effect> {
        if self.cleared_fraction() < self.threshold {
            return Vec::new();
        }
        self.cleared = true;
        self.last_point = None;
        let timer = if self.has_next {
            ResolverTimer::Reveal
        } else {
            ResolverTimer::Resolve
        };
        tracing::debug!(cleared = self.cleared_fraction(), "wipe threshold reached");
        vec![Effect::Schedule {
            timer,
            after_ms: self.delay_ms,
        }]
    }
}

impl Resolver for ThresholdWipe {
    fn name(&self) -> &'static str {
        "threshold-wipe"
    }

    fn handle_input(&mut self, input: &InteractionInput, _now: DateTime<Utc>) -> Vec<Effect> {
        if self.cleared {
            return Vec::new();
        }
        match *input {
            InteractionInput::WipeStart(point) => {
                self.grid.erase_disc(point, self.brush_radius);
                self.last_point = Some(point);
            }
            InteractionInput::WipeMove(point) => {
                let Some(last) = self.last_point else {
                    return Vec::new();
                };
                self.grid.erase_disc(point, self.brush_radius);
                self.grid.erase_segment(last, point, self.brush_radius);
                self.last_point = Some(point);
            }
            InteractionInput::WipeEnd => {
                self.last_point = None;
                return Vec::new();
            }
            InteractionInput::CoverageReport(fraction) => {
                if fraction.is_finite() {
                    self.reported = self.reported.max(fraction.clamp(0.0, 1.0));
                }
            }
            InteractionInput::Tap(_) => return Vec::new(),
        }
        self.check_threshold()
    }

    fn handle_timer(&mut self, timer: ResolverTimer, _now: DateTime<Utc>) -> Vec<Effect> {
        match timer {
            ResolverTimer::Reveal if self.cleared && !self.revealed => {
                self.revealed = true;
                vec![Effect::RevealNextFrame]
            }
            ResolverTimer::Resolve if self.cleared && !self.resolved => {
                self.resolved = true;
                vec![Effect::Resolved]
            }
            _ => Vec::new(),
        }
    }

    fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn is_settled(&self) -> bool {
        self.resolved || self.revealed
    }

    fn snapshot(&self, _now: DateTime<Utc>) -> ResolverSnapshot {
        ResolverSnapshot::Wipe {
            cleared: self.cleared_fraction(),
            threshold: self.threshold,
            cleared_enough: self.cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use picturebook_test_support::fixture_time;

    use super::*;

    fn wipe(has_next: bool) -> ThresholdWipe {
        ThresholdWipe::new(0.5, 0.08, 800, has_next)
    }

    #[test]
    fn test_coverage_below_threshold_does_not_clear() {
        // Arrange
        let mut wipe = wipe(true);

        // Act
        let effects = wipe.handle_input(&InteractionInput::CoverageReport(0.49), fixture_time());

        // Assert
        assert!(effects.is_empty());
        assert!(!wipe.is_settled());
    }

    #[test]
    fn test_threshold_with_next_frame_schedules_reveal() {
        // Arrange
        let mut wipe = wipe(true);
        let now = fixture_time();

        // Act
        let effects = wipe.handle_input(&InteractionInput::CoverageReport(0.51), now);
        let revealed = wipe.handle_timer(ResolverTimer::Reveal, now);

        // Assert
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                timer: ResolverTimer::Reveal,
                after_ms: 800,
            }]
        );
        assert_eq!(revealed, vec![Effect::RevealNextFrame]);
        assert!(wipe.is_settled());
        assert!(!wipe.is_resolved());
    }

    #[test]
    fn test_threshold_is_inclusive_and_resolves_without_next_frame() {
        // Arrange
        let mut wipe = wipe(false);
        let now = fixture_time();

        // Act
        let effects = wipe.handle_input(&InteractionInput::CoverageReport(0.5), now);
        let resolved = wipe.handle_timer(ResolverTimer::Resolve, now);
        let again = wipe.handle_timer(ResolverTimer::Resolve, now);

        // Assert
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                timer: ResolverTimer::Resolve,
                after_ms: 800,
            }]
        );
        assert_eq!(resolved, vec![Effect::Resolved]);
        assert!(again.is_empty());
    }

    #[test]
    fn test_input_after_clearing_is_ignored() {
        // Arrange
        let mut wipe = wipe(true);
        let now = fixture_time();
        wipe.handle_input(&InteractionInput::CoverageReport(0.8), now);

        // Act
        let effects = wipe.handle_input(&InteractionInput::CoverageReport(1.0), now);

        // Assert
        assert!(effects.is_empty());
        assert!((wipe.cleared_fraction() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reports_never_lower_the_cleared_fraction() {
        // Arrange
        let mut wipe = wipe(true);
        let now = fixture_time();

        // Act
        wipe.handle_input(&InteractionInput::CoverageReport(0.3), now);
        wipe.handle_input(&InteractionInput::CoverageReport(0.1), now);

        // Assert
        assert!((wipe.cleared_fraction() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sweeping_strokes_clear_the_mask() {
        // Arrange
        let mut wipe = ThresholdWipe::new(0.5, 0.1, 800, true);
        let now = fixture_time();
        let mut effects = Vec::new();

        // Act
        for row in 0..8 {
            let y = 0.0625 + f64::from(row) * 0.125;
            effects.extend(wipe.handle_input(&InteractionInput::WipeStart(Point::new(0.0, y)), now));
            effects.extend(wipe.handle_input(&InteractionInput::WipeMove(Point::new(1.0, y)), now));
            effects.extend(wipe.handle_input(&InteractionInput::WipeEnd, now));
        }

        // Assert
        assert!(wipe.cleared_fraction() >= 0.5);
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                timer: ResolverTimer::Reveal,
                after_ms: 800,
            }]
        );
    }

    #[test]
    fn test_move_without_press_erases_nothing() {
        // Arrange
        let mut wipe = wipe(true);

        // Act
        wipe.handle_input(&InteractionInput::WipeMove(Point::new(0.5, 0.5)), fixture_time());

        // Assert
        assert!(wipe.cleared_fraction().abs() < f64::EPSILON);
    }
}
