//! Page-turn animator.
//!
//! Pure presentation. The animator is handed a direction when the
//! navigation controller accepts a transition, samples a progress curve
//! against the clock, and reports completion exactly once. It never looks
//! at content state.

use chrono::{DateTime, Utc};
use picturebook_content::domain::tuning::InteractionTuning;
use picturebook_core::clock::millis;
use serde::{Deserialize, Serialize};

use crate::domain::navigation::Direction;

/// Distance from the target below which a spring counts as settled.
pub const REST_DELTA: f64 = 0.01;

/// Upper bound on how long any flip may take.
pub const MAX_FLIP_MS: u64 = 10_000;

/// Easing functions for time-based curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Accelerating.
    InQuad,
    /// Decelerating.
    OutQuad,
    /// Accelerating then decelerating.
    #[default]
    InOutQuad,
    /// Accelerating, cubic.
    InCubic,
    /// Decelerating, cubic.
    OutCubic,
    /// Accelerating then decelerating, cubic.
    InOutCubic,
}

impl Ease {
    /// Maps linear time `t` in `[0, 1]` onto eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// The curve that drives flip progress from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum FlipCurve {
    /// Damped spring released from 0 towards 1.
    Spring {
        /// Spring constant.
        stiffness: f64,
        /// Damping coefficient.
        damping: f64,
        /// Moving mass.
        mass: f64,
    },
    /// Fixed duration with an easing function.
    Timed {
        /// Duration in milliseconds.
        duration_ms: u64,
        /// Easing applied to linear time.
        ease: Ease,
    },
}

impl FlipCurve {
    /// The spring configured for a book.
    #[must_use]
    pub fn from_tuning(tuning: &InteractionTuning) -> Self {
        Self::Spring {
            stiffness: tuning.flip_stiffness,
            damping: tuning.flip_damping,
            mass: tuning.flip_mass,
        }
    }

    /// Progress after `elapsed_ms`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        let value = match *self {
            Self::Spring {
                stiffness,
                damping,
                mass,
            } => spring_position(stiffness, damping, mass, elapsed_ms / 1000.0),
            Self::Timed { duration_ms, ease } => {
                if duration_ms == 0 {
                    1.0
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let t = elapsed_ms / duration_ms as f64;
                    ease.apply(t)
                }
            }
        };
        value.clamp(0.0, 1.0)
    }

    /// Milliseconds until the curve is at rest, capped at [`MAX_FLIP_MS`].
    #[must_use]
    pub fn settle_ms(&self) -> u64 {
        match *self {
            Self::Timed { duration_ms, .. } => duration_ms.min(MAX_FLIP_MS),
            Self::Spring {
                stiffness,
                damping,
                mass,
            } => spring_settle_ms(stiffness, damping, mass),
        }
    }
}

/// Step response of a damped spring starting at rest at 0, target 1.
fn spring_position(stiffness: f64, damping: f64, mass: f64, secs: f64) -> f64 {
    if secs <= 0.0 {
        return 0.0;
    }
    let omega = (stiffness / mass).sqrt();
    let zeta = damping / (2.0 * (stiffness * mass).sqrt());
    if zeta < 1.0 {
        let decay = zeta * omega;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = (-decay * secs).exp();
        1.0 - envelope * ((omega_d * secs).cos() + (decay / omega_d) * (omega_d * secs).sin())
    } else if (zeta - 1.0).abs() < f64::EPSILON {
        1.0 - (-omega * secs).exp() * (1.0 + omega * secs)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 - (r2 * (r1 * secs).exp() - r1 * (r2 * secs).exp()) / (r2 - r1)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn spring_settle_ms(stiffness: f64, damping: f64, mass: f64) -> u64 {
    if stiffness <= 0.0 || mass <= 0.0 || damping <= 0.0 {
        return MAX_FLIP_MS;
    }
    let omega = (stiffness / mass).sqrt();
    let zeta = damping / (2.0 * (stiffness * mass).sqrt());
    if zeta < 1.0 {
        // Bound the oscillation by its envelope.
        let decay = zeta * omega;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let amplitude = (1.0 + (decay / omega_d).powi(2)).sqrt();
        let secs = (amplitude / REST_DELTA).ln() / decay;
        return ((secs * 1000.0).ceil() as u64).min(MAX_FLIP_MS);
    }
    // Monotonic approach: scan for the first time inside the rest band.
    (1..=MAX_FLIP_MS)
        .find(|&ms| {
            #[allow(clippy::cast_precision_loss)]
            let secs = ms as f64 / 1000.0;
            1.0 - spring_position(stiffness, damping, mass, secs) < REST_DELTA
        })
        .unwrap_or(MAX_FLIP_MS)
}

/// One sampled frame of a page flip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlipFrame {
    /// Turn direction.
    pub direction: Direction,
    /// Progress in `[0, 1]`.
    pub progress: f64,
    /// Page rotation around the spine, in degrees. Negative when turning
    /// forward.
    pub rotate_y: f64,
    /// Opacity of the shadow cast by the turning page.
    pub shadow_opacity: f64,
    /// Scale of the turning page.
    pub scale: f64,
    /// Opacity of the page underneath.
    pub under_opacity: f64,
}

impl FlipFrame {
    /// Derives the visual values for `progress`.
    #[must_use]
    pub fn at(direction: Direction, progress: f64) -> Self {
        let p = progress.clamp(0.0, 1.0);
        let sweep = match direction {
            Direction::Forward => -180.0,
            Direction::Backward => 180.0,
        };
        Self {
            direction,
            progress: p,
            rotate_y: sweep * p,
            shadow_opacity: keyframes(p, &[(0.0, 0.0), (0.5, 0.35), (1.0, 0.0)]),
            scale: keyframes(p, &[(0.0, 1.0), (0.5, 0.96), (1.0, 1.0)]),
            under_opacity: keyframes(p, &[(0.0, 0.5), (0.2, 0.85), (1.0, 1.0)]),
        }
    }
}

/// Piecewise-linear interpolation through `(at, value)` stops.
fn keyframes(t: f64, stops: &[(f64, f64)]) -> f64 {
    let Some(&(first_at, first_value)) = stops.first() else {
        return 0.0;
    };
    if t <= first_at {
        return first_value;
    }
    for pair in stops.windows(2) {
        let (a_at, a_value) = pair[0];
        let (b_at, b_value) = pair[1];
        if t <= b_at {
            let span = b_at - a_at;
            if span <= 0.0 {
                return b_value;
            }
            return a_value + (b_value - a_value) * (t - a_at) / span;
        }
    }
    stops.last().map_or(first_value, |&(_, value)| value)
}

#[derive(Debug, Clone, Copy)]
struct ActiveFlip {
    direction: Direction,
    started_at: DateTime<Utc>,
    finishes_at: DateTime<Utc>,
}

/// Drives one page flip at a time.
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    curve: FlipCurve,
    active: Option<ActiveFlip>,
}

impl TransitionAnimator {
    /// Creates an idle animator.
    #[must_use]
    pub fn new(curve: FlipCurve) -> Self {
        Self {
            curve,
            active: None,
        }
    }

    /// The configured curve.
    #[must_use]
    pub fn curve(&self) -> FlipCurve {
        self.curve
    }

    /// Starts a flip, replacing any flip already running. Returns when it
    /// will finish.
    pub fn start(&mut self, direction: Direction, now: DateTime<Utc>) -> DateTime<Utc> {
        let finishes_at = now + millis(self.curve.settle_ms());
        self.active = Some(ActiveFlip {
            direction,
            started_at: now,
            finishes_at,
        });
        tracing::debug!(?direction, settle_ms = self.curve.settle_ms(), "flip started");
        finishes_at
    }

    /// Whether a flip is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// When the running flip finishes.
    #[must_use]
    pub fn finishes_at(&self) -> Option<DateTime<Utc>> {
        self.active.map(|a| a.finishes_at)
    }

    /// The visual state of the running flip at `now`. The finishing
    /// instant always samples at progress 1.
    #[must_use]
    pub fn sample(&self, now: DateTime<Utc>) -> Option<FlipFrame> {
        let active = self.active?;
        if now >= active.finishes_at {
            return Some(FlipFrame::at(active.direction, 1.0));
        }
        #[allow(clippy::cast_precision_loss)]
        let elapsed_ms = (now - active.started_at).num_milliseconds().max(0) as f64;
        Some(FlipFrame::at(
            active.direction,
            self.curve.progress_at(elapsed_ms),
        ))
    }

    /// Reports the direction of a flip that has finished by `now`. Returns
    /// `Some` exactly once per flip.
    pub fn poll_finished(&mut self, now: DateTime<Utc>) -> Option<Direction> {
        let active = self.active?;
        if now < active.finishes_at {
            return None;
        }
        self.active = None;
        tracing::debug!(direction = ?active.direction, "flip finished");
        Some(active.direction)
    }
}

#[cfg(test)]
mod tests {
    use picturebook_test_support::fixture_time;

    use super::*;

    fn default_spring() -> FlipCurve {
        FlipCurve::from_tuning(&InteractionTuning::default())
    }

    #[test]
    fn test_ease_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::InQuad,
            Ease::OutQuad,
            Ease::InOutQuad,
            Ease::InCubic,
            Ease::OutCubic,
            Ease::InOutCubic,
        ] {
            assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
        }
        assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_default_spring_settles_in_under_a_second() {
        // Arrange
        let curve = default_spring();

        // Act
        let settle = curve.settle_ms();

        // Assert
        assert!((500..700).contains(&settle), "settle was {settle} ms");
        #[allow(clippy::cast_precision_loss)]
        let at_settle = curve.progress_at(settle as f64);
        assert!((1.0 - at_settle).abs() < REST_DELTA);
    }

    #[test]
    fn test_spring_progress_rises_from_zero() {
        let curve = default_spring();

        assert!(curve.progress_at(0.0).abs() < 1e-12);
        assert!(curve.progress_at(50.0) > 0.0);
        assert!(curve.progress_at(100.0) > curve.progress_at(50.0));
    }

    #[test]
    fn test_overdamped_spring_settles() {
        let curve = FlipCurve::Spring {
            stiffness: 100.0,
            damping: 40.0,
            mass: 1.0,
        };

        let settle = curve.settle_ms();

        assert!(settle > 0 && settle < MAX_FLIP_MS);
    }

    #[test]
    fn test_flip_frame_keyframes() {
        // Act
        let start = FlipFrame::at(Direction::Forward, 0.0);
        let middle = FlipFrame::at(Direction::Forward, 0.5);
        let end = FlipFrame::at(Direction::Backward, 1.0);

        // Assert
        assert!(start.rotate_y.abs() < 1e-12);
        assert!((start.under_opacity - 0.5).abs() < 1e-12);
        assert!((middle.rotate_y + 90.0).abs() < 1e-9);
        assert!((middle.shadow_opacity - 0.35).abs() < 1e-12);
        assert!((middle.scale - 0.96).abs() < 1e-12);
        assert!((end.rotate_y - 180.0).abs() < 1e-9);
        assert!(end.shadow_opacity.abs() < 1e-12);
        assert!((end.under_opacity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_animator_reports_finish_exactly_once() {
        // Arrange
        let t0 = fixture_time();
        let mut animator = TransitionAnimator::new(FlipCurve::Timed {
            duration_ms: 300,
            ease: Ease::Linear,
        });
        let finishes_at = animator.start(Direction::Forward, t0);

        // Act
        let early = animator.poll_finished(t0 + millis(299));
        let halfway = animator.sample(t0 + millis(150));
        let first = animator.poll_finished(finishes_at);
        let second = animator.poll_finished(finishes_at + millis(1));

        // Assert
        assert_eq!(early, None);
        assert!((halfway.map(|f| f.progress).unwrap_or_default() - 0.5).abs() < 1e-9);
        assert_eq!(first, Some(Direction::Forward));
        assert_eq!(second, None);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_sample_at_finish_is_exactly_one() {
        let t0 = fixture_time();
        let mut animator = TransitionAnimator::new(default_spring());
        let finishes_at = animator.start(Direction::Backward, t0);

        let frame = animator.sample(finishes_at).unwrap();

        assert!((frame.progress - 1.0).abs() < f64::EPSILON);
    }
}
