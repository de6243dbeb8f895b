//! Input delivered to the interaction of the current page.

use serde::{Deserialize, Serialize};

/// Region a two-stage interaction expects first.
pub const BUCKET_REGION: &str = "bucket";

/// Region a two-stage interaction expects second.
pub const FIREPLACE_REGION: &str = "fireplace";

/// A position on the interaction surface, normalised to `0.0..=1.0` on both
/// axes with the origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Creates a point, clamping both coordinates onto the surface.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// What a tap landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapTarget {
    /// Anywhere on the page artwork.
    Surface,
    /// A named hotspot.
    Region(String),
}

/// One input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionInput {
    /// A tap or click.
    Tap(TapTarget),
    /// Pointer pressed on a wipeable surface.
    WipeStart(Point),
    /// Pointer dragged while pressed.
    WipeMove(Point),
    /// Pointer released.
    WipeEnd,
    /// Cleared fraction measured by a renderer that tracks coverage itself.
    CoverageReport(f64),
}

impl InteractionInput {
    /// A tap on the page artwork.
    #[must_use]
    pub fn surface_tap() -> Self {
        Self::Tap(TapTarget::Surface)
    }

    /// A tap on a named region.
    #[must_use]
    pub fn region_tap(region: &str) -> Self {
        Self::Tap(TapTarget::Region(region.to_owned()))
    }
}
