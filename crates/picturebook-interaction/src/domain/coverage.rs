//! Coverage grid for wipe interactions.
//!
//! The mask starts fully opaque. Each brush dab lowers cell opacity with a
//! radial falloff, and consecutive dabs are joined by a wider stroke so fast
//! drags leave no gaps. A cell counts as cleared once its opacity drops
//! below [`CLEARED_OPACITY`].

use crate::domain::input::Point;

/// Cells per side.
pub const GRID_SIZE: usize = 64;

/// Opacity below which a cell counts as cleared.
pub const CLEARED_OPACITY: f64 = 100.0 / 255.0;

/// Width of the joining stroke relative to the brush radius.
const STROKE_WIDTH_FACTOR: f64 = 1.5;

/// Strength of the joining stroke.
const STROKE_STRENGTH: f64 = 0.9;

/// Opacity mask over the unit square.
#[derive(Debug, Clone)]
pub struct CoverageGrid {
    opacity: Vec<f64>,
}

impl Default for CoverageGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverageGrid {
    /// A fully opaque mask.
    #[must_use]
    pub fn new() -> Self {
        Self {
            opacity: vec![1.0; GRID_SIZE * GRID_SIZE],
        }
    }

    /// Erases a soft disc of `radius` around `center`.
    pub fn erase_disc(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        self.apply(|cell| {
            let d = cell.distance(center) / radius;
            brush_strength(d)
        });
    }

    /// Erases a stroke joining two brush positions.
    pub fn erase_segment(&mut self, from: Point, to: Point, radius: f64) {
        let half_width = radius * STROKE_WIDTH_FACTOR / 2.0;
        if half_width <= 0.0 {
            return;
        }
        self.apply(|cell| {
            if distance_to_segment(cell, from, to) <= half_width {
                STROKE_STRENGTH
            } else {
                0.0
            }
        });
    }

    /// Fraction of cells that count as cleared.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cleared_fraction(&self) -> f64 {
        let cleared = self
            .opacity
            .iter()
            .filter(|&&opacity| opacity < CLEARED_OPACITY)
            .count();
        cleared as f64 / self.opacity.len() as f64
    }

    fn apply(&mut self, strength_at: impl Fn(Point) -> f64) {
        for (i, opacity) in self.opacity.iter_mut().enumerate() {
            let strength = strength_at(cell_center(i));
            if strength > 0.0 {
                *opacity *= 1.0 - strength;
            }
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn cell_center(index: usize) -> Point {
    let size = GRID_SIZE as f64;
    let col = (index % GRID_SIZE) as f64;
    let row = (index / GRID_SIZE) as f64;
    Point {
        x: (col + 0.5) / size,
        y: (row + 0.5) / size,
    }
}

/// Radial gradient of the brush: full strength at the centre, 0.7 at 60% of
/// the radius, nothing at the rim.
fn brush_strength(d: f64) -> f64 {
    if d >= 1.0 {
        0.0
    } else if d <= 0.6 {
        1.0 - 0.3 * (d / 0.6)
    } else {
        0.7 * (1.0 - (d - 0.6) / 0.4)
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point {
        x: a.x + t * dx,
        y: a.y + t * dy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_fully_covered() {
        assert!(CoverageGrid::new().cleared_fraction().abs() < f64::EPSILON);
    }

    #[test]
    fn test_erase_disc_clears_area_near_centre_only() {
        // Arrange
        let mut grid = CoverageGrid::new();

        // Act
        grid.erase_disc(Point::new(0.5, 0.5), 0.1);

        // Assert
        let cleared = grid.cleared_fraction();
        assert!(cleared > 0.01, "cleared {cleared}");
        assert!(cleared < std::f64::consts::PI * 0.01, "cleared {cleared}");
    }

    #[test]
    fn test_erase_segment_clears_a_band() {
        // Arrange
        let mut grid = CoverageGrid::new();

        // Act
        grid.erase_segment(Point::new(0.0, 0.5), Point::new(1.0, 0.5), 0.1);

        // Assert
        let cleared = grid.cleared_fraction();
        assert!((0.12..=0.18).contains(&cleared), "cleared {cleared}");
    }

    #[test]
    fn test_brush_strength_falls_off_to_rim() {
        assert!((brush_strength(0.0) - 1.0).abs() < 1e-9);
        assert!((brush_strength(0.6) - 0.7).abs() < 1e-9);
        assert!(brush_strength(1.0).abs() < 1e-9);
    }
}
