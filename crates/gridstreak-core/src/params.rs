//! Scene parameters: grid spacing, projectile ranges and fade timing.

use serde::{Deserialize, Serialize};

use crate::color::{GradientStop, Rgba, STREAK_GRADIENT};

/// Travel axis of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Travels along x, sits on a horizontal grid line (a row).
    Horizontal,
    /// Travels along y, sits on a vertical grid line (a column).
    Vertical,
}

impl Axis {
    /// Length of the travel span for this axis.
    pub fn span(self, width: f64, height: f64) -> f64 {
        match self {
            Axis::Horizontal => width,
            Axis::Vertical => height,
        }
    }
}

/// Inclusive numeric range a random value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map `t` in `[0, 1)` onto the range.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Placement of the background grid lines, in logical pixels.
///
/// `start_x`/`start_y` are the offsets of the first vertical/horizontal line.
/// When unset the first line sits one spacing in from the edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpacing {
    pub start_x: Option<f64>,
    pub dx: f64,
    pub start_y: Option<f64>,
    pub dy: f64,
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            start_x: Some(21.0),
            dx: 49.0,
            start_y: Some(5.0),
            dy: 81.0,
        }
    }
}

impl GridSpacing {
    /// x of the first vertical line.
    pub fn origin_x(&self) -> f64 {
        self.start_x.unwrap_or(self.dx)
    }

    /// y of the first horizontal line.
    pub fn origin_y(&self) -> f64 {
        self.start_y.unwrap_or(self.dy)
    }

    /// Offset of the first lane for projectiles travelling along `axis`.
    pub fn lane_origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.origin_y(),
            Axis::Vertical => self.origin_x(),
        }
    }

    /// Distance between lanes for projectiles travelling along `axis`.
    pub fn lane_spacing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.dy,
            Axis::Vertical => self.dx,
        }
    }
}

/// Fade-in and fade-out windows of a projectile's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeTiming {
    pub fade_in_ms: f64,
    pub fade_out_ms: f64,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            fade_in_ms: 1000.0,
            fade_out_ms: 1000.0,
        }
    }
}

/// Ranges projectiles are drawn from, and how many live per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileParams {
    /// Projectiles per axis.
    pub count: usize,
    /// Streak length in logical pixels.
    pub len: Bounds,
    /// Lifetime before recycling, in milliseconds.
    pub duration_ms: Bounds,
    /// Period of one full traversal, in milliseconds.
    pub steps_ms: Bounds,
    pub fade: FadeTiming,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            count: 10,
            len: Bounds::new(50.0, 700.0),
            duration_ms: Bounds::new(5000.0, 15000.0),
            steps_ms: Bounds::new(8000.0, 12000.0),
            fade: FadeTiming::default(),
        }
    }
}

/// Everything the scene needs to lay out and animate itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Recompute lane counts when the surface is resized.
    pub relayout_on_resize: bool,
    pub grid: GridSpacing,
    pub line_color: Rgba,
    pub projectiles: ProjectileParams,
    pub gradient: Vec<GradientStop>,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            relayout_on_resize: false,
            grid: GridSpacing::default(),
            line_color: Rgba::from_hsla(0.0, 0.0, 0.6, 0.1),
            projectiles: ProjectileParams::default(),
            gradient: STREAK_GRADIENT.to_vec(),
        }
    }
}
