//! Core types for the gridstreak animated background.
//!
//! Holds the plain data shared by the scene, the configuration loader and the
//! terminal host: colours, gradient stops, grid spacing and projectile
//! parameters. Nothing in here draws or keeps time.

mod color;
mod params;

pub use color::{GradientStop, Rgba, STREAK_GRADIENT};
pub use params::{Axis, Bounds, FadeTiming, GridSpacing, ProjectileParams, SceneParams};
