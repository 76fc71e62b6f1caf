//! Grid and projectile streak animation for gridstreak.
//!
//! The scene is host-agnostic: it draws onto any [`Surface`] and is driven by
//! a [`FrameScheduler`] reading an [`AnimationClock`]. A software [`Raster`]
//! and the [`RasterView`] widget present it in a terminal.

mod grid;
mod motion;
mod present;
mod projectile;
mod random;
mod raster;
mod resize;
mod scene;
mod schedule;
mod streak;
#[cfg(test)]
mod test_support;

pub use grid::{draw_grid, lane_count, lane_offset, line_offsets};
pub use motion::{opacity, with_step};
pub use present::{CELL_PIXELS, RasterView, raster_size};
pub use projectile::{Direction, Projectile, create_projectile, spawn_projectile};
pub use random::RandomSource;
pub use raster::{LinearGradient, Paint, Raster, Rect, Surface};
pub use resize::ResizeObserver;
pub use scene::{Scene, ViewState};
pub use schedule::{AnimationClock, CancelHandle, FrameScheduler, ManualClock, MonotonicClock};
pub use streak::draw_streak;
