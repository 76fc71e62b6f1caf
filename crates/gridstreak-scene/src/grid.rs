//! Static background grid and lane geometry.

use gridstreak_core::{Axis, GridSpacing, Rgba};

use crate::raster::{Paint, Rect, Surface};

/// Offsets `origin, origin + spacing, ...` strictly below `extent`.
///
/// Lines lying entirely before 0 are skipped, so the number of offsets never
/// exceeds what fits into `[-1, extent)`. A non-positive spacing yields at
/// most the origin; a non-finite origin yields nothing.
pub fn line_offsets(origin: f64, spacing: f64, extent: f64) -> impl Iterator<Item = f64> {
    let (first, count) = line_range(origin, spacing, extent);
    (0..count)
        .map(move |i| origin + spacing * (first + i as f64))
        .take_while(move |v| *v < extent)
}

/// Index of the first visible line and how many follow it.
fn line_range(origin: f64, spacing: f64, extent: f64) -> (f64, usize) {
    if !(origin.is_finite() && extent.is_finite()) || origin >= extent {
        return (0.0, 0);
    }
    if !(spacing > 0.0 && spacing.is_finite()) {
        return (0.0, 1);
    }
    let first = ((-1.0 - origin) / spacing).ceil().max(0.0);
    let last = ((extent - origin) / spacing).ceil();
    let visible = ((extent.max(0.0) + 1.0) / spacing).floor() + 1.0;
    (first, (last - first).clamp(0.0, visible) as usize)
}

/// Offset of lane `row` for projectiles travelling along `axis`.
pub fn lane_offset(grid: &GridSpacing, axis: Axis, row: usize) -> f64 {
    grid.lane_origin(axis) + grid.lane_spacing(axis) * row as f64
}

/// Number of lanes that fit into `extent` for projectiles along `axis`.
pub fn lane_count(grid: &GridSpacing, axis: Axis, extent: f64) -> usize {
    let spacing = grid.lane_spacing(axis);
    if spacing <= 0.0 {
        return 0;
    }
    let count = ((extent - grid.lane_origin(axis)) / spacing).ceil();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Draw the horizontal, then the vertical grid lines.
pub fn draw_grid<S: Surface + ?Sized>(
    surface: &mut S,
    grid: &GridSpacing,
    color: Rgba,
    width: f64,
    height: f64,
) {
    let paint = Paint::Solid(color);
    for y in line_offsets(grid.origin_y(), grid.dy, height) {
        surface.fill_rect(Rect::new(0.0, y, width, 1.0), &paint);
    }
    for x in line_offsets(grid.origin_x(), grid.dx, width) {
        surface.fill_rect(Rect::new(x, 0.0, 1.0, height), &paint);
    }
}
