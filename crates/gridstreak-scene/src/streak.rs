//! Drawing a single projectile as a gradient streak.

use gridstreak_core::{Axis, SceneParams};

use crate::grid::lane_offset;
use crate::motion::{opacity, with_step};
use crate::projectile::{Direction, Projectile};
use crate::raster::{LinearGradient, Paint, Rect, Surface};

/// Trailing-to-leading endpoints of a streak starting at `start`.
fn endpoints(dir: Direction, start: f64, len: f64) -> (f64, f64) {
    match dir {
        Direction::Forward => (start, start + len),
        Direction::Backward => (start + len, start),
    }
}

/// Draw `projectile` on its lane for the frame at `time`.
pub fn draw_streak<S: Surface + ?Sized>(
    surface: &mut S,
    projectile: &Projectile,
    axis: Axis,
    params: &SceneParams,
    width: f64,
    height: f64,
    time: f64,
) {
    let along = with_step(projectile, axis.span(width, height), time);
    let across = lane_offset(&params.grid, axis, projectile.row);
    let alpha = opacity(projectile, time, &params.projectiles.fade) as f32;
    let (tail, head) = endpoints(projectile.dir, along, projectile.len);

    let (mut gradient, rect) = match axis {
        Axis::Horizontal => (
            LinearGradient::new(tail, across, head, across),
            Rect::new(along, across, projectile.len, 1.0),
        ),
        Axis::Vertical => (
            LinearGradient::new(across, tail, across, head),
            Rect::new(across, along, 1.0, projectile.len),
        ),
    };
    for stop in &params.gradient {
        gradient.add_color_stop(stop.offset, stop.color.scale_alpha(alpha));
    }

    surface.fill_rect(rect, &Paint::Linear(gradient));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;
    use crate::test_support::RecordingSurface;

    fn projectile(dir: Direction) -> Projectile {
        Projectile {
            start_time: 0.0,
            duration: 10_000.0,
            row: 1,
            len: 50.0,
            start_pos: 0.0,
            dir,
            steps: 10_000.0,
        }
    }

    fn gradient_of(paint: &Paint) -> &LinearGradient {
        match paint {
            Paint::Linear(g) => g,
            Paint::Solid(_) => panic!("expected a gradient"),
        }
    }

    #[test]
    fn test_horizontal_streak_geometry() {
        let params = SceneParams::default();
        let mut surface = RecordingSurface::new(1000.0, 400.0);
        let p = projectile(Direction::Forward);
        draw_streak(&mut surface, &p, Axis::Horizontal, &params, 1000.0, 400.0, 5000.0);

        let (rect, paint) = &surface.fills[0];
        assert_eq!(*rect, Rect::new(475.0, 86.0, 50.0, 1.0));
        let g = gradient_of(paint);
        assert_eq!((g.x0, g.y0, g.x1, g.y1), (475.0, 86.0, 525.0, 86.0));
    }

    #[test]
    fn test_backward_streak_reverses_gradient() {
        let params = SceneParams::default();
        let mut surface = RecordingSurface::new(400.0, 1000.0);
        let p = projectile(Direction::Backward);
        draw_streak(&mut surface, &p, Axis::Vertical, &params, 400.0, 1000.0, 5000.0);

        let (rect, paint) = &surface.fills[0];
        assert_eq!(*rect, Rect::new(70.0, 475.0, 1.0, 50.0));
        let g = gradient_of(paint);
        assert_eq!((g.x0, g.y0, g.x1, g.y1), (70.0, 525.0, 70.0, 475.0));
    }

    #[test]
    fn test_stop_alpha_scaled_by_opacity() {
        let params = SceneParams::default();
        let mut surface = RecordingSurface::new(1000.0, 400.0);
        let p = projectile(Direction::Forward);
        // 500 ms into a 1000 ms fade-in.
        draw_streak(&mut surface, &p, Axis::Horizontal, &params, 1000.0, 400.0, 500.0);

        let g = gradient_of(&surface.fills[0].1);
        assert_eq!(g.stops().len(), params.gradient.len());
        for (drawn, base) in g.stops().iter().zip(&params.gradient) {
            assert_eq!(drawn.offset, base.offset);
            assert!((drawn.color.a - base.color.a * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_invisible_at_birth() {
        let params = SceneParams::default();
        let mut raster = Raster::new(100, 100, 10.0);
        let p = projectile(Direction::Forward);
        draw_streak(&mut raster, &p, Axis::Horizontal, &params, 1000.0, 1000.0, 0.0);
        for x in 0..100 {
            assert_eq!(raster.pixel(x, 8).a, 0.0);
        }
    }

    #[test]
    fn test_visible_mid_life() {
        let params = SceneParams::default();
        let mut raster = Raster::new(100, 100, 10.0);
        let p = projectile(Direction::Forward);
        draw_streak(&mut raster, &p, Axis::Horizontal, &params, 1000.0, 1000.0, 5000.0);
        // Streak spans x 475..525 on row y = 86, i.e. device row 8.
        assert!(raster.pixel(49, 8).a > 0.5);
        assert_eq!(raster.pixel(30, 8).a, 0.0);
        assert_eq!(raster.pixel(49, 7).a, 0.0);
    }
}
