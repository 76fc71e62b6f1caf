//! Simulation context and per-frame driver.

use gridstreak_core::{Axis, SceneParams};
use tracing::{debug, info};

use crate::grid::{draw_grid, lane_count};
use crate::projectile::{Projectile, create_projectile, spawn_projectile};
use crate::random::RandomSource;
use crate::raster::Surface;
use crate::schedule::AnimationClock;
use crate::streak::draw_streak;

/// Surface dimensions and lane counts the scene lays itself out with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Logical width of the surface.
    pub width: f64,
    /// Logical height of the surface.
    pub height: f64,
    /// Lanes for horizontal projectiles.
    pub rows: usize,
    /// Lanes for vertical projectiles.
    pub columns: usize,
}

/// Owns the view state and both projectile sequences for the lifetime of the
/// animation.
#[derive(Debug)]
pub struct Scene<R> {
    params: SceneParams,
    view: ViewState,
    horizontal: Vec<Projectile>,
    vertical: Vec<Projectile>,
    rng: R,
}

impl<R: RandomSource> Scene<R> {
    /// Lay out lanes for a `width` x `height` surface and fill both sequences.
    /// Initial projectiles are born at the clock's current time.
    pub fn new<C>(params: SceneParams, width: f64, height: f64, mut rng: R, clock: &C) -> Self
    where
        C: AnimationClock + ?Sized,
    {
        let rows = lane_count(&params.grid, Axis::Horizontal, height);
        let columns = lane_count(&params.grid, Axis::Vertical, width);
        let count = params.projectiles.count;

        let horizontal = (0..count)
            .map(|_| create_projectile(&mut rng, &params.projectiles, rows, width, None, clock))
            .collect();
        let vertical = (0..count)
            .map(|_| create_projectile(&mut rng, &params.projectiles, columns, height, None, clock))
            .collect();

        info!(width, height, rows, columns, count, "scene created");

        Self {
            params,
            view: ViewState {
                width,
                height,
                rows,
                columns,
            },
            horizontal,
            vertical,
            rng,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Projectiles travelling along `axis`, in slot order.
    pub fn projectiles(&self, axis: Axis) -> &[Projectile] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Track a new surface size.
    ///
    /// Lane counts stay as laid out at startup unless `relayout_on_resize` is
    /// set, in which case they are recomputed and existing rows are folded
    /// into the new range.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.view.width = width;
        self.view.height = height;

        if self.params.relayout_on_resize {
            self.view.rows = lane_count(&self.params.grid, Axis::Horizontal, height);
            self.view.columns = lane_count(&self.params.grid, Axis::Vertical, width);
            refold_rows(&mut self.horizontal, self.view.rows);
            refold_rows(&mut self.vertical, self.view.columns);
        }

        info!(
            width,
            height,
            rows = self.view.rows,
            columns = self.view.columns,
            "scene resized"
        );
    }

    /// Draw one frame at `time`, then recycle expired projectiles.
    /// Returns how many projectiles were replaced.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, time: f64) -> usize {
        let ViewState { width, height, .. } = self.view;

        surface.clear();
        draw_grid(
            surface,
            &self.params.grid,
            self.params.line_color,
            width,
            height,
        );

        for projectile in &self.horizontal {
            draw_streak(
                surface,
                projectile,
                Axis::Horizontal,
                &self.params,
                width,
                height,
                time,
            );
        }
        for projectile in &self.vertical {
            draw_streak(
                surface,
                projectile,
                Axis::Vertical,
                &self.params,
                width,
                height,
                time,
            );
        }

        self.recycle_expired(time)
    }

    /// Replace every projectile whose lifetime ended at or before `time` with
    /// a fresh one born at `time`, in the same slot.
    pub fn recycle_expired(&mut self, time: f64) -> usize {
        let ViewState {
            width,
            height,
            rows,
            columns,
        } = self.view;

        let mut recycled = 0;
        for (projectiles, count, span) in [
            (&mut self.horizontal, rows, width),
            (&mut self.vertical, columns, height),
        ] {
            for slot in projectiles.iter_mut().filter(|p| p.is_expired(time)) {
                *slot = spawn_projectile(
                    &mut self.rng,
                    &self.params.projectiles,
                    count,
                    span,
                    time,
                );
                recycled += 1;
            }
        }

        if recycled > 0 {
            debug!(time, recycled, "recycled projectiles");
        }
        recycled
    }
}

fn refold_rows(projectiles: &mut [Projectile], count: usize) {
    for p in projectiles {
        p.row = if count == 0 { 0 } else { p.row % count };
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::raster::{Paint, Raster};
    use crate::schedule::ManualClock;
    use crate::test_support::RecordingSurface;

    fn scene(params: SceneParams) -> Scene<StdRng> {
        let clock = ManualClock::starting_at(0.0);
        Scene::new(params, 1000.0, 400.0, StdRng::seed_from_u64(11), &clock)
    }

    #[test]
    fn test_new_fills_both_sequences() {
        let scene = scene(SceneParams::default());
        assert_eq!(scene.projectiles(Axis::Horizontal).len(), 10);
        assert_eq!(scene.projectiles(Axis::Vertical).len(), 10);
        assert_eq!(scene.view().rows, 5);
        assert_eq!(scene.view().columns, 20);
        assert!(
            scene
                .projectiles(Axis::Horizontal)
                .iter()
                .all(|p| p.row < 5 && p.start_pos < 1000.0 && p.start_time == 0.0)
        );
        assert!(
            scene
                .projectiles(Axis::Vertical)
                .iter()
                .all(|p| p.row < 20 && p.start_pos < 400.0)
        );
    }

    #[test]
    fn test_frame_draw_order() {
        let mut scene = scene(SceneParams::default());
        let mut surface = RecordingSurface::new(1000.0, 400.0);
        let recycled = scene.frame(&mut surface, 100.0);

        assert_eq!(recycled, 0);
        assert_eq!(surface.clears, 1);
        // 5 rows + 20 columns of grid, then 10 + 10 streaks.
        assert_eq!(surface.fills.len(), 45);
        assert!(
            surface.fills[..25]
                .iter()
                .all(|(_, paint)| matches!(paint, Paint::Solid(_)))
        );
        assert!(
            surface.fills[25..]
                .iter()
                .all(|(_, paint)| matches!(paint, Paint::Linear(_)))
        );
        // Horizontal streaks are one pixel tall, vertical ones one pixel wide.
        assert!(surface.fills[25..35].iter().all(|(r, _)| r.height == 1.0));
        assert!(surface.fills[35..].iter().all(|(r, _)| r.width == 1.0));
    }

    #[test]
    fn test_expired_projectiles_replaced_in_place() {
        let mut scene = scene(SceneParams::default());
        let expiry = scene.projectiles(Axis::Horizontal)[3].expires_at();
        let before_h = scene.projectiles(Axis::Horizontal).to_vec();
        let before_v = scene.projectiles(Axis::Vertical).to_vec();

        let mut surface = RecordingSurface::new(1000.0, 400.0);
        let recycled = scene.frame(&mut surface, expiry);

        let expected = before_h
            .iter()
            .chain(&before_v)
            .filter(|p| p.expires_at() <= expiry)
            .count();
        assert!(expected >= 1);
        assert_eq!(recycled, expected);

        for (old, new) in before_h
            .iter()
            .zip(scene.projectiles(Axis::Horizontal))
            .chain(before_v.iter().zip(scene.projectiles(Axis::Vertical)))
        {
            if old.expires_at() <= expiry {
                assert_eq!(new.start_time, expiry);
            } else {
                assert_eq!(new, old);
            }
        }
        assert_eq!(scene.projectiles(Axis::Horizontal)[3].start_time, expiry);
        assert_eq!(scene.projectiles(Axis::Horizontal).len(), 10);
        assert_eq!(scene.projectiles(Axis::Vertical).len(), 10);
    }

    #[test]
    fn test_nothing_recycled_before_expiry() {
        let mut scene = scene(SceneParams::default());
        // Shortest possible lifetime is 5000 ms from t = 0.
        assert_eq!(scene.recycle_expired(4999.0), 0);
        assert_eq!(scene.recycle_expired(15_000.0), 20);
    }

    #[test]
    fn test_sequences_never_shrink() {
        let mut scene = scene(SceneParams::default());
        let mut raster = Raster::new(250, 100, 4.0);
        let mut time = 0.0;
        while time < 60_000.0 {
            scene.frame(&mut raster, time);
            assert_eq!(scene.projectiles(Axis::Horizontal).len(), 10);
            assert_eq!(scene.projectiles(Axis::Vertical).len(), 10);
            assert!(
                scene
                    .projectiles(Axis::Horizontal)
                    .iter()
                    .chain(scene.projectiles(Axis::Vertical))
                    .all(|p| !p.is_expired(time))
            );
            time += 250.0;
        }
    }

    #[test]
    fn test_resize_keeps_lanes_by_default() {
        let mut scene = scene(SceneParams::default());
        let rows = scene.projectiles(Axis::Horizontal).to_vec();
        scene.resize(200.0, 100.0);
        assert_eq!(scene.view().width, 200.0);
        assert_eq!(scene.view().height, 100.0);
        assert_eq!(scene.view().rows, 5);
        assert_eq!(scene.view().columns, 20);
        assert_eq!(scene.projectiles(Axis::Horizontal), rows.as_slice());
    }

    #[test]
    fn test_resize_relayout_folds_rows() {
        let params = SceneParams {
            relayout_on_resize: true,
            ..SceneParams::default()
        };
        let mut scene = scene(params);
        scene.resize(200.0, 100.0);
        // (100 - 5) / 81 -> 2 rows, (200 - 21) / 49 -> 4 columns.
        assert_eq!(scene.view().rows, 2);
        assert_eq!(scene.view().columns, 4);
        assert!(scene.projectiles(Axis::Horizontal).iter().all(|p| p.row < 2));
        assert!(scene.projectiles(Axis::Vertical).iter().all(|p| p.row < 4));
    }

    #[test]
    fn test_zero_sized_surface_is_tolerated() {
        let clock = ManualClock::default();
        let mut scene = Scene::new(
            SceneParams::default(),
            0.0,
            0.0,
            StdRng::seed_from_u64(5),
            &clock,
        );
        let mut raster = Raster::new(0, 0, 4.0);
        scene.frame(&mut raster, 1000.0);
        assert_eq!(scene.view().rows, 0);
        assert_eq!(scene.view().columns, 0);
    }
}
