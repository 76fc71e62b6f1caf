//! Position and opacity of a projectile at a point in time.

use gridstreak_core::FadeTiming;

use crate::projectile::Projectile;

/// Coordinate of the projectile's trailing edge along its travel axis.
///
/// Motion is periodic with period `steps` and independent of the
/// projectile's lifetime. The coordinate ranges over `[-len, span)` so the
/// streak slides in and out past both edges instead of popping.
pub fn with_step(projectile: &Projectile, span: f64, time: f64) -> f64 {
    let Projectile {
        len,
        steps,
        start_pos,
        dir,
        ..
    } = *projectile;

    let total = span + len;
    if total <= 0.0 || steps <= 0.0 {
        return -len;
    }

    let phase = time.rem_euclid(steps) / steps;
    let step = phase * total;
    let mut pos = (start_pos + step * dir.sign() + total).rem_euclid(total);
    // rem_euclid may round up to the modulus itself.
    if pos >= total {
        pos -= total;
    }
    pos - len
}

/// Opacity multiplier in `[0, 1]` from the fade-in and fade-out windows.
///
/// The fade-in check runs last and wins when both windows overlap.
pub fn opacity(projectile: &Projectile, time: f64, fade: &FadeTiming) -> f64 {
    let mut opacity = 1.0;

    let to_end = projectile.start_time + projectile.duration - time;
    if to_end < fade.fade_out_ms {
        opacity = if to_end > 0.0 {
            to_end / fade.fade_out_ms
        } else {
            0.0
        };
    }

    let from_start = time - projectile.start_time;
    if from_start < fade.fade_in_ms {
        opacity = if from_start > 0.0 {
            from_start / fade.fade_in_ms
        } else {
            0.0
        };
    }

    opacity.clamp(0.0, 1.0)
}
