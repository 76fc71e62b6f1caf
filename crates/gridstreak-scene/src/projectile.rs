//! Projectile model and construction.

use gridstreak_core::ProjectileParams;

use crate::random::RandomSource;
use crate::schedule::AnimationClock;

/// Travel direction along the projectile's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards larger coordinates.
    Forward,
    /// Towards smaller coordinates.
    Backward,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// One streak travelling along a lane. Immutable; replaced wholesale when it
/// expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Animation-clock time the projectile was born, in milliseconds.
    pub start_time: f64,
    /// Lifetime in milliseconds.
    pub duration: f64,
    /// Lane index.
    pub row: usize,
    /// Streak length in logical pixels.
    pub len: f64,
    /// Offset along the travel axis at phase zero.
    pub start_pos: f64,
    pub dir: Direction,
    /// Period of one full traversal in milliseconds.
    pub steps: f64,
}

impl Projectile {
    /// Time at which the projectile should be recycled.
    pub fn expires_at(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn is_expired(&self, time: f64) -> bool {
        self.expires_at() <= time
    }
}

/// Draw a fresh projectile for a sequence with `count` lanes over a travel
/// span of `span` pixels.
///
/// `current_time` is the birth time; when absent the clock's current time is
/// used. A lane count of zero yields lane 0.
pub fn create_projectile<R, C>(
    rng: &mut R,
    params: &ProjectileParams,
    count: usize,
    span: f64,
    current_time: Option<f64>,
    clock: &C,
) -> Projectile
where
    R: RandomSource + ?Sized,
    C: AnimationClock + ?Sized,
{
    let start_time = current_time.unwrap_or_else(|| clock.now_ms());
    spawn_projectile(rng, params, count, span, start_time)
}

/// Same as [`create_projectile`] with a known birth time.
pub fn spawn_projectile<R>(
    rng: &mut R,
    params: &ProjectileParams,
    count: usize,
    span: f64,
    start_time: f64,
) -> Projectile
where
    R: RandomSource + ?Sized,
{
    let len = params.len.lerp(rng.next_unit());
    let steps = params.steps_ms.lerp(rng.next_unit());
    let duration = params.duration_ms.lerp(rng.next_unit());
    let row = uniform_index(rng.next_unit(), count);
    let start_pos = if span > 0.0 {
        (rng.next_unit() * span).floor().min(span.ceil() - 1.0).max(0.0)
    } else {
        rng.next_unit();
        0.0
    };
    let dir = if rng.next_unit() < 0.5 {
        Direction::Backward
    } else {
        Direction::Forward
    };

    Projectile {
        start_time,
        duration,
        row,
        len,
        start_pos,
        dir,
        steps,
    }
}

fn uniform_index(unit: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    ((unit * count as f64) as usize).min(count - 1)
}
