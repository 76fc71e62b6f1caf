//! Drawing surface abstraction and a software RGBA raster implementing it.

use gridstreak_core::{GradientStop, Rgba};

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Linear gradient between two points, with canvas-style colour stops.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    /// Append a stop. Stops are kept ordered by offset; equal offsets keep
    /// insertion order.
    pub fn add_color_stop(&mut self, offset: f32, color: Rgba) {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, GradientStop { offset, color });
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Colour at a point, found by projecting it onto the gradient line.
    /// A gradient with no stops or zero length is transparent everywhere.
    pub fn color_at(&self, x: f64, y: f64) -> Rgba {
        let (dx, dy) = (self.x1 - self.x0, self.y1 - self.y0);
        let len2 = dx * dx + dy * dy;
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if len2 == 0.0 {
            return Rgba::TRANSPARENT;
        }

        let t = (((x - self.x0) * dx + (y - self.y0) * dy) / len2).clamp(0.0, 1.0) as f32;
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        let i = self.stops.partition_point(|s| s.offset <= t);
        let (lo, hi) = (self.stops[i - 1], self.stops[i]);
        let span = hi.offset - lo.offset;
        let f = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
        Premul::from(lo.color).lerp(Premul::from(hi.color), f).into()
    }
}

/// How a rectangle is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

/// A 2D surface the scene draws onto, addressed in logical pixels.
pub trait Surface {
    /// Logical width and height.
    fn size(&self) -> (f64, f64);

    /// Make every pixel transparent.
    fn clear(&mut self);

    /// Composite `paint` over the pixels covered by `rect`.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
}

/// Premultiplied colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Premul {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Premul {
    fn lerp(self, other: Premul, t: f32) -> Premul {
        Premul {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    fn over(self, dst: Premul) -> Premul {
        let k = 1.0 - self.a;
        Premul {
            r: self.r + dst.r * k,
            g: self.g + dst.g * k,
            b: self.b + dst.b * k,
            a: self.a + dst.a * k,
        }
    }
}

impl From<Rgba> for Premul {
    fn from(c: Rgba) -> Self {
        let a = c.a.clamp(0.0, 1.0);
        Premul {
            r: f32::from(c.r) / 255.0 * a,
            g: f32::from(c.g) / 255.0 * a,
            b: f32::from(c.b) / 255.0 * a,
            a,
        }
    }
}

impl From<Premul> for Rgba {
    fn from(p: Premul) -> Self {
        if p.a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let channel = |v: f32| ((v / p.a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::new(channel(p.r), channel(p.g), channel(p.b), p.a.min(1.0))
    }
}

/// Software raster of device pixels.
///
/// Each device pixel covers `scale` logical pixels along both axes. Any
/// rectangle touching a device pixel paints all of it, so hairlines thinner
/// than a device pixel stay visible.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    scale: f64,
    pixels: Vec<Premul>,
}

impl Raster {
    /// Create a cleared raster of `width` x `height` device pixels.
    pub fn new(width: usize, height: usize, scale: f64) -> Self {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        Self {
            width,
            height,
            scale,
            pixels: vec![Premul::default(); width * height],
        }
    }

    /// Device size in pixels.
    pub fn device_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reallocate to a new device size. Contents are cleared.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Premul::default());
    }

    /// Straight-alpha colour of a device pixel; transparent when out of range.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.premul_at(x, y).map(Rgba::from).unwrap_or(Rgba::TRANSPARENT)
    }

    /// Device pixel flattened over an opaque `backdrop`.
    pub fn composite(&self, x: usize, y: usize, backdrop: Rgba) -> Rgba {
        let p = self.premul_at(x, y).unwrap_or_default();
        let k = 1.0 - p.a;
        let channel =
            |src: f32, dst: u8| ((src + f32::from(dst) / 255.0 * k).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::new(
            channel(p.r, backdrop.r),
            channel(p.g, backdrop.g),
            channel(p.b, backdrop.b),
            1.0,
        )
    }

    fn premul_at(&self, x: usize, y: usize) -> Option<Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Device pixel range `[start, end)` covered by a logical interval.
    fn device_range(&self, start: f64, len: f64, limit: usize) -> (usize, usize) {
        let lo = (start / self.scale).floor();
        let hi = ((start + len) / self.scale).ceil().max(lo + 1.0);
        let clamp = |v: f64| v.clamp(0.0, limit as f64) as usize;
        (clamp(lo), clamp(hi))
    }
}

impl Surface for Raster {
    fn size(&self) -> (f64, f64) {
        (self.width as f64 * self.scale, self.height as f64 * self.scale)
    }

    fn clear(&mut self) {
        self.pixels.fill(Premul::default());
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return;
        }
        let (x0, x1) = self.device_range(rect.x, rect.width, self.width);
        let (y0, y1) = self.device_range(rect.y, rect.height, self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let src = match paint {
                    Paint::Solid(color) => Premul::from(*color),
                    Paint::Linear(gradient) => Premul::from(gradient.color_at(
                        (px as f64 + 0.5) * self.scale,
                        (py as f64 + 0.5) * self.scale,
                    )),
                };
                if src.a <= 0.0 {
                    continue;
                }
                let idx = py * self.width + px;
                self.pixels[idx] = src.over(self.pixels[idx]);
            }
        }
    }
}
