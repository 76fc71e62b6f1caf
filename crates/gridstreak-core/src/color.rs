//! Colour types used by the grid and the streak gradient.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An sRGB colour with straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a colour from hue (degrees), saturation and lightness (`0.0..=1.0`).
    pub fn from_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        if s == 0.0 {
            let v = (l * 255.0) as u8;
            return Self::new(v, v, v, a);
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        let h = h.rem_euclid(360.0) / 360.0;

        let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
        let g = hue_to_rgb(p, q, h);
        let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

        Self::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, a)
    }

    /// Return the same colour with its alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Opaque terminal colour, alpha dropped.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// One colour stop of a linear gradient. `offset` runs from 0 (trailing edge)
/// to 1 (leading edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            offset,
            color: Rgba::new(r, g, b, a),
        }
    }
}

/// Colour ramp of a streak, tail to head.
pub const STREAK_GRADIENT: [GradientStop; 5] = [
    GradientStop::new(0.0, 174, 255, 132, 0.43),
    GradientStop::new(0.0001, 167, 217, 254, 0.0),
    GradientStop::new(0.224, 169, 239, 255, 1.0),
    GradientStop::new(0.6562, 178, 255, 230, 1.0),
    GradientStop::new(0.9427, 178, 255, 230, 0.0),
];
