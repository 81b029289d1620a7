//! RGB ↔ HSV and RGB ↔ HSI conversions.
//!
//! RGB components are `f64` in `[0, 1]`; hue is in degrees, `[0, 360)`.
//! Converting back clamps every RGB component into `[0, 1]`, so a full
//! round trip through 8-bit values may drift by a level or two.

use core::f64::consts::PI;

use rgb::RGB8;

/// Hue (degrees), saturation and value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Hue (degrees), saturation and intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsi {
    pub h: f64,
    pub s: f64,
    pub i: f64,
}

fn unit(c: u8) -> f64 {
    f64::from(c) / 255.0
}

/// Scale a `[0, 1]` component to 8 bits with rounding.
fn to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Hsv {
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let c_max = r.max(g).max(b);
        let c_min = r.min(g).min(b);
        let delta = c_max - c_min;

        let h = if delta <= 0.0 {
            0.0
        } else if c_max == r {
            60.0 * ((g - b) / delta)
        } else if c_max == g {
            60.0 * ((b - r) / delta) + 120.0
        } else {
            60.0 * ((r - g) / delta) + 240.0
        };
        let s = if c_max == 0.0 { 0.0 } else { delta / c_max };

        Self {
            h: h.rem_euclid(360.0),
            s,
            v: c_max,
        }
    }

    pub fn to_rgb(&self) -> [f64; 3] {
        let h = self.h.rem_euclid(360.0);
        let c = self.v * self.s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = self.v - c;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        [r + m, g + m, b + m].map(|v| v.clamp(0.0, 1.0))
    }

    pub fn from_rgb8(px: RGB8) -> Self {
        Self::from_rgb(unit(px.r), unit(px.g), unit(px.b))
    }

    pub fn to_rgb8(&self) -> RGB8 {
        let [r, g, b] = self.to_rgb();
        RGB8::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl Hsi {
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let num = 0.5 * ((r - g) + (r - b));
        let den = ((r - g) * (r - g) + (r - b) * (g - b)).sqrt();
        let mut h = if den == 0.0 {
            0.0
        } else {
            (num / den).clamp(-1.0, 1.0).acos()
        };
        if b > g {
            h = 2.0 * PI - h;
        }

        let sum = r + g + b;
        let s = if sum <= 0.0 {
            0.0
        } else {
            (1.0 - 3.0 * r.min(g).min(b) / sum).max(0.0)
        };

        Self {
            h: h.to_degrees().rem_euclid(360.0),
            s,
            i: sum / 3.0,
        }
    }

    pub fn to_rgb(&self) -> [f64; 3] {
        let (s, i) = (self.s, self.i);
        // Two channels come from the sector formula, the third from r+g+b = 3i.
        let sector = |h: f64| {
            let low = i * (1.0 - s);
            let high = i * (1.0 + s * h.cos() / (PI / 3.0 - h).cos());
            (low, high, 3.0 * i - (low + high))
        };

        let h = self.h.rem_euclid(360.0).to_radians();
        let (r, g, b) = if h < 2.0 * PI / 3.0 {
            let (b, r, g) = sector(h);
            (r, g, b)
        } else if h < 4.0 * PI / 3.0 {
            let (r, g, b) = sector(h - 2.0 * PI / 3.0);
            (r, g, b)
        } else {
            let (g, b, r) = sector(h - 4.0 * PI / 3.0);
            (r, g, b)
        };
        [r, g, b].map(|v| v.clamp(0.0, 1.0))
    }

    pub fn from_rgb8(px: RGB8) -> Self {
        Self::from_rgb(unit(px.r), unit(px.g), unit(px.b))
    }

    pub fn to_rgb8(&self) -> RGB8 {
        let [r, g, b] = self.to_rgb();
        RGB8::new(to_u8(r), to_u8(g), to_u8(b))
    }
}
