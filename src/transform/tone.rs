//! Per-pixel radiometric transforms. None of them look at neighbours.

use log::warn;
use rgb::RGB8;

use crate::color::Hsi;
use crate::error::{BmpError, Result};
use crate::grid::PixelGrid;

pub(crate) fn check_bit_depth(bit_depth: u32) -> Result<()> {
    if !(1..=8).contains(&bit_depth) {
        return Err(BmpError::InvalidParameter(format!(
            "quantization bit depth must be in 1..=8, got {bit_depth}"
        )));
    }
    Ok(())
}

pub(crate) fn check_gamma(gamma: f64) -> Result<()> {
    // NaN fails `>= 0` as well.
    if !(gamma >= 0.0) {
        return Err(BmpError::InvalidParameter(format!(
            "gamma must be non-negative, got {gamma}"
        )));
    }
    Ok(())
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(BmpError::InvalidParameter(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}

/// Apply `f` to the r, g and b channels of every pixel.
fn map_rgb(grid: &mut PixelGrid, f: impl Fn(u8) -> u8) {
    for px in grid.pixels_mut() {
        px.r = f(px.r);
        px.g = f(px.g);
        px.b = f(px.b);
    }
}

/// Round-trip every pixel through HSI, letting `f` edit the HSI triple.
fn map_hsi(grid: &mut PixelGrid, f: impl Fn(&mut Hsi)) {
    for px in grid.pixels_mut() {
        let mut hsi = Hsi::from_rgb8(RGB8::new(px.r, px.g, px.b));
        f(&mut hsi);
        let rgb = hsi.to_rgb8();
        px.r = rgb.r;
        px.g = rgb.g;
        px.b = rgb.b;
    }
}

/// Reduce every channel to `bit_depth` bits with `(c / 2^(8-n)) * (2^(8-n) - 1)`.
///
/// The scale-up factor is deliberately one short of the bucket width, so the
/// top bucket does not reach 255 (`bit_depth = 1` yields {0, 127}). It never
/// drops below 1, which makes `bit_depth = 8` the identity.
pub fn quantize(grid: &mut PixelGrid, bit_depth: u32, include_alpha: bool) -> Result<()> {
    check_bit_depth(bit_depth)?;
    let down = 1u32 << (8 - bit_depth);
    let up = (down - 1).max(1);
    let q = |c: u8| (u32::from(c) / down * up) as u8;
    for px in grid.pixels_mut() {
        px.r = q(px.r);
        px.g = q(px.g);
        px.b = q(px.b);
        if include_alpha {
            px.a = q(px.a);
        }
    }
    Ok(())
}

/// `255 · (c / 255)^gamma`, truncated.
pub fn gamma(grid: &mut PixelGrid, gamma: f64) -> Result<()> {
    check_gamma(gamma)?;
    let mut lut = [0u8; 256];
    for (c, out) in lut.iter_mut().enumerate() {
        *out = (255.0 * (c as f64 / 255.0).powf(gamma)) as u8;
    }
    map_rgb(grid, |c| lut[c as usize]);
    Ok(())
}

/// Stretch channels away from (or toward) mid-gray: `128 + factor · (c − 128)`.
pub fn contrast(grid: &mut PixelGrid, factor: f64) -> Result<()> {
    check_finite("contrast factor", factor)?;
    map_rgb(grid, |c| {
        (128 + (factor * (f64::from(c) - 128.0)) as i32).clamp(0, 255) as u8
    });
    Ok(())
}

/// Gray-world white balance: scale each channel so its mean matches the mean
/// of all three channel means. A channel whose mean is zero is left as is.
pub fn white_balance(grid: &mut PixelGrid) {
    let mut totals = [0u64; 3];
    for px in grid.pixels() {
        totals[0] += u64::from(px.r);
        totals[1] += u64::from(px.g);
        totals[2] += u64::from(px.b);
    }
    let count = grid.pixels().len() as f64;
    let means = totals.map(|t| t as f64 / count);
    let gray = means.iter().sum::<f64>() / 3.0;

    let mut factors = [1.0f64; 3];
    for (i, (factor, &mean)) in factors.iter_mut().zip(&means).enumerate() {
        if mean == 0.0 {
            warn!(
                "white balance: {} channel has zero mean, leaving it uncorrected",
                ["red", "green", "blue"][i]
            );
        } else {
            *factor = gray / mean;
        }
    }

    let scale = |c: u8, f: f64| (f64::from(c) * f).clamp(0.0, 255.0) as u8;
    for px in grid.pixels_mut() {
        px.r = scale(px.r, factors[0]);
        px.g = scale(px.g, factors[1]);
        px.b = scale(px.b, factors[2]);
    }
}

/// Rotate hue by `delta` degrees, wrapping into `[0, 360)`.
pub fn adjust_hue(grid: &mut PixelGrid, delta: f64) -> Result<()> {
    check_finite("hue delta", delta)?;
    map_hsi(grid, |hsi| hsi.h = (hsi.h + delta).rem_euclid(360.0));
    Ok(())
}

/// Multiply saturation by `factor`, clamped to `[0, 1]`.
pub fn adjust_saturation(grid: &mut PixelGrid, factor: f64) -> Result<()> {
    check_finite("saturation factor", factor)?;
    map_hsi(grid, |hsi| hsi.s = (hsi.s * factor).clamp(0.0, 1.0));
    Ok(())
}

/// Multiply intensity by `factor`, clamped to `[0, 1]`.
pub fn adjust_intensity(grid: &mut PixelGrid, factor: f64) -> Result<()> {
    check_finite("intensity factor", factor)?;
    map_hsi(grid, |hsi| hsi.i = (hsi.i * factor).clamp(0.0, 1.0));
    Ok(())
}
