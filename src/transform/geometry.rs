//! Geometric transforms: mirroring and bilinear rescaling.

use crate::error::{BmpError, Result};
use crate::grid::{PixelGrid, check_representable};
use crate::pixel::Pixel;

/// Reverse the pixel order of every row.
pub fn flip_horizontal(grid: &mut PixelGrid) {
    for row in grid.rows_mut() {
        row.reverse();
    }
}

/// Effective scale factor: `rate` when upscaling, `1 / rate` otherwise.
pub(crate) fn scale_factor(rate: f64, is_upscaling: bool) -> Result<f64> {
    let factor = if is_upscaling { rate } else { 1.0 / rate };
    if !(factor > 0.0 && factor.is_finite()) {
        return Err(BmpError::InvalidParameter(format!(
            "scale rate must be positive and finite, got {rate}"
        )));
    }
    Ok(factor)
}

/// Output dimensions for `factor`, with the width optionally cropped to a
/// multiple of 4. Fails before anything is allocated if the result is empty
/// or too large.
pub(crate) fn scaled_dimensions(
    width: usize,
    height: usize,
    factor: f64,
    crop: bool,
) -> Result<(usize, usize)> {
    let mut new_w = (width as f64 * factor) as usize;
    let new_h = (height as f64 * factor) as usize;
    if crop {
        new_w = new_w / 4 * 4;
    }
    if new_w == 0 || new_h == 0 {
        return Err(BmpError::InvalidParameter(format!(
            "scaling {width}x{height} by {factor} leaves an empty {new_w}x{new_h} image"
        )));
    }
    check_representable(new_w, new_h)?;
    Ok((new_w, new_h))
}

/// Bilinear resize. Every channel, alpha included, is interpolated
/// independently and truncated.
pub fn resize(grid: &PixelGrid, rate: f64, is_upscaling: bool, crop: bool) -> Result<PixelGrid> {
    let factor = scale_factor(rate, is_upscaling)?;
    let (w, h) = (grid.width(), grid.height());
    let (new_w, new_h) = scaled_dimensions(w, h, factor, crop)?;

    let mut out = PixelGrid::new(new_w, new_h, Pixel::default())?;
    for (y, row) in out.rows_mut().enumerate() {
        let gy = y as f64 / factor;
        let y0 = (gy as usize).min(h - 1);
        let y1 = (y0 + 1).min(h - 1);
        let fy = gy - y0 as f64;

        for (x, px) in row.iter_mut().enumerate() {
            let gx = x as f64 / factor;
            let x0 = (gx as usize).min(w - 1);
            let x1 = (x0 + 1).min(w - 1);
            let fx = gx - x0 as f64;

            let p1 = grid.at(x0, y0);
            let p2 = grid.at(x1, y0);
            let p3 = grid.at(x0, y1);
            let p4 = grid.at(x1, y1);
            let lerp = |c1: u8, c2: u8, c3: u8, c4: u8| {
                (f64::from(c1) * (1.0 - fx) * (1.0 - fy)
                    + f64::from(c2) * fx * (1.0 - fy)
                    + f64::from(c3) * (1.0 - fx) * fy
                    + f64::from(c4) * fx * fy) as u8
            };
            *px = Pixel::new(
                lerp(p1.r, p2.r, p3.r, p4.r),
                lerp(p1.g, p2.g, p3.g, p4.g),
                lerp(p1.b, p2.b, p3.b, p4.b),
                lerp(p1.a, p2.a, p3.a, p4.a),
            );
        }
    }
    Ok(out)
}
