//! Image comparison: mean squared error and PSNR.

use crate::error::{BmpError, Result};
use crate::grid::PixelGrid;

fn check_same_size(a: &PixelGrid, b: &PixelGrid) -> Result<()> {
    let (left, right) = ((a.width(), a.height()), (b.width(), b.height()));
    if left != right {
        return Err(BmpError::DimensionMismatch { left, right });
    }
    Ok(())
}

/// Per-channel squared error `[r, g, b]`, each divided by `3 · w · h`.
///
/// The three values add up to the mean squared error over all colour samples.
pub fn mse(a: &PixelGrid, b: &PixelGrid) -> Result<[f64; 3]> {
    check_same_size(a, b)?;
    let mut sums = [0u64; 3];
    for (p, q) in a.pixels().iter().zip(b.pixels()) {
        for (sum, (x, y)) in sums
            .iter_mut()
            .zip([(p.r, q.r), (p.g, q.g), (p.b, q.b)])
        {
            let d = u64::from(x.abs_diff(y));
            *sum += d * d;
        }
    }
    let samples = 3.0 * a.pixels().len() as f64;
    Ok(sums.map(|s| s as f64 / samples))
}

/// Peak signal-to-noise ratio in dB. Identical images give `+∞`.
pub fn psnr(a: &PixelGrid, b: &PixelGrid) -> Result<f64> {
    let total: f64 = mse(a, b)?.iter().sum();
    if total == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (255.0 * 255.0 / total).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn identical_images_have_infinite_psnr() {
        let a = PixelGrid::new(3, 2, Pixel::new(1, 2, 3, 4)).unwrap();
        assert_eq!(mse(&a, &a).unwrap(), [0.0; 3]);
        assert_eq!(psnr(&a, &a).unwrap(), f64::INFINITY);
    }

    #[test]
    fn alpha_is_ignored() {
        let a = PixelGrid::new(2, 2, Pixel::new(9, 9, 9, 0)).unwrap();
        let b = PixelGrid::new(2, 2, Pixel::new(9, 9, 9, 255)).unwrap();
        assert_eq!(psnr(&a, &b).unwrap(), f64::INFINITY);
    }

    #[test]
    fn known_error() {
        let a = PixelGrid::new(2, 2, Pixel::new(0, 0, 0, 255)).unwrap();
        let b = PixelGrid::new(2, 2, Pixel::new(30, 0, 0, 255)).unwrap();
        // 4 · 900 / 12 = 300 on red only.
        assert_eq!(mse(&a, &b).unwrap(), [300.0, 0.0, 0.0]);
        let expected = 10.0 * (65025.0f64 / 300.0).log10();
        assert!((psnr(&a, &b).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let a = PixelGrid::new(2, 2, Pixel::default()).unwrap();
        let b = PixelGrid::new(2, 3, Pixel::default()).unwrap();
        assert!(matches!(
            psnr(&a, &b),
            Err(BmpError::DimensionMismatch {
                left: (2, 2),
                right: (2, 3)
            })
        ));
    }
}
