//! Neighbourhood filters built on mirror padding.

use core::ops::{Add, Mul};

use crate::error::{BmpError, Result};
use crate::grid::{PixelGrid, check_representable};
use crate::pixel::Pixel;

/// Square, odd-sized convolution kernel stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel<W> {
    size: usize,
    weights: Vec<W>,
}

impl<W: Copy> Kernel<W> {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the centre to the border, `size / 2`.
    pub fn edge(&self) -> usize {
        self.size / 2
    }

    pub fn weights(&self) -> &[W] {
        &self.weights
    }

    /// Weight at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> W {
        self.weights[i * self.size + j]
    }

    pub fn sum(&self) -> W
    where
        W: core::iter::Sum,
    {
        self.weights.iter().copied().sum()
    }
}

impl Kernel<i32> {
    /// 4-neighbour discrete Laplacian. Weights sum to zero.
    pub fn laplacian() -> Self {
        #[rustfmt::skip]
        let weights = vec![
             0, -1,  0,
            -1,  4, -1,
             0, -1,  0,
        ];
        Self { size: 3, weights }
    }
}

impl Kernel<f64> {
    /// Isotropic Gaussian `exp(-(i² + j²) / 2σ²)`, normalized to sum to 1.
    pub fn gaussian(size: usize, sigma: f64) -> Result<Self> {
        check_gaussian(size, sigma)?;
        let edge = (size / 2) as isize;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut weights = Vec::with_capacity(size * size);
        for i in -edge..=edge {
            for j in -edge..=edge {
                weights.push((-((i * i + j * j) as f64) / two_sigma_sq).exp());
            }
        }
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }
        Ok(Self { size, weights })
    }
}

pub(crate) fn check_gaussian(size: usize, sigma: f64) -> Result<()> {
    if size % 2 == 0 {
        return Err(BmpError::InvalidParameter(format!(
            "Gaussian kernel size must be odd, got {size}"
        )));
    }
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(BmpError::InvalidParameter(format!(
            "Gaussian sigma must be positive and finite, got {sigma}"
        )));
    }
    Ok(())
}

pub(crate) fn check_sharpness(sharpness: f64) -> Result<()> {
    if !sharpness.is_finite() {
        return Err(BmpError::InvalidParameter(format!(
            "sharpness must be finite, got {sharpness}"
        )));
    }
    Ok(())
}

/// Reflect `i` into `[0, n)` without repeating the border sample
/// (`-1 → 1`, `n → n - 2`). Folds repeatedly for offsets beyond one period.
fn reflect(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let m = i.rem_euclid(period);
    if m >= n as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

/// Size of a `width × height` grid after padding `edge` pixels on every side.
pub(crate) fn padded_dimensions(
    width: usize,
    height: usize,
    edge: usize,
) -> Result<(usize, usize)> {
    let grow = |d: usize| edge.checked_mul(2).and_then(|e| e.checked_add(d));
    let (Some(pw), Some(ph)) = (grow(width), grow(height)) else {
        return Err(BmpError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        });
    };
    check_representable(pw, ph)?;
    Ok((pw, ph))
}

/// New grid grown by `edge` pixels on every side, borders filled by mirroring
/// the interior. Corners mirror across both axes.
pub fn mirror_pad(grid: &PixelGrid, edge: usize) -> Result<PixelGrid> {
    let (w, h) = (grid.width(), grid.height());
    let (pw, ph) = padded_dimensions(w, h, edge)?;

    let cols: Vec<usize> = (0..pw)
        .map(|x| reflect(x as isize - edge as isize, w))
        .collect();
    let mut pixels = Vec::with_capacity(pw * ph);
    for y in 0..ph {
        let row = grid.row(reflect(y as isize - edge as isize, h));
        pixels.extend(cols.iter().map(|&x| row[x]));
    }
    PixelGrid::from_pixels(pw, ph, pixels)
}

/// Convolve r,g,b over a mirror-padded copy and hand each original pixel and
/// its three sums to `emit`. Alpha is never touched.
fn convolve<W>(
    grid: &mut PixelGrid,
    kernel: &Kernel<W>,
    mut emit: impl FnMut(&mut Pixel, [W; 3]),
) -> Result<()>
where
    W: Copy + Default + From<u8> + Add<Output = W> + Mul<Output = W>,
{
    let k = kernel.size();
    let padded = mirror_pad(grid, kernel.edge())?;
    for (y, row) in grid.rows_mut().enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let mut acc = [W::default(); 3];
            for i in 0..k {
                let src = &padded.row(y + i)[x..x + k];
                for (j, p) in src.iter().enumerate() {
                    let weight = kernel.get(i, j);
                    acc[0] = acc[0] + W::from(p.r) * weight;
                    acc[1] = acc[1] + W::from(p.g) * weight;
                    acc[2] = acc[2] + W::from(p.b) * weight;
                }
            }
            emit(px, acc);
        }
    }
    Ok(())
}

/// Laplacian sharpening: `c + sharpness · ∇²c`, clamped to `[0, 255]`.
///
/// A constant region has a zero Laplacian and is left unchanged.
pub fn sharpen(grid: &mut PixelGrid, sharpness: f64) -> Result<()> {
    check_sharpness(sharpness)?;
    let combine = |c: u8, response: i32| {
        ((f64::from(c) + sharpness * f64::from(response)) as i32).clamp(0, 255) as u8
    };
    convolve(grid, &Kernel::laplacian(), |px, [r, g, b]| {
        px.r = combine(px.r, r);
        px.g = combine(px.g, g);
        px.b = combine(px.b, b);
    })
}

/// Replace every pixel by the Gaussian-weighted mean of its neighbourhood.
pub fn gaussian_smooth(grid: &mut PixelGrid, kernel_size: usize, sigma: f64) -> Result<()> {
    let kernel = Kernel::gaussian(kernel_size, sigma)?;
    let to_u8 = |v: f64| v.clamp(0.0, 255.0) as u8;
    convolve(grid, &kernel, |px, [r, g, b]| {
        px.r = to_u8(r);
        px.g = to_u8(g);
        px.b = to_u8(b);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: usize, h: usize) -> PixelGrid {
        let pixels = (0..w * h)
            .map(|i| Pixel::new((i * 7) as u8, (i * 13) as u8, (i * 29) as u8, 200))
            .collect();
        PixelGrid::from_pixels(w, h, pixels).unwrap()
    }

    #[test]
    fn reflect_skips_border_sample() {
        assert_eq!(reflect(-1, 4), 1);
        assert_eq!(reflect(-2, 4), 2);
        assert_eq!(reflect(4, 4), 2);
        assert_eq!(reflect(5, 4), 1);
        assert_eq!(reflect(2, 4), 2);
        assert_eq!(reflect(-7, 1), 0);
        // Folds again past one full period.
        assert_eq!(reflect(-4, 3), 0);
        assert_eq!(reflect(-5, 3), 1);
    }

    #[test]
    fn laplacian_sums_to_zero() {
        let k = Kernel::laplacian();
        assert_eq!(k.sum(), 0);
        assert_eq!(k.get(1, 1), 4);
        assert_eq!(k.get(0, 0), 0);
    }

    #[test]
    fn gaussian_rejects_bad_parameters() {
        assert!(matches!(
            Kernel::gaussian(4, 1.0),
            Err(BmpError::InvalidParameter(_))
        ));
        assert!(Kernel::gaussian(0, 1.0).is_err());
        assert!(Kernel::gaussian(3, 0.0).is_err());
        assert!(Kernel::gaussian(3, f64::NAN).is_err());
    }

    #[test]
    fn gaussian_is_normalized_and_symmetric() {
        for size in [1, 3, 5, 7, 11] {
            for sigma in [0.3, 1.0, 2.5, 10.0] {
                let k = Kernel::gaussian(size, sigma).unwrap();
                assert!((k.sum() - 1.0).abs() < 1e-6, "size {size} sigma {sigma}");
                let last = size - 1;
                assert_eq!(k.get(0, 0), k.get(last, last));
                assert_eq!(k.get(0, last), k.get(last, 0));
            }
        }
        assert_eq!(Kernel::gaussian(1, 1.0).unwrap().weights(), &[1.0]);
    }

    #[test]
    fn padded_size_is_checked_before_allocating() {
        assert_eq!(padded_dimensions(5, 4, 2).unwrap(), (9, 8));
        for edge in [usize::MAX / 4, usize::MAX, i32::MAX as usize / 2] {
            assert!(
                matches!(
                    padded_dimensions(1, 1, edge),
                    Err(BmpError::DimensionsTooLarge { .. })
                ),
                "edge {edge}"
            );
        }
        let grid = gradient(1, 1);
        assert!(matches!(
            mirror_pad(&grid, usize::MAX / 4),
            Err(BmpError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn mirror_pad_centre_is_original() {
        let grid = gradient(5, 4);
        let padded = mirror_pad(&grid, 2).unwrap();
        assert_eq!((padded.width(), padded.height()), (9, 8));
        for y in 0..4 {
            assert_eq!(&padded.row(y + 2)[2..7], grid.row(y));
        }
    }

    #[test]
    fn mirror_pad_corners_reflect_both_axes() {
        let grid = gradient(4, 4);
        let padded = mirror_pad(&grid, 1).unwrap();
        assert_eq!(padded.get(0, 0).unwrap(), grid.get(1, 1).unwrap());
        assert_eq!(padded.get(5, 0).unwrap(), grid.get(2, 1).unwrap());
        assert_eq!(padded.get(0, 5).unwrap(), grid.get(1, 2).unwrap());
        assert_eq!(padded.get(5, 5).unwrap(), grid.get(2, 2).unwrap());
    }

    #[test]
    fn mirror_pad_zero_edge_is_identity() {
        let grid = gradient(3, 2);
        assert_eq!(mirror_pad(&grid, 0).unwrap(), grid);
    }

    #[test]
    fn sharpen_leaves_alpha_alone() {
        let mut grid = gradient(4, 3);
        sharpen(&mut grid, 2.0).unwrap();
        assert!(grid.pixels().iter().all(|p| p.a == 200));
    }

    #[test]
    fn sharpen_amplifies_a_spike() {
        let mut grid = PixelGrid::new(5, 5, Pixel::new(100, 100, 100, 255)).unwrap();
        grid.set(2, 2, Pixel::new(110, 100, 100, 255)).unwrap();
        sharpen(&mut grid, 1.0).unwrap();
        // Centre: 110 + (4·110 − 4·100) = 150; neighbours: 100 − 10 = 90.
        assert_eq!(grid.get(2, 2).unwrap().r, 150);
        assert_eq!(grid.get(2, 1).unwrap().r, 90);
        assert_eq!(grid.get(3, 2).unwrap().r, 90);
        assert_eq!(grid.get(0, 0).unwrap().r, 100);
        assert_eq!(grid.get(2, 2).unwrap().g, 100);
    }

    #[test]
    fn smoothing_pulls_a_spike_down() {
        let mut grid = PixelGrid::new(5, 5, Pixel::new(0, 0, 0, 255)).unwrap();
        grid.set(2, 2, Pixel::new(255, 255, 255, 255)).unwrap();
        gaussian_smooth(&mut grid, 3, 1.0).unwrap();
        let centre = grid.get(2, 2).unwrap();
        assert!(centre.r < 255 && centre.r > 0);
        assert!(grid.get(1, 2).unwrap().r > 0);
        assert_eq!(grid.get(0, 0).unwrap().r, 0);
    }
}
