//! Owned 2-D pixel buffer shared by the codec and every transform.

use imgref::{ImgRef, ImgVec};

use crate::error::{BmpError, Result};
use crate::pixel::Pixel;

/// Row-major pixel buffer, row 0 at the top.
///
/// Every row holds exactly `width` pixels and there are exactly `height`
/// rows; both dimensions are non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    img: ImgVec<Pixel>,
}

impl PixelGrid {
    /// Grid of `width × height` pixels all set to `fill`.
    pub fn new(width: usize, height: usize, fill: Pixel) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            img: ImgVec::new(vec![fill; width * height], width, height),
        })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        check_dimensions(width, height)?;
        if Some(pixels.len()) != width.checked_mul(height) {
            return Err(BmpError::InvalidParameter(format!(
                "{} pixels cannot fill a {width}x{height} grid",
                pixels.len()
            )));
        }
        Ok(Self {
            img: ImgVec::new(pixels, width, height),
        })
    }

    /// Build from explicit rows, top first. All rows must have the same length.
    pub fn from_rows<R: AsRef<[Pixel]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut pixels = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BmpError::InvalidParameter(format!(
                    "row {y} has {} pixels, expected {width}",
                    row.len()
                )));
            }
            pixels.extend_from_slice(row);
        }
        Self::from_pixels(width, rows.len(), pixels)
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        self.img.buf()
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.img.buf_mut()
    }

    pub fn row(&self, y: usize) -> &[Pixel] {
        let w = self.width();
        &self.pixels()[y * w..(y + 1) * w]
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + ExactSizeIterator {
        let w = self.width();
        self.pixels().chunks_exact(w)
    }

    pub fn rows_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut [Pixel]> + ExactSizeIterator {
        let w = self.width();
        self.pixels_mut().chunks_exact_mut(w)
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Result<Pixel> {
        self.check_bounds(x, y)?;
        Ok(self.at(x, y))
    }

    /// Overwrite the pixel at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<()> {
        self.check_bounds(x, y)?;
        let w = self.width();
        self.pixels_mut()[y * w + x] = pixel;
        Ok(())
    }

    /// Borrowed view for interop with `imgref` consumers.
    pub fn as_imgref(&self) -> ImgRef<'_, Pixel> {
        self.img.as_ref()
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.img.into_buf()
    }

    /// Unchecked read; callers guarantee the coordinates are in bounds.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> Pixel {
        self.pixels()[y * self.width() + x]
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(BmpError::OutOfRange {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidParameter(format!(
            "grid dimensions must be non-zero, got {width}x{height}"
        )));
    }
    check_representable(width, height)
}

/// Reject a `width × height` grid that a BMP header cannot describe or whose
/// buffer could never be allocated. Call before allocating.
pub(crate) fn check_representable(width: usize, height: usize) -> Result<()> {
    let too_large = BmpError::DimensionsTooLarge {
        width: width as u64,
        height: height as u64,
    };
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(too_large);
    }
    match width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(core::mem::size_of::<Pixel>()))
    {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
        _ => Err(too_large),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(v: u8) -> Pixel {
        Pixel::new(v, v, v, 255)
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(PixelGrid::new(0, 3, px(0)).is_err());
        assert!(PixelGrid::new(3, 0, px(0)).is_err());
        assert!(PixelGrid::from_pixels(2, 2, vec![px(0); 3]).is_err());
    }

    #[test]
    fn rejects_sizes_beyond_header_range() {
        let max = i32::MAX as usize;
        #[cfg(target_pointer_width = "64")]
        assert!(check_representable(max, 1).is_ok());
        for (w, h) in [(max + 1, 1), (1, max + 1), (max, max), (usize::MAX, usize::MAX)] {
            assert!(
                matches!(
                    check_representable(w, h),
                    Err(BmpError::DimensionsTooLarge { .. })
                ),
                "{w}x{h}"
            );
        }
        assert!(matches!(
            PixelGrid::new(max + 1, 1, px(0)),
            Err(BmpError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn from_rows_checks_ragged_input() {
        let rows = vec![vec![px(1), px(2)], vec![px(3)]];
        assert!(matches!(
            PixelGrid::from_rows(&rows),
            Err(BmpError::InvalidParameter(_))
        ));
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut grid = PixelGrid::new(3, 2, px(0)).unwrap();
        grid.set(2, 1, px(9)).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), px(9));
        assert_eq!(grid.row(1), &[px(0), px(0), px(9)]);
        assert!(matches!(
            grid.get(3, 0),
            Err(BmpError::OutOfRange { x: 3, y: 0, .. })
        ));
        assert!(matches!(
            grid.set(0, 2, px(1)),
            Err(BmpError::OutOfRange { .. })
        ));
    }
}
