//! Image transforms.
//!
//! Each submodule works on a bare [`PixelGrid`]. The `BmpImage` methods below
//! forward to them and keep the headers in step when dimensions change.

pub mod filter;
pub mod geometry;
pub mod tone;

use crate::bmp::BmpImage;
use crate::error::Result;

impl BmpImage {
    pub fn flip_horizontal(&mut self) {
        geometry::flip_horizontal(self.grid_mut());
    }

    /// Scale by `rate` (or `1 / rate` when `is_upscaling` is false), optionally
    /// cropping the new width to a multiple of 4.
    pub fn resize(&mut self, rate: f64, is_upscaling: bool, crop: bool) -> Result<()> {
        let grid = geometry::resize(self.grid(), rate, is_upscaling, crop)?;
        self.replace_grid(grid)
    }

    /// Quantize to `bit_depth` bits per channel. Alpha is quantized too when
    /// the image stores it.
    pub fn quantize(&mut self, bit_depth: u32) -> Result<()> {
        let include_alpha = self.depth().has_alpha();
        tone::quantize(self.grid_mut(), bit_depth, include_alpha)
    }

    pub fn gamma(&mut self, gamma: f64) -> Result<()> {
        tone::gamma(self.grid_mut(), gamma)
    }

    pub fn contrast(&mut self, factor: f64) -> Result<()> {
        tone::contrast(self.grid_mut(), factor)
    }

    pub fn white_balance(&mut self) {
        tone::white_balance(self.grid_mut());
    }

    pub fn adjust_hue(&mut self, delta: f64) -> Result<()> {
        tone::adjust_hue(self.grid_mut(), delta)
    }

    pub fn adjust_saturation(&mut self, factor: f64) -> Result<()> {
        tone::adjust_saturation(self.grid_mut(), factor)
    }

    pub fn adjust_intensity(&mut self, factor: f64) -> Result<()> {
        tone::adjust_intensity(self.grid_mut(), factor)
    }

    pub fn sharpen(&mut self, sharpness: f64) -> Result<()> {
        filter::sharpen(self.grid_mut(), sharpness)
    }

    pub fn gaussian_smooth(&mut self, kernel_size: usize, sigma: f64) -> Result<()> {
        filter::gaussian_smooth(self.grid_mut(), kernel_size, sigma)
    }

    /// Grow the image by `edge` mirrored pixels on every side.
    pub fn mirror_pad(&mut self, edge: usize) -> Result<()> {
        let grid = filter::mirror_pad(self.grid(), edge)?;
        self.replace_grid(grid)
    }
}
