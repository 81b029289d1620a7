//! Ordered sequences of transforms.
//!
//! A [`Pipeline`] is a list of [`Operation`]s applied to one image in order,
//! each step seeing the result of the previous one. Sequences can be built
//! from single-letter tags bound to a [`StepParams`] set, or pushed one
//! operation at a time.

use std::path::Path;

use enough::{Stop, Unstoppable};
use log::debug;

use crate::bmp::BmpImage;
use crate::error::{BmpError, Result};
use crate::transform::{filter, geometry, tone};

/// One value per tag for [`Pipeline::from_sequence`].
///
/// The defaults leave an image unchanged for every tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// `C`: contrast factor around mid-gray.
    pub contrast: f64,
    /// `H`: hue rotation in degrees.
    pub hue: f64,
    /// `S`: saturation multiplier.
    pub saturation: f64,
    /// `I`: intensity multiplier.
    pub intensity: f64,
    /// `G`: gamma exponent.
    pub gamma: f64,
    /// `A`: Laplacian sharpening strength.
    pub sharpness: f64,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            hue: 0.0,
            saturation: 1.0,
            intensity: 1.0,
            gamma: 1.0,
            sharpness: 0.0,
        }
    }
}

/// A transform together with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Operation {
    Contrast(f64),
    Hue(f64),
    Saturation(f64),
    Intensity(f64),
    Gamma(f64),
    Sharpen(f64),
    FlipHorizontal,
    Resize { rate: f64, upscale: bool, crop: bool },
    Quantize(u32),
    WhiteBalance,
    GaussianSmooth { kernel_size: usize, sigma: f64 },
    MirrorPad(usize),
}

impl Operation {
    /// Resolve a sequence tag, taking its parameter from `params`.
    pub fn from_tag(tag: char, params: &StepParams) -> Result<Self> {
        Ok(match tag {
            'C' => Self::Contrast(params.contrast),
            'H' => Self::Hue(params.hue),
            'S' => Self::Saturation(params.saturation),
            'I' => Self::Intensity(params.intensity),
            'G' => Self::Gamma(params.gamma),
            'A' => Self::Sharpen(params.sharpness),
            other => return Err(BmpError::InvalidOperation(other)),
        })
    }

    /// The sequence tag for this operation, if it has one.
    pub fn tag(&self) -> Option<char> {
        match self {
            Self::Contrast(_) => Some('C'),
            Self::Hue(_) => Some('H'),
            Self::Saturation(_) => Some('S'),
            Self::Intensity(_) => Some('I'),
            Self::Gamma(_) => Some('G'),
            Self::Sharpen(_) => Some('A'),
            _ => None,
        }
    }

    /// Check parameters against an image of `width × height` and return the
    /// dimensions the operation will produce.
    pub fn validate(&self, width: usize, height: usize) -> Result<(usize, usize)> {
        match *self {
            Self::Contrast(f) => tone::check_finite("contrast factor", f)?,
            Self::Hue(d) => tone::check_finite("hue delta", d)?,
            Self::Saturation(f) => tone::check_finite("saturation factor", f)?,
            Self::Intensity(f) => tone::check_finite("intensity factor", f)?,
            Self::Gamma(g) => tone::check_gamma(g)?,
            Self::Sharpen(s) => filter::check_sharpness(s)?,
            Self::Quantize(bits) => tone::check_bit_depth(bits)?,
            Self::GaussianSmooth { kernel_size, sigma } => {
                filter::check_gaussian(kernel_size, sigma)?
            }
            Self::Resize { rate, upscale, crop } => {
                let factor = geometry::scale_factor(rate, upscale)?;
                return geometry::scaled_dimensions(width, height, factor, crop);
            }
            Self::MirrorPad(edge) => return filter::padded_dimensions(width, height, edge),
            Self::FlipHorizontal | Self::WhiteBalance => {}
        }
        Ok((width, height))
    }

    /// Apply to `image` in place.
    pub fn apply(&self, image: &mut BmpImage) -> Result<()> {
        match *self {
            Self::Contrast(f) => image.contrast(f),
            Self::Hue(d) => image.adjust_hue(d),
            Self::Saturation(f) => image.adjust_saturation(f),
            Self::Intensity(f) => image.adjust_intensity(f),
            Self::Gamma(g) => image.gamma(g),
            Self::Sharpen(s) => image.sharpen(s),
            Self::FlipHorizontal => {
                image.flip_horizontal();
                Ok(())
            }
            Self::Resize { rate, upscale, crop } => image.resize(rate, upscale, crop),
            Self::Quantize(bits) => image.quantize(bits),
            Self::WhiteBalance => {
                image.white_balance();
                Ok(())
            }
            Self::GaussianSmooth { kernel_size, sigma } => {
                image.gaussian_smooth(kernel_size, sigma)
            }
            Self::MirrorPad(edge) => image.mirror_pad(edge),
        }
    }
}

/// An ordered list of operations.
///
/// ```
/// use bmpfx::{BitDepth, BmpImage, Pipeline, Pixel, PixelGrid, StepParams, Unstoppable};
///
/// let grid = PixelGrid::new(8, 8, Pixel::new(90, 120, 200, 255))?;
/// let mut image = BmpImage::new(grid, BitDepth::Bgr24)?;
///
/// let params = StepParams { contrast: 1.5, gamma: 0.8, ..Default::default() };
/// Pipeline::from_sequence("CG", &params)?.run(&mut image, Unstoppable)?;
/// assert_ne!(image.pixel(0, 0)?, Pixel::new(90, 120, 200, 255));
/// # Ok::<(), bmpfx::BmpError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pipeline {
    steps: Vec<Operation>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from tag letters (`C`, `H`, `S`, `I`, `G`, `A`).
    ///
    /// Fails with [`BmpError::InvalidOperation`] on the first unknown tag.
    pub fn from_sequence(sequence: &str, params: &StepParams) -> Result<Self> {
        let steps = sequence
            .chars()
            .map(|tag| Operation::from_tag(tag, params))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    pub fn push(&mut self, op: Operation) {
        self.steps.push(op);
    }

    /// Builder form of [`push`](Self::push).
    pub fn then(mut self, op: Operation) -> Self {
        self.steps.push(op);
        self
    }

    pub fn steps(&self) -> &[Operation] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check every step against an image of `width × height`, following the
    /// dimension changes earlier steps make.
    pub fn validate(&self, width: usize, height: usize) -> Result<()> {
        let mut dims = (width, height);
        for op in &self.steps {
            dims = op.validate(dims.0, dims.1)?;
        }
        Ok(())
    }

    /// Run every step on `image`, polling `stop` between steps.
    ///
    /// On any error, cancellation included, `image` is left exactly as it
    /// was.
    pub fn run(&self, image: &mut BmpImage, stop: impl Stop) -> Result<()> {
        self.validate(image.width(), image.height())?;
        let mut work = image.clone();
        for (i, op) in self.steps.iter().enumerate() {
            stop.check()?;
            op.apply(&mut work)?;
            debug!(
                "step {}/{}: {op:?} -> {}x{}",
                i + 1,
                self.steps.len(),
                work.width(),
                work.height()
            );
        }
        *image = work;
        Ok(())
    }

    /// [`run`](Self::run) without cancellation.
    pub fn apply(&self, image: &mut BmpImage) -> Result<()> {
        self.run(image, Unstoppable)
    }

    /// Load `input`, run the pipeline and save to `output`. Nothing is written
    /// if any step fails.
    pub fn process_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
        let mut image = BmpImage::open(input)?;
        self.apply(&mut image)?;
        image.save(output)
    }
}

impl FromIterator<Operation> for Pipeline {
    fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
