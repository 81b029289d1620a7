//! # bmpfx
//!
//! Uncompressed BMP decoding and encoding plus a set of pixel transforms that
//! can be chained into pipelines.
//!
//! ## Supported Formats
//!
//! - 24-bit BGR and 32-bit BGRA, uncompressed (`BI_RGB`)
//! - Bottom-up and top-down row order; the order is kept on re-encode
//! - Extended info headers: bytes between the 54-byte headers and the pixel
//!   data are carried through untouched
//!
//! ## Transforms
//!
//! - Geometry: horizontal flip, bilinear resize, mirror padding
//! - Tone: quantization, gamma, contrast, gray-world white balance,
//!   HSI hue/saturation/intensity
//! - Filters: Laplacian sharpening, Gaussian smoothing
//!
//! ## Non-Goals
//!
//! - Palettized, 16-bit or compressed BMPs
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfx::{BmpImage, ImageInfo, Operation, Pipeline, StepParams, Unstoppable};
//!
//! let data = std::fs::read("photo.bmp").unwrap();
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(&data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.depth);
//!
//! let mut image = BmpImage::decode(&data)?;
//! let params = StepParams { contrast: 1.2, sharpness: 0.5, ..Default::default() };
//! let pipeline = Pipeline::from_sequence("CA", &params)?
//!     .then(Operation::Resize { rate: 2.0, upscale: false, crop: true });
//! pipeline.run(&mut image, Unstoppable)?;
//! image.save("out/photo-small.bmp")?;
//! # Ok::<(), bmpfx::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod grid;
mod info;
mod limits;
mod pixel;

pub mod bmp;
pub mod color;
pub mod metrics;
pub mod pipeline;
pub mod transform;

// Re-exports
pub use bmp::header::{FileHeader, InfoHeader};
pub use bmp::{BmpImage, DecodeRequest};
pub use color::{Hsi, Hsv};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{BmpError, Result};
pub use grid::PixelGrid;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pipeline::{Operation, Pipeline, StepParams};
pub use pixel::{BitDepth, Pixel};
pub use transform::filter::{Kernel, mirror_pad};
