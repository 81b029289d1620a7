//! Uncompressed BMP container: headers, decoder, encoder and the decoded image.

mod decode;
mod encode;
pub mod header;

use std::fs;
use std::path::Path;

use enough::{Stop, Unstoppable};
use log::debug;

use crate::error::{BmpError, Result};
use crate::grid::PixelGrid;
use crate::limits::Limits;
use crate::pixel::{BitDepth, Pixel};
use header::{BMP_MAGIC, FileHeader, HEADERS_LEN, InfoHeader};

pub(crate) use decode::parse_headers;

/// Horizontal and vertical resolution written into new headers (72 DPI).
const DEFAULT_RESOLUTION: i32 = 2835;

/// A decoded BMP: both headers, any header extension bytes that sat between
/// the 54-byte headers and the pixel data, and the pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpImage {
    pub(crate) file_header: FileHeader,
    pub(crate) info_header: InfoHeader,
    pub(crate) extra: Vec<u8>,
    pub(crate) depth: BitDepth,
    pub(crate) grid: PixelGrid,
}

impl BmpImage {
    /// Wrap a grid with freshly synthesized bottom-up headers.
    pub fn new(grid: PixelGrid, depth: BitDepth) -> Result<Self> {
        let file_header = FileHeader {
            file_type: BMP_MAGIC,
            size: 0,
            reserved1: 0,
            reserved2: 0,
            offset: HEADERS_LEN as u32,
        };
        let info_header = InfoHeader {
            size: InfoHeader::LEN as u32,
            width: 0,
            height: 1,
            planes: 1,
            bit_count: depth.bit_count(),
            compression: 0,
            image_size: 0,
            x_resolution: DEFAULT_RESOLUTION,
            y_resolution: DEFAULT_RESOLUTION,
            used_colors: 0,
            important_colors: 0,
        };
        let mut image = Self {
            file_header,
            info_header,
            extra: Vec::new(),
            depth,
            grid: PixelGrid::new(1, 1, Pixel::default())?,
        };
        image.replace_grid(grid)?;
        Ok(image)
    }

    /// Decode BMP bytes without limits.
    pub fn decode(data: &[u8]) -> Result<Self> {
        decode::decode_bmp(data, None, &Unstoppable)
    }

    /// Read and decode a BMP file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| BmpError::io(path, e))?;
        debug!("read {} bytes from {}", data.len(), path.display());
        Self::decode(&data)
    }

    /// Encode to BMP bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode::encode_bmp(self, &Unstoppable)
    }

    /// Encode to BMP bytes, polling `stop` while writing rows.
    pub fn encode_with_stop(&self, stop: impl Stop) -> Result<Vec<u8>> {
        encode::encode_bmp(self, &stop)
    }

    /// Encode and write to `path`, creating missing parent directories first.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BmpError::io(parent, e))?;
        }
        fs::write(path, &bytes).map_err(|e| BmpError::io(path, e))?;
        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Pixel at column `x`, row `y` (row 0 is the top of the picture).
    pub fn pixel(&self, x: usize, y: usize) -> Result<Pixel> {
        self.grid.get(x, y)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<()> {
        self.grid.set(x, y, pixel)
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Mutable pixel access that cannot change the dimensions.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.grid.pixels_mut()
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut PixelGrid {
        &mut self.grid
    }

    /// Swap in a grid of possibly different size and bring both headers in
    /// line with it. The row-order sign of the height is kept.
    pub(crate) fn replace_grid(&mut self, grid: PixelGrid) -> Result<()> {
        let (w, h) = (grid.width(), grid.height());
        let too_large = || BmpError::DimensionsTooLarge {
            width: w as u64,
            height: h as u64,
        };
        let width = i32::try_from(w).map_err(|_| too_large())?;
        let height = i32::try_from(h).map_err(|_| too_large())?;
        let image_size = self
            .depth
            .row_stride(w)
            .checked_mul(h)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size
            .checked_add(self.file_header.offset)
            .ok_or_else(too_large)?;

        self.info_header.width = width;
        self.info_header.height = if self.info_header.is_bottom_up() {
            height
        } else {
            -height
        };
        self.info_header.image_size = image_size;
        self.file_header.size = file_size;
        if (w, h) != (self.grid.width(), self.grid.height()) {
            debug!(
                "image resized {}x{} -> {w}x{h}",
                self.grid.width(),
                self.grid.height()
            );
        }
        self.grid = grid;
        Ok(())
    }
}

/// Builder for decoding with limits and a cooperative stop token.
///
/// ```
/// use bmpfx::{BitDepth, BmpImage, DecodeRequest, Limits, Pixel, PixelGrid, Unstoppable};
///
/// let grid = PixelGrid::new(4, 4, Pixel::new(10, 20, 30, 255))?;
/// let bytes = BmpImage::new(grid, BitDepth::Bgr24)?.encode()?;
///
/// let limits = Limits { max_pixels: Some(64), ..Default::default() };
/// let image = DecodeRequest::new(&bytes).with_limits(&limits).decode(Unstoppable)?;
/// assert_eq!((image.width(), image.height()), (4, 4));
/// # Ok::<(), bmpfx::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<BmpImage> {
        decode::decode_bmp(self.data, self.limits, &stop)
    }
}
