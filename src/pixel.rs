/// One RGBA pixel, 8 bits per channel.
///
/// 24-bit images carry a synthesized alpha of 255 that is never written back.
pub type Pixel = rgb::RGBA8;

/// On-disk pixel encoding of an uncompressed BMP.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 3 bytes per pixel, B,G,R on disk.
    Bgr24,
    /// 4 bytes per pixel, B,G,R,A on disk.
    Bgra32,
}

impl BitDepth {
    /// Map the info header's `bit_count` field. Anything but 24 or 32 is unsupported.
    pub fn from_bit_count(bit_count: u16) -> Option<Self> {
        match bit_count {
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgra32),
            _ => None,
        }
    }

    pub fn bit_count(&self) -> u16 {
        match self {
            Self::Bgr24 => 24,
            Self::Bgra32 => 32,
        }
    }

    /// Bytes per pixel on disk.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr24 => 3,
            Self::Bgra32 => 4,
        }
    }

    /// Whether the alpha channel is persisted.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Bgra32)
    }

    /// Zero bytes appended to each row so the row length is a multiple of 4.
    pub fn row_padding(&self, width: usize) -> usize {
        (4 - (width * self.bytes_per_pixel()) % 4) % 4
    }

    /// Row length on disk including padding.
    pub fn row_stride(&self, width: usize) -> usize {
        width * self.bytes_per_pixel() + self.row_padding(width)
    }
}
