//! The two fixed-size BMP header records.
//!
//! Both are encoded field by field in little-endian order; the in-memory
//! struct layout never touches the byte stream.

/// `"BM"` read as a little-endian `u16`.
pub const BMP_MAGIC: u16 = u16::from_le_bytes(*b"BM");

/// `BITMAPFILEHEADER`, 14 bytes on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_type: u16,
    /// Total file size in bytes.
    pub size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the first pixel row.
    pub offset: u32,
}

impl FileHeader {
    pub const LEN: usize = 14;

    pub fn from_bytes(b: &[u8; Self::LEN]) -> Self {
        Self {
            file_type: u16::from_le_bytes([b[0], b[1]]),
            size: u32::from_le_bytes([b[2], b[3], b[4], b[5]]),
            reserved1: u16::from_le_bytes([b[6], b[7]]),
            reserved2: u16::from_le_bytes([b[8], b[9]]),
            offset: u32::from_le_bytes([b[10], b[11], b[12], b[13]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut b = [0u8; Self::LEN];
        b[0..2].copy_from_slice(&self.file_type.to_le_bytes());
        b[2..6].copy_from_slice(&self.size.to_le_bytes());
        b[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        b[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        b[10..14].copy_from_slice(&self.offset.to_le_bytes());
        b
    }
}

/// `BITMAPINFOHEADER`, 40 bytes on disk.
///
/// A positive `height` means rows are stored bottom-up, a negative one top-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub used_colors: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    pub const LEN: usize = 40;

    pub fn from_bytes(b: &[u8; Self::LEN]) -> Self {
        let u32_at = |o: usize| u32::from_le_bytes([b[o], b[o + 1], b[o + 2], b[o + 3]]);
        let i32_at = |o: usize| i32::from_le_bytes([b[o], b[o + 1], b[o + 2], b[o + 3]]);
        let u16_at = |o: usize| u16::from_le_bytes([b[o], b[o + 1]]);
        Self {
            size: u32_at(0),
            width: i32_at(4),
            height: i32_at(8),
            planes: u16_at(12),
            bit_count: u16_at(14),
            compression: u32_at(16),
            image_size: u32_at(20),
            x_resolution: i32_at(24),
            y_resolution: i32_at(28),
            used_colors: u32_at(32),
            important_colors: u32_at(36),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut b = [0u8; Self::LEN];
        b[0..4].copy_from_slice(&self.size.to_le_bytes());
        b[4..8].copy_from_slice(&self.width.to_le_bytes());
        b[8..12].copy_from_slice(&self.height.to_le_bytes());
        b[12..14].copy_from_slice(&self.planes.to_le_bytes());
        b[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        b[16..20].copy_from_slice(&self.compression.to_le_bytes());
        b[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        b[24..28].copy_from_slice(&self.x_resolution.to_le_bytes());
        b[28..32].copy_from_slice(&self.y_resolution.to_le_bytes());
        b[32..36].copy_from_slice(&self.used_colors.to_le_bytes());
        b[36..40].copy_from_slice(&self.important_colors.to_le_bytes());
        b
    }

    /// Rows are stored bottom row first.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }
}

/// Combined length of both headers; the smallest legal pixel offset.
pub const HEADERS_LEN: usize = FileHeader::LEN + InfoHeader::LEN;
