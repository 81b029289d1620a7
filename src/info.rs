use crate::bmp::parse_headers;
use crate::error::Result;
use crate::pixel::BitDepth;

/// Image metadata read from the headers alone, without touching pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
    pub depth: BitDepth,
    /// Rows are stored top row first (negative height on disk).
    pub top_down: bool,
    /// Byte offset of the first pixel row.
    pub data_offset: u32,
}

impl ImageInfo {
    /// Probe BMP headers. Applies the same checks as a full decode, except
    /// that the pixel data may be missing.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let headers = parse_headers(data)?;
        Ok(Self {
            width: headers.width,
            height: headers.height,
            depth: headers.depth,
            top_down: !headers.info_header.is_bottom_up(),
            data_offset: headers.file_header.offset,
        })
    }
}
