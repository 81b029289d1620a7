//! BMP decoder for uncompressed 24-bit and 32-bit images.

use enough::Stop;
use log::debug;

use super::BmpImage;
use super::header::{BMP_MAGIC, FileHeader, HEADERS_LEN, InfoHeader};
use crate::error::BmpError;
use crate::grid::PixelGrid;
use crate::limits::Limits;
use crate::pixel::{BitDepth, Pixel};

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        let new_pos = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        self.set_position(new_pos)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let end = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BmpError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parsed and validated headers plus the raw bytes between them and the
/// pixel data.
pub(crate) struct ParsedHeaders {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pub depth: BitDepth,
    pub width: usize,
    pub height: usize,
    pub extra: Vec<u8>,
}

fn truncated(_: BmpError) -> BmpError {
    BmpError::UnsupportedFormat("truncated BMP header".into())
}

/// Parse both headers and reject everything but uncompressed 24/32-bit data.
pub(crate) fn parse_headers(data: &[u8]) -> Result<ParsedHeaders, BmpError> {
    let mut cursor = Cursor::new(data);
    let file_header = FileHeader::from_bytes(&cursor.read_fixed_bytes().map_err(truncated)?);
    if file_header.file_type != BMP_MAGIC {
        return Err(BmpError::UnsupportedFormat(
            "missing \"BM\" signature".into(),
        ));
    }
    let info_header = InfoHeader::from_bytes(&cursor.read_fixed_bytes().map_err(truncated)?);

    if (info_header.size as usize) < InfoHeader::LEN {
        return Err(BmpError::UnsupportedFormat(format!(
            "info header size {} is smaller than {}",
            info_header.size,
            InfoHeader::LEN
        )));
    }
    let depth = BitDepth::from_bit_count(info_header.bit_count).ok_or_else(|| {
        BmpError::UnsupportedFormat(format!(
            "bit depth {} (only 24 and 32 are supported)",
            info_header.bit_count
        ))
    })?;
    if info_header.compression != 0 {
        return Err(BmpError::UnsupportedFormat(format!(
            "compression scheme {} (only uncompressed data is supported)",
            info_header.compression
        )));
    }
    if info_header.planes != 1 {
        return Err(BmpError::UnsupportedFormat(format!(
            "planes field is {}, expected 1",
            info_header.planes
        )));
    }
    if info_header.width <= 0 {
        return Err(BmpError::UnsupportedFormat(format!(
            "width {} is not positive",
            info_header.width
        )));
    }
    if info_header.height == 0 {
        return Err(BmpError::UnsupportedFormat("height is zero".into()));
    }

    let offset = file_header.offset as usize;
    if offset < HEADERS_LEN {
        return Err(BmpError::UnsupportedFormat(format!(
            "pixel data offset {offset} overlaps the headers"
        )));
    }
    let extra = data
        .get(HEADERS_LEN..offset)
        .ok_or(BmpError::UnexpectedEof)?
        .to_vec();

    Ok(ParsedHeaders {
        file_header,
        info_header,
        depth,
        width: info_header.width as usize,
        height: info_header.height.unsigned_abs() as usize,
        extra,
    })
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a whole BMP file held in memory.
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<BmpImage, BmpError> {
    let headers = parse_headers(data)?;
    let (w, h) = (headers.width, headers.height);
    if let Some(limits) = limits {
        limits.check(w as u32, h as u32)?;
        limits.check_memory(w as u64 * h as u64 * core::mem::size_of::<Pixel>() as u64)?;
    }
    stop.check()?;

    let depth = headers.depth;
    let bpp = depth.bytes_per_pixel();
    let padding = depth.row_padding(w);
    let bottom_up = headers.info_header.is_bottom_up();

    // Reject short input before allocating; the last row may omit its padding.
    let needed = depth
        .row_stride(w)
        .checked_mul(h - 1)
        .and_then(|n| n.checked_add(w * bpp))
        .and_then(|n| n.checked_add(headers.file_header.offset as usize))
        .ok_or(BmpError::UnexpectedEof)?;
    if data.len() < needed {
        return Err(BmpError::UnexpectedEof);
    }

    let mut cursor = Cursor::new(data);
    cursor.set_position(headers.file_header.offset as usize)?;

    let mut grid = PixelGrid::new(w, h, Pixel::new(0, 0, 0, 255))?;
    for disk_row in 0..h {
        if disk_row % 16 == 0 {
            stop.check()?;
        }
        let y = if bottom_up { h - 1 - disk_row } else { disk_row };
        let src = cursor.take(w * bpp)?;
        let dst = &mut grid.pixels_mut()[y * w..(y + 1) * w];
        for (px, raw) in dst.iter_mut().zip(src.chunks_exact(bpp)) {
            px.b = raw[0];
            px.g = raw[1];
            px.r = raw[2];
            px.a = if bpp == 4 { raw[3] } else { 255 };
        }
        // The last row's padding is never read; some writers omit it.
        if disk_row + 1 < h {
            cursor.skip(padding)?;
        }
    }

    debug!(
        "decoded {w}x{h} {}-bit BMP ({})",
        depth.bit_count(),
        if bottom_up { "bottom-up" } else { "top-down" }
    );

    Ok(BmpImage {
        file_header: headers.file_header,
        info_header: headers.info_header,
        extra: headers.extra,
        depth,
        grid,
    })
}
