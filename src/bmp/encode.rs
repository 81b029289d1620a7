//! BMP encoder: uncompressed 24-bit and 32-bit BMP.

use enough::Stop;
use log::debug;

use super::BmpImage;
use super::header::HEADERS_LEN;
use crate::error::BmpError;
use crate::pixel::BitDepth;

/// Serialize headers, preserved header extension bytes and padded pixel rows.
pub(crate) fn encode_bmp(image: &BmpImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let grid = &image.grid;
    let (w, h) = (grid.width(), grid.height());
    let depth = image.depth;
    let offset = image.file_header.offset as usize;
    let pixel_data_size = depth
        .row_stride(w)
        .checked_mul(h)
        .ok_or(BmpError::DimensionsTooLarge {
            width: w as u64,
            height: h as u64,
        })?;

    let mut out = Vec::with_capacity(offset.max(HEADERS_LEN) + pixel_data_size);
    out.extend_from_slice(&image.file_header.to_bytes());
    out.extend_from_slice(&image.info_header.to_bytes());
    out.extend_from_slice(&image.extra);
    if out.len() < offset {
        out.resize(offset, 0);
    }

    let pad_bytes = depth.row_padding(w);
    let write_row = |out: &mut Vec<u8>, row: &[crate::Pixel]| {
        for px in row {
            match depth {
                BitDepth::Bgr24 => out.extend_from_slice(&[px.b, px.g, px.r]),
                BitDepth::Bgra32 => out.extend_from_slice(&[px.b, px.g, px.r, px.a]),
            }
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    };

    if image.info_header.is_bottom_up() {
        for (i, row) in grid.rows().rev().enumerate() {
            if i % 16 == 0 {
                stop.check()?;
            }
            write_row(&mut out, row);
        }
    } else {
        for (i, row) in grid.rows().enumerate() {
            if i % 16 == 0 {
                stop.check()?;
            }
            write_row(&mut out, row);
        }
    }

    debug!(
        "encoded {w}x{h} {}-bit BMP, {} bytes",
        depth.bit_count(),
        out.len()
    );
    Ok(out)
}
