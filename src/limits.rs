use crate::error::BmpError;

/// Caps on what a BMP header may ask the decoder to allocate.
///
/// Checked against the header before any pixel grid exists, so an oversized
/// file fails with [`BmpError::LimitExceeded`] instead of allocating. `None`
/// leaves a dimension uncapped, which is the default for every field.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Largest accepted `width × height`.
    pub max_pixels: Option<u64>,
    /// Largest accepted pixel grid in bytes, at four bytes per pixel whatever
    /// the file's bit depth.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Compare header dimensions with the size caps.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BmpError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BmpError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BmpError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Compare the size of the grid about to be allocated with the memory cap.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), BmpError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(BmpError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
