use crate::error::{Error, Result};
use crate::tools::rle::{expanded_len, rle_decode, MAX_DECODED_VALUES};
use crate::tools::zigzag::zigzag_decode;
use crate::transform::blocks::reconstruct;
use crate::transform::dct;
use crate::transform::quantize::{check_quality, dequantize};
use crate::types::Plane;

use super::compress::{ChannelCodec, ChannelRecord};

impl ChannelCodec {
    /// Rebuild a plane from `record`.
    ///
    /// The output is cropped to the record's own dimensions unless `dims` (width, height)
    /// overrides them; an override must still fit inside the padded block grid. The run-length
    /// stream is checked against the dimensions before anything is expanded, so a record that
    /// does not add up fails with an error instead of producing a partial plane. Padded planes
    /// larger than [`MAX_DECODED_VALUES`] samples are refused as malformed.
    pub fn decompress(&self, record: &ChannelRecord, dims: Option<(usize, usize)>) -> Result<Plane> {
        let quality = check_quality(record.quality)?;
        let s = self.block_size;
        let height = record.height as usize;
        let width = record.width as usize;

        let rows = height.div_ceil(s);
        let cols = width.div_ceil(s);
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(s * s))
            .ok_or_else(|| {
                Error::malformed(format!("dimensions {}x{} overflow", width, height))
            })?;
        if expected > MAX_DECODED_VALUES {
            return Err(Error::malformed(format!(
                "{}x{} plane needs {} samples, limit is {}",
                width, height, expected, MAX_DECODED_VALUES
            )));
        }

        let actual = expanded_len(&record.runs)?;
        if actual != expected {
            return Err(Error::DimensionMismatch { expected, actual });
        }

        let seq = rle_decode(&record.runs)?;
        let quantized = zigzag_decode(&seq, rows, cols, s)?;
        let coeffs = dequantize(&quantized, self.table.as_ref(), quality)?;
        let blocks = dct::inverse(&coeffs);

        let (out_width, out_height) = dims.unwrap_or((width, height));
        reconstruct(&blocks, out_height, out_width)
    }
}

/// Decompress a single record with the luma codec.
pub fn decompress(record: &ChannelRecord, dims: Option<(usize, usize)>) -> Result<Plane> {
    ChannelCodec::luma().decompress(record, dims)
}
