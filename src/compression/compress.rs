use crate::error::{Error, Result};
use crate::tools::rle::{rle_encode, RunPair};
use crate::tools::zigzag::zigzag_encode;
use crate::transform::blocks::chunk;
use crate::transform::dct;
use crate::transform::quantize::{check_quality, quantize, ChromaTable, LumaTable, QuantTable};
use crate::types::Plane;

/// Block edge used by the channel codec.
pub const BLOCK_SIZE: usize = 8;

/// Default luma quality.
pub const DEFAULT_LUMA_QUALITY: f32 = 0.5;

/// Chroma carries less visible detail, so it defaults to coarser steps than luma.
pub const DEFAULT_CHROMA_QUALITY: f32 = 0.25;

/// Everything needed to rebuild one channel: its true size, the quality it was quantized at and
/// the run-length stream of every block in row-major block order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelRecord {
    pub height: u32,
    pub width: u32,
    pub quality: f32,
    pub runs: Vec<RunPair>,
}

/// Compresses and decompresses single planes with one quantization table.
pub struct ChannelCodec {
    pub(crate) table: Box<dyn QuantTable>,
    pub(crate) block_size: usize,
}

impl ChannelCodec {
    /// Codec using the luminance table.
    pub fn luma() -> Self {
        Self {
            table: Box::new(LumaTable),
            block_size: BLOCK_SIZE,
        }
    }

    /// Codec using the chrominance table.
    pub fn chroma() -> Self {
        Self {
            table: Box::new(ChromaTable),
            block_size: BLOCK_SIZE,
        }
    }

    /// Codec with a caller supplied table and block size.
    pub fn with_table(table: Box<dyn QuantTable>, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize(block_size));
        }
        Ok(Self { table, block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Partition, transform, quantize, scan and run-length code `plane`.
    pub fn compress(&self, plane: &Plane, quality: f32) -> Result<ChannelRecord> {
        let quality = check_quality(quality)?;
        let (width, height) = (plane.width(), plane.height());
        let too_big = || Error::InvalidDimensions { width, height };
        let record_height = u32::try_from(height).map_err(|_| too_big())?;
        let record_width = u32::try_from(width).map_err(|_| too_big())?;

        let blocks = chunk(plane, self.block_size)?;
        let coeffs = dct::forward(&blocks);
        let quantized = quantize(&coeffs, self.table.as_ref(), quality)?;
        let runs = rle_encode(&zigzag_encode(&quantized));

        Ok(ChannelRecord {
            height: record_height,
            width: record_width,
            quality,
            runs,
        })
    }
}

impl Default for ChannelCodec {
    fn default() -> Self {
        Self::luma()
    }
}

/// Compress a single plane with the luma codec.
pub fn compress(plane: &Plane, quality: f32) -> Result<ChannelRecord> {
    ChannelCodec::luma().compress(plane, quality)
}
