//! The compression module drives the bjpeg codec, one channel at a time or all three at once.
//!
//! Compression of a channel happens in the following steps:
//! - Block partitioning: Cut the plane into 8x8 blocks, replicating edges where the plane does not divide evenly.
//! - DCT: Move each block into the frequency domain.
//! - Quantization: Divide every coefficient by a quality-scaled step. This is where the loss happens.
//! - Zigzag scan: Read each block low frequencies first so the zeros bunch up at the end.
//! - Run length encoding: Collapse runs of identical values into (count, value) pairs.
//!
//! Decompression is the exact inverse, ending with a crop back to the true plane size.
//!
//! The pipeline runs the Y, U and V channels in parallel, one task each.

pub mod compress;
pub mod decompress;
pub mod pipeline;

use crate::bitstream::container;
use crate::error::Result;
use crate::tools::color::{color_combine, color_split};
use crate::types::{Image, PixelOrder};

use pipeline::{compress_planes, decompress_image, Settings};

/// Colour split, compress the three planes in parallel and serialize the container.
pub fn encode_image(image: &Image, settings: &Settings) -> Result<Vec<u8>> {
    let (y, u, v) = color_split(image);
    let compressed = compress_planes([y, u, v], settings)?;
    container::serialize(&compressed)
}

/// Parse a container, decompress the three planes in parallel and recombine them.
pub fn decode_image(bytes: &[u8], order: PixelOrder) -> Result<Image> {
    let compressed = container::deserialize(bytes)?;
    let [y, u, v] = decompress_image(compressed)?;
    color_combine(&y, &u, &v, order)
}
