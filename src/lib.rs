//! bjpeg, an experimental JPEG-style still image compressor.
//!
//! Version 0.1.0
//!
//! Converts an RGB image into Y, U and V planes, codes each plane with an 8x8 block DCT,
//! quality-scaled quantization, zigzag scan and run-length coding, and writes the three channel
//! records into a small binary container. Decompression reverses every step. The three channels
//! are compressed in parallel.
//!
//! This is not a JFIF/JPEG codec: there is no Huffman stage and no chroma subsampling. Quality
//! 1.0 is near lossless; lower qualities trade fidelity for shorter run-length streams.
//!
//! Basic usage to compress an image is as follows:
//!
//! `$> bjpeg photo.png photo.bjpeg`
//!
//! and to get it back:
//!
//! `$> bjpeg -d photo.bjpeg photo_decompressed.png`
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod tools;
pub mod transform;
pub mod types;

pub use compression::compress::{compress, ChannelCodec, ChannelRecord};
pub use compression::decompress::decompress;
pub use compression::pipeline::{Channel, CompressedImage, Settings};
pub use compression::{decode_image, encode_image};
pub use error::{Error, Result};
pub use tools::color::{color_combine, color_split};
pub use types::{Image, PixelOrder, Plane};
