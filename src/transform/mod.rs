//! The transform module holds the per-block numeric stages of bjpeg.
//!
//! - blocks: Cut a plane into square blocks (edge-replicated padding) and crop it back.
//! - dct: Orthonormal forward and inverse DCT, one block at a time.
//! - quantize: Quality-scaled scalar quantization behind the `QuantTable` trait.
//!
pub mod blocks;
pub mod dct;
pub mod quantize;
