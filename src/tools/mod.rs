//! The tools module provides the helper stages and driver plumbing for bjpeg.
//!
//! The tools are:
//! - cli: Command line interface for the bjpeg binary.
//! - color: RGB/BGR to Y, U, V planes and back.
//! - image_io: Read and write image files for the driver.
//! - rle: Run-Length-Encoding of zigzag sequences.
//! - zigzag: Diagonal low-to-high frequency scan of each block.
//!
pub mod cli;
pub mod color;
pub mod image_io;
pub mod rle;
pub mod zigzag;
