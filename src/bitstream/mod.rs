//! The bitstream module forms the serialization layer of bjpeg.
//!
//! A compressed image is three channel records written back to back. The codec itself never
//! touches files; it hands the finished bytes to the driver, and takes bytes back from it.
//!
//! - bytewriter: little-endian primitive writer.
//! - bytereader: bounds-checked little-endian primitive reader.
//! - container: the record layout built from those primitives.
//!
pub mod bytereader;
pub mod bytewriter;
pub mod container;
