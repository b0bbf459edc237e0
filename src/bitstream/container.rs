//! Binary layout of a compressed image.
//!
//! Three channel records back to back, Y then U then V. Each record is
//!
//! | field           | type                                  |
//! |-----------------|---------------------------------------|
//! | height          | u32                                   |
//! | width           | u32                                   |
//! | quality         | f32                                   |
//! | pair_count      | u32                                   |
//! | pairs           | pair_count x (count: u32, value: i32) |
//!
//! All little-endian. Nothing may follow the third record.

use crate::compression::compress::ChannelRecord;
use crate::compression::pipeline::CompressedImage;
use crate::error::{Error, Result};
use crate::tools::rle::RunPair;

use super::bytereader::ByteReader;
use super::bytewriter::ByteWriter;

/// height, width, quality, pair_count
const RECORD_HEADER: usize = 16;
/// count, value
const PAIR_SIZE: usize = 8;

/// Serialized size of one record.
pub fn record_size(record: &ChannelRecord) -> usize {
    RECORD_HEADER + record.runs.len() * PAIR_SIZE
}

/// Append one record to `bw`.
pub fn write_record(bw: &mut ByteWriter, record: &ChannelRecord) -> Result<()> {
    let pairs = u32::try_from(record.runs.len())
        .map_err(|_| Error::malformed(format!("{} run pairs will not fit", record.runs.len())))?;
    bw.out32(record.height);
    bw.out32(record.width);
    bw.out_f32(record.quality);
    bw.out32(pairs);
    for run in &record.runs {
        bw.out32(run.count);
        bw.out_i32(run.value);
    }
    Ok(())
}

/// Read one record from `br`. The pair count is checked against the bytes that are left
/// before any pair is read.
pub fn read_record(br: &mut ByteReader<'_>) -> Result<ChannelRecord> {
    let height = br.in32()?;
    let width = br.in32()?;
    let quality = br.in_f32()?;
    let start = br.loc();
    let pairs = br.in32()? as usize;

    let needed = pairs.checked_mul(PAIR_SIZE);
    if needed.map_or(true, |n| n > br.remaining()) {
        return Err(Error::malformed(format!(
            "length prefix at {} claims {} pairs, only {} bytes left",
            start,
            pairs,
            br.remaining()
        )));
    }

    let mut runs = Vec::with_capacity(pairs);
    for _ in 0..pairs {
        let count = br.in32()?;
        let value = br.in_i32()?;
        runs.push(RunPair { count, value });
    }

    Ok(ChannelRecord {
        height,
        width,
        quality,
        runs,
    })
}

/// Serialize all three records.
pub fn serialize(image: &CompressedImage) -> Result<Vec<u8>> {
    let size = record_size(&image.y) + record_size(&image.u) + record_size(&image.v);
    let mut bw = ByteWriter::new(size);
    write_record(&mut bw, &image.y)?;
    write_record(&mut bw, &image.u)?;
    write_record(&mut bw, &image.v)?;
    Ok(bw.into_output())
}

/// Parse a container. Fails as a whole; no partial image is ever returned.
pub fn deserialize(bytes: &[u8]) -> Result<CompressedImage> {
    let mut br = ByteReader::new(bytes);
    let y = read_record(&mut br)?;
    let u = read_record(&mut br)?;
    let v = read_record(&mut br)?;
    if br.remaining() > 0 {
        return Err(Error::malformed(format!(
            "{} trailing bytes after {}",
            br.remaining(),
            br.loc()
        )));
    }
    Ok(CompressedImage { y, u, v })
}
