//! Scalar quantization, the only lossy stage of the codec.
//!
//! Each coefficient is divided by a step taken from a base table and a quality factor in (0, 1]:
//!
//! `step = 1 + base * (1 / quality - 1)`
//!
//! At quality 1.0 every step is 1, which only rounds coefficients to integers. Lower quality
//! gives coarser steps, more zeros and longer runs for the run-length stage. The table is
//! rebuilt from the quality on both sides and never stored.

use crate::error::{Error, Result};

use super::blocks::BlockGrid;

/// Standard JPEG Annex K luminance table.
#[rustfmt::skip]
pub const STD_LUMA_QUANT: [u16; 64] = [
    16, 11, 10, 16,  24,  40,  51,  61,
    12, 12, 14, 19,  26,  58,  60,  55,
    14, 13, 16, 24,  40,  57,  69,  56,
    14, 17, 22, 29,  51,  87,  80,  62,
    18, 22, 37, 56,  68, 109, 103,  77,
    24, 35, 55, 64,  81, 104, 113,  92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103,  99,
];

/// Standard JPEG Annex K chrominance table.
#[rustfmt::skip]
pub const STD_CHROMA_QUANT: [u16; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99,
    18, 21, 26, 66, 99, 99, 99, 99,
    24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
];

/// Source of per-position base steps. Swap implementations to change the rate/fidelity
/// tradeoff without touching the transform or entropy stages.
pub trait QuantTable: Send + Sync {
    /// Base step for every position of a `block_size` square block, row-major.
    fn base(&self, block_size: usize) -> Vec<f32>;
}

/// Annex K luminance table.
#[derive(Clone, Copy, Debug, Default)]
pub struct LumaTable;

/// Annex K chrominance table.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChromaTable;

/// Same base step everywhere.
#[derive(Clone, Copy, Debug)]
pub struct FlatTable(pub f32);

impl QuantTable for LumaTable {
    fn base(&self, block_size: usize) -> Vec<f32> {
        resample(&STD_LUMA_QUANT, block_size)
    }
}

impl QuantTable for ChromaTable {
    fn base(&self, block_size: usize) -> Vec<f32> {
        resample(&STD_CHROMA_QUANT, block_size)
    }
}

impl QuantTable for FlatTable {
    fn base(&self, block_size: usize) -> Vec<f32> {
        vec![self.0; block_size * block_size]
    }
}

/// Nearest-neighbour stretch of an 8x8 table to `size` x `size`.
fn resample(table: &[u16; 64], size: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(size * size);
    for v in 0..size {
        for u in 0..size {
            out.push(table[(v * 8 / size) * 8 + u * 8 / size] as f32);
        }
    }
    out
}

/// Reject anything outside (0, 1].
pub fn check_quality(quality: f32) -> Result<f32> {
    if quality.is_finite() && quality > 0.0 && quality <= 1.0 {
        Ok(quality)
    } else {
        Err(Error::InvalidQuality(quality))
    }
}

/// Per-position steps for `table` at `quality`.
pub fn steps(table: &dyn QuantTable, block_size: usize, quality: f32) -> Result<Vec<f32>> {
    let quality = check_quality(quality)?;
    let scale = 1.0 / quality - 1.0;
    Ok(table
        .base(block_size)
        .into_iter()
        .map(|base| 1.0 + base * scale)
        .collect())
}

/// Divide every coefficient by its step and round to the nearest integer.
pub fn quantize(
    grid: &BlockGrid<f32>,
    table: &dyn QuantTable,
    quality: f32,
) -> Result<BlockGrid<i32>> {
    let steps = steps(table, grid.block_size(), quality)?;
    Ok(grid.map(|block| {
        block
            .iter()
            .zip(&steps)
            .map(|(c, q)| (c / q).round() as i32)
            .collect()
    }))
}

/// Multiply every quantized value back by its step.
pub fn dequantize(
    grid: &BlockGrid<i32>,
    table: &dyn QuantTable,
    quality: f32,
) -> Result<BlockGrid<f32>> {
    let steps = steps(table, grid.block_size(), quality)?;
    Ok(grid.map(|block| {
        block
            .iter()
            .zip(&steps)
            .map(|(&v, q)| v as f32 * q)
            .collect()
    }))
}

#[cfg(test)]
mod test {
    use super::*;

    fn single(block: Vec<f32>, size: usize) -> BlockGrid<f32> {
        BlockGrid::new(size, 1, 1, vec![block]).unwrap()
    }

    #[test]
    fn full_quality_is_unit_step() {
        let s = steps(&LumaTable, 8, 1.0).unwrap();
        assert!(s.iter().all(|&q| q == 1.0));
    }

    #[test]
    fn lower_quality_is_coarser() {
        let fine = steps(&LumaTable, 8, 0.8).unwrap();
        let coarse = steps(&LumaTable, 8, 0.2).unwrap();
        assert!(fine.iter().zip(&coarse).all(|(f, c)| c > f));
        // base 16 at quality 0.5 -> 1 + 16
        assert_eq!(steps(&LumaTable, 8, 0.5).unwrap()[0], 17.0);
    }

    #[test]
    fn rounds_to_nearest() {
        let grid = single(vec![2.4, -2.6, 0.49, 7.5], 2);
        let q = quantize(&grid, &FlatTable(1.0), 1.0).unwrap();
        assert_eq!(q.block(0, 0), &[2, -3, 0, 8]);
    }

    #[test]
    fn dequantize_scales_back() {
        let grid = single(vec![100.0, -50.0, 3.0, 0.0], 2);
        let q = quantize(&grid, &FlatTable(9.0), 0.5).unwrap();
        // step = 1 + 9 * 1 = 10
        assert_eq!(q.block(0, 0), &[10, -5, 0, 0]);
        let back = dequantize(&q, &FlatTable(9.0), 0.5).unwrap();
        assert_eq!(back.block(0, 0), &[100.0, -50.0, 0.0, 0.0]);
    }

    #[test]
    fn resample_keeps_corners() {
        let t16 = LumaTable.base(16);
        assert_eq!(t16.len(), 256);
        assert_eq!(t16[0], 16.0);
        assert_eq!(t16[255], 99.0);
        let t4 = ChromaTable.base(4);
        assert_eq!(t4, vec![17.0, 24.0, 99.0, 99.0, 24.0, 56.0, 99.0, 99.0, 99.0, 99.0, 99.0, 99.0, 99.0, 99.0, 99.0, 99.0]);
    }

    #[test]
    fn bad_quality_rejected() {
        for q in [0.0, -0.5, 1.5, f32::NAN, f32::INFINITY] {
            assert!(check_quality(q).is_err(), "{}", q);
        }
        assert!(check_quality(1.0).is_ok());
    }
}
