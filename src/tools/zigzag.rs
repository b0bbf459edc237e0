//! Zigzag scan: reorder each block's coefficients along anti-diagonals, low frequencies first.
//!
//! After quantization most high-frequency coefficients are zero. Reading them last puts those
//! zeros next to each other, which is what the run-length stage feeds on.

use crate::error::{Error, Result};
use crate::transform::blocks::BlockGrid;

/// Natural (row-major) index for every scan position of a `size` x `size` block.
///
/// Walks anti-diagonals from the DC corner, alternating direction. For size 8 this is the
/// standard JPEG natural order.
pub fn scan_order(size: usize) -> Vec<usize> {
    if size == 0 {
        return Vec::new();
    }
    let mut order = Vec::with_capacity(size * size);
    for diag in 0..(2 * size - 1) {
        let lo = diag.saturating_sub(size - 1);
        let hi = diag.min(size - 1);
        if diag % 2 == 0 {
            // up and to the right
            for row in (lo..=hi).rev() {
                order.push(row * size + diag - row);
            }
        } else {
            for row in lo..=hi {
                order.push(row * size + diag - row);
            }
        }
    }
    order
}

/// Scan every block in grid order and concatenate the results.
pub fn zigzag_encode(grid: &BlockGrid<i32>) -> Vec<i32> {
    let order = scan_order(grid.block_size());
    let mut out = Vec::with_capacity(grid.blocks().len() * order.len());
    for block in grid.blocks() {
        out.extend(order.iter().map(|&i| block[i]));
    }
    out
}

/// Rebuild a `rows` x `cols` grid of `block_size` blocks from a concatenated scan.
pub fn zigzag_decode(
    seq: &[i32],
    rows: usize,
    cols: usize,
    block_size: usize,
) -> Result<BlockGrid<i32>> {
    let order = scan_order(block_size);
    let area = order.len();
    let expected = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(area))
        .ok_or(Error::InvalidDimensions {
            width: cols,
            height: rows,
        })?;
    if seq.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: seq.len(),
        });
    }

    let blocks = if area == 0 {
        Vec::new()
    } else {
        seq.chunks_exact(area)
            .map(|scan| {
                let mut block = vec![0; area];
                for (&natural, &value) in order.iter().zip(scan) {
                    block[natural] = value;
                }
                block
            })
            .collect()
    };
    BlockGrid::new(block_size, rows, cols, blocks)
}
