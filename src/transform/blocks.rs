//! Block partitioning: cut a plane into square blocks and stitch it back together.
//!
//! Planes whose sides are not a multiple of the block size are padded by edge replication: the
//! last real column is repeated to the right and the last real row downwards. Replicated edges
//! keep the padded blocks smooth, so they cost little after the transform. The true dimensions
//! are carried separately and `reconstruct` crops the padding away.

use crate::error::{Error, Result};
use crate::types::Plane;

/// Row-major grid of equally sized square blocks. Each block is stored row-major as
/// `block_size * block_size` values.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockGrid<T> {
    block_size: usize,
    rows: usize,
    cols: usize,
    blocks: Vec<Vec<T>>,
}

impl<T> BlockGrid<T> {
    /// Assemble a grid from `rows * cols` blocks in row-major block order.
    pub fn new(block_size: usize, rows: usize, cols: usize, blocks: Vec<Vec<T>>) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize(block_size));
        }
        let count = rows.checked_mul(cols).ok_or(Error::InvalidDimensions {
            width: cols,
            height: rows,
        })?;
        if blocks.len() != count {
            return Err(Error::DimensionMismatch {
                expected: count,
                actual: blocks.len(),
            });
        }
        let area = block_size * block_size;
        if let Some(bad) = blocks.iter().find(|b| b.len() != area) {
            return Err(Error::DimensionMismatch {
                expected: area,
                actual: bad.len(),
            });
        }
        Ok(Self {
            block_size,
            rows,
            cols,
            blocks,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of block rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of block columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Block at block-row `row`, block-column `col`.
    pub fn block(&self, row: usize, col: usize) -> &[T] {
        &self.blocks[row * self.cols + col]
    }

    /// All blocks in row-major block order.
    pub fn blocks(&self) -> &[Vec<T>] {
        &self.blocks
    }

    /// Apply `f` to every block independently, keeping the grid shape.
    pub fn map<U>(&self, f: impl Fn(&[T]) -> Vec<U>) -> BlockGrid<U> {
        BlockGrid {
            block_size: self.block_size,
            rows: self.rows,
            cols: self.cols,
            blocks: self.blocks.iter().map(|b| f(b)).collect(),
        }
    }
}

/// Split `plane` into a grid of `block_size` square blocks, padding by edge replication.
pub fn chunk(plane: &Plane, block_size: usize) -> Result<BlockGrid<u8>> {
    if block_size == 0 {
        return Err(Error::InvalidBlockSize(block_size));
    }
    let s = block_size;
    let (width, height) = (plane.width(), plane.height());
    let rows = height.div_ceil(s);
    let cols = width.div_ceil(s);

    let mut blocks = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let mut block = Vec::with_capacity(s * s);
            for y in 0..s {
                // rows > 0 implies height > 0, likewise for width
                let py = (row * s + y).min(height - 1);
                for x in 0..s {
                    let px = (col * s + x).min(width - 1);
                    block.push(plane.get(px, py));
                }
            }
            blocks.push(block);
        }
    }

    Ok(BlockGrid {
        block_size: s,
        rows,
        cols,
        blocks,
    })
}

/// Reassemble a plane of exactly `out_height` x `out_width` from `grid`, dropping padding.
pub fn reconstruct(grid: &BlockGrid<u8>, out_height: usize, out_width: usize) -> Result<Plane> {
    let s = grid.block_size;
    let (grid_height, grid_width) = (grid.rows.saturating_mul(s), grid.cols.saturating_mul(s));
    if out_height > grid_height || out_width > grid_width {
        return Err(Error::DimensionMismatch {
            expected: out_height.saturating_mul(out_width),
            actual: grid_height.saturating_mul(grid_width),
        });
    }

    let mut data = Vec::with_capacity(out_height * out_width);
    for y in 0..out_height {
        let (row, iy) = (y / s, y % s);
        for x in 0..out_width {
            data.push(grid.block(row, x / s)[iy * s + x % s]);
        }
    }
    Plane::new(out_width, out_height, data)
}

#[cfg(test)]
mod test {
    use super::*;

    fn ramp(width: usize, height: usize) -> Plane {
        Plane::from_fn(width, height, |x, y| (x * 7 + y * 13) as u8)
    }

    #[test]
    fn sixteen_square_is_two_by_two() {
        let grid = chunk(&ramp(16, 16), 8).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid.blocks().len(), 4);
        assert!(grid.blocks().iter().all(|b| b.len() == 64));
    }

    #[test]
    fn round_trip_any_block_size() {
        for (w, h) in [(16, 16), (17, 9), (1, 1), (5, 23), (64, 3)] {
            let plane = ramp(w, h);
            for s in [1, 2, 3, 4, 7, 8, 16, 32] {
                let grid = chunk(&plane, s).unwrap();
                assert_eq!(reconstruct(&grid, h, w).unwrap(), plane, "{}x{} s={}", w, h, s);
            }
        }
    }

    #[test]
    fn padding_replicates_edges() {
        let plane = Plane::from_fn(3, 2, |x, y| (y * 3 + x) as u8);
        let grid = chunk(&plane, 4).unwrap();
        assert_eq!(
            grid.block(0, 0),
            &[0, 1, 2, 2, 3, 4, 5, 5, 3, 4, 5, 5, 3, 4, 5, 5]
        );
    }

    #[test]
    fn block_lookup_is_row_major() {
        let plane = Plane::from_fn(4, 4, |x, y| (y * 4 + x) as u8);
        let grid = chunk(&plane, 2).unwrap();
        assert_eq!(grid.block(0, 1), &[2, 3, 6, 7]);
        assert_eq!(grid.block(1, 0), &[8, 9, 12, 13]);
    }

    #[test]
    fn empty_plane() {
        let plane = Plane::filled(0, 0, 0);
        let grid = chunk(&plane, 8).unwrap();
        assert!(grid.blocks().is_empty());
        assert_eq!(reconstruct(&grid, 0, 0).unwrap(), plane);
    }

    #[test]
    fn zero_block_size_rejected() {
        assert!(matches!(
            chunk(&ramp(4, 4), 0),
            Err(Error::InvalidBlockSize(0))
        ));
    }

    #[test]
    fn oversized_output_rejected() {
        let grid = chunk(&ramp(8, 8), 8).unwrap();
        assert!(matches!(
            reconstruct(&grid, 9, 8),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn grid_new_checks_block_area() {
        let result = BlockGrid::new(2, 1, 1, vec![vec![0u8; 3]]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn grid_new_rejects_overflowing_shape() {
        let result = BlockGrid::<u8>::new(8, usize::MAX, 2, Vec::new());
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn degenerate_grid_reconstructs_without_overflow() {
        let grid = BlockGrid::<u8>::new(8, usize::MAX, 0, Vec::new()).unwrap();
        assert!(reconstruct(&grid, 1, 1).is_err());
    }
}
