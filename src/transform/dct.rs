//! Orthonormal 2D DCT-II and its inverse, applied to each block of a grid on its own.
//!
//! Samples go in unshifted, so an all-zero block transforms to all-zero coefficients. With
//! orthonormal scaling the DC of an N x N block is `N * mean`, which exceeds the sample range;
//! coefficients are kept as f32.

use std::f64::consts::PI;

use super::blocks::BlockGrid;

/// Precomputed cosine basis for one block size.
#[derive(Clone, Debug)]
pub struct Dct {
    size: usize,
    /// `basis[k * size + n]` = alpha(k) * cos((2n + 1) k pi / 2N)
    basis: Vec<f32>,
}

impl Dct {
    pub fn new(size: usize) -> Self {
        let n = size as f64;
        let mut basis = Vec::with_capacity(size * size);
        for k in 0..size {
            let alpha = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
            for i in 0..size {
                let angle = (2 * i + 1) as f64 * k as f64 * PI / (2.0 * n);
                basis.push((alpha * angle.cos()) as f32);
            }
        }
        Self { size, basis }
    }

    /// Forward transform of one row-major block of samples.
    pub fn forward_block(&self, block: &[u8]) -> Vec<f32> {
        let samples: Vec<f32> = block.iter().map(|&p| p as f32).collect();
        self.forward_f32(&samples)
    }

    /// Inverse transform back to clamped samples.
    pub fn inverse_block(&self, coeffs: &[f32]) -> Vec<u8> {
        self.inverse_f32(coeffs)
            .into_iter()
            .map(|x| x.round().clamp(0.0, 255.0) as u8)
            .collect()
    }

    fn forward_f32(&self, input: &[f32]) -> Vec<f32> {
        let n = self.size;
        // Rows first: tmp[y][u] = sum_x basis[u][x] * in[y][x]
        let mut tmp = vec![0.0f32; n * n];
        for y in 0..n {
            let row = &input[y * n..(y + 1) * n];
            for u in 0..n {
                let b = &self.basis[u * n..(u + 1) * n];
                tmp[y * n + u] = row.iter().zip(b).map(|(a, c)| a * c).sum();
            }
        }
        // Then columns: out[v][u] = sum_y basis[v][y] * tmp[y][u]
        let mut out = vec![0.0f32; n * n];
        for v in 0..n {
            let b = &self.basis[v * n..(v + 1) * n];
            for u in 0..n {
                out[v * n + u] = (0..n).map(|y| b[y] * tmp[y * n + u]).sum();
            }
        }
        out
    }

    fn inverse_f32(&self, coeffs: &[f32]) -> Vec<f32> {
        let n = self.size;
        // Columns: tmp[y][u] = sum_v basis[v][y] * c[v][u]
        let mut tmp = vec![0.0f32; n * n];
        for y in 0..n {
            for u in 0..n {
                tmp[y * n + u] = (0..n)
                    .map(|v| self.basis[v * n + y] * coeffs[v * n + u])
                    .sum();
            }
        }
        // Rows: out[y][x] = sum_u basis[u][x] * tmp[y][u]
        let mut out = vec![0.0f32; n * n];
        for y in 0..n {
            for x in 0..n {
                out[y * n + x] = (0..n)
                    .map(|u| self.basis[u * n + x] * tmp[y * n + u])
                    .sum();
            }
        }
        out
    }
}

/// Forward DCT of every block in `grid`.
pub fn forward(grid: &BlockGrid<u8>) -> BlockGrid<f32> {
    let dct = Dct::new(grid.block_size());
    grid.map(|b| dct.forward_block(b))
}

/// Inverse DCT of every block in `grid`.
pub fn inverse(grid: &BlockGrid<f32>) -> BlockGrid<u8> {
    let dct = Dct::new(grid.block_size());
    grid.map(|b| dct.inverse_block(b))
}
