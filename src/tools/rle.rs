//! Run-length coding of zigzag sequences into (count, value) pairs.
//!
//! Every maximal run of equal values becomes one pair, isolated values included (count 1). The
//! stage is lossless: decoding reproduces the input exactly.

use crate::error::{Error, Result};

/// Largest number of values a stream may expand to, 2^28 (a 16384 x 16384 plane). Anything
/// bigger is treated as a malformed stream rather than allocated.
pub const MAX_DECODED_VALUES: usize = 1 << 28;

/// One run: `count` repetitions of `value`. `count` is never zero in a well formed stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunPair {
    pub count: u32,
    pub value: i32,
}

impl RunPair {
    pub fn new(count: u32, value: i32) -> Self {
        Self { count, value }
    }
}

/// Merge runs of equal consecutive values. Runs longer than `u32::MAX` are split.
pub fn rle_encode(data: &[i32]) -> Vec<RunPair> {
    let mut out: Vec<RunPair> = Vec::new();
    for &value in data {
        match out.last_mut() {
            Some(run) if run.value == value && run.count < u32::MAX => run.count += 1,
            _ => out.push(RunPair::new(1, value)),
        }
    }
    out
}

/// Total number of values `runs` expands to. Fails on a zero count or on overflow.
pub fn expanded_len(runs: &[RunPair]) -> Result<usize> {
    runs.iter().enumerate().try_fold(0usize, |total, (i, run)| {
        if run.count == 0 {
            return Err(Error::malformed(format!("run {} has a zero count", i)));
        }
        total
            .checked_add(run.count as usize)
            .ok_or_else(|| Error::malformed("run-length stream overflows"))
    })
}

/// Expand every pair into `count` copies of its value.
pub fn rle_decode(runs: &[RunPair]) -> Result<Vec<i32>> {
    let len = expanded_len(runs)?;
    if len > MAX_DECODED_VALUES {
        return Err(Error::malformed(format!(
            "run-length stream expands to {} values, limit is {}",
            len, MAX_DECODED_VALUES
        )));
    }
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| {
        Error::malformed(format!("cannot allocate {} decoded values", len))
    })?;
    for run in runs {
        out.extend(std::iter::repeat(run.value).take(run.count as usize));
    }
    Ok(out)
}
