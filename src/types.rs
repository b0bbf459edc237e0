//! Sample containers shared by every stage: single-channel planes and interleaved images.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// Channel order of an interleaved 3-byte pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelOrder {
    #[default]
    Rgb,
    /// OpenCV-style loaders hand out blue first.
    Bgr,
}

impl Display for PixelOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Single-channel 2D grid of samples, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Plane {
    /// Wrap `data` as a `width` x `height` plane. The length must match exactly.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// A plane with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build from a generator called once per (x, y), row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

}

/// Interleaved 3-channel 8-bit image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    order: PixelOrder,
    data: Vec<u8>,
}

impl Image {
    /// Wrap an interleaved buffer. `data` must hold exactly `width * height * 3` bytes.
    pub fn new(width: usize, height: usize, order: PixelOrder, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(Error::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn order(&self) -> PixelOrder {
        self.order
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Same pixels, reordered to `order`.
    pub fn to_order(&self, order: PixelOrder) -> Image {
        if order == self.order {
            return self.clone();
        }
        let mut data = self.data.clone();
        data.chunks_exact_mut(3).for_each(|px| px.swap(0, 2));
        Image {
            width: self.width,
            height: self.height,
            order,
            data,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plane_rejects_short_buffer() {
        let result = Plane::new(4, 4, vec![0; 15]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn plane_from_fn_is_row_major() {
        let p = Plane::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(p.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(p.get(2, 1), 12);
    }

    #[test]
    fn image_rejects_wrong_length() {
        let result = Image::new(2, 2, PixelOrder::Rgb, vec![0; 11]);
        assert!(matches!(
            result,
            Err(Error::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn to_order_swaps_red_and_blue() {
        let img = Image::new(1, 1, PixelOrder::Rgb, vec![1, 2, 3]).unwrap();
        let bgr = img.to_order(PixelOrder::Bgr);
        assert_eq!(bgr.data(), &[3, 2, 1]);
        assert_eq!(bgr.to_order(PixelOrder::Rgb), img);
    }
}
