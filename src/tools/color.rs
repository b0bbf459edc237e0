//! Luma/chroma colour transform.
//!
//! Uses the full-range JFIF (BT.601) matrix with chroma centred on 128. Both directions work in
//! f32 and round to the nearest u8, so a split followed by a combine is off by at most one step
//! per channel.
//!
//! - Y =  0.299 R + 0.587 G + 0.114 B
//! - U = -0.168736 R - 0.331264 G + 0.5 B + 128
//! - V =  0.5 R - 0.418688 G - 0.081312 B + 128

use crate::error::{Error, Result};
use crate::types::{Image, PixelOrder, Plane};

const CHROMA_OFFSET: f32 = 128.0;

#[inline]
fn to_u8(x: f32) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Convert one pixel to (Y, U, V).
#[inline]
pub fn rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as f32, g as f32, b as f32);

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = -0.168736 * r - 0.331264 * g + 0.5 * b + CHROMA_OFFSET;
    let v = 0.5 * r - 0.418688 * g - 0.081312 * b + CHROMA_OFFSET;

    (to_u8(y), to_u8(u), to_u8(v))
}

/// Inverse of [`rgb_to_yuv`].
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let u = u as f32 - CHROMA_OFFSET;
    let v = v as f32 - CHROMA_OFFSET;

    let r = y + 1.402 * v;
    let g = y - 0.344136 * u - 0.714136 * v;
    let b = y + 1.772 * u;

    (to_u8(r), to_u8(g), to_u8(b))
}

/// Split an interleaved image into Y, U and V planes of the same dimensions.
pub fn color_split(image: &Image) -> (Plane, Plane, Plane) {
    let n = image.width() * image.height();
    let mut y = Vec::with_capacity(n);
    let mut u = Vec::with_capacity(n);
    let mut v = Vec::with_capacity(n);

    for px in image.data().chunks_exact(3) {
        let (r, g, b) = match image.order() {
            PixelOrder::Rgb => (px[0], px[1], px[2]),
            PixelOrder::Bgr => (px[2], px[1], px[0]),
        };
        let (py, pu, pv) = rgb_to_yuv(r, g, b);
        y.push(py);
        u.push(pu);
        v.push(pv);
    }

    let (w, h) = (image.width(), image.height());
    (
        Plane::from_parts(w, h, y),
        Plane::from_parts(w, h, u),
        Plane::from_parts(w, h, v),
    )
}

/// Interleave three planes back into an image with the requested channel order.
pub fn color_combine(y: &Plane, u: &Plane, v: &Plane, order: PixelOrder) -> Result<Image> {
    let (w, h) = (y.width(), y.height());
    for p in [u, v] {
        if p.width() != w || p.height() != h {
            return Err(Error::DimensionMismatch {
                expected: w * h,
                actual: p.width() * p.height(),
            });
        }
    }

    let mut data = Vec::with_capacity(w * h * 3);
    for ((&py, &pu), &pv) in y.data().iter().zip(u.data()).zip(v.data()) {
        let (r, g, b) = yuv_to_rgb(py, pu, pv);
        match order {
            PixelOrder::Rgb => data.extend_from_slice(&[r, g, b]),
            PixelOrder::Bgr => data.extend_from_slice(&[b, g, r]),
        }
    }
    Image::new(w, h, order, data)
}
