//! Image file access for the driver. The codec works on in-memory buffers only; this is where
//! they come from and where they go.

use std::path::Path;

use log::{debug, warn};

use crate::types::{Image, PixelOrder};

/// Driver-level result: any error, already descriptive enough to show the user.
pub type DriverResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Decode any format the `image` crate understands (BMP, PNG) into an RGB image.
pub fn load(path: &Path) -> DriverResult<Image> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("Loaded {}x{} image from {}", width, height, path.display());
    Ok(Image::new(
        width as usize,
        height as usize,
        PixelOrder::Rgb,
        rgb.into_raw(),
    )?)
}

/// Encode `image` to `path`, format picked from the extension.
pub fn save(path: &Path, image: &Image) -> DriverResult<()> {
    let rgb = image.to_order(PixelOrder::Rgb);
    let (width, height) = (rgb.width() as u32, rgb.height() as u32);
    let buffer = image::RgbImage::from_raw(width, height, rgb.into_data())
        .ok_or("pixel buffer does not match image dimensions")?;
    buffer.save(path)?;
    debug!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

/// Refuse to clobber an existing file unless forced.
pub fn check_overwrite(path: &Path, force: bool) -> DriverResult<()> {
    if path.exists() {
        if !force {
            return Err(format!(
                "{} already exists. Use --force to overwrite it.",
                path.display()
            )
            .into());
        }
        warn!("Overwriting {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Image {
        let data: Vec<u8> = (0..5 * 3 * 3).map(|i| (i * 17 % 256) as u8).collect();
        Image::new(5, 3, PixelOrder::Rgb, data).unwrap()
    }

    #[test]
    fn png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        save(&path, &sample()).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn bgr_is_saved_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.bmp");
        save(&path, &sample().to_order(PixelOrder::Bgr)).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn overwrite_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.png");
        assert!(check_overwrite(&path, false).is_ok());
        std::fs::write(&path, b"x").unwrap();
        assert!(check_overwrite(&path, false).is_err());
        assert!(check_overwrite(&path, true).is_ok());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.png")).is_err());
    }
}
