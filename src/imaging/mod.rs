use std::io::Cursor;

use anyhow::Error;
use anyhow::Result;
use image::{DynamicImage, ImageReader};
use tracing::debug;

pub mod algorithm;

/// Neither side of a stored image exceeds this many pixels.
pub const MAX_DIMENSION: u32 = 500;

pub const OUTPUT_MIME: &str = "image/jpeg";

#[derive(Debug)]
pub struct NormalizedImage {
    pub blob: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
}

/// Decodes an uploaded image, shrinks it to fit `MAX_DIMENSION` and re-encodes
/// it as JPEG. The declared upload type is ignored; the format is sniffed.
pub fn normalize(blob: &[u8]) -> Result<NormalizedImage> {
    let reader = ImageReader::new(Cursor::new(blob)).with_guessed_format()?;
    let format = reader.format();
    if format.is_none() {
        return Err(Error::msg("upload image format is unknown"));
    }

    // jpeg has no alpha channel
    let image = DynamicImage::ImageRgb8(reader.decode()?.to_rgb8());
    let (width, height) = algorithm::fit_within(image.width(), image.height(), MAX_DIMENSION);
    debug!(
        ?format,
        from = ?(image.width(), image.height()),
        to = ?(width, height),
        "normalizing upload"
    );

    let blob = if (width, height) == (image.width(), image.height()) {
        algorithm::encode_jpeg(image.as_bytes(), width, height)?
    } else {
        let resized = algorithm::resize(&image, width, height)?;
        algorithm::encode_jpeg(resized.buffer(), width, height)?
    };

    Ok(NormalizedImage {
        blob,
        width,
        height,
        mime: OUTPUT_MIME,
    })
}

#[cfg(test)]
mod tests {
    use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([30, 120, 200, 128]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn large_upload_is_shrunk_to_jpeg() {
        let out = normalize(&png(600, 400)).unwrap();

        assert_eq!(out.mime, "image/jpeg");
        assert_eq!((out.width, out.height), (500, 333));

        let decoded = image::load_from_memory_with_format(&out.blob, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (500, 333));
    }

    #[test]
    fn small_upload_keeps_its_size() {
        let out = normalize(&png(200, 100)).unwrap();

        let decoded = image::load_from_memory(&out.blob).unwrap();
        assert_eq!(decoded.dimensions(), (200, 100));
        assert_eq!(image::guess_format(&out.blob).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(normalize(b"definitely not an image").is_err());
    }
}
