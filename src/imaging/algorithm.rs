use anyhow::{anyhow, Result};
use fast_image_resize::{images::Image, IntoImageView, Resizer};
use image::{codecs::jpeg::JpegEncoder, DynamicImage, ExtendedColorType, ImageEncoder};

/// Largest size with the same aspect ratio that fits in a `max` x `max` box.
/// Images already inside the box are left alone.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = f64::min(max as f64 / width as f64, max as f64 / height as f64);
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max);

    (scaled(width), scaled(height))
}

pub fn resize(src_image: &DynamicImage, width: u32, height: u32) -> Result<Image<'static>> {
    let pixel_type = src_image
        .pixel_type()
        .ok_or_else(|| anyhow!("unsupported pixel layout {:?}", src_image.color()))?;

    let mut dst_image = Image::new(width, height, pixel_type);

    let mut resizer = Resizer::new();
    resizer.resize(src_image, &mut dst_image, None)?;

    Ok(dst_image)
}

/// Encodes packed 8-bit RGB pixels as JPEG.
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    JpegEncoder::new(&mut writer).write_image(pixels, width, height, ExtendedColorType::Rgb8)?;
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_images_are_bounded_by_width() {
        assert_eq!(fit_within(600, 400, 500), (500, 333));
        assert_eq!(fit_within(5000, 10, 500), (500, 1));
    }

    #[test]
    fn tall_images_are_bounded_by_height() {
        assert_eq!(fit_within(400, 1000, 500), (200, 500));
    }

    #[test]
    fn no_upscaling() {
        assert_eq!(fit_within(200, 100, 500), (200, 100));
        assert_eq!(fit_within(500, 500, 500), (500, 500));
    }

    #[test]
    fn resize_produces_requested_buffer() {
        let src = DynamicImage::new_rgb8(40, 20);
        let dst = resize(&src, 10, 5).unwrap();

        assert_eq!(dst.buffer().len(), 10 * 5 * 3);
    }

    #[test]
    fn encodes_jpeg() {
        let pixels = vec![90u8; 4 * 2 * 3];
        let jpeg = encode_jpeg(&pixels, 4, 2).unwrap();

        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
    }
}
