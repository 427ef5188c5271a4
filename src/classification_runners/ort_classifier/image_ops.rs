//! Functions to turn a decoded image into the model's input tensor.

use fast_image_resize::{
    images::Image as FirImage,
    pixels::PixelType,
    FilterType, ResizeAlg, ResizeOptions, Resizer,
};
use image::RgbaImage;
use crate::common::BvrImage;
use crate::data::TensorBuffer;
use crate::error::ClassifyError;

/// Main preprocessing entry point: stretch to `target_w` x `target_h`, then pack.
pub fn preprocess(image: &BvrImage, target_w: u32, target_h: u32) -> Result<TensorBuffer, ClassifyError> {
    let resized = resize_image(image, target_w, target_h)?;
    pack_tensor(&resized)
}

/// Stretches the image to exactly `target_w` x `target_h` with bilinear filtering.
/// Aspect ratio is not preserved.
pub fn resize_image(image: &BvrImage, target_w: u32, target_h: u32) -> Result<BvrImage, ClassifyError> {
    if target_w == 0 || target_h == 0 {
        return Err(ClassifyError::InvalidImageDimensions { width: target_w, height: target_h });
    }
    if image.is_empty() {
        let (width, height) = image.dimensions();
        return Err(ClassifyError::InvalidImageDimensions { width, height });
    }
    if image.dimensions() == (target_w, target_h) {
        return Ok(image.clone());
    }

    let src = image.to_fir_image()?;
    let mut dst = FirImage::new(target_w, target_h, PixelType::U8x4);
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));

    let mut resizer = Resizer::new();
    resizer
        .resize(&src, &mut dst, &options)
        .map_err(|_| ClassifyError::InvalidImageDimensions { width: target_w, height: target_h })?;

    let resized = RgbaImage::from_raw(target_w, target_h, dst.buffer().to_vec())
        .ok_or(ClassifyError::InvalidImageDimensions { width: target_w, height: target_h })?;
    Ok(BvrImage::from(resized))
}

/// Packs pixels row by row as `R, G, B` floats in `[0, 1]`. Alpha is dropped.
pub fn pack_tensor(image: &BvrImage) -> Result<TensorBuffer, ClassifyError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ClassifyError::InvalidImageDimensions { width, height });
    }

    let mut tensor = TensorBuffer::with_capacity(width as usize, height as usize);
    for px in image.as_raw().chunks_exact(4) {
        tensor.put_f32(px[0] as f32 / 255.0);
        tensor.put_f32(px[1] as f32 / 255.0);
        tensor.put_f32(px[2] as f32 / 255.0);
    }

    Ok(tensor)
}
