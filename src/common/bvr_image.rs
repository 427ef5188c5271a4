use std::path::Path;
use fast_image_resize::images::Image as FirImage;
use fast_image_resize::PixelType;
use image::{DynamicImage, GrayImage, Rgba, RgbImage, RgbaImage};
use crate::error::ClassifyError;

/// A decoded colour image handed in by the caller, kept as 8-bit RGBA.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BvrImage {
    pub image: RgbaImage,
}

impl std::ops::Deref for BvrImage {
    type Target = RgbaImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl std::ops::DerefMut for BvrImage {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.image
    }
}

impl From<DynamicImage> for BvrImage {
    fn from(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }
}

impl From<GrayImage> for BvrImage {
    fn from(image: GrayImage) -> Self {
        Self {
            image: DynamicImage::from(image).to_rgba8(),
        }
    }
}

impl From<RgbImage> for BvrImage {
    fn from(image: RgbImage) -> Self {
        Self {
            image: DynamicImage::from(image).to_rgba8(),
        }
    }
}

impl From<RgbaImage> for BvrImage {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl From<BvrImage> for DynamicImage {
    fn from(image: BvrImage) -> Self {
        image.into_dyn()
    }
}

impl From<BvrImage> for RgbaImage {
    fn from(image: BvrImage) -> Self {
        image.into_rgba8()
    }
}

impl BvrImage {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Builds an image from packed `0xAARRGGBB` samples in row-major order,
    /// the layout bitmap decoders hand out.
    pub fn from_argb_pixels(width: u32, height: u32, pixels: &[u32]) -> Result<Self, ClassifyError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(ClassifyError::InvalidImageDimensions { width, height });
        }

        let mut image = RgbaImage::new(width, height);
        for (dst, &val) in image.pixels_mut().zip(pixels) {
            *dst = Rgba([
                ((val >> 16) & 0xFF) as u8,
                ((val >> 8) & 0xFF) as u8,
                (val & 0xFF) as u8,
                ((val >> 24) & 0xFF) as u8,
            ]);
        }
        Ok(Self { image })
    }

    /// Decodes an encoded image file (JPEG, PNG, ...).
    pub fn open(path: &Path) -> Result<Self, ClassifyError> {
        let image = image::open(path).map_err(|e| ClassifyError::ImageDecodeFailure {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::non_empty(image)
    }

    /// Decodes an in-memory encoded image, guessing the format from its header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClassifyError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ClassifyError::ImageDecodeFailure { reason: e.to_string() })?;
        Self::non_empty(image)
    }

    fn non_empty(image: DynamicImage) -> Result<Self, ClassifyError> {
        let img = Self::from(image);
        if img.is_empty() {
            let (width, height) = img.dimensions();
            return Err(ClassifyError::InvalidImageDimensions { width, height });
        }
        Ok(img)
    }

    /// Packs every pixel back into `0xAARRGGBB`.
    pub fn to_argb_u32s(&self) -> Vec<u32> {
        use rayon::prelude::*;

        self.image
            .as_raw()
            .par_chunks(4)
            .map(|c| ((c[3] as u32) << 24) | ((c[0] as u32) << 16) | ((c[1] as u32) << 8) | (c[2] as u32))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn to_fir_image(&self) -> Result<FirImage<'static>, ClassifyError> {
        let (width, height) = self.image.dimensions();

        FirImage::from_vec_u8(width, height, self.image.as_raw().clone(), PixelType::U8x4)
            .map_err(|_| ClassifyError::InvalidImageDimensions { width, height })
    }

    pub fn into_dyn(self) -> DynamicImage {
        DynamicImage::from(self.image)
    }

    pub fn into_rgba8(self) -> RgbaImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_round_trip() {
        let pixels = [0xFF10_2030, 0x8040_5060, 0x0000_0000, 0xFFFF_FFFF];
        let img = BvrImage::from_argb_pixels(2, 2, &pixels).unwrap();

        assert_eq!(img.get_pixel(0, 0), &Rgba([0x10, 0x20, 0x30, 0xFF]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([0x40, 0x50, 0x60, 0x80]));
        assert_eq!(img.to_argb_u32s(), pixels.to_vec());
    }

    #[test]
    fn argb_rejects_bad_lengths() {
        assert!(BvrImage::from_argb_pixels(2, 2, &[0; 3]).is_err());
        assert!(BvrImage::from_argb_pixels(0, 2, &[]).is_err());
    }

    #[test]
    fn decodes_encoded_bytes() {
        let src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        DynamicImage::from(src.clone()).write_to(&mut png, image::ImageFormat::Png).unwrap();

        let img = BvrImage::from_bytes(png.get_ref()).unwrap();
        assert_eq!(img.image, src);
    }

    #[test]
    fn undecodable_input_fails() {
        let err = BvrImage::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, ClassifyError::ImageDecodeFailure { .. }));
        assert_eq!(err.user_message(), "Error loading image.");

        let err = BvrImage::open(Path::new("/nonexistent/photo.jpg")).unwrap_err();
        assert!(matches!(err, ClassifyError::ImageDecodeFailure { .. }));
    }

    #[test]
    fn rgb_gets_opaque_alpha() {
        let img = BvrImage::from(RgbImage::from_pixel(3, 1, image::Rgb([1, 2, 3])));
        assert_eq!(img.dimensions(), (3, 1));
        assert_eq!(img.get_pixel(2, 0), &Rgba([1, 2, 3, 255]));
    }
}
