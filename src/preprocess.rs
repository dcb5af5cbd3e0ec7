//! Image decoding and model input preparation.
//!
//! The classifier takes a single NHWC batch of shape `(1, 128, 128, 3)` with
//! values in `[0, 1]`. Inputs of any size are resized (not cropped) to
//! 128×128, so aspect distortion is expected. Alpha is dropped and grayscale
//! is expanded to three channels.

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat};
use ndarray::{Array4, ArrayView4};
use serde::Serialize;

use crate::error::{Result, ThyraError};

/// Spatial size the classifier was trained on.
pub const INPUT_SIZE: u32 = 128;

/// Number of color channels fed to the classifier.
pub const INPUT_CHANNELS: usize = 3;

/// Normalized model input, shape `(1, INPUT_SIZE, INPUT_SIZE, 3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor(Array4<f32>);

impl ImageTensor {
    /// Wrap an existing array, checking the layout the classifier expects.
    pub fn from_array(array: Array4<f32>) -> Result<Self> {
        let expected = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, INPUT_CHANNELS];
        if array.shape() != expected {
            return Err(ThyraError::Inference(format!(
                "tensor shape {:?} does not match {:?}",
                array.shape(),
                expected
            )));
        }
        Ok(Self(array))
    }

    pub fn shape(&self) -> [usize; 4] {
        let s = self.0.shape();
        [s[0], s[1], s[2], s[3]]
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.0.view()
    }

    /// Contiguous row-major data for runtimes that take `(shape, slice)`.
    pub fn as_contiguous(&self) -> Result<&[f32]> {
        self.0
            .as_slice()
            .ok_or_else(|| ThyraError::Inference("input tensor is not contiguous".to_string()))
    }
}

/// Convert a decoded image into the classifier input tensor.
pub fn preprocess(image: &DynamicImage) -> ImageTensor {
    let resized = image.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
    let rgb = resized.to_rgb8();
    let (width, height) = rgb.dimensions();

    let array = Array4::from_shape_fn(
        (1, height as usize, width as usize, INPUT_CHANNELS),
        |(_, y, x, c)| f32::from(rgb.get_pixel(x as u32, y as u32)[c]) / 255.0,
    );
    ImageTensor(array)
}

/// Descriptive facts about an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDetails {
    pub width: u32,
    pub height: u32,
    /// Container format, when it could be sniffed from the bytes.
    pub format: Option<String>,
    /// Color mode, e.g. "RGB", "RGBA", "L".
    pub mode: String,
}

impl ImageDetails {
    pub fn of(image: &DynamicImage, format: Option<ImageFormat>) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            format: format.map(|f| format!("{f:?}").to_uppercase()),
            mode: color_mode(image.color()).to_string(),
        }
    }
}

/// An uploaded image after decoding.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub details: ImageDetails,
}

/// Decode uploaded bytes (JPEG, PNG, ...).
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let format = image::guess_format(bytes).ok();
    let image = image::load_from_memory(bytes)?;
    let details = ImageDetails::of(&image, format);
    Ok(DecodedImage { image, details })
}

fn color_mode(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 | ColorType::L16 => "L",
        ColorType::La8 | ColorType::La16 => "LA",
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => "RGB",
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => "RGBA",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn rgba_input_becomes_rgb_tensor() {
        let rgba = RgbaImage::from_pixel(300, 400, Rgba([255, 128, 0, 10]));
        let tensor = preprocess(&DynamicImage::ImageRgba8(rgba));

        assert_eq!(tensor.shape(), [1, 128, 128, 3]);
        let view = tensor.view();
        assert!(view.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!((view[[0, 10, 10, 0]] - 1.0).abs() < 1e-6);
        assert!((view[[0, 10, 10, 1]] - 128.0 / 255.0).abs() < 1e-6);
        assert!(view[[0, 10, 10, 2]].abs() < 1e-6);
    }

    #[test]
    fn grayscale_input_is_expanded() {
        let gray = GrayImage::from_pixel(64, 32, Luma([51]));
        let tensor = preprocess(&DynamicImage::ImageLuma8(gray));
        assert_eq!(tensor.shape(), [1, 128, 128, 3]);
        let view = tensor.view();
        for c in 0..3 {
            assert!((view[[0, 0, 0, c]] - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn from_array_checks_shape() {
        assert!(ImageTensor::from_array(Array4::zeros((1, 64, 64, 3))).is_err());
        let ok = ImageTensor::from_array(Array4::zeros((1, 128, 128, 3))).unwrap();
        assert_eq!(ok.as_contiguous().unwrap().len(), 128 * 128 * 3);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ThyraError::ImageDecode(_)));
    }

    #[test]
    fn decode_reports_details() {
        let rgba = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.details.width, 3);
        assert_eq!(decoded.details.height, 2);
        assert_eq!(decoded.details.format.as_deref(), Some("PNG"));
        assert_eq!(decoded.details.mode, "RGBA");
    }
}
