//! Raster images embedded as Image XObjects.
//!
//! PNG input is decoded and its pixels re-compressed with FlateDecode; a
//! translucent alpha channel becomes a separate soft mask.

use crate::object::{Dict, Object, ObjectRef};
use bytes::Bytes;
use std::io::Write;

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Pixel layout of the embedded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// One gray sample per pixel
    DeviceGray,
    /// Three samples per pixel
    DeviceRGB,
}

impl ColorSpace {
    /// Samples per pixel.
    pub fn components(&self) -> u8 {
        match self {
            Self::DeviceGray => 1,
            Self::DeviceRGB => 3,
        }
    }

    /// Name used for `/ColorSpace`.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::DeviceGray => "DeviceGray",
            Self::DeviceRGB => "DeviceRGB",
        }
    }
}

/// A decoded image ready to be written as an XObject.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Sample layout of `data`
    pub color_space: ColorSpace,
    /// Flate-compressed pixel data
    pub data: Bytes,
    /// Flate-compressed alpha channel, absent for opaque images
    pub soft_mask: Option<Bytes>,
}

/// Split interleaved samples into color and alpha planes.
fn split_alpha(samples: &[u8], color_len: usize) -> (Vec<u8>, Vec<u8>) {
    let pixel_len = color_len + 1;
    let mut color = Vec::with_capacity(samples.len() / pixel_len * color_len);
    let mut alpha = Vec::with_capacity(samples.len() / pixel_len);
    for pixel in samples.chunks_exact(pixel_len) {
        color.extend_from_slice(&pixel[..color_len]);
        alpha.push(pixel[color_len]);
    }
    (color, alpha)
}

impl ImageData {
    /// Decode a PNG file.
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        if !data.starts_with(PNG_SIGNATURE) {
            return Err(ImageError::UnsupportedFormat);
        }

        let decoded = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;
        let (width, height) = image::GenericImageView::dimensions(&decoded);
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidData("zero-sized image".to_string()));
        }

        use image::ColorType as C;
        let (color_space, pixels, alpha) = match decoded.color() {
            C::L8 | C::L16 => (ColorSpace::DeviceGray, decoded.into_luma8().into_raw(), None),
            C::La8 | C::La16 => {
                let (gray, alpha) = split_alpha(decoded.into_luma_alpha8().as_raw(), 1);
                (ColorSpace::DeviceGray, gray, Some(alpha))
            },
            C::Rgba8 | C::Rgba16 | C::Rgba32F => {
                let (rgb, alpha) = split_alpha(decoded.into_rgba8().as_raw(), 3);
                (ColorSpace::DeviceRGB, rgb, Some(alpha))
            },
            _ => (ColorSpace::DeviceRGB, decoded.into_rgb8().into_raw(), None),
        };

        // A fully opaque alpha channel carries no information.
        let alpha = alpha.filter(|a| a.iter().any(|&v| v != u8::MAX));

        Ok(Self {
            width,
            height,
            color_space,
            data: deflate(&pixels)?,
            soft_mask: match alpha {
                Some(a) => Some(deflate(&a)?),
                None => None,
            },
        })
    }

    /// Image XObject dictionary, pointing at `smask` when a mask was written.
    pub fn xobject_dict(&self, smask: Option<ObjectRef>) -> Dict {
        let mut dict = image_dict(self.width, self.height, self.color_space);
        if let Some(smask) = smask {
            dict.insert("SMask".to_string(), Object::Reference(smask));
        }
        dict
    }

    /// Soft mask dictionary, if the image has one.
    pub fn soft_mask_dict(&self) -> Option<Dict> {
        self.soft_mask
            .as_ref()
            .map(|_| image_dict(self.width, self.height, ColorSpace::DeviceGray))
    }
}

fn image_dict(width: u32, height: u32, color_space: ColorSpace) -> Dict {
    [
        ("Type", Object::name("XObject")),
        ("Subtype", Object::name("Image")),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::name(color_space.pdf_name())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::name("FlateDecode")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Failure to turn an image file into XObject data.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Input is not a PNG file
    #[error("not a PNG image")]
    UnsupportedFormat,

    /// PNG decoder rejected the data
    #[error("PNG decode failed: {0}")]
    DecodeError(String),

    /// Flate encoder failed
    #[error("image compression failed: {0}")]
    CompressionError(String),

    /// Decoded image is unusable
    #[error("invalid image: {0}")]
    InvalidData(String),
}

fn deflate(samples: &[u8]) -> Result<Bytes, ImageError> {
    let compress = || -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(samples)?;
        encoder.finish()
    };
    compress()
        .map(Bytes::from)
        .map_err(|e| ImageError::CompressionError(e.to_string()))
}
