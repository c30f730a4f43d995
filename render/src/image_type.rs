use std::fmt;

use image::{ImageFormat, ImageOutputFormat};

/// Encoded file formats a rendered project can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderImageType {
    Png,
    Bmp,
    Tiff,
}

impl RenderImageType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match ImageFormat::from_extension(extension)? {
            ImageFormat::Png => Some(RenderImageType::Png),
            ImageFormat::Bmp => Some(RenderImageType::Bmp),
            ImageFormat::Tiff => Some(RenderImageType::Tiff),
            _ => None,
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            RenderImageType::Png => ImageFormat::Png,
            RenderImageType::Bmp => ImageFormat::Bmp,
            RenderImageType::Tiff => ImageFormat::Tiff,
        }
    }

    /// `None` if the encoder for this type was compiled out of `image`.
    pub(crate) fn output_format(&self) -> Option<ImageOutputFormat> {
        match ImageOutputFormat::from(self.image_format()) {
            ImageOutputFormat::Unsupported(_) => None,
            format => Some(format),
        }
    }
}

impl fmt::Display for RenderImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderImageType::Png => write!(f, "png"),
            RenderImageType::Bmp => write!(f, "bmp"),
            RenderImageType::Tiff => write!(f, "tiff"),
        }
    }
}
