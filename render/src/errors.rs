use std::fmt;

use crate::RenderImageType;

/// Every way a render can fail. A render call either produces one image or
/// exactly one of these; none are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    FailedToCreateColorSpace(String),
    FailedToCreateBitmapContext,
    FailedToCreateImage,
    FailedToCreateImageData,
    FailedToCreateImageDestination,
    FailedToCreateImageOfType(RenderImageType),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::FailedToCreateColorSpace(name) => {
                write!(f, "color space {:?} is not available", name)
            }
            RenderError::FailedToCreateBitmapContext => write!(f, "could not create drawing surface"),
            RenderError::FailedToCreateImage => write!(f, "could not materialize image"),
            RenderError::FailedToCreateImageData => write!(f, "could not allocate encoded image data"),
            RenderError::FailedToCreateImageDestination => {
                write!(f, "no image encoder available for the requested type")
            }
            RenderError::FailedToCreateImageOfType(image_type) => {
                write!(f, "could not encode image as {}", image_type)
            }
        }
    }
}

impl std::error::Error for RenderError {}
