use std::io::{Cursor, Seek, Write};

use image::RgbaImage;
use log::debug;
use project::Project;

use crate::{render, RenderError, RenderImageType};

/// Renders `project` and encodes the result as `image_type`.
pub fn render_to_image_type(
    project: &Project,
    image_type: RenderImageType,
) -> Result<Vec<u8>, RenderError> {
    let image = render(project)?;
    encode_image(&image, image_type)
}

pub fn encode_image(image: &RgbaImage, image_type: RenderImageType) -> Result<Vec<u8>, RenderError> {
    let mut data = Vec::new();
    data.try_reserve(image.as_raw().len())
        .map_err(|_| RenderError::FailedToCreateImageData)?;

    write_image(image, image_type, &mut Cursor::new(&mut data))?;

    debug!("Encoded {} image, {} bytes", image_type, data.len());
    Ok(data)
}

/// Encodes `image` into an externally owned destination. Encoders need to
/// seek back, so a plain `Write` is not enough.
pub fn write_image<W: Write + Seek>(
    image: &RgbaImage,
    image_type: RenderImageType,
    dest: &mut W,
) -> Result<(), RenderError> {
    let format = image_type
        .output_format()
        .ok_or(RenderError::FailedToCreateImageDestination)?;

    image
        .write_to(dest, format)
        .map_err(|_| RenderError::FailedToCreateImageOfType(image_type))
}
