//! Compositing of projects into raster images.
//!
//! Layers are painted back to front in the order they were added to the
//! project. Within a layer, pixels are painted row by row, and only pixels
//! that are actually stored (and would survive a cull) are touched.

mod compositor;
mod constants;
mod errors;
mod image_type;
mod output;
mod surface;

pub use crate::compositor::{render, render_in_color_space, render_into};
pub use crate::constants::SRGB_COLOR_SPACE;
pub use crate::errors::RenderError;
pub use crate::image_type::RenderImageType;
pub use crate::output::{encode_image, render_to_image_type, write_image};
pub use crate::surface::{ColorSpace, DrawingSurface, PixelSurface};
