use image::RgbaImage;
use log::debug;
use project::{Layer, Project};
use structures::Size;

use crate::constants::SRGB_COLOR_SPACE;
use crate::surface::{ColorSpace, DrawingSurface, PixelSurface};
use crate::RenderError;

/// Renders `project` to an sRGB image the size of its canvas.
pub fn render(project: &Project) -> Result<RgbaImage, RenderError> {
    render_in_color_space(project, SRGB_COLOR_SPACE)
}

pub fn render_in_color_space(project: &Project, color_space: &str) -> Result<RgbaImage, RenderError> {
    let color_space = ColorSpace::named(color_space)?;
    let mut surface = PixelSurface::new(project.size(), color_space)?;

    render_into(project, &mut surface);

    surface.into_image()
}

/// Paints every layer onto `surface`, bottom layer first.
pub fn render_into<S: DrawingSurface + ?Sized>(project: &Project, surface: &mut S) {
    let size = project.size();
    debug!(
        "Rendering project {} ({} layers) at {}x{}",
        project.id(),
        project.layer_count(),
        size.width,
        size.height
    );

    for layer in project.layers() {
        render_layer(layer, size, surface);
    }
}

// Rows top to bottom, columns left to right. Pixels outside the canvas are
// skipped; transparent ones are handed to the surface like any other.
fn render_layer<S: DrawingSurface + ?Sized>(layer: &Layer, size: Size, surface: &mut S) {
    for (coordinate, color) in layer.pixels_in_paint_order(size) {
        surface.fill(coordinate, color);
    }
}
