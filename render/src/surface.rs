use image::{ImageBuffer, RgbaImage};
use log::trace;
use structures::{Color, Coordinate, Size};

use crate::constants::SRGB_COLOR_SPACE;
use crate::RenderError;

/// Anything a project can be painted onto.
///
/// `fill` paints the 1x1 square at `coordinate`. How the color combines with
/// what is already there is up to the surface.
pub trait DrawingSurface {
    fn fill(&mut self, coordinate: Coordinate, color: &Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
}

impl ColorSpace {
    pub fn named(name: &str) -> Result<Self, RenderError> {
        if name.eq_ignore_ascii_case(SRGB_COLOR_SPACE) {
            Ok(ColorSpace::Srgb)
        } else {
            Err(RenderError::FailedToCreateColorSpace(name.to_string()))
        }
    }
}

/// In-memory RGBA surface that composites source-over with premultiplied
/// alpha. Pixels outside the surface are clipped.
pub struct PixelSurface {
    size: Size,
    color_space: ColorSpace,
    premultiplied: Vec<[f32; 4]>,
}

// Alpha is narrowed before use so a color renders the same before and after
// a trip through its packed form.
fn premultiply(color: &Color) -> [f32; 4] {
    let alpha = color.alpha.clamp(0.0, 1.0) as f32;
    [
        color.unit_red() as f32 * alpha,
        color.unit_green() as f32 * alpha,
        color.unit_blue() as f32 * alpha,
        alpha,
    ]
}

fn quantize(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

impl PixelSurface {
    pub fn new(size: Size, color_space: ColorSpace) -> Result<Self, RenderError> {
        if size.area() == 0 {
            return Err(RenderError::FailedToCreateBitmapContext);
        }

        let mut premultiplied = Vec::new();
        premultiplied
            .try_reserve_exact(size.area() as usize)
            .map_err(|_| RenderError::FailedToCreateBitmapContext)?;
        premultiplied.resize(size.area() as usize, [0.0; 4]);

        Ok(Self {
            size,
            color_space,
            premultiplied,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Replaces every pixel with `color`, no compositing.
    pub fn clear(&mut self, color: &Color) {
        self.premultiplied.fill(premultiply(color));
    }

    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if !coordinate.is_within(self.size) {
            return None;
        }
        Some(coordinate.y as usize * self.size.width as usize + coordinate.x as usize)
    }

    /// Converts to a straight-alpha 8-bit image.
    pub fn into_image(self) -> Result<RgbaImage, RenderError> {
        let mut raw = Vec::with_capacity(self.premultiplied.len() * 4);
        for [red, green, blue, alpha] in self.premultiplied {
            if alpha <= 0.0 {
                raw.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                raw.extend_from_slice(&[
                    quantize(red / alpha),
                    quantize(green / alpha),
                    quantize(blue / alpha),
                    quantize(alpha),
                ]);
            }
        }

        ImageBuffer::from_raw(self.size.width as u32, self.size.height as u32, raw)
            .ok_or(RenderError::FailedToCreateImage)
    }
}

impl DrawingSurface for PixelSurface {
    fn fill(&mut self, coordinate: Coordinate, color: &Color) {
        let Some(index) = self.index(coordinate) else {
            trace!("Clipped fill at {:?}", coordinate);
            return;
        };

        let source = premultiply(color);
        if source[3] <= 0.0 {
            return;
        }
        let destination = &mut self.premultiplied[index];
        let remaining = 1.0 - source[3];
        for channel in 0..4 {
            destination[channel] = source[channel] + destination[channel] * remaining;
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use structures::{Color, Coordinate, Size};

    use super::{ColorSpace, DrawingSurface, PixelSurface};
    use crate::RenderError;

    #[test]
    fn color_space_lookup() {
        assert_eq!(ColorSpace::named("sRGB"), Ok(ColorSpace::Srgb));
        assert_eq!(ColorSpace::named("srgb"), Ok(ColorSpace::Srgb));
        assert_eq!(
            ColorSpace::named("Display P3"),
            Err(RenderError::FailedToCreateColorSpace("Display P3".to_string()))
        );
    }

    #[test]
    fn empty_surfaces_cannot_be_created() {
        assert!(matches!(
            PixelSurface::new(Size::new(0, 16), ColorSpace::Srgb),
            Err(RenderError::FailedToCreateBitmapContext)
        ));
    }

    #[test]
    fn opaque_fill_replaces() {
        let mut surface = PixelSurface::new(Size::new(2, 2), ColorSpace::Srgb).unwrap();
        surface.fill(Coordinate::new(1, 0), &Color::opaque(10, 20, 30));
        surface.fill(Coordinate::new(1, 0), &Color::opaque(128, 0, 170));

        let image = surface.into_image().unwrap();
        assert_eq!(image.get_pixel(1, 0), &Rgba([128, 0, 170, 255]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn translucent_fill_blends_over() {
        let mut surface = PixelSurface::new(Size::new(1, 1), ColorSpace::Srgb).unwrap();
        surface.clear(&Color::opaque(255, 255, 255));
        surface.fill(Coordinate::new(0, 0), &Color::new(0, 0, 0, 0.5));

        let image = surface.into_image().unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn transparent_fill_is_a_no_op() {
        let mut surface = PixelSurface::new(Size::new(1, 1), ColorSpace::Srgb).unwrap();
        surface.fill(Coordinate::new(0, 0), &Color::opaque(40, 50, 60));
        surface.fill(Coordinate::new(0, 0), &Color::new(255, 255, 255, 0.0));
        surface.fill(Coordinate::new(0, 0), &Color::new(255, 255, 255, -1.0));

        let image = surface.into_image().unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([40, 50, 60, 255]));
    }

    #[test]
    fn fills_outside_the_surface_are_clipped() {
        let mut surface = PixelSurface::new(Size::new(2, 2), ColorSpace::Srgb).unwrap();
        surface.fill(Coordinate::new(2, 0), &Color::opaque(1, 1, 1));
        surface.fill(Coordinate::new(0, 2), &Color::opaque(1, 1, 1));

        let image = surface.into_image().unwrap();
        assert!(image.pixels().all(|pixel| pixel == &Rgba([0, 0, 0, 0])));
    }
}
