use std::cmp::Ordering;

mod errors;
pub mod packing;
mod serialization;

pub use crate::errors::PackingError;
pub use crate::packing::Pack;

/// Position of a single pixel. The origin is the top-left corner of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
}

impl Coordinate {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn is_within(&self, size: Size) -> bool {
        self.x < size.width && self.y < size.height
    }
}

// Row-major: rows top to bottom, then columns left to right.
impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An sRGB color with 8-bit channels and a floating point opacity.
///
/// `alpha` is nominally in `0.0..=1.0`. Anything at or below zero is treated as
/// "not painted" and is dropped the next time a layer is culled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Judged on the `f32` alpha the packed form keeps, so a color that is
    /// visible stays visible after a trip through a document.
    pub fn is_visible(&self) -> bool {
        (self.alpha as f32) > 0.0
    }

    pub fn unit_red(&self) -> f64 {
        self.red as f64 / 255.0
    }

    pub fn unit_green(&self) -> f64 {
        self.green as f64 / 255.0
    }

    pub fn unit_blue(&self) -> f64 {
        self.blue as f64 / 255.0
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.is_within(*self)
    }
}
