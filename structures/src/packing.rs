//! Canonical fixed-width integer forms of the value types.
//!
//! Every packed value is a big-endian concatenation of the fields, read back
//! as a single unsigned integer:
//!
//! ```text
//! Coordinate, Size  u32  [ x / width : 2 ][ y / height : 2 ]
//! Color             u64  [ r : 1 ][ g : 1 ][ b : 1 ][ 0x00 : 1 ][ alpha as f32 : 4 ]
//! ```
//!
//! Packing a [`Color`] narrows its alpha to `f32`, so `unpack(pack(c)).alpha`
//! is `c.alpha as f32 as f64`, not `c.alpha`.

use crate::{Color, Coordinate, PackingError, Size};

pub trait Pack: Sized {
    type Packed;

    fn pack(&self) -> Self::Packed;

    fn unpack(packed: Self::Packed) -> Result<Self, PackingError>;
}

fn pack_pair(high: u16, low: u16) -> u32 {
    let [h0, h1] = high.to_be_bytes();
    let [l0, l1] = low.to_be_bytes();
    u32::from_be_bytes([h0, h1, l0, l1])
}

fn unpack_pair(packed: u32) -> (u16, u16) {
    let [h0, h1, l0, l1] = packed.to_be_bytes();
    (u16::from_be_bytes([h0, h1]), u16::from_be_bytes([l0, l1]))
}

impl Pack for Coordinate {
    type Packed = u32;

    fn pack(&self) -> u32 {
        pack_pair(self.x, self.y)
    }

    fn unpack(packed: u32) -> Result<Self, PackingError> {
        let (x, y) = unpack_pair(packed);
        Ok(Coordinate { x, y })
    }
}

impl Pack for Size {
    type Packed = u32;

    fn pack(&self) -> u32 {
        pack_pair(self.width, self.height)
    }

    fn unpack(packed: u32) -> Result<Self, PackingError> {
        let (width, height) = unpack_pair(packed);
        Ok(Size { width, height })
    }
}

impl Pack for Color {
    type Packed = u64;

    fn pack(&self) -> u64 {
        let [a0, a1, a2, a3] = (self.alpha as f32).to_bits().to_be_bytes();
        u64::from_be_bytes([self.red, self.green, self.blue, 0x00, a0, a1, a2, a3])
    }

    fn unpack(packed: u64) -> Result<Self, PackingError> {
        let [red, green, blue, reserved, a0, a1, a2, a3] = packed.to_be_bytes();

        if reserved != 0x00 {
            return Err(PackingError::NonZeroReservedByte(reserved));
        }

        let alpha = f32::from_bits(u32::from_be_bytes([a0, a1, a2, a3]));
        if alpha.is_nan() {
            return Err(PackingError::NanAlpha);
        }

        Ok(Color {
            red,
            green,
            blue,
            alpha: alpha as f64,
        })
    }
}
