use structures::Size;

pub const DEFAULT_CANVAS_SIZE: Size = Size::new(16, 16);

// Stable document field numbers. Never renumber, only append.
pub(crate) const FIELD_ID: u64 = 0;
pub(crate) const FIELD_NAME: u64 = 1;
pub(crate) const LAYER_FIELD_PIXELS: u64 = 2;
pub(crate) const PROJECT_FIELD_LAYERS: u64 = 2;
pub(crate) const PROJECT_FIELD_SIZE: u64 = 3;
