pub const SRGB_COLOR_SPACE: &str = "sRGB";
