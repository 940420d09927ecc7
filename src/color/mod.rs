//! Color model used by the team color picker

pub mod hsv;
pub mod picker;

pub use hsv::{hex_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsv, ColorParseError, Hsv, Rgb, FALLBACK_COLOR};
pub use picker::{ColorPicker, EMPTY_SEED_COLOR, PALETTE_SIZE};
