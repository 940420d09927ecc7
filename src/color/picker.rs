//! Color picker state: a saturation/value palette next to a hue bar.
//!
//! Pointer positions are clamped to the palette and hue bar before they
//! reach the color math.

use serde::{Deserialize, Serialize};

use super::hsv::{hex_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsv, Hsv};

/// Side of the square palette, also the height of the hue bar
pub const PALETTE_SIZE: f64 = 150.0;

/// Starting color when a team has no color set
pub const EMPTY_SEED_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPicker {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

impl ColorPicker {
    /// Seed the picker from a hex color. An empty color starts from
    /// [`EMPTY_SEED_COLOR`], malformed input from black.
    pub fn from_hex(hex: &str) -> Self {
        let hex = match hex.trim() {
            "" => EMPTY_SEED_COLOR,
            hex => hex,
        };
        let hsv = rgb_to_hsv(hex_to_rgb(hex));
        Self {
            hue: hsv.h,
            saturation: hsv.s,
            value: hsv.v,
        }
    }

    /// Pointer moved along the hue bar to `y`
    pub fn drag_hue(&mut self, y: f64) {
        self.hue = clamp_unit(y / PALETTE_SIZE) * 360.0;
    }

    /// Pointer moved inside the palette to `(x, y)`; top-left is full value,
    /// no saturation
    pub fn drag_palette(&mut self, x: f64, y: f64) {
        self.saturation = clamp_unit(x / PALETTE_SIZE);
        self.value = clamp_unit(1.0 - y / PALETTE_SIZE);
    }

    pub fn hsv(&self) -> Hsv {
        Hsv::new(self.hue, self.saturation, self.value)
    }

    /// Hex string of the color currently under the cursors
    pub fn selected_color(&self) -> String {
        rgb_to_hex(hsv_to_rgb(self.hsv()))
    }

    /// Cursor offset along the hue bar
    pub fn hue_position(&self) -> f64 {
        clamp_unit(self.hue / 360.0) * PALETTE_SIZE
    }

    /// Cursor offset inside the palette
    pub fn palette_position(&self) -> (f64, f64) {
        (
            clamp_unit(self.saturation) * PALETTE_SIZE,
            clamp_unit(1.0 - self.value) * PALETTE_SIZE,
        )
    }
}
